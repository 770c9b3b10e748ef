use crate::core::{CatalogProvider, Difficulty, Recipe, Result, UserId};
use crate::utils::error::MealError;
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// 遠端食譜服務：`GET {endpoint}/users/{user_id}/recipes[?difficulty=X]`
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    endpoint: Url,
}

impl HttpCatalog {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        validate_url("catalog.endpoint", endpoint)?;
        let endpoint = Url::parse(endpoint).map_err(|e| MealError::InvalidConfigValueError {
            field: "catalog.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn recipes_url(&self, user_id: &UserId, difficulty: Option<Difficulty>) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| MealError::ConfigError {
                message: format!("catalog endpoint '{}' cannot take a path", self.endpoint),
            })?
            .pop_if_empty()
            .extend(["users", user_id.as_str(), "recipes"]);

        if let Some(difficulty) = difficulty {
            url.query_pairs_mut()
                .append_pair("difficulty", difficulty.as_str());
        }
        Ok(url)
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    async fn fetch(&self, user_id: &UserId, difficulty: Option<Difficulty>) -> Result<Vec<Recipe>> {
        let url = self.recipes_url(user_id, difficulty)?;
        tracing::debug!("Fetching recipes from: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MealError::CatalogUnavailable {
                message: format!("request failed: {}", e),
            })?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            return Err(MealError::CatalogUnavailable {
                message: format!("catalog service returned {}", status),
            });
        }

        let recipes: Vec<Recipe> = response.json().await?;
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipes_url_layout() {
        let catalog = HttpCatalog::new("https://recipes.example.com/api/", Duration::from_secs(5)).unwrap();

        let url = catalog.recipes_url(&UserId::new("alice"), None).unwrap();
        assert_eq!(url.as_str(), "https://recipes.example.com/api/users/alice/recipes");

        let url = catalog
            .recipes_url(&UserId::new("alice"), Some(Difficulty::Easy))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://recipes.example.com/api/users/alice/recipes?difficulty=Easy"
        );
    }

    #[test]
    fn test_user_id_is_escaped() {
        let catalog = HttpCatalog::new("http://localhost:8080", Duration::from_secs(5)).unwrap();

        let url = catalog.recipes_url(&UserId::new("a/b c"), None).unwrap();

        assert_eq!(url.as_str(), "http://localhost:8080/users/a%2Fb%20c/recipes");
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(HttpCatalog::new("ftp://example.com", Duration::from_secs(5)).is_err());
        assert!(HttpCatalog::new("", Duration::from_secs(5)).is_err());
    }
}

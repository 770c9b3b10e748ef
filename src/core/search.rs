use crate::core::catalog::CatalogView;
use crate::core::matcher::{CombinationMatcher, TimeWindow};
use crate::core::{CatalogProvider, CombinationShape, Difficulty, MatchResult, Result, UserId};
use crate::utils::validation::validate_time_budget;

/// 單次搜尋的請求內容，取代全域的 session 狀態
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub user_id: UserId,
    pub target_minutes: i64,
    pub tolerance_minutes: i64,
    pub shape: String,
    pub difficulty: Option<Difficulty>,
}

impl SearchRequest {
    pub fn new(user_id: UserId, target_minutes: i64, tolerance_minutes: i64, shape: impl Into<String>) -> Self {
        Self {
            user_id,
            target_minutes,
            tolerance_minutes,
            shape: shape.into(),
            difficulty: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub shape: CombinationShape,
    pub target_minutes: u32,
    pub window: TimeWindow,
    pub catalog_size: usize,
    pub results: Vec<MatchResult>,
    pub warnings: Vec<String>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

pub struct MealSearchService<P: CatalogProvider> {
    provider: P,
    matcher: CombinationMatcher,
}

impl<P: CatalogProvider> MealSearchService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            matcher: CombinationMatcher::new(),
        }
    }

    pub fn with_matcher(provider: P, matcher: CombinationMatcher) -> Self {
        Self { provider, matcher }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 驗證輸入、解析形狀、載入目錄後執行比對
    ///
    /// 形狀錯誤在讀取目錄之前回報；目錄無法使用只會產生警告與空結果。
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let (target, tolerance) =
            validate_time_budget(request.target_minutes, request.tolerance_minutes)?;
        let shape: CombinationShape = request.shape.parse()?;

        tracing::debug!(
            "Searching {} for user '{}' (target {} ±{} min, difficulty: {:?})",
            shape,
            request.user_id,
            target,
            tolerance,
            request.difficulty
        );

        let view = CatalogView::load(&self.provider, &request.user_id, request.difficulty).await;
        let warnings = view.warning().map(|w| vec![w.to_string()]).unwrap_or_default();

        let results = self
            .matcher
            .find_matches(view.recipes(), target, tolerance, &shape);

        tracing::info!(
            "🍽️ {} combination(s) for {} within {} ±{} min ({} recipes searched)",
            results.len(),
            shape,
            target,
            tolerance,
            view.len()
        );

        Ok(SearchOutcome {
            shape,
            target_minutes: target,
            window: TimeWindow::around(target, tolerance),
            catalog_size: view.len(),
            results,
            warnings,
        })
    }

    pub async fn find(
        &self,
        user_id: &UserId,
        target_minutes: i64,
        tolerance_minutes: i64,
        shape: &str,
    ) -> Result<Vec<MatchResult>> {
        let request = SearchRequest::new(user_id.clone(), target_minutes, tolerance_minutes, shape);
        Ok(self.search(&request).await?.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use crate::core::{Category, Recipe};
    use crate::domain::model::NewRecipe;
    use crate::utils::error::MealError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogProvider for CountingProvider {
        async fn fetch(&self, _user_id: &UserId, _difficulty: Option<Difficulty>) -> Result<Vec<Recipe>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    struct OfflineProvider;

    #[async_trait]
    impl CatalogProvider for OfflineProvider {
        async fn fetch(&self, _user_id: &UserId, _difficulty: Option<Difficulty>) -> Result<Vec<Recipe>> {
            Err(MealError::CatalogUnavailable {
                message: "connection refused".to_string(),
            })
        }
    }

    async fn seeded_catalog() -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        catalog
            .add_recipe(&alice, NewRecipe::new("Roast chicken", Category::Main, Difficulty::Medium, 10, 20))
            .await
            .unwrap();
        catalog
            .add_recipe(&alice, NewRecipe::new("Rice", Category::Side, Difficulty::Easy, 5, 15))
            .await
            .unwrap();
        catalog
            .add_recipe(&alice, NewRecipe::new("Lasagna", Category::Main, Difficulty::Hard, 15, 30))
            .await
            .unwrap();
        catalog
            .add_recipe(&bob, NewRecipe::new("Salad", Category::Side, Difficulty::Easy, 10, 10))
            .await
            .unwrap();
        catalog
    }

    #[tokio::test]
    async fn test_search_pairing_example() {
        let service = MealSearchService::new(seeded_catalog().await);

        let results = service
            .find(&UserId::new("alice"), 50, 5, "Main+Side")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipes[0].name, "Roast chicken");
        assert_eq!(results[0].recipes[1].name, "Rice");
        assert_eq!(results[0].total_time, 50);
    }

    #[tokio::test]
    async fn test_search_never_crosses_users() {
        let service = MealSearchService::new(seeded_catalog().await);

        let results = service
            .find(&UserId::new("alice"), 50, 30, "Main+Side")
            .await
            .unwrap();

        assert!(results
            .iter()
            .flat_map(|m| m.recipes.iter())
            .all(|r| r.user_id.as_str() == "alice"));
    }

    #[tokio::test]
    async fn test_search_with_difficulty_filter() {
        let service = MealSearchService::new(seeded_catalog().await);
        let request = SearchRequest::new(UserId::new("alice"), 40, 10, "single_Main")
            .with_difficulty(Some(Difficulty::Hard));

        let outcome = service.search(&request).await.unwrap();

        assert_eq!(outcome.catalog_size, 1);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].recipes[0].name, "Lasagna");
    }

    #[tokio::test]
    async fn test_invalid_shape_is_reported_before_fetching() {
        let provider = CountingProvider {
            calls: AtomicUsize::new(0),
        };
        let service = MealSearchService::new(provider);

        let err = service
            .find(&UserId::new("alice"), 30, 10, "Main")
            .await
            .unwrap_err();

        assert!(matches!(err, MealError::InvalidShape { .. }));
        assert_eq!(service.provider().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_target_is_rejected() {
        let service = MealSearchService::new(seeded_catalog().await);

        let err = service
            .find(&UserId::new("alice"), 0, 10, "single_Main")
            .await
            .unwrap_err();
        assert!(matches!(err, MealError::InvalidTarget { .. }));

        let err = service
            .find(&UserId::new("alice"), 30, -1, "single_Main")
            .await
            .unwrap_err();
        assert!(matches!(err, MealError::InvalidTarget { .. }));
    }

    #[tokio::test]
    async fn test_unavailable_catalog_gives_empty_outcome_with_warning() {
        let service = MealSearchService::new(OfflineProvider);
        let request = SearchRequest::new(UserId::new("alice"), 30, 10, "Main+Side");

        let outcome = service.search(&request).await.unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.catalog_size, 0);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_outcome_reports_window() {
        let service = MealSearchService::new(seeded_catalog().await);
        let request = SearchRequest::new(UserId::new("alice"), 5, 10, "single_Side");

        let outcome = service.search(&request).await.unwrap();

        assert_eq!(outcome.window, TimeWindow { min: 0, max: 15 });
        assert_eq!(outcome.shape, CombinationShape::Single(Category::Side));
        assert!(outcome.warnings.is_empty());
    }
}

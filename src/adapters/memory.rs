use crate::core::{CatalogProvider, Difficulty, Recipe, RecipeId, Result, UserId};
use crate::domain::model::NewRecipe;
use crate::utils::error::MealError;
use crate::utils::validation::Validate;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// 記憶體中的食譜庫，所有操作都以擁有者為範圍
#[derive(Debug)]
pub struct InMemoryCatalog {
    recipes: RwLock<Vec<Recipe>>,
    /// 最後配發的 id；0 表示尚未配發
    last_id: AtomicU64,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::with_recipes(Vec::new())
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let last_id = recipes.iter().map(|r| r.id.0).max().unwrap_or(0);
        Self {
            recipes: RwLock::new(recipes),
            last_id: AtomicU64::new(last_id),
        }
    }

    pub async fn add_recipe(&self, user_id: &UserId, recipe: NewRecipe) -> Result<Recipe> {
        recipe.validate()?;

        let id = self.allocate_id()?;
        let stored = recipe.into_recipe(id, user_id.clone());

        self.recipes.write().await.push(stored.clone());
        tracing::debug!("Added recipe {} ('{}') for user '{}'", id, stored.name, user_id);
        Ok(stored)
    }

    fn allocate_id(&self) -> Result<RecipeId> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| RecipeId(last + 1))
            .map_err(|last| MealError::ValidationError {
                message: format!("recipe id space exhausted after #{}", last),
            })
    }

    pub async fn update_recipe(&self, user_id: &UserId, id: RecipeId, recipe: NewRecipe) -> Result<Recipe> {
        recipe.validate()?;

        let mut recipes = self.recipes.write().await;
        let slot = recipes
            .iter_mut()
            .find(|r| r.id == id && &r.user_id == user_id)
            .ok_or_else(|| not_found(user_id, id))?;

        *slot = recipe.into_recipe(id, user_id.clone());
        tracing::debug!("Updated recipe {} for user '{}'", id, user_id);
        Ok(slot.clone())
    }

    pub async fn delete_recipe(&self, user_id: &UserId, id: RecipeId) -> Result<Recipe> {
        let mut recipes = self.recipes.write().await;
        let index = recipes
            .iter()
            .position(|r| r.id == id && &r.user_id == user_id)
            .ok_or_else(|| not_found(user_id, id))?;

        let removed = recipes.remove(index);
        tracing::debug!("Deleted recipe {} for user '{}'", id, user_id);
        Ok(removed)
    }

    pub async fn get_recipe(&self, user_id: &UserId, id: RecipeId) -> Result<Recipe> {
        self.recipes
            .read()
            .await
            .iter()
            .find(|r| r.id == id && &r.user_id == user_id)
            .cloned()
            .ok_or_else(|| not_found(user_id, id))
    }

    pub async fn list_recipes(&self, user_id: &UserId) -> Vec<Recipe> {
        self.recipes
            .read()
            .await
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// 所有使用者的食譜，用於寫回目錄檔
    pub async fn all_recipes(&self) -> Vec<Recipe> {
        self.recipes.read().await.clone()
    }
}

fn not_found(user_id: &UserId, id: RecipeId) -> MealError {
    MealError::RecipeNotFound {
        id: id.0,
        user_id: user_id.to_string(),
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn fetch(&self, user_id: &UserId, difficulty: Option<Difficulty>) -> Result<Vec<Recipe>> {
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .filter(|r| &r.user_id == user_id)
            .filter(|r| difficulty.map_or(true, |d| r.difficulty == d))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;

    fn soup() -> NewRecipe {
        NewRecipe::new("Miso soup", Category::Appetizer, Difficulty::Easy, 5, 10)
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids() {
        let catalog = InMemoryCatalog::new();
        let alice = UserId::new("alice");

        let first = catalog.add_recipe(&alice, soup()).await.unwrap();
        let second = catalog.add_recipe(&alice, soup()).await.unwrap();

        assert_eq!(first.id, RecipeId(1));
        assert_eq!(second.id, RecipeId(2));
        assert_eq!(first.total_time(), 15);
        assert_eq!(catalog.list_recipes(&alice).await.len(), 2);
    }

    #[tokio::test]
    async fn test_ids_continue_after_seeded_recipes() {
        let seeded = soup().into_recipe(RecipeId(41), UserId::new("alice"));
        let catalog = InMemoryCatalog::with_recipes(vec![seeded]);

        let added = catalog.add_recipe(&UserId::new("bob"), soup()).await.unwrap();

        assert_eq!(added.id, RecipeId(42));
    }

    #[tokio::test]
    async fn test_add_fails_cleanly_when_ids_are_exhausted() {
        let seeded = soup().into_recipe(RecipeId(u64::MAX), UserId::new("alice"));
        let catalog = InMemoryCatalog::with_recipes(vec![seeded]);

        let err = catalog
            .add_recipe(&UserId::new("alice"), soup())
            .await
            .unwrap_err();

        assert!(matches!(err, MealError::ValidationError { .. }));
        assert_eq!(catalog.all_recipes().await.len(), 1);
    }

    #[tokio::test]
    async fn test_last_id_can_still_be_allocated() {
        let seeded = soup().into_recipe(RecipeId(u64::MAX - 1), UserId::new("alice"));
        let catalog = InMemoryCatalog::with_recipes(vec![seeded]);

        let added = catalog.add_recipe(&UserId::new("alice"), soup()).await.unwrap();

        assert_eq!(added.id, RecipeId(u64::MAX));
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let catalog = InMemoryCatalog::new();
        let mut blank = soup();
        blank.name = "  ".to_string();

        let err = catalog.add_recipe(&UserId::new("alice"), blank).await.unwrap_err();

        assert!(matches!(err, MealError::ValidationError { .. }));
        assert!(catalog.all_recipes().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_recomputes_total_time() {
        let catalog = InMemoryCatalog::new();
        let alice = UserId::new("alice");
        let added = catalog.add_recipe(&alice, soup()).await.unwrap();

        let mut edited = soup();
        edited.cook_time = 40;
        let updated = catalog.update_recipe(&alice, added.id, edited).await.unwrap();

        assert_eq!(updated.total_time(), 45);
        assert_eq!(catalog.get_recipe(&alice, added.id).await.unwrap().total_time(), 45);
    }

    #[tokio::test]
    async fn test_other_users_cannot_touch_recipe() {
        let catalog = InMemoryCatalog::new();
        let alice = UserId::new("alice");
        let mallory = UserId::new("mallory");
        let added = catalog.add_recipe(&alice, soup()).await.unwrap();

        assert!(matches!(
            catalog.get_recipe(&mallory, added.id).await,
            Err(MealError::RecipeNotFound { .. })
        ));
        assert!(matches!(
            catalog.update_recipe(&mallory, added.id, soup()).await,
            Err(MealError::RecipeNotFound { .. })
        ));
        assert!(matches!(
            catalog.delete_recipe(&mallory, added.id).await,
            Err(MealError::RecipeNotFound { .. })
        ));
        assert_eq!(catalog.list_recipes(&alice).await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_recipe() {
        let catalog = InMemoryCatalog::new();
        let alice = UserId::new("alice");
        let added = catalog.add_recipe(&alice, soup()).await.unwrap();

        let removed = catalog.delete_recipe(&alice, added.id).await.unwrap();

        assert_eq!(removed.id, added.id);
        assert!(catalog.list_recipes(&alice).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_scopes_by_user_and_difficulty() {
        let catalog = InMemoryCatalog::new();
        let alice = UserId::new("alice");
        catalog.add_recipe(&alice, soup()).await.unwrap();
        let mut hard = soup();
        hard.difficulty = Difficulty::Hard;
        catalog.add_recipe(&alice, hard).await.unwrap();
        catalog.add_recipe(&UserId::new("bob"), soup()).await.unwrap();

        assert_eq!(catalog.fetch(&alice, None).await.unwrap().len(), 2);
        let easy = catalog.fetch(&alice, Some(Difficulty::Easy)).await.unwrap();
        assert_eq!(easy.len(), 1);
        assert_eq!(easy[0].difficulty, Difficulty::Easy);
    }
}

use crate::core::{CatalogProvider, Difficulty, Recipe, UserId};

/// 單一使用者的唯讀食譜快照
#[derive(Debug, Clone)]
pub struct CatalogView {
    user_id: UserId,
    difficulty: Option<Difficulty>,
    recipes: Vec<Recipe>,
    warning: Option<String>,
}

impl CatalogView {
    /// 從來源載入；來源無法使用時回傳空目錄並附上警告，不會失敗
    pub async fn load<P>(provider: &P, user_id: &UserId, difficulty: Option<Difficulty>) -> Self
    where
        P: CatalogProvider + ?Sized,
    {
        match provider.fetch(user_id, difficulty).await {
            Ok(recipes) => Self::from_recipes(user_id.clone(), recipes, difficulty),
            Err(e) => {
                tracing::warn!(
                    "⚠️ Recipe catalog unavailable for user '{}': {}",
                    user_id,
                    e
                );
                Self {
                    user_id: user_id.clone(),
                    difficulty,
                    recipes: Vec::new(),
                    warning: Some(e.to_string()),
                }
            }
        }
    }

    /// 再次套用使用者範圍與難度過濾，來源回傳的其他使用者食譜一律丟棄
    pub fn from_recipes(user_id: UserId, recipes: Vec<Recipe>, difficulty: Option<Difficulty>) -> Self {
        let fetched = recipes.len();

        let (owned, foreign): (Vec<Recipe>, Vec<Recipe>) =
            recipes.into_iter().partition(|r| r.user_id == user_id);
        if !foreign.is_empty() {
            tracing::warn!(
                "⚠️ Dropped {} recipe(s) not owned by user '{}'",
                foreign.len(),
                user_id
            );
        }

        let recipes: Vec<Recipe> = owned
            .into_iter()
            .filter(|r| difficulty.map_or(true, |d| r.difficulty == d))
            .collect();

        tracing::debug!(
            "Catalog view for '{}': {} fetched, {} eligible (difficulty: {:?})",
            user_id,
            fetched,
            recipes.len(),
            difficulty
        );

        Self {
            user_id,
            difficulty,
            recipes,
            warning: None,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

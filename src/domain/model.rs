use crate::utils::error::{MealError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 食譜分類（固定集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Main,
    Side,
    Appetizer,
    Snack,
    Dessert,
    Drink,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Main,
        Category::Side,
        Category::Appetizer,
        Category::Snack,
        Category::Dessert,
        Category::Drink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Main => "Main",
            Category::Side => "Side",
            Category::Appetizer => "Appetizer",
            Category::Snack => "Snack",
            Category::Dessert => "Dessert",
            Category::Drink => "Drink",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MealError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MealError::ValidationError {
                message: format!("Unknown category '{}'", s),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = MealError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MealError::ValidationError {
                message: format!("Unknown difficulty '{}'", s),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub prep_time: u32,
    pub cook_time: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Recipe {
    /// 準備 + 烹調時間（分鐘），每次讀取時重新計算
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}

/// 新增或更新食譜時的可編輯欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub prep_time: u32,
    pub cook_time: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl NewRecipe {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        prep_time: u32,
        cook_time: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            difficulty,
            prep_time,
            cook_time,
            ingredients: Vec::new(),
            instructions: None,
        }
    }

    pub fn into_recipe(self, id: RecipeId, user_id: UserId) -> Recipe {
        Recipe {
            id,
            user_id,
            name: self.name.trim().to_string(),
            category: self.category,
            difficulty: self.difficulty,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            ingredients: self.ingredients,
            instructions: self.instructions,
        }
    }
}

impl crate::utils::validation::Validate for NewRecipe {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("name", &self.name)
    }
}

/// 一次搜尋產生的組合結果，只存在於單次搜尋與顯示期間
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub recipes: Vec<Recipe>,
    pub total_time: u32,
    pub combination_size: usize,
    pub shape_label: String,
}

impl MatchResult {
    pub fn new(recipes: Vec<Recipe>, shape_label: impl Into<String>) -> Self {
        let total_time = recipes
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.total_time()));
        let combination_size = recipes.len();
        Self {
            recipes,
            total_time,
            combination_size,
            shape_label: shape_label.into(),
        }
    }

    pub fn deviation_from(&self, target_minutes: u32) -> u32 {
        self.total_time.abs_diff(target_minutes)
    }

    pub fn recipe_ids(&self) -> Vec<RecipeId> {
        self.recipes.iter().map(|r| r.id).collect()
    }
}

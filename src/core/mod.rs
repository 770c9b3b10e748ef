pub mod catalog;
pub mod matcher;
pub mod search;

pub use crate::domain::model::{Category, Difficulty, MatchResult, Recipe, RecipeId, UserId};
pub use crate::domain::ports::{CatalogProvider, SettingsProvider, Storage};
pub use crate::domain::shape::CombinationShape;
pub use crate::utils::error::Result;

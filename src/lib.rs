pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileCatalog, HttpCatalog, InMemoryCatalog, LocalStorage};
pub use config::{CatalogSource, TomlConfig};
pub use self::core::search::{MealSearchService, SearchOutcome, SearchRequest};
pub use self::core::{catalog::CatalogView, matcher::CombinationMatcher};
pub use domain::model::{Category, Difficulty, MatchResult, NewRecipe, Recipe, RecipeId, UserId};
pub use domain::shape::CombinationShape;
pub use utils::error::{MealError, Result};

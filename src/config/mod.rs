#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, RecipeArgs, RecipeCommand, SearchArgs};
pub use toml_config::{CatalogSource, TomlConfig};

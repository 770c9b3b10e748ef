use crate::app::report::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::core::{Category, Difficulty};
use crate::domain::model::NewRecipe;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "meal-matcher")]
#[command(about = "Find recipe combinations that fit a time budget")]
#[command(version)]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Local catalog file (.json or .csv), overrides the config file
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Remote catalog service base URL, overrides the config file
    #[arg(long, global = true, conflicts_with = "catalog")]
    pub endpoint: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 搜尋符合時間預算的食譜組合
    Search(SearchArgs),

    /// 列出常用的組合形狀
    Shapes,

    /// 管理本機目錄檔中的食譜
    #[command(subcommand)]
    Recipes(RecipeCommand),
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[arg(short, long)]
    pub user: String,

    /// Target total time in minutes
    #[arg(short, long, allow_negative_numbers = true)]
    pub target: i64,

    /// Window half-width in minutes (defaults to the configured tolerance)
    #[arg(long, allow_negative_numbers = true)]
    pub tolerance: Option<i64>,

    /// single_<Category>, <A>+<B> or <A>+<B>+<C>
    #[arg(short, long)]
    pub shape: String,

    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RecipeCommand {
    List {
        #[arg(short, long)]
        user: String,
    },
    Add {
        #[arg(short, long)]
        user: String,

        #[command(flatten)]
        recipe: RecipeArgs,
    },
    Update {
        #[arg(short, long)]
        user: String,

        #[arg(long)]
        id: u64,

        #[command(flatten)]
        recipe: RecipeArgs,
    },
    Remove {
        #[arg(short, long)]
        user: String,

        #[arg(long)]
        id: u64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct RecipeArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub category: Category,

    #[arg(long, default_value = "Easy")]
    pub difficulty: Difficulty,

    /// Preparation time in minutes
    #[arg(long)]
    pub prep: u32,

    /// Cooking time in minutes
    #[arg(long)]
    pub cook: u32,

    #[arg(long = "ingredient", value_delimiter = ',')]
    pub ingredients: Vec<String>,

    #[arg(long)]
    pub instructions: Option<String>,
}

impl From<RecipeArgs> for NewRecipe {
    fn from(args: RecipeArgs) -> Self {
        NewRecipe {
            name: args.name,
            category: args.category,
            difficulty: args.difficulty,
            prep_time: args.prep,
            cook_time: args.cook,
            ingredients: args.ingredients,
            instructions: args.instructions,
        }
    }
}

impl CliConfig {
    /// 讀取設定檔（若有）並套用命令列覆蓋
    pub fn load_settings(&self) -> crate::utils::error::Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(path) = &self.catalog {
            config.use_file_catalog(path.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.use_http_catalog(endpoint.clone());
        }
    }
}

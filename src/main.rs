use clap::Parser;
use meal_matcher::app::report;
use meal_matcher::config::{Command, RecipeCommand};
use meal_matcher::core::{CatalogProvider, SettingsProvider};
use meal_matcher::utils::error::ErrorSeverity;
use meal_matcher::utils::{logger, validation::Validate};
use meal_matcher::{
    CatalogSource, CliConfig, CombinationMatcher, FileCatalog, HttpCatalog, InMemoryCatalog,
    LocalStorage, MealError, MealSearchService, RecipeId, Result, SearchRequest, TomlConfig,
    UserId,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入設定並套用命令列覆蓋
    let config = match cli.load_settings() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let verbose = cli.verbose || config.verbose_logging();
    if cli.log_json || config.json_logging() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting meal-matcher");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &TomlConfig) -> Result<()> {
    match &cli.command {
        Command::Shapes => print!("{}", report::render_shapes()),
        Command::Search(args) => {
            let provider = build_provider(&config.catalog_source()?)?;
            let matcher = CombinationMatcher::with_max_results(config.max_results());
            let service = MealSearchService::with_matcher(provider, matcher);

            let tolerance = args
                .tolerance
                .unwrap_or_else(|| i64::from(config.default_tolerance()));
            let request = SearchRequest::new(UserId::new(&args.user), args.target, tolerance, &args.shape)
                .with_difficulty(args.difficulty);

            let outcome = service.search(&request).await?;
            print!("{}", report::render(&outcome, args.format)?);
        }
        Command::Recipes(command) => run_recipe_command(command, config).await?,
    }
    Ok(())
}

fn build_provider(source: &CatalogSource) -> Result<Box<dyn CatalogProvider>> {
    match source {
        CatalogSource::File { path } => {
            tracing::debug!("Using catalog file: {}", path);
            Ok(Box::new(FileCatalog::open_local(path)?))
        }
        CatalogSource::Http { endpoint, timeout } => {
            tracing::debug!("Using catalog service: {} (timeout {:?})", endpoint, timeout);
            Ok(Box::new(HttpCatalog::new(endpoint, *timeout)?))
        }
    }
}

async fn run_recipe_command(command: &RecipeCommand, config: &TomlConfig) -> Result<()> {
    let path = match config.catalog_source()? {
        CatalogSource::File { path } => path,
        CatalogSource::Http { .. } => {
            return Err(MealError::ConfigError {
                message: "recipe editing needs a local catalog file (use --catalog)".to_string(),
            })
        }
    };

    let file: FileCatalog<LocalStorage> = FileCatalog::open_local(&path)?;
    let store = InMemoryCatalog::with_recipes(file.load_or_empty().await?);

    match command {
        RecipeCommand::List { user } => {
            let recipes = store.list_recipes(&UserId::new(user)).await;
            print!("{}", report::render_recipes(&recipes));
        }
        RecipeCommand::Add { user, recipe } => {
            let added = store
                .add_recipe(&UserId::new(user), recipe.clone().into())
                .await?;
            file.save_all(&store.all_recipes().await).await?;
            println!(
                "✅ Added recipe #{} ({}, {} min)",
                added.id,
                added.name,
                added.total_time()
            );
        }
        RecipeCommand::Update { user, id, recipe } => {
            let updated = store
                .update_recipe(&UserId::new(user), RecipeId(*id), recipe.clone().into())
                .await?;
            file.save_all(&store.all_recipes().await).await?;
            println!(
                "✅ Updated recipe #{} ({}, {} min)",
                updated.id,
                updated.name,
                updated.total_time()
            );
        }
        RecipeCommand::Remove { user, id } => {
            let removed = store.delete_recipe(&UserId::new(user), RecipeId(*id)).await?;
            file.save_all(&store.all_recipes().await).await?;
            println!("🗑️ Removed recipe #{} ({})", removed.id, removed.name);
        }
    }
    Ok(())
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MealError {
    #[error("Recipe catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    #[error("Invalid shape '{shape}': {reason}")]
    InvalidShape { shape: String, reason: String },

    #[error("Invalid target: {reason} (target={target}, tolerance={tolerance})")]
    InvalidTarget {
        target: i64,
        tolerance: i64,
        reason: String,
    },

    #[error("Recipe {id} not found for user '{user_id}'")]
    RecipeNotFound { id: u64, user_id: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Catalog,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MealError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MealError::InvalidShape { .. }
            | MealError::InvalidTarget { .. }
            | MealError::RecipeNotFound { .. }
            | MealError::ValidationError { .. } => ErrorCategory::Input,
            MealError::CatalogUnavailable { .. }
            | MealError::ApiError(_)
            | MealError::CsvError(_)
            | MealError::SerializationError(_) => ErrorCategory::Catalog,
            MealError::ConfigError { .. }
            | MealError::ConfigValidationError { .. }
            | MealError::InvalidConfigValueError { .. }
            | MealError::MissingConfigError { .. } => ErrorCategory::Config,
            MealError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Catalog => ErrorSeverity::Medium,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 使用者修正輸入後即可重試
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MealError::CatalogUnavailable { .. } | MealError::ApiError(_) => {
                "Check that the recipe catalog is reachable and try again".to_string()
            }
            MealError::InvalidShape { .. } => {
                "Use single_<Category>, <A>+<B> or <A>+<B>+<C> with categories Main, Side, Appetizer, Snack, Dessert, Drink".to_string()
            }
            MealError::InvalidTarget { .. } => {
                "Use a target above 0 minutes and a tolerance of 0 minutes or more".to_string()
            }
            MealError::RecipeNotFound { .. } => {
                "List the user's recipes to find a valid recipe id".to_string()
            }
            MealError::CsvError(_) | MealError::SerializationError(_) => {
                "Check the catalog file format (JSON array or CSV with a header row)".to_string()
            }
            MealError::ConfigError { .. }
            | MealError::ConfigValidationError { .. }
            | MealError::InvalidConfigValueError { .. }
            | MealError::MissingConfigError { .. } => {
                "Review the configuration file and command line options".to_string()
            }
            MealError::ValidationError { .. } => "Correct the input and try again".to_string(),
            MealError::IoError(_) => "Check file permissions and available disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MealError::CatalogUnavailable { .. } => {
                "The recipe catalog could not be reached".to_string()
            }
            MealError::InvalidShape { shape, .. } => {
                format!("'{}' is not a recognised meal combination", shape)
            }
            MealError::InvalidTarget { reason, .. } => format!("Invalid time budget: {}", reason),
            MealError::RecipeNotFound { id, .. } => format!("Recipe {} does not exist", id),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MealError>;

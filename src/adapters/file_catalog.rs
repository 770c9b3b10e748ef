use crate::adapters::storage::LocalStorage;
use crate::core::{
    CatalogProvider, Category, Difficulty, Recipe, RecipeId, Result, Storage, UserId,
};
use crate::utils::error::MealError;
use crate::utils::validation::validate_catalog_extension;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

const INGREDIENT_SEPARATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        validate_catalog_extension("catalog.path", path)?;
        if path.to_ascii_lowercase().ends_with(".csv") {
            Ok(Self::Csv)
        } else {
            Ok(Self::Json)
        }
    }
}

/// CSV 的一列；ingredients 以分號串接
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecipeRow {
    id: u64,
    user_id: String,
    name: String,
    category: Category,
    difficulty: Difficulty,
    prep_time: u32,
    cook_time: u32,
    #[serde(default)]
    ingredients: String,
    #[serde(default)]
    instructions: Option<String>,
}

impl From<CsvRecipeRow> for Recipe {
    fn from(row: CsvRecipeRow) -> Self {
        Recipe {
            id: RecipeId(row.id),
            user_id: UserId(row.user_id),
            name: row.name,
            category: row.category,
            difficulty: row.difficulty,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            ingredients: row
                .ingredients
                .split(INGREDIENT_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            instructions: row.instructions.filter(|s| !s.trim().is_empty()),
        }
    }
}

impl From<&Recipe> for CsvRecipeRow {
    fn from(recipe: &Recipe) -> Self {
        CsvRecipeRow {
            id: recipe.id.0,
            user_id: recipe.user_id.0.clone(),
            name: recipe.name.clone(),
            category: recipe.category,
            difficulty: recipe.difficulty,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            ingredients: recipe
                .ingredients
                .join(&INGREDIENT_SEPARATOR.to_string()),
            instructions: recipe.instructions.clone(),
        }
    }
}

/// 以 JSON 或 CSV 檔案保存所有使用者的食譜
#[derive(Debug, Clone)]
pub struct FileCatalog<S: Storage> {
    storage: S,
    file_name: String,
    format: CatalogFormat,
}

impl<S: Storage> FileCatalog<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Result<Self> {
        let file_name = file_name.into();
        let format = CatalogFormat::from_path(&file_name)?;
        Ok(Self {
            storage,
            file_name,
            format,
        })
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 讀取整個目錄；檔案不存在或無法讀取時回報 CatalogUnavailable
    pub async fn load_all(&self) -> Result<Vec<Recipe>> {
        match self.read_raw().await? {
            Some(data) => self.decode(&data),
            None => Err(MealError::CatalogUnavailable {
                message: format!("catalog file '{}' not found", self.file_name),
            }),
        }
    }

    /// 檔案尚不存在時視為空目錄，供新增食譜使用
    pub async fn load_or_empty(&self) -> Result<Vec<Recipe>> {
        match self.read_raw().await? {
            Some(data) => self.decode(&data),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save_all(&self, recipes: &[Recipe]) -> Result<()> {
        let data = self.encode(recipes)?;
        tracing::debug!(
            "Writing {} recipe(s) ({} bytes) to {}",
            recipes.len(),
            data.len(),
            self.file_name
        );
        self.storage.write_file(&self.file_name, &data).await
    }

    async fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match self.storage.read_file(&self.file_name).await {
            Ok(data) => Ok(Some(data)),
            Err(MealError::IoError(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(MealError::IoError(e)) => Err(MealError::CatalogUnavailable {
                message: format!("cannot read '{}': {}", self.file_name, e),
            }),
            Err(e) => Err(e),
        }
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<Recipe>> {
        match self.format {
            CatalogFormat::Json => {
                if data.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Vec::new());
                }
                Ok(serde_json::from_slice(data)?)
            }
            CatalogFormat::Csv => {
                let mut reader = csv::Reader::from_reader(data);
                reader
                    .deserialize::<CsvRecipeRow>()
                    .map(|row| row.map(Recipe::from).map_err(MealError::from))
                    .collect()
            }
        }
    }

    fn encode(&self, recipes: &[Recipe]) -> Result<Vec<u8>> {
        match self.format {
            CatalogFormat::Json => Ok(serde_json::to_vec_pretty(recipes)?),
            CatalogFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                for recipe in recipes {
                    writer.serialize(CsvRecipeRow::from(recipe))?;
                }
                writer
                    .into_inner()
                    .map_err(|e| MealError::IoError(e.into_error()))
            }
        }
    }
}

impl FileCatalog<LocalStorage> {
    /// 以檔案所在目錄作為 LocalStorage 根目錄
    pub fn open_local(path: &str) -> Result<Self> {
        let full_path = Path::new(path);
        let base = full_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = full_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| MealError::InvalidConfigValueError {
                field: "catalog.path".to_string(),
                value: path.to_string(),
                reason: "Path does not name a file".to_string(),
            })?;

        Self::new(LocalStorage::new(base.to_string_lossy().into_owned()), file_name)
    }
}

#[async_trait]
impl<S: Storage> CatalogProvider for FileCatalog<S> {
    async fn fetch(&self, user_id: &UserId, difficulty: Option<Difficulty>) -> Result<Vec<Recipe>> {
        let recipes = self.load_all().await?;
        Ok(recipes
            .into_iter()
            .filter(|r| &r.user_id == user_id)
            .filter(|r| difficulty.map_or(true, |d| r.difficulty == d))
            .collect())
    }
}

use crate::domain::model::{Difficulty, Recipe, UserId};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 食譜來源：只回傳指定使用者的食譜，可選擇依難度過濾
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch(&self, user_id: &UserId, difficulty: Option<Difficulty>) -> Result<Vec<Recipe>>;
}

#[async_trait]
impl<T: CatalogProvider + ?Sized> CatalogProvider for Box<T> {
    async fn fetch(&self, user_id: &UserId, difficulty: Option<Difficulty>) -> Result<Vec<Recipe>> {
        (**self).fetch(user_id, difficulty).await
    }
}

pub trait SettingsProvider: Send + Sync {
    fn default_tolerance(&self) -> u32;
    fn max_results(&self) -> usize;
}

use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> AppResult<String>;
}

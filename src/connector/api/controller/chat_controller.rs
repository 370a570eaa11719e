use anyhow::Result;

use crate::domain::{ChatMode, ChatRequest};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, message: String, mode: ChatMode) -> Result<String> {
        let request = ChatRequest::new(message, mode);
        let use_case = self.container.chat_use_case();
        let response = use_case.execute(&request).await?;

        Ok(response.into_response())
    }
}

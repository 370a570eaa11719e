use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::ChatController;

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { message, mode } => self.chat_controller.ask(message, mode).await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}

mod chat;
mod prompt;
mod search_result;

pub use chat::*;
pub use prompt::*;
pub use search_result::*;

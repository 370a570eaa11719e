use clap::Subcommand;

use crate::domain::ChatMode;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "5000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Send a single message and print the reply
    Ask {
        message: String,

        /// `ai` for the model alone, `web` to ground the answer with search results
        #[arg(short, long, default_value = "ai")]
        mode: ChatMode,
    },
}

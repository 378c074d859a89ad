pub mod auth;
pub mod messenger;
pub mod runtime;

pub use auth::{build_http_client, fetch_application_id};
pub use messenger::DiscordMenuMessenger;
pub use runtime::{DiscordPlatform, DiscordSettings};

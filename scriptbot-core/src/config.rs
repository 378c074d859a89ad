// File: scriptbot-core/src/config.rs

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::Error;
use crate::platforms::discord::DiscordSettings;

pub const DEFAULT_DATA_FILE: &str = "scripts.json";
pub const DEFAULT_KEEPALIVE_ADDR: &str = "0.0.0.0:8080";
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

/// Runtime configuration, assembled by the server binary from CLI args and the
/// environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub data_file: PathBuf,
    /// `None` disables the liveness endpoint.
    pub keepalive_addr: Option<SocketAddr>,
    pub restart_notice: bool,
    pub keyword_reply: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            keepalive_addr: DEFAULT_KEEPALIVE_ADDR.parse().ok(),
            restart_notice: true,
            keyword_reply: true,
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.discord_token.trim().is_empty() {
            return Err(Error::Config(format!("{TOKEN_ENV_VAR} is not set")));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(Error::Config("data file path is empty".into()));
        }
        Ok(())
    }

    pub fn discord_settings(&self) -> DiscordSettings {
        DiscordSettings {
            restart_notice: self.restart_notice,
            keyword_reply: self.keyword_reply,
        }
    }
}

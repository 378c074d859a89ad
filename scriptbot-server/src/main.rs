use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use scriptbot_common::traits::platform_traits::PlatformIntegration;
use scriptbot_core::config::{BotConfig, DEFAULT_DATA_FILE, DEFAULT_KEEPALIVE_ADDR, TOKEN_ENV_VAR};
use scriptbot_core::http::start_keepalive_server;
use scriptbot_core::platforms::discord::{
    build_http_client, fetch_application_id, DiscordMenuMessenger, DiscordPlatform,
};
use scriptbot_core::services::discord::SlashContext;
use scriptbot_core::services::menu::{MenuRegistry, MenuRenderer, MenuSyncEngine};
use scriptbot_core::{JsonScriptStore, ScriptService};

#[derive(Parser, Debug, Clone)]
#[command(name = "scriptbot")]
#[command(author, version, about = "Script Bot - per-guild script menus for Discord")]
struct Args {
    /// JSON file holding every guild's scripts.
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Address for the keep-alive HTTP endpoint.
    #[arg(long, default_value = DEFAULT_KEEPALIVE_ADDR)]
    keepalive_addr: SocketAddr,

    /// Do not start the keep-alive HTTP endpoint.
    #[arg(long, default_value = "false")]
    no_keepalive: bool,

    /// Do not post the restart notice when the bot connects.
    #[arg(long, default_value = "false")]
    no_restart_notice: bool,

    /// Do not answer messages that mention scripts.
    #[arg(long, default_value = "false")]
    no_keyword_reply: bool,
}

impl Args {
    fn into_config(self, discord_token: String) -> BotConfig {
        BotConfig {
            discord_token,
            data_file: self.data_file,
            keepalive_addr: (!self.no_keepalive).then_some(self.keepalive_addr),
            restart_notice: !self.no_restart_notice,
            keyword_reply: !self.no_keyword_reply,
        }
    }
}

fn init_tracing() {
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("log bridge already installed: {e}");
    }
    let filter = EnvFilter::from_default_env()
        .add_directive("scriptbot=info".parse().unwrap_or_default())
        .add_directive("scriptbot_core=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let token = std::env::var(TOKEN_ENV_VAR).unwrap_or_default();
    let config = args.into_config(token);
    config.validate()?;

    // 1) Scripts are loaded before anything talks to Discord; a broken file stops startup.
    let store = match JsonScriptStore::load(&config.data_file).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Could not load {} => {e}", config.data_file.display());
            return Err(e.into());
        }
    };
    info!("Loaded scripts from {}", store.path().display());

    // 2) Discord REST client and the application it belongs to
    let http = build_http_client(&config.discord_token);
    let application_id = fetch_application_id(&http).await?;
    info!("Application ID = {application_id}");

    // 3) Menu engine + command surface
    let messenger = Arc::new(DiscordMenuMessenger::new(http.clone(), application_id));
    let engine = MenuSyncEngine::new(
        store.clone(),
        Arc::new(MenuRegistry::new()),
        MenuRenderer::default(),
        messenger,
    );
    let scripts = Arc::new(ScriptService::new(store, engine));
    let context = SlashContext {
        http,
        application_id,
        scripts,
    };

    // 4) Keep-alive endpoint
    let keepalive_shutdown = match config.keepalive_addr {
        Some(addr) => match start_keepalive_server(addr).await {
            Ok(tx) => Some(tx),
            Err(e) => {
                warn!("Keep-alive server not started on {addr} => {e}");
                None
            }
        },
        None => None,
    };

    // 5) Gateway
    let mut discord = DiscordPlatform::new(
        config.discord_token.clone(),
        context,
        config.discord_settings(),
    );
    discord.connect().await?;
    info!("Script Bot is running. Press Ctrl-C to stop.");

    // 6) Run until Ctrl-C
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {e}");
    }
    info!("Shutting down...");

    if discord.is_connected() {
        if let Err(e) = discord.disconnect().await {
            error!("Error disconnecting from Discord => {e}");
        }
    }
    if let Some(tx) = keepalive_shutdown {
        let _ = tx.send(());
    }

    info!("Main is shutting down.");
    Ok(())
}

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use twilight_cache_inmemory::{InMemoryCache, ResourceType};
use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    Shard,
    MessageSender,
    StreamExt,
};
use twilight_model::gateway::payload::incoming::Ready as ReadyPayload;

use crate::Error;
use crate::platforms::{ConnectionStatus, PlatformIntegration};
use crate::services::discord::keyword_reply::{keyword_reply_text, reply_to_keyword};
use crate::services::discord::ready::{broadcast_restart_notice, RESTART_NOTICE};
use crate::services::discord::slashcommands::{
    handle_interaction_create, register_global_slash_commands, SlashContext,
};

/// Optional behaviours of the gateway handler.
#[derive(Debug, Clone)]
pub struct DiscordSettings {
    /// Post the restart notice in every guild on READY.
    pub restart_notice: bool,
    /// Answer messages mentioning scripts with an invite. Needs MESSAGE_CONTENT.
    pub keyword_reply: bool,
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            restart_notice: true,
            keyword_reply: true,
        }
    }
}

impl DiscordSettings {
    pub fn intents(&self) -> Intents {
        let base = Intents::GUILDS | Intents::GUILD_MESSAGES;
        if self.keyword_reply {
            base | Intents::MESSAGE_CONTENT
        } else {
            base
        }
    }
}

/// Runs one shard:
///   - calls `shard.next_event(...)`
///   - updates the in-memory cache
///   - hands interactions and messages to their own tasks, so a slow
///     Discord round trip in one guild never stalls the others.
async fn shard_runner(
    mut shard: Shard,
    ctx: SlashContext,
    cache: Arc<InMemoryCache>,
    settings: DiscordSettings,
) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
                continue;
            }
        };
        cache.update(&event);

        match event {
            Event::Ready(ready) => {
                let data: &ReadyPayload = &ready;
                info!(
                    "Shard {shard_id} => READY as {} (ID={}) in {} guild(s)",
                    data.user.name,
                    data.user.id,
                    data.guilds.len()
                );

                if shard_id == 0 {
                    let http = ctx.http.clone();
                    let application_id = ctx.application_id;
                    tokio::spawn(async move {
                        if let Err(e) = register_global_slash_commands(&http, application_id).await {
                            error!("{e}");
                        }
                    });
                }

                if settings.restart_notice {
                    let guild_ids = data.guilds.iter().map(|g| g.id).collect();
                    tokio::spawn(broadcast_restart_notice(
                        ctx.http.clone(),
                        cache.clone(),
                        guild_ids,
                        RESTART_NOTICE,
                    ));
                }
            }
            Event::InteractionCreate(interaction) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_interaction_create(&ctx, &interaction).await {
                        error!("Error handling interaction {} => {e}", interaction.id);
                    }
                });
            }
            Event::MessageCreate(msg) => {
                if !settings.keyword_reply || msg.author.bot {
                    continue;
                }
                let http = ctx.http.clone();
                let reply = keyword_reply_text(ctx.application_id);
                tokio::spawn(async move {
                    reply_to_keyword(&http, &msg, &reply).await;
                });
            }
            other => {
                trace!("Shard {shard_id} => unhandled event: {:?}", other.kind());
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

pub struct DiscordPlatform {
    token: String,
    connection_status: ConnectionStatus,

    shard_tasks: Vec<JoinHandle<()>>,
    shard_senders: Vec<MessageSender>,

    context: SlashContext,
    settings: DiscordSettings,
}

impl DiscordPlatform {
    pub fn new(token: String, context: SlashContext, settings: DiscordSettings) -> Self {
        Self {
            token,
            connection_status: ConnectionStatus::Disconnected,
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
            context,
            settings,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection_status == ConnectionStatus::Connected
    }

    /// Waits until every shard's event loop has ended.
    async fn wait(&mut self) {
        for task in &mut self.shard_tasks {
            if let Err(e) = task.await {
                error!("(DiscordPlatform) shard task failed => {e}");
            }
        }
        self.shard_tasks.clear();
    }
}

#[async_trait]
impl PlatformIntegration for DiscordPlatform {
    async fn connect(&mut self) -> Result<(), Error> {
        if self.is_connected() {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }
        if self.token.trim().is_empty() {
            return Err(Error::Auth("Discord token is empty".into()));
        }

        // Channels are cached so the restart notice can skip a REST lookup.
        let cache = InMemoryCache::builder()
            .resource_types(ResourceType::GUILD | ResourceType::CHANNEL)
            .build();
        let cache = Arc::new(cache);

        let config = Config::new(self.token.clone(), self.settings.intents());

        let shards = gateway::create_recommended(&self.context.http, config, |_, b| b.build())
            .await
            .map_err(|e| Error::Platform(format!("create_recommended error: {e}")))?;

        for shard in shards {
            self.shard_senders.push(shard.sender());

            let ctx_for_shard = self.context.clone();
            let cache_for_shard = cache.clone();
            let settings_for_shard = self.settings.clone();

            let handle = tokio::spawn(async move {
                shard_runner(shard, ctx_for_shard, cache_for_shard, settings_for_shard).await;
            });
            self.shard_tasks.push(handle);
        }

        debug!("(DiscordPlatform) {} shard(s) running", self.shard_tasks.len());
        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        self.wait().await;
        self.shard_senders.clear();

        Ok(())
    }
}

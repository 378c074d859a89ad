use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use scriptbot_common::models::menu::{MenuLocation, MenuOrigin, MenuView, RefreshOutcome};
use scriptbot_common::traits::menu_traits::MenuMessenger;

use crate::Error;
use crate::repositories::JsonScriptStore;
use crate::services::menu::registry::MenuRegistry;
use crate::services::menu::renderer::MenuRenderer;

/// Keeps each guild's posted menu in line with the script store.
///
/// Per guild: no menu posted => menu posted => (refreshed | unreachable).
/// Unreachable menus stay tracked; only a new `show_menu` replaces them.
///
/// Posting and refreshing a guild's menu run one at a time per guild, and the
/// view is rendered only once the guild's turn comes, so the last message
/// write always carries the latest store contents.
pub struct MenuSyncEngine {
    store: Arc<JsonScriptStore>,
    registry: Arc<MenuRegistry>,
    renderer: MenuRenderer,
    messenger: Arc<dyn MenuMessenger>,
    guild_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl MenuSyncEngine {
    pub fn new(
        store: Arc<JsonScriptStore>,
        registry: Arc<MenuRegistry>,
        renderer: MenuRenderer,
        messenger: Arc<dyn MenuMessenger>,
    ) -> Self {
        Self {
            store,
            registry,
            renderer,
            messenger,
            guild_locks: DashMap::new(),
        }
    }

    fn guild_lock(&self, guild: &str) -> Arc<Mutex<()>> {
        self.guild_locks.entry(guild.to_string()).or_default().clone()
    }

    pub fn registry(&self) -> &Arc<MenuRegistry> {
        &self.registry
    }

    /// Renders the guild's current entries.
    pub async fn render(&self, guild: &str) -> MenuView {
        let entries = self.store.list_entries(guild).await;
        self.renderer.render(&entries)
    }

    /// Posts a new menu and starts tracking it, replacing any earlier one.
    pub async fn show_menu(&self, guild: &str, origin: &MenuOrigin) -> Result<MenuLocation, Error> {
        let lock = self.guild_lock(guild);
        let _turn = lock.lock().await;

        let view = self.render(guild).await;
        let location = self.messenger.post_menu(origin, &view).await?;

        info!(
            "(MenuSyncEngine) guild={guild} menu posted => channel={} message={} ({} option(s))",
            location.channel_id,
            location.message_id,
            view.options.len()
        );
        self.registry.record(guild, location.clone());
        Ok(location)
    }

    /// Pushes the current entries to the tracked menu, if there is one.
    /// Never fails: an unreachable message is logged and reported as such.
    pub async fn refresh(&self, guild: &str) -> RefreshOutcome {
        let lock = self.guild_lock(guild);
        let _turn = lock.lock().await;

        let Some(location) = self.registry.get(guild) else {
            debug!("(MenuSyncEngine) guild={guild} has no tracked menu => skipping refresh");
            return RefreshOutcome::NoMenuPosted;
        };

        let view = self.render(guild).await;
        match self.messenger.edit_menu(&location, &view).await {
            Ok(()) => {
                debug!(
                    "(MenuSyncEngine) guild={guild} refreshed message {}",
                    location.message_id
                );
                RefreshOutcome::Refreshed
            }
            Err(e) => {
                warn!(
                    "(MenuSyncEngine) guild={guild} menu message {} in channel {} (posted {}s ago) unreachable => {e}",
                    location.message_id,
                    location.channel_id,
                    location.age().num_seconds()
                );
                RefreshOutcome::Unreachable
            }
        }
    }

    /// Looks up the code behind a menu selection at the time it is made.
    pub async fn select(&self, guild: &str, name: &str) -> Result<String, Error> {
        self.store.get(guild, name).await
    }
}

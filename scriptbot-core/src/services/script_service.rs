// File: scriptbot-core/src/services/script_service.rs

use std::sync::Arc;

use tracing::info;

use scriptbot_common::models::menu::{MenuLocation, MenuOrigin, RefreshOutcome};

use crate::Error;
use crate::repositories::JsonScriptStore;
use crate::services::menu::MenuSyncEngine;

pub const HELP_TEXT: &str = "\
**Script Bot**
`/menu` - show the script menu in this channel
`/addscript <name> <description> <code>` - add a script (admin)
`/updatescript <name> <code> [description]` - replace a script's code, optionally its description (admin)
`/deletescript <name>` - delete a script (admin)
`/help` - show this message

Script code must start with `loadstring`. Pick a script from the menu to get its code.";

/// The bot's command surface. Every successful change to the store is followed
/// by a best-effort refresh of the guild's tracked menu.
pub struct ScriptService {
    store: Arc<JsonScriptStore>,
    menus: MenuSyncEngine,
}

impl ScriptService {
    pub fn new(store: Arc<JsonScriptStore>, menus: MenuSyncEngine) -> Self {
        Self { store, menus }
    }

    pub fn store(&self) -> &Arc<JsonScriptStore> {
        &self.store
    }

    pub fn menus(&self) -> &MenuSyncEngine {
        &self.menus
    }

    pub async fn show_menu(&self, guild: &str, origin: &MenuOrigin) -> Result<MenuLocation, Error> {
        self.menus.show_menu(guild, origin).await
    }

    /// Adds a script. The returned outcome is informational; the script is
    /// saved regardless of whether the menu could be updated.
    pub async fn add_entry(
        &self,
        guild: &str,
        name: &str,
        description: &str,
        code: &str,
    ) -> Result<RefreshOutcome, Error> {
        self.store.add(guild, name, code, description).await?;
        info!("(ScriptService) guild={guild} script '{name}' added");
        Ok(self.menus.refresh(guild).await)
    }

    pub async fn update_entry(
        &self,
        guild: &str,
        name: &str,
        code: &str,
        description: Option<&str>,
    ) -> Result<RefreshOutcome, Error> {
        self.store.update(guild, name, code, description).await?;
        info!("(ScriptService) guild={guild} script '{name}' updated");
        Ok(self.menus.refresh(guild).await)
    }

    pub async fn delete_entry(&self, guild: &str, name: &str) -> Result<RefreshOutcome, Error> {
        self.store.remove(guild, name).await?;
        info!("(ScriptService) guild={guild} script '{name}' deleted");
        Ok(self.menus.refresh(guild).await)
    }

    pub async fn select(&self, guild: &str, name: &str) -> Result<String, Error> {
        self.menus.select(guild, name).await
    }

    pub fn help(&self) -> &'static str {
        HELP_TEXT
    }
}

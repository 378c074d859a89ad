use async_trait::async_trait;

use crate::error::Error;
use crate::models::menu::{MenuLocation, MenuOrigin, MenuView};

/// Posts and edits menu messages on the chat platform.
#[async_trait]
pub trait MenuMessenger: Send + Sync {
    /// Posts a fresh menu in reply to `origin` and returns where it landed.
    async fn post_menu(&self, origin: &MenuOrigin, view: &MenuView) -> Result<MenuLocation, Error>;

    /// Replaces the content of an existing menu message in place.
    /// Fails with `Error::MenuUnreachable` if the message or channel is gone.
    async fn edit_menu(&self, location: &MenuLocation, view: &MenuView) -> Result<(), Error>;
}

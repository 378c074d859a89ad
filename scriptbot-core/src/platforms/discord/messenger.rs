use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::Client as HttpClient;
use twilight_model::http::interaction::{
    InteractionResponse, InteractionResponseData, InteractionResponseType,
};
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker, InteractionMarker, MessageMarker};
use twilight_model::id::Id;

use scriptbot_common::models::menu::{MenuLocation, MenuOrigin, MenuView};
use scriptbot_common::traits::menu_traits::MenuMessenger;

use crate::Error;
use crate::services::discord::menu_components::{menu_components, menu_embed};

/// Posts menus as interaction responses and edits them through the channel API.
pub struct DiscordMenuMessenger {
    http: Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
}

impl DiscordMenuMessenger {
    pub fn new(http: Arc<HttpClient>, application_id: Id<ApplicationMarker>) -> Self {
        Self { http, application_id }
    }
}

fn parse_id<T>(raw: &str, what: &str) -> Result<Id<T>, Error> {
    Id::<T>::from_str(raw).map_err(|_| Error::Parse(format!("Invalid {what} ID: {raw}")))
}

#[async_trait]
impl MenuMessenger for DiscordMenuMessenger {
    async fn post_menu(&self, origin: &MenuOrigin, view: &MenuView) -> Result<MenuLocation, Error> {
        let interaction_id: Id<InteractionMarker> = parse_id(&origin.interaction_id, "interaction")?;
        let embed = menu_embed(view)?;
        let components = menu_components(view);

        let client = self.http.interaction(self.application_id);
        client
            .create_response(
                interaction_id,
                &origin.interaction_token,
                &InteractionResponse {
                    kind: InteractionResponseType::ChannelMessageWithSource,
                    data: Some(InteractionResponseData {
                        embeds: Some(vec![embed]),
                        components: Some(components),
                        ..Default::default()
                    }),
                },
            )
            .await
            .map_err(|e| Error::Platform(format!("Error posting menu: {e}")))?;

        // The menu is already visible from here on; a failure only means it
        // cannot be tracked, and the interaction must not be answered again.
        let message = client
            .response(&origin.interaction_token)
            .await
            .map_err(|e| Error::Answered(format!("posted menu not tracked, fetch failed: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Answered(format!("posted menu not tracked, parse failed: {e}")))?;

        Ok(MenuLocation::new(origin.channel_id.clone(), message.id.to_string()))
    }

    async fn edit_menu(&self, location: &MenuLocation, view: &MenuView) -> Result<(), Error> {
        let channel_id: Id<ChannelMarker> = parse_id(&location.channel_id, "channel")?;
        let message_id: Id<MessageMarker> = parse_id(&location.message_id, "message")?;

        // Fetch first so a deleted message or lost channel access shows up as
        // unreachable rather than as a failed edit.
        self.http
            .message(channel_id, message_id)
            .await
            .map_err(|e| Error::MenuUnreachable(format!("fetch {message_id}: {e}")))?;

        let embeds = [menu_embed(view)?];
        let components = menu_components(view);
        self.http
            .update_message(channel_id, message_id)
            .embeds(Some(embeds.as_slice()))
            .components(Some(components.as_slice()))
            .await
            .map_err(|e| Error::MenuUnreachable(format!("edit {message_id}: {e}")))?;
        Ok(())
    }
}

// File: scriptbot-core/src/services/discord/slashcommands/menu.rs

use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::Interaction;
use twilight_util::builder::command::CommandBuilder;

use scriptbot_common::models::menu::MenuOrigin;

use crate::Error;
use super::{guild_of, SlashContext};

pub fn create_menu_command() -> Command {
    CommandBuilder::new(
        "menu",
        "Muestra el menú de scripts actualizado",
        CommandType::ChatInput,
    )
        .dm_permission(false)
        .build()
}

/// Posts the menu publicly in the invoking channel; this message becomes the
/// guild's tracked menu.
pub async fn handle_menu_interaction(
    ctx: &SlashContext,
    interaction: &Interaction,
) -> Result<(), Error> {
    let guild = guild_of(interaction)?;
    let channel_id = interaction
        .channel
        .as_ref()
        .map(|c| c.id.to_string())
        .ok_or_else(|| Error::Platform("interaction has no channel".into()))?;

    let origin = MenuOrigin {
        channel_id,
        interaction_id: interaction.id.to_string(),
        interaction_token: interaction.token.clone(),
    };
    ctx.scripts.show_menu(&guild, &origin).await?;
    Ok(())
}

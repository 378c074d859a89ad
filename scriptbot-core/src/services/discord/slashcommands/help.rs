// File: scriptbot-core/src/services/discord/slashcommands/help.rs

use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::Interaction;
use twilight_util::builder::command::CommandBuilder;

use crate::Error;
use super::{respond_ephemeral, SlashContext};

pub fn create_help_command() -> Command {
    CommandBuilder::new("help", "Lists the bot's commands", CommandType::ChatInput).build()
}

pub async fn handle_help_interaction(
    ctx: &SlashContext,
    interaction: &Interaction,
) -> Result<(), Error> {
    respond_ephemeral(ctx, interaction, ctx.scripts.help()).await
}

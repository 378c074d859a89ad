// File: scriptbot-core/src/services/discord/slashcommands/delete_script.rs

use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::application::interaction::Interaction;
use twilight_model::guild::Permissions;
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use crate::Error;
use super::{
    defer_ephemeral, edit_deferred, guild_of, mutation_reply, require_admin, required_string,
    SlashContext,
};

pub fn create_delete_script_command() -> Command {
    CommandBuilder::new("deletescript", "Elimina un script", CommandType::ChatInput)
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
        .option(StringBuilder::new("name", "Script to delete").required(true).max_length(100))
        .build()
}

pub async fn handle_delete_script_interaction(
    ctx: &SlashContext,
    interaction: &Interaction,
    cmd_data: &CommandData,
) -> Result<(), Error> {
    require_admin(interaction)?;
    let guild = guild_of(interaction)?;
    let name = required_string(&cmd_data.options, "name")?;

    defer_ephemeral(ctx, interaction).await?;
    let result = ctx.scripts.delete_entry(&guild, &name).await;
    let reply = mutation_reply(result, &format!("🗑️ Script `{name}` deleted."));
    edit_deferred(ctx, interaction, &reply).await
}

// File: scriptbot-core/src/services/discord/slashcommands/update_script.rs

use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::application::interaction::Interaction;
use twilight_model::guild::Permissions;
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use crate::Error;
use super::{
    defer_ephemeral, edit_deferred, guild_of, mutation_reply, require_admin, required_string,
    string_option, SlashContext,
};

pub fn create_update_script_command() -> Command {
    CommandBuilder::new("updatescript", "Actualiza un script existente", CommandType::ChatInput)
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
        .option(StringBuilder::new("name", "Script to update").required(true).max_length(100))
        .option(StringBuilder::new("code", "New code, must start with loadstring").required(true))
        .option(
            StringBuilder::new("description", "New description (keeps the old one if omitted)")
                .max_length(100),
        )
        .build()
}

pub async fn handle_update_script_interaction(
    ctx: &SlashContext,
    interaction: &Interaction,
    cmd_data: &CommandData,
) -> Result<(), Error> {
    require_admin(interaction)?;
    let guild = guild_of(interaction)?;
    let name = required_string(&cmd_data.options, "name")?;
    let code = required_string(&cmd_data.options, "code")?;
    let description = string_option(&cmd_data.options, "description");

    defer_ephemeral(ctx, interaction).await?;
    let result = ctx
        .scripts
        .update_entry(&guild, &name, &code, description.as_deref())
        .await;
    let reply = mutation_reply(result, &format!("✅ Script `{name}` updated."));
    edit_deferred(ctx, interaction, &reply).await
}

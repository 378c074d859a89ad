// File: scriptbot-core/src/services/discord/slashcommands/add_script.rs

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

pub fn create_add_script_command() -> Command {
    CommandBuilder::new("addscript", "Agrega un nuevo script", CommandType::ChatInput)
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
        .option(StringBuilder::new("name", "Script name").required(true).max_length(100))
        .option(
            StringBuilder::new("description", "Shown under the name in the menu")
                .required(true)
                .max_length(100),
        )
        .option(StringBuilder::new("code", "Script code, must start with loadstring").required(true))
        .build()
}

pub async fn handle_add_script_interaction(
    ctx: &SlashContext,
    interaction: &Interaction,
    cmd_data: &CommandData,
) -> Result<(), Error> {
    require_admin(interaction)?;
    let guild = guild_of(interaction)?;
    let name = required_string(&cmd_data.options, "name")?;
    let description = required_string(&cmd_data.options, "description")?;
    let code = required_string(&cmd_data.options, "code")?;

    defer_ephemeral(ctx, interaction).await?;
    let result = ctx.scripts.add_entry(&guild, &name, &description, &code).await;
    let reply = mutation_reply(result, &format!("✅ Script `{name}` added."));
    edit_deferred(ctx, interaction, &reply).await
}

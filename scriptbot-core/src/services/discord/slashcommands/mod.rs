// File: scriptbot-core/src/services/discord/slashcommands/mod.rs

pub mod add_script;
pub mod delete_script;
pub mod help;
pub mod menu;
pub mod select;
pub mod update_script;

use std::sync::Arc;

use tracing::{debug, trace, warn};
use twilight_http::Client as HttpClient;
use twilight_model::{
    application::interaction::{
        application_command::{CommandData, CommandDataOption, CommandOptionValue},
        Interaction, InteractionData,
    },
    channel::message::MessageFlags,
    guild::Permissions,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::marker::ApplicationMarker,
    id::Id,
};

use scriptbot_common::models::menu::RefreshOutcome;

use crate::Error;
use crate::services::discord::menu_components::MENU_CUSTOM_ID;
use crate::services::script_service::ScriptService;

/// Everything an interaction handler needs.
#[derive(Clone)]
pub struct SlashContext {
    pub http: Arc<HttpClient>,
    pub application_id: Id<ApplicationMarker>,
    pub scripts: Arc<ScriptService>,
}

pub async fn register_global_slash_commands(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
) -> Result<(), Error> {
    let commands = [
        menu::create_menu_command(),
        add_script::create_add_script_command(),
        update_script::create_update_script_command(),
        delete_script::create_delete_script_command(),
        help::create_help_command(),
    ];

    http.interaction(application_id)
        .set_global_commands(&commands)
        .await
        .map_err(|e| Error::Platform(format!("Failed to register global slash commands: {e}")))?;

    debug!("Registered {} global slash commands", commands.len());
    Ok(())
}

/// Dispatches slash commands and menu selections. Failures are reported to the
/// invoking user only.
pub async fn handle_interaction_create(
    ctx: &SlashContext,
    interaction: &Interaction,
) -> Result<(), Error> {
    let result = match &interaction.data {
        Some(InteractionData::ApplicationCommand(cmd_data)) => {
            dispatch_command(ctx, interaction, cmd_data).await
        }
        Some(InteractionData::MessageComponent(data)) if data.custom_id == MENU_CUSTOM_ID => {
            select::handle_select_interaction(ctx, interaction, data).await
        }
        _ => {
            trace!("Ignoring interaction {} of kind {:?}", interaction.id, interaction.kind);
            return Ok(());
        }
    };

    if let Err(e) = result {
        warn!("Interaction {} failed => {e}", interaction.id);
        if e.needs_reply() {
            respond_ephemeral(ctx, interaction, &e.user_message()).await?;
        }
    }
    Ok(())
}

async fn dispatch_command(
    ctx: &SlashContext,
    interaction: &Interaction,
    cmd_data: &CommandData,
) -> Result<(), Error> {
    match cmd_data.name.as_str() {
        "menu" => menu::handle_menu_interaction(ctx, interaction).await,
        "addscript" => add_script::handle_add_script_interaction(ctx, interaction, cmd_data).await,
        "updatescript" => {
            update_script::handle_update_script_interaction(ctx, interaction, cmd_data).await
        }
        "deletescript" => {
            delete_script::handle_delete_script_interaction(ctx, interaction, cmd_data).await
        }
        "help" => help::handle_help_interaction(ctx, interaction).await,
        other => respond_ephemeral(ctx, interaction, &format!("Unrecognized command: {other}")).await,
    }
}

pub(crate) async fn respond_ephemeral(
    ctx: &SlashContext,
    interaction: &Interaction,
    content: &str,
) -> Result<(), Error> {
    respond(
        ctx,
        interaction,
        InteractionResponseData {
            content: Some(content.to_string()),
            flags: Some(MessageFlags::EPHEMERAL),
            ..Default::default()
        },
    )
    .await
}

pub(crate) async fn respond(
    ctx: &SlashContext,
    interaction: &Interaction,
    data: InteractionResponseData,
) -> Result<(), Error> {
    create_response(
        ctx,
        interaction,
        &InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data),
        },
    )
    .await
}

async fn create_response(
    ctx: &SlashContext,
    interaction: &Interaction,
    response: &InteractionResponse,
) -> Result<(), Error> {
    ctx.http
        .interaction(ctx.application_id)
        .create_response(interaction.id, &interaction.token, response)
        .await
        .map_err(|e| Error::Platform(format!("Error responding to interaction: {e}")))?;
    Ok(())
}

/// "Thinking..." placeholder visible only to the invoker.
pub(crate) fn deferred_ephemeral() -> InteractionResponse {
    InteractionResponse {
        kind: InteractionResponseType::DeferredChannelMessageWithSource,
        data: Some(InteractionResponseData {
            flags: Some(MessageFlags::EPHEMERAL),
            ..Default::default()
        }),
    }
}

/// Acknowledges the interaction right away; the actual reply is sent later
/// with `edit_deferred`.
pub(crate) async fn defer_ephemeral(ctx: &SlashContext, interaction: &Interaction) -> Result<(), Error> {
    create_response(ctx, interaction, &deferred_ephemeral()).await
}

pub(crate) async fn edit_deferred(
    ctx: &SlashContext,
    interaction: &Interaction,
    content: &str,
) -> Result<(), Error> {
    ctx.http
        .interaction(ctx.application_id)
        .update_response(&interaction.token)
        .content(Some(content))
        .await
        .map_err(|e| Error::Answered(format!("Error editing deferred reply: {e}")))?;
    Ok(())
}

/// Text for the deferred reply to an admin change.
pub(crate) fn mutation_reply(result: Result<RefreshOutcome, Error>, done: &str) -> String {
    match result {
        Ok(outcome) => format!("{done}{}", refresh_note(outcome)),
        Err(e) => {
            warn!("Script change failed => {e}");
            e.user_message()
        }
    }
}

pub(crate) fn guild_of(interaction: &Interaction) -> Result<String, Error> {
    interaction
        .guild_id
        .map(|id| id.to_string())
        .ok_or_else(|| Error::Platform("this command only works inside a server".into()))
}

/// Admin commands are also gated by `default_member_permissions`; this is the
/// check against the permissions Discord resolved for the invoking member.
pub(crate) fn require_admin(interaction: &Interaction) -> Result<(), Error> {
    let permissions = interaction.member.as_ref().and_then(|m| m.permissions);
    if is_admin(permissions) {
        Ok(())
    } else {
        Err(Error::Auth(format!(
            "user {:?} lacks ADMINISTRATOR",
            interaction.author_id()
        )))
    }
}

pub(crate) fn is_admin(permissions: Option<Permissions>) -> bool {
    permissions.is_some_and(|p| p.contains(Permissions::ADMINISTRATOR))
}

/// Trailer for admin replies describing what happened to the posted menu.
fn refresh_note(outcome: RefreshOutcome) -> &'static str {
    match outcome {
        RefreshOutcome::Refreshed => " The menu was updated.",
        RefreshOutcome::NoMenuPosted => " Use `/menu` to show the menu.",
        RefreshOutcome::Unreachable => " The last menu could not be updated, use `/menu` again.",
    }
}

pub(crate) fn string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
        CommandOptionValue::String(s) => Some(s.clone()),
        _ => None,
    })
}

pub(crate) fn required_string(options: &[CommandDataOption], name: &str) -> Result<String, Error> {
    string_option(options, name).ok_or_else(|| Error::Parse(format!("missing option '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(name: &str, value: CommandOptionValue) -> CommandDataOption {
        CommandDataOption {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn only_administrators_pass() {
        assert!(is_admin(Some(Permissions::ADMINISTRATOR)));
        assert!(is_admin(Some(Permissions::ADMINISTRATOR | Permissions::SEND_MESSAGES)));
        assert!(!is_admin(Some(Permissions::MANAGE_GUILD)));
        assert!(!is_admin(None));
    }

    #[test]
    fn admin_changes_are_deferred_privately() {
        let response = deferred_ephemeral();
        assert_eq!(response.kind, InteractionResponseType::DeferredChannelMessageWithSource);
        let flags = response.data.and_then(|d| d.flags);
        assert_eq!(flags, Some(MessageFlags::EPHEMERAL));
    }

    #[test]
    fn mutation_reply_reports_outcome_or_error() {
        let ok = mutation_reply(Ok(RefreshOutcome::Refreshed), "✅ done.");
        assert_eq!(ok, "✅ done. The menu was updated.");

        let err = mutation_reply(Err(Error::NotFound("ghost".into())), "✅ done.");
        assert_eq!(err, "Script `ghost` not found.");
    }

    #[test]
    fn string_options_by_name() {
        let options = vec![
            opt("name", CommandOptionValue::String("hello".into())),
            opt("count", CommandOptionValue::Integer(3)),
        ];
        assert_eq!(string_option(&options, "name").as_deref(), Some("hello"));
        assert_eq!(string_option(&options, "count"), None);
        assert!(matches!(required_string(&options, "code"), Err(Error::Parse(_))));
    }
}

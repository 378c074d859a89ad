// File: scriptbot-core/src/services/discord/slashcommands/select.rs

use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::application::interaction::Interaction;
use twilight_model::channel::message::MessageFlags;
use twilight_model::http::attachment::Attachment;
use twilight_model::http::interaction::InteractionResponseData;

use crate::Error;
use super::{guild_of, respond, SlashContext};

/// Discord's message content limit, minus room for the code fence.
const MAX_INLINE_CODE: usize = 1990;
const FENCE: &str = "```";

/// A selection always reads the script's code as it is now, so an old menu
/// still hands out the latest version.
pub async fn handle_select_interaction(
    ctx: &SlashContext,
    interaction: &Interaction,
    data: &MessageComponentInteractionData,
) -> Result<(), Error> {
    let guild = guild_of(interaction)?;
    let name = data
        .values
        .first()
        .ok_or_else(|| Error::Parse("empty menu selection".into()))?;

    let code = ctx.scripts.select(&guild, name).await?;
    respond(ctx, interaction, code_response(name, &code)).await
}

/// Short code goes inline in a code block. Anything longer, or anything that
/// would close the fence itself, is attached as a file.
pub(crate) fn code_response(name: &str, code: &str) -> InteractionResponseData {
    if code.chars().count() <= MAX_INLINE_CODE && !code.contains(FENCE) {
        InteractionResponseData {
            content: Some(format!("{FENCE}{code}{FENCE}")),
            flags: Some(MessageFlags::EPHEMERAL),
            ..Default::default()
        }
    } else {
        let file = Attachment::from_bytes(format!("{name}.lua"), code.as_bytes().to_vec(), 0);
        InteractionResponseData {
            content: Some(format!("`{name}`")),
            attachments: Some(vec![file]),
            flags: Some(MessageFlags::EPHEMERAL),
            ..Default::default()
        }
    }
}

// File: scriptbot-core/src/services/discord/keyword_reply.rs

use twilight_http::Client as HttpClient;
use twilight_model::channel::Message;
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;
use tracing::{debug, warn};

const KEYWORD: &str = "script";

/// True when the text mentions "script" or "scripts" in any casing.
pub fn mentions_scripts(text: &str) -> bool {
    text.to_lowercase().contains(KEYWORD)
}

pub fn invite_url(application_id: Id<ApplicationMarker>) -> String {
    format!(
        "https://discord.com/oauth2/authorize?client_id={application_id}&permissions=0&integration_type=0&scope=bot"
    )
}

pub fn keyword_reply_text(application_id: Id<ApplicationMarker>) -> String {
    format!(
        "Hola, soy Nova el mejor bot de scripts para administrar scripts en tu servidor de forma facil y rapida \
[Click Para Invitarlo a tu servidor]({})",
        invite_url(application_id)
    )
}

/// Replies to a user message that talks about scripts.
pub async fn reply_to_keyword(http: &HttpClient, msg: &Message, reply: &str) {
    if msg.author.bot || !mentions_scripts(&msg.content) {
        return;
    }
    match http.create_message(msg.channel_id).content(reply).reply(msg.id).await {
        Ok(_) => debug!("Keyword reply sent in channel {}", msg.channel_id),
        Err(e) => warn!("Error sending keyword reply in channel {} => {e}", msg.channel_id),
    }
}

// File: scriptbot-core/src/services/discord/ready.rs

use std::sync::Arc;

use tracing::{debug, info, warn};
use twilight_cache_inmemory::InMemoryCache;
use twilight_http::Client as HttpClient;
use twilight_model::channel::{Channel, ChannelType};
use twilight_model::id::marker::GuildMarker;
use twilight_model::id::Id;

pub const RESTART_NOTICE: &str = "🤖 El Bot Acaba de ser reiniciado, por favor usa /menu de nuevo \
de lo contrario el menu actual solo dará error y no dará los scripts 🤖";

/// Tells every guild the bot restarted. Menus posted before the restart are no
/// longer tracked, so admins have to run `/menu` again.
///
/// Best effort: per guild, the notice goes to the first text channel (by
/// position) that accepts it.
pub async fn broadcast_restart_notice(
    http: Arc<HttpClient>,
    cache: Arc<InMemoryCache>,
    guild_ids: Vec<Id<GuildMarker>>,
    notice: &str,
) {
    let mut delivered = 0usize;
    for guild_id in &guild_ids {
        if notify_guild(&http, &cache, *guild_id, notice).await {
            delivered += 1;
        }
    }
    info!(
        "Restart notice delivered to {delivered}/{} guild(s)",
        guild_ids.len()
    );
}

async fn notify_guild(
    http: &HttpClient,
    cache: &InMemoryCache,
    guild_id: Id<GuildMarker>,
    notice: &str,
) -> bool {
    let channels = match cached_channels(cache, guild_id) {
        Some(channels) => channels,
        None => match fetch_channels(http, guild_id).await {
            Some(channels) => channels,
            None => return false,
        },
    };

    for channel in text_channels_by_position(channels) {
        match http.create_message(channel.id).content(notice).await {
            Ok(_) => {
                debug!("guild={guild_id} restart notice sent to channel {}", channel.id);
                return true;
            }
            Err(e) => {
                debug!("guild={guild_id} channel {} refused restart notice => {e}", channel.id);
            }
        }
    }
    false
}

/// Channels already seen on the gateway. `None` when the guild is not cached yet.
fn cached_channels(cache: &InMemoryCache, guild_id: Id<GuildMarker>) -> Option<Vec<Channel>> {
    let ids = cache.guild_channels(guild_id)?;
    let channels: Vec<Channel> = ids
        .iter()
        .filter_map(|id| cache.channel(*id).map(|c| c.value().clone()))
        .collect();
    (!channels.is_empty()).then_some(channels)
}

async fn fetch_channels(http: &HttpClient, guild_id: Id<GuildMarker>) -> Option<Vec<Channel>> {
    match http.guild_channels(guild_id).await {
        Ok(resp) => match resp.models().await {
            Ok(channels) => Some(channels),
            Err(e) => {
                warn!("guild={guild_id} error parsing channels => {e:?}");
                None
            }
        },
        Err(e) => {
            warn!("guild={guild_id} error fetching channels => {e:?}");
            None
        }
    }
}

pub(crate) fn text_channels_by_position(channels: Vec<Channel>) -> Vec<Channel> {
    let mut text: Vec<Channel> = channels
        .into_iter()
        .filter(|c| c.kind == ChannelType::GuildText)
        .collect();
    text.sort_by_key(|c| (c.position.unwrap_or(i32::MAX), c.id));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use twilight_model::id::marker::ChannelMarker;

    fn channel(id: u64, kind: ChannelType, position: Option<i32>) -> Channel {
        let mut channel: Channel = serde_json::from_value(serde_json::json!({
            "id": id.to_string(),
            "type": 0,
        }))
        .unwrap();
        channel.kind = kind;
        channel.position = position;
        channel
    }

    #[test]
    fn text_channels_sorted_by_position() {
        let channels = vec![
            channel(3, ChannelType::GuildText, Some(2)),
            channel(1, ChannelType::GuildVoice, Some(0)),
            channel(2, ChannelType::GuildText, Some(1)),
            channel(4, ChannelType::GuildText, None),
        ];
        let ids: Vec<Id<ChannelMarker>> = text_channels_by_position(channels)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![Id::new(2), Id::new(3), Id::new(4)]);
    }

    #[test]
    fn empty_cache_falls_back() {
        let cache = InMemoryCache::new();
        assert!(cached_channels(&cache, Id::new(1)).is_none());
    }
}

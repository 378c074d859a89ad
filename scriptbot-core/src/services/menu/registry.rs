use dashmap::DashMap;
use tracing::debug;

use scriptbot_common::models::menu::MenuLocation;

/// Process-local record of each guild's most recently posted menu.
///
/// Never persisted: after a restart every guild starts without a tracked menu.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    locations: DashMap<String, MenuLocation>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `location` for `guild`, returning the location it replaced.
    /// The replaced message is left as it is and no longer updated.
    pub fn record(&self, guild: &str, location: MenuLocation) -> Option<MenuLocation> {
        let previous = self.locations.insert(guild.to_string(), location);
        if let Some(prev) = &previous {
            debug!(
                "(MenuRegistry) guild={guild} dropped tracking of message {} in channel {}",
                prev.message_id, prev.channel_id
            );
        }
        previous
    }

    pub fn get(&self, guild: &str) -> Option<MenuLocation> {
        self.locations.get(guild).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_overwrites_previous_location() {
        let registry = MenuRegistry::new();
        assert!(registry.record("g1", MenuLocation::new("10", "100")).is_none());

        let prev = registry.record("g1", MenuLocation::new("11", "110"));
        assert_eq!(prev.map(|l| l.message_id), Some("100".to_string()));

        let current = registry.get("g1").unwrap();
        assert_eq!(current.channel_id, "11");
        assert_eq!(current.message_id, "110");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn guilds_are_tracked_independently() {
        let registry = MenuRegistry::new();
        assert!(registry.is_empty());
        registry.record("g1", MenuLocation::new("10", "100"));
        registry.record("g2", MenuLocation::new("20", "200"));
        assert!(registry.get("g3").is_none());

        assert_eq!(registry.get("g1").unwrap().channel_id, "10");
        assert_eq!(registry.get("g2").unwrap().channel_id, "20");
        assert_eq!(registry.len(), 2);
    }
}

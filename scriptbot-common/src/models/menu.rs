use chrono::{DateTime, TimeDelta, Utc};

/// Where a guild's live menu message was posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLocation {
    pub channel_id: String,
    pub message_id: String,
    pub posted_at: DateTime<Utc>,
}

impl MenuLocation {
    pub fn new(channel_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
            posted_at: Utc::now(),
        }
    }

    /// How long the menu has been up as of `now`.
    pub fn age_at(&self, now: DateTime<Utc>) -> TimeDelta {
        now.signed_duration_since(self.posted_at)
    }

    pub fn age(&self) -> TimeDelta {
        self.age_at(Utc::now())
    }
}

/// The interaction a new menu is posted in response to.
#[derive(Debug, Clone)]
pub struct MenuOrigin {
    pub channel_id: String,
    pub interaction_id: String,
    pub interaction_token: String,
}

/// A custom guild emoji shown next to a menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuIcon {
    pub name: &'static str,
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub description: String,
    /// Script name; resolved against the store again when selected.
    pub value: String,
    pub icon: MenuIcon,
}

/// Rendered menu. Always derived from the store, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub footer: String,
    pub color: u32,
    pub placeholder: String,
    pub options: Vec<MenuOption>,
}

impl MenuView {
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }
}

/// Result of pushing the current store contents to a guild's tracked menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No menu has been shown for this guild since startup.
    NoMenuPosted,
    Refreshed,
    /// The tracked message could not be fetched or edited. The location is kept.
    Unreachable,
}

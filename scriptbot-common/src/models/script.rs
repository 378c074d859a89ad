use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Discord guild (server) ID as a string.
pub type GuildId = String;

/// Every script's code must begin with this token once surrounding whitespace is trimmed.
pub const LOADER_PREFIX: &str = "loadstring";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    pub name: String,
    pub code: String,
    pub description: String,
}

/// One guild's scripts, as stored on disk.
///
/// `scripts` and `descriptions` always share the same key set; both maps keep
/// insertion order, which is also the order the menu lists entries in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildScripts {
    #[serde(default)]
    pub scripts: IndexMap<String, String>,
    #[serde(default)]
    pub descriptions: IndexMap<String, String>,
}

impl GuildScripts {
    pub fn contains(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    pub fn insert(&mut self, entry: ScriptEntry) {
        self.scripts.insert(entry.name.clone(), entry.code);
        self.descriptions.insert(entry.name, entry.description);
    }

    /// Removes code and description together. Returns false if the name was unknown.
    pub fn remove(&mut self, name: &str) -> bool {
        let had_code = self.scripts.shift_remove(name).is_some();
        let had_desc = self.descriptions.shift_remove(name).is_some();
        had_code || had_desc
    }

    /// `(name, description)` pairs in description order.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.descriptions
            .iter()
            .map(|(name, desc)| (name.clone(), desc.clone()))
            .collect()
    }

    pub fn is_consistent(&self) -> bool {
        self.scripts.len() == self.descriptions.len()
            && self.scripts.keys().all(|k| self.descriptions.contains_key(k))
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

/// The whole data file: guild ID => that guild's scripts.
pub type ScriptDocument = IndexMap<GuildId, GuildScripts>;

pub fn has_loader_prefix(code: &str) -> bool {
    code.trim().starts_with(LOADER_PREFIX)
}

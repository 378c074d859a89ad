// File: scriptbot-core/src/repositories/json/scripts.rs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use scriptbot_common::models::script::{
    has_loader_prefix, GuildScripts, ScriptDocument, ScriptEntry, LOADER_PREFIX,
};

use crate::Error;

/// Per-guild script registry backed by a single JSON file.
///
/// Every mutation stages the change on a copy of the document, rewrites the
/// whole file (temp file + rename), and only then swaps the copy in. The lock
/// is held for the entire read-modify-persist sequence, so concurrent
/// mutations on any guild are serialized.
pub struct JsonScriptStore {
    path: PathBuf,
    document: Mutex<ScriptDocument>,
}

impl JsonScriptStore {
    /// Loads the store from `path`, creating an empty file if none exists.
    ///
    /// A file that exists but does not parse is an error; nothing is discarded.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();

        let document = match fs::read_to_string(&path).await {
            Ok(raw) => {
                let doc: ScriptDocument = serde_json::from_str(&raw)?;
                if let Some((guild, _)) = doc.iter().find(|(_, g)| !g.is_consistent()) {
                    return Err(Error::Parse(format!(
                        "{}: guild {guild} has mismatched scripts/descriptions",
                        path.display()
                    )));
                }
                info!(
                    "(JsonScriptStore) Loaded {} guild(s) from {}",
                    doc.len(),
                    path.display()
                );
                doc
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("(JsonScriptStore) {} not found => creating empty store", path.display());
                let doc = ScriptDocument::new();
                write_document(&path, &doc).await?;
                doc
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn add(
        &self,
        guild: &str,
        name: &str,
        code: &str,
        description: &str,
    ) -> Result<(), Error> {
        if name.trim().is_empty() {
            return Err(Error::InvalidName(name.to_string()));
        }
        self.mutate(guild, |scripts| {
            if scripts.contains(name) {
                return Err(Error::DuplicateName(name.to_string()));
            }
            check_code(code)?;
            scripts.insert(ScriptEntry {
                name: name.to_string(),
                code: code.to_string(),
                description: description.to_string(),
            });
            Ok(())
        })
        .await?;

        debug!("(JsonScriptStore) guild={guild} added '{name}'");
        Ok(())
    }

    /// Replaces the code of an existing entry. The description is only replaced
    /// when a non-empty one is given.
    pub async fn update(
        &self,
        guild: &str,
        name: &str,
        code: &str,
        description: Option<&str>,
    ) -> Result<(), Error> {
        self.mutate(guild, |scripts| {
            if !scripts.contains(name) {
                return Err(Error::NotFound(name.to_string()));
            }
            check_code(code)?;
            scripts.scripts.insert(name.to_string(), code.to_string());
            if let Some(desc) = description.filter(|d| !d.is_empty()) {
                scripts.descriptions.insert(name.to_string(), desc.to_string());
            }
            Ok(())
        })
        .await?;

        debug!("(JsonScriptStore) guild={guild} updated '{name}'");
        Ok(())
    }

    pub async fn remove(&self, guild: &str, name: &str) -> Result<(), Error> {
        self.mutate(guild, |scripts| {
            if scripts.remove(name) {
                Ok(())
            } else {
                Err(Error::NotFound(name.to_string()))
            }
        })
        .await?;

        debug!("(JsonScriptStore) guild={guild} removed '{name}'");
        Ok(())
    }

    pub async fn get(&self, guild: &str, name: &str) -> Result<String, Error> {
        let doc = self.document.lock().await;
        doc.get(guild)
            .and_then(|g| g.scripts.get(name))
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub async fn description(&self, guild: &str, name: &str) -> Result<String, Error> {
        let doc = self.document.lock().await;
        doc.get(guild)
            .and_then(|g| g.descriptions.get(name))
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// `(name, description)` pairs in insertion order. Unknown guild => empty.
    pub async fn list_entries(&self, guild: &str) -> Vec<(String, String)> {
        let doc = self.document.lock().await;
        doc.get(guild).map(GuildScripts::entries).unwrap_or_default()
    }

    /// A copy of the whole in-memory document.
    pub async fn snapshot(&self) -> ScriptDocument {
        self.document.lock().await.clone()
    }

    async fn mutate<F>(&self, guild: &str, apply: F) -> Result<(), Error>
    where
        F: FnOnce(&mut GuildScripts) -> Result<(), Error>,
    {
        let mut doc = self.document.lock().await;

        let mut staged = doc.get(guild).cloned().unwrap_or_default();
        apply(&mut staged)?;

        let mut next = doc.clone();
        next.insert(guild.to_string(), staged);

        if let Err(e) = write_document(&self.path, &next).await {
            error!("(JsonScriptStore) write to {} failed => {e}", self.path.display());
            return Err(e);
        }

        *doc = next;
        Ok(())
    }
}

fn check_code(code: &str) -> Result<(), Error> {
    if has_loader_prefix(code) {
        Ok(())
    } else {
        Err(Error::InvalidCode(format!("code must start with `{LOADER_PREFIX}`")))
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "scripts.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes the full document next to `path` and renames it into place, so a
/// half-written file is never visible under the real name.
async fn write_document(path: &Path, doc: &ScriptDocument) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(doc)?;
    let tmp = temp_path_for(path);

    let persist = async {
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, path).await
    };

    persist.await.map_err(|e: std::io::Error| {
        Error::Persistence(format!("{}: {e}", path.display()))
    })
}

use std::{collections::HashMap, fs, path::PathBuf, sync::Mutex};

use crate::{domain::ChatId, Result};

/// Persistent chat-id -> rules-text mapping.
///
/// Created on first set, updated on subsequent sets, never implicitly
/// expired. Backed by a JSON file rewritten on every set, so rules survive
/// restarts.
#[derive(Debug)]
pub struct RulesStore {
    path: PathBuf,
    inner: Mutex<HashMap<i64, String>>,
}

impl RulesStore {
    /// Load the store from `path`. A missing file means no rules are set yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let map = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            inner: Mutex::new(map),
        })
    }

    pub fn set(&self, chat: ChatId, rules: String) -> Result<()> {
        let mut map = self.inner.lock().expect("rules store poisoned");
        map.insert(chat.0, rules);
        self.save(&map)
    }

    pub fn get(&self, chat: ChatId) -> Option<String> {
        let map = self.inner.lock().expect("rules store poisoned");
        map.get(&chat.0).cloned()
    }

    fn save(&self, map: &HashMap<i64, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_file(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
    }

    #[test]
    fn get_before_set_is_none() {
        let store = RulesStore::load(tmp_file("ghb-rules")).unwrap();
        assert_eq!(store.get(ChatId(1)), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = RulesStore::load(tmp_file("ghb-rules")).unwrap();
        store.set(ChatId(1), "foo bar".to_string()).unwrap();
        assert_eq!(store.get(ChatId(1)).as_deref(), Some("foo bar"));
        assert_eq!(store.get(ChatId(2)), None);
    }

    #[test]
    fn later_set_overwrites() {
        let store = RulesStore::load(tmp_file("ghb-rules")).unwrap();
        store.set(ChatId(1), "first".to_string()).unwrap();
        store.set(ChatId(1), "second".to_string()).unwrap();
        assert_eq!(store.get(ChatId(1)).as_deref(), Some("second"));
    }

    // A store rebuilt from scratch for every handled update remembers
    // nothing: rules set while handling one event are already gone by the
    // next. The shared file-backed store exists to rule that failure mode
    // out, so /setrules outlives the event that set it.
    #[test]
    fn store_rebuilt_without_its_file_forgets_everything() {
        let first = RulesStore::load(tmp_file("ghb-rules-a")).unwrap();
        first.set(ChatId(1), "be kind".to_string()).unwrap();

        let second = RulesStore::load(tmp_file("ghb-rules-b")).unwrap();
        assert_eq!(second.get(ChatId(1)), None);
    }

    // Rules must survive a process restart: a fresh store sees what the
    // previous one wrote.
    #[test]
    fn rules_survive_reload() {
        let path = tmp_file("ghb-rules-reload");
        let store = RulesStore::load(path.clone()).unwrap();
        store.set(ChatId(-100), "be kind".to_string()).unwrap();
        drop(store);

        let reloaded = RulesStore::load(path.clone()).unwrap();
        assert_eq!(reloaded.get(ChatId(-100)).as_deref(), Some("be kind"));

        let _ = fs::remove_file(path);
    }
}

use std::{collections::BTreeSet, fs, path::PathBuf, sync::Mutex};

use crate::{domain::ChatId, Result};

/// Persistent set of every chat the bot has seen an event in.
///
/// The Bot API cannot enumerate its own dialogs, so broadcast iterates this
/// registry instead. Recording is idempotent; the file is only rewritten
/// when the set actually grows.
#[derive(Debug)]
pub struct ChatRegistry {
    path: PathBuf,
    inner: Mutex<BTreeSet<i64>>,
}

impl ChatRegistry {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let set = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            inner: Mutex::new(set),
        })
    }

    pub fn record(&self, chat: ChatId) -> Result<()> {
        let mut set = self.inner.lock().expect("chat registry poisoned");
        if !set.insert(chat.0) {
            return Ok(());
        }
        let json = serde_json::to_string(&*set)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn known_chats(&self) -> Vec<ChatId> {
        let set = self.inner.lock().expect("chat registry poisoned");
        set.iter().map(|&id| ChatId(id)).collect()
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
    fn record_is_idempotent() {
        let reg = ChatRegistry::load(tmp_file("ghb-chats")).unwrap();
        reg.record(ChatId(10)).unwrap();
        reg.record(ChatId(10)).unwrap();
        reg.record(ChatId(20)).unwrap();
        assert_eq!(reg.known_chats(), vec![ChatId(10), ChatId(20)]);
    }

    #[test]
    fn registry_survives_reload() {
        let path = tmp_file("ghb-chats-reload");
        let reg = ChatRegistry::load(path.clone()).unwrap();
        reg.record(ChatId(-5)).unwrap();
        reg.record(ChatId(7)).unwrap();
        drop(reg);

        let reloaded = ChatRegistry::load(path.clone()).unwrap();
        assert_eq!(reloaded.known_chats(), vec![ChatId(-5), ChatId(7)]);

        let _ = fs::remove_file(path);
    }
}

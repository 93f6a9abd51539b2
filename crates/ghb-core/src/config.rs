use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

/// Typed configuration for the bot, sourced from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// The single identity allowed to use `/broadcast`.
    pub owner_id: i64,

    /// Backing file for the chat-id -> rules mapping.
    pub rules_file: PathBuf,
    /// Backing file for the known-chat registry used by broadcast.
    pub chats_file: PathBuf,

    /// Fixed pause between broadcast sends (platform flood control).
    pub broadcast_delay: Duration,
    /// Upper bound on any single platform API call.
    pub api_call_timeout: Duration,

    /// URL advertised by the `/start` keyboard's "Updates" button.
    pub updates_channel_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let owner_id = env_i64("OWNER_ID").ok_or_else(|| {
            Error::Config("OWNER_ID environment variable is required".to_string())
        })?;

        let rules_file =
            env_path("RULES_FILE").unwrap_or_else(|| PathBuf::from("/tmp/ghb-rules.json"));
        let chats_file =
            env_path("CHATS_FILE").unwrap_or_else(|| PathBuf::from("/tmp/ghb-chats.json"));

        let broadcast_delay =
            Duration::from_millis(env_u64("BROADCAST_DELAY_MS").unwrap_or(500));
        let api_call_timeout =
            Duration::from_millis(env_u64("API_CALL_TIMEOUT_MS").unwrap_or(30_000));

        let updates_channel_url = env_str("UPDATES_CHANNEL_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| "https://t.me/bestshayri_raj".to_string());

        Ok(Self {
            telegram_bot_token,
            owner_id,
            rules_file,
            chats_file,
            broadcast_delay,
            api_call_timeout,
            updates_channel_url,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_i64(key: &str) -> Option<i64> {
    env_str(key).and_then(|s| s.trim().parse::<i64>().ok())
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

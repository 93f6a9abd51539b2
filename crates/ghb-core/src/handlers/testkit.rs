//! Fake chat client and fixture builders shared by handler tests.

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicI32, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    chat::{
        port::ChatClient,
        types::{
            ChatSnapshot, CommandInvocation, InlineArticle, Keyboard, MemberRole, ReplyTarget,
            UserSnapshot,
        },
    },
    config::Config,
    domain::{ChatId, ChatKind, MessageId, MessageRef, UserId},
    errors::Error,
    registry::ChatRegistry,
    router::Router,
    rules::RulesStore,
    Result,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Restrict { chat: i64, user: i64, can_send: bool },
    Ban { chat: i64, user: i64 },
    Unban { chat: i64, user: i64 },
    Delete { chat: i64, message: i32 },
    Send { chat: i64, text: String },
    Edit { chat: i64, message: i32, text: String },
    Keyboard { chat: i64, text: String },
    Copy { to: i64, from_chat: i64, message: i32 },
    Inline { query_id: String, titles: Vec<String> },
    AnswerCallback { id: String },
}

impl Call {
    /// True for calls that mutate chat state on the platform.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::Restrict { .. } | Call::Ban { .. } | Call::Unban { .. } | Call::Delete { .. }
        )
    }
}

pub struct FakeClient {
    pub calls: Mutex<Vec<Call>>,
    /// Role reported by `member_role` for every lookup.
    pub role: Mutex<MemberRole>,
    /// When set, `member_role` fails instead of reporting a role.
    pub fail_role_lookup: bool,
    /// When set, `copy_message` to this chat id fails.
    pub fail_copy_to: Option<i64>,
    next_msg_id: AtomicI32,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            role: Mutex::new(MemberRole::Member),
            fail_role_lookup: false,
            fail_copy_to: None,
            next_msg_id: AtomicI32::new(1000),
        }
    }
}

impl FakeClient {
    pub fn admin() -> Self {
        let fake = Self::default();
        *fake.role.lock().unwrap() = MemberRole::Administrator;
        fake
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn recorded(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.recorded().iter().filter(|c| c.is_mutation()).count()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.recorded()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatClient for FakeClient {
    async fn member_role(&self, _chat: ChatId, _user: UserId) -> Result<MemberRole> {
        if self.fail_role_lookup {
            return Err(Error::External("member lookup failed".to_string()));
        }
        Ok(*self.role.lock().unwrap())
    }

    async fn restrict_member(
        &self,
        chat: ChatId,
        user: UserId,
        can_send_messages: bool,
    ) -> Result<()> {
        self.push(Call::Restrict {
            chat: chat.0,
            user: user.0,
            can_send: can_send_messages,
        });
        Ok(())
    }

    async fn ban_member(&self, chat: ChatId, user: UserId) -> Result<()> {
        self.push(Call::Ban {
            chat: chat.0,
            user: user.0,
        });
        Ok(())
    }

    async fn unban_member(&self, chat: ChatId, user: UserId) -> Result<()> {
        self.push(Call::Unban {
            chat: chat.0,
            user: user.0,
        });
        Ok(())
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.push(Call::Delete {
            chat: msg.chat_id.0,
            message: msg.message_id.0,
        });
        Ok(())
    }

    async fn send_text(&self, chat: ChatId, html: &str) -> Result<MessageRef> {
        self.push(Call::Send {
            chat: chat.0,
            text: html.to_string(),
        });
        Ok(MessageRef {
            chat_id: chat,
            message_id: MessageId(self.next_msg_id.fetch_add(1, Ordering::SeqCst)),
        })
    }

    async fn edit_text(&self, msg: MessageRef, html: &str) -> Result<()> {
        self.push(Call::Edit {
            chat: msg.chat_id.0,
            message: msg.message_id.0,
            text: html.to_string(),
        });
        Ok(())
    }

    async fn send_keyboard(
        &self,
        chat: ChatId,
        html: &str,
        _keyboard: Keyboard,
    ) -> Result<MessageRef> {
        self.push(Call::Keyboard {
            chat: chat.0,
            text: html.to_string(),
        });
        Ok(MessageRef {
            chat_id: chat,
            message_id: MessageId(self.next_msg_id.fetch_add(1, Ordering::SeqCst)),
        })
    }

    async fn copy_message(&self, to: ChatId, msg: MessageRef) -> Result<()> {
        self.push(Call::Copy {
            to: to.0,
            from_chat: msg.chat_id.0,
            message: msg.message_id.0,
        });
        if self.fail_copy_to == Some(to.0) {
            return Err(Error::External("copy rejected".to_string()));
        }
        Ok(())
    }

    async fn member_count(&self, _chat: ChatId) -> Result<u32> {
        Ok(7)
    }

    async fn answer_inline(
        &self,
        query_id: &str,
        results: Vec<InlineArticle>,
        _cache_time: Duration,
    ) -> Result<()> {
        self.push(Call::Inline {
            query_id: query_id.to_string(),
            titles: results.into_iter().map(|r| r.title).collect(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.push(Call::AnswerCallback {
            id: callback_id.to_string(),
        });
        Ok(())
    }

    async fn bot_username(&self) -> Result<String> {
        Ok("ghb_test_bot".to_string())
    }
}

// ---- fixture builders ----

pub const OWNER_ID: i64 = 777;

fn tmp_file(prefix: &str) -> PathBuf {
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let pid = std::process::id();
    PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
}

pub fn test_config() -> Config {
    Config {
        telegram_bot_token: "test-token".to_string(),
        owner_id: OWNER_ID,
        rules_file: tmp_file("ghb-test-rules"),
        chats_file: tmp_file("ghb-test-chats"),
        broadcast_delay: Duration::ZERO,
        api_call_timeout: Duration::from_secs(5),
        updates_channel_url: "https://t.me/example".to_string(),
    }
}

pub fn test_router(client: Arc<FakeClient>) -> Router {
    test_router_with(client, test_config())
}

pub fn test_router_with(client: Arc<FakeClient>, cfg: Config) -> Router {
    let rules = Arc::new(RulesStore::load(cfg.rules_file.clone()).unwrap());
    let registry = Arc::new(ChatRegistry::load(cfg.chats_file.clone()).unwrap());
    Router::new(client, rules, registry, Arc::new(cfg))
}

pub fn group_chat(id: i64) -> ChatSnapshot {
    ChatSnapshot {
        id: ChatId(id),
        kind: ChatKind::Supergroup,
        title: Some("Test Group".to_string()),
        username: None,
    }
}

pub fn private_chat(id: i64) -> ChatSnapshot {
    ChatSnapshot {
        id: ChatId(id),
        kind: ChatKind::Private,
        title: None,
        username: None,
    }
}

pub fn user(id: i64, name: &str) -> UserSnapshot {
    UserSnapshot {
        id: UserId(id),
        first_name: name.to_string(),
        username: None,
        is_bot: false,
    }
}

pub fn reply_target(chat_id: i64, message_id: i32, sender: UserSnapshot) -> ReplyTarget {
    ReplyTarget {
        message: MessageRef {
            chat_id: ChatId(chat_id),
            message_id: MessageId(message_id),
        },
        sender,
    }
}

pub fn command(
    name: &str,
    chat: ChatSnapshot,
    sender: UserSnapshot,
    reply_to: Option<ReplyTarget>,
) -> CommandInvocation {
    CommandInvocation {
        message: MessageRef {
            chat_id: chat.id,
            message_id: MessageId(1),
        },
        chat,
        sender,
        name: name.to_string(),
        args: Vec::new(),
        reply_to,
    }
}

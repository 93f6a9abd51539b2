//! Telegram adapter (teloxide).
//!
//! Implements the `ghb-core` ChatClient port over the Telegram Bot API.

use std::time::Duration;

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{
        ChatPermissions, InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryResult,
        InlineQueryResultArticle, InputMessageContent, InputMessageContentText, ParseMode,
    },
};

use tokio::time::{sleep, timeout};

pub mod map;
pub mod router;

use ghb_core::{
    chat::{
        port::ChatClient,
        types::{ButtonAction, InlineArticle, Keyboard, MemberRole},
    },
    domain::{ChatId, MessageId, MessageRef, UserId},
    errors::Error,
    Result,
};

#[derive(Clone)]
pub struct TelegramChatClient {
    bot: Bot,
    call_timeout: Duration,
}

impl TelegramChatClient {
    pub fn new(bot: Bot, call_timeout: Duration) -> Self {
        Self { bot, call_timeout }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_user(user_id: UserId) -> teloxide::types::UserId {
        teloxide::types::UserId(user_id.0 as u64)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    /// One retry on flood control, plus a hard per-call deadline.
    async fn call<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;

        let attempt_loop = async {
            let mut attempts = 0usize;
            loop {
                match op().await {
                    Ok(v) => return Ok(v),
                    Err(e) => match e {
                        teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                            attempts += 1;
                            sleep(d).await;
                            continue;
                        }
                        other => return Err(Self::map_err(other)),
                    },
                }
            }
        };

        match timeout(self.call_timeout, attempt_loop).await {
            Ok(res) => res,
            Err(_) => Err(Error::External(format!(
                "telegram call timed out after {:?}",
                self.call_timeout
            ))),
        }
    }

    fn build_markup(keyboard: Keyboard) -> Result<InlineKeyboardMarkup> {
        let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::with_capacity(keyboard.rows.len());
        for row in keyboard.rows {
            let mut out = Vec::with_capacity(row.len());
            for button in row {
                let b = match button.action {
                    ButtonAction::Url(raw) => {
                        let parsed = url::Url::parse(&raw).map_err(|e| {
                            Error::Config(format!("invalid button url {raw}: {e}"))
                        })?;
                        InlineKeyboardButton::url(button.label, parsed)
                    }
                    ButtonAction::Callback(data) => {
                        InlineKeyboardButton::callback(button.label, data)
                    }
                };
                out.push(b);
            }
            rows.push(out);
        }
        Ok(InlineKeyboardMarkup::new(rows))
    }
}

#[async_trait]
impl ChatClient for TelegramChatClient {
    async fn member_role(&self, chat: ChatId, user: UserId) -> Result<MemberRole> {
        let member = self
            .call(|| {
                self.bot
                    .get_chat_member(Self::tg_chat(chat), Self::tg_user(user))
            })
            .await?;

        use teloxide::types::ChatMemberKind;
        let role = match member.kind {
            ChatMemberKind::Owner(_) => MemberRole::Owner,
            ChatMemberKind::Administrator(_) => MemberRole::Administrator,
            ChatMemberKind::Member => MemberRole::Member,
            ChatMemberKind::Restricted(_) => MemberRole::Restricted,
            ChatMemberKind::Left => MemberRole::Left,
            ChatMemberKind::Banned(_) => MemberRole::Banned,
        };
        Ok(role)
    }

    async fn restrict_member(
        &self,
        chat: ChatId,
        user: UserId,
        can_send_messages: bool,
    ) -> Result<()> {
        let perms = if can_send_messages {
            ChatPermissions::all()
        } else {
            ChatPermissions::empty()
        };

        self.call(|| {
            self.bot
                .restrict_chat_member(Self::tg_chat(chat), Self::tg_user(user), perms)
        })
        .await?;
        Ok(())
    }

    async fn ban_member(&self, chat: ChatId, user: UserId) -> Result<()> {
        self.call(|| {
            self.bot
                .ban_chat_member(Self::tg_chat(chat), Self::tg_user(user))
        })
        .await?;
        Ok(())
    }

    async fn unban_member(&self, chat: ChatId, user: UserId) -> Result<()> {
        self.call(|| {
            self.bot
                .unban_chat_member(Self::tg_chat(chat), Self::tg_user(user))
        })
        .await?;
        Ok(())
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.call(|| {
            self.bot
                .delete_message(Self::tg_chat(msg.chat_id), Self::tg_msg_id(msg.message_id))
        })
        .await?;
        Ok(())
    }

    async fn send_text(&self, chat: ChatId, html: &str) -> Result<MessageRef> {
        let msg = self
            .call(|| {
                self.bot
                    .send_message(Self::tg_chat(chat), html.to_string())
                    .parse_mode(ParseMode::Html)
            })
            .await?;

        Ok(MessageRef {
            chat_id: chat,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_text(&self, msg: MessageRef, html: &str) -> Result<()> {
        self.call(|| {
            self.bot
                .edit_message_text(
                    Self::tg_chat(msg.chat_id),
                    Self::tg_msg_id(msg.message_id),
                    html.to_string(),
                )
                .parse_mode(ParseMode::Html)
        })
        .await?;
        Ok(())
    }

    async fn send_keyboard(
        &self,
        chat: ChatId,
        html: &str,
        keyboard: Keyboard,
    ) -> Result<MessageRef> {
        let markup = Self::build_markup(keyboard)?;

        let msg = self
            .call(|| {
                self.bot
                    .send_message(Self::tg_chat(chat), html.to_string())
                    .parse_mode(ParseMode::Html)
                    .reply_markup(markup.clone())
            })
            .await?;

        Ok(MessageRef {
            chat_id: chat,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn copy_message(&self, to: ChatId, msg: MessageRef) -> Result<()> {
        self.call(|| {
            self.bot.copy_message(
                Self::tg_chat(to),
                Self::tg_chat(msg.chat_id),
                Self::tg_msg_id(msg.message_id),
            )
        })
        .await?;
        Ok(())
    }

    async fn member_count(&self, chat: ChatId) -> Result<u32> {
        let count = self
            .call(|| self.bot.get_chat_member_count(Self::tg_chat(chat)))
            .await?;
        Ok(count)
    }

    async fn answer_inline(
        &self,
        query_id: &str,
        results: Vec<InlineArticle>,
        cache_time: Duration,
    ) -> Result<()> {
        let articles: Vec<InlineQueryResult> = results
            .into_iter()
            .map(|a| {
                InlineQueryResult::Article(
                    InlineQueryResultArticle::new(
                        a.id,
                        a.title,
                        InputMessageContent::Text(InputMessageContentText::new(a.text)),
                    )
                    .description(a.description),
                )
            })
            .collect();

        self.call(|| {
            self.bot
                .answer_inline_query(query_id.to_string(), articles.clone())
                .cache_time(cache_time.as_secs() as u32)
        })
        .await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.call(|| self.bot.answer_callback_query(callback_id.to_string()))
            .await?;
        Ok(())
    }

    async fn bot_username(&self) -> Result<String> {
        let me = self.call(|| self.bot.get_me()).await?;
        Ok(me.username().to_string())
    }
}

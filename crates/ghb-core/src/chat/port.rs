use std::time::Duration;

use async_trait::async_trait;

use crate::{
    chat::types::{InlineArticle, Keyboard, MemberRole},
    domain::{ChatId, MessageRef, UserId},
    Result,
};

/// Messaging-platform port.
///
/// Telegram is the first implementation; handlers only ever talk to this
/// trait so they can run against a fake client in tests.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Point-in-time membership role lookup. Errors mean the lookup itself
    /// failed, not that the user is absent.
    async fn member_role(&self, chat: ChatId, user: UserId) -> Result<MemberRole>;

    /// Restrict or re-allow sending messages for a member.
    async fn restrict_member(
        &self,
        chat: ChatId,
        user: UserId,
        can_send_messages: bool,
    ) -> Result<()>;

    async fn ban_member(&self, chat: ChatId, user: UserId) -> Result<()>;
    async fn unban_member(&self, chat: ChatId, user: UserId) -> Result<()>;

    async fn delete_message(&self, msg: MessageRef) -> Result<()>;

    async fn send_text(&self, chat: ChatId, html: &str) -> Result<MessageRef>;
    async fn edit_text(&self, msg: MessageRef, html: &str) -> Result<()>;

    async fn send_keyboard(
        &self,
        chat: ChatId,
        html: &str,
        keyboard: Keyboard,
    ) -> Result<MessageRef>;

    /// Re-send an existing message to another chat without a forward header.
    async fn copy_message(&self, to: ChatId, msg: MessageRef) -> Result<()>;

    async fn member_count(&self, chat: ChatId) -> Result<u32>;

    async fn answer_inline(
        &self,
        query_id: &str,
        results: Vec<InlineArticle>,
        cache_time: Duration,
    ) -> Result<()>;

    async fn answer_callback(&self, callback_id: &str) -> Result<()>;

    /// Bot's own username, used for the `/start` add-to-group link.
    async fn bot_username(&self) -> Result<String>;
}

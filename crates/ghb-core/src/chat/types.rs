use crate::domain::{ChatId, ChatKind, MessageRef, UserId};

/// Classified inbound event. Exactly one handler runs per event.
///
/// Platform-specific fields live in the adapter; snapshots carry only what
/// the handlers format or dispatch on.
#[derive(Clone, Debug)]
pub enum IncomingEvent {
    MemberJoined(MembershipEvent),
    MemberLeft(MembershipEvent),
    Command(CommandInvocation),
    Text(TextMessage),
    Inline(InlineQueryEvent),
    Callback(CallbackEvent),
}

/// Point-in-time view of a chat, valid for one event.
#[derive(Clone, Debug)]
pub struct ChatSnapshot {
    pub id: ChatId,
    pub kind: ChatKind,
    pub title: Option<String>,
    pub username: Option<String>,
}

/// Point-in-time view of a user, valid for one event.
#[derive(Clone, Debug)]
pub struct UserSnapshot {
    pub id: UserId,
    pub first_name: String,
    pub username: Option<String>,
    pub is_bot: bool,
}

#[derive(Clone, Debug)]
pub struct MembershipEvent {
    pub chat: ChatSnapshot,
    pub message: MessageRef,
    pub member: UserSnapshot,
}

/// The message a command replied to, carrying the moderation target.
#[derive(Clone, Debug)]
pub struct ReplyTarget {
    pub message: MessageRef,
    pub sender: UserSnapshot,
}

#[derive(Clone, Debug)]
pub struct CommandInvocation {
    pub chat: ChatSnapshot,
    pub sender: UserSnapshot,
    pub message: MessageRef,
    /// Lowercased command name without the leading `/` or `@bot` suffix.
    pub name: String,
    pub args: Vec<String>,
    pub reply_to: Option<ReplyTarget>,
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat: ChatSnapshot,
    pub sender: UserSnapshot,
    pub message: MessageRef,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct InlineQueryEvent {
    pub query_id: String,
    pub from: UserSnapshot,
    pub query: String,
}

#[derive(Clone, Debug)]
pub struct CallbackEvent {
    pub callback_id: String,
    pub from: UserSnapshot,
    pub data: String,
    pub message: Option<MessageRef>,
}

/// Membership role as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberRole {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberRole {
    pub fn is_privileged(self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Administrator)
    }
}

/// One inline-query result entry (article style).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineArticle {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Message text sent when the result is picked.
    pub text: String,
}

#[derive(Clone, Debug)]
pub enum ButtonAction {
    Url(String),
    Callback(String),
}

#[derive(Clone, Debug)]
pub struct KeyboardButton {
    pub label: String,
    pub action: ButtonAction,
}

/// Inline keyboard attached to a message, row-major.
#[derive(Clone, Debug)]
pub struct Keyboard {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl KeyboardButton {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }

    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }
}

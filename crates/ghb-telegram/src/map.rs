//! Pure classification of teloxide updates into the core event model.

use teloxide::types::{CallbackQuery, Chat, InlineQuery, Message, User};

use ghb_core::{
    chat::types::{
        CallbackEvent, ChatSnapshot, CommandInvocation, IncomingEvent, InlineQueryEvent,
        MembershipEvent, ReplyTarget, TextMessage, UserSnapshot,
    },
    domain::{ChatId, ChatKind, MessageId, MessageRef},
};

/// Split `/cmd@botname arg1 arg2 ...` into a lowercased command name and its
/// argument tokens. Returns `None` for anything that is not a command.
pub fn parse_command(text: &str) -> Option<(String, Vec<String>)> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    let first = tokens.next()?;

    let name = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();
    if name.is_empty() {
        return None;
    }

    let args = tokens.map(|t| t.to_string()).collect();
    Some((name, args))
}

pub fn chat_snapshot(chat: &Chat) -> ChatSnapshot {
    let kind = if chat.is_private() {
        ChatKind::Private
    } else if chat.is_group() {
        ChatKind::Group
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else {
        ChatKind::Channel
    };

    ChatSnapshot {
        id: ChatId(chat.id.0),
        kind,
        title: chat.title().map(|s| s.to_string()),
        username: chat.username().map(|s| s.to_string()),
    }
}

pub fn user_snapshot(user: &User) -> UserSnapshot {
    UserSnapshot {
        id: ghb_core::domain::UserId(user.id.0 as i64),
        first_name: user.first_name.clone(),
        username: user.username.clone(),
        is_bot: user.is_bot,
    }
}

fn message_ref(msg: &Message) -> MessageRef {
    MessageRef {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
    }
}

/// Map one inbound message to its events.
///
/// A service message announcing several joined members yields one
/// `MemberJoined` per member; everything else yields at most one event.
pub fn message_events(msg: &Message) -> Vec<IncomingEvent> {
    let chat = chat_snapshot(&msg.chat);

    if let Some(members) = msg.new_chat_members() {
        return members
            .iter()
            .map(|member| {
                IncomingEvent::MemberJoined(MembershipEvent {
                    chat: chat.clone(),
                    message: message_ref(msg),
                    member: user_snapshot(member),
                })
            })
            .collect();
    }

    if let Some(member) = msg.left_chat_member() {
        return vec![IncomingEvent::MemberLeft(MembershipEvent {
            chat,
            message: message_ref(msg),
            member: user_snapshot(member),
        })];
    }

    let (Some(text), Some(sender)) = (msg.text(), msg.from()) else {
        return Vec::new();
    };
    let sender = user_snapshot(sender);

    if let Some((name, args)) = parse_command(text) {
        let reply_to = msg.reply_to_message().and_then(|reply| {
            let target_sender = reply.from()?;
            Some(ReplyTarget {
                message: message_ref(reply),
                sender: user_snapshot(target_sender),
            })
        });

        return vec![IncomingEvent::Command(CommandInvocation {
            chat,
            sender,
            message: message_ref(msg),
            name,
            args,
            reply_to,
        })];
    }

    vec![IncomingEvent::Text(TextMessage {
        chat,
        sender,
        message: message_ref(msg),
        text: text.to_string(),
    })]
}

pub fn inline_event(q: &InlineQuery) -> IncomingEvent {
    IncomingEvent::Inline(InlineQueryEvent {
        query_id: q.id.clone(),
        from: user_snapshot(&q.from),
        query: q.query.clone(),
    })
}

pub fn callback_event(q: &CallbackQuery) -> IncomingEvent {
    IncomingEvent::Callback(CallbackEvent {
        callback_id: q.id.clone(),
        from: user_snapshot(&q.from),
        data: q.data.clone().unwrap_or_default(),
        message: q.message.as_ref().map(message_ref),
    })
}

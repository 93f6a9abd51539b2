use std::time::Instant;

use crate::{
    chat::types::{CommandInvocation, Keyboard, KeyboardButton},
    formatting::{escape_html, format_uptime},
    router::Router,
    Result,
};

pub(crate) const HELP_TEXT: &str = "<b>Group Help Bot Commands</b>\n\
------------------------------\n\
<b>Core:</b> /start, /help, /ping\n\
<b>Moderation:</b> /mute, /unmute, /ban, /unban, /kick, /del\n\
<b>Group Info:</b> /ginfo, /uinfo\n\
<b>Management:</b> /setrules, /rules, /broadcast (Owner Only)";

pub async fn start(r: &Router, inv: &CommandInvocation) -> Result<()> {
    let caption = format!(
        "\u{1f44b} Hello, <b>{}</b>!\n\nI am a group help bot. Type <b>/help</b> for the full command list.",
        escape_html(&inv.sender.first_name)
    );

    let add_me_url = match r.client.bot_username().await {
        Ok(username) => format!("https://t.me/{username}?startgroup=true"),
        Err(e) => {
            tracing::warn!(error = %e, "could not resolve bot username for /start keyboard");
            "https://t.me".to_string()
        }
    };

    let keyboard = Keyboard {
        rows: vec![
            vec![KeyboardButton::url("\u{2795} Add Me", add_me_url)],
            vec![
                KeyboardButton::callback("\u{2753} Help", "show_help"),
                KeyboardButton::url("\u{1f4e2} Updates", r.cfg.updates_channel_url.clone()),
            ],
        ],
    };

    r.client
        .send_keyboard(inv.chat.id, &caption, keyboard)
        .await?;
    Ok(())
}

pub async fn help(r: &Router, inv: &CommandInvocation) -> Result<()> {
    r.client.send_text(inv.chat.id, HELP_TEXT).await?;
    Ok(())
}

/// Send "Pinging...", then edit it in place with the measured round trip and
/// process uptime.
pub async fn ping(r: &Router, inv: &CommandInvocation) -> Result<()> {
    let before = Instant::now();
    let sent = r.client.send_text(inv.chat.id, "Pinging...").await?;
    let rtt_ms = before.elapsed().as_millis();

    let uptime = format_uptime(r.started_at.elapsed().as_secs());
    let text = format!(
        "\u{1f3d3} <b>Pong!</b>\n<b>Ping:</b> <code>{rtt_ms}ms</code>\n<b>Uptime:</b> <code>{uptime}</code>"
    );
    r.client.edit_text(sent, &text).await?;
    Ok(())
}

pub async fn group_info(r: &Router, inv: &CommandInvocation) -> Result<()> {
    let members = r.client.member_count(inv.chat.id).await?;

    let title = inv.chat.title.as_deref().unwrap_or("(untitled)");
    let mut text = format!(
        "<b>Group Information</b>\n\
         <b>Title:</b> {}\n\
         <b>ID:</b> <code>{}</code>\n\
         <b>Type:</b> {}\n\
         <b>Members:</b> {members}",
        escape_html(title),
        inv.chat.id.0,
        inv.chat.kind,
    );
    if let Some(username) = &inv.chat.username {
        text.push_str(&format!("\n<b>Username:</b> @{}", escape_html(username)));
    }

    r.client.send_text(inv.chat.id, &text).await?;
    Ok(())
}

/// `/uinfo`: describes the replied-to user if there is a reply, else the
/// invoking user.
pub async fn user_info(r: &Router, inv: &CommandInvocation) -> Result<()> {
    let user = inv
        .reply_to
        .as_ref()
        .map(|t| &t.sender)
        .unwrap_or(&inv.sender);

    let mut text = format!(
        "<b>User Information</b>\n\
         <b>Name:</b> {}\n\
         <b>ID:</b> <code>{}</code>",
        escape_html(&user.first_name),
        user.id.0,
    );
    if let Some(username) = &user.username {
        text.push_str(&format!("\n<b>Username:</b> @{}", escape_html(username)));
    }

    r.client.send_text(inv.chat.id, &text).await?;
    Ok(())
}

use crate::{chat::types::TextMessage, router::Router, Result};

/// Trigger phrases for the auto-responder, matched case-insensitively as
/// substrings. First match wins.
const TRIGGERS: &[(&str, &str)] = &[
    ("hello bot", "Hello there! How can I help you?"),
    ("thanks bot", "You're welcome!"),
];

pub fn canned_reply(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    TRIGGERS
        .iter()
        .find(|(trigger, _)| lower.contains(trigger))
        .map(|(_, reply)| *reply)
}

/// Auto-respond to trigger phrases in group text messages.
pub async fn respond(r: &Router, msg: &TextMessage) -> Result<()> {
    if !msg.chat.kind.is_group() {
        return Ok(());
    }

    if let Some(reply) = canned_reply(&msg.text) {
        r.client.send_text(msg.chat.id, reply).await?;
    }
    Ok(())
}

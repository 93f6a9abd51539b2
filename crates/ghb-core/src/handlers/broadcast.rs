use tokio::time::sleep;

use crate::{chat::types::CommandInvocation, router::Router, Result};

/// Owner-only broadcast: copy the replied-to message to every known chat
/// except the owner's own, pacing sends with a fixed delay.
///
/// A failure on one destination never aborts the remaining sends; tallies
/// are reported in a single summary reply.
pub async fn broadcast(r: &Router, inv: &CommandInvocation) -> Result<()> {
    // Non-owner or group context: not this command's audience, stay silent.
    if inv.sender.id.0 != r.cfg.owner_id || !inv.chat.kind.is_private() {
        return Ok(());
    }

    let Some(target) = &inv.reply_to else {
        r.client
            .send_text(
                inv.chat.id,
                "\u{274c} Please reply to a message to broadcast it.",
            )
            .await?;
        return Ok(());
    };

    let destinations: Vec<_> = r
        .registry
        .known_chats()
        .into_iter()
        .filter(|chat| chat.0 != r.cfg.owner_id)
        .collect();

    let mut sent = 0u32;
    let mut failed = 0u32;

    for (i, chat) in destinations.iter().enumerate() {
        match r.client.copy_message(*chat, target.message).await {
            Ok(()) => sent += 1,
            Err(e) => {
                failed += 1;
                tracing::warn!(chat = chat.0, error = %e, "broadcast send failed");
            }
        }

        // The delay paces consecutive sends; the summary does not wait out
        // one more tick after the last destination.
        if i + 1 < destinations.len() {
            sleep(r.cfg.broadcast_delay).await;
        }
    }

    let summary =
        format!("\u{2705} Broadcast complete. Sent to {sent} chats, failed for {failed}.");
    r.client.send_text(inv.chat.id, &summary).await?;
    Ok(())
}

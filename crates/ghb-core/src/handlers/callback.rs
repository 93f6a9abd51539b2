use crate::{chat::types::CallbackEvent, handlers::info::HELP_TEXT, router::Router, Result};

/// Button-press callbacks. `show_help` rewrites the originating message into
/// the help text; everything else is just acknowledged.
pub async fn handle(r: &Router, ev: &CallbackEvent) -> Result<()> {
    if ev.data == "show_help" {
        if let Some(msg) = ev.message {
            r.client.edit_text(msg, HELP_TEXT).await?;
        }
    }

    r.client.answer_callback(&ev.callback_id).await
}

use std::time::Duration;

use crate::{
    chat::types::{InlineArticle, InlineQueryEvent},
    router::Router,
    Result,
};

const INLINE_CACHE: Duration = Duration::from_secs(5);

/// Fixed result list returned for every inline query, regardless of its
/// text: a help blurb and a liveness blurb, in that order.
pub fn fixed_results() -> Vec<InlineArticle> {
    vec![
        InlineArticle {
            id: "help".to_string(),
            title: "Help".to_string(),
            description: "Get help about bot commands.".to_string(),
            text: "You can use the bot in a group for moderation and other features."
                .to_string(),
        },
        InlineArticle {
            id: "ping".to_string(),
            title: "Ping".to_string(),
            description: "Check if the bot is alive.".to_string(),
            text: "\u{1f3d3} Pong! The bot is online.".to_string(),
        },
    ]
}

pub async fn answer(r: &Router, q: &InlineQueryEvent) -> Result<()> {
    r.client
        .answer_inline(&q.query_id, fixed_results(), INLINE_CACHE)
        .await
}

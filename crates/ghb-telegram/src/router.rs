use std::sync::Arc;

use teloxide::{
    dispatching::Dispatcher,
    dptree,
    prelude::*,
    types::{CallbackQuery, InlineQuery, Message},
};

use ghb_core::{
    chat::port::ChatClient, config::Config, domain::ChatId, registry::ChatRegistry,
    router::Router, rules::RulesStore,
};

use crate::{map, TelegramChatClient};

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
    pub registry: Arc<ChatRegistry>,
}

pub async fn run_polling(
    cfg: Arc<Config>,
    rules: Arc<RulesStore>,
    registry: Arc<ChatRegistry>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!(username = me.username(), "group help bot started");
    }

    let client: Arc<dyn ChatClient> =
        Arc::new(TelegramChatClient::new(bot.clone(), cfg.api_call_timeout));
    let router = Arc::new(Router::new(
        client,
        rules,
        registry.clone(),
        cfg.clone(),
    ));
    let state = Arc::new(AppState { router, registry });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(on_callback_query))
        .branch(Update::filter_inline_query().endpoint(on_inline_query))
        .branch(Update::filter_message().endpoint(on_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn on_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    // Every seen chat becomes a broadcast destination.
    if let Err(e) = state.registry.record(ChatId(msg.chat.id.0)) {
        tracing::warn!(chat = msg.chat.id.0, error = %e, "failed to record chat");
    }

    for event in map::message_events(&msg) {
        state.router.handle_event(event).await;
    }
    Ok(())
}

async fn on_inline_query(q: InlineQuery, state: Arc<AppState>) -> ResponseResult<()> {
    state.router.handle_event(map::inline_event(&q)).await;
    Ok(())
}

async fn on_callback_query(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    state.router.handle_event(map::callback_event(&q)).await;
    Ok(())
}

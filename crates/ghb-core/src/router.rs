use std::{sync::Arc, time::Instant};

use crate::{
    chat::{port::ChatClient, types::IncomingEvent},
    config::Config,
    handlers,
    registry::ChatRegistry,
    rules::RulesStore,
    Result,
};

/// Dispatches one classified event to exactly one handler.
///
/// Handlers never raise past this boundary: any error a handler could not
/// turn into a user-visible reply is logged here and dropped.
pub struct Router {
    pub(crate) client: Arc<dyn ChatClient>,
    pub(crate) rules: Arc<RulesStore>,
    pub(crate) registry: Arc<ChatRegistry>,
    pub(crate) cfg: Arc<Config>,
    pub(crate) started_at: Instant,
}

impl Router {
    pub fn new(
        client: Arc<dyn ChatClient>,
        rules: Arc<RulesStore>,
        registry: Arc<ChatRegistry>,
        cfg: Arc<Config>,
    ) -> Self {
        Self {
            client,
            rules,
            registry,
            cfg,
            started_at: Instant::now(),
        }
    }

    pub async fn handle_event(&self, event: IncomingEvent) {
        let outcome = self.dispatch(event).await;
        if let Err(e) = outcome {
            tracing::error!(error = %e, "handler failed");
        }
    }

    async fn dispatch(&self, event: IncomingEvent) -> Result<()> {
        match event {
            IncomingEvent::MemberJoined(ev) => handlers::membership::welcome(self, &ev).await,
            IncomingEvent::MemberLeft(ev) => handlers::membership::farewell(self, &ev).await,
            IncomingEvent::Command(inv) => self.dispatch_command(&inv).await,
            IncomingEvent::Text(msg) => handlers::keywords::respond(self, &msg).await,
            IncomingEvent::Inline(q) => handlers::inline::answer(self, &q).await,
            IncomingEvent::Callback(ev) => handlers::callback::handle(self, &ev).await,
        }
    }

    async fn dispatch_command(
        &self,
        inv: &crate::chat::types::CommandInvocation,
    ) -> Result<()> {
        use handlers::moderation::ModAction;

        match inv.name.as_str() {
            "start" => handlers::info::start(self, inv).await,
            "help" => handlers::info::help(self, inv).await,
            "ping" => handlers::info::ping(self, inv).await,

            "mute" => handlers::moderation::moderate(self, inv, ModAction::Mute).await,
            "unmute" => handlers::moderation::moderate(self, inv, ModAction::Unmute).await,
            "ban" => handlers::moderation::moderate(self, inv, ModAction::Ban).await,
            "unban" => handlers::moderation::moderate(self, inv, ModAction::Unban).await,
            "kick" => handlers::moderation::moderate(self, inv, ModAction::Kick).await,
            "del" => handlers::moderation::delete(self, inv).await,

            "ginfo" => handlers::info::group_info(self, inv).await,
            "uinfo" => handlers::info::user_info(self, inv).await,

            "setrules" => handlers::rules::set_rules(self, inv).await,
            "rules" => handlers::rules::get_rules(self, inv).await,

            "broadcast" => handlers::broadcast::broadcast(self, inv).await,

            _ => Ok(()), // unknown commands are ignored
        }
    }
}

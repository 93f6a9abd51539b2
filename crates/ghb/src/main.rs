use std::sync::Arc;

use ghb_core::{config::Config, registry::ChatRegistry, rules::RulesStore};

#[tokio::main]
async fn main() -> Result<(), ghb_core::Error> {
    ghb_core::logging::init("ghb");

    let cfg = Arc::new(Config::load()?);
    let rules = Arc::new(RulesStore::load(cfg.rules_file.clone())?);
    let registry = Arc::new(ChatRegistry::load(cfg.chats_file.clone())?);

    ghb_telegram::router::run_polling(cfg, rules, registry)
        .await
        .map_err(|e| ghb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}

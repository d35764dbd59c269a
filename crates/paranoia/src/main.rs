use std::sync::Arc;

use paranoia_core::{config::Config, store::memory::MemoryStore};
use paranoia_discord::DiscordRest;

#[tokio::main]
async fn main() -> Result<(), paranoia_core::Error> {
    paranoia_core::logging::init("paranoia")?;

    let cfg = Arc::new(Config::load()?);
    let chat = Arc::new(DiscordRest::new(&cfg)?);
    let store = Arc::new(MemoryStore::new());

    paranoia_discord::router::run_polling(cfg, chat, store)
        .await
        .map_err(|e| paranoia_core::Error::External(format!("bot loop failed: {e}")))?;

    Ok(())
}

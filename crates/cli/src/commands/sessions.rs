//! `paperhound sessions` — list stored sessions.

use paperhound_config::AppConfig;
use paperhound_core::session::SessionStore;
use paperhound_session::FileSessionStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_default()?;
    let store = FileSessionStore::new(&config.session_dir)?;

    let mut ids = store.list().await?;
    ids.sort();

    if ids.is_empty() {
        println!("No stored sessions.");
        return Ok(());
    }

    for id in ids {
        match store.load(&id).await {
            Ok(state) => println!(
                "{id}  user={}  turns={}  updated={}",
                state.user_id,
                state.conversation_history.len(),
                state.last_updated.format("%Y-%m-%d %H:%M:%S")
            ),
            Err(e) => println!("{id}  (unreadable: {e})"),
        }
    }
    Ok(())
}

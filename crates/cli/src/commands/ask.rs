//! `paperhound ask` — run one message through the assistant.

use std::sync::Arc;

use paperhound_agent::Assistant;
use paperhound_config::AppConfig;
use paperhound_providers::OpenAiCompatProvider;
use paperhound_session::FileSessionStore;

use crate::demo::DemoRetriever;

pub async fn run(
    message: &str,
    session: Option<&str>,
    user: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_default().map_err(|e| format!("Failed to load config: {e}"))?;
    config.validate().map_err(|e| {
        format!(
            "{e}\n\nSet PAPERHOUND_API_KEY or add api_key to paperhound.toml to get started."
        )
    })?;

    let provider = OpenAiCompatProvider::new("openai_compat", &config.base_url, &config.api_key)?
        .with_default_timeout_secs(config.request_timeout_secs);
    let store = FileSessionStore::new(&config.session_dir)?;

    let mut assistant = Assistant::new(
        Arc::new(provider),
        Arc::new(DemoRetriever::new()),
        Arc::new(store),
        &config.logs_dir,
        &config.model,
    )
    .with_temperature(config.temperature)
    .with_max_tokens(config.max_tokens)
    .with_timeout_secs(config.request_timeout_secs);

    assistant.start_session(user, session).await?;
    let outcome = assistant.process_message(message).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}

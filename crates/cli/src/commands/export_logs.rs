//! `paperhound export-logs` — copy a session's tool log to a file.

use paperhound_config::AppConfig;
use paperhound_tools::ToolLogger;

pub async fn run(session: &str, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_default()?;

    let logger = ToolLogger::new(&config.logs_dir, session)?;
    let entries = logger.entries().await;
    if entries.is_empty() {
        return Err(format!("no tool log found for session '{session}'").into());
    }

    logger.export(path).await?;
    println!("Exported {} log entries to {path}", entries.len());
    Ok(())
}

use medi_reminder_server::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Held until exit so buffered file output is flushed
    let _log_guard = match rolling_logger::init_logger(config.log_dir.clone(), "MediReminder") {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
            None
        }
    };

    medi_reminder_server::run(config).await
}

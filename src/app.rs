use std::sync::{Arc, Mutex};

use tracing::{error, info};

use crate::application::CsvImportUseCase;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{add_log, start_server, HttpState, LogEntry};

pub async fn run() -> std::io::Result<()> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Failed to load .env: {}", err);
        }
    }

    let config = ConfigService::new().load().map_err(|err| {
        eprintln!("Failed to load configuration: {}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .try_init();

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));
    let state = HttpState {
        import_use_case: CsvImportUseCase::new(config.import.clone()),
        logs: logs.clone(),
    };

    let server = start_server(state, &config.server).map_err(|err| {
        error!(
            error = %err,
            host = %config.server.host,
            port = config.server.port,
            "Failed to bind HTTP server"
        );
        err
    })?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        quote_mode = ?config.import.quote_mode,
        "Import service listening"
    );
    add_log(
        &logs,
        "INFO",
        "Server",
        &format!(
            "Listening on http://{}:{}/api",
            config.server.host, config.server.port
        ),
    );

    server.await
}

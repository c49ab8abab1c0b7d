use crate::{config::Config, error, server::start_api_server};

/// Runs the relay until the process is stopped.
///
/// `port` overrides the `PORT` environment variable.
pub async fn serve(port: Option<u16>) {
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    if let Some(port) = port {
        config.port = port;
    }

    if let Err(e) = start_api_server(config).await {
        error!("Relay stopped. Err: {}", e);
    }
}

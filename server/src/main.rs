use drawprompt::{serve, AppConfig};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Drawprompt starting...");

    // Fail fast: a server without a usable provider would only return 500s
    let config = match AppConfig::from_env().await {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

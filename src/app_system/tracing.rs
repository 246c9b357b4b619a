use super::LoggingConfig;

/// Configure tracing once at application startup for the entire process.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies.
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=ticket_checkout::checkout=debug,info cargo run
/// ```
pub fn setup_tracing(config: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr; stdout carries results.
pub fn init(verbose: u8, json: bool) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

//! `tracing` subscriber setup shared by the server and the CLI.

use tracing_subscriber::EnvFilter;

/// Builds a filter from `RUST_LOG`-style directives, using `fallback` when
/// they do not parse.
pub fn env_filter(directives: &str, fallback: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the server subscriber on stdout, as text or JSON lines.
pub fn init(directives: &str, json: bool) {
    let filter = env_filter(directives, "info");

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Installs a text subscriber on stderr, keeping stdout free for command
/// output.
pub fn init_stderr(directives: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives, "warn"))
        .with_writer(std::io::stderr)
        .init();
}

//! Diagnostics for santa runs.
//!
//! Tracing goes to stderr so stdout stays reserved for dry-run pairings and the
//! run summary. Events never name a giver's recipient; the mail record is the
//! only artifact that does.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber.
///
/// Reads `RUST_LOG`. An unset or unparsable value falls back to `warn`; a bad
/// value is reported once the subscriber is up.
///
/// # Example
/// ```bash
/// RUST_LOG=santa=debug santa --config santa.toml
/// ```
pub fn init() {
    let raw = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = build_filter(raw.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();

    if let Some(raw) = rejected {
        tracing::warn!(rust_log = %raw, "ignoring unparsable RUST_LOG");
    }
}

/// Parse `raw` directives, returning the rejected input alongside the fallback
/// filter when it does not parse.
fn build_filter(raw: Option<&str>) -> (EnvFilter, Option<&str>) {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => (EnvFilter::new(DEFAULT_DIRECTIVE), None),
        Some(raw) => match EnvFilter::try_new(raw) {
            Ok(filter) => (filter, None),
            Err(_) => (EnvFilter::new(DEFAULT_DIRECTIVE), Some(raw)),
        },
    }
}

//! Tracing setup for the server binary.
//!
//! The subscriber is installed before the configuration is read so the
//! config loader's own messages are not lost; the filter is swapped for the
//! configured level afterwards.

use tracing_subscriber::{EnvFilter, Registry, prelude::*, reload};

const LOG_TARGETS: [&str; 4] = ["server", "db", "config", "tower_http"];

pub type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

/// Expands a bare level such as `debug` into per-crate directives. Anything
/// that already looks like a filter (`server=debug,db=trace`) is used as is.
pub fn filter_directives(log_level: &str) -> String {
    let log_level = log_level.trim();
    if log_level.contains(['=', ',']) {
        return log_level.to_string();
    }

    let mut directives = vec!["warn".to_string()];
    directives.extend(
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={log_level}")),
    );
    directives.join(",")
}

pub fn env_filter(log_level: &str) -> anyhow::Result<EnvFilter> {
    let filter_string = filter_directives(log_level);
    EnvFilter::try_new(&filter_string)
        .map_err(|err| anyhow::anyhow!("invalid log filter '{filter_string}': {err}"))
}

pub fn init_tracing(log_level: &str) -> anyhow::Result<LogFilterHandle> {
    let (filter, handle) = reload::Layer::new(env_filter(log_level)?);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(handle)
}

pub fn set_log_level(handle: &LogFilterHandle, log_level: &str) -> anyhow::Result<()> {
    handle.reload(env_filter(log_level)?)?;
    tracing::debug!("Log filter set to '{}'", filter_directives(log_level));
    Ok(())
}

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::Result;
use qplot::Config;
use tracing_subscriber::EnvFilter;

/// Written by the recording command after each process exits.
pub const END_OF_SCRIPT: &str = "@@end-of-script@@\n";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_test_writer()
        .try_init();
}

/// Config whose `key` backend appends everything it receives to `log`,
/// followed by a separator once its stdin is closed.
pub fn recorder(key: &str, log: &Path) -> Config {
    let log = log.display();
    Config::empty().with(
        key,
        format!("cat >> '{log}'; printf '%s' '{END_OF_SCRIPT}' >> '{log}'"),
    )
}

/// One entry per process the adapter spawned, in spawn order.
pub fn read_scripts(log: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(log)?;
    let mut scripts: Vec<String> = text.split(END_OF_SCRIPT).map(str::to_string).collect();
    // split leaves an empty tail after the last separator
    scripts.pop();
    Ok(scripts)
}

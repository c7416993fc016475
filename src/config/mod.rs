use std::{
    collections::BTreeMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use directories::BaseDirs;
use serde::Serialize;

use crate::process::Backend;

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    inner: BTreeMap<String, String>,
    pub config_path: PathBuf,
    #[serde(skip)]
    use_env: bool,
}

impl Config {
    /// Defaults, overlaid with `qplotrc`, overlaid with the environment.
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    if let Some((k, v)) = parse_line(&line) {
                        map.insert(k.to_string(), v.to_string());
                    }
                }
            }
        }

        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path, use_env: true }
    }

    /// Defaults only; the environment is never consulted.
    pub fn empty() -> Self {
        Self {
            inner: default_map(),
            config_path: default_config_path(),
            use_env: false,
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.inner.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if self.use_env {
            if let Ok(v) = env::var(key) {
                return Some(v);
            }
        }
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }

    /// Shell used to run backend commands.
    pub fn shell(&self) -> String {
        self.get("QPLOT_SHELL").unwrap_or_else(|| "/bin/sh".into())
    }

    /// Print scripts instead of running interpreters.
    pub fn debug(&self) -> bool {
        cfg!(feature = "debug-passthrough") || self.get_bool("QPLOT_DEBUG")
    }

    /// Effective command for backend `B`: explicit override, then debug
    /// passthrough, then the backend's own command.
    pub fn command_for<B: Backend>(&self) -> String {
        if let Some(cmd) = self.get(B::COMMAND_KEY).filter(|c| !c.trim().is_empty()) {
            return cmd;
        }
        if B::INTERPRETER && self.debug() {
            return "cat".into();
        }
        B::COMMAND.into()
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    line.split_once('=').map(|(k, v)| (k.trim(), v.trim()))
}

fn is_config_key(k: &str) -> bool {
    k.starts_with("QPLOT_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("qplot").join("qplotrc")
}

fn default_map() -> BTreeMap<String, String> {
    let mut m = BTreeMap::new();
    m.insert("QPLOT_SHELL".into(), "/bin/sh".into());
    m.insert("QPLOT_DEBUG".into(), "false".into());
    m
}

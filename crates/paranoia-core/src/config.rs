use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for the bot process.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    /// REST base url, no trailing slash.
    pub api_base: String,
    pub http_timeout: Duration,
    pub poll_interval: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("DISCORD_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("DISCORD_BOT_TOKEN environment variable is required".to_string())
            })?;

        let api_base = env_str("DISCORD_API_BASE")
            .and_then(non_empty)
            .unwrap_or_else(|| "https://discord.com/api/v10".to_string())
            .trim_end_matches('/')
            .to_string();

        let http_timeout = Duration::from_millis(env_u64("HTTP_TIMEOUT_MS").unwrap_or(10_000));
        let poll_interval = Duration::from_millis(env_u64("POLL_INTERVAL_MS").unwrap_or(2_000));

        Ok(Self {
            bot_token,
            api_base,
            http_timeout,
            poll_interval,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

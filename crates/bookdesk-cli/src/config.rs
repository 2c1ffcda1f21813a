// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use bookdesk_app::ServiceKind;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const APP_NAME: &str = "bookdesk";
pub const CONFIG_PATH_ENV: &str = "BOOKDESK_CONFIG_PATH";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_TIMEOUT: &str = "30s";
const DEFAULT_BASE_URL: &str = "https://booking.local/";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub webhook: Webhook,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            webhook: Webhook::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Webhook {
    pub url: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub default_service: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put values under [webhook], [ui], and [log]",
                    path.display()
                )
            })?;
        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(url) = &self.webhook.url {
            let parsed = Url::parse(url.trim()).with_context(|| {
                format!("webhook.url in {} is not a valid URL: {url:?}", path.display())
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!(
                    "webhook.url in {} must use http or https, got {:?}",
                    path.display(),
                    parsed.scheme()
                );
            }
        }

        if let Some(timeout) = &self.webhook.timeout
            && parse_duration(timeout)?.is_zero()
        {
            bail!(
                "webhook.timeout in {} must be positive, got {}",
                path.display(),
                timeout
            );
        }

        if let Some(service) = &self.ui.default_service
            && ServiceKind::parse(service).is_none()
        {
            bail!(
                "ui.default_service in {} must be one of pest, clean, cleaning; got {service:?}",
                path.display()
            );
        }

        if let Some(base_url) = &self.ui.base_url {
            Url::parse(base_url).with_context(|| {
                format!(
                    "ui.base_url in {} is not a valid URL: {base_url:?}",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook.url.as_deref()
    }

    pub fn webhook_timeout(&self) -> Result<Duration> {
        parse_duration(self.webhook.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn default_service(&self) -> ServiceKind {
        self.ui
            .default_service
            .as_deref()
            .and_then(ServiceKind::parse)
            .unwrap_or(ServiceKind::Pest)
    }

    pub fn base_url(&self) -> Result<Url> {
        let raw = self.ui.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).with_context(|| format!("invalid ui.base_url {raw:?}"))
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path in the config file")
        })?;
        Ok(data_root.join(APP_NAME).join("bookdesk.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# bookdesk config\n# Place this file at: {}\n\nversion = 1\n\n[webhook]\n# Optional. Falls back to BOOKDESK_WEBHOOK_URL, then the built-in endpoint.\n# url = \"https://example.com/webhook/booking-assistant\"\ntimeout = \"{}\"\n\n[ui]\n# pest, clean or cleaning\ndefault_service = \"pest\"\nbase_url = \"{}\"\n\n[log]\n# Any tracing filter directive; BOOKDESK_LOG overrides it.\nlevel = \"{}\"\n# path = \"/absolute/path/to/bookdesk.log\"\n",
            path.display(),
            DEFAULT_TIMEOUT,
            DEFAULT_BASE_URL,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("timeout duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 30s)")
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_PATH_ENV, Config, parse_duration};
    use anyhow::Result;
    use bookdesk_app::ServiceKind;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.webhook_url(), None);
        assert_eq!(config.webhook_timeout()?, Duration::from_secs(30));
        assert_eq!(config.default_service(), ServiceKind::Pest);
        assert_eq!(config.base_url()?.as_str(), "https://booking.local/");
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn full_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[webhook]\nurl = \"http://127.0.0.1:5678/webhook/booking\"\ntimeout = \"500ms\"\n[ui]\ndefault_service = \"clean\"\nbase_url = \"https://book.example/form\"\n[log]\nlevel = \"debug\"\npath = \"/tmp/bookdesk-test.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(
            config.webhook_url(),
            Some("http://127.0.0.1:5678/webhook/booking")
        );
        assert_eq!(config.webhook_timeout()?, Duration::from_millis(500));
        assert_eq!(config.default_service(), ServiceKind::Cleaning);
        assert_eq!(config.base_url()?.path(), "/form");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_path()?, PathBuf::from("/tmp/bookdesk-test.log"));
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[webhook]\nurl = \"https://example.com/hook\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"), "{message}");
        assert!(message.contains("[webhook], [ui], and [log]"), "{message}");
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn webhook_url_must_be_http() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[webhook]\nurl = \"ftp://example.com/hook\"\n")?;
        let error = Config::load(&path).expect_err("ftp url should fail");
        assert!(error.to_string().contains("http or https"));

        let (_temp, path) = write_config("version = 1\n[webhook]\nurl = \"not a url\"\n")?;
        let error = Config::load(&path).expect_err("garbage url should fail");
        assert!(error.to_string().contains("not a valid URL"));
        Ok(())
    }

    #[test]
    fn zero_timeout_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[webhook]\ntimeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn unknown_default_service_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\ndefault_service = \"plumbing\"\n")?;
        let error = Config::load(&path).expect_err("unknown service should fail");
        assert!(error.to_string().contains("ui.default_service"));
        Ok(())
    }

    #[test]
    fn durations_parse_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("30s")?, Duration::from_secs(30));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        assert!(parse_duration("soon").is_err());
        let error = parse_duration("307445734561825861m").expect_err("minutes overflow");
        assert!(error.to_string().contains("too large"));
        assert_eq!(
            parse_duration("307445734561825860m")?,
            Duration::from_secs(307_445_734_561_825_860 * 60)
        );
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_ends_with_config_toml() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("bookdesk/config.toml"), "got {}", path.display());
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("[webhook]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.webhook_timeout()?, Duration::from_secs(30));
        Ok(())
    }
}

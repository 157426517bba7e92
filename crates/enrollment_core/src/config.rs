use std::{fs, io, path::Path, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "funnel.toml";

/// How the enrollment save is dispatched relative to syllabus generation.
///
/// Either way the outcome never reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Spawned on its own task; the handle is dropped and the outcome discarded.
    #[default]
    Detached,
    /// Awaited before generation starts; the outcome is logged and discarded.
    Awaited,
}

impl FromStr for DispatchPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detached" => Ok(Self::Detached),
            "awaited" => Ok(Self::Awaited),
            other => Err(anyhow!("unknown enrollment dispatch policy `{other}`")),
        }
    }
}

/// Whether the waitlist modal confirms before knowing the save succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationPolicy {
    #[default]
    Optimistic,
    RequireSaved,
}

impl FromStr for ConfirmationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Ok(Self::Optimistic),
            "require_saved" | "require-saved" => Ok(Self::RequireSaved),
            other => Err(anyhow!("unknown interest confirmation policy `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Spreadsheet webhook. `None` runs the save collaborator in demo mode.
    pub script_url: Option<Url>,
    pub user_agent: String,
    pub demo_save_delay: Duration,
    pub plan_settle_delay: Duration,
    pub interest_close_delay: Duration,
    pub enrollment_dispatch: DispatchPolicy,
    pub interest_confirmation: ConfirmationPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            script_url: None,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            demo_save_delay: Duration::from_millis(1500),
            plan_settle_delay: Duration::from_millis(800),
            interest_close_delay: Duration::from_millis(2000),
            enrollment_dispatch: DispatchPolicy::default(),
            interest_confirmation: ConfirmationPolicy::default(),
        }
    }
}

impl Settings {
    pub fn is_demo_mode(&self) -> bool {
        self.script_url.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    script_url: Option<String>,
    user_agent: Option<String>,
    demo_save_delay_ms: Option<u64>,
    plan_settle_delay_ms: Option<u64>,
    interest_close_delay_ms: Option<u64>,
    enrollment_dispatch: Option<DispatchPolicy>,
    interest_confirmation: Option<ConfirmationPolicy>,
}

/// Loads `funnel.toml` from the working directory, then applies environment overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<FileSettings>(&raw)
                .with_context(|| format!("invalid settings in '{}'", path.display()))?;
            apply_file_settings(&mut settings, file_cfg)
                .with_context(|| format!("invalid settings in '{}'", path.display()))?;
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!("ignoring unreadable settings file {}: {err}", path.display()),
    }

    if let Some(v) = env("SHEET_SCRIPT_URL") {
        settings.script_url = parse_script_url(&v).context("invalid SHEET_SCRIPT_URL")?;
    }
    if let Some(v) = env("APP__SCRIPT_URL") {
        settings.script_url = parse_script_url(&v).context("invalid APP__SCRIPT_URL")?;
    }

    if let Some(v) = env("APP__USER_AGENT") {
        settings.user_agent = v;
    }

    if let Some(ms) = env_millis(&env, "APP__DEMO_SAVE_DELAY_MS") {
        settings.demo_save_delay = ms;
    }
    if let Some(ms) = env_millis(&env, "APP__PLAN_SETTLE_DELAY_MS") {
        settings.plan_settle_delay = ms;
    }
    if let Some(ms) = env_millis(&env, "APP__INTEREST_CLOSE_DELAY_MS") {
        settings.interest_close_delay = ms;
    }

    if let Some(v) = env("APP__ENROLLMENT_DISPATCH") {
        settings.enrollment_dispatch = v.parse()?;
    }
    if let Some(v) = env("APP__INTEREST_CONFIRMATION") {
        settings.interest_confirmation = v.parse()?;
    }

    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) -> anyhow::Result<()> {
    if let Some(v) = file_cfg.script_url {
        settings.script_url = parse_script_url(&v)?;
    }
    if let Some(v) = file_cfg.user_agent {
        settings.user_agent = v;
    }
    if let Some(ms) = file_cfg.demo_save_delay_ms {
        settings.demo_save_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = file_cfg.plan_settle_delay_ms {
        settings.plan_settle_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = file_cfg.interest_close_delay_ms {
        settings.interest_close_delay = Duration::from_millis(ms);
    }
    if let Some(policy) = file_cfg.enrollment_dispatch {
        settings.enrollment_dispatch = policy;
    }
    if let Some(policy) = file_cfg.interest_confirmation {
        settings.interest_confirmation = policy;
    }
    Ok(())
}

fn env_millis(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = env(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(err) => {
            warn!("ignoring {key}={raw}: {err}");
            None
        }
    }
}

/// An empty value means "no endpoint" (demo mode); anything else must be an http(s) URL.
pub fn parse_script_url(raw: &str) -> anyhow::Result<Option<Url>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(raw).with_context(|| format!("malformed script url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        scheme => Err(anyhow!("unsupported script url scheme '{scheme}'")),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

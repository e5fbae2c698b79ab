//! Application-level configuration loading, including the match fixture.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::SystemTime};

use serde::Deserialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TUCUGOL_BACK_CONFIG_PATH";
/// Home team used when no configuration file is present.
const DEFAULT_TEAM_A: &str = "Atlético Tucumán";
/// Away team used when no configuration file is present.
const DEFAULT_TEAM_B: &str = "San Martín";

/// Immutable runtime configuration shared across the application.
///
/// The fixture (pairing and kickoff) is supplied to the core, never computed
/// by it; defaults mirror the original demo fixture with kickoff at 19:00
/// UTC on the day the server starts.
#[derive(Debug, Clone)]
pub struct AppConfig {
    team_a: String,
    team_b: String,
    match_start: SystemTime,
    seed_demo_play: bool,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in demo fixture.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config = raw.into_config();
                    info!(
                        path = %path.display(),
                        team_a = %config.team_a,
                        team_b = %config.team_b,
                        "loaded fixture from config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Home team name of the configured fixture.
    pub fn team_a(&self) -> &str {
        &self.team_a
    }

    /// Away team name of the configured fixture.
    pub fn team_b(&self) -> &str {
        &self.team_b
    }

    /// Kickoff instant of the configured fixture.
    pub fn match_start(&self) -> SystemTime {
        self.match_start
    }

    /// Whether a demo play is seeded into every fresh login session.
    pub fn seed_demo_play(&self) -> bool {
        self.seed_demo_play
    }

    #[cfg(test)]
    /// Hand-built configuration for tests.
    pub fn for_tests(
        team_a: impl Into<String>,
        team_b: impl Into<String>,
        match_start: SystemTime,
        seed_demo_play: bool,
    ) -> Self {
        Self {
            team_a: team_a.into(),
            team_b: team_b.into(),
            match_start,
            seed_demo_play,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            team_a: DEFAULT_TEAM_A.into(),
            team_b: DEFAULT_TEAM_B.into(),
            match_start: default_kickoff(),
            seed_demo_play: true,
        }
    }
}

/// JSON representation of the configuration file located at
/// [`DEFAULT_CONFIG_PATH`].
#[derive(Debug, Deserialize)]
struct RawConfig {
    fixture: RawFixture,
    #[serde(default = "default_seed_demo_play")]
    seed_demo_play: bool,
}

/// JSON representation of the fixture block inside the configuration file.
#[derive(Debug, Deserialize)]
struct RawFixture {
    team_a: String,
    team_b: String,
    /// Kickoff as an RFC 3339 timestamp.
    kickoff: String,
}

impl RawConfig {
    fn into_config(self) -> AppConfig {
        let match_start = match OffsetDateTime::parse(&self.fixture.kickoff, &Rfc3339) {
            Ok(kickoff) => kickoff.into(),
            Err(err) => {
                warn!(
                    kickoff = %self.fixture.kickoff,
                    error = %err,
                    "invalid kickoff timestamp in config; using the default kickoff"
                );
                default_kickoff()
            }
        };

        AppConfig {
            team_a: self.fixture.team_a,
            team_b: self.fixture.team_b,
            match_start,
            seed_demo_play: self.seed_demo_play,
        }
    }
}

fn default_seed_demo_play() -> bool {
    true
}

/// Kickoff at 19:00 UTC on the current day, matching the demo fixture.
fn default_kickoff() -> SystemTime {
    OffsetDateTime::now_utc()
        .date()
        .with_hms(19, 0, 0)
        .expect("19:00:00 is a valid time of day")
        .assume_utc()
        .into()
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

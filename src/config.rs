/*
 * @file config.rs
 * @brief Runtime configuration loading for Stark
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! `config.json` loading with baked defaults and environment overrides.

use std::{fs, io, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default location of the optional configuration file.
const CONFIG_PATH: &str = "config.json";

/// Environment variable that points at an alternative configuration file.
const CONFIG_PATH_VAR: &str = "STARK_CONFIG";

/// Environment variable overriding the assistant's name.
const NAME_VAR: &str = "STARK_NAME";

/// Environment variable overriding the text-to-speech program.
const TTS_VAR: &str = "STARK_TTS";

/// Name the assistant answers to when nothing else is configured.
const DEFAULT_ASSISTANT_NAME: &str = "Stark";

/// Sentinel `tts_program` value that turns audio off entirely.
const TTS_DISABLED: &str = "none";

/// Strongly typed representation of `config.json`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "fallback_assistant_name")]
    pub assistant_name: String,
    /// Explicit speech program; `None` means auto-detect.
    #[serde(default)]
    pub tts_program: Option<String>,
    #[serde(default)]
    pub pacing: Pacing,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assistant_name: fallback_assistant_name(),
            tts_program: None,
            pacing: Pacing::default(),
        }
    }
}

impl AppConfig {
    /// Reports whether speech output was switched off by configuration.
    pub fn speech_disabled(&self) -> bool {
        self.tts_program
            .as_deref()
            .is_some_and(|program| program.trim().eq_ignore_ascii_case(TTS_DISABLED))
    }
}

/// Fixed delays used throughout a session, in milliseconds.
///
/// # Details
/// Every field defaults independently, so a config file may specify only the
/// delays it wants to change.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Pacing {
    /// Pause after the speech engine finishes an utterance.
    pub post_speech_ms: u64,
    /// Pause standing in for speech when no engine is available.
    pub silent_speech_ms: u64,
    /// Time given to the OS to start a launched application.
    pub launch_settle_ms: u64,
    /// Pause after apologising for an unexpected error.
    pub error_backoff_ms: u64,
    /// Pause between boot sequence steps.
    pub boot_step_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            post_speech_ms: 100,
            silent_speech_ms: 500,
            launch_settle_ms: 1000,
            error_backoff_ms: 2000,
            boot_step_ms: 500,
        }
    }
}

impl Pacing {
    /// Pacing with every delay set to zero.
    pub const fn instant() -> Self {
        Self {
            post_speech_ms: 0,
            silent_speech_ms: 0,
            launch_settle_ms: 0,
            error_backoff_ms: 0,
            boot_step_ms: 0,
        }
    }

    /// Pause after the engine finishes speaking.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `Duration` - `post_speech_ms` as a duration.
    pub fn post_speech(&self) -> Duration {
        Duration::from_millis(self.post_speech_ms)
    }

    /// Pause standing in for speech in text-only sessions.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `Duration` - `silent_speech_ms` as a duration.
    pub fn silent_speech(&self) -> Duration {
        Duration::from_millis(self.silent_speech_ms)
    }

    /// Time allowed for a launched application to start.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `Duration` - `launch_settle_ms` as a duration.
    pub fn launch_settle(&self) -> Duration {
        Duration::from_millis(self.launch_settle_ms)
    }

    /// Pause after apologising for a processing error.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `Duration` - `error_backoff_ms` as a duration.
    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }

    /// Unit pause between boot sequence steps.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `Duration` - `boot_step_ms` as a duration.
    pub fn boot_step(&self) -> Duration {
        Duration::from_millis(self.boot_step_ms)
    }
}

/// Loads the session configuration, falling back to defaults when needed.
///
/// # Details
/// Reads `config.json` (or the file named by `STARK_CONFIG`). A missing file
/// silently yields defaults; an unreadable or malformed one is logged first.
/// `STARK_NAME` and `STARK_TTS` are applied on top of whatever was loaded.
///
/// # Returns
/// * `AppConfig` - The effective configuration.
pub fn load_app_config() -> AppConfig {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| CONFIG_PATH.to_string());
    let config = match load_config_from(Path::new(&path)) {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::debug!("no configuration at {}, using defaults", path);
            AppConfig::default()
        }
        Err(err) => {
            log::warn!("config load error ({}): {:#}", path, err);
            AppConfig::default()
        }
    };
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Reads and parses a configuration file.
///
/// # Arguments
/// * `path` - Location of the JSON file.
///
/// # Returns
/// * `Ok(Some(AppConfig))` - The parsed configuration.
/// * `Ok(None)` - The file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<Option<AppConfig>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()))
        }
    };
    let config = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(config))
}

/// Applies `STARK_NAME` and `STARK_TTS` on top of a loaded configuration.
///
/// # Arguments
/// * `config` - Configuration loaded from disk or defaults.
/// * `lookup` - Variable lookup, normally backed by the process environment.
///
/// # Returns
/// * `AppConfig` - The configuration with non-blank overrides applied.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = non_blank(lookup(NAME_VAR)) {
        config.assistant_name = name;
    }
    if let Some(program) = non_blank(lookup(TTS_VAR)) {
        config.tts_program = Some(program);
    }
    config
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn fallback_assistant_name() -> String {
    DEFAULT_ASSISTANT_NAME.to_string()
}

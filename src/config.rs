use std::env;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::storage::history_file_name;
use crate::wheel::WheelMotion;

const CONFIG_FILE: &str = "config.toml";
const STATE_DIR_NAME: &str = "waktumain";
const EASE_RATE: f64 = 18.0;

#[derive(Debug)]
pub enum ConfigError {
	Io(std::io::Error),
	TomlDecode(toml::de::Error),
}

impl Display for ConfigError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigError::Io(err) => write!(f, "io error: {err}"),
			ConfigError::TomlDecode(err) => write!(f, "failed to parse {CONFIG_FILE}: {err}"),
		}
	}
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionSetting {
	Instant,
	#[default]
	Eased,
}

impl MotionSetting {
	pub fn wheel_motion(self) -> WheelMotion {
		match self {
			MotionSetting::Instant => WheelMotion::Instant,
			MotionSetting::Eased => WheelMotion::Eased { rate: EASE_RATE },
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub default_start: String,
	pub default_end: String,
	pub default_hourly_rate: String,
	pub currency_symbol: String,
	pub wheel_motion: MotionSetting,
	pub log_level: String,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			default_start: "20:30".to_string(),
			default_end: "23:45".to_string(),
			default_hourly_rate: "5000".to_string(),
			currency_symbol: "Rp".to_string(),
			wheel_motion: MotionSetting::Eased,
			log_level: "info".to_string(),
		}
	}
}

/// Reads `config.toml` from the state directory; a missing file yields defaults.
pub fn load_settings(state_dir: &Path) -> Result<Settings, ConfigError> {
	let raw = match fs::read_to_string(state_dir.join(CONFIG_FILE)) {
		Ok(raw) => raw,
		Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
		Err(err) => return Err(ConfigError::Io(err)),
	};

	toml::from_str(&raw).map_err(ConfigError::TomlDecode)
}

pub fn resolve_history_path(cli_path: Option<PathBuf>, state_dir: &Path) -> PathBuf {
	if let Some(path) = cli_path {
		return absolutize(path);
	}

	if let Some(path) = env::var_os("WAKTUMAIN_HISTORY") {
		let path = PathBuf::from(path);
		if !path.as_os_str().is_empty() {
			return absolutize(path);
		}
	}

	state_dir.join(history_file_name())
}

pub fn state_dir() -> PathBuf {
	if let Some(path) = env::var_os("WAKTUMAIN_STATE_DIR") {
		return PathBuf::from(path);
	}

	#[cfg(target_os = "windows")]
	{
		if let Some(path) = env::var_os("LOCALAPPDATA") {
			return PathBuf::from(path).join(STATE_DIR_NAME);
		}
	}

	if let Some(path) = env::var_os("XDG_STATE_HOME") {
		return PathBuf::from(path).join(STATE_DIR_NAME);
	}

	if let Some(path) = env::var_os("HOME") {
		return PathBuf::from(path)
			.join(".local")
			.join("state")
			.join(STATE_DIR_NAME);
	}

	PathBuf::from(".waktumain")
}

fn absolutize(path: PathBuf) -> PathBuf {
	if path.is_absolute() {
		path
	} else if let Ok(cwd) = env::current_dir() {
		cwd.join(path)
	} else {
		path
	}
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::PathBuf;

	use super::{load_settings, resolve_history_path, MotionSetting, Settings};
	use crate::wheel::WheelMotion;

	#[test]
	fn missing_config_uses_defaults() {
		let dir = temp_dir("waktumain_config_missing");
		let settings = load_settings(&dir).expect("missing config is fine");
		assert_eq!(settings, Settings::default());
		assert_eq!(settings.default_start, "20:30");
		assert_eq!(settings.default_hourly_rate, "5000");
	}

	#[test]
	fn partial_config_keeps_remaining_defaults() {
		let dir = temp_dir("waktumain_config_partial");
		fs::create_dir_all(&dir).expect("create temp dir");
		fs::write(
			dir.join("config.toml"),
			"default_hourly_rate = \"7500\"\nwheel_motion = \"instant\"\n",
		)
		.expect("write config");

		let settings = load_settings(&dir).expect("config should parse");
		assert_eq!(settings.default_hourly_rate, "7500");
		assert_eq!(settings.wheel_motion, MotionSetting::Instant);
		assert_eq!(settings.wheel_motion.wheel_motion(), WheelMotion::Instant);
		assert_eq!(settings.currency_symbol, "Rp");
		let _ = fs::remove_dir_all(dir);
	}

	#[test]
	fn invalid_config_is_reported() {
		let dir = temp_dir("waktumain_config_invalid");
		fs::create_dir_all(&dir).expect("create temp dir");
		fs::write(dir.join("config.toml"), "wheel_motion = \"bouncy\"\n").expect("write config");

		let err = load_settings(&dir).expect_err("unknown motion must fail");
		assert!(err.to_string().starts_with("failed to parse config.toml"));
		let _ = fs::remove_dir_all(dir);
	}

	#[test]
	fn cli_history_path_wins() {
		let state_dir = temp_dir("waktumain_config_state");
		let explicit = std::env::temp_dir().join("elsewhere.json");
		assert_eq!(resolve_history_path(Some(explicit.clone()), &state_dir), explicit);
	}

	fn temp_dir(name: &str) -> PathBuf {
		let mut path = std::env::temp_dir();
		path.push(format!("{}_{}", name, std::process::id()));
		path
	}
}

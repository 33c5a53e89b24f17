//! Configuration management for the tone bridge
//!
//! Runtime configuration is loaded from a JSON file so sample rate, telemetry
//! buffer sizes and the method channel name can be adjusted without a rebuild.
//! Missing or malformed files fall back to defaults; loading never fails.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Method channel name the Flutter shells register on both platforms.
pub const DEFAULT_CHANNEL_NAME: &str = "com.example.juce_flutter_app/audio";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
}

/// Parameters handed to the engine factory when a native engine is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Preferred output sample rate in Hz
    pub sample_rate: u32,
    /// Number of output channels to open
    pub output_channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            output_channels: 2,
        }
    }
}

/// Telemetry collector sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Capacity of the broadcast channel feeding live subscribers
    pub channel_capacity: usize,
    /// Number of events retained for snapshots
    pub history_capacity: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 128,
            history_capacity: 64,
        }
    }
}

/// Settings for the platform-facing boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Method channel name registered by the platform shells
    pub channel_name: String,
    /// Log every dispatched command at debug level
    pub log_commands: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            log_commands: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file doesn't exist or the
    /// JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }),
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Parse configuration from a JSON string. Absent sections take defaults.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(contents)?;
        log::info!("[Config] Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration on Android
    ///
    /// Flutter assets live inside the APK and are only reachable through the
    /// AssetManager, so Android uses the built-in defaults.
    #[cfg(target_os = "android")]
    pub fn load_android() -> Self {
        log::info!("[Config] Using default configuration on Android");
        Self::default()
    }

    /// Load configuration for non-Android platforms
    #[cfg(not(target_os = "android"))]
    pub fn load() -> Self {
        Self::load_from_file("assets/tone_config.json")
    }

    /// Load configuration the way the current platform expects
    pub fn load_platform() -> Self {
        #[cfg(target_os = "android")]
        {
            Self::load_android()
        }

        #[cfg(not(target_os = "android"))]
        {
            Self::load()
        }
    }
}

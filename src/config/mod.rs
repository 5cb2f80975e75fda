mod error;
mod parsing;

use std::path::Path;

use serde::Deserialize;

use crate::solver::{AntennaPointing, GeoPosition, SolverConfig};

pub use error::ConfigError;
pub use parsing::{parse_bool, parse_dms, parse_seconds, parse_time};

/// Scalars in config files may be written bare or quoted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    fn as_text(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ObserverSection {
    latitude: String,
    longitude: String,
    #[serde(default)]
    altitude_m: Option<Scalar>,
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    observer: ObserverSection,
    start_time: String,
    end_time: String,
    antenna_elevation: Scalar,
    antenna_azimuth: Scalar,
    antenna_aspect_angle: Scalar,
    #[serde(default)]
    time_step: Option<Scalar>,
    #[serde(default)]
    find_nearest_sat: Option<Scalar>,
    #[serde(default)]
    require_nearest: Option<Scalar>,
}

const DEFAULT_TIME_STEP_SECONDS: f64 = 1.0;

impl SolverConfig {
    /// Read a JSON config, or YAML when the file ends in `.yaml`/`.yml`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let raw: ConfigFile = serde_json::from_str(content)?;
        raw.resolve()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: ConfigFile = serde_yaml::from_str(content)?;
        raw.resolve()
    }
}

impl ConfigFile {
    fn resolve(self) -> Result<SolverConfig, ConfigError> {
        let observer = GeoPosition {
            latitude: parse_dms(&self.observer.latitude)
                .map_err(|e| ConfigError::field("observer.latitude", e))?,
            longitude: parse_dms(&self.observer.longitude)
                .map_err(|e| ConfigError::field("observer.longitude", e))?,
            altitude_m: self
                .observer
                .altitude_m
                .map(|v| number("observer.altitude_m", &v))
                .transpose()?
                .unwrap_or(0.0),
        };

        let antenna = AntennaPointing {
            azimuth_deg: number("antenna_azimuth", &self.antenna_azimuth)?,
            elevation_deg: number("antenna_elevation", &self.antenna_elevation)?,
            aspect_angle_deg: number("antenna_aspect_angle", &self.antenna_aspect_angle)?,
        };

        let time_step = self
            .time_step
            .map(|v| parse_seconds(&v.as_text()).map_err(|e| ConfigError::field("time_step", e)))
            .transpose()?
            .unwrap_or(DEFAULT_TIME_STEP_SECONDS);

        Ok(SolverConfig {
            observer,
            start_time: parse_time(&self.start_time)
                .map_err(|e| ConfigError::field("start_time", e))?,
            end_time: parse_time(&self.end_time).map_err(|e| ConfigError::field("end_time", e))?,
            antenna,
            time_step,
            find_nearest: flag("find_nearest_sat", self.find_nearest_sat, true)?,
            require_nearest: flag("require_nearest", self.require_nearest, false)?,
        })
    }
}

fn number(field: &'static str, value: &Scalar) -> Result<f64, ConfigError> {
    match value {
        Scalar::Number(n) => Ok(*n),
        Scalar::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| ConfigError::field(field, format!("'{}' is not a number", s))),
        Scalar::Bool(b) => Err(ConfigError::field(field, format!("'{}' is not a number", b))),
    }
}

fn flag(field: &'static str, value: Option<Scalar>, default: bool) -> Result<bool, ConfigError> {
    match value {
        None => Ok(default),
        Some(Scalar::Bool(b)) => Ok(b),
        Some(other) => parse_bool(&other.as_text()).map_err(|e| ConfigError::field(field, e)),
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::error::{SimError, SimResult};

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant used by the force model
    pub gravitational_constant: f64,
    /// Softening length added in quadrature to pair distances
    pub softening_length: f64,
    /// Number of snapshots retained for trails (>= 1)
    pub retention_depth: usize,
    /// Simulated time advanced per frame
    pub timestep: f64,
    /// Integration scheme
    pub integrator: IntegratorKind,
    /// Initial particle set
    pub scenario: Scenario,
    /// Random seed for deterministic scenario generation
    pub seed: u64,
    /// Viewer settings
    pub display: DisplayConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            softening_length: SOFTENING,
            retention_depth: HISTORY_DEPTH,
            timestep: DT,
            integrator: IntegratorKind::Euler,
            scenario: Scenario::OrbitingPair,
            seed: DEFAULT_SEED,
            display: DisplayConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> SimResult<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.retention_depth < 1 {
            return Err(SimError::InvalidRetentionDepth(self.retention_depth));
        }
        if !self.gravitational_constant.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "gravitational_constant must be finite, got {}",
                self.gravitational_constant
            )));
        }
        if !(self.softening_length.is_finite() && self.softening_length > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "softening_length must be > 0, got {}",
                self.softening_length
            )));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "timestep must be > 0, got {}",
                self.timestep
            )));
        }
        if self.display.refresh_rate == 0 {
            return Err(SimError::InvalidConfig("refresh_rate must be > 0".into()));
        }
        if !(self.display.spawn_mass.is_finite() && self.display.spawn_mass > 0.0) {
            return Err(SimError::InvalidMass(self.display.spawn_mass));
        }
        self.scenario.validate()
    }
}

/// Integration scheme selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorKind {
    /// In-place semi-implicit Euler (velocity first, then position)
    Euler,
    /// Synchronized kick-drift-kick velocity Verlet
    Leapfrog,
}

impl IntegratorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euler => "Euler",
            Self::Leapfrog => "Leapfrog",
        }
    }
}

/// Initial particle set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scenario {
    /// No particles; everything comes from the viewer
    Empty,
    /// A heavy body with a light companion on a near-circular orbit
    OrbitingPair,
    /// Light particles on circular orbits around a heavy center
    Disk {
        count: u32,
        radius: f64,
        central_mass: f64,
        particle_mass: f64,
    },
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::OrbitingPair => "Orbiting pair",
            Self::Disk { .. } => "Disk",
        }
    }

    fn validate(&self) -> SimResult<()> {
        if let Self::Disk {
            radius,
            central_mass,
            particle_mass,
            ..
        } = *self
        {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "disk radius must be > 0, got {radius}"
                )));
            }
            for mass in [central_mass, particle_mass] {
                if !(mass.is_finite() && mass > 0.0) {
                    return Err(SimError::InvalidMass(mass));
                }
            }
        }
        Ok(())
    }
}

/// Viewer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Simulated frames per real second
    pub refresh_rate: u32,
    /// Keep the camera centered on the center of mass
    pub track_center_of_mass: bool,
    /// Mass of particles spawned with the right mouse button
    pub spawn_mass: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            refresh_rate: WINDOW_REFRESH_RATE,
            track_center_of_mass: true,
            spawn_mass: SPAWN_MASS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retention_depth, 100);
        assert_eq!(config.gravitational_constant, 10.0);
        assert_eq!(config.softening_length, 5.0);
        assert_eq!(config.timestep, 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json_str(
            r#"{ "retention_depth": 60, "integrator": "leapfrog", "display": { "width": 800 } }"#,
        )
        .unwrap();
        assert_eq!(config.retention_depth, 60);
        assert_eq!(config.integrator, IntegratorKind::Leapfrog);
        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.height, WINDOW_HEIGHT);
        assert_eq!(config.gravitational_constant, G);
        assert_eq!(config.scenario, Scenario::OrbitingPair);
    }

    #[test]
    fn test_disk_scenario_json() {
        let config = SimConfig::from_json_str(
            r#"{ "scenario": { "kind": "disk", "count": 50, "radius": 300.0,
                 "central_mass": 500.0, "particle_mass": 1.0 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.scenario,
            Scenario::Disk {
                count: 50,
                radius: 300.0,
                central_mass: 500.0,
                particle_mass: 1.0,
            }
        );
    }

    #[test]
    fn test_zero_retention_depth_rejected() {
        let err = SimConfig::from_json_str(r#"{ "retention_depth": 0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidRetentionDepth(0)));
    }

    #[test]
    fn test_bad_softening_rejected() {
        let config = SimConfig {
            softening_length: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_disk_mass_rejected() {
        let config = SimConfig {
            scenario: Scenario::Disk {
                count: 10,
                radius: 100.0,
                central_mass: -1.0,
                particle_mass: 1.0,
            },
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidMass(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }
}

//! Scenario parameters for the three questions.
//!
//! Defaults describe Team2 on de_overpass: the light blue choke point on
//! T side and Bombsite B. A JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::heatmap::{HeatmapQuery, DEFAULT_BINS, MAX_BINS};
use crate::analysis::timing::{Coincidence, TimingQuery};
use crate::types::game::{Side, WEAPON_CLASS_RIFLE, WEAPON_CLASS_SMG};
use crate::types::math::{Polygon, ZBand};
use crate::types::TypeError;

pub const DEFAULT_TEAM: &str = "Team2";
pub const DEFAULT_AREA: &str = "BombsiteB";
pub const DEFAULT_CHOKE_POINT: [(f64, f64); 5] = [
    (-1735.0, 250.0),
    (-2024.0, 398.0),
    (-2806.0, 742.0),
    (-2472.0, 1233.0),
    (-1565.0, 580.0),
];

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scenario file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] TypeError),
    #[error("heatmap needs at least one bin")]
    NoBins,
    #[error("heatmap bins {0} exceed the maximum of {}", MAX_BINS)]
    TooManyBins(usize),
    #[error("minimum player count must be at least 1")]
    NoPlayers,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub team: String,
    /// Side for the entry rate and weapon timing questions.
    pub attack_side: Side,
    /// Side for the heatmap.
    pub defend_side: Side,
    pub choke_point: Polygon,
    pub z_band: ZBand,
    pub area: String,
    pub weapon_classes: Vec<String>,
    pub min_players: usize,
    pub coincidence: Coincidence,
    pub heatmap_bins: usize,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            team: DEFAULT_TEAM.to_string(),
            attack_side: Side::T,
            defend_side: Side::CT,
            choke_point: default_choke_point(),
            z_band: ZBand::default(),
            area: DEFAULT_AREA.to_string(),
            weapon_classes: vec![WEAPON_CLASS_SMG.to_string(), WEAPON_CLASS_RIFLE.to_string()],
            min_players: 2,
            coincidence: Coincidence::default(),
            heatmap_bins: DEFAULT_BINS,
        }
    }
}

fn default_choke_point() -> Polygon {
    match Polygon::new(DEFAULT_CHOKE_POINT) {
        Ok(polygon) => polygon,
        Err(_) => unreachable!("default choke point has five vertices"),
    }
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading scenario: {:?}", path);
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Polygons are checked while deserialising; the rest is checked here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ZBand::new(self.z_band.lower, self.z_band.upper)?;
        if self.heatmap_bins == 0 {
            return Err(ConfigError::NoBins);
        }
        if self.heatmap_bins > MAX_BINS {
            return Err(ConfigError::TooManyBins(self.heatmap_bins));
        }
        if self.min_players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        Ok(())
    }

    pub fn timing_query(&self) -> TimingQuery<'_> {
        TimingQuery {
            team: &self.team,
            side: self.attack_side,
            area: &self.area,
            weapon_classes: &self.weapon_classes,
            min_players: self.min_players,
            coincidence: self.coincidence,
        }
    }

    pub fn heatmap_query(&self) -> HeatmapQuery<'_> {
        HeatmapQuery {
            team: &self.team,
            side: self.defend_side,
            area: &self.area,
            bins: self.heatmap_bins,
        }
    }
}

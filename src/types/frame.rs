use serde::{Deserialize, Serialize};

use super::game::{has_weapon, InventoryItem, Side};
use super::math::Vector;
use super::clock::clock_time_to_seconds;
use super::TypeError;

/// One row of the match telemetry table: a single player at a single
/// instant of a round.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FrameRow {
    pub round_num: u32,
    pub side: Side,
    pub team: String,
    pub player: String,
    pub area_name: String,
    pub map_name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Time left in the round, "M:SS".
    pub clock_time: String,
    #[serde(default)]
    pub inventory: Option<Vec<InventoryItem>>,
}

impl FrameRow {
    pub fn position(&self) -> Vector {
        Vector::new(self.x, self.y, self.z)
    }

    pub fn seconds_remaining(&self) -> Result<u32, TypeError> {
        clock_time_to_seconds(&self.clock_time)
    }

    pub fn is_team_side(&self, team: &str, side: Side) -> bool {
        self.side == side && self.team == team
    }

    pub fn carries_any<S: AsRef<str>>(&self, classes: &[S]) -> bool {
        has_weapon(self.inventory.as_deref(), classes)
    }
}

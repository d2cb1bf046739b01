//! # Analysis
//!
//! Everything computed from a loaded telemetry table.
//!
//! [`area`] decides whether a sample stands inside a map zone.
//! [`entry`] rates how often a team enters a zone on a side.
//! [`timing`] averages the clock time a team reaches an area armed.
//! [`heatmap`] collects round-start defensive positions.

pub mod area;
pub mod entry;
pub mod timing;
pub mod heatmap;

use crate::types::frame::FrameRow;
use crate::types::game::Side;
use crate::types::math::{Polygon, Vector, ZBand};
use crate::types::TypeError;

use self::entry::EntryRate;
use self::heatmap::{DefenseHeatmap, HeatmapQuery};
use self::timing::{TimingQuery, WeaponEntryTiming};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Rates and averages over nothing are refused instead of dividing by zero.
    #[error("no qualifying {0} to aggregate")]
    EmptyAggregate(&'static str),
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// A loaded telemetry table. Each question filters it afresh.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    rows: Vec<FrameRow>,
}

impl From<Vec<FrameRow>> for GameState {
    fn from(rows: Vec<FrameRow>) -> Self {
        GameState { rows }
    }
}

impl GameState {
    pub fn rows(&self) -> &[FrameRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Membership flag for every row, in row order.
    pub fn in_area(&self, polygon: &Polygon, band: ZBand) -> Vec<bool> {
        let points: Vec<Vector> = self.rows.iter().map(FrameRow::position).collect();
        let column = area::membership_column(polygon, &points, band);

        log::debug!("{} of {} rows inside area", column.iter().filter(|f| **f).count(), column.len());
        column
    }

    pub fn entry_rate(
        &self,
        polygon: &Polygon,
        band: ZBand,
        team: &str,
        side: Side,
    ) -> Result<EntryRate, AnalysisError> {
        let in_area = self.in_area(polygon, band);
        entry::entry_rate(&self.rows, &in_area, team, side)
    }

    pub fn weapon_entry_timing(&self, query: &TimingQuery) -> Result<WeaponEntryTiming, AnalysisError> {
        timing::weapon_entry_timing(&self.rows, query)
    }

    pub fn defense_heatmap(&self, query: &HeatmapQuery) -> Result<DefenseHeatmap, AnalysisError> {
        heatmap::defense_heatmap(&self.rows, query)
    }
}

//! Round-start positions of a defending team, as density data for a
//! renderer to draw over the map image.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::types::frame::FrameRow;
use crate::types::game::Side;

use super::AnalysisError;

pub const DEFAULT_BINS: usize = 32;
/// The grid is `bins * bins` cells; anything past this is clamped.
pub const MAX_BINS: usize = 1024;

#[derive(Debug, Clone)]
pub struct HeatmapQuery<'a> {
    pub team: &'a str,
    pub side: Side,
    pub area: &'a str,
    pub bins: usize,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct HeatPoint {
    pub x: f64,
    pub y: f64,
    pub count: u32,
}

/// Extent of the counted positions. A renderer stretches the map image
/// over it.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    fn of(points: &[HeatPoint]) -> Option<Self> {
        let (min_x, max_x) = points.iter().map(|p| OrderedFloat(p.x)).minmax().into_option()?;
        let (min_y, max_y) = points.iter().map(|p| OrderedFloat(p.y)).minmax().into_option()?;
        Some(Extent { min_x: *min_x, max_x: *max_x, min_y: *min_y, max_y: *max_y })
    }

    /// Bin of `value` in `[min, max]` split `bins` ways.
    fn bin(value: f64, min: f64, max: f64, bins: usize) -> usize {
        if max <= min {
            return 0;
        }
        let idx = ((value - min) / (max - min) * bins as f64) as usize;
        idx.min(bins - 1)
    }
}

/// Counts over the extent. `counts[row][col]`, row 0 at `min_y`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DensityGrid {
    pub bins: usize,
    pub counts: Vec<Vec<u32>>,
}

impl DensityGrid {
    fn build(points: &[HeatPoint], extent: &Extent, bins: usize) -> Self {
        let bins = bins.clamp(1, MAX_BINS);
        let mut counts = vec![vec![0u32; bins]; bins];

        for p in points {
            let col = Extent::bin(p.x, extent.min_x, extent.max_x, bins);
            let row = Extent::bin(p.y, extent.min_y, extent.max_y, bins);
            counts[row][col] += p.count;
        }

        DensityGrid { bins, counts }
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DefenseHeatmap {
    pub team: String,
    pub side: Side,
    pub area: String,
    pub rounds: usize,
    pub points: Vec<HeatPoint>,
    pub extent: Extent,
    pub grid: DensityGrid,
}

/// Positions of `team` on `side` in `area` at the start of each round,
/// the start being every row at that round's highest clock reading.
pub fn defense_heatmap(rows: &[FrameRow], query: &HeatmapQuery) -> Result<DefenseHeatmap, AnalysisError> {
    let candidates: Vec<(&FrameRow, u32)> = rows
        .iter()
        .filter(|r| r.is_team_side(query.team, query.side) && r.area_name == query.area)
        .map(|r| r.seconds_remaining().map(|s| (r, s)))
        .collect::<Result<_, _>>()?;

    let round_start: HashMap<u32, u32> = candidates
        .iter()
        .map(|(r, s)| (r.round_num, *s))
        .into_grouping_map()
        .max();

    let mut counts = BTreeMap::<(OrderedFloat<f64>, OrderedFloat<f64>), u32>::new();
    for (row, _) in candidates.iter().filter(|(r, s)| round_start.get(&r.round_num) == Some(s)) {
        *counts.entry((OrderedFloat(row.x), OrderedFloat(row.y))).or_default() += 1;
    }

    let points: Vec<HeatPoint> = counts
        .into_iter()
        .map(|((x, y), count)| HeatPoint { x: x.0, y: y.0, count })
        .collect();

    let extent = Extent::of(&points).ok_or(AnalysisError::EmptyAggregate("round-start positions"))?;
    let grid = DensityGrid::build(&points, &extent, query.bins);

    log::info!("heatmap over {} rounds, {} distinct positions", round_start.len(), points.len());

    Ok(DefenseHeatmap {
        team: query.team.to_string(),
        side: query.side,
        area: query.area.to_string(),
        rounds: round_start.len(),
        points,
        extent,
        grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{at, row};

    fn query() -> HeatmapQuery<'static> {
        HeatmapQuery { team: "Team2", side: Side::CT, area: "BombsiteB", bins: 4 }
    }

    #[test]
    fn keeps_round_start_snapshot_only() {
        let rows = vec![
            at(row(1, Side::CT, "Player6", "1:55"), -1000.0, 200.0),
            at(row(1, Side::CT, "Player7", "1:55"), -1100.0, 300.0),
            at(row(1, Side::CT, "Player6", "1:50"), -500.0, 900.0),
            at(row(2, Side::CT, "Player6", "1:54"), -1000.0, 200.0),
            at(row(2, Side::CT, "Player6", "1:30"), -500.0, 900.0),
            // attacking side is not part of the defense
            at(row(2, Side::T, "Player1", "1:54"), -400.0, 100.0),
        ];

        let map = defense_heatmap(&rows, &query()).unwrap();
        assert_eq!(map.rounds, 2);
        assert_eq!(map.points, vec![
            HeatPoint { x: -1100.0, y: 300.0, count: 1 },
            HeatPoint { x: -1000.0, y: 200.0, count: 2 },
        ]);
        assert_eq!(map.extent, Extent { min_x: -1100.0, max_x: -1000.0, min_y: 200.0, max_y: 300.0 });
        assert_eq!(map.grid.total(), 3);
        assert_eq!(map.grid.counts[0][3], 2);
        assert_eq!(map.grid.counts[3][0], 1);
    }

    #[test]
    fn single_position_lands_in_first_bin() {
        let rows = vec![at(row(1, Side::CT, "Player6", "1:55"), 5.0, 5.0)];
        let map = defense_heatmap(&rows, &query()).unwrap();
        assert_eq!(map.grid.counts[0][0], 1);
    }

    #[test]
    fn nearby_positions_stay_distinct() {
        // a hundredth of a millimetre apart at a coordinate of -1000
        let rows = vec![
            at(row(1, Side::CT, "Player6", "1:55"), -1000.00001, 200.0),
            at(row(1, Side::CT, "Player7", "1:55"), -1000.00002, 200.0),
        ];
        let map = defense_heatmap(&rows, &query()).unwrap();
        assert_eq!(map.points.len(), 2);
        assert!(map.points.iter().all(|p| p.count == 1));
        assert_eq!(map.extent.min_x, -1000.00002);
    }

    #[test]
    fn oversized_grid_is_clamped() {
        let rows = vec![at(row(1, Side::CT, "Player6", "1:55"), 1.0, 2.0)];
        let query = HeatmapQuery { bins: usize::MAX, ..query() };
        let map = defense_heatmap(&rows, &query).unwrap();
        assert_eq!(map.grid.bins, MAX_BINS);
        assert_eq!(map.grid.counts.len(), MAX_BINS);
        assert_eq!(map.grid.total(), 1);
    }

    #[test]
    fn nothing_to_plot_is_empty_aggregate() {
        let rows = vec![row(1, Side::T, "Player1", "1:55")];
        assert_eq!(
            defense_heatmap(&rows, &query()),
            Err(AnalysisError::EmptyAggregate("round-start positions"))
        );
    }

    #[test]
    fn serialises_for_a_renderer() {
        let rows = vec![at(row(1, Side::CT, "Player6", "1:55"), 1.0, 2.0)];
        let json = serde_json::to_value(defense_heatmap(&rows, &query()).unwrap()).unwrap();
        assert_eq!(json["side"], "CT");
        assert_eq!(json["points"][0]["count"], 1);
        assert_eq!(json["grid"]["bins"], 4);
    }
}

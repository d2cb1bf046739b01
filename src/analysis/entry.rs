use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::types::frame::FrameRow;
use crate::types::game::Side;

use super::AnalysisError;

/// Share of rounds at or above which entering counts as a common strategy.
pub const COMMON_STRATEGY_RATE: f64 = 0.5;

/// How often a team had at least one player inside an area on a side.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRate {
    pub team: String,
    pub side: Side,
    pub rounds_entered: usize,
    pub total_rounds: usize,
    pub rate: f64,
}

impl EntryRate {
    pub fn is_common(&self) -> bool {
        self.rate >= COMMON_STRATEGY_RATE
    }
}

/// Rounds (by `round_num`) with a flagged row for `team` on `side`, over
/// every round the team played that side. `in_area` runs parallel to `rows`.
pub fn entry_rate(
    rows: &[FrameRow],
    in_area: &[bool],
    team: &str,
    side: Side,
) -> Result<EntryRate, AnalysisError> {
    let played = || rows.iter().zip(in_area).filter(|(r, _)| r.is_team_side(team, side));

    let total_rounds = played().map(|(r, _)| r.round_num).unique().count();
    if total_rounds == 0 {
        return Err(AnalysisError::EmptyAggregate("rounds played"));
    }

    let rounds_entered = played()
        .filter(|(_, flagged)| **flagged)
        .map(|(r, _)| r.round_num)
        .unique()
        .count();

    log::info!("{team} as {side}: entered in {rounds_entered} of {total_rounds} rounds");

    Ok(EntryRate {
        team: team.to_string(),
        side,
        rounds_entered,
        total_rounds,
        rate: rounds_entered as f64 / total_rounds as f64,
    })
}

impl Display for EntryRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "***** Entry rate *****")?;
        writeln!(f)?;
        writeln!(f, "Out of {} total rounds {} played as {}, {} had at least one player within the given area.",
            self.total_rounds, self.team, self.side, self.rounds_entered)?;
        writeln!(f)?;
        writeln!(f, "{} / {} = {:.2}%", self.rounds_entered, self.total_rounds, self.rate * 100.0)?;
        writeln!(f)?;
        write!(f, "Entering via this area {} a common strategy for {} on {} side.",
            if self.is_common() { "is" } else { "is not" }, self.team, self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::row;

    #[test]
    fn one_of_four_rounds() {
        let mut rows = Vec::new();
        let mut flags = Vec::new();
        for round in 1..=4 {
            for player in ["Player1", "Player2"] {
                rows.push(row(round, Side::T, player, "1:30"));
                flags.push(round == 3 && player == "Player2");
            }
        }
        // other side and other teams do not count
        rows.push(row(5, Side::CT, "Player1", "1:30"));
        flags.push(true);
        let mut other = row(6, Side::T, "Player9", "1:30");
        other.team = "Team1".into();
        rows.push(other);
        flags.push(true);

        let rate = entry_rate(&rows, &flags, "Team2", Side::T).unwrap();
        assert_eq!(rate.total_rounds, 4);
        assert_eq!(rate.rounds_entered, 1);
        assert_eq!(rate.rate, 0.25);
        assert!(!rate.is_common());
        assert!(rate.to_string().contains("1 / 4 = 25.00%"));
    }

    #[test]
    fn repeated_entries_count_once() {
        let rows = vec![
            row(1, Side::T, "Player1", "1:30"),
            row(1, Side::T, "Player1", "1:29"),
            row(2, Side::T, "Player1", "1:30"),
        ];
        let rate = entry_rate(&rows, &[true, true, false], "Team2", Side::T).unwrap();
        assert_eq!(rate.rounds_entered, 1);
        assert_eq!(rate.total_rounds, 2);
        assert!(rate.is_common());
    }

    #[test]
    fn no_rounds_is_empty_aggregate() {
        let rows = vec![row(1, Side::CT, "Player1", "1:30")];
        assert_eq!(
            entry_rate(&rows, &[true], "Team2", Side::T),
            Err(AnalysisError::EmptyAggregate("rounds played"))
        );
    }
}

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::types::clock::seconds_to_clock_time;
use crate::types::frame::FrameRow;
use crate::types::game::Side;

use super::AnalysisError;

/// What counts as players being in the area "together".
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Coincidence {
    /// Same round and same clock reading.
    #[default]
    SameTick,
    /// Anywhere in the same round.
    SameRound,
}

#[derive(Debug, Clone)]
pub struct TimingQuery<'a> {
    pub team: &'a str,
    pub side: Side,
    pub area: &'a str,
    pub weapon_classes: &'a [String],
    pub min_players: usize,
    pub coincidence: Coincidence,
}

/// Average clock time at which a team reaches an area with enough
/// players carrying a qualifying weapon.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponEntryTiming {
    pub team: String,
    pub side: Side,
    pub area: String,
    /// (round, seconds remaining at the earliest qualifying moment)
    pub rounds: Vec<(u32, u32)>,
    pub average_seconds: u32,
}

impl WeaponEntryTiming {
    pub fn average_clock_time(&self) -> String {
        seconds_to_clock_time(self.average_seconds)
    }
}

pub fn weapon_entry_timing(rows: &[FrameRow], query: &TimingQuery) -> Result<WeaponEntryTiming, AnalysisError> {
    // (round, seconds) -> players seen armed in the area at that moment
    let mut moments = BTreeMap::<(u32, u32), BTreeSet<&str>>::new();

    for row in rows.iter().filter(|r| {
        r.is_team_side(query.team, query.side)
            && r.area_name == query.area
            && r.carries_any(query.weapon_classes)
    }) {
        let seconds = row.seconds_remaining()?;
        moments.entry((row.round_num, seconds)).or_default().insert(&row.player);
    }

    // round -> (players, latest clock reading); BTreeMap keeps rounds ordered
    let mut per_round = BTreeMap::<u32, (BTreeSet<&str>, u32)>::new();
    let mut qualifying = BTreeMap::<u32, u32>::new();

    for ((round, seconds), players) in &moments {
        match query.coincidence {
            Coincidence::SameTick => {
                if players.len() >= query.min_players {
                    let best = qualifying.entry(*round).or_insert(*seconds);
                    *best = u32::max(*best, *seconds);
                }
            }
            Coincidence::SameRound => {
                let (seen, best) = per_round.entry(*round).or_insert_with(|| (BTreeSet::new(), *seconds));
                seen.extend(players.iter().copied());
                *best = u32::max(*best, *seconds);
            }
        }
    }

    qualifying.extend(
        per_round
            .into_iter()
            .filter(|(_, (seen, _))| seen.len() >= query.min_players)
            .map(|(round, (_, best))| (round, best)),
    );

    if qualifying.is_empty() {
        return Err(AnalysisError::EmptyAggregate("rounds"));
    }

    let total: u64 = qualifying.values().map(|s| u64::from(*s)).sum();
    let average_seconds = (total / qualifying.len() as u64) as u32;

    log::info!("{} qualifying rounds, average {}s remaining", qualifying.len(), average_seconds);

    Ok(WeaponEntryTiming {
        team: query.team.to_string(),
        side: query.side,
        area: query.area.to_string(),
        rounds: qualifying.into_iter().collect(),
        average_seconds,
    })
}

impl Display for WeaponEntryTiming {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "***** Weapon entry timing *****")?;
        writeln!(f)?;
        write!(f, "{} on {} side enters {:?} armed at an average of {} on the in-game clock ({} rounds).",
            self.team, self.side, self.area, self.average_clock_time(), self.rounds.len())
    }
}

//! Round clock strings ("M:SS") and whole seconds.

use super::TypeError;

/// "M:SS" to seconds remaining.
pub fn clock_time_to_seconds(clock_time: &str) -> Result<u32, TypeError> {
    let malformed = || TypeError::MalformedClock(clock_time.to_string());

    let (minutes, seconds) = clock_time.trim().split_once(':').ok_or_else(malformed)?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
    let seconds: u32 = seconds.parse().map_err(|_| malformed())?;

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(malformed)
}

/// Seconds back to a clock string. Seconds are not zero padded, so
/// 65 renders as "1:5".
pub fn seconds_to_clock_time(seconds: u32) -> String {
    format!("{}:{}", seconds / 60, seconds % 60)
}

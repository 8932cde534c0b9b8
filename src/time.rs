//! Time arithmetic over `"HH:MM"` strings. The only code in the crate permitted to
//! do numeric reasoning about time; every higher layer goes through these functions.

/// Length of one scheduling block, in minutes.
pub const BLOCK_DURATION_MINUTES: u32 = 180;

/// The latest a block may end.
pub const END_TIME_LIMIT: &str = "18:00";

/// Working minutes in one day (09:00-18:00). Used as the per-(room,day) utilization
/// denominator in the objective's utilization-bonus term (spec §4.3).
pub const DAILY_WORKING_MINUTES: u32 = 540;

/// Parses `"HH:MM"` into minutes since midnight.
pub fn minutes_of(time_str: &str) -> u32 {
    let (h, m) = time_str
        .split_once(':')
        .unwrap_or_else(|| panic!("malformed time string: {time_str}"));
    let h: u32 = h.parse().unwrap_or_else(|_| panic!("malformed time string: {time_str}"));
    let m: u32 = m.parse().unwrap_or_else(|_| panic!("malformed time string: {time_str}"));
    h * 60 + m
}

/// Formats minutes since midnight as zero-padded `"HH:MM"`.
pub fn time_of(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// End of the 3-hour block starting at `start`.
pub fn end_of_block(start: &str) -> String {
    time_of(minutes_of(start) + BLOCK_DURATION_MINUTES)
}

/// True iff a block starting at `start` ends no later than [`END_TIME_LIMIT`].
pub fn is_valid_start(start: &str) -> bool {
    minutes_of(&end_of_block(start)) <= minutes_of(END_TIME_LIMIT)
}

/// Half-open interval overlap test: `true` iff `¬(a2 <= b1 ∨ b2 <= a1)`.
pub fn overlaps(a1: &str, a2: &str, b1: &str, b2: &str) -> bool {
    let (a1, a2, b1, b2) = (minutes_of(a1), minutes_of(a2), minutes_of(b1), minutes_of(b2));
    !(a2 <= b1 || b2 <= a1)
}

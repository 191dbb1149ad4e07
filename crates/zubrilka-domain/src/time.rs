//! Wall-clock helper shared by record constructors

use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in whole seconds
///
/// Falls back to 0 if the system clock reads before the epoch rather
/// than panicking inside record constructors.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

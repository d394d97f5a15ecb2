//! Test-only helpers for constructing rosters.

use crate::core::participant::Participant;

/// Participant with an explicit polled count and zeroed outcome counters.
pub fn participant(name: &str, polled: u32) -> Participant {
    Participant {
        polled,
        ..Participant::new(name)
    }
}

/// Roster of `count` zeroed participants named `p0`, `p1`, ...
pub fn roster_of(count: usize) -> Vec<Participant> {
    (0..count).map(|n| Participant::new(format!("p{n}"))).collect()
}

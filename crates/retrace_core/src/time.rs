//! Recording time and the visible zoom window.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A timestamp in the recording's own clock, in milliseconds.
///
/// Unit-less as far as the engine is concerned; only ordering and
/// differences matter. Wall-clock time is a separate notion and lives
/// behind the [`Clock`](crate::Clock) interface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Time(u64);

impl Time {
    pub const ZERO: Time = Time(0);

    pub const fn from_ms(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_ms(self) -> u64 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, zero if `earlier` is later.
    pub const fn since(self, earlier: Time) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// The currently visible window of the recording.
///
/// Owned by the host UI, read-only to the engine. Playback and pixel
/// mapping clamp to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomRegion {
    pub start: Time,
    pub end: Time,
}

impl ZoomRegion {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Zero-width window: nothing to play, all positions map to the origin.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    pub fn duration_ms(self) -> u64 {
        self.end.since(self.start)
    }

    pub fn contains(self, time: Time) -> bool {
        self.start <= time && time <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_saturates() {
        assert_eq!(Time::from_ms(500).since(Time::from_ms(200)), 300);
        assert_eq!(Time::from_ms(200).since(Time::from_ms(500)), 0);
    }

    #[test]
    fn zoom_region_bounds() {
        let zoom = ZoomRegion::new(Time::from_ms(100), Time::from_ms(400));
        assert!(!zoom.is_empty());
        assert_eq!(zoom.duration_ms(), 300);
        assert!(zoom.contains(Time::from_ms(100)));
        assert!(zoom.contains(Time::from_ms(400)));
        assert!(!zoom.contains(Time::from_ms(401)));

        assert!(ZoomRegion::new(Time::from_ms(5), Time::from_ms(5)).is_empty());
    }
}

//! Pure queries over the sparse checkpoint grid.
//!
//! The event list is supplied by the caller per query, already ordered by
//! time (stable order within equal times), and is never mutated here. All
//! lookups are binary searches over that ordering.

use retrace_core::{CheckpointEvent, Time};

/// Borrowed query view over a time-ordered checkpoint slice.
#[derive(Clone, Copy, Debug)]
pub struct CheckpointIndex<'a> {
    events: &'a [CheckpointEvent],
}

impl<'a> CheckpointIndex<'a> {
    pub fn new(events: &'a [CheckpointEvent]) -> Self {
        Self { events }
    }

    /// Last event at or before `time`.
    ///
    /// Among events tied at that boundary time, a paint wins over a mouse
    /// update: seeks want to land on a stable visual checkpoint.
    pub fn most_recent_at_or_before(&self, time: Time) -> Option<&'a CheckpointEvent> {
        let end = self.events.partition_point(|event| event.time <= time);
        let last = end.checked_sub(1)?;

        let boundary = self.events[last].time;
        let start = self.events[..end].partition_point(|event| event.time < boundary);
        self.events[start..end]
            .iter()
            .find(|event| event.kind.is_paint())
            .or(Some(&self.events[last]))
    }

    /// First event strictly after `time`.
    pub fn next_after(&self, time: Time) -> Option<&'a CheckpointEvent> {
        let idx = self.events.partition_point(|event| event.time <= time);
        self.events.get(idx)
    }

    /// Last event strictly before `time`.
    pub fn previous_before(&self, time: Time) -> Option<&'a CheckpointEvent> {
        let idx = self.events.partition_point(|event| event.time < time);
        self.events.get(idx.checked_sub(1)?)
    }

    /// Next event worth a playback frame.
    ///
    /// Mouse updates within `min_gap_ms` of `time` are skipped so playback
    /// is not flooded with near-duplicate frames between real paints.
    /// Paints are never skipped.
    pub fn next_playback_candidate(
        &self,
        time: Time,
        min_gap_ms: u64,
    ) -> Option<&'a CheckpointEvent> {
        let cutoff = time.as_ms().saturating_add(min_gap_ms);

        let mut next = self.next_after(time);
        while let Some(event) = next {
            if event.kind.is_mouse() && event.time.as_ms() < cutoff {
                next = self.next_after(event.time);
            } else {
                break;
            }
        }
        next
    }
}

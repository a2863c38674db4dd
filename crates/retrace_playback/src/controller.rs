//! Seek/step/play orchestration over the scheduler and host.

use std::sync::Arc;

use retrace_core::{CheckpointEvent, ExecutionPoint, Host, Time, ZoomRegion};

use crate::checkpoints::CheckpointIndex;
use crate::mapper;
use crate::scheduler::PlaybackScheduler;

/// Translates user intents on the timeline into engine and host calls.
///
/// Holds no state of its own; the checkpoint list arrives per call as a
/// read-only snapshot, the same way the scheduler receives it.
pub struct SeekController {
    scheduler: Arc<PlaybackScheduler>,
    host: Arc<dyn Host>,
}

impl SeekController {
    pub fn new(scheduler: Arc<PlaybackScheduler>, host: Arc<dyn Host>) -> Self {
        Self { scheduler, host }
    }

    /// Seek to a precise execution point.
    ///
    /// Seeks and playback are mutually exclusive, so any live session is
    /// cancelled first.
    pub fn seek_to_point(&self, point: &ExecutionPoint, time: Time, has_frames: bool) {
        self.scheduler.cancel();
        self.host.seek(point, time, has_frames);
    }

    /// Seek to an arbitrary time on the timeline.
    ///
    /// Seeks to the exact time requested even when it does not line up
    /// with a checkpoint, using the most recent checkpoint's execution
    /// point. Resumes done downstream are then relative to that point
    /// rather than the displayed time; stepping relies on this, so it
    /// stays.
    pub fn seek_to_time(&self, events: &[CheckpointEvent], time: Time) {
        let index = CheckpointIndex::new(events);
        if let Some(event) = index.most_recent_at_or_before(time) {
            self.seek_to_point(&event.point, time, false);
        }
    }

    /// Seek from a click on the timeline bar.
    pub fn seek_to_pixel(
        &self,
        events: &[CheckpointEvent],
        click_x: f64,
        left: f64,
        width: f64,
        zoom: ZoomRegion,
    ) {
        let time = mapper::time_from_pixel(click_x, left, width, zoom);
        self.seek_to_time(events, time);
    }

    /// Step to the previous checkpoint, clamped to the zoom start.
    pub fn step_backward(&self, events: &[CheckpointEvent], current_time: Time, zoom: ZoomRegion) {
        if current_time == zoom.start {
            return;
        }

        let index = CheckpointIndex::new(events);
        let Some(previous) = index.previous_before(current_time) else {
            return;
        };
        self.seek_to_time(events, previous.time.max(zoom.start));
    }

    /// Step to the next checkpoint, clamped to the zoom end.
    pub fn step_forward(&self, events: &[CheckpointEvent], current_time: Time, zoom: ZoomRegion) {
        if current_time == zoom.end {
            return;
        }

        let index = CheckpointIndex::new(events);
        let Some(next) = index.next_after(current_time) else {
            return;
        };
        self.seek_to_time(events, next.time.min(zoom.end));
    }

    /// Begin playback from the current position.
    pub fn play(
        &self,
        events: Arc<[CheckpointEvent]>,
        current_time: Time,
        zoom: ZoomRegion,
        point: ExecutionPoint,
    ) {
        self.scheduler.start(current_time, zoom, point, events);
    }

    /// Stop playback, leaving the host at the last displayed time.
    pub fn pause(&self) {
        self.scheduler.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }
}

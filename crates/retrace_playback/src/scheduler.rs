//! The playback session state machine.
//!
//! One session slot, one spawned loop per session. The loop fetches
//! graphics ahead of each frame's delivery instant, paints at 1x pacing
//! relative to the session's wall-clock start, and ends by reconciling the
//! host with a seek, either at the zoom end or at the remotely resolved
//! pause target. Stopping and retargeting never cancel in-flight work:
//! superseded continuations notice at their next liveness check and drop
//! out without painting.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use retrace_core::{
    CheckpointEvent, Clock, ExecutionPoint, ExecutionResolver, GraphicsSource, Host, PauseTarget,
    Renderer, Time, ZoomRegion,
};

use crate::checkpoints::CheckpointIndex;

/// External collaborators driven by the scheduler.
#[derive(Clone)]
pub struct PlaybackDeps {
    pub graphics: Arc<dyn GraphicsSource>,
    pub resolver: Arc<dyn ExecutionResolver>,
    pub renderer: Arc<dyn Renderer>,
    pub host: Arc<dyn Host>,
    pub clock: Arc<dyn Clock>,
}

/// Tunables for the playback loop.
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Mouse checkpoints closer than this to the current frame are skipped
    /// rather than played as frames of their own.
    pub mouse_skip_gap_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            mouse_skip_gap_ms: 100,
        }
    }
}

impl PlaybackConfig {
    pub fn with_mouse_skip_gap(mut self, gap_ms: u64) -> Self {
        self.mouse_skip_gap_ms = gap_ms;
        self
    }
}

/// Generation tag distinguishing the live session from superseded ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SessionId(u64);

/// Live playback state. Exists only while a session is running and is
/// owned exclusively by the scheduler's session slot.
struct PlaybackSession {
    id: SessionId,
    start_time: Time,
    start_wall_clock: u64,
    current_target: Time,
    pause_target: Option<PauseTarget>,
    checkpoints: Arc<[CheckpointEvent]>,
}

#[derive(Default)]
struct SessionSlot {
    last_id: u64,
    session: Option<PlaybackSession>,
}

impl SessionSlot {
    fn allocate(&mut self) -> SessionId {
        self.last_id += 1;
        SessionId(self.last_id)
    }
}

/// Drives timed playback across the checkpoint grid.
///
/// At most one session is live at a time. `start`, `stop`, and the status
/// reads never block: the session loop runs on a spawned task and checks
/// at every resumption that it still owns the session before doing
/// anything observable.
pub struct PlaybackScheduler {
    deps: PlaybackDeps,
    config: PlaybackConfig,
    slot: Arc<Mutex<SessionSlot>>,
}

impl PlaybackScheduler {
    pub fn new(deps: PlaybackDeps, config: PlaybackConfig) -> Self {
        Self {
            deps,
            config,
            slot: Arc::new(Mutex::new(SessionSlot::default())),
        }
    }

    /// Begin playback from `current_time`, superseding any live session.
    ///
    /// Playing from the zoom end rewinds to its start; the starting
    /// execution point is then the most recent checkpoint's, or the root
    /// point when nothing precedes the window. Returns immediately; all
    /// advancement happens on the spawned session task.
    pub fn start(
        &self,
        current_time: Time,
        zoom: ZoomRegion,
        current_point: ExecutionPoint,
        checkpoints: Arc<[CheckpointEvent]>,
    ) {
        self.cancel();

        if zoom.is_empty() {
            debug!("zoom region is empty; not starting playback");
            return;
        }

        let (start_time, start_point) = if current_time == zoom.end {
            let index = CheckpointIndex::new(&checkpoints);
            let point = index
                .most_recent_at_or_before(zoom.start)
                .map(|event| event.point.clone())
                .unwrap_or_else(ExecutionPoint::root);
            (zoom.start, point)
        } else {
            (current_time, current_point)
        };

        let start_wall_clock = self.deps.clock.now_ms();
        let id = {
            let mut slot = self.slot.lock();
            let id = slot.allocate();
            slot.session = Some(PlaybackSession {
                id,
                start_time,
                start_wall_clock,
                current_target: start_time,
                pause_target: None,
                checkpoints: Arc::clone(&checkpoints),
            });
            id
        };

        debug!(start = %start_time, "starting playback");

        tokio::spawn(
            SessionTask {
                slot: Arc::clone(&self.slot),
                deps: self.deps.clone(),
                config: self.config.clone(),
                id,
                start_time,
                start_point,
                zoom,
                checkpoints,
            }
            .run(),
        );
    }

    /// Stop playback and reconcile the host with the last displayed or
    /// pending time. A no-op when idle.
    pub fn stop(&self) {
        let session = self.slot.lock().session.take();
        let Some(session) = session else { return };

        debug!(target = %session.current_target, "stopping playback");

        let index = CheckpointIndex::new(&session.checkpoints);
        if let Some(event) = index.most_recent_at_or_before(session.current_target) {
            self.deps.host.seek(&event.point, session.current_target, false);
        }
    }

    /// Invalidate the live session without the reconciling seek. Used when
    /// the caller is about to issue a seek of its own.
    pub(crate) fn cancel(&self) {
        self.slot.lock().session = None;
    }

    pub fn is_playing(&self) -> bool {
        self.slot.lock().session.is_some()
    }

    /// The time the live session last displayed or is about to display.
    pub fn current_target(&self) -> Option<Time> {
        self.slot
            .lock()
            .session
            .as_ref()
            .map(|session| session.current_target)
    }
}

/// What a completed fetch means for the session, decided under the slot
/// lock; side effects run after it is released.
enum StepOutcome {
    /// Session superseded or stopped; drop the frame.
    Stale,
    /// Passed the designated stop point; seek there instead of painting.
    PauseCutoff(PauseTarget),
    /// Paint, then stop: the zoom end has been reached.
    Finished,
    /// Paint, then advance toward `next`.
    Continue { next: Time, deadline_ms: u64 },
}

/// The playback loop, spawned by [`PlaybackScheduler::start`].
///
/// Session state travels as explicit parameters and through the shared
/// slot; every resumption after an await re-checks that this task still
/// owns the session before touching anything observable.
struct SessionTask {
    slot: Arc<Mutex<SessionSlot>>,
    deps: PlaybackDeps,
    config: PlaybackConfig,
    id: SessionId,
    start_time: Time,
    start_point: ExecutionPoint,
    zoom: ZoomRegion,
    checkpoints: Arc<[CheckpointEvent]>,
}

impl SessionTask {
    async fn run(self) {
        let pause_target = match self.deps.resolver.resume_target(&self.start_point).await {
            Ok(target) => target,
            Err(err) => {
                warn!(error = %err, "resume target resolution failed; stopping playback");
                invalidate_if_live(&self.slot, self.id);
                return;
            }
        };

        {
            let mut guard = self.slot.lock();
            match guard.session.as_mut() {
                Some(session) if session.id == self.id => session.pause_target = pause_target,
                _ => return,
            }
        }

        let index = CheckpointIndex::new(&self.checkpoints);
        let mut target = self.start_time;
        // The start frame paints on arrival; only later frames wait for
        // their delivery instant.
        let mut deadline_ms: Option<u64> = None;

        loop {
            let frame = match self.deps.graphics.fetch(target).await {
                Ok(frame) => frame,
                Err(err) => {
                    warn!(time = %target, error = %err, "graphics fetch failed; stopping playback");
                    invalidate_if_live(&self.slot, self.id);
                    return;
                }
            };

            if let Some(deadline) = deadline_ms {
                let now = self.deps.clock.now_ms();
                if deadline > now {
                    self.deps.clock.sleep_ms(deadline - now).await;
                }
            }

            let outcome = {
                let mut guard = self.slot.lock();
                match guard.session.take() {
                    Some(mut session) if session.id == self.id => {
                        if let Some(pause) = session
                            .pause_target
                            .clone()
                            .filter(|pause| pause.time < target)
                        {
                            StepOutcome::PauseCutoff(pause)
                        } else {
                            match next_playback_time(
                                &index,
                                target,
                                self.zoom,
                                self.config.mouse_skip_gap_ms,
                            ) {
                                Some(next) => {
                                    session.current_target = next;
                                    let deadline_ms = session.start_wall_clock
                                        + next.since(session.start_time);
                                    guard.session = Some(session);
                                    StepOutcome::Continue { next, deadline_ms }
                                }
                                None => StepOutcome::Finished,
                            }
                        }
                    }
                    other => {
                        guard.session = other;
                        StepOutcome::Stale
                    }
                }
            };

            match outcome {
                StepOutcome::Stale => {
                    trace!(time = %target, "discarding frame for a superseded session");
                    return;
                }
                StepOutcome::PauseCutoff(pause) => {
                    debug!(time = %pause.time, "playback passed its pause target; stopping");
                    self.deps.host.seek(&pause.point, pause.time, pause.frame);
                    return;
                }
                StepOutcome::Finished => {
                    self.deps.renderer.paint(&frame);
                    debug!(time = %target, "playback reached the zoom end; stopping");
                    if let Some(event) = index.most_recent_at_or_before(target) {
                        self.deps.host.seek(&event.point, target, false);
                    }
                    return;
                }
                StepOutcome::Continue { next, deadline_ms: deadline } => {
                    self.deps.renderer.paint(&frame);
                    debug!(next = %next, "advancing playback");
                    deadline_ms = Some(deadline);
                    target = next;
                }
            }
        }
    }
}

fn invalidate_if_live(slot: &Mutex<SessionSlot>, id: SessionId) {
    let mut guard = slot.lock();
    if guard.session.as_ref().is_some_and(|session| session.id == id) {
        guard.session = None;
    }
}

/// Next time the loop should visit after `time`, or `None` when playback
/// is already at the zoom end.
///
/// Candidates at or past the zoom end collapse to the end itself, so
/// playback terminates exactly at the visible window's edge instead of
/// drifting past it or stalling.
fn next_playback_time(
    index: &CheckpointIndex<'_>,
    time: Time,
    zoom: ZoomRegion,
    mouse_skip_gap_ms: u64,
) -> Option<Time> {
    if time == zoom.end {
        return None;
    }

    match index.next_playback_candidate(time, mouse_skip_gap_ms) {
        Some(event) if event.time < zoom.end => Some(event.time),
        _ => Some(zoom.end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint(ms: u64) -> CheckpointEvent {
        CheckpointEvent::paint(Time::from_ms(ms), ExecutionPoint::new(format!("p{ms}")))
    }

    fn zoom(start: u64, end: u64) -> ZoomRegion {
        ZoomRegion::new(Time::from_ms(start), Time::from_ms(end))
    }

    #[test]
    fn default_config_skips_mouse_within_100ms() {
        assert_eq!(PlaybackConfig::default().mouse_skip_gap_ms, 100);
        let config = PlaybackConfig::default().with_mouse_skip_gap(250);
        assert_eq!(config.mouse_skip_gap_ms, 250);
    }

    #[test]
    fn next_time_is_exhausted_at_zoom_end() {
        let events = vec![paint(0), paint(1000)];
        let index = CheckpointIndex::new(&events);
        assert_eq!(
            next_playback_time(&index, Time::from_ms(1000), zoom(0, 1000), 100),
            None
        );
    }

    #[test]
    fn next_time_picks_candidate_inside_window() {
        let events = vec![paint(0), paint(400), paint(1000)];
        let index = CheckpointIndex::new(&events);
        assert_eq!(
            next_playback_time(&index, Time::ZERO, zoom(0, 1000), 100),
            Some(Time::from_ms(400))
        );
    }

    #[test]
    fn next_time_clamps_to_zoom_end() {
        // Candidate past the window.
        let events = vec![paint(0), paint(1500)];
        let index = CheckpointIndex::new(&events);
        assert_eq!(
            next_playback_time(&index, Time::ZERO, zoom(0, 1000), 100),
            Some(Time::from_ms(1000))
        );

        // No candidate at all.
        let events = vec![paint(0)];
        let index = CheckpointIndex::new(&events);
        assert_eq!(
            next_playback_time(&index, Time::ZERO, zoom(0, 1000), 100),
            Some(Time::from_ms(1000))
        );
    }
}

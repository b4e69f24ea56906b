//! Frame scheduler / pacing engine, per §4.1.
//!
//! Converts the display's fixed cadence and a running estimate of render cost into the four
//! primitives every frame uses: [`FrameScheduler::predict_frame`],
//! [`FrameScheduler::wait_frame`], [`FrameScheduler::mark_frame`], and
//! [`FrameScheduler::notify_present`].

use std::{
    thread::sleep,
    time::{Duration, Instant},
};

#[cfg(feature = "parking_lot")]
use parking_lot::Mutex;

#[cfg(not(feature = "parking_lot"))]
use std::sync::Mutex;

/// A strictly-increasing frame identifier. Never repeats for the lifetime of a
/// [`FrameScheduler`] (§8 invariant 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u64);

/// The four lifecycle points a frame passes through, in strict order, per the `Frame record`
/// entity in §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FramePoint {
    Woke,
    Began,
    Submitted,
    Presented,
}

/// Timing recorded for one frame, per the `Frame record` entity in §3.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameRecord {
    pub frame_id: u64,
    pub predicted_display_time_ns: u64,
    pub predicted_display_period_ns: u64,
    pub wake_up_time_ns: u64,
    pub actual_wake_up_ns: Option<u64>,
    pub actual_begin_ns: Option<u64>,
    pub actual_submit_ns: Option<u64>,
    pub actual_present_ns: Option<u64>,
}

/// A snapshot returned to the caller of [`FrameScheduler::predict_frame`] or
/// [`FrameScheduler::wait_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePrediction {
    pub frame_id: FrameId,
    pub wake_up_time_ns: u64,
    pub predicted_display_time_ns: u64,
    pub predicted_display_period_ns: u64,
}

/// `wait_frame` was cancelled by session destruction rather than timing out normally.
#[derive(Debug)]
pub struct WaitCancelled;

const MIN_SWAP_INTERVAL: u32 = 1;
const MAX_SWAP_INTERVAL: u32 = 4;
const SMOOTHING_ALPHA: f64 = 0.25;
const BUSY_WAIT_WINDOW_NS: u64 = 1_000_000; // 1ms, per §4.1/§9: bounded, not unbounded.

struct SchedulerState {
    nominal_frame_interval_ns: u64,
    expected_app_duration_ns: u64,
    frame_overhead_ns: u64,
    safety_margin_ns: u64,
    last_predicted_display_time_ns: u64,
    next_frame_id: u64,
    outstanding: Option<FrameRecord>,
    cancelled: bool,
}

/// Translates display cadence and render-cost estimates into wake-up and presentation
/// deadlines for a single session's frame loop.
///
/// Not `Sync` by itself in the sense of allowing concurrent `predict_frame`/`wait_frame` calls
/// from multiple threads for the *same* session — the API contract (§5) requires one in-flight
/// predicted frame per session, enforced here by `outstanding`.
pub struct FrameScheduler {
    state: Mutex<SchedulerState>,
    /// Injectable clock + sleeper so tests do not depend on wall-clock time or real sleeps.
    clock: Box<dyn Fn() -> u64 + Send + Sync>,
    sleeper: Box<dyn Fn(Duration) + Send + Sync>,
}

impl FrameScheduler {
    /// Builds a scheduler for a display with the given nominal refresh period, using the real
    /// system clock and `std::thread::sleep`.
    pub fn new(nominal_frame_interval_ns: u64) -> Self {
        let start = Instant::now();
        Self::with_clock(
            nominal_frame_interval_ns,
            move || start.elapsed().as_nanos() as u64,
            sleep,
        )
    }

    /// Builds a scheduler with an injected clock and sleep function, for deterministic testing.
    pub fn with_clock(
        nominal_frame_interval_ns: u64,
        clock: impl Fn() -> u64 + Send + Sync + 'static,
        sleeper: impl Fn(Duration) + Send + Sync + 'static,
    ) -> Self {
        let seed_duration = nominal_frame_interval_ns / 2;
        Self {
            state: Mutex::new(SchedulerState {
                nominal_frame_interval_ns,
                expected_app_duration_ns: seed_duration,
                frame_overhead_ns: seed_duration,
                safety_margin_ns: 0,
                last_predicted_display_time_ns: 0,
                next_frame_id: 1,
                outstanding: None,
                cancelled: false,
            }),
            clock: Box::new(clock),
            sleeper: Box::new(sleeper),
        }
    }

    fn lock(&self) -> impl std::ops::DerefMut<Target = SchedulerState> + '_ {
        #[cfg(feature = "parking_lot")]
        return self.state.lock();

        #[cfg(not(feature = "parking_lot"))]
        return self.state.lock().unwrap();
    }

    fn render_budget_ns(state: &SchedulerState) -> u64 {
        state.expected_app_duration_ns + state.frame_overhead_ns
    }

    fn swap_interval(state: &SchedulerState) -> u32 {
        let budget = Self::render_budget_ns(state);
        let period = state.nominal_frame_interval_ns.max(1);
        let interval = budget.div_ceil(period).max(1) as u32;
        interval.clamp(MIN_SWAP_INTERVAL, MAX_SWAP_INTERVAL)
    }

    /// Predicts the next display time and the moment the caller should be woken to begin
    /// rendering for it. Fails (panics, per §4.1: "invalid ordering is a fatal programming
    /// error") if a prediction is already outstanding and has not yet been consumed by
    /// `wait_frame`.
    pub fn predict_frame(&self) -> FramePrediction {
        let mut state = self.lock();
        assert!(
            state.outstanding.is_none(),
            "predict_frame called with a prediction already outstanding"
        );

        let now = (self.clock)();
        let period = state.nominal_frame_interval_ns.max(1);
        let interval = Self::swap_interval(&state) as u64;
        let render_budget = Self::render_budget_ns(&state);
        let step = interval * period;

        let mut predicted = if state.last_predicted_display_time_ns == 0 {
            now + step
        } else {
            state.last_predicted_display_time_ns + step
        };

        while predicted.saturating_sub(render_budget) <= now {
            predicted += step;
        }

        let wake_up_time_ns = predicted
            .saturating_sub(state.expected_app_duration_ns)
            .saturating_sub(state.frame_overhead_ns)
            .saturating_sub(state.safety_margin_ns);

        let frame_id = state.next_frame_id;
        state.next_frame_id += 1;
        state.last_predicted_display_time_ns = predicted;

        let record = FrameRecord {
            frame_id,
            predicted_display_time_ns: predicted,
            predicted_display_period_ns: period,
            wake_up_time_ns,
            ..Default::default()
        };
        state.outstanding = Some(record);
        state.cancelled = false;

        FramePrediction {
            frame_id: FrameId(frame_id),
            wake_up_time_ns,
            predicted_display_time_ns: predicted,
            predicted_display_period_ns: period,
        }
    }

    /// Blocks until the outstanding prediction's wake-up time, then returns it. Sleeps with a
    /// coarse OS sleep down to the millisecond, then busy-waits the final sub-millisecond
    /// remainder — intentional behavior, not a workaround (§9).
    pub fn wait_frame(&self) -> Result<FramePrediction, WaitCancelled> {
        let (wake_up_time_ns, prediction) = {
            let state = self.lock();
            let record = state
                .outstanding
                .as_ref()
                .expect("wait_frame called with no outstanding prediction");
            (
                record.wake_up_time_ns,
                FramePrediction {
                    frame_id: FrameId(record.frame_id),
                    wake_up_time_ns: record.wake_up_time_ns,
                    predicted_display_time_ns: record.predicted_display_time_ns,
                    predicted_display_period_ns: record.predicted_display_period_ns,
                },
            )
        };

        loop {
            if self.lock().cancelled {
                return Err(WaitCancelled);
            }

            let now = (self.clock)();
            if now >= wake_up_time_ns {
                break;
            }

            let remaining = wake_up_time_ns - now;
            if remaining > BUSY_WAIT_WINDOW_NS {
                let coarse = Duration::from_millis((remaining - BUSY_WAIT_WINDOW_NS) / 1_000_000);
                if !coarse.is_zero() {
                    (self.sleeper)(coarse);
                }
            }
            // Busy-wait loop body intentionally does nothing but re-check the clock; callers
            // relying on this for <1ms precision accept the CPU cost.
        }

        self.mark_frame(FrameId(prediction.frame_id.0), FramePoint::Woke, (self.clock)());

        Ok(prediction)
    }

    /// Cancels any outstanding `wait_frame`, called when the owning session is destroyed.
    /// Never blocks indefinitely after this call (§5).
    pub fn cancel(&self) {
        self.lock().cancelled = true;
    }

    /// Records that a frame reached `point` at `when_ns`. Panics on out-of-order marks, per
    /// §4.1's "invalid ordering is a fatal programming error".
    pub fn mark_frame(&self, frame_id: FrameId, point: FramePoint, when_ns: u64) {
        let mut state = self.lock();
        let record = state
            .outstanding
            .as_mut()
            .filter(|record| record.frame_id == frame_id.0)
            .expect("mark_frame called for a frame_id with no outstanding prediction");

        match point {
            FramePoint::Woke => {
                assert!(record.actual_wake_up_ns.is_none(), "frame already woke");
                record.actual_wake_up_ns = Some(when_ns);
            }
            FramePoint::Began => {
                assert!(record.actual_wake_up_ns.is_some(), "began before waking");
                assert!(record.actual_begin_ns.is_none(), "frame already began");
                record.actual_begin_ns = Some(when_ns);
            }
            FramePoint::Submitted => {
                assert!(record.actual_begin_ns.is_some(), "submitted before beginning");
                assert!(record.actual_submit_ns.is_none(), "frame already submitted");
                record.actual_submit_ns = Some(when_ns);

                let began = record.actual_begin_ns.unwrap();
                let sample = when_ns.saturating_sub(began) as f64;
                state.expected_app_duration_ns = smooth(state.expected_app_duration_ns, sample);
            }
            FramePoint::Presented => {
                assert!(record.actual_submit_ns.is_some(), "presented before submitting");
                assert!(record.actual_present_ns.is_none(), "frame already presented");
                record.actual_present_ns = Some(when_ns);

                let submitted = record.actual_submit_ns.unwrap();
                let sample = when_ns.saturating_sub(submitted) as f64;
                state.frame_overhead_ns = smooth(state.frame_overhead_ns, sample);

                state.outstanding = None;
            }
        }
    }

    /// Feedback from the presentation target: the frame actually displayed at
    /// `actual_display_time_ns`, with the following vsync at `next_vsync_ns`. Missed deadlines
    /// widen the safety margin rather than erroring (§4.1 failure semantics).
    pub fn notify_present(&self, actual_display_time_ns: u64, next_vsync_ns: u64) {
        let mut state = self.lock();
        let missed = actual_display_time_ns > next_vsync_ns;
        if missed {
            let overrun = actual_display_time_ns - next_vsync_ns;
            state.safety_margin_ns = (state.safety_margin_ns + overrun).min(
                state.nominal_frame_interval_ns, // never widen past a whole frame
            );
            warn!(
                "missed present deadline by {overrun}ns, widening safety margin to {}ns",
                state.safety_margin_ns
            );
        }
    }

    /// The current smoothed application render-duration estimate, in nanoseconds.
    pub fn expected_app_duration_ns(&self) -> u64 {
        self.lock().expected_app_duration_ns
    }

    /// The current safety margin accumulated from missed present deadlines, in nanoseconds.
    pub fn safety_margin_ns(&self) -> u64 {
        self.lock().safety_margin_ns
    }

    /// The current smoothed compositor overhead estimate, in nanoseconds.
    pub fn frame_overhead_ns(&self) -> u64 {
        self.lock().frame_overhead_ns
    }
}

fn smooth(old: u64, sample: f64) -> u64 {
    let old = old as f64;
    (old + SMOOTHING_ALPHA * (sample - old)).max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn scheduler_with_clock(period_ns: u64, now: std::sync::Arc<AtomicU64>) -> FrameScheduler {
        let clock_now = now.clone();
        FrameScheduler::with_clock(
            period_ns,
            move || clock_now.load(Ordering::SeqCst),
            move |duration| {
                now.fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
            },
        )
    }

    #[test]
    fn frame_ids_strictly_increase_across_predictions() {
        let now = std::sync::Arc::new(AtomicU64::new(0));
        let scheduler = scheduler_with_clock(11_111_111, now.clone());

        let a = scheduler.predict_frame();
        scheduler.wait_frame().unwrap();
        scheduler.mark_frame(a.frame_id, FramePoint::Began, now.load(Ordering::SeqCst));
        scheduler.mark_frame(a.frame_id, FramePoint::Submitted, now.load(Ordering::SeqCst));
        scheduler.mark_frame(a.frame_id, FramePoint::Presented, now.load(Ordering::SeqCst));

        let b = scheduler.predict_frame();
        assert!(b.frame_id.0 > a.frame_id.0);
    }

    #[test]
    #[should_panic]
    fn predict_frame_twice_without_wait_is_fatal() {
        let now = std::sync::Arc::new(AtomicU64::new(0));
        let scheduler = scheduler_with_clock(11_111_111, now);
        scheduler.predict_frame();
        scheduler.predict_frame();
    }

    #[test]
    fn wake_up_time_precedes_predicted_display_time_by_render_budget() {
        let now = std::sync::Arc::new(AtomicU64::new(0));
        let scheduler = scheduler_with_clock(11_111_111, now);
        let prediction = scheduler.predict_frame();

        let budget = scheduler.expected_app_duration_ns() + scheduler.frame_overhead_ns();
        assert!(prediction.wake_up_time_ns <= prediction.predicted_display_time_ns - budget);
    }

    #[test]
    fn cancel_unblocks_wait_frame() {
        let now = std::sync::Arc::new(AtomicU64::new(1_000_000_000));
        let scheduler = scheduler_with_clock(11_111_111, now);
        scheduler.predict_frame();
        scheduler.cancel();
        assert!(scheduler.wait_frame().is_err());
    }

    #[test]
    fn missed_present_widens_safety_margin() {
        let now = std::sync::Arc::new(AtomicU64::new(0));
        let scheduler = scheduler_with_clock(11_111_111, now);
        scheduler.notify_present(2_000_000, 1_000_000);

        assert_eq!(scheduler.safety_margin_ns(), 1_000_000);

        let a = scheduler.predict_frame();
        scheduler.cancel();
        let _ = scheduler.wait_frame();

        let expected_wake_up_time_ns = a
            .predicted_display_time_ns
            .saturating_sub(scheduler.expected_app_duration_ns())
            .saturating_sub(scheduler.frame_overhead_ns())
            .saturating_sub(scheduler.safety_margin_ns());
        assert_eq!(a.wake_up_time_ns, expected_wake_up_time_ns);
    }
}

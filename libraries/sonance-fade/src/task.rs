//! Resumable interpolation task
//!
//! Drives one value from `from` to `to` over a duration, one tick at a time.
//! The driver calls [`InterpolationTask::resume`] once per scheduling tick
//! with that tick's delta time; the task writes the interpolated value
//! through the supplied writer and reports whether it is still running.
//!
//! ```rust
//! use sonance_fade::{CancellationToken, FadeCurve, InterpolationTask, TaskStatus};
//!
//! let mut volume = 0.0;
//! let mut task = InterpolationTask::new(0.0, 1.0, 0.5, FadeCurve::Linear, CancellationToken::new());
//!
//! while task.resume(0.1, |v| volume = v) == TaskStatus::Running {}
//! assert_eq!(volume, 1.0);
//! ```

use crate::curve::Interpolator;
use crate::token::{CancelHandle, CancellationToken, TokenState};

/// Callback invoked once when a task reaches a terminal state
pub type Callback = Box<dyn FnOnce()>;

/// Result of resuming a task for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task wrote a value and wants another tick
    Running,

    /// Task wrote the exact target value and finished
    Completed,

    /// Task observed a cancellation request and stopped
    Cancelled,
}

/// Phase of an interpolation task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// Not resumed yet
    Idle,

    /// Between ticks
    Running,

    /// Reached the target
    Completed,

    /// Stopped early
    Cancelled,
}

/// Cancellable, tick-driven interpolation of a single value
pub struct InterpolationTask {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    interpolator: Box<dyn Interpolator>,
    token: CancellationToken,
    on_complete: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl InterpolationTask {
    /// Create a task that takes ownership of `token`
    ///
    /// Negative or NaN durations are treated as zero: the task completes on its
    /// first tick.
    pub fn new(
        from: f32,
        to: f32,
        duration: f32,
        interpolator: impl Interpolator + 'static,
        token: CancellationToken,
    ) -> Self {
        Self::from_boxed(from, to, duration, Box::new(interpolator), token)
    }

    /// Create a task from an already boxed interpolator
    pub fn from_boxed(
        from: f32,
        to: f32,
        duration: f32,
        interpolator: Box<dyn Interpolator>,
        token: CancellationToken,
    ) -> Self {
        let duration = if duration.is_nan() {
            0.0
        } else {
            duration.max(0.0)
        };

        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            interpolator,
            token,
            on_complete: None,
            on_cancel: None,
        }
    }

    /// Invoke `callback` exactly once on normal completion
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Invoke `callback` exactly once if the task is cancelled
    pub fn on_cancel(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    pub(crate) fn set_callbacks(&mut self, on_complete: Option<Callback>, on_cancel: Option<Callback>) {
        self.on_complete = on_complete;
        self.on_cancel = on_cancel;
    }

    /// Handle to the task's token
    pub fn handle(&self) -> CancelHandle {
        self.token.handle()
    }

    /// Current phase
    pub fn phase(&self) -> TaskPhase {
        match self.token.state() {
            TokenState::Created => TaskPhase::Idle,
            TokenState::Running => TaskPhase::Running,
            TokenState::Finished => TaskPhase::Completed,
            TokenState::Cancelled => TaskPhase::Cancelled,
        }
    }

    /// Check if the task has stopped, either way
    pub fn is_done(&self) -> bool {
        self.token.state().is_terminal()
    }

    /// Time accumulated so far, in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total fade duration, in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Value the task ends on
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Move the token to `Running` without ticking
    pub fn start(&mut self) {
        self.token.start();
    }

    /// Observe a pending cancellation request without advancing
    ///
    /// Returns `true` if the task is now cancelled. Used at a tick boundary by
    /// controllers that need the old task stopped before another one ticks.
    pub fn settle_cancellation(&mut self) -> bool {
        if self.token.state() == TokenState::Created && self.token.is_cancel_requested() {
            self.token.start();
        }

        if self.token.state() == TokenState::Running && self.token.is_cancel_requested() {
            self.cancel_now();
        }

        self.token.state() == TokenState::Cancelled
    }

    /// Advance the task by one tick
    ///
    /// While time remains, writes `interpolate(from, to, elapsed / duration)`
    /// and then adds `delta` to the elapsed time. Once the duration has
    /// elapsed, writes exactly `to` and completes. A cancellation request seen
    /// at the start of the tick stops the task without writing anything.
    ///
    /// Resuming a finished task is a no-op returning its terminal status.
    pub fn resume(&mut self, delta: f32, mut write: impl FnMut(f32)) -> TaskStatus {
        match self.token.state() {
            TokenState::Finished => return TaskStatus::Completed,
            TokenState::Cancelled => return TaskStatus::Cancelled,
            TokenState::Created => self.token.start(),
            TokenState::Running => {}
        }

        if self.token.is_cancel_requested() {
            self.cancel_now();
            return TaskStatus::Cancelled;
        }

        if self.elapsed < self.duration {
            let t = self.elapsed / self.duration;
            write(self.interpolator.interpolate(self.from, self.to, t));

            if delta.is_finite() && delta > 0.0 {
                self.elapsed += delta;
            }
            return TaskStatus::Running;
        }

        // Exact target, never an interpolated approximation
        write(self.to);
        self.token.mark_finished();
        self.on_cancel = None;
        if let Some(callback) = self.on_complete.take() {
            callback();
        }

        TaskStatus::Completed
    }

    fn cancel_now(&mut self) {
        self.token.mark_cancelled();
        self.on_complete = None;
        if let Some(callback) = self.on_cancel.take() {
            callback();
        }
    }
}

impl std::fmt::Debug for InterpolationTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterpolationTask")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::FadeCurve;
    use std::cell::Cell;
    use std::rc::Rc;

    fn linear_task(from: f32, to: f32, duration: f32) -> InterpolationTask {
        InterpolationTask::new(from, to, duration, FadeCurve::Linear, CancellationToken::new())
    }

    #[test]
    fn first_tick_writes_start_value() {
        let mut task = linear_task(0.0, 1.0, 1.0);
        assert_eq!(task.phase(), TaskPhase::Idle);

        let mut value = -1.0;
        assert_eq!(task.resume(0.25, |v| value = v), TaskStatus::Running);
        assert_eq!(value, 0.0);
        assert_eq!(task.phase(), TaskPhase::Running);
    }

    #[test]
    fn advances_by_delta() {
        let mut task = linear_task(0.0, 1.0, 1.0);
        let mut values = Vec::new();

        for _ in 0..4 {
            task.resume(0.25, |v| values.push(v));
        }

        assert_eq!(values.len(), 4);
        for (value, expected) in values.iter().zip([0.0, 0.25, 0.5, 0.75]) {
            assert!((value - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn completes_with_exact_target() {
        // 0.3 does not divide 1.0, so the last interpolated value overshoots in time
        let mut task = linear_task(0.0, 1.0, 1.0);
        let mut value = 0.0;
        let mut status = TaskStatus::Running;
        let mut ticks = 0;

        while status == TaskStatus::Running {
            status = task.resume(0.3, |v| value = v);
            ticks += 1;
        }

        assert_eq!(status, TaskStatus::Completed);
        assert_eq!(value, 1.0);
        assert_eq!(ticks, 5);
        assert_eq!(task.phase(), TaskPhase::Completed);
        assert!(task.handle().is_finished());
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut task = linear_task(0.3, 0.8, 0.0);
        let mut value = 0.0;
        assert_eq!(task.resume(0.016, |v| value = v), TaskStatus::Completed);
        assert_eq!(value, 0.8);
    }

    #[test]
    fn negative_duration_is_zero() {
        let task = linear_task(0.0, 1.0, -3.0);
        assert_eq!(task.duration(), 0.0);

        let task = linear_task(0.0, 1.0, f32::NAN);
        assert_eq!(task.duration(), 0.0);
    }

    #[test]
    fn completion_callback_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut task = linear_task(0.0, 1.0, 0.1).on_complete(move || counter.set(counter.get() + 1));

        for _ in 0..10 {
            task.resume(0.05, |_| {});
        }

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cancellation_skips_target_and_callback() {
        let completed = Rc::new(Cell::new(false));
        let cancelled = Rc::new(Cell::new(0));
        let completed_flag = Rc::clone(&completed);
        let cancelled_count = Rc::clone(&cancelled);

        let mut task = linear_task(0.0, 1.0, 1.0)
            .on_complete(move || completed_flag.set(true))
            .on_cancel(move || cancelled_count.set(cancelled_count.get() + 1));
        let handle = task.handle();

        let mut value = 0.0;
        task.resume(0.5, |v| value = v);
        handle.request_cancel();

        let mut writes = 0;
        assert_eq!(task.resume(0.5, |_| writes += 1), TaskStatus::Cancelled);
        assert_eq!(task.resume(0.5, |_| writes += 1), TaskStatus::Cancelled);

        assert_eq!(writes, 0);
        assert_eq!(value, 0.0);
        assert!(!completed.get());
        assert_eq!(cancelled.get(), 1);
        assert!(handle.is_cancelled());
    }

    #[test]
    fn cancel_before_first_tick() {
        let mut task = linear_task(0.0, 1.0, 1.0);
        task.handle().request_cancel();

        let mut writes = 0;
        assert_eq!(task.resume(0.1, |_| writes += 1), TaskStatus::Cancelled);
        assert_eq!(writes, 0);
        assert_eq!(task.phase(), TaskPhase::Cancelled);
    }

    #[test]
    fn settle_cancellation_without_ticking() {
        let mut task = linear_task(0.0, 1.0, 1.0);
        task.start();
        assert!(!task.settle_cancellation());

        task.handle().request_cancel();
        assert!(task.settle_cancellation());
        assert!(task.is_done());
        assert_eq!(task.elapsed(), 0.0);
    }

    #[test]
    fn cancel_after_completion_is_ignored() {
        let mut task = linear_task(0.0, 1.0, 0.0);
        task.resume(0.1, |_| {});
        task.handle().request_cancel();

        assert!(!task.settle_cancellation());
        assert_eq!(task.phase(), TaskPhase::Completed);
    }

    #[test]
    fn bad_delta_does_not_advance() {
        let mut task = linear_task(0.0, 1.0, 1.0);
        task.resume(f32::NAN, |_| {});
        task.resume(-1.0, |_| {});
        assert_eq!(task.elapsed(), 0.0);
    }

    #[test]
    fn custom_interpolator() {
        let mut task = InterpolationTask::new(
            0.0,
            10.0,
            1.0,
            |from: f32, to: f32, t: f32| from + (to - from) * t * t,
            CancellationToken::new(),
        );

        let mut value = 0.0;
        task.resume(0.5, |v| value = v);
        task.resume(0.5, |v| value = v);
        assert!((value - 2.5).abs() < 1e-6);
    }
}

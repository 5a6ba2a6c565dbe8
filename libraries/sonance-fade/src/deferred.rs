//! Stop actions that fire after a fixed amount of tick time

use crate::task::Callback;

/// Stops a channel once `delay` seconds of tick time have accumulated
pub(crate) struct DeferredStop {
    delay: f32,
    elapsed: f32,
    on_stopped: Option<Callback>,
}

impl DeferredStop {
    pub(crate) fn new(delay: f32, on_stopped: Option<Callback>) -> Self {
        Self {
            delay,
            elapsed: 0.0,
            on_stopped,
        }
    }

    /// Accumulate `delta`; returns `true` once the delay has elapsed
    pub(crate) fn advance(&mut self, delta: f32) -> bool {
        if delta.is_finite() && delta > 0.0 {
            self.elapsed += delta;
        }
        self.elapsed >= self.delay
    }

    /// Seconds left before firing
    pub(crate) fn remaining(&self) -> f32 {
        (self.delay - self.elapsed).max(0.0)
    }

    /// Consume the action, invoking its callback
    pub(crate) fn fire(mut self) {
        if let Some(callback) = self.on_stopped.take() {
            callback();
        }
    }
}

impl std::fmt::Debug for DeferredStop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredStop")
            .field("delay", &self.delay)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn fires_after_delay() {
        let mut stop = DeferredStop::new(0.5, None);
        assert!(!stop.advance(0.2));
        assert!(!stop.advance(0.2));
        assert!((stop.remaining() - 0.1).abs() < 1e-6);
        assert!(stop.advance(0.2));
        assert_eq!(stop.remaining(), 0.0);
    }

    #[test]
    fn zero_delay_fires_on_first_tick() {
        let mut stop = DeferredStop::new(0.0, None);
        assert!(stop.advance(0.0));
    }

    #[test]
    fn fire_runs_callback() {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let stop = DeferredStop::new(0.1, Some(Box::new(move || flag.set(true))));

        stop.fire();
        assert!(fired.get());
    }
}

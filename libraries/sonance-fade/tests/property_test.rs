//! Property-based tests for fade control
//!
//! Random sequences of fade requests and frame deltas must never leave more
//! than one fade alive, and every fade must end in exactly one terminal state.

use proptest::prelude::*;
use sonance_fade::{AudioChannel, CancelHandle, FadeController, FadeCurve, FadeRequest};
use std::cell::Cell;
use std::rc::Rc;

struct Channel {
    volume: f32,
}

impl AudioChannel for Channel {
    fn id(&self) -> &str {
        "prop"
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn play(&mut self) {}

    fn stop(&mut self) {}
}

#[derive(Debug, Clone)]
enum Step {
    Tick(f32),
    Fade { to: f32, duration: f32, curve: u8 },
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0.0f32..0.1).prop_map(Step::Tick),
        1 => (0.0f32..=1.0, 0.0f32..1.0, 0u8..5)
            .prop_map(|(to, duration, curve)| Step::Fade { to, duration, curve }),
    ]
}

fn curve(index: u8) -> FadeCurve {
    match index {
        0 => FadeCurve::Linear,
        1 => FadeCurve::SmoothStep,
        2 => FadeCurve::SquareRoot,
        3 => FadeCurve::SCurve,
        _ => FadeCurve::EqualPower,
    }
}

proptest! {
    /// Property: at most one fade is alive and callbacks fire exactly once per fade
    #[test]
    fn at_most_one_live_fade(steps in prop::collection::vec(arbitrary_step(), 1..200)) {
        let mut controller = FadeController::new();
        let mut channel = Channel { volume: 0.5 };
        let mut handles: Vec<CancelHandle> = Vec::new();
        let callbacks = Rc::new(Cell::new(0usize));

        for step in steps {
            match step {
                Step::Tick(delta) => {
                    controller.tick(&mut channel, delta);
                }
                Step::Fade { to, duration, curve: index } => {
                    let done = Rc::clone(&callbacks);
                    let cancelled = Rc::clone(&callbacks);
                    let request = FadeRequest::new(channel.volume(), to, duration)
                        .with_curve(curve(index))
                        .on_complete(move || done.set(done.get() + 1))
                        .on_cancel(move || cancelled.set(cancelled.get() + 1));
                    handles.push(controller.fade(&channel, request).unwrap());
                }
            }

            let live = handles.iter().filter(|h| !h.is_done()).count();
            prop_assert!(live <= 1, "{} fades alive at once", live);
            prop_assert!(channel.volume >= -1e-6 && channel.volume <= 1.0 + 1e-6);
        }

        let terminal = handles.iter().filter(|h| h.is_done()).count();
        prop_assert_eq!(callbacks.get(), terminal);
    }
}

//! Navigation event dispatch
//!
//! Drains the shared step accumulator and watches the encoder push button,
//! queueing [`NavEvent`]s for the UI. Events that do not fit in the queue
//! are dropped.

use heapless::Deque;
use kidsbar_core::config::DispatchConfig;
use kidsbar_core::input::{NavEvent, StepAccumulator};
use kidsbar_core::time::has_elapsed;
use kidsbar_hal::gpio::{ActiveLowButton, InputPin};

/// Pending navigation events
pub const EVENT_QUEUE_LEN: usize = 8;

/// Turns encoder steps and button presses into navigation events
pub struct InputDispatcher<'a, P> {
    steps: &'a StepAccumulator,
    button: ActiveLowButton<P>,
    config: DispatchConfig,
    queue: Deque<NavEvent, EVENT_QUEUE_LEN>,
    was_pressed: bool,
    last_select_ms: Option<u32>,
    /// Start of the current hold, cleared once the long press fired
    hold_start_ms: Option<u32>,
}

impl<'a, P: InputPin> InputDispatcher<'a, P> {
    /// Create a dispatcher over an active-low button
    pub fn new(steps: &'a StepAccumulator, button: P, config: DispatchConfig) -> Self {
        Self {
            steps,
            button: ActiveLowButton::new(button),
            config,
            queue: Deque::new(),
            was_pressed: false,
            last_select_ms: None,
            hold_start_ms: None,
        }
    }

    /// Collect new input
    pub fn update(&mut self, now_ms: u32) {
        let steps = self.steps.take();
        if let Some(event) = NavEvent::from_step(steps) {
            let count = (steps.unsigned_abs() as usize).min(EVENT_QUEUE_LEN);
            for _ in 0..count {
                self.push(event);
            }
        }

        let pressed = self.button.is_pressed();

        if pressed && !self.was_pressed {
            self.hold_start_ms = Some(now_ms);

            let accept = self
                .last_select_ms
                .map_or(true, |last| has_elapsed(now_ms, last, self.config.debounce_ms));
            if accept {
                self.last_select_ms = Some(now_ms);
                self.push(NavEvent::Select);
            }
        } else if pressed {
            if let Some(start) = self.hold_start_ms {
                if has_elapsed(now_ms, start, self.config.long_press_ms) {
                    self.hold_start_ms = None;
                    self.push(NavEvent::LongPress);
                }
            }
        } else {
            self.hold_start_ms = None;
        }

        self.was_pressed = pressed;
    }

    /// Take the oldest pending event
    pub fn next_event(&mut self) -> Option<NavEvent> {
        self.queue.pop_front()
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn push(&mut self, event: NavEvent) {
        if self.queue.push_back(event).is_err() {
            debug!("input: queue full, dropped {}", event);
        }
    }
}

//! Trailing-edge debounce over `gloo-timers`.

use gloo_timers::callback::Timeout;

/// Holds at most one pending timer; scheduling again drops (and so
/// cancels) the previous one.
#[derive(Default)]
pub struct Debouncer {
    pending: Option<Timeout>,
}

impl Debouncer {
    pub fn schedule(&mut self, delay_ms: u32, run: impl FnOnce() + 'static) {
        self.pending = Some(Timeout::new(delay_ms, run));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

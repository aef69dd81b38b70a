//! Animated progress transitions.
//!
//! At most one transition is in flight at a time; starting a new one replaces
//! the previous and drops its completion callback (replace semantics, no
//! queue). Interpolation is linear and driven by the host frame clock
//! (`ui.input(|i| i.time)`), so there is no timer thread.

/// Completion callback fired exactly once when a transition settles.
pub type Completion = Box<dyn FnOnce() + 'static>;

/// A single in-flight progress transition.
pub struct ProgressAnimation {
    from: f32,
    to: f32,
    duration_secs: f64,
    /// Stamped lazily on the first clock sample after the transition starts,
    /// so a transition created between frames starts counting from the next
    /// frame's clock.
    started_at: Option<f64>,
    on_complete: Option<Completion>,
}

impl ProgressAnimation {
    /// Create a transition from `from` to `to` over `duration_secs`.
    ///
    /// `duration_secs` must be positive; zero-duration transitions are applied
    /// immediately by the widget and never reach here.
    pub fn new(from: f32, to: f32, duration_secs: f64, on_complete: Option<Completion>) -> Self {
        Self {
            from,
            to,
            duration_secs,
            started_at: None,
            on_complete,
        }
    }

    /// Target value this transition settles at.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Sample the interpolated value at clock time `now_secs`.
    ///
    /// Returns `(value, settled)`. The first call stamps the start time, so
    /// the returned value is `from` on that call. Once `settled` is true the
    /// value equals the target exactly.
    pub fn sample(&mut self, now_secs: f64) -> (f32, bool) {
        let started_at = *self.started_at.get_or_insert(now_secs);

        if self.duration_secs <= 0.0 {
            return (self.to, true);
        }

        let fraction = ((now_secs - started_at) / self.duration_secs).clamp(0.0, 1.0);
        if fraction >= 1.0 {
            (self.to, true)
        } else {
            (self.from + (self.to - self.from) * fraction as f32, false)
        }
    }

    /// Take the completion callback (leaves `None` behind).
    pub fn take_completion(&mut self) -> Option<Completion> {
        self.on_complete.take()
    }
}

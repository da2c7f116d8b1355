use crate::stage::{ElementId, Stage};

/// Time-based numeric interpolation for stat counters.
///
/// Linear from 0 to `target` over a fixed duration; each frame writes
/// `floor(target * p)` into the element text and the animator retires once
/// `p` reaches 1. Not guarded against concurrent runs on one element — the
/// once-only trigger rule upstream guarantees that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    element: ElementId,
    target: u64,
    duration: f32,
    started_at: f64,
}

impl CountUp {
    pub fn start(element: ElementId, target: u64, duration: f32, now: f64) -> Self {
        Self {
            element,
            target,
            duration,
            started_at: now,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Displayed value at an absolute timestamp.
    pub fn value_at(&self, now: f64) -> u64 {
        let p = self.progress(now);
        (self.target as f64 * p).floor() as u64
    }

    /// Writes the current value; returns `false` once finished so the
    /// driver can stop scheduling it.
    pub fn tick(&self, now: f64, stage: &mut Stage) -> bool {
        if let Some(props) = stage.props_mut(self.element) {
            props.text = self.value_at(now).to_string();
        }
        self.progress(now) < 1.0
    }

    fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration as f64).clamp(0.0, 1.0)
    }
}

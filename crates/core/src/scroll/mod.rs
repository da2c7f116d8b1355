use serde::{Deserialize, Serialize};

/// Scroll position and geometry shared with the trigger engine each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl ScrollState {
    pub fn new(viewport_height: f32, content_height: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_height,
            content_height,
        }
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// Options handed to the smooth-scroll engine once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollOptions {
    pub duration: f32,
    pub smooth_wheel: bool,
    pub smooth_touch: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            duration: 1.1,
            smooth_wheel: true,
            smooth_touch: false,
        }
    }
}

/// External smooth-scroll engine boundary.
///
/// The core configures it once and drives it from the frame loop; the
/// engine owns how (and whether) the offset approaches its target. Hosts
/// without one fall back to [`DirectScroll`] and everything still works.
pub trait ScrollEngine {
    fn configure(&mut self, options: ScrollOptions);
    fn set_target(&mut self, offset: f32);
    /// Per-frame hook; returns the current offset.
    fn raf(&mut self, now: f64) -> f32;
}

/// Passthrough engine: the offset jumps straight to the target.
#[derive(Debug, Default)]
pub struct DirectScroll {
    offset: f32,
}

impl ScrollEngine for DirectScroll {
    fn configure(&mut self, _options: ScrollOptions) {}

    fn set_target(&mut self, offset: f32) {
        self.offset = offset;
    }

    fn raf(&mut self, _now: f64) -> f32 {
        self.offset
    }
}

/// Exponential approach toward the target offset, scaled so the distance
/// is mostly covered within the configured duration.
#[derive(Debug)]
pub struct SmoothScroll {
    options: ScrollOptions,
    target: f32,
    offset: f32,
    last: Option<f64>,
}

impl SmoothScroll {
    pub fn new() -> Self {
        Self {
            options: ScrollOptions::default(),
            target: 0.0,
            offset: 0.0,
            last: None,
        }
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollEngine for SmoothScroll {
    fn configure(&mut self, options: ScrollOptions) {
        self.options = options;
    }

    fn set_target(&mut self, offset: f32) {
        self.target = offset;
        if !self.options.smooth_wheel {
            self.offset = offset;
        }
    }

    fn raf(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(now);

        let duration = self.options.duration.max(1e-3);
        // ~99% of the remaining distance within one duration.
        let alpha = 1.0 - (-dt * 4.6 / duration).exp();
        self.offset += (self.target - self.offset) * alpha;
        self.offset
    }
}

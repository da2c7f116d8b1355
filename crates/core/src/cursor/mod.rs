use crate::config::CursorConfig;
use crate::gate::MotionGate;

/// Eased follower behind the raw pointer.
///
/// Pointer events only overwrite the target (last write wins, coalescing at
/// event delivery rate); each frame the render point covers a fixed
/// fraction of the remaining distance, an exponential ease that converges
/// within visual tolerance in a handful of frames and never overshoots.
#[derive(Debug)]
pub struct CursorFollower {
    damping: f32,
    half_size: f32,
    target_x: f32,
    target_y: f32,
    cursor_x: f32,
    cursor_y: f32,
}

impl CursorFollower {
    pub fn new(config: &CursorConfig) -> Self {
        Self {
            damping: config.damping,
            half_size: config.size / 2.0,
            target_x: 0.0,
            target_y: 0.0,
            cursor_x: 0.0,
            cursor_y: 0.0,
        }
    }

    /// Whether the follower should run at all: a dot element must exist,
    /// motion must not be reduced, and small/touch layouts keep the native
    /// cursor. Decided once at startup.
    pub fn should_enable(
        has_element: bool,
        gate: &MotionGate,
        viewport_width: f32,
        config: &CursorConfig,
    ) -> bool {
        has_element && !gate.is_reduced() && viewport_width > config.min_viewport_width
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.target_x = x;
        self.target_y = y;
    }

    /// Advances one frame and returns the translate offset for the dot,
    /// centred by half the element size.
    pub fn tick(&mut self) -> (f32, f32) {
        self.cursor_x += (self.target_x - self.cursor_x) * self.damping;
        self.cursor_y += (self.target_y - self.cursor_y) * self.damping;
        (self.cursor_x - self.half_size, self.cursor_y - self.half_size)
    }

    pub fn position(&self) -> (f32, f32) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn distance_to_target(&self) -> f32 {
        let dx = self.target_x - self.cursor_x;
        let dy = self.target_y - self.cursor_y;
        (dx * dx + dy * dy).sqrt()
    }
}

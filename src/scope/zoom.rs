/// Smallest zoom factor on either axis.
pub const ZOOM_MIN: f64 = 0.25;
/// Largest zoom factor on either axis.
pub const ZOOM_MAX: f64 = 12.0;
/// Increment of the zoom buttons.
pub const ZOOM_STEP: f64 = 0.25;
/// Increment of one modifier-wheel notch.
pub const WHEEL_STEP: f64 = 0.08;

#[inline]
pub fn clamp_zoom(z: f64) -> f64 {
    if z.is_nan() {
        1.0
    } else {
        z.clamp(ZOOM_MIN, ZOOM_MAX)
    }
}

/// One scroll-wheel event as seen by the oscilloscope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    /// Zoom modifier held (Ctrl). Without it the wheel is ignored.
    pub modifier: bool,
    /// Shift held: zoom the Y axis instead of X.
    pub shift: bool,
    /// Positive scrolls down (zooms out), negative scrolls up (zooms in).
    pub delta_y: f64,
}

/// Independent per-axis zoom, always within `[ZOOM_MIN, ZOOM_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    x: f64,
    y: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl Zoom {
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, z: f64) {
        self.x = clamp_zoom(z);
    }

    pub fn set_y(&mut self, z: f64) {
        self.y = clamp_zoom(z);
    }

    pub fn step_x(&mut self, delta: f64) {
        self.set_x(self.x + delta);
    }

    pub fn step_y(&mut self, delta: f64) {
        self.set_y(self.y + delta);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a wheel notch. Returns whether the zoom was touched.
    pub fn apply_wheel(&mut self, input: WheelInput) -> bool {
        if !input.modifier {
            return false;
        }
        let step = if -input.delta_y > 0.0 {
            WHEEL_STEP
        } else {
            -WHEEL_STEP
        };
        if input.shift {
            self.step_y(step);
        } else {
            self.step_x(step);
        }
        true
    }
}

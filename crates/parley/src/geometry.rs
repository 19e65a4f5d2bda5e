use serde::Serialize;

/// A point in layout space. `y` grows downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns a new point shifted horizontally by `dx`.
    pub fn with_x_offset(self, dx: f32) -> Self {
        Self::new(self.x + dx, self.y)
    }

    /// Returns a new point with the same x and the given y.
    pub fn with_y(self, y: f32) -> Self {
        Self::new(self.x, y)
    }
}

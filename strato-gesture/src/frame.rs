use crate::GestureError;
use serde::{Deserialize, Serialize};

/// Landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// Fixed landmark indices within a hand frame, following the usual
/// hand-model layout (wrist at 0, four joints per finger).
pub mod landmark {
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

/// One detected landmark in normalized image space: x,y in [0,1], with the
/// origin at the top-left, so a smaller y is higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// One frame's worth of hand landmarks. Ephemeral: classified and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandFrame {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandFrame {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn from_points(points: Vec<Landmark>) -> Result<Self, GestureError> {
        let len = points.len();
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| GestureError::WrongLandmarkCount(len))?;
        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> Landmark {
        self.points[index]
    }
}

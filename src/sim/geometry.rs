//! Axis-aligned rectangles and overlap tests
//!
//! Every collision in the game is a box-vs-box check. Rectangles are
//! anchored at their top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};

/// Top-left anchored axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Check whether two rectangles overlap
///
/// `buffer` shrinks both rectangles on their trailing (right/bottom) edges,
/// which makes hits more forgiving. A buffer at least as large as every
/// dimension involved never reports a hit. Touching edges do not count.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect, buffer: f32) -> bool {
    a.pos.x < b.right() - buffer
        && a.right() - buffer > b.pos.x
        && a.pos.y < b.bottom() - buffer
        && a.bottom() - buffer > b.pos.y
}

/// Clamp a top-left position so a box of `size` stays fully on the canvas
///
/// Boxes larger than the canvas pin to the origin.
#[inline]
pub fn clamp_into_canvas(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.min(GAME_WIDTH - size.x).max(0.0),
        pos.y.min(GAME_HEIGHT - size.y).max(0.0),
    )
}

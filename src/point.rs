//! Pixel coordinates

use serde::{ Serialize, Deserialize };
use std::fmt;

/// An integer pixel coordinate on the 640-pixel-wide framebuffer.
///
/// Reference points may fall outside the screen (negative or past
/// the right edge) when a circle is clipped, so both axes are signed.
#[derive(Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord,
         Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Point {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Debug for Point {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

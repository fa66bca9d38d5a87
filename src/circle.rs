//! Reference midpoint circle model.
//!
//! This is the software model of the rasterizer under test. It walks
//! one octant with integer error tracking and mirrors every step into
//! all eight octants, in the same order the hardware emits them.

use serde::{ Serialize, Deserialize };
use crate::{ Circle, Point, Result, WordAddr, OverflowPolicy };
use crate::addr::raw_word_of;

/// Octant walk flavour.
///
/// The historical report generator used two different walks: the
/// address path stopped after `x == y` was emitted, while the
/// plotting path emitted the starting step twice and stopped before
/// `x == y`. Only [`Traversal::Address`] matches the hardware output.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq,
         Serialize, Deserialize)]
pub enum Traversal {
    /// Emit while `x <= y`.
    #[default]
    Address,
    /// Emit the `(0, r)` step once up front, then emit while `x < y`.
    LegacyPlot,
}

/// The eight mirror images of octant offset `(x, y)` around the
/// centre, in hardware emission order.
#[inline]
fn octants(c: &Circle, x: i64, y: i64) -> [Point; 8] {
    let (xc, yc) = (c.xc, c.yc);
    [
        Point::new(xc + x, yc + y),
        Point::new(xc + y, yc + x),
        Point::new(xc + y, yc - x),
        Point::new(xc + x, yc - y),
        Point::new(xc - x, yc - y),
        Point::new(xc - y, yc - x),
        Point::new(xc - y, yc + x),
        Point::new(xc - x, yc + y),
    ]
}

/// The octant offsets `(x, y)` visited by the midpoint walk.
fn steps(r: i64, traversal: Traversal) -> Vec<(i64, i64)> {
    let mut ret = Vec::new();
    let (mut x, mut y, mut e) = (0, r, r);
    if traversal == Traversal::LegacyPlot {
        ret.push((x, y));
    }
    let go_on = |x: i64, y: i64| match traversal {
        Traversal::Address => x <= y,
        Traversal::LegacyPlot => x < y,
    };
    while go_on(x, y) {
        ret.push((x, y));
        e -= 2 * x;
        x += 1;
        if e < 0 {
            e += 2 * y;
            y -= 1;
        }
    }
    ret
}

impl Circle {
    /// All pixels of the circle, eight per step, in emission order.
    pub fn points(&self, traversal: Traversal) -> Vec<Point> {
        steps(self.r, traversal).into_iter()
            .flat_map(|(x, y)| octants(self, x, y))
            .collect()
    }

    /// The word addresses the hardware is expected to write, in
    /// emission order.
    pub fn word_addrs(&self, policy: OverflowPolicy) -> Result<Vec<WordAddr>> {
        self.points(Traversal::Address).into_iter()
            .map(|p| policy.apply(raw_word_of(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn radius_zero_is_the_centre() {
        let c = Circle { xc: 10, yc: 20, r: 0 };
        let pts = c.points(Traversal::Address);
        assert_eq!(pts.len(), 8);
        assert!(pts.iter().all(|&p| p == Point::new(10, 20)));
    }

    #[test]
    fn radius_five_steps() {
        assert_eq!(steps(5, Traversal::Address),
                   vec![(0, 5), (1, 5), (2, 5), (3, 4), (4, 4)]);
        assert_eq!(steps(5, Traversal::LegacyPlot),
                   vec![(0, 5), (0, 5), (1, 5), (2, 5), (3, 4)]);
    }

    #[test]
    fn points_lie_near_the_circle() {
        for r in 0..40 {
            let c = Circle { xc: 100, yc: 100, r };
            for p in c.points(Traversal::Address) {
                let (dx, dy) = (p.x - c.xc, p.y - c.yc);
                let d2 = dx * dx + dy * dy;
                assert!((d2 - r * r).abs() <= 2 * r,
                        "r={} point {} off by {}", r, p, d2 - r * r);
            }
        }
    }

    #[test]
    fn points_are_symmetric() {
        let c = Circle { xc: 50, yc: 60, r: 13 };
        let pts: HashSet<_> = c.points(Traversal::Address)
            .into_iter().collect();
        for p in &pts {
            let (dx, dy) = (p.x - c.xc, p.y - c.yc);
            assert!(pts.contains(&Point::new(c.xc - dx, c.yc + dy)));
            assert!(pts.contains(&Point::new(c.xc + dy, c.yc + dx)));
        }
    }

    #[test]
    fn first_step_addresses() {
        let c = Circle { xc: 10, yc: 10, r: 5 };
        let addrs = c.word_addrs(OverflowPolicy::Strict).unwrap();
        assert_eq!(addrs.len(), 40);
        // (10, 15) -> (10 + 640 * 15) >> 2 = 2402 = 0x962
        assert_eq!(addrs[0].to_string(), "00962");
        // (15, 10) -> (15 + 6400) >> 2 = 1603 = 0x643
        assert_eq!(addrs[1].to_string(), "00643");
    }

    #[test]
    fn clipped_circle_overflows_strictly() {
        let c = Circle { xc: 0, yc: 0, r: 3 };
        assert!(c.word_addrs(OverflowPolicy::Strict).is_err());
        assert_eq!(c.word_addrs(OverflowPolicy::Truncate).unwrap().len(),
                   c.points(Traversal::Address).len());
    }
}

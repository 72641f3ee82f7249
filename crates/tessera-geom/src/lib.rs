//! Minimal grid geometry types shared by the mesh crates.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// One grid sample: geographic coordinates in degrees plus elevation in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Bitwise identity of a `Position`, usable as a hash key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey([u64; 3]);

impl Position {
    pub const ZERO: Position = Position {
        latitude: 0.0,
        longitude: 0.0,
        elevation: 0.0,
    };

    #[inline]
    pub const fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    /// Returns the welding key. `0.0` and `-0.0` are folded together; NaNs
    /// compare by bit pattern.
    #[inline]
    pub fn key(self) -> PositionKey {
        let bits = |v: f64| if v == 0.0 { 0u64 } else { v.to_bits() };
        PositionKey([
            bits(self.latitude),
            bits(self.longitude),
            bits(self.elevation),
        ])
    }
}

/// Rectangle of interest inside a grid, in grid cells. `right()`/`bottom()`
/// are inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a `width x height` grid.
    #[inline]
    pub const fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Last column covered. Meaningless for an empty rectangle.
    #[inline]
    pub fn right(&self) -> usize {
        (self.x + self.width).saturating_sub(1)
    }

    /// Last row covered. Meaningless for an empty rectangle.
    #[inline]
    pub fn bottom(&self) -> usize {
        (self.y + self.height).saturating_sub(1)
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// True if the rectangle is non-empty and lies inside `[0,width) x [0,height)`.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        !self.is_empty()
            && self.x.checked_add(self.width).is_some_and(|r| r <= width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= height)
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// True for `2^k + 1` with `k >= 0` (2, 3, 5, 9, ...).
#[inline]
pub fn is_pow2_plus_one(n: usize) -> bool {
    n >= 2 && (n - 1).is_power_of_two()
}

/// Largest `2^k + 1` not greater than `n`, or `None` when `n < 2`.
#[inline]
pub fn floor_pow2_plus_one(n: usize) -> Option<usize> {
    if n < 2 {
        return None;
    }
    let m = n - 1;
    let p = 1usize << (usize::BITS - 1 - m.leading_zeros());
    Some(p + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pow2_plus_one_small_values() {
        assert_eq!(floor_pow2_plus_one(0), None);
        assert_eq!(floor_pow2_plus_one(1), None);
        assert_eq!(floor_pow2_plus_one(2), Some(2));
        assert_eq!(floor_pow2_plus_one(4), Some(3));
        assert_eq!(floor_pow2_plus_one(5), Some(5));
        assert_eq!(floor_pow2_plus_one(8), Some(5));
        assert_eq!(floor_pow2_plus_one(1025), Some(1025));
        assert!(is_pow2_plus_one(17));
        assert!(!is_pow2_plus_one(1));
        assert!(!is_pow2_plus_one(6));
    }

    proptest! {
        #[test]
        fn key_is_reflexive(p in any::<Position>()) {
            prop_assert_eq!(p.key(), p.key());
        }
    }
}

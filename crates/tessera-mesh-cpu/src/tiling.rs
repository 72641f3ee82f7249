//! Covers arbitrary rectangles with power-of-two-plus-one squares.

use tessera_geom::{Rect, floor_pow2_plus_one};

/// Which edges of a square are shared with another square of the same build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Seams {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Seams {
    pub const NONE: Seams = Seams {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };

    pub const ALL: Seams = Seams {
        left: true,
        right: true,
        top: true,
        bottom: true,
    };

    /// Marks every edge that does not lie on the border of `bounds`.
    pub fn within(x: usize, y: usize, size: usize, bounds: Rect) -> Self {
        Self {
            left: x > bounds.x,
            right: x + size - 1 < bounds.right(),
            top: y > bounds.y,
            bottom: y + size - 1 < bounds.bottom(),
        }
    }
}

/// A `size x size` block of samples with its top-left corner at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: usize,
    pub y: usize,
    pub size: usize,
    pub seams: Seams,
}

impl Square {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// Tiles `rect` starting from its top-left corner (or the corner picked by
/// the reverse flags). Seams are marked against `rect` itself.
pub fn tile_rect(rect: Rect, reverse_x: bool, reverse_y: bool) -> Vec<Square> {
    let mut out = Vec::new();
    tile_into(rect, reverse_x, reverse_y, &mut out);
    mark_seams(&mut out, rect);
    out
}

/// Tiles `rect` around its central square: the centre goes first, then the
/// top, bottom, left and right strips, each anchored against the centre.
pub fn tile_rect_from_center(rect: Rect) -> Vec<Square> {
    let mut out = Vec::new();
    let Some(size) = floor_pow2_plus_one(rect.width.min(rect.height)) else {
        return out;
    };
    let cx = rect.x + (rect.width - size) / 2;
    let cy = rect.y + (rect.height - size) / 2;
    let cr = cx + size - 1;
    let cb = cy + size - 1;
    out.push(Square {
        x: cx,
        y: cy,
        size,
        seams: Seams::NONE,
    });

    let top = Rect::new(rect.x, rect.y, rect.width, cy - rect.y + 1);
    let bottom = Rect::new(rect.x, cb, rect.width, rect.bottom() - cb + 1);
    let left = Rect::new(rect.x, cy, cx - rect.x + 1, size);
    let right = Rect::new(cr, cy, rect.right() - cr + 1, size);
    tile_into(top, false, true, &mut out);
    tile_into(bottom, false, false, &mut out);
    tile_into(left, true, false, &mut out);
    tile_into(right, false, false, &mut out);

    mark_seams(&mut out, rect);
    out
}

fn mark_seams(squares: &mut [Square], bounds: Rect) {
    for sq in squares {
        sq.seams = Seams::within(sq.x, sq.y, sq.size, bounds);
    }
}

// Carves the largest grid of equal squares from the anchor corner, then
// recurses into the leftover column and row. Neighbouring squares share
// their border samples.
fn tile_into(rect: Rect, reverse_x: bool, reverse_y: bool, out: &mut Vec<Square>) {
    let Some(size) = floor_pow2_plus_one(rect.width.min(rect.height)) else {
        return;
    };
    let step = size - 1;
    let cols = (rect.width - 1) / step;
    let rows = (rect.height - 1) / step;
    let covered_w = cols * step + 1;
    let covered_h = rows * step + 1;
    let bx = if reverse_x {
        rect.x + rect.width - covered_w
    } else {
        rect.x
    };
    let by = if reverse_y {
        rect.y + rect.height - covered_h
    } else {
        rect.y
    };

    for row in 0..rows {
        let r = if reverse_y { rows - 1 - row } else { row };
        for col in 0..cols {
            let c = if reverse_x { cols - 1 - col } else { col };
            out.push(Square {
                x: bx + c * step,
                y: by + r * step,
                size,
                seams: Seams::NONE,
            });
        }
    }

    let rest_w = rect.width - covered_w + 1;
    if rest_w >= 2 {
        let x = if reverse_x { rect.x } else { bx + covered_w - 1 };
        tile_into(Rect::new(x, by, rest_w, covered_h), reverse_x, reverse_y, out);
    }
    let rest_h = rect.height - covered_h + 1;
    if rest_h >= 2 {
        let y = if reverse_y { rect.y } else { by + covered_h - 1 };
        tile_into(Rect::new(rect.x, y, rect.width, rest_h), reverse_x, reverse_y, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every cell of `rect` is covered by exactly one square.
    fn assert_exact_cover(rect: Rect, squares: &[Square]) {
        let mut cover = vec![0u8; rect.area()];
        for sq in squares {
            for y in sq.y..sq.y + sq.size - 1 {
                for x in sq.x..sq.x + sq.size - 1 {
                    assert!(rect.contains(x, y), "{:?} leaves {:?}", sq, rect);
                    cover[(x - rect.x) + (y - rect.y) * rect.width] += 1;
                }
            }
        }
        for y in 0..rect.height - 1 {
            for x in 0..rect.width - 1 {
                assert_eq!(cover[x + y * rect.width], 1, "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn exact_square_is_one_tile_without_seams() {
        let sq = tile_rect(Rect::full(9, 9), false, false);
        assert_eq!(sq.len(), 1);
        assert_eq!(sq[0].size, 9);
        assert_eq!(sq[0].seams, Seams::NONE);
    }

    #[test]
    fn wide_rect_shares_columns() {
        let rect = Rect::full(9, 5);
        let sq = tile_rect(rect, false, false);
        assert_eq!(sq.len(), 2);
        assert_eq!((sq[0].x, sq[1].x), (0, 4));
        assert!(sq[0].seams.right && sq[1].seams.left);
        assert!(!sq[0].seams.left && !sq[1].seams.right);
        assert_exact_cover(rect, &sq);
    }

    #[test]
    fn odd_sizes_are_fully_covered() {
        for (w, h) in [(2, 2), (7, 4), (10, 10), (13, 6), (33, 17), (4, 31)] {
            let rect = Rect::new(1, 2, w, h);
            assert_exact_cover(rect, &tile_rect(rect, false, false));
            assert_exact_cover(rect, &tile_rect(rect, true, true));
            assert_exact_cover(rect, &tile_rect_from_center(rect));
        }
    }

    #[test]
    fn reverse_anchors_at_far_corner() {
        let rect = Rect::full(7, 5);
        let sq = tile_rect(rect, true, true);
        assert_eq!((sq[0].x, sq[0].y, sq[0].size), (2, 0, 5));
    }

    #[test]
    fn thin_strips_produce_nothing() {
        assert!(tile_rect(Rect::full(1, 40), false, false).is_empty());
        assert!(tile_rect_from_center(Rect::full(40, 1)).is_empty());
    }

    #[test]
    fn center_square_comes_first() {
        let sq = tile_rect_from_center(Rect::full(11, 11));
        assert_eq!((sq[0].x, sq[0].y, sq[0].size), (1, 1, 9));
        assert_eq!(sq[0].seams, Seams::ALL);
    }
}

use proptest::prelude::*;
use proptest::strategy::Strategy;
use tessera_geom::{Rect, floor_pow2_plus_one, is_pow2_plus_one};

fn arb_dims() -> impl Strategy<Value = (usize, usize)> {
    (1usize..256, 1usize..256)
}

fn arb_rect_in(w: usize, h: usize) -> impl Strategy<Value = Rect> {
    (0..w, 0..h).prop_flat_map(move |(x, y)| {
        (Just(x), Just(y), 1..=(w - x), 1..=(h - y))
            .prop_map(|(x, y, rw, rh)| Rect::new(x, y, rw, rh))
    })
}

proptest! {
    // Result is of the right form, fits, and the next candidate would not
    #[test]
    fn floor_pow2_plus_one_is_tight(n in 2usize..1_000_000) {
        let s = floor_pow2_plus_one(n).unwrap();
        prop_assert!(is_pow2_plus_one(s));
        prop_assert!(s <= n);
        prop_assert!(2 * (s - 1) + 1 > n);
    }

    // Any generated sub-rectangle fits its grid and contains its own corners
    #[test]
    fn rect_fits_and_contains_corners(((w, h), r) in arb_dims().prop_flat_map(|(w, h)| (Just((w, h)), arb_rect_in(w, h)))) {
        prop_assert!(r.fits_within(w, h));
        prop_assert!(r.contains(r.x, r.y));
        prop_assert!(r.contains(r.right(), r.bottom()));
        prop_assert!(!r.contains(r.right() + 1, r.y));
        prop_assert_eq!(r.area(), r.width * r.height);
    }

    // Shifting a rectangle past the grid edge makes it not fit
    #[test]
    fn rect_shifted_out_does_not_fit((w, h) in arb_dims(), dx in 1usize..64) {
        let r = Rect::new(dx, 0, w, h);
        prop_assert!(!r.fits_within(w, h));
    }
}

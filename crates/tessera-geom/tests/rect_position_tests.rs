use tessera_geom::{Position, Rect};

#[test]
fn position_constants() {
    assert_eq!(Position::ZERO, Position::new(0.0, 0.0, 0.0));
}

#[test]
fn position_key_folds_signed_zero() {
    let a = Position::new(0.0, 10.0, -0.0);
    let b = Position::new(-0.0, 10.0, 0.0);
    assert_eq!(a.key(), b.key());
}

#[test]
fn position_key_distinguishes_elevation() {
    let a = Position::new(1.0, 2.0, 3.0);
    let b = Position::new(1.0, 2.0, 3.000_001);
    assert_ne!(a.key(), b.key());
}

#[test]
fn rect_full_and_bounds() {
    let r = Rect::full(10, 7);
    assert_eq!(r.right(), 9);
    assert_eq!(r.bottom(), 6);
    assert!(r.fits_within(10, 7));
    assert!(!r.fits_within(9, 7));
}

#[test]
fn rect_empty_never_fits() {
    assert!(Rect::new(0, 0, 0, 3).is_empty());
    assert!(!Rect::new(0, 0, 0, 3).fits_within(4, 4));
    assert!(!Rect::new(0, 0, 3, 0).fits_within(4, 4));
}

#[test]
fn rect_overflow_does_not_fit() {
    assert!(!Rect::new(usize::MAX, 0, 2, 2).fits_within(4, 4));
}

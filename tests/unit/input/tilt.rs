use super::*;

#[test]
fn orientation_events_clamp_and_normalize() {
    let tilt = TiltSignal::new();
    tilt.on_orientation_degrees(15.0);
    assert!((tilt.raw() - 0.5).abs() < 1e-6);

    tilt.on_orientation_degrees(60.0);
    assert_eq!(tilt.raw(), 1.0);

    tilt.on_orientation_degrees(-60.0);
    assert_eq!(tilt.raw(), -1.0);
}

#[test]
fn orientation_bound_is_tunable() {
    let tilt = TiltSignal::new().with_orientation_bound(45.0).unwrap();
    tilt.on_orientation_degrees(45.0);
    assert_eq!(tilt.raw(), 1.0);
    tilt.on_orientation_degrees(22.5);
    assert!((tilt.raw() - 0.5).abs() < 1e-6);

    assert!(TiltSignal::new().with_orientation_bound(0.0).is_err());
    assert!(TiltSignal::new().with_orientation_bound(f32::NAN).is_err());
}

#[test]
fn pointer_events_remap_to_signed_range() {
    let tilt = TiltSignal::new();
    tilt.on_pointer(0.0, 800.0);
    assert_eq!(tilt.raw(), -1.0);
    tilt.on_pointer(800.0, 800.0);
    assert_eq!(tilt.raw(), 1.0);
    tilt.on_pointer(400.0, 800.0);
    assert_eq!(tilt.raw(), 0.0);
}

#[test]
fn zero_width_pointer_events_are_ignored() {
    let tilt = TiltSignal::new();
    tilt.on_pointer(100.0, 800.0);
    let before = tilt.raw();
    tilt.on_pointer(50.0, 0.0);
    assert_eq!(tilt.raw(), before);
}

#[test]
fn last_writer_wins_between_streams() {
    let tilt = TiltSignal::new();
    tilt.on_orientation_degrees(30.0);
    assert_eq!(tilt.raw(), 1.0);
    tilt.on_pointer(0.0, 800.0);
    assert_eq!(tilt.raw(), -1.0, "most recent stream wins, no merging");
}

#[test]
fn cloned_handles_share_one_slot() {
    let a = TiltSignal::new();
    let b = a.clone();
    b.on_pointer(800.0, 800.0);
    assert_eq!(a.raw(), 1.0);
}

#[test]
fn filter_step_response_matches_reference_damping() {
    let mut filter = TiltFilter::default();
    let first = filter.advance(1.0);
    assert!((first - 0.1).abs() < 1e-6, "one tick at k=0.1");

    let mut filter = TiltFilter::default();
    let mut prev = 0.0;
    for _ in 0..10 {
        let v = filter.advance(1.0);
        assert!(v > prev, "monotone approach");
        assert!(v <= 1.0, "never overshoots");
        prev = v;
    }
    assert!((filter.value() - 0.6513).abs() < 1e-3, "ten ticks at k=0.1");
}

#[test]
fn filter_rejects_out_of_range_damping() {
    assert!(TiltFilter::new(0.0).is_err());
    assert!(TiltFilter::new(1.5).is_err());
    assert!(TiltFilter::new(1.0).is_ok());
}

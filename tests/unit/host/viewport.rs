use super::*;

#[test]
fn extent_is_height_minus_viewport() {
    let vp = ViewportSnapshot::new(0.0, 3000.0, ViewportSize::new(1024.0, 800.0).unwrap());
    assert_eq!(vp.scrollable_extent(), 2200.0);
    let short = ViewportSnapshot::new(0.0, 500.0, ViewportSize::new(1024.0, 800.0).unwrap());
    assert!(short.scrollable_extent() <= 0.0);
}

#[test]
fn snapshot_round_trips_through_the_trait() {
    let mut vp = ViewportSnapshot::new(12.0, 900.0, ViewportSize::new(300.0, 400.0).unwrap());
    vp.device_pixel_ratio = 2.0;
    assert_eq!(vp.snapshot(), vp);
}

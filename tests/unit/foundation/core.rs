use super::*;

#[test]
fn locator_number_is_one_based() {
    assert_eq!(FrameIndex::FIRST.locator_number(), 1);
    assert_eq!(FrameIndex(95).locator_number(), 96);
}

#[test]
fn viewport_rejects_negative_and_nan() {
    assert!(ViewportSize::new(-1.0, 10.0).is_err());
    assert!(ViewportSize::new(10.0, f64::NAN).is_err());
    assert!(ViewportSize::new(0.0, 0.0).is_ok());
}

#[test]
fn surface_from_viewport_scales_by_dpr() {
    let vp = ViewportSize::new(800.0, 600.0).unwrap();
    assert_eq!(
        SurfaceSize::from_viewport(vp, 1.0),
        SurfaceSize {
            width: 800,
            height: 600
        }
    );
    assert_eq!(
        SurfaceSize::from_viewport(vp, 2.0),
        SurfaceSize {
            width: 1600,
            height: 1200
        }
    );
    assert_eq!(
        SurfaceSize::from_viewport(vp, f64::NAN),
        SurfaceSize::from_viewport(vp, 1.0)
    );
}

#[test]
fn surface_len_and_emptiness() {
    let s = SurfaceSize {
        width: 3,
        height: 2,
    };
    assert_eq!(s.rgba8_len(), 24);
    assert!(!s.is_empty());
    assert!(SurfaceSize::default().is_empty());
}

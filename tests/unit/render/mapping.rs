use super::*;

const N: usize = 96;

#[test]
fn boundaries() {
    let d = 5000.0;
    assert_eq!(frame_index_for_scroll(0.0, d, N), FrameIndex(0));
    assert_eq!(frame_index_for_scroll(d, d, N), FrameIndex(N - 1));
}

#[test]
fn ceil_advances_as_soon_as_a_band_is_entered() {
    let d = 9600.0;
    // One scroll pixel is 1/100th of a frame band.
    assert_eq!(frame_index_for_scroll(1.0, d, N), FrameIndex(1));
    assert_eq!(frame_index_for_scroll(100.0, d, N), FrameIndex(1));
    assert_eq!(frame_index_for_scroll(101.0, d, N), FrameIndex(2));
}

#[test]
fn degenerate_extent_is_frame_zero() {
    for s in [0.0, 10.0, 1e9, -4.0] {
        assert_eq!(frame_index_for_scroll(s, 0.0, N), FrameIndex(0));
        assert_eq!(frame_index_for_scroll(s, -300.0, N), FrameIndex(0));
        assert_eq!(frame_index_for_scroll(s, f64::NAN, N), FrameIndex(0));
        assert_eq!(frame_index_for_scroll(s, f64::INFINITY, N), FrameIndex(0));
    }
}

#[test]
fn overscroll_is_clamped() {
    assert_eq!(frame_index_for_scroll(-50.0, 1000.0, N), FrameIndex(0));
    assert_eq!(frame_index_for_scroll(2500.0, 1000.0, N), FrameIndex(N - 1));
    assert_eq!(frame_index_for_scroll(f64::NAN, 1000.0, N), FrameIndex(0));
}

#[test]
fn monotonic_in_offset() {
    let d = 3217.5;
    let mut prev = FrameIndex(0);
    let mut s = -10.0;
    while s <= d + 10.0 {
        let idx = frame_index_for_scroll(s, d, N);
        assert!(idx >= prev, "index went backwards at offset {s}");
        assert!(idx.0 < N);
        prev = idx;
        s += 0.75;
    }
    assert_eq!(prev, FrameIndex(N - 1));
}

#[test]
fn single_frame_sequence_is_always_zero() {
    assert_eq!(frame_index_for_scroll(700.0, 1000.0, 1), FrameIndex(0));
}

#[test]
fn fraction_is_clamped_and_guarded() {
    assert_eq!(scroll_fraction(250.0, 1000.0), Some(0.25));
    assert_eq!(scroll_fraction(2000.0, 1000.0), Some(1.0));
    assert_eq!(scroll_fraction(10.0, 0.0), None);
}

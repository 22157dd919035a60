use super::*;
use crate::render::fit::contain_fit;

fn size(width: u32, height: u32) -> SurfaceSize {
    SurfaceSize { width, height }
}

#[test]
fn cpu_surface_clear_and_resize() {
    let mut s = CpuSurface::new(size(2, 2), [10, 20, 30, 255]);
    assert_eq!(s.pixel(1, 1), Some([10, 20, 30, 255]));
    s.resize(size(3, 1));
    assert_eq!(s.size(), size(3, 1));
    assert_eq!(s.pixels().len(), 12);
    assert_eq!(s.pixel(2, 0), Some([10, 20, 30, 255]));
    assert_eq!(s.pixel(0, 1), None);
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PreparedFrame {
    PreparedFrame::from_straight_rgba8(w, h, rgba.repeat((w * h) as usize)).unwrap()
}

fn close_to(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}

#[test]
fn cpu_surface_draw_then_snapshot() {
    let mut s = CpuSurface::new(size(4, 2), [0, 0, 0, 0]);
    let frame = solid(1, 1, [0, 255, 0, 255]);
    let placement = contain_fit(s.size().to_size(), frame.size(), 1.0).unwrap();
    s.draw_frame(&frame, &placement).unwrap();

    // 1x1 scaled by 2 into the middle of a 4x2 canvas.
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    assert!(close_to(s.pixel(1, 0).unwrap(), [0, 255, 0, 255]));
    assert!(close_to(s.pixel(2, 1).unwrap(), [0, 255, 0, 255]));
    assert_eq!(s.pixel(3, 1), Some([0, 0, 0, 0]));

    let snap = s.snapshot();
    assert!(snap.premultiplied);
    assert_eq!((snap.width, snap.height), (4, 2));
    assert_eq!(snap.data.len(), 32);
}

#[test]
fn cpu_surface_letterboxes_over_clear_color() {
    let mut s = CpuSurface::new(size(16, 16), [0, 0, 255, 255]);
    let frame = solid(4, 8, [255, 0, 0, 255]);
    let placement = contain_fit(s.size().to_size(), frame.size(), 1.0).unwrap();
    assert_eq!(placement.dx(), 4.0);
    s.draw_frame(&frame, &placement).unwrap();

    for y in [0, 7, 15] {
        assert!(close_to(s.pixel(1, y).unwrap(), [0, 0, 255, 255]), "left bar row {y}");
        assert!(close_to(s.pixel(8, y).unwrap(), [255, 0, 0, 255]), "image row {y}");
        assert!(close_to(s.pixel(14, y).unwrap(), [0, 0, 255, 255]), "right bar row {y}");
    }
}

#[test]
fn cpu_surface_keeps_source_row_order() {
    let mut s = CpuSurface::new(size(8, 16), [0, 0, 0, 0]);
    let mut data = [255, 0, 0, 255].repeat(4);
    data.extend([0, 0, 255, 255].repeat(4));
    let frame = PreparedFrame::from_straight_rgba8(2, 4, data).unwrap();
    let placement = contain_fit(s.size().to_size(), frame.size(), 1.0).unwrap();
    s.draw_frame(&frame, &placement).unwrap();

    let top = s.pixel(4, 1).unwrap();
    let bottom = s.pixel(4, 14).unwrap();
    assert!(top[0] > 200 && top[2] < 50, "top {top:?}");
    assert!(bottom[2] > 200 && bottom[0] < 50, "bottom {bottom:?}");
}

#[test]
fn clear_discards_previous_draws() {
    let mut s = CpuSurface::new(size(4, 4), [0, 0, 0, 0]);
    let frame = solid(1, 1, [255, 255, 255, 255]);
    let placement = contain_fit(s.size().to_size(), frame.size(), 1.0).unwrap();
    s.draw_frame(&frame, &placement).unwrap();
    assert!(s.pixels().iter().any(|&b| b != 0));
    s.clear();
    assert!(s.pixels().iter().all(|&b| b == 0));
}

#[test]
fn oversized_surface_refuses_to_draw() {
    let mut s = CpuSurface::new(size(70_000, 1), [0, 0, 0, 0]);
    assert!(s.pixels().is_empty());
    let frame = solid(1, 1, [0, 0, 0, 255]);
    let placement = contain_fit(s.size().to_size(), frame.size(), 1.0).unwrap();
    let err = s.draw_frame(&frame, &placement).unwrap_err();
    assert!(matches!(err, ScrubError::Render(_)));
}

#[test]
fn empty_surface_draw_is_a_noop() {
    let mut s = CpuSurface::new(SurfaceSize::default(), [0, 0, 0, 0]);
    let frame = solid(1, 1, [0, 0, 0, 255]);
    let canvas = crate::foundation::core::Size::new(1.0, 1.0);
    let placement = contain_fit(canvas, frame.size(), 1.0).unwrap();
    assert!(s.draw_frame(&frame, &placement).is_ok());
    assert!(s.pixels().is_empty());
}

#[test]
fn into_straight_unpremultiplies() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    }
    .into_straight();
    assert!(!f.premultiplied);
    assert_eq!(f.data, vec![128, 0, 0, 128]);
}

#[test]
fn recording_surface_captures_calls() {
    let mut s = RecordingSurface::new(size(10, 10));
    let frame = solid(5, 10, [0, 0, 0, 0]);
    let placement = contain_fit(s.size().to_size(), frame.size(), 1.0).unwrap();
    s.clear();
    s.draw_frame(&frame, &placement).unwrap();
    s.resize(size(20, 20));
    assert_eq!(s.ops().len(), 3);
    assert_eq!(s.draws().count(), 1);
    assert_eq!(s.ops()[2], SurfaceOp::Resize(size(20, 20)));
}

use super::*;

#[test]
fn burst_of_requests_yields_one_redraw_of_latest() {
    let mut slot = RedrawSlot::new();
    assert!(slot.request(FrameIndex(3)));
    assert!(!slot.request(FrameIndex(4)));
    assert!(!slot.request(FrameIndex(9)));
    assert_eq!(slot.coalesced(), 2);

    assert_eq!(slot.take(), Some(FrameIndex(9)));
    assert_eq!(slot.take(), None);
}

#[test]
fn cancel_clears_pending() {
    let mut slot = RedrawSlot::new();
    slot.request(FrameIndex(1));
    slot.cancel();
    assert_eq!(slot.pending(), None);
    assert!(slot.request(FrameIndex(2)));
}

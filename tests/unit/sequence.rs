use super::*;

#[test]
fn locators_are_zero_padded_and_one_based() {
    let seq = SequenceDescriptor::default();
    assert_eq!(seq.locator(1).unwrap(), "/slide/ezgif-frame-001.jpg");
    assert_eq!(seq.locator(96).unwrap(), "/slide/ezgif-frame-096.jpg");
    assert_eq!(
        seq.locator_for(FrameIndex(9)).unwrap(),
        "/slide/ezgif-frame-010.jpg"
    );
}

#[test]
fn every_playback_index_maps_to_its_locator() {
    let seq = SequenceDescriptor::new("frames", 96).unwrap();
    let all: Vec<_> = seq.locators().collect();
    assert_eq!(all.len(), 96);
    for (i, (index, loc)) in all.iter().enumerate() {
        assert_eq!(*index, FrameIndex(i));
        assert_eq!(loc, &format!("frames/ezgif-frame-{:03}.jpg", i + 1));
        assert_eq!(loc, &seq.locator(i + 1).unwrap());
    }
}

#[test]
fn out_of_range_numbers_are_rejected() {
    let seq = SequenceDescriptor::default();
    assert!(seq.locator(0).is_err());
    assert!(seq.locator(97).is_err());
}

#[test]
fn trailing_separators_are_trimmed() {
    let seq = SequenceDescriptor::new("/slide/", 3).unwrap();
    assert_eq!(seq.base_dir(), "/slide");
    assert_eq!(seq.locator(3).unwrap(), "/slide/ezgif-frame-003.jpg");
}

#[test]
fn zero_frames_is_invalid() {
    assert!(SequenceDescriptor::new("x", 0).is_err());
}

#[test]
fn numbers_past_three_digits_are_not_truncated() {
    let seq = SequenceDescriptor::new("s", 1200).unwrap();
    assert_eq!(seq.locator(1200).unwrap(), "s/ezgif-frame-1200.jpg");
    assert_eq!(seq.last_index(), FrameIndex(1199));
}

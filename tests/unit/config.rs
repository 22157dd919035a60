use super::*;

#[test]
fn empty_object_yields_stock_sequence() {
    let cfg = SequenceConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, SequenceConfig::default());
    let seq = cfg.descriptor().unwrap();
    assert_eq!(seq.frame_count(), 96);
    assert_eq!(seq.locator(1).unwrap(), "/slide/ezgif-frame-001.jpg");
}

#[test]
fn fields_override_defaults() {
    let cfg = SequenceConfig::from_json_str(
        r#"{
            "base_dir": "frames",
            "frame_count": 12,
            "fit": { "mobile_breakpoint": 600 },
            "hidpi": true,
            "failure_policy": "degrade",
            "clear_rgba": [0, 0, 0, 255]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.frame_count, 12);
    assert_eq!(cfg.fit.mobile_breakpoint, 600.0);
    assert_eq!(cfg.fit.mobile_scale, 0.8);
    assert_eq!(cfg.failure_policy, FailurePolicy::Degrade);
    assert!(cfg.render_options().hidpi);
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(matches!(
        SequenceConfig::from_json_str(r#"{"frame_count": 0}"#),
        Err(ScrubError::Validation(_))
    ));
    assert!(matches!(
        SequenceConfig::from_json_str(r#"{"frames": 3}"#),
        Err(ScrubError::Serde(_))
    ));
    assert!(SequenceConfig::from_json_str(r#"{"fit": {"mobile_scale": -1}}"#).is_err());
}

#[test]
fn missing_file_keeps_context() {
    let err = SequenceConfig::from_json_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("open config"));
}

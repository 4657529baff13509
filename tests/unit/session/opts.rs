use super::*;

#[test]
fn empty_object_uses_defaults() {
    let opts = SessionOpts::from_json("{}").unwrap();
    assert_eq!(opts, SessionOpts::default());
    assert_eq!(opts.dpi, 300);
    assert_eq!(opts.output, OutputFormat::Jpeg { quality: 95 });
    assert_eq!(opts.threads, None);
}

#[test]
fn fields_override_individually() {
    let opts =
        SessionOpts::from_json(r#"{"dpi": 150, "output": {"format": "png"}, "threads": 2}"#)
            .unwrap();
    assert_eq!(opts.dpi, 150);
    assert_eq!(opts.output, OutputFormat::Png);
    assert_eq!(opts.threads, Some(2));

    let opts = SessionOpts::from_json(r#"{"output": {"format": "jpeg"}}"#).unwrap();
    assert_eq!(opts.output, OutputFormat::Jpeg { quality: 95 });
}

#[test]
fn invalid_values_are_validation_errors() {
    for json in [
        r#"{"dpi": 0}"#,
        r#"{"threads": 0}"#,
        r#"{"output": {"format": "jpeg", "quality": 0}}"#,
        r#"{"output": {"format": "jpeg", "quality": 101}}"#,
    ] {
        let err = SessionOpts::from_json(json).unwrap_err();
        assert!(err.is_validation(), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SessionOpts::from_json(r#"{"dpi": "high"}"#).unwrap_err();
    assert!(matches!(err, BoothError::Serde(_)), "{err}");

    let err = SessionOpts::from_json(r#"{"colour": "red"}"#).unwrap_err();
    assert!(matches!(err, BoothError::Serde(_)), "{err}");
}

#[test]
fn missing_file_carries_path_context() {
    let err = SessionOpts::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, BoothError::Other(_)));
    assert!(err.to_string().contains("here.json"), "{err}");
}

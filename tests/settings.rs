use std::time::Duration;

use reframe_news::Settings;

#[test]
fn offline_defaults_are_valid() {
    let settings = Settings::offline("in.csv", "out.csv");
    assert!(settings.validate().is_ok());
    assert_eq!(settings.request_timeout, Duration::from_secs(120));
}

#[test]
fn zero_timeout_is_rejected() {
    let mut settings = Settings::offline("in.csv", "out.csv");
    settings.request_timeout = Duration::ZERO;
    let err = settings.validate().unwrap_err();
    assert!(err.to_string().contains("timeout"));
}

#[test]
fn zero_concurrency_and_non_square_size_are_rejected() {
    let mut settings = Settings::offline("in.csv", "out.csv");
    settings.concurrency = 0;
    assert!(settings.validate().is_err());

    let mut settings = Settings::offline("in.csv", "out.csv");
    settings.image_size = "512x256".into();
    assert!(settings.validate().is_err());
}

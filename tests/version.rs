//! Integration tests for version detection.
use eft_locator::{
    version_token, DetectorConfig, LocatorError, ProductVersionReader, Result, VersionDetector,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

struct Fixed(&'static str);

impl ProductVersionReader for Fixed {
    fn product_version(&self, _exe: &Path) -> Result<String> {
        Ok(self.0.to_string())
    }
}

#[test]
fn extracts_second_to_last_segment() {
    assert_eq!(version_token("1.2.3-45678").unwrap().to_string(), "3");
}

#[test]
fn detects_version_of_installed_executable() {
    let d = tempdir().unwrap();
    fs::write(d.path().join("EscapeFromTarkov.exe"), b"MZ").unwrap();

    let token = VersionDetector::new(Fixed("0.16.1.3-35392"))
        .detect(d.path())
        .unwrap();
    assert_eq!(token.as_str(), "3");
}

#[test]
fn missing_executable_is_reported_with_path() {
    let d = tempdir().unwrap();
    let detector = VersionDetector::for_config(Fixed("1.2.3.4"), &DetectorConfig::default());

    match detector.detect(d.path()) {
        Err(LocatorError::VersionUnreadable { path, .. }) => {
            assert_eq!(path, d.path().join("EscapeFromTarkov.exe"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn malformed_version_is_a_format_error() {
    let d = tempdir().unwrap();
    fs::write(d.path().join("Game.exe"), b"MZ").unwrap();

    let err = VersionDetector::new(Fixed("unknown"))
        .executable("Game.exe")
        .detect(d.path())
        .unwrap_err();
    assert!(matches!(err, LocatorError::VersionFormat { .. }));
}

#[cfg(not(target_os = "windows"))]
#[test]
fn file_version_reader_is_unavailable_off_windows() {
    let d = tempdir().unwrap();
    fs::write(d.path().join("EscapeFromTarkov.exe"), b"MZ").unwrap();

    let err = VersionDetector::default().detect(d.path()).unwrap_err();
    assert!(matches!(err, LocatorError::VersionUnreadable { .. }));
    assert!(err.to_string().starts_with("File not found:"));
}

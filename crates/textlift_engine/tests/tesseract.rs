use std::path::PathBuf;
use std::sync::Arc;

use textlift_core::InputItem;
use textlift_engine::{
    EngineError, EngineFactory, ExtractionError, ExtractionOrchestrator, ExtractionSettings,
    NullProgressSink, StatusPublisher, TesseractFactory, TesseractSettings,
};

fn missing_binary() -> TesseractSettings {
    TesseractSettings {
        binary_path: Some(PathBuf::from("/nonexistent/path/to/tesseract")),
        ..TesseractSettings::default()
    }
}

#[tokio::test]
async fn missing_binary_fails_engine_creation() {
    let factory = TesseractFactory::new(missing_binary());

    let result = factory.create(Arc::new(NullProgressSink)).await;

    let err = result.err().expect("spawn failure");
    assert!(err.to_string().contains("/nonexistent/path/to/tesseract"));
}

#[tokio::test]
async fn missing_binary_aborts_extraction() {
    let orchestrator = ExtractionOrchestrator::new(
        Arc::new(TesseractFactory::new(missing_binary())),
        ExtractionSettings::default(),
    );
    let (status, _rx) = StatusPublisher::channel();

    let result = orchestrator
        .extract(&[InputItem::new("a.png", vec![1, 2, 3])], &status)
        .await;

    assert!(matches!(result, Err(ExtractionError::Acquire(_))));
}

/// Stand-in for the tesseract CLI: answers the version and language probes,
/// fails on inputs containing `BROKEN`, and otherwise prints the input, its
/// remaining arguments and `TESSDATA_PREFIX`, ending with a form feed.
#[cfg(unix)]
const FAKE_TESSERACT: &str = r#"#!/bin/sh
case "$1" in
  --version) echo "tesseract 5.3.0"; exit 0 ;;
  --list-langs) printf 'List of available languages in "/fake" (2):\neng\ndeu\n'; exit 0 ;;
esac
input="$1"
shift
if grep -q BROKEN "$input"; then
  echo "Error in pixReadMem: Unknown format" >&2
  exit 1
fi
printf '%s\n[%s]\n[%s]\f' "$(cat "$input")" "$*" "$TESSDATA_PREFIX"
"#;

#[cfg(unix)]
fn fake_tesseract(dir: &std::path::Path) -> TesseractSettings {
    use std::os::unix::fs::PermissionsExt;

    let binary = dir.join("tesseract");
    std::fs::write(&binary, FAKE_TESSERACT).unwrap();
    std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();
    TesseractSettings {
        binary_path: Some(binary),
        tessdata_path: Some(dir.join("tessdata")),
        psm: 6,
        oem: 1,
    }
}

#[cfg(unix)]
#[tokio::test]
async fn recognize_passes_language_and_modes_and_strips_form_feed() {
    let temp = tempfile::TempDir::new().unwrap();
    let settings = fake_tesseract(temp.path());
    let tessdata = temp.path().join("tessdata");
    let factory = TesseractFactory::new(settings);

    let mut engine = factory.create(Arc::new(NullProgressSink)).await.unwrap();
    engine.load_language("eng+deu").await.unwrap();
    engine.initialize("eng+deu").await.unwrap();
    let recognition = engine.recognize(b"HELLO").await.unwrap();
    engine.terminate().await.unwrap();

    assert_eq!(
        recognition.text,
        format!(
            "HELLO\n[stdout -l eng+deu --psm 6 --oem 1]\n[{}]",
            tessdata.display()
        )
    );
}

#[cfg(unix)]
#[tokio::test]
async fn each_part_of_a_joined_language_must_be_installed() {
    let temp = tempfile::TempDir::new().unwrap();
    let factory = TesseractFactory::new(fake_tesseract(temp.path()));

    let mut engine = factory.create(Arc::new(NullProgressSink)).await.unwrap();
    let err = engine.load_language("eng+fra").await.unwrap_err();

    assert!(
        matches!(&err, EngineError::UnsupportedLanguage(lang) if lang == "fra"),
        "{err}"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn recognize_before_initialize_is_rejected() {
    let temp = tempfile::TempDir::new().unwrap();
    let factory = TesseractFactory::new(fake_tesseract(temp.path()));

    let mut engine = factory.create(Arc::new(NullProgressSink)).await.unwrap();
    let err = engine.recognize(b"HELLO").await.unwrap_err();

    assert!(matches!(err, EngineError::NotInitialized), "{err}");
}

#[cfg(unix)]
#[tokio::test]
async fn failing_exit_becomes_an_error_section_with_stderr() {
    let temp = tempfile::TempDir::new().unwrap();
    let orchestrator = ExtractionOrchestrator::new(
        Arc::new(TesseractFactory::new(fake_tesseract(temp.path()))),
        ExtractionSettings::default(),
    );
    let (status, _rx) = StatusPublisher::channel();
    let items = [
        InputItem::new("a.png", b"HELLO".to_vec()),
        InputItem::new("b.png", b"BROKEN".to_vec()),
    ];

    let report = orchestrator.extract(&items, &status).await.unwrap();

    assert_eq!(report.failure_count(), 1);
    assert!(report.text().starts_with("--- TEXT FROM IMAGE: a.png ---\n\nHELLO\n"));
    let error_section = report
        .text()
        .split("--- ERROR PROCESSING: b.png ---")
        .nth(1)
        .expect("error section");
    assert!(
        error_section.contains("Error in pixReadMem: Unknown format"),
        "{error_section}"
    );
}

#[tokio::test]
#[ignore = "requires a local tesseract installation"]
async fn local_tesseract_reports_invalid_image_as_section() {
    let orchestrator = ExtractionOrchestrator::new(
        Arc::new(TesseractFactory::default()),
        ExtractionSettings::default(),
    );
    let (status, _rx) = StatusPublisher::channel();

    let report = orchestrator
        .extract(&[InputItem::new("b.png", b"not an image".to_vec())], &status)
        .await
        .expect("engine available");

    assert_eq!(report.failure_count(), 1);
    assert!(report.text().starts_with("--- ERROR PROCESSING: b.png ---"));
}

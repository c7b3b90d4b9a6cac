//! Tests for the subprocess-backed generation library
#![cfg(unix)]

use duet_gen::{CommandGenerator, ContentSources, GenerationCall, GenerationError, GenerationLibrary};
use duet_spk::conversation::ConversationConfig;
use duet_spk::model::ModelSelection;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn call(output_dir: &Path, temp_dir: Option<PathBuf>) -> GenerationCall {
    GenerationCall {
        sources: ContentSources {
            text: Some("hello world".to_string()),
            ..Default::default()
        },
        conversation: ConversationConfig::default(),
        transcript_file: None,
        tts: None,
        model: ModelSelection::default(),
        transcript_only: true,
        output_dir: output_dir.to_path_buf(),
        temp_dir,
    }
}

/// Scripts run through `sh` so the test never executes a freshly written file
fn script(dir: &Path, body: &str) -> CommandGenerator {
    let path = dir.join("generator.sh");
    std::fs::write(&path, body).unwrap();
    CommandGenerator::new("sh", vec![path.to_string_lossy().into_owned()])
}

#[tokio::test]
async fn test_last_stdout_line_is_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let generator = script(
        dir.path(),
        "cat > \"$(dirname \"$0\")/call.json\"\necho 'progress: 50%'\necho /data/transcripts/out.txt\necho\n",
    );

    let path = generator.generate(call(dir.path(), None)).await.unwrap();
    assert_eq!(path, PathBuf::from("/data/transcripts/out.txt"));

    let payload: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("call.json")).unwrap()).unwrap();
    assert_eq!(payload["sources"]["text"], "hello world");
    assert_eq!(payload["transcript_only"], true);
    assert_eq!(payload["conversation"]["max_num_chunks"], 8);
}

#[tokio::test]
async fn test_temp_dir_scoped_to_child() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = dir.path().join("scratch");
    std::fs::create_dir_all(&scratch).unwrap();
    let generator = script(dir.path(), "echo \"$TMPDIR\"\n");

    let before = std::env::var_os("TMPDIR");
    let path = generator
        .generate(call(dir.path(), Some(scratch.clone())))
        .await
        .unwrap();

    assert_eq!(path, scratch);
    assert_eq!(std::env::var_os("TMPDIR"), before);
}

#[tokio::test]
async fn test_large_payload_with_chatty_generator() {
    let dir = tempfile::tempdir().unwrap();
    // Fills the stderr pipe before reading any input
    let generator = script(
        dir.path(),
        "head -c 200000 /dev/zero | tr '\\0' x >&2\ncat > /dev/null\necho /tmp/out.txt\n",
    );

    let mut request = call(dir.path(), None);
    request.sources.text = Some("word ".repeat(40_000));

    let outcome = tokio::time::timeout(Duration::from_secs(20), generator.generate(request))
        .await
        .expect("generator call stalled");
    assert_eq!(outcome.unwrap(), PathBuf::from("/tmp/out.txt"));
}

#[tokio::test]
async fn test_failure_reports_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let generator = script(dir.path(), "echo 'model quota exceeded' >&2\nexit 3\n");

    let err = generator.generate(call(dir.path(), None)).await.unwrap_err();
    match err {
        GenerationError::Failed { stderr, .. } => assert_eq!(stderr, "model quota exceeded"),
        other => panic!("Expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_output_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let generator = script(dir.path(), "exit 0\n");

    let err = generator.generate(call(dir.path(), None)).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyOutput));
}

#[tokio::test]
async fn test_missing_program() {
    let dir = tempfile::tempdir().unwrap();
    let generator = CommandGenerator::new(
        dir.path().join("no-such-generator").to_string_lossy(),
        Vec::new(),
    );

    assert!(!generator.is_available());
    let err = generator.generate(call(dir.path(), None)).await.unwrap_err();
    assert!(matches!(err, GenerationError::Spawn { .. }));
}

#[test]
fn test_shell_is_available() {
    assert!(CommandGenerator::new("sh", Vec::new()).is_available());
}

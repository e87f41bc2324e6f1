//! Tests for batch directory conversion.

mod common;

use cardsmith_engine::{BackendError, Engine, Error};
use common::{StubBackend, deck_json, read_rows, requested_deck_name, write_markdown};
use tempfile::tempdir;

/// Backend that echoes the requested deck name and fails for `fail_for`.
fn echo_backend(fail_for: &'static str) -> StubBackend {
    StubBackend::new(move |request| {
        let name = requested_deck_name(request);
        if name == fail_for {
            Err(BackendError::other("malformed structured output"))
        } else {
            Ok(deck_json(&name, 2))
        }
    })
}

#[tokio::test]
async fn test_one_failure_does_not_abort_batch() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_markdown(input.path(), "baroque.md", "Bach");
    write_markdown(input.path(), "modern.md", "Picasso");
    write_markdown(input.path(), "romantic.md", "Chopin");

    let stub = echo_backend("Modern");
    let engine = Engine::new(&stub);

    let decks = engine
        .batch()
        .process_directory(input.path(), output.path(), 2)
        .await
        .unwrap();

    assert_eq!(decks.len(), 2);
    assert_eq!(stub.calls(), 3);
    assert!(output.path().join("baroque-flashcards.csv").exists());
    assert!(!output.path().join("modern-flashcards.csv").exists());
    assert!(output.path().join("romantic-flashcards.csv").exists());
}

#[tokio::test]
async fn test_report_records_failures() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_markdown(input.path(), "a.md", "1");
    write_markdown(input.path(), "b.md", "2");
    write_markdown(input.path(), "c.md", "3");

    let stub = echo_backend("B");
    let engine = Engine::new(&stub);

    let report = engine
        .batch()
        .process_directory_report(input.path(), output.path(), 2)
        .await
        .unwrap();

    assert_eq!(report.considered, 3);
    assert_eq!(report.decks.len(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file, "b.md");
    assert!(report.failures[0].error.contains("malformed structured output"));
    assert_eq!(report.output_dir, output.path());
}

#[tokio::test]
async fn test_decks_follow_sorted_file_order() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    for name in ["zeta.md", "alpha.md", "mid.md"] {
        write_markdown(input.path(), name, "text");
    }

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let decks = engine
        .batch()
        .process_directory(input.path(), output.path(), 2)
        .await
        .unwrap();

    let names: Vec<&str> = decks.iter().map(|d| d.deck_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
}

#[tokio::test]
async fn test_naming_derivation() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_markdown(input.path(), "american-gothic_lit.md", "Poe");

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let decks = engine
        .batch()
        .process_directory(input.path(), output.path(), 2)
        .await
        .unwrap();

    assert_eq!(decks[0].deck_name, "American Gothic Lit");
    assert_eq!(requested_deck_name(&stub.requests()[0]), "American Gothic Lit");

    let csv = output.path().join("american-gothic_lit-flashcards.csv");
    assert_eq!(read_rows(&csv).len(), 3);
}

#[tokio::test]
async fn test_only_markdown_files_are_considered() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_markdown(input.path(), "essay.md", "text");
    write_markdown(input.path(), "notes.txt", "ignored");
    write_markdown(input.path(), "README.MD", "ignored");
    std::fs::create_dir(input.path().join("folder.md")).unwrap();
    std::fs::create_dir(input.path().join("nested")).unwrap();
    write_markdown(&input.path().join("nested"), "deep.md", "not visited");

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let report = engine
        .batch()
        .process_directory_report(input.path(), output.path(), 2)
        .await
        .unwrap();

    assert_eq!(report.considered, 1);
    assert_eq!(report.decks.len(), 1);
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_missing_input_dir_is_not_found() {
    let root = tempdir().unwrap();
    let output = root.path().join("out");

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let result = engine
        .batch()
        .process_directory(root.path().join("missing"), &output, 5)
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(!output.exists());
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_file_as_input_dir_is_not_found() {
    let root = tempdir().unwrap();
    write_markdown(root.path(), "essay.md", "text");

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let result = engine
        .batch()
        .process_directory(root.path().join("essay.md"), root.path().join("out"), 5)
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_output_dir_is_created() {
    let input = tempdir().unwrap();
    let root = tempdir().unwrap();
    let output = root.path().join("decks").join("2024");

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let decks = engine
        .batch()
        .process_directory(input.path(), &output, 5)
        .await
        .unwrap();

    assert!(decks.is_empty());
    assert!(output.is_dir());
}

#[tokio::test]
async fn test_zero_cards_fails_each_document() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_markdown(input.path(), "a.md", "1");
    write_markdown(input.path(), "b.md", "2");

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let decks = engine
        .batch()
        .process_directory(input.path(), output.path(), 0)
        .await
        .unwrap();

    assert!(decks.is_empty());
    assert_eq!(stub.calls(), 0);
    assert!(!output.path().join("a-flashcards.csv").exists());
}

#[tokio::test]
async fn test_zero_cards_reported_per_document() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_markdown(input.path(), "a.md", "1");

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let report = engine
        .batch()
        .process_directory_report(input.path(), output.path(), 0)
        .await
        .unwrap();

    assert_eq!(report.considered, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file, "a.md");
    assert!(report.failures[0].error.starts_with("validation error"));
}

#[tokio::test]
async fn test_missing_input_with_zero_cards_is_not_found() {
    let root = tempdir().unwrap();
    let input = root.path().join("missing");
    let output = root.path().join("out");

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    let result = engine.batch().process_directory(&input, &output, 0).await;

    assert!(matches!(result, Err(Error::NotFound(p)) if p == input));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_every_document_failing_still_returns() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_markdown(input.path(), "a.md", "1");
    write_markdown(input.path(), "b.md", "2");

    let stub = StubBackend::failing("timeout");
    let engine = Engine::new(&stub);

    let report = engine
        .batch()
        .process_directory_report(input.path(), output.path(), 3)
        .await
        .unwrap();

    assert!(report.decks.is_empty());
    assert_eq!(report.failed(), 2);
}

#[tokio::test]
async fn test_rerun_overwrites_outputs() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_markdown(input.path(), "essay.md", "text");
    let stale = output.path().join("essay-flashcards.csv");
    std::fs::write(&stale, "stale\n".repeat(100)).unwrap();

    let stub = echo_backend("");
    let engine = Engine::new(&stub);

    engine
        .batch()
        .process_directory(input.path(), output.path(), 2)
        .await
        .unwrap();

    let rows = read_rows(&stale);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["Question", "Answer", "Tags"]);
}

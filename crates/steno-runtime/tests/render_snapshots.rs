// Snapshot tests - free-flow rendering of sample session files
use std::path::Path;
use steno_runtime::{parse_document, render_free_flow};

#[test]
fn test_augmented_session_snapshot() {
    let path = Path::new("tests/samples/augmented_session.json");

    if !path.exists() {
        eprintln!("Warning: Test file not found, skipping: {}", path.display());
        return;
    }

    let content = std::fs::read_to_string(path).expect("Failed to read sample");
    let record = parse_document(&content).expect("Failed to parse sample session");

    assert_eq!(record.statement_count, 3);
    assert_eq!(record.session_statements.len(), 3);

    let text = render_free_flow(&record);
    assert!(text.ends_with("Unknown Position (ID: Наталия Петрова):\n\n\n"));
    insta::assert_snapshot!("augmented_session_text", text.trim_end());
}

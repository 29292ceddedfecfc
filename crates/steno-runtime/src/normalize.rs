use crate::config::{ConvertConfig, FailurePolicy};
use crate::storage::{list_files_with_extension, write_text};
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use steno_types::SessionRecord;

/// Parse a session file body, keeping only the first session of a list.
pub fn parse_document(text: &str) -> Result<SessionRecord> {
    Ok(SessionRecord::from_json(text)?)
}

/// Render a session as free-flow text: a header block followed by one
/// paragraph block per statement, in input order.
pub fn render_free_flow(record: &SessionRecord) -> String {
    let mut text = format!(
        "Session Title: {}\nDate: {}\nTotal Statements: {}\nTotal Participants: {}\n\n",
        record.title(),
        record.date(),
        record.statement_count,
        record.person_count
    );

    for statement in &record.session_statements {
        text.push_str(&format!(
            "{} (ID: {}):\n{}\n\n",
            statement.position(),
            statement.speaker(),
            statement.joined_paragraphs()
        ));
    }

    text
}

#[derive(Debug, Clone)]
pub enum ConvertProgress {
    InputDirMissing { dir: PathBuf },
    Converted { input: PathBuf, output: PathBuf },
    Failed { input: PathBuf, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

pub struct Normalizer {
    config: ConvertConfig,
}

impl Normalizer {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// `{output_dir}/{stem}.txt`
    pub fn output_path(&self, input: &Path) -> Result<PathBuf> {
        let stem = input
            .file_stem()
            .ok_or_else(|| Error::InvalidInput(format!("no file name: {}", input.display())))?;
        let mut name = stem.to_os_string();
        name.push(".txt");
        Ok(self.config.output_dir.join(name))
    }

    /// Convert one JSON file, returning the path of the written text file.
    pub fn convert_file(&self, input: &Path) -> Result<PathBuf> {
        let text = std::fs::read_to_string(input)?;
        let record = parse_document(&text)?;
        let output = self.output_path(input)?;
        write_text(&output, &render_free_flow(&record))?;
        Ok(output)
    }

    /// Convert every `.json` file directly inside `dir`, in file name order.
    pub fn convert_dir<F>(&self, dir: &Path, report: &mut ConvertReport, mut on_progress: F) -> Result<()>
    where
        F: FnMut(ConvertProgress),
    {
        let files = match list_files_with_extension(dir, "json") {
            Ok(files) => files,
            Err(err) if self.config.failure_policy == FailurePolicy::BestEffort => {
                tracing::warn!(dir = %dir.display(), error = %err, "skipping input folder");
                on_progress(ConvertProgress::InputDirMissing {
                    dir: dir.to_path_buf(),
                });
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        for input in files {
            match self.convert_file(&input) {
                Ok(output) => {
                    tracing::info!(input = %input.display(), output = %output.display(), "processed");
                    on_progress(ConvertProgress::Converted {
                        input: input.clone(),
                        output,
                    });
                    report.converted.push(input);
                }
                Err(err) if self.config.failure_policy == FailurePolicy::BestEffort => {
                    tracing::warn!(input = %input.display(), error = %err, "failed to convert, skipping");
                    on_progress(ConvertProgress::Failed {
                        input: input.clone(),
                        error: err.to_string(),
                    });
                    report.failed.push(FailedFile {
                        path: input,
                        error: err.to_string(),
                    });
                }
                Err(err) => {
                    tracing::error!(input = %input.display(), error = %err, "failed to convert");
                    return Err(Error::File {
                        path: input,
                        source: Box::new(err),
                    });
                }
            }
        }

        Ok(())
    }

    /// Convert every configured input folder.
    pub fn run<F>(&self, mut on_progress: F) -> Result<ConvertReport>
    where
        F: FnMut(ConvertProgress),
    {
        let mut report = ConvertReport::default();

        for dir in &self.config.input_dirs {
            self.convert_dir(dir, &mut report, &mut on_progress)?;
        }

        tracing::info!(
            converted = report.converted.len(),
            failed = report.failed.len(),
            "all files processed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{"parlSession":{"title":"T","date":"D"},"statementCount":1,"personCount":2,"sessionStatements":[{"position":"Chair","title":"Jane Doe","paragraphs":["Hello","World"]}]}"#;

    fn normalizer(dir: &TempDir, inputs: &[&str], policy: FailurePolicy) -> Normalizer {
        Normalizer::new(ConvertConfig {
            input_dirs: inputs.iter().map(|i| dir.path().join(i)).collect(),
            output_dir: dir.path().join("output"),
            failure_policy: policy,
        })
    }

    #[test]
    fn test_render_full_record() {
        let record = parse_document(SAMPLE).unwrap();
        assert_eq!(
            render_free_flow(&record),
            "Session Title: T\nDate: D\nTotal Statements: 1\nTotal Participants: 2\n\nChair (ID: Jane Doe):\nHello World\n\n"
        );
    }

    #[test]
    fn test_render_statement_with_missing_fields() {
        let record = parse_document(r#"{"sessionStatements":[{}]}"#).unwrap();
        let text = render_free_flow(&record);
        assert!(text.ends_with("\n\nUnknown Position (ID: Unknown Person):\n\n\n"));
    }

    #[test]
    fn test_render_empty_document_header_only() {
        let record = parse_document("{}").unwrap();
        assert_eq!(
            render_free_flow(&record),
            "Session Title: No Title\nDate: No Date\nTotal Statements: 0\nTotal Participants: 0\n\n"
        );
    }

    #[test]
    fn test_list_renders_first_element_only() {
        let record = parse_document(
            r#"[{"statementCount":0,"sessionStatements":[]},{"statementCount":99,"sessionStatements":[{"title":"X"}]}]"#,
        )
        .unwrap();
        let text = render_free_flow(&record);
        assert!(text.contains("Total Statements: 0\n"));
        assert!(!text.contains("X"));
    }

    #[test]
    fn test_render_scalar_title_and_list_with_trailing_values() {
        let record = parse_document(
            r#"[{"parlSession":{"title":"T","date":"D"},"statementCount":3,"sessionStatements":[{"position":"Chair","title":42,"paragraphs":["a"]}]}, 7, 9]"#,
        )
        .unwrap();
        assert_eq!(
            render_free_flow(&record),
            "Session Title: T\nDate: D\nTotal Statements: 3\nTotal Participants: 0\n\nChair (ID: 42):\na\n\n"
        );
    }

    #[test]
    fn test_statements_keep_input_order() {
        let record = parse_document(
            r#"{"sessionStatements":[{"title":"B","paragraphs":["2"]},{"title":"A","paragraphs":["1"]}]}"#,
        )
        .unwrap();
        let text = render_free_flow(&record);
        let b = text.find("(ID: B)").unwrap();
        let a = text.find("(ID: A)").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_output_path_replaces_extension() {
        let dir = TempDir::new().unwrap();
        let n = normalizer(&dir, &[], FailurePolicy::FailFast);
        assert_eq!(
            n.output_path(Path::new("data_sep/2024-09-04.json")).unwrap(),
            dir.path().join("output").join("2024-09-04.txt")
        );
    }

    #[test]
    fn test_convert_file_is_deterministic() -> Result<()> {
        let dir = TempDir::new()?;
        let input = dir.path().join("session.json");
        std::fs::write(&input, SAMPLE)?;
        let n = normalizer(&dir, &[], FailurePolicy::FailFast);

        let output = n.convert_file(&input)?;
        let first = std::fs::read(&output)?;
        n.convert_file(&input)?;
        let second = std::fs::read(&output)?;

        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_fail_fast_stops_on_corrupt_file() -> Result<()> {
        let dir = TempDir::new()?;
        let input_dir = dir.path().join("data_sep");
        std::fs::create_dir_all(&input_dir)?;
        std::fs::write(input_dir.join("a.json"), SAMPLE)?;
        std::fs::write(input_dir.join("b.json"), "{broken")?;
        std::fs::write(input_dir.join("c.json"), SAMPLE)?;

        let n = normalizer(&dir, &["data_sep"], FailurePolicy::FailFast);
        let err = n.run(|_| {}).unwrap_err();

        match &err {
            Error::File { path, source } => {
                assert_eq!(path, &input_dir.join("b.json"));
                assert!(matches!(**source, Error::Types(_)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("b.json"));
        let source = std::error::Error::source(&err).expect("file error keeps its cause");
        assert!(source.downcast_ref::<Error>().is_some());

        assert!(dir.path().join("output/a.txt").exists());
        assert!(!dir.path().join("output/b.txt").exists());
        assert!(!dir.path().join("output/c.txt").exists());
        Ok(())
    }

    #[test]
    fn test_best_effort_isolates_corrupt_file() -> Result<()> {
        let dir = TempDir::new()?;
        let input_dir = dir.path().join("data_sep");
        std::fs::create_dir_all(&input_dir)?;
        std::fs::write(input_dir.join("a.json"), SAMPLE)?;
        std::fs::write(input_dir.join("b.json"), "{broken")?;
        std::fs::write(input_dir.join("c.json"), SAMPLE)?;

        let n = normalizer(&dir, &["data_aug", "data_sep"], FailurePolicy::BestEffort);
        let mut events = Vec::new();
        let report = n.run(|e| events.push(e))?;

        assert_eq!(report.converted, vec![input_dir.join("a.json"), input_dir.join("c.json")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, input_dir.join("b.json"));
        assert!(dir.path().join("output/c.txt").exists());
        assert!(matches!(events[0], ConvertProgress::InputDirMissing { .. }));
        Ok(())
    }

    #[test]
    fn test_later_folder_overwrites_same_stem() -> Result<()> {
        let dir = TempDir::new()?;
        for (folder, title) in [("data_aug", "Augmented"), ("data_sep", "Separated")] {
            let path = dir.path().join(folder);
            std::fs::create_dir_all(&path)?;
            std::fs::write(
                path.join("2024-09-04.json"),
                format!(r#"{{"parlSession":{{"title":"{}"}}}}"#, title),
            )?;
        }

        let n = normalizer(&dir, &["data_aug", "data_sep"], FailurePolicy::FailFast);
        let report = n.run(|_| {})?;

        assert_eq!(report.converted.len(), 2);
        let text = std::fs::read_to_string(dir.path().join("output/2024-09-04.txt"))?;
        assert!(text.starts_with("Session Title: Separated\n"));
        Ok(())
    }

    #[test]
    fn test_non_json_files_ignored() -> Result<()> {
        let dir = TempDir::new()?;
        let input_dir = dir.path().join("data_sep");
        std::fs::create_dir_all(&input_dir)?;
        std::fs::write(input_dir.join("readme.md"), "# notes")?;
        std::fs::write(input_dir.join("a.json"), "{}")?;

        let n = normalizer(&dir, &["data_sep"], FailurePolicy::FailFast);
        let report = n.run(|_| {})?;

        assert_eq!(report.converted, vec![input_dir.join("a.json")]);
        assert!(!dir.path().join("output/readme.txt").exists());
        Ok(())
    }
}

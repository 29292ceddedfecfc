//! Recursive character splitting of free-flow text into overlapping chunks,
//! written as JSON Lines for downstream retrieval indexing.

use crate::config::ChunkConfig;
use crate::storage::{ensure_dir, list_files_with_extension};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(Error::Config(format!(
                "invalid chunk geometry: size {}, overlap {}",
                chunk_size, chunk_overlap
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_with(text, &SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // First separator present in the text; "" always matches.
        let position = separators
            .iter()
            .position(|sep| sep.is_empty() || text.contains(sep))
            .unwrap_or(separators.len().saturating_sub(1));
        let separator = separators.get(position).copied().unwrap_or("");
        let remaining = separators.get(position + 1..).unwrap_or(&[]);

        let pieces: Vec<&str> = if separator.is_empty() {
            text.char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect()
        } else {
            text.split(separator).filter(|p| !p.is_empty()).collect()
        };

        let mut chunks = Vec::new();
        let mut small: Vec<&str> = Vec::new();

        for piece in pieces {
            if char_len(piece) < self.chunk_size {
                small.push(piece);
                continue;
            }

            if !small.is_empty() {
                chunks.extend(self.merge(&small, separator));
                small.clear();
            }

            if remaining.is_empty() {
                chunks.push(piece.to_string());
            } else {
                chunks.extend(self.split_with(piece, remaining));
            }
        }

        if !small.is_empty() {
            chunks.extend(self.merge(&small, separator));
        }

        chunks
    }

    /// Greedily pack pieces up to `chunk_size`, carrying at most
    /// `chunk_overlap` characters of tail into the next chunk.
    fn merge(&self, pieces: &[&str], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for &piece in pieces {
            let len = char_len(piece);
            let joiner = if window.is_empty() { 0 } else { sep_len };

            if total + len + joiner > self.chunk_size && !window.is_empty() {
                if let Some(chunk) = join_window(&window, separator) {
                    chunks.push(chunk);
                }

                while let Some(&front) = window.front() {
                    let over_overlap = total > self.chunk_overlap;
                    let still_too_big = total + len + sep_len > self.chunk_size && total > 0;
                    if !(over_overlap || still_too_big) {
                        break;
                    }
                    total -= char_len(front) + if window.len() > 1 { sep_len } else { 0 };
                    window.pop_front();
                }
            }

            let joiner = if window.is_empty() { 0 } else { sep_len };
            total += len + joiner;
            window.push_back(piece);
        }

        if let Some(chunk) = join_window(&window, separator) {
            chunks.push(chunk);
        }

        chunks
    }
}

fn join_window(window: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// File name of the text document the chunk came from
    pub source: String,
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub enum ChunkProgress {
    FileChunked { path: PathBuf, chunks: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkReport {
    pub files: usize,
    pub chunks: usize,
    pub output: PathBuf,
}

pub struct Chunker {
    config: ChunkConfig,
    splitter: TextSplitter,
}

impl Chunker {
    pub fn new(config: ChunkConfig) -> Result<Self> {
        config.validate()?;
        let splitter = TextSplitter::new(config.chunk_size, config.chunk_overlap)?;
        Ok(Self { config, splitter })
    }

    pub fn chunk_text(&self, source: &str, text: &str) -> Vec<Chunk> {
        self.splitter
            .split(text)
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk {
                source: source.to_string(),
                index,
                text,
            })
            .collect()
    }

    pub fn chunk_file(&self, path: &Path) -> Result<Vec<Chunk>> {
        let text = std::fs::read_to_string(path)?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(self.chunk_text(&source, &text))
    }

    /// Chunk every `.txt` file of the input folder into one JSON Lines file.
    pub fn run<F>(&self, mut on_progress: F) -> Result<ChunkReport>
    where
        F: FnMut(ChunkProgress),
    {
        let files = list_files_with_extension(&self.config.input_dir, "txt")?;

        let output = self.config.output_file.clone();
        if let Some(parent) = output.parent() {
            ensure_dir(parent)?;
        }
        let mut writer = BufWriter::new(std::fs::File::create(&output)?);

        let mut report = ChunkReport {
            output,
            ..ChunkReport::default()
        };

        for path in files {
            let chunks = self.chunk_file(&path)?;
            for chunk in &chunks {
                serde_json::to_writer(&mut writer, chunk)?;
                writer.write_all(b"\n")?;
            }

            tracing::debug!(path = %path.display(), chunks = chunks.len(), "chunked");
            on_progress(ChunkProgress::FileChunked {
                path,
                chunks: chunks.len(),
            });
            report.files += 1;
            report.chunks += chunks.len();
        }

        writer.flush()?;
        tracing::info!(files = report.files, chunks = report.chunks, "chunking finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_short_text_is_single_chunk() {
        let splitter = TextSplitter::new(100, 10).unwrap();
        assert_eq!(splitter.split("  hello world  "), vec!["hello world"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let splitter = TextSplitter::new(100, 10).unwrap();
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("\n\n\n\n").is_empty());
    }

    #[test]
    fn test_paragraphs_are_packed_up_to_size() {
        let splitter = TextSplitter::new(10, 0).unwrap();
        let chunks = splitter.split("aaaa\n\nbbbb\n\ncccc");
        assert_eq!(chunks, vec!["aaaa\n\nbbbb", "cccc"]);
    }

    #[test]
    fn test_words_overlap_between_chunks() {
        let splitter = TextSplitter::new(10, 4).unwrap();
        let chunks = splitter.split("one two three four");
        assert_eq!(chunks, vec!["one two", "two three", "four"]);
    }

    #[test]
    fn test_long_word_falls_back_to_characters() {
        let splitter = TextSplitter::new(4, 0).unwrap();
        let chunks = splitter.split("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let splitter = TextSplitter::new(5, 0).unwrap();
        let chunks = splitter.split("Народ Събрание");
        assert_eq!(chunks, vec!["Народ", "Събра", "ние"]);
    }

    #[test]
    fn test_no_chunk_exceeds_size() {
        let splitter = TextSplitter::new(50, 10).unwrap();
        let text = "Председател (ID: Иван Петров):\nУважаеми колеги, откривам заседанието.\n\n"
            .repeat(20);
        for chunk in splitter.split(&text) {
            assert!(char_len(&chunk) <= 50, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        assert!(TextSplitter::new(0, 0).is_err());
        assert!(TextSplitter::new(10, 10).is_err());
    }

    #[test]
    fn test_run_writes_jsonl() -> Result<()> {
        let dir = TempDir::new()?;
        let input_dir = dir.path().join("output");
        std::fs::create_dir_all(&input_dir)?;
        std::fs::write(input_dir.join("b.txt"), "beta")?;
        std::fs::write(input_dir.join("a.txt"), "alpha\n\nalpha again")?;
        std::fs::write(input_dir.join("skip.json"), "{}")?;

        let chunker = Chunker::new(ChunkConfig {
            input_dir,
            output_file: dir.path().join("chunks").join("chunks.jsonl"),
            chunk_size: 8,
            chunk_overlap: 0,
        })?;
        let report = chunker.run(|_| {})?;

        assert_eq!(report.files, 2);
        assert_eq!(report.chunks, 4);

        let content = std::fs::read_to_string(&report.output)?;
        let chunks: Vec<Chunk> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            chunks,
            vec![
                Chunk { source: "a.txt".into(), index: 0, text: "alpha".into() },
                Chunk { source: "a.txt".into(), index: 1, text: "alpha".into() },
                Chunk { source: "a.txt".into(), index: 2, text: "again".into() },
                Chunk { source: "b.txt".into(), index: 0, text: "beta".into() },
            ]
        );
        Ok(())
    }
}

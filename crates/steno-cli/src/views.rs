use crate::types::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use steno_runtime::{
    ChunkProgress, ChunkReport, ConvertProgress, ConvertReport, FetchProgress, FetchReport,
};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_fetch_progress(event: &FetchProgress) {
    match event {
        FetchProgress::DateStarted {
            date,
            statement_count,
            batches,
        } => println!(
            "Fetching {}: {} statements in {} batches",
            date, statement_count, batches
        ),
        FetchProgress::IndexFailed { date, error } => {
            println!("Error fetching index data for {}: {}", date, error)
        }
        FetchProgress::BatchFailed { date, batch, error } => println!(
            "Error fetching steno data for {}, batch {}: {}",
            date, batch, error
        ),
        FetchProgress::DateWritten {
            date,
            path,
            statements,
        } => println!(
            "Saved {} session statements for {} to {}",
            statements,
            date,
            path.display()
        ),
    }
}

pub fn print_fetch_report(format: OutputFormat, report: &FetchReport) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Plain => {
            println!(
                "Fetched {} statements: {} dates written, {} skipped, {} failed batches",
                report.statements,
                report.dates_written.len(),
                report.dates_skipped.len(),
                report.failed_batches.len()
            );
            Ok(())
        }
    }
}

pub fn print_convert_progress(event: &ConvertProgress) {
    match event {
        ConvertProgress::InputDirMissing { dir } => {
            println!("Skipping missing input folder: {}", dir.display())
        }
        ConvertProgress::Converted { input, output } => println!(
            "Processed: {} -> {}",
            file_name(input),
            file_name(output)
        ),
        ConvertProgress::Failed { input, error } => {
            println!("Failed: {}: {}", input.display(), error)
        }
    }
}

pub fn print_convert_report(format: OutputFormat, report: &ConvertReport) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Plain => {
            if report.failed.is_empty() {
                println!("All files processed successfully.");
            } else {
                println!(
                    "Processed {} files, {} failed.",
                    report.converted.len(),
                    report.failed.len()
                );
            }
            Ok(())
        }
    }
}

pub fn print_chunk_progress(event: &ChunkProgress) {
    match event {
        ChunkProgress::FileChunked { path, chunks } => {
            println!("Chunked: {} ({} chunks)", file_name(path), chunks)
        }
    }
}

pub fn print_chunk_report(format: OutputFormat, report: &ChunkReport) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Plain => {
            println!(
                "Wrote {} chunks from {} files to {}",
                report.chunks,
                report.files,
                report.output.display()
            );
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct PipelineReport<'a> {
    fetch: &'a FetchReport,
    convert: &'a ConvertReport,
}

pub fn print_pipeline_report(
    format: OutputFormat,
    fetch: &FetchReport,
    convert: &ConvertReport,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&PipelineReport { fetch, convert }),
        OutputFormat::Plain => {
            print_fetch_report(format, fetch)?;
            print_convert_report(format, convert)
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

use crate::config::FetchConfig;
use crate::source::SessionSource;
use crate::storage::write_json_pretty;
use crate::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use steno_types::SessionDump;

/// Number of pages needed for `statement_count` statements.
pub fn batch_count(statement_count: u64, batch_size: u64) -> u64 {
    if batch_size == 0 {
        return 0;
    }
    statement_count.div_ceil(batch_size)
}

/// Every calendar day from `start` through `end`, inclusive.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

#[derive(Debug, Clone)]
pub enum FetchProgress {
    DateStarted {
        date: NaiveDate,
        statement_count: u64,
        batches: u64,
    },
    IndexFailed {
        date: NaiveDate,
        error: String,
    },
    BatchFailed {
        date: NaiveDate,
        batch: u64,
        error: String,
    },
    DateWritten {
        date: NaiveDate,
        path: PathBuf,
        statements: usize,
    },
}

/// Result of fetching one date whose index resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DateOutcome {
    pub date: NaiveDate,
    pub path: PathBuf,
    pub batches: u64,
    pub failed_batches: Vec<u64>,
    pub statements: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedBatch {
    pub date: NaiveDate,
    pub batch: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    pub dates_written: Vec<NaiveDate>,
    pub dates_skipped: Vec<NaiveDate>,
    pub failed_batches: Vec<FailedBatch>,
    pub statements: usize,
}

struct Collected {
    dump: SessionDump,
    batches: u64,
    failed_batches: Vec<u64>,
}

pub struct Fetcher<S> {
    source: S,
    config: FetchConfig,
}

impl<S: SessionSource> Fetcher<S> {
    pub fn new(source: S, config: FetchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// `{output_dir}/{YYYY-MM-DD}.json`
    pub fn output_path(&self, date: NaiveDate) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.json", date.format("%Y-%m-%d")))
    }

    /// Fetch every date of the configured range.
    ///
    /// Remote failures never abort the run: a failed index skips its date and
    /// a failed batch is left out of its date's file. Only local write errors
    /// are returned.
    pub fn run<F>(&self, mut on_progress: F) -> Result<FetchReport>
    where
        F: FnMut(FetchProgress),
    {
        let mut report = FetchReport::default();

        for date in date_range(self.config.start_date, self.config.end_date) {
            let collected = match self.collect(date, &mut on_progress) {
                Ok(collected) => collected,
                Err(err) => {
                    tracing::warn!(%date, error = %err, "index request failed, skipping date");
                    on_progress(FetchProgress::IndexFailed {
                        date,
                        error: err.to_string(),
                    });
                    report.dates_skipped.push(date);
                    continue;
                }
            };

            let outcome = self.write(date, collected, &mut on_progress)?;

            report.statements += outcome.statements;
            report.failed_batches.extend(
                outcome
                    .failed_batches
                    .iter()
                    .map(|&batch| FailedBatch { date, batch }),
            );
            report.dates_written.push(date);
        }

        tracing::info!(
            written = report.dates_written.len(),
            skipped = report.dates_skipped.len(),
            failed_batches = report.failed_batches.len(),
            "fetch finished"
        );
        Ok(report)
    }

    /// Fetch and write a single date.
    ///
    /// Returns `Err` without touching the filesystem when the index request fails.
    pub fn fetch_date<F>(&self, date: NaiveDate, mut on_progress: F) -> Result<DateOutcome>
    where
        F: FnMut(FetchProgress),
    {
        let collected = self.collect(date, &mut on_progress)?;
        self.write(date, collected, &mut on_progress)
    }

    fn collect<F>(&self, date: NaiveDate, on_progress: &mut F) -> Result<Collected>
    where
        F: FnMut(FetchProgress),
    {
        let index = self.source.fetch_index(date)?;
        let batches = batch_count(index.statement_count, self.config.batch_size);

        on_progress(FetchProgress::DateStarted {
            date,
            statement_count: index.statement_count,
            batches,
        });

        let mut dump = SessionDump::default();
        let mut failed_batches = Vec::new();

        for batch in 0..batches {
            match self.source.fetch_batch(date, batch) {
                Ok(page) => dump.extend(page),
                Err(err) => {
                    tracing::warn!(%date, batch, error = %err, "batch request failed");
                    on_progress(FetchProgress::BatchFailed {
                        date,
                        batch,
                        error: err.to_string(),
                    });
                    failed_batches.push(batch);
                }
            }
        }

        Ok(Collected {
            dump,
            batches,
            failed_batches,
        })
    }

    fn write<F>(&self, date: NaiveDate, collected: Collected, on_progress: &mut F) -> Result<DateOutcome>
    where
        F: FnMut(FetchProgress),
    {
        let path = self.output_path(date);
        write_json_pretty(&path, &collected.dump)?;

        let statements = collected.dump.len();
        tracing::info!(%date, statements, path = %path.display(), "saved session statements");
        on_progress(FetchProgress::DateWritten {
            date,
            path: path.clone(),
            statements,
        });

        Ok(DateOutcome {
            date,
            path,
            batches: collected.batches,
            failed_batches: collected.failed_batches,
            statements,
        })
    }
}

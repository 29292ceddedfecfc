use crate::args::FetchArgs;
use crate::context::ExecutionContext;
use crate::views;
use anyhow::Result;
use steno_runtime::{FetchConfig, FetchReport, Fetcher, HttpSource};

/// Apply command-line overrides on top of the configured values
pub fn resolve_config(base: &FetchConfig, args: &FetchArgs) -> FetchConfig {
    let mut config = base.clone();
    if let Some(from) = args.from {
        config.start_date = from;
    }
    if let Some(to) = args.to {
        config.end_date = to;
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
    config
}

pub fn handle(ctx: &ExecutionContext, args: FetchArgs) -> Result<()> {
    let config = resolve_config(&ctx.config()?.fetch, &args);
    let report = execute(ctx, config)?;
    views::print_fetch_report(ctx.format, &report)
}

pub(crate) fn execute(ctx: &ExecutionContext, config: FetchConfig) -> Result<FetchReport> {
    let source = HttpSource::new(config.base_url.clone())?;
    let fetcher = Fetcher::new(source, config)?;

    let show_progress = !ctx.is_json();
    let report = fetcher.run(|event| {
        if show_progress {
            views::print_fetch_progress(&event);
        }
    })?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_config_without_overrides_keeps_base() {
        let base = FetchConfig::default();
        assert_eq!(resolve_config(&base, &FetchArgs::default()), base);
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        let args = FetchArgs {
            from: NaiveDate::from_ymd_opt(2024, 10, 1),
            to: NaiveDate::from_ymd_opt(2024, 10, 2),
            base_url: Some("http://localhost:8080/sessions".to_string()),
            batch_size: Some(10),
            out: Some(PathBuf::from("raw")),
        };

        let config = resolve_config(&FetchConfig::default(), &args);
        assert_eq!(config.start_date.to_string(), "2024-10-01");
        assert_eq!(config.end_date.to_string(), "2024-10-02");
        assert_eq!(config.base_url, "http://localhost:8080/sessions");
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.output_dir, PathBuf::from("raw"));
    }
}

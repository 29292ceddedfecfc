use crate::context::ExecutionContext;
use anyhow::{Result, bail};
use steno_runtime::Config;

pub fn handle(ctx: &ExecutionContext, force: bool) -> Result<()> {
    let path = ctx.config_path();

    if path.exists() && !force {
        bail!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(path)?;
    tracing::info!(path = %path.display(), "wrote default configuration");

    if ctx.is_json() {
        println!("{}", serde_json::json!({ "config": path }));
    } else {
        println!("Wrote default configuration to {}", path.display());
    }
    Ok(())
}

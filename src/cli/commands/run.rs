//! Script execution

use crate::cli::commands::{new_session, GlobalOptions};
use crate::config::GlobalConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Execute every command in `script` ("-" reads stdin)
pub fn execute(script: &Path, config: &GlobalConfig, options: &GlobalOptions) -> Result<()> {
    let mut session = new_session(config, options);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if script == Path::new("-") {
        session.run(io::stdin().lock(), &mut out, None)?;
    } else {
        let file = File::open(script)
            .with_context(|| format!("Failed to open script {}", script.display()))?;
        session.run(BufReader::new(file), &mut out, None)?;
    }

    tracing::debug!(files = session.filesystem().len(), "script finished");
    Ok(())
}

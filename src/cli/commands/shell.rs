//! Interactive shell

use crate::cli::commands::{new_session, GlobalOptions};
use crate::config::GlobalConfig;
use anyhow::Result;
use colored::Colorize;
use std::io;

/// Execute the shell command
pub fn execute(config: &GlobalConfig, options: &GlobalOptions) -> Result<()> {
    let mut session = new_session(config, options);
    let interactive = atty::is(atty::Stream::Stdin);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if interactive && !options.json {
        println!("{}", "--- Time-Travelling File System ---".bold());
        println!("Enter 'QUIT' or 'EXIT' to terminate.");
    }

    let prompt = interactive.then_some(config.shell.prompt.as_str());
    session.run(io::stdin().lock(), &mut out, prompt)?;
    Ok(())
}

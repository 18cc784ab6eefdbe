use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io::{self, Write};

const BIN_NAME: &str = "timefs";

/// Generate shell completion scripts
///
/// The script goes to stdout and the installation hints to stderr, so
/// `eval "$(timefs completion bash)"` works.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());
    io::stdout().flush()?;

    eprintln!("\n{}", "Installation Instructions:".bold());
    for line in install_hint(shell) {
        eprintln!("  {}", line);
    }
    Ok(())
}

fn install_hint(shell: Shell) -> Vec<String> {
    match shell {
        Shell::Bash => vec![
            "Add the following to your ~/.bashrc:".to_string(),
            format!("eval \"$({} completion bash)\"", BIN_NAME).cyan().to_string(),
        ],
        Shell::Zsh => vec![
            "Save to a file in your fpath:".to_string(),
            format!(
                "{} completion zsh > ~/.local/share/zsh/site-functions/_{}",
                BIN_NAME, BIN_NAME
            )
            .cyan()
            .to_string(),
        ],
        Shell::Fish => vec![
            "Save the completion script:".to_string(),
            format!(
                "{} completion fish > ~/.config/fish/completions/{}.fish",
                BIN_NAME, BIN_NAME
            )
            .cyan()
            .to_string(),
        ],
        Shell::PowerShell => vec![
            "Add the following to your PowerShell profile:".to_string(),
            format!("Invoke-Expression (& {} completion powershell)", BIN_NAME)
                .cyan()
                .to_string(),
        ],
        _ => vec!["Please refer to your shell's documentation for installing completion scripts."
            .to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_generation() {
        let shells = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

        for shell in shells {
            let mut cmd = Cli::command();
            let mut output = Vec::new();
            generate(shell, &mut cmd, BIN_NAME, &mut output);

            assert!(
                !output.is_empty(),
                "No completion script generated for {:?}",
                shell
            );
            let script = String::from_utf8_lossy(&output);
            assert!(script.contains("completion"));
        }
    }

    #[test]
    fn test_install_hint_names_binary() {
        colored::control::set_override(false);
        let hint = install_hint(Shell::Bash);
        assert!(hint[1].contains("timefs completion bash"));
    }
}

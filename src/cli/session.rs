//! Command loop driving a [`FileSystem`]

use crate::cli::command::{parse_line, Command};
use crate::cli::output::Renderer;
use crate::core::error::Result;
use crate::storage::FileSystem;
use std::io::{self, BufRead, Write};

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A file system plus the renderer used to report results
pub struct Session {
    fs: FileSystem,
    renderer: Renderer,
}

impl Session {
    pub fn new(fs: FileSystem, renderer: Renderer) -> Self {
        Self { fs, renderer }
    }

    pub fn filesystem(&self) -> &FileSystem {
        &self.fs
    }

    /// Parse and execute one line, writing its output
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        match parse_line(line) {
            Ok(None) => Ok(Flow::Continue),
            Ok(Some(parsed)) => {
                if let Some(warning) = &parsed.warning {
                    writeln!(out, "{}", self.renderer.warning(warning))?;
                }
                self.execute(parsed.command, out)
            },
            Err(error) => {
                writeln!(out, "{}", self.renderer.error(&error))?;
                Ok(Flow::Continue)
            },
        }
    }

    /// Execute a parsed command; failures are reported, never propagated
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        if command == Command::Exit {
            if !self.renderer.json {
                writeln!(out, "Exiting system.")?;
            }
            return Ok(Flow::Exit);
        }

        match self.dispatch(command) {
            Ok(Some(text)) => writeln!(out, "{}", text)?,
            Ok(None) => {},
            Err(error) => {
                tracing::debug!(%error, "command failed");
                writeln!(out, "{}", self.renderer.error(&error))?;
            },
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, command: Command) -> Result<Option<String>> {
        let r = self.renderer;
        let output = match command {
            Command::Create { name } => {
                self.fs.create(&name)?;
                r.created(&name)
            },
            Command::Read { name } => Some(r.content(&name, self.fs.read(&name)?)),
            Command::Insert { name, text } => {
                self.fs.insert(&name, &text)?;
                r.inserted(&name)
            },
            Command::Update { name, text } => {
                self.fs.update(&name, &text)?;
                r.updated(&name)
            },
            Command::Snapshot { name, message } => {
                self.fs.snapshot(&name, &message)?;
                r.snapshotted(&name)
            },
            Command::Rollback { name, target } => {
                self.fs.rollback(&name, target)?;
                r.rolled_back(&name)
            },
            Command::History { name } => Some(r.history(&name, &self.fs.history(&name)?)),
            Command::RecentFiles { limit } => {
                Some(r.recent_files(limit, &self.fs.recent_files(limit)))
            },
            Command::BiggestTrees { limit } => {
                Some(r.biggest_trees(limit, &self.fs.biggest_trees(limit)))
            },
            Command::Info { name } => Some(r.info(&self.fs.info(&name)?)),
            Command::Tree { name } => Some(r.tree(&name, &self.fs.versions(&name)?)),
            Command::Exit => None,
        };
        Ok(output)
    }

    /// Run commands from `input` until end of input or `EXIT`
    ///
    /// With a prompt, it is written before every line is read.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        prompt: Option<&str>,
    ) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = prompt {
                write!(out, "{}", prompt)?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            if self.execute_line(&line?, out)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }
}

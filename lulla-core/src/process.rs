// lulla-core/src/process.rs

//! Runs external tools and hands back what they printed and how they exited.

use crate::console::Console;
use crate::errors::{LullaError, Result};
use tracing::{debug, info, warn};

/// Captured stdout and exit status of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub output: String,
    /// The child's own exit status, or -1 when it was killed by a signal.
    pub status: i32,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Something that can execute a command and wait for it.
///
/// Utilities take a `&dyn CommandRunner` so they can be exercised without
/// spawning anything.
pub trait CommandRunner {
    fn run_args(&self, args: &[String]) -> Result<ProcessResult>;

    fn run_line(&self, command_line: &str) -> Result<ProcessResult> {
        let args = tokenize(command_line)?;
        self.run_args(&args)
    }
}

/// Splits a command line on unquoted whitespace.
///
/// A single or double quote at the start of a token groups everything up to
/// the matching quote into that token and is removed. Quotes inside a token
/// are literal, so `O'Brien` stays intact.
/// Backslashes are ordinary characters, so Windows paths pass through intact.
pub fn tokenize(command_line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in command_line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if !in_token && (ch == '"' || ch == '\'') => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(LullaError::UnbalancedQuote(command_line.to_string()));
    }
    if in_token {
        args.push(current);
    }
    Ok(args)
}

/// Quotes an argument for display or for [`CommandRunner::run_line`] when it
/// contains whitespace.
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}

/// Runs commands as real child processes through `duct`.
///
/// Stdout is captured; stderr goes straight to the terminal.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    console: Console,
}

impl ProcessRunner {
    pub fn new(console: &Console) -> Self {
        let console = console.child("ProcessRunner");
        console.log("ProcessRunner initialised.");
        ProcessRunner { console }
    }
}

impl CommandRunner for ProcessRunner {
    fn run_args(&self, args: &[String]) -> Result<ProcessResult> {
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| LullaError::validation("Cannot run an empty command line."))?;
        let command_line = args
            .iter()
            .map(|a| quote_arg(a))
            .collect::<Vec<_>>()
            .join(" ");

        self.console.log(format!("Running command: {}", command_line));
        info!(command = %command_line, "Spawning external process");

        let output = duct::cmd(program, rest)
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|source| {
                warn!(command = %command_line, error = %source, "Failed to spawn command process");
                LullaError::Spawn {
                    command: command_line.clone(),
                    source,
                }
            })?;

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        let status = output.status.code().unwrap_or(-1);

        debug!(
            "Command exit status: {}\nStdout preview (first 3 lines):\n{}",
            status,
            text.lines().take(3).collect::<Vec<_>>().join("\n")
        );
        self.console.log(format!(
            "Command output:\n{}\nCommand exit-status/return-code: {}",
            text, status
        ));

        Ok(ProcessResult {
            output: text,
            status,
        })
    }
}

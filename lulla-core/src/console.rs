// lulla-core/src/console.rs

//! Colored progress output for the person watching the CI log.

use crate::config::ToolSettings;
use colored::*;

/// How a console line is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Warning,
    Error,
}

/// Prints progress lines tagged with the owning component.
///
/// Silent consoles drop everything except errors, which always reach stderr.
#[derive(Debug, Clone)]
pub struct Console {
    source: String,
    silent: bool,
}

impl Console {
    pub fn new(source: impl Into<String>, settings: ToolSettings) -> Self {
        Console {
            source: source.into(),
            silent: settings.silent,
        }
    }

    /// A console for a sub-component that keeps the same settings.
    pub fn child(&self, source: impl Into<String>) -> Self {
        Console {
            source: source.into(),
            silent: self.silent,
        }
    }

    pub fn log(&self, message: impl AsRef<str>) {
        self.emit(message.as_ref(), Tone::Plain);
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.emit(message.as_ref(), Tone::Success);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(message.as_ref(), Tone::Warning);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(message.as_ref(), Tone::Error);
    }

    pub fn emit(&self, message: &str, tone: Tone) {
        let body = match tone {
            Tone::Error => {
                eprintln!("{} {}", self.prefix(), message.red().bold());
                return;
            }
            _ if self.silent => return,
            Tone::Plain => message.normal(),
            Tone::Success => message.green(),
            Tone::Warning => message.yellow(),
        };
        println!("{} {}", self.prefix(), body);
    }

    pub fn linebreaks(&self, count: usize) {
        if self.silent {
            return;
        }
        for _ in 0..count {
            println!();
        }
    }

    fn prefix(&self) -> ColoredString {
        format!("[{}]", self.source).dimmed()
    }
}

//! Interactive presentation of configuration changes.

use std::io::{self, BufRead, Stdin, Stdout, Write};

use colored::Colorize;
use hubconf_core::{ChangeSink, ConfigChanges};
use tracing::warn;

#[cfg(test)]
#[path = "terminal_tests.rs"]
mod tests;

/// Prints changes with colours and asks questions on a terminal.
pub struct TerminalSink<R, W> {
    input: R,
    output: W,
}

impl TerminalSink<io::StdinLock<'static>, Stdout> {
    /// Sink bound to the process standard input and output.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalSink<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gives back the output, mostly for inspection in tests.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> ChangeSink for TerminalSink<R, W> {
    fn present(&mut self, changes: &ConfigChanges) {
        let mut text = format!("{}\n", "Changes:".bold());
        for line in changes.lines() {
            let line = match line.chars().next() {
                Some('+') => line.green(),
                Some('-') => line.red(),
                _ => line.yellow(),
            };
            text.push_str(&format!("  {}\n", line));
        }

        if let Err(e) = self.output.write_all(text.as_bytes()) {
            warn!(error = %e, "Failed to print changes");
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> bool {
        let choices = if default { "[Y/n]" } else { "[y/N]" };
        if write!(self.output, "{} {}: ", question.bold(), choices)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        // A closed input never approves anything.
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => match answer.trim().to_ascii_lowercase().as_str() {
                "" => default,
                "y" | "yes" => true,
                _ => false,
            },
            Err(e) => {
                warn!(error = %e, "Failed to read the answer");
                false
            }
        }
    }
}

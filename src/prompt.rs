use crate::validate::Verdict;
use anyhow::{Context, Result};
use atty::Stream;
use log::debug;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Input that cancels whatever is being asked for
pub const EXIT_SENTINEL: &str = "exit";

/// Line-based console shared by the prompts and the progress output
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Echo a newline after each answer when the input is not a terminal
    echo_newline: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process stdin/stdout
    pub fn stdio() -> Self {
        let interactive = atty::is(Stream::Stdin);
        if !interactive {
            debug!("stdin is not a terminal, answers are read from a pipe");
        }

        let mut console = Console::new(io::stdin().lock(), io::stdout());
        console.echo_newline = !interactive;
        console
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console over arbitrary streams, no newline echo
    ///
    /// # Arguments
    /// * `input` - Where answers are read from, one per line
    /// * `output` - Where prompts and progress are written
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            echo_newline: false,
        }
    }

    /// Writer used for everything that is not a prompt
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask for `label` until `validate` accepts the answer
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Accepted answer, line ending stripped
    /// * `Ok(None)` - The operator typed `exit` or the input ended
    pub fn prompt_for<F>(&mut self, label: &str, validate: F) -> Result<Option<String>>
    where
        F: Fn(&str) -> Verdict,
    {
        loop {
            write!(self.output, "请输入 {} >", label)?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .with_context(|| format!("Failed to read {}", label))?;

            if self.echo_newline {
                writeln!(self.output)?;
            }

            // Only end of input reads nothing. A bare line ending still goes
            // to the validator, which is how confirmation gets its default.
            if read == 0 {
                debug!("input ended while asking for {}", label);
                return Ok(None);
            }

            let answer = trim_line_ending(&line);

            if answer == EXIT_SENTINEL {
                return Ok(None);
            }

            if let Err(reason) = validate(answer) {
                writeln!(self.output, "{} 输入错误：{}，请重新输入！", label, reason)?;
                continue;
            }

            return Ok(Some(answer.to_string()));
        }
    }
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

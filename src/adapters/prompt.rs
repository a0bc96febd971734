use crate::domain::ports::Confirmer;
use crate::utils::error::Result;
use std::io::{self, BufRead, Write};

/// Prints the proposal and waits for one line of input.
pub struct PromptConfirmer<R, W> {
    input: R,
    output: W,
}

impl PromptConfirmer<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// `y` or `yes`, any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl<R: BufRead, W: Write> Confirmer for PromptConfirmer<R, W> {
    fn confirm(&mut self, rendered: &str) -> Result<bool> {
        writeln!(self.output, "{}", rendered)?;
        writeln!(self.output)?;
        write!(self.output, "Confirm pairings? [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        // EOF 讀到 0 bytes，視為拒絕
        let read = self.input.read_line(&mut answer)?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }

        Ok(is_affirmative(&answer))
    }
}

/// Accepts every proposal, for non-interactive runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, rendered: &str) -> Result<bool> {
        println!("{}", rendered);
        Ok(true)
    }
}

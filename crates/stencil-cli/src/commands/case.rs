// Apply a case transformation to identifiers given on the command line

use std::io::{self, Write};

use stencil_generation::Case;

use super::Command;
use crate::error::CliResult;

/// Print each input converted to the requested casing, one per line
pub struct CaseCommand {
    case: Case,
    inputs: Vec<String>,
}

impl CaseCommand {
    pub fn new(case: Case, inputs: Vec<String>) -> Self {
        Self { case, inputs }
    }

    /// Converted inputs, in order
    pub fn convert(&self) -> Vec<String> {
        self.inputs.iter().map(|input| self.case.apply(input)).collect()
    }

    /// Write converted inputs to `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> CliResult<()> {
        for line in self.convert() {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

impl Command for CaseCommand {
    fn execute(&self) -> CliResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)
    }
}

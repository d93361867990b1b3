//! Print spooling through the platform print command

use super::{ExportError, PrintSink};
use std::io::Write;
use std::process::{Command, Stdio};

/// Pipes the rendition into a print command's stdin (`lp`, `lpr`, ...)
#[derive(Debug, Clone)]
pub struct PrintSpooler {
    program: String,
    args: Vec<String>,
}

impl PrintSpooler {
    /// Build from a command line; `None` for an empty one
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl PrintSink for PrintSpooler {
    fn print(&self, rendition: &str) -> Result<(), ExportError> {
        tracing::debug!("Spooling {} bytes to {}", rendition.len(), self.program);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ExportError::PrintSpawn(self.program.clone(), e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(rendition.as_bytes())
                .map_err(ExportError::PrintIo)?;
        }

        let status = child.wait().map_err(ExportError::PrintIo)?;
        if !status.success() {
            return Err(ExportError::PrintExit(status.code()));
        }
        Ok(())
    }
}

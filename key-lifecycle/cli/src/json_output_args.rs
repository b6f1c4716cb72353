use crate::Result;
use std::io::Write;

/// Controls how a command's JSON result is written to stdout.
#[derive(clap::Args, Debug)]
pub struct JsonOutputArgs {
    /// Indent the JSON output over multiple lines instead of printing it compactly.
    #[arg(env = "KEY_LIFECYCLE_PRETTY", long)]
    pub pretty: bool,
    /// Leave off the trailing newline, e.g. for capturing the output in a shell variable.
    #[arg(env = "KEY_LIFECYCLE_NO_NEWLINE", short, long)]
    pub no_newline: bool,
}

impl JsonOutputArgs {
    pub fn write_json(&self, out: &mut dyn Write, value: &serde_json::Value) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, value)?;
        } else {
            serde_json::to_writer(&mut *out, value)?;
        }
        if !self.no_newline {
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
    pub fn print_json(&self, value: &serde_json::Value) -> Result<()> {
        self.write_json(&mut std::io::stdout().lock(), value)
    }
}

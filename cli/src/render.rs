//! Record output.
//!
//! Text rendering reuses the `Display` impls of the record types; JSON output
//! writes one object per line.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use fx_config::OutputFormat;
use serde::Serialize;

pub fn write_record<W, R>(out: &mut W, record: &R, format: OutputFormat) -> Result<()>
where
    W: Write,
    R: Display + Serialize,
{
    match format {
        OutputFormat::Text => writeln!(out, "{record}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, record)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

//! Writing a finished run to stdout.
//!
//! Everything goes through a caller-supplied writer so a closed pipe surfaces
//! as an `io::Error` instead of a panic.

use std::io::{self, Write};

use clap::ValueEnum;

use crate::report::{render_facts, render_text, Report};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print the report in `format`. `show_facts` only applies to text output.
pub fn print_report<W: Write>(
    mut out: W,
    report: &Report,
    format: OutputFormat,
    show_facts: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = report.to_json().map_err(io::Error::other)?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Text => {
            if show_facts {
                writeln!(out, "{}", render_facts(&report.facts))?;
            }
            writeln!(out)?;
            write!(
                out,
                "{}",
                render_text(&report.service, &report.recommendations)
            )?;
        }
    }
    out.flush()
}

//! `datachat inspect <path>`: load a dataset and print what the assistant
//! would be told about it, plus per-column types.

use std::error::Error;
use std::io::Write;
use std::path::Path;

use crate::core::conversation::describe_dataset;
use crate::dataset::{self, summarize, Dataset};

pub fn run_inspect(path: &Path) -> Result<(), Box<dyn Error>> {
    let data = dataset::load(path)?;
    let mut stdout = std::io::stdout();
    write_report(path, &data, &mut stdout)?;
    Ok(())
}

fn write_report<W: Write>(path: &Path, data: &Dataset, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", describe_dataset(path, data))?;
    match data {
        Dataset::Table(table) => {
            writeln!(out)?;
            writeln!(out, "{}", summarize(table))
        }
        Dataset::Text(text) => writeln!(
            out,
            "{} lines, {} characters",
            text.lines().count(),
            text.chars().count()
        ),
    }
}

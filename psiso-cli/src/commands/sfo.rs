use std::fs::File;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psiso_core::InspectError;
use psiso_sony::SfoTable;
use psiso_sony::sfo::{SfoEntry, SfoKind};

use crate::error::CliError;

fn format_value(entry: &SfoEntry) -> String {
    match entry.kind {
        SfoKind::Text => entry.text_display(),
        SfoKind::Numeric4 | SfoKind::Numeric2 => {
            format!("0x{:08X} ({})", entry.numeric_value, entry.numeric_value)
        }
        SfoKind::Other(t) => format!(
            "{}",
            format!("<type 0x{:04X}>", t).if_supports_color(Stdout, |t| t.dimmed())
        ),
    }
}

/// Print every variable of a PARAM.SFO file, or just `key`.
pub(crate) fn run_sfo(file: &Path, key: Option<&str>) -> Result<(), CliError> {
    let mut handle = File::open(file).map_err(|e| InspectError::cannot_open(file, e))?;
    let table = SfoTable::read(&mut handle, 0)?;
    log::debug!("{} variables in {}", table.len(), file.display());

    if let Some(key) = key {
        match table.require_text(key) {
            Ok(text) => println!("{}", text),
            Err(e) => match table.numeric(key) {
                Some(value) => println!("0x{:08X} ({})", value, value),
                None => return Err(e.into()),
            },
        }
        return Ok(());
    }

    if table.is_empty() {
        log::warn!("{} has no variables", file.display());
        return Ok(());
    }
    let width = table.entries().iter().map(|e| e.name.len()).max().unwrap_or(0) + 1;
    for entry in table.entries() {
        println!(
            "  {} {}",
            format!("{:<width$}", format!("{}:", entry.name))
                .if_supports_color(Stdout, |t| t.cyan()),
            format_value(entry),
        );
    }
    Ok(())
}

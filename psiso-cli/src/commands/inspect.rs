use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psiso_core::settings;
use psiso_core::util::format_size;
use psiso_core::{
    DiscAnalyzer, InspectError, InspectOptions, PatchOutcome, Platform, ReadSeek, TitleLookup,
    TitleRecord,
};
use psiso_sony::TitleDatabase;

use crate::error::CliError;

/// Load the title database for platforms that need one.
///
/// A missing or unreadable database is not fatal: titles stay empty.
fn load_titles(platform: Platform, title_db: Option<PathBuf>) -> Option<Arc<dyn TitleLookup>> {
    if !platform.uses_title_database() {
        if title_db.is_some() {
            log::warn!("{} discs carry their own title; --title-db is ignored", platform);
        }
        return None;
    }

    let path = settings::resolve_title_db(platform, title_db)?;
    match TitleDatabase::load(&path) {
        Ok(db) => {
            if db.is_empty() {
                log::warn!("Title database {} has no entries", path.display());
            }
            Some(Arc::new(db))
        }
        Err(e) => {
            log::warn!(
                "Cannot read title database {}: {}. Titles will be empty.",
                path.display(),
                e
            );
            None
        }
    }
}

/// Inspect each image and print its title id and title.
pub(crate) fn run_inspect(
    platform: Platform,
    patch: bool,
    title_db: Option<PathBuf>,
    images: &[PathBuf],
) -> Result<(), CliError> {
    if patch && platform != Platform::Ps3 {
        log::warn!("--patch only applies to PS3 images; ignoring it for {}", platform);
    }
    let analyzer = psiso_sony::analyzer_for(platform, load_titles(platform, title_db));
    let options = InspectOptions::new().patch(patch);

    let mut failed = 0;
    for path in images {
        log::debug!("Inspecting {} as {}", path.display(), analyzer.platform_name());
        match inspect_image(analyzer.as_ref(), path, &options) {
            Ok(record) => print_record(path, &record),
            Err(e) => {
                failed += 1;
                println!(
                    "  {}: {}",
                    file_label(path).if_supports_color(Stdout, |t| t.bold()),
                    "FAILED".if_supports_color(Stdout, |t| t.red()),
                );
                log::error!("{}", e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ImagesFailed {
            failed,
            total: images.len(),
        });
    }
    Ok(())
}

/// Open `path` and run `analyzer` on it. The file is opened read-write
/// only when a patch is requested and the analyzer can apply one.
pub(crate) fn inspect_image(
    analyzer: &dyn DiscAnalyzer,
    path: &Path,
    options: &InspectOptions,
) -> Result<TitleRecord, InspectError> {
    let writable = options.patch && analyzer.supports_patching();
    let mut file = OpenOptions::new()
        .read(true)
        .write(writable)
        .open(path)
        .map_err(|e| InspectError::cannot_open(path, e))?;

    let result = analyzer.inspect(&mut file, options);
    if let Err(e) = &result {
        if e.is_corrupt_image() && !analyzer.can_handle(&mut file) {
            let fits = other_layouts(analyzer.platform(), &mut file);
            if !fits.is_empty() {
                log::info!("  The volume layout fits: {}", fits.join(", "));
            }
        }
    }
    result
}

/// Short names of the other platforms whose sector layouts carry this
/// image's volume descriptor.
pub(crate) fn other_layouts(platform: Platform, reader: &mut dyn ReadSeek) -> Vec<&'static str> {
    psiso_sony::all_analyzers()
        .iter()
        .filter(|a| a.platform() != platform)
        .filter(|a| a.can_handle(&mut *reader))
        .map(|a| a.short_name())
        .collect()
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn or_missing(value: &str) -> String {
    if value.is_empty() {
        format!("{}", "(not found)".if_supports_color(Stdout, |t| t.dimmed()))
    } else {
        value.to_string()
    }
}

fn print_record(path: &Path, record: &TitleRecord) {
    if !record.is_complete() {
        log::warn!("{}: title id or title not found", path.display());
    }
    println!("  {}:", file_label(path).if_supports_color(Stdout, |t| t.bold()));
    println!(
        "    {} {}",
        "Title ID:".if_supports_color(Stdout, |t| t.cyan()),
        or_missing(&record.title_id),
    );
    println!(
        "    {}    {}",
        "Title:".if_supports_color(Stdout, |t| t.cyan()),
        or_missing(&record.title),
    );
    if let Some(geometry) = record.geometry {
        println!(
            "    {}   {}, {}",
            "Format:".if_supports_color(Stdout, |t| t.cyan()),
            geometry,
            format_size(record.volume_bytes),
        );
    }
    match record.patch {
        Some(PatchOutcome::Patched) => println!(
            "    {}    {}",
            "Patch:".if_supports_color(Stdout, |t| t.cyan()),
            "disc header written".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(PatchOutcome::AlreadyValid) => println!(
            "    {}    {}",
            "Patch:".if_supports_color(Stdout, |t| t.cyan()),
            "already has a disc header".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => {}
    }
}

#[cfg(test)]
#[path = "../tests/inspect_tests.rs"]
mod tests;

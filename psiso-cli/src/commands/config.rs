use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psiso_core::Platform;
use psiso_core::settings;

use crate::error::CliError;

fn require_database_platform(platform: Platform) -> Result<(), CliError> {
    if platform.uses_title_database() {
        Ok(())
    } else {
        Err(CliError::config(format!(
            "{} discs carry their own title and use no title database",
            platform
        )))
    }
}

fn exists_tag(path: &Path) -> String {
    if path.exists() {
        format!("{}", "(exists)".if_supports_color(Stdout, |t| t.green()))
    } else {
        format!("{}", "(not found)".if_supports_color(Stdout, |t| t.dimmed()))
    }
}

/// Show the settings file and where each title database resolves to.
pub(crate) fn run_config_show() {
    let path = settings::settings_path();
    let current = settings::load_settings();

    log::info!(
        "{}",
        "psiso-tool Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        exists_tag(&path),
    );
    log::info!("");

    for &platform in Platform::all() {
        if !platform.uses_title_database() {
            continue;
        }
        let configured = current.database.get(platform);
        log::info!(
            "  {} title database:",
            platform.tag().if_supports_color(Stdout, |t| t.bold())
        );
        match configured {
            Some(p) => log::info!("    Configured: {}", p.display()),
            None => log::info!(
                "    Configured: {}",
                "(not set)".if_supports_color(Stdout, |t| t.dimmed())
            ),
        }
        if let Some(resolved) = settings::resolve_title_db(platform, None) {
            log::info!(
                "    Resolved:   {} {}",
                resolved.display(),
                exists_tag(&resolved)
            );
        }
    }

    if let Some(contents) = settings::load_settings_string() {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings::settings_path().display());
}

pub(crate) fn run_config_set_db(platform: Platform, file: &Path) -> Result<(), CliError> {
    require_database_platform(platform)?;
    let file = std::path::absolute(file)?;
    if !file.exists() {
        log::warn!("{} does not exist yet", file.display());
    }
    settings::save_title_db(platform, Some(&file))?;
    log::info!(
        "{} title database set to {}",
        platform,
        file.display().if_supports_color(Stdout, |t| t.cyan())
    );
    Ok(())
}

pub(crate) fn run_config_clear_db(platform: Platform) -> Result<(), CliError> {
    require_database_platform(platform)?;
    settings::save_title_db(platform, None)?;
    log::info!("{} title database setting cleared", platform);
    Ok(())
}

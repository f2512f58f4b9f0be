/// Disc platforms whose images can be inspected.
///
/// This enum centralizes console identity (short names, display names and
/// aliases) so the CLI, the settings file and the analyzers agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ps1,
    Ps2,
    Ps3,
    Psp,
}

/// All platform variants in registration order.
const ALL_PLATFORMS: &[Platform] = &[Platform::Ps1, Platform::Ps2, Platform::Ps3, Platform::Psp];

impl Platform {
    /// Canonical short name used for CLI arguments and settings keys.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Ps1 => "ps1",
            Self::Ps2 => "ps2",
            Self::Ps3 => "ps3",
            Self::Psp => "psp",
        }
    }

    /// Full display name for the platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ps1 => "Sony PlayStation",
            Self::Ps2 => "Sony PlayStation 2",
            Self::Ps3 => "Sony PlayStation 3",
            Self::Psp => "Sony PlayStation Portable",
        }
    }

    /// Short tag used in diagnostics ("PS1", "PSP", ...).
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Ps1 => "PS1",
            Self::Ps2 => "PS2",
            Self::Ps3 => "PS3",
            Self::Psp => "PSP",
        }
    }

    /// All accepted names for this platform (case-insensitive matching).
    ///
    /// Includes the canonical short name plus any common alternatives.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Ps1 => &["ps1", "psx", "playstation", "playstation1"],
            Self::Ps2 => &["ps2", "playstation2", "playstation 2"],
            Self::Ps3 => &["ps3", "playstation3", "playstation 3"],
            Self::Psp => &["psp", "playstation portable"],
        }
    }

    /// Whether the title comes from an external title database rather than
    /// from the disc itself.
    pub fn uses_title_database(&self) -> bool {
        matches!(self, Self::Ps1 | Self::Ps2)
    }

    /// All platform variants.
    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone)]
pub struct PlatformParseError(pub String);

impl std::fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown platform: '{}'", self.0)
    }
}

impl std::error::Error for PlatformParseError {}

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Parse a platform from any recognized name (case-insensitive).
    ///
    /// Matches against `short_name()` and all entries in `aliases()`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        for &platform in ALL_PLATFORMS {
            if platform.aliases().contains(&lower.as_str()) {
                return Ok(platform);
            }
        }
        Err(PlatformParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;

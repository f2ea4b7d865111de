//! Episode number extraction from file names and episode pages

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use regex::Regex;

use crate::domain::error::EpisodeError;

/// Default pattern for episode file names, e.g. `ump_podcast571.mp3`
pub const DEFAULT_EPISODE_PATTERN: &str = r"ump_podcast(\d+)\.mp3";

/// Regular expression with one capturing group holding the episode number.
/// Validated on creation.
#[derive(Debug, Clone)]
pub struct EpisodePattern {
    regex: Regex,
}

impl EpisodePattern {
    /// Match `text` and parse the first capturing group.
    ///
    /// Returns `None` when the text does not match at all.
    pub fn capture(&self, text: &str) -> Option<Result<u32, EpisodeError>> {
        let caps = self.regex.captures(text)?;
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        Some(
            raw.parse::<u32>()
                .map_err(|_| EpisodeError::InvalidNumber(raw.to_string())),
        )
    }

    /// The source pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl FromStr for EpisodePattern {
    type Err = EpisodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let regex = Regex::new(s).map_err(|e| EpisodeError::InvalidPattern {
            pattern: s.to_string(),
            message: e.to_string(),
        })?;

        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(EpisodeError::InvalidPattern {
                pattern: s.to_string(),
                message: "pattern needs a capturing group for the episode number".to_string(),
            });
        }

        Ok(Self { regex })
    }
}

impl fmt::Display for EpisodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Episode number taken from the file name.
///
/// The existence check runs before the pattern is applied, so a missing file
/// is always reported as such.
pub fn episode_from_file(path: &Path, pattern: &EpisodePattern) -> Result<u32, EpisodeError> {
    let display = path.to_string_lossy();
    if !path.exists() {
        return Err(EpisodeError::FileNotFound(display.to_string()));
    }

    pattern
        .capture(&display)
        .unwrap_or_else(|| Err(EpisodeError::InvalidFileName(display.to_string())))
}

/// Next episode number from an episode page body.
///
/// Lines are scanned in order and the first match wins: the page lists the
/// newest episode first.
pub fn scan_episode_page(body: &str, pattern: &EpisodePattern) -> Result<u32, EpisodeError> {
    for line in body.lines() {
        let Some(found) = pattern.capture(line) else {
            continue;
        };
        let num = found?;
        tracing::debug!(episode = num, line = line.trim(), "found episode reference");
        return num
            .checked_add(1)
            .ok_or_else(|| EpisodeError::InvalidNumber(num.to_string()));
    }

    Err(EpisodeError::NotFound)
}

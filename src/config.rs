//! Opener programs and output location.

use std::path::PathBuf;

pub const DEFAULT_DIRECTORY_OPENER: &str = "nautilus";
pub const DEFAULT_TEXT_EDITOR: &str = "gedit";
pub const DEFAULT_FALLBACK_VIEWER: &str = "bless";

const DIRECTORY_OPENER_ENV: &str = "AUTODESKTOP_DIRECTORY_OPENER";
const TEXT_EDITOR_ENV: &str = "AUTODESKTOP_TEXT_EDITOR";
const FALLBACK_VIEWER_ENV: &str = "AUTODESKTOP_FALLBACK_VIEWER";

/// Programs used to open targets that cannot be launched directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenerConfig {
    /// File manager for directories.
    pub directory_opener: String,
    /// Editor for plain text.
    pub text_editor: String,
    /// Viewer for everything else (hex/binary viewer by default).
    pub fallback_viewer: String,
}

impl Default for OpenerConfig {
    fn default() -> Self {
        Self {
            directory_opener: DEFAULT_DIRECTORY_OPENER.to_string(),
            text_editor: DEFAULT_TEXT_EDITOR.to_string(),
            fallback_viewer: DEFAULT_FALLBACK_VIEWER.to_string(),
        }
    }
}

impl OpenerConfig {
    /// Defaults overridden by the `AUTODESKTOP_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var(DIRECTORY_OPENER_ENV).ok(),
            std::env::var(TEXT_EDITOR_ENV).ok(),
            std::env::var(FALLBACK_VIEWER_ENV).ok(),
        )
    }

    /// Replace each opener whose override is present and not blank.
    pub fn with_overrides(
        mut self,
        directory_opener: Option<String>,
        text_editor: Option<String>,
        fallback_viewer: Option<String>,
    ) -> Self {
        let pick = |current: &mut String, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                *current = value.trim().to_string();
            }
        };

        pick(&mut self.directory_opener, directory_opener);
        pick(&mut self.text_editor, text_editor);
        pick(&mut self.fallback_viewer, fallback_viewer);
        self
    }
}

/// `<home>/.local/share/applications`, the per-user launcher directory.
pub fn default_applications_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".local").join("share").join("applications"))
}

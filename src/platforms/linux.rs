use crate::platform::ExistingLauncher;
use freedesktop_desktop_entry::DesktopEntry;
use rs_apply::Apply;
use std::fs;
use std::path::Path;

pub fn existing_launcher(path: &Path) -> Option<ExistingLauncher> {
    fs::read_to_string(path).ok()?.apply(|content| {
        let entry = DesktopEntry::decode(path, &content).ok()?;

        Some(ExistingLauncher {
            name: entry.name(None).map(|cow| cow.to_string()),
            exec: entry.exec().map(str::to_string),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_existing_launcher() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Old.desktop");
        fs::write(
            &path,
            "[Desktop Entry]\nType=Application\nExec=/usr/bin/old\nName=Old\n",
        )
        .unwrap();

        let existing = existing_launcher(&path).unwrap();
        assert_eq!(existing.name.as_deref(), Some("Old"));
        assert_eq!(existing.exec.as_deref(), Some("/usr/bin/old"));
    }

    #[test]
    fn test_missing_launcher() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(existing_launcher(&temp_dir.path().join("none.desktop")), None);
    }
}

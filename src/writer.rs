//! Writes launcher descriptors into the applications directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use crate::{
    desktop_entry::{DesktopEntry, FILE_SUFFIX},
    error::{Error, Result},
    logs,
    model::LaunchSpec,
    platform,
};

#[derive(Debug, Clone)]
pub struct DescriptorWriter {
    applications_dir: PathBuf,
}

impl DescriptorWriter {
    /// The directory is expected to exist already; it is never created.
    pub fn new(applications_dir: impl Into<PathBuf>) -> Self {
        Self {
            applications_dir: applications_dir.into(),
        }
    }

    /// `<applications dir>/<name>.desktop`, made absolute.
    ///
    /// Names that could resolve outside the directory are rejected.
    pub fn target_path(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(Error::Validation(
                "The launcher name must not be empty".to_string(),
            ));
        }
        if name.chars().any(|c| std::path::is_separator(c) || c == '\0') {
            return Err(Error::Validation(format!(
                "The launcher name '{}' must not contain path separators",
                name.replace('\0', "\\0")
            )));
        }

        let dir = std::path::absolute(&self.applications_dir).map_err(|e| {
            Error::io(
                "Failed to resolve applications directory",
                &self.applications_dir,
                e,
            )
        })?;

        Ok(dir.join(format!("{}{}", name, FILE_SUFFIX)))
    }

    /// Descriptor text for `spec` as it would be written.
    pub fn render(&self, spec: &LaunchSpec) -> Result<String> {
        spec.validate()?;
        let target = self.target_path(&spec.name)?;
        Ok(build_entry(spec, &target).to_string())
    }

    /// Write the descriptor for `spec`, replacing any existing file with the
    /// same name. Returns the written path.
    pub fn write(&self, spec: &LaunchSpec) -> Result<PathBuf> {
        spec.validate()?;
        let target = self.target_path(&spec.name)?;
        let content = build_entry(spec, &target).to_string();

        if let Some(existing) = platform::existing_launcher(&target) {
            logs::log_warn(&format!(
                "Overwriting launcher {} (was '{}', Exec={})",
                target.display(),
                existing.name.as_deref().unwrap_or("<unnamed>"),
                existing.exec.as_deref().unwrap_or("<none>")
            ));
        }

        write_atomic(&target, content.as_bytes())?;
        logs::log_info(&format!("Wrote desktop entry to {}", target.display()));

        Ok(target)
    }
}

fn build_entry(spec: &LaunchSpec, target: &Path) -> DesktopEntry {
    DesktopEntry::builder()
        .name(spec.name.as_str())
        .exec(spec.exec.as_str())
        .icon(spec.icon.as_ref().map(|icon| icon.to_string_lossy()))
        .removable(target)
        .build()
}

/// Write to a temp file beside `path`, sync it, then rename over `path`.
///
/// The temp name has a fixed length so any target name that fits the
/// filesystem limit can be written.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = path.with_file_name(format!(".autodesktop.{}.tmp", process::id()));

    let result = (|| {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::io("Failed to create desktop file", &temp_path, e))?;

        file.write_all(content)
            .map_err(|e| Error::io("Failed to write desktop file", &temp_path, e))?;

        file.sync_all()
            .map_err(|e| Error::io("Failed to sync desktop file", &temp_path, e))?;

        fs::rename(&temp_path, path)
            .map_err(|e| Error::io("Failed to save desktop file", path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn spec(name: &str, exec: &str) -> LaunchSpec {
        LaunchSpec {
            name: name.to_string(),
            exec: exec.to_string(),
            icon: None,
        }
    }

    fn entries(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[test]
    fn test_write_minimal_entry() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());

        let path = writer.write(&spec("Foo", "/bin/foo")).unwrap();

        assert_eq!(path, temp_dir.path().join("Foo.desktop"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[Desktop Entry]\nType=Application\nExec=/bin/foo\nName=Foo\n"));
        assert!(!content.contains("Icon="));
        assert!(content.contains(&format!("Exec=rm \"{}\"\n", path.display())));
        assert_eq!(entries(temp_dir.path()), vec![path]);
    }

    #[test]
    fn test_write_with_icon() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());
        let mut launch = spec("Viewer", "bless /tmp/x.bin");
        launch.icon = Some(PathBuf::from("/usr/share/pixmaps/viewer.png"));

        let path = writer.write(&launch).unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert!(content.contains("Exec=bless /tmp/x.bin\nIcon=/usr/share/pixmaps/viewer.png\nName=Viewer\n"));
    }

    #[test]
    fn test_write_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());
        let launch = spec("Foo", "/bin/foo");

        let path = writer.write(&launch).unwrap();
        let first = fs::read(&path).unwrap();
        writer.write(&launch).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(entries(temp_dir.path()).len(), 1);
    }

    #[test]
    fn test_same_name_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());

        let first = writer.write(&spec("Tool", "/bin/old")).unwrap();
        let second = writer.write(&spec("Tool", "/bin/new")).unwrap();

        assert_eq!(first, second);
        let content = fs::read_to_string(second).unwrap();
        assert!(content.contains("Exec=/bin/new\n"));
        assert!(!content.contains("/bin/old"));
    }

    #[test]
    fn test_empty_fields_are_rejected_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());

        let result = writer.write(&spec("", "/bin/foo"));
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = writer.write(&spec("Foo", ""));
        assert!(matches!(result, Err(Error::Validation(_))));

        assert!(!temp_dir.path().join(".desktop").exists());
        assert!(!temp_dir.path().join("Foo.desktop").exists());
        assert!(entries(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_path_traversal_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let apps = temp_dir.path().join("share").join("applications");
        fs::create_dir_all(&apps).unwrap();
        let writer = DescriptorWriter::new(&apps);

        let result = writer.write(&spec("../../etc/evil", "/bin/evil"));

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(entries(&apps).is_empty());
        assert!(!temp_dir.path().join("etc").exists());
        assert_eq!(entries(temp_dir.path()), vec![temp_dir.path().join("share")]);
    }

    #[test]
    fn test_long_name_is_written() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());
        let name = "a".repeat(240);

        let path = writer.write(&spec(&name, "/bin/foo")).unwrap();

        assert_eq!(path, temp_dir.path().join(format!("{}.desktop", name)));
        assert_eq!(entries(temp_dir.path()), vec![path]);
    }

    #[test]
    fn test_dotted_names_stay_inside() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());

        let path = writer.target_path("..").unwrap();
        assert_eq!(path.parent(), Some(temp_dir.path()));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path().join("applications"));

        let result = writer.write(&spec("Foo", "/bin/foo"));

        assert!(matches!(result, Err(Error::Io { .. })));
        assert!(!temp_dir.path().join("applications").exists());
    }

    #[test]
    fn test_render_matches_written_content() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());
        let launch = spec("Foo", "/bin/foo");

        let rendered = writer.render(&launch).unwrap();
        let path = writer.write(&launch).unwrap();

        assert_eq!(rendered, fs::read_to_string(path).unwrap());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_standard_parser_reads_written_entry() {
        use freedesktop_desktop_entry::DesktopEntry as ParsedEntry;

        let temp_dir = TempDir::new().unwrap();
        let writer = DescriptorWriter::new(temp_dir.path());
        let path = writer.write(&spec("Foo", "/bin/foo")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed = ParsedEntry::decode(&path, &content).unwrap();

        assert_eq!(parsed.type_(), Some("Application"));
        assert_eq!(parsed.exec(), Some("/bin/foo"));
        assert_eq!(parsed.name(None).as_deref(), Some("Foo"));
        assert_eq!(parsed.icon(), None);
        assert_eq!(
            parsed.action_exec("Remove"),
            Some(format!("rm \"{}\"", path.display()).as_str())
        );
    }
}

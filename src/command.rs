use std::path::Path;

use crate::classify::ContentType;
use crate::config::OpenerConfig;

/// Suggest a command line for launching `path`.
///
/// The result is only a suggestion shown in the form, so the path is not
/// shell-quoted.
pub fn synthesize(path: &Path, content_type: &ContentType, openers: &OpenerConfig) -> String {
    let path = path.to_string_lossy();

    if content_type.is_launchable() {
        return path.into_owned();
    }

    let opener = match content_type {
        ContentType::Directory => &openers.directory_opener,
        ContentType::PlainText => &openers.text_editor,
        _ => &openers.fallback_viewer,
    };

    format!("{} {}", opener, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launchable_types_use_path_verbatim() {
        let openers = OpenerConfig::default();
        let path = Path::new("/opt/My Apps/run me");

        for content_type in [
            ContentType::Executable,
            ContentType::ShellScript,
            ContentType::AppImage,
        ] {
            assert!(content_type.is_launchable());
            assert_eq!(synthesize(path, &content_type, &openers), "/opt/My Apps/run me");
        }
    }

    #[test]
    fn test_openers() {
        let openers = OpenerConfig::default();

        assert_eq!(
            synthesize(Path::new("/home/u/Music"), &ContentType::Directory, &openers),
            "nautilus /home/u/Music"
        );
        assert_eq!(
            synthesize(Path::new("/home/u/todo.txt"), &ContentType::PlainText, &openers),
            "gedit /home/u/todo.txt"
        );
        assert_eq!(
            synthesize(
                Path::new("/home/u/dump.bin"),
                &ContentType::Other("application/octet-stream".to_string()),
                &openers
            ),
            "bless /home/u/dump.bin"
        );
    }

    #[test]
    fn test_configured_openers() {
        let openers = OpenerConfig {
            directory_opener: "thunar".to_string(),
            text_editor: "kate".to_string(),
            fallback_viewer: "xxd".to_string(),
        };

        assert_eq!(
            synthesize(Path::new("/srv"), &ContentType::Directory, &openers),
            "thunar /srv"
        );
        assert_eq!(
            synthesize(Path::new("/etc/hosts"), &ContentType::PlainText, &openers),
            "kate /etc/hosts"
        );
    }
}

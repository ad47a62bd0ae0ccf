//! Content type classification.
//!
//! Directories short-circuit. Regular files are first judged by name alone
//! (`mime_guess` plus a few extension tables); when the name says nothing
//! useful the first 512 bytes are sniffed with `infer` and a text check.

use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use infer::Infer;
use mime_guess::MimeGuess;

use crate::error::{Error, Result};
use crate::logs;

/// Bytes read from the head of a file when the name is inconclusive.
pub const SNIFF_LEN: u64 = 512;

const APP_IMAGE_EXTENSIONS: &[&str] = &["appimage"];
const NATIVE_EXTENSIONS: &[&str] = &["elf", "out"];
const SHELL_EXTENSIONS: &[&str] = &["sh", "bash", "zsh", "ksh", "csh"];
const SHELL_MIME_TYPES: &[&str] = &[
    "application/x-sh",
    "application/x-shellscript",
    "application/x-csh",
    "text/x-shellscript",
];
const SHELL_INTERPRETERS: &[&str] = &["sh", "bash", "dash", "zsh", "ksh", "csh"];

const ELF_MAGIC: &[u8] = b"\x7fELF";
// AppImage type 1 and 2 stamp "AI" plus the type byte right after the ELF ident.
const APP_IMAGE_MAGIC_OFFSET: usize = 8;

const ZERO_SIZE_MIME: &str = "application/x-zerosize";
const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// Kind of a launch target, as far as command synthesis cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    Executable,
    ShellScript,
    AppImage,
    Directory,
    PlainText,
    /// Anything else; carries the detected MIME type for logging.
    Other(String),
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Executable => "executable",
            ContentType::ShellScript => "shell-script",
            ContentType::AppImage => "app-image",
            ContentType::Directory => "directory",
            ContentType::PlainText => "plain-text",
            ContentType::Other(_) => "other/binary",
        }
    }

    /// Whether the target can be put on a command line as-is.
    pub fn is_launchable(&self) -> bool {
        matches!(
            self,
            ContentType::Executable | ContentType::ShellScript | ContentType::AppImage
        )
    }

    fn binary() -> Self {
        ContentType::Other(OCTET_STREAM_MIME.to_string())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Other(mime) => write!(f, "{} ({})", self.label(), mime),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Result of the name-only pass.
#[derive(Debug, PartialEq)]
enum Guess {
    Certain(ContentType),
    Uncertain,
}

/// Classify `path`. Never fails: unreadable files come back as
/// [`ContentType::Other`].
pub fn classify(path: &Path) -> ContentType {
    if fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false) {
        return ContentType::Directory;
    }

    if let Guess::Certain(content_type) = guess_from_name(path) {
        logs::log_debug(&format!(
            "Classified {} from its name as {}",
            path.display(),
            content_type
        ));
        return content_type;
    }

    match read_head(path) {
        Ok(head) => {
            let content_type = classify_bytes(&head);
            logs::log_debug(&format!(
                "Classified {} from {} leading bytes as {}",
                path.display(),
                head.len(),
                content_type
            ));
            content_type
        }
        Err(e) => {
            logs::log_warn(&e.to_string());
            ContentType::binary()
        }
    }
}

fn guess_from_name(path: &Path) -> Guess {
    let Some(ext) = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
    else {
        return Guess::Uncertain;
    };

    if APP_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Guess::Certain(ContentType::AppImage);
    }
    if NATIVE_EXTENSIONS.contains(&ext.as_str()) {
        return Guess::Certain(ContentType::Executable);
    }
    if SHELL_EXTENSIONS.contains(&ext.as_str()) {
        return Guess::Certain(ContentType::ShellScript);
    }

    match MimeGuess::from_ext(&ext).first() {
        Some(mime) if SHELL_MIME_TYPES.contains(&mime.essence_str()) => {
            Guess::Certain(ContentType::ShellScript)
        }
        Some(mime) if mime.type_() == mime_guess::mime::TEXT => {
            Guess::Certain(ContentType::PlainText)
        }
        Some(mime) if mime.essence_str() != OCTET_STREAM_MIME => {
            Guess::Certain(ContentType::Other(mime.essence_str().to_string()))
        }
        _ => Guess::Uncertain,
    }
}

fn read_head(path: &Path) -> Result<Vec<u8>> {
    let read_error = |source| Error::ClassificationRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN)
        .read_to_end(&mut head)
        .map_err(read_error)?;
    Ok(head)
}

/// Classify from leading bytes. `head` may be shorter than [`SNIFF_LEN`].
fn classify_bytes(head: &[u8]) -> ContentType {
    if head.is_empty() {
        return ContentType::Other(ZERO_SIZE_MIME.to_string());
    }

    if let Some(interpreter) = shebang_interpreter(head) {
        return if SHELL_INTERPRETERS.contains(&interpreter.as_str()) {
            ContentType::ShellScript
        } else {
            ContentType::PlainText
        };
    }

    if head.starts_with(ELF_MAGIC) {
        return if is_app_image(head) {
            ContentType::AppImage
        } else {
            ContentType::Executable
        };
    }

    if let Some(kind) = Infer::new().get(head) {
        return ContentType::Other(kind.mime_type().to_string());
    }

    if looks_like_text(head) {
        ContentType::PlainText
    } else {
        ContentType::binary()
    }
}

fn is_app_image(head: &[u8]) -> bool {
    matches!(
        head.get(APP_IMAGE_MAGIC_OFFSET..APP_IMAGE_MAGIC_OFFSET + 3),
        Some([b'A', b'I', 1 | 2])
    )
}

/// Program name from a `#!` line, looking through `/usr/bin/env`.
fn shebang_interpreter(head: &[u8]) -> Option<String> {
    let rest = head.strip_prefix(b"#!")?;
    let line_end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
    let line = std::str::from_utf8(&rest[..line_end]).ok()?;

    let mut words = line.split_whitespace();
    let program = words.next()?;
    let program = program.rsplit('/').next().unwrap_or(program);
    let program = if program == "env" {
        words.find(|word| !word.starts_with('-'))?
    } else {
        program
    };

    Some(program.rsplit('/').next().unwrap_or(program).to_string())
}

fn looks_like_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        // A multi-byte sequence cut off by the read limit is still text.
        Err(e) => e.error_len().is_none(),
    }
}

use std::path::{Path, PathBuf};

use crate::{
    classify::{self, ContentType},
    command,
    config::OpenerConfig,
    error::{Error, Result},
    logs,
};

pub const MISSING_FIELDS_MESSAGE: &str = "Please specify a name and a command line";

/// The launcher being edited in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Display name, also the descriptor file name.
    pub name: String,
    /// Command line written to `Exec`.
    pub exec: String,
    /// Image file written to `Icon`.
    pub icon: Option<PathBuf>,
}

impl LaunchSpec {
    /// Pre-fill from a target: the name is the file stem, the command line
    /// is synthesized from the target's content type. Relative targets are
    /// resolved against the working directory, since the desktop shell
    /// launches entries from elsewhere.
    pub fn for_target(target: &Path, openers: &OpenerConfig) -> Self {
        let target = std::path::absolute(target).unwrap_or_else(|_| target.to_path_buf());
        let target = target.as_path();
        let content_type = classify::classify(target);
        let exec = command::synthesize(target, &content_type, openers);

        logs::log_info(&format!(
            "Target {} is {}, suggesting '{}'",
            target.display(),
            content_type,
            exec
        ));

        Self {
            name: suggested_name(target, &content_type),
            exec,
            icon: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.exec.trim().is_empty() {
            return Err(Error::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }
}

fn suggested_name(target: &Path, content_type: &ContentType) -> String {
    let name = match content_type {
        ContentType::Directory => target.file_name(),
        _ => target.file_stem(),
    };

    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

//! Form state and the actions the launcher form can trigger.
//!
//! The controller owns the [`LaunchSpec`] being edited. Failures never end
//! the session: they become a blocking [`Notice`] and the form stays open.

use std::path::PathBuf;

use crate::{
    error::Error,
    icon::{self, IconPreview},
    logs,
    model::LaunchSpec,
    writer::DescriptorWriter,
};

/// What the window should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Stay,
    Created(PathBuf),
    Cancelled,
}

/// Blocking message shown until the user dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

/// Actions a launcher form reacts to.
pub trait FormHandler {
    fn on_icon_chosen(&mut self, path: PathBuf) -> Outcome;
    fn on_confirm(&mut self) -> Outcome;
    fn on_cancel(&mut self) -> Outcome;
}

pub struct FormController {
    spec: LaunchSpec,
    writer: DescriptorWriter,
    icon_input: String,
    preview: Option<IconPreview>,
    notice: Option<Notice>,
}

impl FormController {
    pub fn new(spec: LaunchSpec, writer: DescriptorWriter) -> Self {
        Self {
            icon_input: spec
                .icon
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            spec,
            writer,
            preview: None,
            notice: None,
        }
    }

    pub fn spec(&self) -> &LaunchSpec {
        &self.spec
    }

    pub fn icon_input(&self) -> &str {
        &self.icon_input
    }

    pub fn preview(&self) -> Option<&IconPreview> {
        self.preview.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn on_name_changed(&mut self, name: String) {
        self.spec.name = name;
    }

    pub fn on_exec_changed(&mut self, exec: String) {
        self.spec.exec = exec;
    }

    /// Typing a path does not select the icon; [`FormHandler::on_icon_chosen`] does.
    /// Editing away from the chosen icon unsets it.
    pub fn on_icon_path_changed(&mut self, path: String) {
        let still_chosen = self
            .spec
            .icon
            .as_ref()
            .is_some_and(|icon| icon.as_os_str() == path.as_str());
        if !still_chosen {
            self.spec.icon = None;
            self.preview = None;
        }
        self.icon_input = path;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn show_notice(&mut self, title: &str, err: &Error) {
        logs::log_error(&format!("{}: {}", title, err));
        self.notice = Some(Notice {
            title: title.to_string(),
            message: err.to_string(),
        });
    }
}

impl FormHandler for FormController {
    fn on_icon_chosen(&mut self, path: PathBuf) -> Outcome {
        logs::log_debug(&format!("User chose new icon file: '{}'", path.display()));
        self.icon_input = path.to_string_lossy().into_owned();

        match icon::load_icon(&path) {
            Ok(preview) => {
                logs::log_info(&format!(
                    "Icon set to {} (preview {}x{})",
                    path.display(),
                    preview.width,
                    preview.height
                ));
                self.spec.icon = Some(path);
                self.preview = Some(preview);
            }
            Err(e) => {
                self.spec.icon = None;
                self.preview = None;
                self.show_notice("An error has occurred while setting the image", &e);
            }
        }
        Outcome::Stay
    }

    fn on_confirm(&mut self) -> Outcome {
        if let Err(e) = self.spec.validate() {
            self.show_notice("Missing information", &e);
            return Outcome::Stay;
        }

        logs::log_debug("Creating new desktop entry...");
        match self.writer.write(&self.spec) {
            Ok(path) => Outcome::Created(path),
            Err(e) => {
                self.show_notice("An error has occurred while saving the desktop entry", &e);
                Outcome::Stay
            }
        }
    }

    fn on_cancel(&mut self) -> Outcome {
        logs::log_debug("User requested cancel operation, exiting...");
        Outcome::Cancelled
    }
}

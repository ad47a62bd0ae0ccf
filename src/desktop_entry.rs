//! Desktop entry (.desktop file) generation.
//!
//! Writes the subset of the XDG Desktop Entry format the launcher needs: the
//! main `[Desktop Entry]` group and an optional `Remove` action that deletes
//! the file again.

use std::fmt;
use std::path::Path;

pub const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";
pub const REMOVE_ACTION: &str = "Remove";
pub const REMOVE_ACTION_NAME: &str = "Remove from Launcher";
pub const FILE_SUFFIX: &str = ".desktop";

/// A desktop entry representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Entry name (shown in menus).
    pub name: String,
    /// Executable command.
    pub exec: String,
    /// Icon name or path.
    pub icon: Option<String>,
    /// Secondary action removing the entry.
    pub remove_action: Option<DesktopAction>,
}

/// A `[Desktop Action <id>]` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopAction {
    pub name: String,
    pub exec: String,
}

impl DesktopAction {
    /// Action running `rm` on `descriptor`, quoted for the `Exec` key.
    pub fn remove(descriptor: &Path) -> Self {
        Self {
            name: REMOVE_ACTION_NAME.to_string(),
            exec: format!("rm {}", quote_exec_arg(&descriptor.to_string_lossy())),
        }
    }
}

impl DesktopEntry {
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::default()
    }
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", DESKTOP_ENTRY_GROUP)?;
        writeln!(f, "Type=Application")?;
        writeln!(f, "Exec={}", escape_value(&self.exec))?;

        if let Some(ref icon) = self.icon {
            writeln!(f, "Icon={}", escape_value(icon))?;
        }

        writeln!(f, "Name={}", escape_value(&self.name))?;

        if let Some(ref action) = self.remove_action {
            writeln!(f, "Actions={};", REMOVE_ACTION)?;
            writeln!(f)?;
            writeln!(f, "[Desktop Action {}]", REMOVE_ACTION)?;
            writeln!(f, "Name={}", escape_value(&action.name))?;
            writeln!(f, "Exec={}", escape_value(&action.exec))?;
        }

        Ok(())
    }
}

/// Builder for desktop entries.
#[derive(Default)]
pub struct DesktopEntryBuilder {
    name: String,
    exec: String,
    icon: Option<String>,
    remove_action: Option<DesktopAction>,
}

impl DesktopEntryBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn exec(mut self, exec: impl Into<String>) -> Self {
        self.exec = exec.into();
        self
    }

    pub fn icon(mut self, icon: Option<impl Into<String>>) -> Self {
        self.icon = icon.map(Into::into);
        self
    }

    /// Add the `Remove` action deleting the entry stored at `descriptor`.
    pub fn removable(mut self, descriptor: &Path) -> Self {
        self.remove_action = Some(DesktopAction::remove(descriptor));
        self
    }

    pub fn build(self) -> DesktopEntry {
        DesktopEntry {
            name: self.name,
            exec: self.exec,
            icon: self.icon,
            remove_action: self.remove_action,
        }
    }
}

/// Escape a string value: backslash and the control characters the format
/// reserves.
fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Double-quote one `Exec` argument. Inside quotes the characters `"`, `` ` ``,
/// `$` and `\` take a backslash, and `%` is doubled so it is not read as a
/// field code.
fn quote_exec_arg(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        match c {
            '"' | '`' | '$' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '%' => quoted.push_str("%%"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

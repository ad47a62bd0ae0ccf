use std::path::Path;

#[path = "platforms/linux.rs"]
#[cfg(target_os = "linux")]
mod linux;

/// A launcher already present where a new one is about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingLauncher {
    pub name: Option<String>,
    pub exec: Option<String>,
}

/// Read the descriptor at `path`, if there is one and it parses.
pub fn existing_launcher(path: &Path) -> Option<ExistingLauncher> {
    #[cfg(target_os = "linux")]
    {
        linux::existing_launcher(path)
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = path;
        None
    }
}

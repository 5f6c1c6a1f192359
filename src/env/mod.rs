//! Environment Provisioner & Launcher
//!
//! Creates (or reuses) the isolated virtualenv rooted inside the live
//! directory, installs the dependency set into it, and hands off execution to
//! the downstream application.
//!
//! Activation is modeled as a scoped value, not process state: `VenvContext`
//! carries the environment's own interpreter path, and install/launch invoke
//! that interpreter explicitly (`<venv>/bin/python -m pip ...`). Nothing
//! mutates the parent process's environment.

mod install;
mod launch;
mod provision;

use std::path::{Path, PathBuf};

pub use install::install_packages;
pub use launch::launch_app;
pub use provision::{provision_venv, ProvisionOutcome};

/// Resolved paths of a provisioned virtualenv
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvContext {
    root: PathBuf,
}

impl VenvContext {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Marker file `python -m venv` writes at the env root; its presence
    /// means "an environment already lives here"
    pub fn marker(&self) -> PathBuf {
        self.root.join("pyvenv.cfg")
    }

    /// The environment's own interpreter
    #[cfg(not(windows))]
    pub fn python(&self) -> PathBuf {
        self.root.join("bin").join("python")
    }

    #[cfg(windows)]
    pub fn python(&self) -> PathBuf {
        self.root.join("Scripts").join("python.exe")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venv_context_paths() {
        let venv = VenvContext::new(PathBuf::from("/live/.venv"));

        assert_eq!(venv.root(), Path::new("/live/.venv"));
        assert_eq!(venv.marker(), PathBuf::from("/live/.venv/pyvenv.cfg"));
        #[cfg(not(windows))]
        assert_eq!(venv.python(), PathBuf::from("/live/.venv/bin/python"));
    }
}

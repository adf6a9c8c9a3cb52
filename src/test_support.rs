use crate::config::Config;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Scratch directory holding an env file and a job template under their
/// default names.
pub(crate) struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub(crate) fn new(env: &str, template: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".env"), env).unwrap();
        std::fs::write(dir.path().join("escrow_job_template.hcl"), template).unwrap();
        Self { dir }
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default config with every path made absolute inside the workspace.
    pub(crate) fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            env_file: self.path().join(&defaults.env_file),
            template: self.path().join(&defaults.template),
            output: self.path().join(&defaults.output),
            ..defaults
        }
    }

    pub(crate) fn output(&self) -> String {
        std::fs::read_to_string(self.path().join("generated_escrow.nomad.hcl")).unwrap()
    }
}

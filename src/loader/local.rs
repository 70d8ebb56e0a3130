use super::{TemplateLoader, TEMPLATE_EXTENSION};
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Loader for templates from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalLoader {
    root: PathBuf,
}

impl LocalLoader {
    /// Creates a new LocalLoader instance.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if `root` is not a directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::TemplateNotFound { name: root.display().to_string() });
        }
        Ok(Self { root: root.to_path_buf() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a template name to a path under the root. Names that would
    /// escape the root resolve to nothing.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let inside = relative.components().all(|c| matches!(c, Component::Normal(_)));
        (inside && !name.is_empty()).then(|| self.root.join(relative))
    }
}

impl TemplateLoader for LocalLoader {
    fn load(&self, name: &str) -> Result<String> {
        let path = self
            .resolve(name)
            .filter(|p| p.is_file())
            .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })?;
        debug!("Loading template '{}' from {}", name, path.display());
        fs::read_to_string(&path).map_err(Error::IoError)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if name.ends_with(TEMPLATE_EXTENSION) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

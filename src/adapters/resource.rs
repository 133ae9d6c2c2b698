//! Sound resource lookup.
//!
//! The cue is a file shipped next to the binary.  Lookup order:
//!
//! 1. the name itself, if it is an absolute path
//! 2. each configured `resource_dirs` entry, in order
//! 3. the executable's directory
//! 4. `assets/` under the executable's directory

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::ReminderConfig;
use crate::error::PlaybackError;

pub struct ResourceLocator {
    name: String,
    dirs: Vec<PathBuf>,
}

impl ResourceLocator {
    pub fn new(name: impl Into<String>, dirs: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dirs,
        }
    }

    /// Configured directories followed by the executable's directories.
    pub fn from_config(config: &ReminderConfig) -> Self {
        let mut dirs = config.resource_dirs.clone();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir.join("assets"));
            dirs.insert(config.resource_dirs.len(), exe_dir);
        }
        Self::new(config.sound_resource.clone(), dirs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every path that is tried, in order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let name = Path::new(&self.name);
        if name.is_absolute() {
            return vec![name.to_path_buf()];
        }
        self.dirs.iter().map(|d| d.join(name)).collect()
    }

    /// First existing candidate.
    pub fn locate(&self) -> Result<PathBuf, PlaybackError> {
        self.candidates()
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| PlaybackError::ResourceMissing(self.name.clone()))
    }

    /// Locate and read the resource.  An empty file counts as undecodable.
    pub fn load(&self) -> Result<Vec<u8>, PlaybackError> {
        let path = self.locate()?;
        debug!("Resource: loading {}", path.display());
        let bytes = std::fs::read(&path)
            .map_err(|e| PlaybackError::Io(format!("{}: {e}", path.display())))?;
        if bytes.is_empty() {
            return Err(PlaybackError::Decode(format!("{} is empty", path.display())));
        }
        Ok(bytes)
    }
}

//! Lazily enumerates `.fsh`/`.vsh` files below a shader root. Traversal order
//! is whatever the filesystem reports; callers must not rely on ordering
//! across files.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::GenError;
use crate::{ShaderFile, ShaderStage};

pub struct ShaderWalker {
    root: PathBuf,
    entries: walkdir::IntoIter,
}

impl ShaderWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let entries = WalkDir::new(&root).into_iter();
        Self { root, entries }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, path: PathBuf, stage: ShaderStage) -> Result<ShaderFile, GenError> {
        let contents = fs::read(&path).map_err(|source| GenError::Read {
            path: path.clone(),
            source,
        })?;
        let relative_path = path
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(
            path = %relative_path.display(),
            stage = stage.word(),
            bytes = contents.len(),
            "discovered shader"
        );

        Ok(ShaderFile {
            relative_path,
            file_name,
            stage,
            contents,
        })
    }
}

impl Iterator for ShaderWalker {
    type Item = Result<ShaderFile, GenError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    return Some(Err(GenError::Walk { path, source }));
                }
            };

            // Symlinked files count; `file_type` describes the link itself.
            if !entry.path().is_file() {
                continue;
            }

            let stage = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(ShaderStage::from_extension);
            if let Some(stage) = stage {
                return Some(self.load(entry.into_path(), stage));
            }
        }
    }
}

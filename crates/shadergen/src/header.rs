use std::fs;
use std::path::Path;

use tracing::info;

use crate::emitter::{EmittedConstant, Serialization};
use crate::error::GenError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub tool_name: String,
    pub year: i32,
    pub organisation: String,
    pub license: Option<String>,
}

impl Banner {
    pub fn render(&self) -> String {
        let mut copyright = format!("// Copyright (c) {} {}.", self.year, self.organisation);
        if let Some(license) = self.license.as_deref().filter(|text| !text.is_empty()) {
            copyright.push(' ');
            copyright.push_str(license);
        }
        format!(
            "// This file was auto-generated with {}.\n{copyright}\n",
            self.tool_name
        )
    }
}

/// Collects constants in discovery order and renders the final header.
#[derive(Debug)]
pub struct HeaderAssembler {
    banner: Banner,
    serialization: Serialization,
    constants: Vec<EmittedConstant>,
}

impl HeaderAssembler {
    pub fn new(banner: Banner, serialization: Serialization) -> Self {
        Self {
            banner,
            serialization,
            constants: Vec::new(),
        }
    }

    pub fn push(&mut self, constant: EmittedConstant) {
        self.constants.push(constant);
    }

    pub fn constants(&self) -> &[EmittedConstant] {
        &self.constants
    }

    pub fn finish(self) -> GeneratedHeader {
        let mut text = self.banner.render();
        for constant in &self.constants {
            text.push('\n');
            text.push_str(&constant.render(self.serialization));
            text.push('\n');
        }
        GeneratedHeader {
            text,
            constants: self.constants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeader {
    text: String,
    constants: Vec<EmittedConstant>,
}

impl GeneratedHeader {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn constants(&self) -> &[EmittedConstant] {
        &self.constants
    }

    /// Overwrites `path` unconditionally. A failure part-way may leave a
    /// truncated file; the header is always regenerated before use.
    pub fn write(&self, path: &Path) -> Result<(), GenError> {
        fs::write(path, &self.text).map_err(|source| GenError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            constants = self.constants.len(),
            bytes = self.text.len(),
            "wrote generated shader header"
        );
        Ok(())
    }
}

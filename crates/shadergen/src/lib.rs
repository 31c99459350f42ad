mod config;
mod directive;
mod emitter;
mod error;
mod filter;
mod header;
mod walker;

pub use config::{
    ConfigError, GeneratorConfig, DEFAULT_LICENSE, DEFAULT_ORGANISATION, DEFAULT_OUTPUT_NAME,
    DEFAULT_SHADER_ROOT,
};
pub use directive::{classify, ConditionalStack, LineKind, Transition, CAPABILITY_ALLOWLIST};
pub use emitter::{
    derive_symbol, ConstantEmitter, EmittedConstant, Serialization, SymbolStyle, RAW_BLOCK_CLOSE,
    RAW_BLOCK_OPEN,
};
pub use error::GenError;
pub use filter::{filter_source, strip_inline_comment, FilteredLine, FilteredSource};
pub use header::{Banner, GeneratedHeader, HeaderAssembler};
pub use walker::ShaderWalker;

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShaderStage {
    Fragment,
    Vertex,
}

impl ShaderStage {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "fsh" => Some(Self::Fragment),
            "vsh" => Some(Self::Vertex),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Fragment => "fsh",
            Self::Vertex => "vsh",
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Vertex => "vertex",
        }
    }
}

/// A shader discovered under the root. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderFile {
    pub relative_path: PathBuf,
    pub file_name: String,
    pub stage: ShaderStage,
    pub contents: Vec<u8>,
}

impl ShaderFile {
    pub fn text(&self) -> Result<&str, GenError> {
        let text = std::str::from_utf8(&self.contents).map_err(|source| GenError::Decode {
            path: self.relative_path.clone(),
            source,
        })?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSummary {
    pub symbol: String,
    pub stage: ShaderStage,
    pub path: PathBuf,
    pub code_lines: usize,
    pub dropped_lines: usize,
}

#[derive(Debug)]
pub struct Generation {
    pub header: GeneratedHeader,
    pub summaries: Vec<ShaderSummary>,
}

/// Runs walker, filter and emitter over every shader below the configured
/// root and assembles the header in memory. Nothing is written; the first
/// failure aborts the run.
pub fn generate(config: &GeneratorConfig, banner: Banner) -> Result<Generation, GenError> {
    let emitter = ConstantEmitter::new(config.symbols, config.serialization);
    let mut assembler = HeaderAssembler::new(banner, config.serialization);
    let mut summaries = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    let walker = ShaderWalker::new(&config.shader_root);
    debug!(root = %walker.root().display(), "scanning shader root");
    for file in walker {
        let file = file?;
        let filtered = filter_source(file.text()?);
        if filtered.stray_endifs > 0 || filtered.stray_elses > 0 {
            warn!(
                path = %file.relative_path.display(),
                stray_endifs = filtered.stray_endifs,
                stray_elses = filtered.stray_elses,
                "unmatched conditional directives ignored"
            );
        }
        if filtered.unclosed_depth > 0 {
            warn!(
                path = %file.relative_path.display(),
                depth = filtered.unclosed_depth,
                "shader ends inside an open conditional"
            );
        }

        let code_lines = filtered.code_lines();
        let dropped_lines = filtered.dropped;
        let constant = emitter.emit(&file, filtered)?;
        if let Some(first) = seen.get(&constant.symbol) {
            return Err(GenError::DuplicateSymbol {
                symbol: constant.symbol,
                first: first.clone(),
                second: constant.source_path,
            });
        }
        seen.insert(constant.symbol.clone(), constant.source_path.clone());
        debug!(
            symbol = %constant.symbol,
            stage = constant.stage.word(),
            code_lines,
            dropped_lines,
            "embedded shader"
        );
        summaries.push(ShaderSummary {
            symbol: constant.symbol.clone(),
            stage: constant.stage,
            path: constant.source_path.clone(),
            code_lines,
            dropped_lines,
        });
        assembler.push(constant);
    }

    Ok(Generation {
        header: assembler.finish(),
        summaries,
    })
}

/// `generate`, then overwrite the configured output header.
pub fn generate_and_write(
    config: &GeneratorConfig,
    banner: Banner,
) -> Result<Generation, GenError> {
    let generation = generate(config, banner)?;
    generation.header.write(&config.output_path())?;
    Ok(generation)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    const BASIC_VSH: &str = "// header comment\n#ifdef GL_ES\nprecision mediump float;\n#endif\nattribute vec4 position; // pos\n\nvoid main() { gl_Position = position; }\n";

    fn banner() -> Banner {
        Banner {
            tool_name: "genshaders".into(),
            year: 2026,
            organisation: DEFAULT_ORGANISATION.into(),
            license: None,
        }
    }

    fn config_for(root: &Path) -> GeneratorConfig {
        GeneratorConfig {
            shader_root: root.to_path_buf(),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn stage_round_trips_through_extension() {
        for stage in [ShaderStage::Fragment, ShaderStage::Vertex] {
            assert_eq!(ShaderStage::from_extension(stage.extension()), Some(stage));
        }
        assert_eq!(ShaderStage::from_extension("glsl"), None);
        assert_eq!(ShaderStage::from_extension("FSH"), None);
    }

    #[test]
    fn generates_basic_vertex_constant() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("basic.vsh"), BASIC_VSH).unwrap();

        let generation = generate(&config_for(temp.path()), banner()).unwrap();
        let constants = generation.header.constants();
        assert_eq!(constants.len(), 1);
        assert_eq!(constants[0].symbol, "basic_vsh");
        assert_eq!(
            constants[0].value(),
            "precision mediump float;\nattribute vec4 position;\n\nvoid main() { gl_Position = position; }\n"
        );
        assert!(generation.header.text().contains(
            "const char basic_vsh[] = \"precision mediump float;\\n\"\n\t\"attribute vec4 position;\\n\"\n\t\"\\n\"\n\t\"void main() { gl_Position = position; }\\n\";"
        ));
        assert_eq!(
            generation.summaries,
            vec![ShaderSummary {
                symbol: "basic_vsh".into(),
                stage: ShaderStage::Vertex,
                path: PathBuf::from("basic.vsh"),
                code_lines: 3,
                dropped_lines: 3,
            }]
        );
    }

    #[test]
    fn both_serializations_carry_the_same_lines() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("basic.vsh"), BASIC_VSH).unwrap();

        let literal = generate(&config_for(temp.path()), banner()).unwrap();
        let verbatim = generate(
            &GeneratorConfig {
                serialization: Serialization::Verbatim,
                ..config_for(temp.path())
            },
            banner(),
        )
        .unwrap();

        assert_eq!(
            literal.header.constants()[0].value(),
            verbatim.header.constants()[0].value()
        );
        assert!(verbatim
            .header
            .text()
            .contains("const char basic_vsh[] = R\"(\nprecision mediump float;\n"));
    }

    #[test]
    fn undecodable_shader_aborts_the_run() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("broken.fsh"), [0xff, 0xfe, 0x00]).unwrap();

        let err = generate(&config_for(temp.path()), banner()).unwrap_err();
        assert!(matches!(err, GenError::Decode { .. }));
    }

    #[test]
    fn delimiter_collision_prevents_writing() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("bad.fsh"), "float a = b)\";\n").unwrap();
        let config = GeneratorConfig {
            serialization: Serialization::Verbatim,
            ..config_for(temp.path())
        };

        let err = generate_and_write(&config, banner()).unwrap_err();
        assert!(matches!(err, GenError::DelimiterCollision { .. }));
        assert!(!config.output_path().exists());
    }

    #[test]
    fn generation_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("basic.vsh"), BASIC_VSH).unwrap();
        fs::create_dir_all(temp.path().join("fx")).unwrap();
        fs::write(
            temp.path().join("fx/fade.fsh"),
            "uniform float u_alpha;\nvoid main() { gl_FragColor = vec4(u_alpha); }\n",
        )
        .unwrap();
        let config = config_for(temp.path());

        generate_and_write(&config, banner()).unwrap();
        let first = fs::read(config.output_path()).unwrap();
        generate_and_write(&config, banner()).unwrap();
        let second = fs::read(config.output_path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn colliding_symbols_abort_before_writing() {
        let temp = tempfile::tempdir().unwrap();
        for dir in ["a", "b"] {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
            fs::write(temp.path().join(dir).join("fade.fsh"), "void main() {}\n").unwrap();
        }
        let config = config_for(temp.path());

        let err = generate_and_write(&config, banner()).unwrap_err();
        match err {
            GenError::DuplicateSymbol {
                symbol,
                first,
                second,
            } => {
                assert_eq!(symbol, "fade_fsh");
                assert_ne!(first, second);
                assert!(first.ends_with("fade.fsh") && second.ends_with("fade.fsh"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!config.output_path().exists());
    }

    #[test]
    fn sanitized_name_collision_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("my-shader.vsh"), "void main() {}\n").unwrap();
        fs::write(temp.path().join("my_shader.vsh"), "void main() {}\n").unwrap();

        let err = generate(&config_for(temp.path()), banner()).unwrap_err();
        assert!(matches!(
            err,
            GenError::DuplicateSymbol { ref symbol, .. } if symbol == "my_shader_vsh"
        ));
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join("bom.fsh"),
            "\u{feff}#ifdef GL_ES\nprecision mediump float;\n#endif\nvoid main() {}\n",
        )
        .unwrap();

        let generation = generate(&config_for(temp.path()), banner()).unwrap();
        let constant = &generation.header.constants()[0];
        assert_eq!(constant.value(), "precision mediump float;\nvoid main() {}\n");
        assert!(!generation.header.text().contains('\u{feff}'));
    }
}

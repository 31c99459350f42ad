//! Single pass over a shader's lines that drops directives, comments and
//! skipped branches, collapses blank runs, and strips trailing `//` comments.
//!
//! The filter is tolerant: unmatched `#endif`/`#else` and unclosed conditionals
//! are counted in `FilteredSource` for diagnostics but never fail the file.

use crate::directive::{classify, ConditionalStack, LineKind, Transition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteredLine {
    Code(String),
    Blank,
}

impl FilteredLine {
    pub fn text(&self) -> &str {
        match self {
            Self::Code(text) => text,
            Self::Blank => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredSource {
    pub lines: Vec<FilteredLine>,
    pub dropped: usize,
    pub stray_endifs: usize,
    pub stray_elses: usize,
    pub unclosed_depth: usize,
}

impl FilteredSource {
    pub fn code_lines(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, FilteredLine::Code(_)))
            .count()
    }

    pub fn is_well_nested(&self) -> bool {
        self.stray_endifs == 0 && self.stray_elses == 0 && self.unclosed_depth == 0
    }
}

pub fn filter_source(source: &str) -> FilteredSource {
    let mut stack = ConditionalStack::new();
    let mut filtered = FilteredSource::default();

    for line in source.lines() {
        let kind = classify(line);
        match kind {
            LineKind::Endif | LineKind::Else | LineKind::IfOpen { .. } | LineKind::Directive => {
                match stack.apply(&kind) {
                    Transition::StrayEndif => filtered.stray_endifs += 1,
                    Transition::StrayElse => filtered.stray_elses += 1,
                    _ => {}
                }
                filtered.dropped += 1;
            }
            _ if stack.is_skipping() => filtered.dropped += 1,
            LineKind::Comment => filtered.dropped += 1,
            LineKind::Blank => {
                if matches!(filtered.lines.last(), Some(FilteredLine::Code(_))) {
                    filtered.lines.push(FilteredLine::Blank);
                } else {
                    filtered.dropped += 1;
                }
            }
            LineKind::Content(text) => {
                filtered
                    .lines
                    .push(FilteredLine::Code(strip_inline_comment(text).to_string()));
            }
        }
    }

    filtered.unclosed_depth = stack.depth();
    filtered
}

/// Removes everything from the first `//` and trailing whitespace. GLSL has no
/// string literals, so the naive scan cannot cut through one.
pub fn strip_inline_comment(line: &str) -> &str {
    let code = match line.find("//") {
        Some(index) => &line[..index],
        None => line,
    };
    code.trim_end()
}

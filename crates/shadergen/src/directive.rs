//! Tokenizes shader lines into a closed set of kinds and tracks the nested
//! conditional-skip stack that decides which branches survive embedding.
//!
//! Types:
//!
//! - `LineKind` is the result of classifying one raw source line. Directive
//!   dispatch keeps the historical precedence (`endif`, then `else`, then `if`)
//!   so `#elif` and friends behave exactly as older generated headers did.
//! - `ConditionalStack` owns the per-depth skip flags for a single file.
//! - `Transition` reports what a line did to the stack so callers can surface
//!   tolerated nesting mistakes without failing.
//!
//! Functions:
//!
//! - `classify` is the single tokenizing pass over a line.
//! - `ConditionalStack::apply` is the transition table.

/// Conditional texts whose branch is kept. Every other conditional is skipped.
pub const CAPABILITY_ALLOWLIST: [&str; 2] = ["ifdef GL_ES", "if GL_FRAGMENT_PRECISION_HIGH"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Endif,
    Else,
    IfOpen { keep: bool },
    /// Any other `#` line (`#version`, `#define`, ...). Never emitted.
    Directive,
    Comment,
    Blank,
    Content(&'a str),
}

pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return if trimmed.contains("endif") {
            LineKind::Endif
        } else if trimmed.contains("else") {
            LineKind::Else
        } else if trimmed.contains("if") {
            LineKind::IfOpen {
                keep: CAPABILITY_ALLOWLIST
                    .iter()
                    .any(|allowed| trimmed.contains(allowed)),
            }
        } else {
            LineKind::Directive
        };
    }

    if trimmed.trim_end().is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with("//") {
        LineKind::Comment
    } else {
        LineKind::Content(line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Opened { depth: usize, skipping: bool },
    Flipped { depth: usize, skipping: bool },
    Closed { depth: usize },
    /// `#endif` with nothing open; depth stays clamped at the root.
    StrayEndif,
    /// `#else` at the root; the root is never skipped so it is ignored.
    StrayElse,
}

#[derive(Debug, Clone)]
pub struct ConditionalStack {
    skip: Vec<bool>,
    depth: usize,
}

impl Default for ConditionalStack {
    fn default() -> Self {
        Self {
            skip: vec![false],
            depth: 0,
        }
    }
}

impl ConditionalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_skipping(&self) -> bool {
        self.skip[self.depth]
    }

    pub fn apply(&mut self, kind: &LineKind<'_>) -> Transition {
        match *kind {
            LineKind::Endif => {
                if self.depth == 0 {
                    return Transition::StrayEndif;
                }
                self.depth -= 1;
                Transition::Closed { depth: self.depth }
            }
            LineKind::Else => {
                if self.depth == 0 {
                    return Transition::StrayElse;
                }
                self.skip[self.depth] = !self.skip[self.depth];
                Transition::Flipped {
                    depth: self.depth,
                    skipping: self.skip[self.depth],
                }
            }
            LineKind::IfOpen { keep } => {
                self.depth += 1;
                // Slots above the current depth are reused rather than popped.
                if self.depth == self.skip.len() {
                    self.skip.push(false);
                }
                self.skip[self.depth] = !keep;
                Transition::Opened {
                    depth: self.depth,
                    skipping: !keep,
                }
            }
            _ => Transition::Unchanged,
        }
    }
}

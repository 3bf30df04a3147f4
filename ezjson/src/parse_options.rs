// SPDX-License-Identifier: Apache-2.0

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Per-call parser settings.
///
/// ```
/// use ezjson::{parse_with_options, ParseOptions, Value};
///
/// let options = ParseOptions::new().numbers_as_strings(true);
/// let doc = parse_with_options(b"[1.10]", options).unwrap();
/// assert_eq!(doc.at(0), Some(&Value::StrNum("1.10".into())));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub(crate) numbers_as_strings: bool,
    pub(crate) max_depth: usize,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            numbers_as_strings: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Keep numbers as their validated literal text ([`Value::StrNum`](crate::Value::StrNum))
    /// instead of converting them.
    pub const fn numbers_as_strings(mut self, enabled: bool) -> Self {
        self.numbers_as_strings = enabled;
        self
    }

    /// Maximum container nesting. The document's outermost container is depth 1.
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

//! Recognition of tagged code sections: `(start code)` ... `(end)`.
//!
//! Text inside a tagged section is verbatim: the cleaner keeps its rules,
//! the extractor ignores headers in it and the formatter emits it as code.

use regex::Regex;
use std::sync::LazyLock;

static RE_CODE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^ *\( *(?:(?:start|begin)? +)?(?:table|code|example|diagram) *\)$").unwrap()
});

static RE_CODE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^ *\( *(?:end|finish|done)(?: +(?:table|code|example|diagram))? *\)$")
        .unwrap()
});

/// `(code)`, `(start example)`, `(begin table)`, ...
pub fn is_code_start(line: &str) -> bool {
    RE_CODE_START.is_match(line)
}

/// `(end)`, `(end code)`, `(done)`, ...
pub fn is_code_end(line: &str) -> bool {
    RE_CODE_END.is_match(line)
}

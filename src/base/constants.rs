//! Domain constants shared across the pipeline.

/// Tab stop used when expanding tabs in comments, unless configured otherwise.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Title of the section synthesized when members return to the global scope.
pub const GLOBAL_SECTION_TITLE: &str = "Global";

/// Body text of a restated class whose package was already opened in the file.
pub const CONTINUED_TEXT: &str = "(continued)";

/// Separator between a package and a member name in symbol strings.
pub const SYMBOL_SEPARATOR: &str = ".";

/// Separator used inside composite item strings (reference and parent-link keys).
///
/// The ASCII unit separator never appears in comment text after cleaning.
pub const KEY_SEPARATOR: char = '\u{1F}';

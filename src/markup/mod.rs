//! NDMarkup: the portable rich-text markup topic bodies are stored in.
//!
//! Block tags: `<p>`, `<h>`, `<code type="anonymous">`, `<ul><li>`,
//! `<dl>` with `<de>` (plain entry) or `<ds>` (symbol entry) and `<dd>`.
//! Inline tags: `<b>`, `<u>`, `<link target name original>`,
//! `<email target name>`, `<url target name>`. Text is always escaped.

mod autolink;
mod block;
mod escape;
mod inline;
mod lexer;
mod summary;

pub use autolink::{Segment, find_autolinks};
pub use block::{MarkupFormatter, format_body};
pub use escape::{escape, unescape};
pub use inline::format_inline;
pub use summary::{SymbolEntry, link_targets, summary, symbol_entries};

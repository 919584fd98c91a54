//! Comment extraction from source text.
//!
//! ```text
//! Source Text
//!     ↓
//! CommentScanner → RawComment (markers blanked, prototype captured)
//!     ↓
//! CommentCleaner → clean lines (tabs expanded, boxes and rules removed)
//! ```
//!
//! Nothing here knows about topics beyond header recognition, which the
//! scanner needs to decide whether a prototype belongs to the comment.

mod cleaner;
mod code_section;
mod prototype;
mod scanner;

pub use cleaner::{CommentCleaner, expand_tabs, is_horizontal_rule};
pub use code_section::{is_code_end, is_code_start};
pub use prototype::{capture_prototype, normalize_prototype};
pub use scanner::{CommentScanner, RawComment, scan_comments};

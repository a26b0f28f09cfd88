//! Shared foundation for the cstar compiler front-end: source buffers,
//! byte ranges with line/column bookkeeping, the diagnostics log, the
//! string interner and UTF-8 rune encoding.

pub mod diag;
pub mod encoding;
pub mod flags;
pub mod source;
pub mod strings;


pub use diag::{Diagnostic, Log, Severity};
pub use flags::NodeFlags;
pub use source::{LineColumn, Position, Range, Source};
pub use strings::{IStr, Strings};

//! The cstar AST: statement and expression nodes, the double-dispatch
//! visitor protocol and the diagnostic tree dumper.

pub mod dump;
pub mod expr;
pub mod stmt;
pub mod visit;

#[cfg(test)]
mod tests;

pub use dump::AstDump;
pub use expr::*;
pub use stmt::*;
pub use visit::Visitor;

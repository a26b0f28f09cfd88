//! Generic node flags carried by tokens and AST nodes.

use std::ops::{BitOr, BitOrAssign};

/// Bitset of generic flags. A membership test asks whether every bit of
/// the probe is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeFlags(u32);

impl NodeFlags {
    pub const NONE: NodeFlags = NodeFlags(0);
    pub const IS_COMPTIME: NodeFlags = NodeFlags(1 << 0);
    pub const IS_CONSTRUCTOR: NodeFlags = NodeFlags(1 << 1);
    pub const IS_VARIADIC: NodeFlags = NodeFlags(1 << 2);
    pub const IS_GENERIC: NodeFlags = NodeFlags(1 << 3);
    pub const IS_EXTERN: NodeFlags = NodeFlags(1 << 4);
    pub const IS_OVERLOAD: NodeFlags = NodeFlags(1 << 5);
    pub const IS_IMMUTABLE: NodeFlags = NodeFlags(1 << 6);
    pub const LEXER_SKIP_COMMENTS: NodeFlags = NodeFlags(1 << 7);

    pub fn contains(self, other: NodeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: NodeFlags) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for NodeFlags {
    type Output = NodeFlags;

    fn bitor(self, rhs: NodeFlags) -> NodeFlags {
        NodeFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for NodeFlags {
    fn bitor_assign(&mut self, rhs: NodeFlags) {
        self.0 |= rhs.0;
    }
}

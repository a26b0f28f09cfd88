//! The type model: one enum over the primitive families, with each
//! built-in exposed as a `&'static` singleton.

use std::ptr;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

/// A type node. Built-ins are singletons; `is_assignable` is identity.
#[derive(Debug, PartialEq, Eq)]
pub enum Type {
    /// Named types without further structure: `void`, `auto`, `null`.
    Builtin(BuiltinType),
    Bool,
    /// Chars are 32-bit scalar values.
    Char,
    String,
    Integer(IntegerType),
    Float(FloatType),
}

#[derive(Debug, PartialEq, Eq)]
pub struct BuiltinType {
    pub name: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct IntegerType {
    pub name: &'static str,
    pub bits: u8,
    pub signed: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FloatType {
    pub name: &'static str,
    pub bits: u8,
}

pub static VOID: Type = Type::Builtin(BuiltinType { name: "void" });
pub static AUTO: Type = Type::Builtin(BuiltinType { name: "auto" });
pub static NULL: Type = Type::Builtin(BuiltinType { name: "null" });
pub static BOOL: Type = Type::Bool;
pub static CHAR: Type = Type::Char;
pub static STRING: Type = Type::String;

macro_rules! integer_type {
    ($name:ident, $text:literal, $bits:literal, $signed:literal) => {
        pub static $name: Type = Type::Integer(IntegerType {
            name: $text,
            bits: $bits,
            signed: $signed,
        });
    };
}

integer_type!(I8, "i8", 8, true);
integer_type!(U8, "u8", 8, false);
integer_type!(I16, "i16", 16, true);
integer_type!(U16, "u16", 16, false);
integer_type!(I32, "i32", 32, true);
integer_type!(U32, "u32", 32, false);
integer_type!(I64, "i64", 64, true);
integer_type!(U64, "u64", 64, false);

pub static F32: Type = Type::Float(FloatType {
    name: "f32",
    bits: 32,
});
pub static F64: Type = Type::Float(FloatType {
    name: "f64",
    bits: 64,
});

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Type::Builtin(b) => b.name,
            Type::Bool => "bool",
            Type::Char => "char",
            Type::String => "string",
            Type::Integer(i) => i.name,
            Type::Float(f) => f.name,
        }
    }

    /// Size in bytes. `void`/`auto`/`null` have none.
    pub fn size(&self) -> usize {
        match self {
            Type::Builtin(_) => 0,
            Type::Bool => 1,
            Type::Char => 4,
            Type::String => std::mem::size_of::<usize>(),
            Type::Integer(i) => usize::from(i.bits) / 8,
            Type::Float(f) => usize::from(f.bits) / 8,
        }
    }

    /// Assignability between built-ins is singleton identity.
    pub fn is_assignable(&'static self, from: &'static Type) -> bool {
        ptr::eq(self, from)
    }

    pub fn is_auto(&'static self) -> bool {
        ptr::eq(self, &AUTO)
    }
}

impl IntegerType {
    /// Least upper bound of two integer types: the wider wins; on a width
    /// tie the unsigned one is preferred.
    pub fn bigger(a: &'static Type, b: &'static Type) -> &'static Type {
        match (a, b) {
            (Type::Integer(ia), Type::Integer(ib)) => {
                if ia.bits != ib.bits {
                    if ia.bits > ib.bits {
                        a
                    } else {
                        b
                    }
                } else if ia.signed {
                    b
                } else {
                    a
                }
            }
            _ => a,
        }
    }
}

/// Resolve a type name to its singleton.
pub fn builtin(name: &str) -> Option<&'static Type> {
    static LOOKUP: OnceLock<FxHashMap<&'static str, &'static Type>> = OnceLock::new();
    let table = LOOKUP.get_or_init(|| {
        let all: [&'static Type; 16] = [
            &VOID, &AUTO, &NULL, &BOOL, &CHAR, &STRING, &I8, &U8, &I16, &U16, &I32, &U32, &I64,
            &U64, &F32, &F64,
        ];
        all.iter().map(|ty| (ty.name(), *ty)).collect()
    });
    table.get(name).copied()
}

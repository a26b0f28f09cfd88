//! Built-in type registry.
//!
//! Every primitive type is a process-wide singleton; expressions share
//! them by `&'static` reference and compare them by identity.

mod ty;


pub use ty::{
    builtin, BuiltinType, FloatType, IntegerType, Type, AUTO, BOOL, CHAR, F32, F64, I8, I16, I32,
    I64, NULL, STRING, U8, U16, U32, U64, VOID,
};

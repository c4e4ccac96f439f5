//! Display formatting for stored values
//!
//! Raw values print as compact JSON; converted values print their typed
//! representation so error messages show what the engine actually saw.

use std::fmt;

use crate::core::store::Store;
use crate::core::value::{Converted, Value};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::String(text) => write!(f, "{text:?}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(store) => write!(f, "{store}"),
            Self::Converted(converted) => write!(f, "{converted}"),
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key:?}: {value}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Converted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{v}_i8"),
            Self::I16(v) => write!(f, "{v}_i16"),
            Self::I32(v) => write!(f, "{v}_i32"),
            Self::I64(v) => write!(f, "{v}_i64"),
            Self::Isize(v) => write!(f, "{v}_isize"),
            Self::U8(v) => write!(f, "{v}_u8"),
            Self::U16(v) => write!(f, "{v}_u16"),
            Self::U32(v) => write!(f, "{v}_u32"),
            Self::U64(v) => write!(f, "{v}_u64"),
            Self::Usize(v) => write!(f, "{v}_usize"),
            Self::F32(v) => write!(f, "{v}_f32"),
            Self::F64(v) => write!(f, "{v}_f64"),
            Self::Url(url) => write!(f, "<{url}>"),
            Self::Date(date) => write!(f, "{}", date.to_rfc3339()),
            Self::Objects(mapped) => {
                write!(f, "[{} x {}]", mapped.type_name(), mapped.len())
            }
        }
    }
}

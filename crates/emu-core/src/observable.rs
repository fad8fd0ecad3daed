//! Read-only state inspection.
//!
//! Queries take `&self`, so looking at a component can never disturb it.

use std::fmt;

/// Result of a state query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    /// 24-bit addresses and other wide quantities.
    U32(u32),
    /// Cycle counters.
    U64(u64),
    /// Mnemonics and mode names.
    Text(&'static str),
}

impl Value {
    /// Numeric view of the value. Booleans map to 0/1; text has none.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Bool(v) => Some(u64::from(v)),
            Value::U8(v) => Some(u64::from(v)),
            Value::U16(v) => Some(u64::from(v)),
            Value::U32(v) => Some(u64::from(v)),
            Value::U64(v) => Some(v),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", u8::from(*v)),
            Value::U8(v) => write!(f, "${v:02X}"),
            Value::U16(v) => write!(f, "${v:04X}"),
            Value::U32(v) => write!(f, "${:02X}:{:04X}", v >> 16, v & 0xFFFF),
            Value::U64(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<&'static str> for Value {
    fn from(v: &'static str) -> Self {
        Value::Text(v)
    }
}

/// A component whose state can be inspected by dotted path, e.g. `pc`,
/// `flags.m` or `cpu.a`.
pub trait Observable {
    /// Returns `None` for unknown paths.
    fn query(&self, path: &str) -> Option<Value>;

    /// Every path `query` understands.
    fn query_paths(&self) -> &'static [&'static str];
}

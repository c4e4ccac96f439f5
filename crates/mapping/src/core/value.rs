//! The dynamic value held by a [`Store`]
//!
//! A [`Value`] is either still *raw* (as decoded from the input payload) or
//! already *converted* to a typed representation. Converted values carry one
//! variant per target type, so "is this field already converted to `T`?" is a
//! plain variant comparison done by [`StoreValue::from_exact`].

use std::any::{TypeId, type_name};
use std::sync::Arc;

use serde_json::Number;
use url::Url;

use crate::core::store::Store;
use crate::date::Date;
use crate::object::{LazyMapping, LazyObject};

/// Dynamic value stored at a key
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Null sentinel
    #[default]
    Null,

    /// Boolean literal
    Bool(bool),

    /// Generic numeric box, as decoded from JSON
    Number(Number),

    /// UTF-8 text
    String(String),

    /// Raw sequence
    Array(Vec<Value>),

    /// Nested store, shared copy-on-write
    Object(Arc<Store>),

    /// Value already converted to a concrete type
    Converted(Converted),
}

/// Typed representation written back after a conversion
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Url(Url),
    Date(Date),
    Objects(MappedArray),
}

/// Sequence of mapped objects built for one concrete mapped type
///
/// The type tag keeps a cached `Vec<A>` from being handed out as `Vec<B>`.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedArray {
    type_id: TypeId,
    type_name: &'static str,
    items: Vec<LazyObject>,
}

impl MappedArray {
    /// Tag `items` as the backing objects of a `Vec<T>`
    pub fn new<T: LazyMapping>(items: Vec<LazyObject>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            items,
        }
    }

    /// Whether this array was built for `T`
    pub fn holds<T: LazyMapping>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn items(&self) -> &[LazyObject] {
        &self.items
    }

    pub(crate) fn take_items(&mut self) -> Vec<LazyObject> {
        std::mem::take(&mut self.items)
    }

    pub(crate) fn restore_items(&mut self, items: Vec<LazyObject>) {
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Wrap every backing object in `T`
    pub fn to_vec<T: LazyMapping>(&self) -> Vec<T> {
        self.items.iter().cloned().map(T::from_object).collect()
    }
}

impl Value {
    // ==================== Type queries ====================

    /// Name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Number(_) => "Number",
            Self::String(_) => "String",
            Self::Array(_) => "Array",
            Self::Object(_) => "Object",
            Self::Converted(converted) => converted.kind_name(),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[inline]
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }

    // ==================== Accessors ====================

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Store> {
        match self {
            Self::Object(store) => Some(&**store),
            _ => None,
        }
    }

    pub fn as_converted(&self) -> Option<&Converted> {
        match self {
            Self::Converted(converted) => Some(converted),
            _ => None,
        }
    }

    /// Numeric view over raw numbers and converted numeric variants
    ///
    /// Booleans are not numeric here; converters that accept them do so
    /// explicitly.
    pub fn numeric(&self) -> Option<Numeric> {
        match self {
            Self::Number(number) => Some(Numeric::from_number(number)),
            Self::Converted(converted) => converted.numeric(),
            _ => None,
        }
    }
}

impl Converted {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::Isize(_) => "isize",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::Usize(_) => "usize",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Url(_) => "Url",
            Self::Date(_) => "Date",
            Self::Objects(_) => "Array<Object>",
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        let numeric = match *self {
            Self::I8(v) => Numeric::Int(i64::from(v)),
            Self::I16(v) => Numeric::Int(i64::from(v)),
            Self::I32(v) => Numeric::Int(i64::from(v)),
            Self::I64(v) => Numeric::Int(v),
            Self::Isize(v) => Numeric::Int(v as i64),
            Self::U8(v) => Numeric::UInt(u64::from(v)),
            Self::U16(v) => Numeric::UInt(u64::from(v)),
            Self::U32(v) => Numeric::UInt(u64::from(v)),
            Self::U64(v) => Numeric::UInt(v),
            Self::Usize(v) => Numeric::UInt(v as u64),
            Self::F32(v) => Numeric::Float(f64::from(v)),
            Self::F64(v) => Numeric::Float(v),
            Self::Url(_) | Self::Date(_) | Self::Objects(_) => return None,
        };
        Some(numeric)
    }
}

// ============================================================================
// NUMERIC VIEW
// ============================================================================

/// Widest lossless view of a numeric value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// 2^63, the first float above `i64::MAX`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
/// 2^64, the first float above `u64::MAX`
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

impl Numeric {
    fn from_number(number: &Number) -> Self {
        if let Some(int) = number.as_i64() {
            Self::Int(int)
        } else if let Some(uint) = number.as_u64() {
            Self::UInt(uint)
        } else {
            Self::Float(number.as_f64().unwrap_or(f64::NAN))
        }
    }

    /// Parse a numeric-formatted string, locale-invariant
    ///
    /// Integers are tried first so large integers keep full precision.
    /// Surrounding whitespace is ignored; non-finite floats are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(int) = text.parse::<i64>() {
            return Some(Self::Int(int));
        }
        if let Ok(uint) = text.parse::<u64>() {
            return Some(Self::UInt(uint));
        }
        text.parse::<f64>()
            .ok()
            .filter(|float| float.is_finite())
            .map(Self::Float)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// Non-zero, non-NaN
    pub fn is_truthy(self) -> bool {
        match self {
            Self::Int(v) => v != 0,
            Self::UInt(v) => v != 0,
            Self::Float(v) => v != 0.0 && !v.is_nan(),
        }
    }

    /// Integer of type `T` holding exactly this value, if one exists
    pub fn exact_integer<T>(self) -> Option<T>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        match self {
            Self::Int(v) => T::try_from(v).ok(),
            Self::UInt(v) => T::try_from(v).ok(),
            Self::Float(v) if v.fract() == 0.0 => integral_float::<T>(v),
            Self::Float(_) => None,
        }
    }

    /// Integer of type `T` after truncating any fraction toward zero
    pub fn truncated_integer<T>(self) -> Option<T>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        match self {
            Self::Float(v) => integral_float::<T>(v.trunc()),
            integral => integral.exact_integer(),
        }
    }

    /// `0` or `1` as a boolean
    pub fn exact_bool(self) -> Option<bool> {
        match self.exact_integer::<u8>()? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }

    pub fn to_number(self) -> Option<Number> {
        match self {
            Self::Int(v) => Some(Number::from(v)),
            Self::UInt(v) => Some(Number::from(v)),
            Self::Float(v) => Number::from_f64(v),
        }
    }
}

fn integral_float<T>(value: f64) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    if (-I64_BOUND..I64_BOUND).contains(&value) {
        T::try_from(value as i64).ok()
    } else if (0.0..U64_BOUND).contains(&value) {
        T::try_from(value as u64).ok()
    } else {
        None
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

// ============================================================================
// STORE VALUE CONTRACT
// ============================================================================

/// A type the engine can read from and cache into a [`Store`]
pub trait StoreValue: Clone {
    /// Name used in conversion errors
    const TYPE_NAME: &'static str;

    /// The value when `value` already holds exactly this type (cache hit)
    fn from_exact(value: &Value) -> Option<Self>;

    /// A value-preserving cast that needs no registered converter
    fn cast(value: &Value) -> Option<Self> {
        let _ = value;
        None
    }

    /// Representation written back into the store
    fn into_value(self) -> Value;
}

macro_rules! integer_store_values {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl StoreValue for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn from_exact(value: &Value) -> Option<Self> {
                match value {
                    Value::Converted(Converted::$variant(v)) => Some(*v),
                    _ => None,
                }
            }

            fn cast(value: &Value) -> Option<Self> {
                value.numeric()?.exact_integer()
            }

            fn into_value(self) -> Value {
                Value::Converted(Converted::$variant(self))
            }
        }
    )*};
}

integer_store_values! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

impl StoreValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_exact(value: &Value) -> Option<Self> {
        match value {
            Value::Converted(Converted::F64(v)) => Some(*v),
            _ => None,
        }
    }

    fn cast(value: &Value) -> Option<Self> {
        value.numeric().map(Numeric::as_f64)
    }

    fn into_value(self) -> Value {
        Value::Converted(Converted::F64(self))
    }
}

impl StoreValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_exact(value: &Value) -> Option<Self> {
        match value {
            Value::Converted(Converted::F32(v)) => Some(*v),
            _ => None,
        }
    }

    fn cast(value: &Value) -> Option<Self> {
        let wide = value.numeric()?.as_f64();
        let narrow = wide as f32;
        (narrow.is_finite() || !wide.is_finite()).then_some(narrow)
    }

    fn into_value(self) -> Value {
        Value::Converted(Converted::F32(self))
    }
}

impl StoreValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_exact(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn cast(value: &Value) -> Option<Self> {
        value.numeric()?.exact_bool()
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl StoreValue for Number {
    const TYPE_NAME: &'static str = "Number";

    fn from_exact(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(number.clone()),
            _ => None,
        }
    }

    fn cast(value: &Value) -> Option<Self> {
        value.numeric()?.to_number()
    }

    fn into_value(self) -> Value {
        Value::Number(self)
    }
}

impl StoreValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_exact(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl StoreValue for Url {
    const TYPE_NAME: &'static str = "Url";

    fn from_exact(value: &Value) -> Option<Self> {
        match value {
            Value::Converted(Converted::Url(url)) => Some(url.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Converted(Converted::Url(self))
    }
}

impl StoreValue for Date {
    const TYPE_NAME: &'static str = "Date";

    fn from_exact(value: &Value) -> Option<Self> {
        match value {
            Value::Converted(Converted::Date(date)) => Some(*date),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Converted(Converted::Date(self))
    }
}

impl StoreValue for Store {
    const TYPE_NAME: &'static str = "Object";

    fn from_exact(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }

    fn into_value(self) -> Value {
        Value::Object(Arc::new(self))
    }
}

/// Any stored value, as-is
impl StoreValue for Value {
    const TYPE_NAME: &'static str = "Value";

    fn from_exact(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn into_value(self) -> Value {
        self
    }
}

/// Sequences are exact when every element is exact, and castable when every
/// element is exact or castable. A cast writes back the typed elements.
impl<T: StoreValue> StoreValue for Vec<T> {
    const TYPE_NAME: &'static str = "Array";

    fn from_exact(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_exact).collect()
    }

    fn cast(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| T::from_exact(item).or_else(|| T::cast(item)))
            .collect()
    }

    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(StoreValue::into_value).collect())
    }
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(text) => Self::String(text),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(Arc::new(Store::from(map))),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<Store> for Value {
    fn from(store: Store) -> Self {
        Self::Object(Arc::new(store))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Converted> for Value {
    fn from(converted: Converted) -> Self {
        Self::Converted(converted)
    }
}

use crate::error::{Result, StackError};
use everscale_types::prelude::*;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::fmt;

/// Discriminant of a [`StackValue`]; displays as its wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Null,
    Cell,
    Tuple,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Null => "null",
            Kind::Cell => "cell",
            Kind::Tuple => "tuple",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Kind> {
        match tag {
            "int" => Some(Kind::Int),
            "null" => Some(Kind::Null),
            "cell" => Some(Kind::Cell),
            "tuple" => Some(Kind::Tuple),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a TVM stack.
///
/// Integers are arbitrary precision (the VM uses 257-bit signed integers).
/// A value never changes after construction; cells are reference counted
/// and the whole tree is `Send + Sync`.
///
/// Cells compare by representation hash, so equality never walks a cell tree.
#[derive(Clone)]
pub enum StackValue {
    Int(BigInt),
    Null,
    Cell(Cell),
    Tuple(Vec<StackValue>),
}

impl StackValue {
    pub fn new_int(value: impl Into<BigInt>) -> Self {
        StackValue::Int(value.into())
    }

    pub fn new_null() -> Self {
        StackValue::Null
    }

    pub fn new_cell(cell: Cell) -> Self {
        StackValue::Cell(cell)
    }

    pub fn new_tuple(items: Vec<StackValue>) -> Self {
        StackValue::Tuple(items)
    }

    pub fn kind(&self) -> Kind {
        match self {
            StackValue::Int(_) => Kind::Int,
            StackValue::Null => Kind::Null,
            StackValue::Cell(_) => Kind::Cell,
            StackValue::Tuple(_) => Kind::Tuple,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StackValue::Null)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, StackValue::Int(_))
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, StackValue::Cell(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, StackValue::Tuple(_))
    }

    /// Levels of tuple nesting: 0 for a scalar, 1 for a flat tuple.
    ///
    /// A [`Decoder`](crate::Decoder) accepts the wire form of this value only
    /// when its `max_depth` is at least this number.
    pub fn tuple_depth(&self) -> usize {
        match self {
            StackValue::Tuple(items) => {
                1 + items.iter().map(StackValue::tuple_depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    fn mismatch(&self, expected: Kind) -> StackError {
        StackError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// The integer payload; `TypeMismatch` for any other kind.
    pub fn int_value(&self) -> Result<&BigInt> {
        self.try_int().ok_or_else(|| self.mismatch(Kind::Int))
    }

    /// The integer as `i64`; `IntegerOutOfRange` instead of truncating.
    pub fn int_as_i64(&self) -> Result<i64> {
        self.int_value()?
            .to_i64()
            .ok_or(StackError::IntegerOutOfRange { target: "i64" })
    }

    /// The integer as `u64`; negative values are out of range.
    pub fn int_as_u64(&self) -> Result<u64> {
        self.int_value()?
            .to_u64()
            .ok_or(StackError::IntegerOutOfRange { target: "u64" })
    }

    pub fn cell_value(&self) -> Result<&Cell> {
        self.try_cell().ok_or_else(|| self.mismatch(Kind::Cell))
    }

    pub fn tuple_values(&self) -> Result<&[StackValue]> {
        self.try_tuple().ok_or_else(|| self.mismatch(Kind::Tuple))
    }

    pub fn try_int(&self) -> Option<&BigInt> {
        match self {
            StackValue::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn try_cell(&self) -> Option<&Cell> {
        match self {
            StackValue::Cell(c) => Some(c),
            _ => None,
        }
    }

    pub fn try_tuple(&self) -> Option<&[StackValue]> {
        match self {
            StackValue::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Int(v) => write!(f, "{v}"),
            StackValue::Null => f.write_str("null"),
            StackValue::Cell(c) => write!(f, "cell({} bits, {} refs)", c.bit_len(), c.reference_count()),
            StackValue::Tuple(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl PartialEq for StackValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StackValue::Int(a), StackValue::Int(b)) => a == b,
            (StackValue::Null, StackValue::Null) => true,
            (StackValue::Cell(a), StackValue::Cell(b)) => a.repr_hash() == b.repr_hash(),
            (StackValue::Tuple(a), StackValue::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for StackValue {}

impl fmt::Debug for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            StackValue::Null => f.write_str("Null"),
            // summary only: printing children would revisit shared subtrees
            StackValue::Cell(c) => write!(
                f,
                "Cell({} bits, {} refs, {})",
                c.bit_len(),
                c.reference_count(),
                c.repr_hash()
            ),
            StackValue::Tuple(items) => f.debug_tuple("Tuple").field(items).finish(),
        }
    }
}

impl From<BigInt> for StackValue {
    fn from(v: BigInt) -> Self {
        StackValue::Int(v)
    }
}

impl From<i64> for StackValue {
    fn from(v: i64) -> Self {
        StackValue::Int(v.into())
    }
}

impl From<u64> for StackValue {
    fn from(v: u64) -> Self {
        StackValue::Int(v.into())
    }
}

impl From<Cell> for StackValue {
    fn from(c: Cell) -> Self {
        StackValue::Cell(c)
    }
}

impl From<Vec<StackValue>> for StackValue {
    fn from(items: Vec<StackValue>) -> Self {
        StackValue::Tuple(items)
    }
}

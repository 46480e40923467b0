//! TVM stack values as exchanged with a node when running get-methods.
//!
//! The node returns the result stack as JSON records; this crate turns them
//! into owned, immutable [`StackValue`] trees and back.
//!
//! # Data flow
//!
//! ```text
//! transport (external)
//!   │  raw JSON bytes
//!   ▼
//! {"type": "int" | "null" | "cell" | "tuple", "value": ...}
//!   │
//!   ▼  Decoder (depth-bounded, all-or-nothing)
//! StackValue tree ──► Stack ──► caller
//!   │
//!   ▼  to_wire()
//! JSON records for call arguments
//! ```
//!
//! Cell payloads are base64 bags of cells, decoded through the
//! [`CellDeserializer`] seam (default: [`StdBoc`], backed by `everscale-types`).

pub mod boc;
pub mod decode;
pub mod encode;
pub mod error;
pub mod method;
pub mod stack;
pub mod value;

pub use boc::BocError;
pub use everscale_types::prelude::Cell;
pub use decode::{
    decode_value, CellDeserializer, DecodeConfig, Decoder, StdBoc, DEFAULT_MAX_DEPTH,
    MAX_DEPTH_ENV,
};
pub use error::{Result, StackError};
pub use method::{RunMethodRequest, RunMethodResult};
pub use num_bigint::BigInt;
pub use stack::Stack;
pub use value::{Kind, StackValue};

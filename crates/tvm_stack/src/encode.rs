//! [`StackValue`] → wire record, for sending call arguments.

use crate::boc;
use crate::value::StackValue;
use base64::Engine;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

impl StackValue {
    /// The wire record for this value. Cells are re-serialized as a
    /// single-root bag of cells in standard base64.
    ///
    /// Any depth of tuple nesting is written; decoding it back needs a
    /// [`Decoder`](crate::Decoder) whose `max_depth` is at least
    /// [`tuple_depth`](StackValue::tuple_depth).
    pub fn to_wire(&self) -> Value {
        let tag = self.kind().as_str();
        match self {
            StackValue::Int(v) => json!({"type": tag, "value": v.to_string()}),
            StackValue::Null => json!({"type": tag}),
            StackValue::Cell(c) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(boc::encode(c));
                json!({"type": tag, "value": encoded})
            }
            StackValue::Tuple(items) => {
                let items: Vec<Value> = items.iter().map(StackValue::to_wire).collect();
                json!({"type": tag, "value": items})
            }
        }
    }
}

impl Serialize for StackValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

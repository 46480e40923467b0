//! Ordered stack of values: call arguments or get-method results.
//!
//! No arity or type checks; position is meaningful and values may repeat.

use crate::value::StackValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Index;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack {
    items: Vec<StackValue>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: impl Into<StackValue>) {
        self.items.push(value.into());
    }

    pub fn pop(&mut self) -> Option<StackValue> {
        self.items.pop()
    }

    pub fn get(&self, index: usize) -> Option<&StackValue> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StackValue> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[StackValue] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<StackValue> {
        self.items
    }

    /// JSON array of wire records, in stack order.
    pub fn to_wire(&self) -> Value {
        Value::Array(self.items.iter().map(StackValue::to_wire).collect())
    }
}

impl From<Vec<StackValue>> for Stack {
    fn from(items: Vec<StackValue>) -> Self {
        Self { items }
    }
}

impl FromIterator<StackValue> for Stack {
    fn from_iter<I: IntoIterator<Item = StackValue>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<StackValue> for Stack {
    fn extend<I: IntoIterator<Item = StackValue>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Stack {
    type Item = StackValue;
    type IntoIter = std::vec::IntoIter<StackValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a StackValue;
    type IntoIter = std::slice::Iter<'a, StackValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Index<usize> for Stack {
    type Output = StackValue;

    fn index(&self, index: usize) -> &StackValue {
        &self.items[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_order_and_duplicates() {
        let mut s = Stack::new();
        s.push(1i64);
        s.push(StackValue::new_null());
        s.push(1i64);
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], s[2]);
        assert!(s[1].is_null());
        assert_eq!(s.pop(), Some(StackValue::new_int(1)));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn wire_form_is_array() {
        let s: Stack = vec![StackValue::new_int(5), StackValue::new_null()].into();
        assert_eq!(
            s.to_wire(),
            json!([{"type": "int", "value": "5"}, {"type": "null"}])
        );
        assert_eq!(serde_json::to_value(&s).unwrap(), s.to_wire());
    }

    #[test]
    fn deserializes_from_array() {
        let s: Stack = serde_json::from_value(json!([
            {"type": "int", "value": "-1"},
            {"type": "tuple", "value": []}
        ]))
        .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].int_as_i64().unwrap(), -1);
        assert!(s[1].tuple_values().unwrap().is_empty());
    }

    #[test]
    fn bad_entry_fails_whole_stack() {
        let res: Result<Stack, _> = serde_json::from_value(json!([
            {"type": "int", "value": "1"},
            {"type": "foo"}
        ]));
        assert!(res.is_err());
    }
}

//! Wire record → [`StackValue`].
//!
//! Record shapes:
//! - `{"type": "int", "value": "<decimal>"}`
//! - `{"type": "null"}`
//! - `{"type": "cell", "value": "<base64 bag of cells>"}`
//! - `{"type": "tuple", "value": [<record>, ...]}`
//!
//! Decoding is all-or-nothing: the first error aborts the whole record,
//! including every enclosing tuple.

use crate::boc::{self, BocError};
use crate::error::{Result, StackError};
use crate::stack::Stack;
use crate::value::{Kind, StackValue};
use base64::Engine;
use everscale_types::prelude::Cell;
use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Default bound on tuple nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Environment variable overriding [`DecodeConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "TVM_STACK_MAX_DEPTH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Max number of nested tuple levels; a top-level tuple is level 1.
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeConfig {
    /// Defaults, with `max_depth` taken from `TVM_STACK_MAX_DEPTH` when it parses.
    pub fn from_env() -> Self {
        let max_depth = std::env::var(MAX_DEPTH_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_DEPTH);
        Self { max_depth }
    }
}

/// Turns bag-of-cells bytes into its ordered root cells.
pub trait CellDeserializer {
    fn deserialize(&self, bytes: &[u8]) -> std::result::Result<Vec<Cell>, BocError>;
}

/// Bag-of-cells deserializer backed by `everscale-types`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdBoc;

impl CellDeserializer for StdBoc {
    fn deserialize(&self, bytes: &[u8]) -> std::result::Result<Vec<Cell>, BocError> {
        boc::decode_roots(bytes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Decoder<D = StdBoc> {
    cfg: DecodeConfig,
    cells: D,
}

impl Decoder<StdBoc> {
    pub fn new(cfg: DecodeConfig) -> Self {
        Self { cfg, cells: StdBoc }
    }
}

impl<D: CellDeserializer> Decoder<D> {
    pub fn with_deserializer(cfg: DecodeConfig, cells: D) -> Self {
        Self { cfg, cells }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.cfg
    }

    pub fn decode(&self, record: &Value) -> Result<StackValue> {
        self.decode_at(record, 0)
    }

    /// Decode a raw JSON record; syntax errors are `MalformedRecord`.
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<StackValue> {
        let record: Value = serde_json::from_slice(bytes)
            .map_err(|e| StackError::MalformedRecord(e.to_string()))?;
        self.decode(&record)
    }

    pub fn decode_str(&self, s: &str) -> Result<StackValue> {
        self.decode_slice(s.as_bytes())
    }

    /// Decode a result array one record at a time, preserving order.
    pub fn decode_stack(&self, records: &[Value]) -> Result<Stack> {
        records.iter().map(|r| self.decode(r)).collect()
    }

    /// `depth` is the number of tuples enclosing `record`.
    fn decode_at(&self, record: &Value, depth: usize) -> Result<StackValue> {
        let fields = record.as_object().ok_or_else(|| {
            StackError::MalformedRecord(format!("expected object, got {}", json_kind(record)))
        })?;
        let tag = match fields.get("type") {
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(StackError::MalformedRecord(format!(
                    "`type` must be a string, got {}",
                    json_kind(other)
                )))
            }
            None => return Err(StackError::MalformedRecord("missing `type`".into())),
        };
        let kind = Kind::from_tag(tag)
            .ok_or_else(|| StackError::UnknownStackEntryType(tag.to_string()))?;
        trace!(%kind, depth, "decoding stack entry");

        match kind {
            Kind::Null => Ok(StackValue::Null),
            Kind::Int => parse_int(string_value(fields, kind)?).map(StackValue::Int),
            Kind::Cell => self.decode_cell(string_value(fields, kind)?).map(StackValue::Cell),
            Kind::Tuple => {
                if depth >= self.cfg.max_depth {
                    return Err(StackError::DepthExceeded {
                        limit: self.cfg.max_depth,
                    });
                }
                let items = match fields.get("value") {
                    Some(Value::Array(items)) => items,
                    Some(other) => {
                        return Err(StackError::MalformedRecord(format!(
                            "`value` of tuple entry must be an array, got {}",
                            json_kind(other)
                        )))
                    }
                    None => {
                        return Err(StackError::MalformedRecord(
                            "tuple entry without `value`".into(),
                        ))
                    }
                };
                items
                    .iter()
                    .map(|item| self.decode_at(item, depth + 1))
                    .collect::<Result<Vec<_>>>()
                    .map(StackValue::Tuple)
            }
        }
    }

    /// Only the first root is kept; callers needing every root of a
    /// multi-root payload must deserialize it themselves.
    fn decode_cell(&self, encoded: &str) -> Result<Cell> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        let roots = self.cells.deserialize(&bytes)?;
        if roots.len() > 1 {
            debug!(dropped = roots.len() - 1, "cell payload has several roots, keeping the first");
        }
        roots
            .into_iter()
            .next()
            .ok_or(StackError::InvalidCellPayload(BocError::NoRoots))
    }
}

/// Decode one record with the default configuration and deserializer.
pub fn decode_value(record: &Value) -> Result<StackValue> {
    Decoder::new(DecodeConfig::default()).decode(record)
}

fn string_value(fields: &Map<String, Value>, kind: Kind) -> Result<&str> {
    match fields.get("value") {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(StackError::MalformedRecord(format!(
            "`value` of {kind} entry must be a string, got {}",
            json_kind(other)
        ))),
        None => Err(StackError::MalformedRecord(format!(
            "{kind} entry without `value`"
        ))),
    }
}

/// Base-10 literal `[+-]?[0-9]+`, sign and magnitude kept exactly.
fn parse_int(literal: &str) -> Result<BigInt> {
    let digits = literal
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(literal);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StackError::InvalidInteger(literal.to_string()));
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| StackError::InvalidInteger(literal.to_string()))?;
    let sign = if literal.starts_with('-') {
        Sign::Minus
    } else {
        Sign::Plus
    };
    Ok(BigInt::from_biguint(sign, magnitude))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'de> Deserialize<'de> for StackValue {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> std::result::Result<Self, De::Error> {
        let record = Value::deserialize(deserializer)?;
        decode_value(&record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested(levels: usize) -> Value {
        let mut v = json!({"type": "int", "value": "1"});
        for _ in 0..levels {
            v = json!({"type": "tuple", "value": [v]});
        }
        v
    }

    #[test]
    fn int_literals() {
        assert_eq!(parse_int("0").unwrap(), BigInt::from(0));
        assert_eq!(parse_int("-0").unwrap(), BigInt::from(0));
        assert_eq!(parse_int("+42").unwrap(), BigInt::from(42));
        assert_eq!(parse_int("-0042").unwrap(), BigInt::from(-42));
        for bad in ["", "-", "+", "1.5", "1e3", " 1", "1_000", "0x10", "--1", "١"] {
            assert!(
                matches!(parse_int(bad), Err(StackError::InvalidInteger(_))),
                "{bad:?} must be rejected"
            );
        }
    }

    #[test]
    fn missing_or_wrong_type_field() {
        let d = Decoder::new(DecodeConfig::default());
        for rec in [json!({"value": "1"}), json!({"type": 3}), json!([1]), json!("int")] {
            assert!(
                matches!(d.decode(&rec), Err(StackError::MalformedRecord(_))),
                "{rec}"
            );
        }
    }

    #[test]
    fn value_shape_is_checked() {
        let d = Decoder::new(DecodeConfig::default());
        for rec in [
            json!({"type": "int"}),
            json!({"type": "int", "value": 5}),
            json!({"type": "cell", "value": null}),
            json!({"type": "tuple"}),
            json!({"type": "tuple", "value": {"type": "null"}}),
        ] {
            assert!(
                matches!(d.decode(&rec), Err(StackError::MalformedRecord(_))),
                "{rec}"
            );
        }
    }

    #[test]
    fn null_ignores_value() {
        let v = decode_value(&json!({"type": "null", "value": "anything"})).unwrap();
        assert!(v.is_null());
    }

    #[test]
    fn depth_limit() {
        let d = Decoder::new(DecodeConfig { max_depth: 3 });
        assert!(d.decode(&nested(3)).is_ok());
        assert!(matches!(
            d.decode(&nested(4)),
            Err(StackError::DepthExceeded { limit: 3 })
        ));
    }

    #[test]
    fn zero_depth_forbids_tuples() {
        let d = Decoder::new(DecodeConfig { max_depth: 0 });
        assert!(d.decode(&json!({"type": "int", "value": "1"})).is_ok());
        assert!(matches!(
            d.decode(&json!({"type": "tuple", "value": []})),
            Err(StackError::DepthExceeded { limit: 0 })
        ));
    }

    #[test]
    fn default_depth_accepts_default_nesting() {
        assert!(decode_value(&nested(DEFAULT_MAX_DEPTH)).is_ok());
        assert!(decode_value(&nested(DEFAULT_MAX_DEPTH + 1)).is_err());
    }

    #[test]
    fn syntax_error_is_malformed() {
        let d = Decoder::new(DecodeConfig::default());
        assert!(matches!(
            d.decode_str("{\"type\": \"int\""),
            Err(StackError::MalformedRecord(_))
        ));
    }

    #[test]
    fn config_from_json_uses_defaults() {
        let cfg: DecodeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DecodeConfig::default());
        let cfg: DecodeConfig = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(cfg.max_depth, 4);
    }

    #[test]
    fn config_from_env() {
        std::env::set_var(MAX_DEPTH_ENV, " 7 ");
        assert_eq!(DecodeConfig::from_env().max_depth, 7);
        std::env::set_var(MAX_DEPTH_ENV, "deep");
        assert_eq!(DecodeConfig::from_env(), DecodeConfig::default());
        std::env::set_var(MAX_DEPTH_ENV, "-1");
        assert_eq!(DecodeConfig::from_env(), DecodeConfig::default());
        std::env::remove_var(MAX_DEPTH_ENV);
        assert_eq!(DecodeConfig::from_env(), DecodeConfig::default());
    }

    struct NoRoots;

    impl CellDeserializer for NoRoots {
        fn deserialize(&self, _bytes: &[u8]) -> std::result::Result<Vec<Cell>, BocError> {
            Ok(vec![])
        }
    }

    #[test]
    fn deserializer_returning_no_roots() {
        let d = Decoder::with_deserializer(DecodeConfig::default(), NoRoots);
        let err = d.decode(&json!({"type": "cell", "value": "AAAA"})).unwrap_err();
        assert!(matches!(err, StackError::InvalidCellPayload(BocError::NoRoots)));
    }
}

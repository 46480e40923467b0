//! Get-method call envelope: what the invocation layer sends and receives.

use crate::decode::{CellDeserializer, Decoder};
use crate::error::{Result, StackError};
use crate::stack::Stack;
use crate::value::StackValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A get-method invocation on one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMethodRequest {
    /// Target account address, in whatever form the transport expects
    pub address: String,
    /// Method name, e.g. "seqno"
    pub method: String,
    /// Arguments, bottom of the stack first
    #[serde(default)]
    pub stack: Stack,
}

impl RunMethodRequest {
    pub fn new(address: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            method: method.into(),
            stack: Stack::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, value: impl Into<StackValue>) -> Self {
        self.stack.push(value);
        self
    }
}

/// Exit code plus result stack of a get-method run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMethodResult {
    pub exit_code: i32,
    #[serde(default)]
    pub stack: Stack,
}

impl RunMethodResult {
    /// Decode `{"exit_code": n, "stack": [...]}` with an explicit decoder.
    pub fn from_json<D: CellDeserializer>(response: &Value, decoder: &Decoder<D>) -> Result<Self> {
        let exit_code = response
            .get("exit_code")
            .and_then(Value::as_i64)
            .and_then(|c| i32::try_from(c).ok())
            .ok_or_else(|| StackError::MalformedRecord("missing or invalid `exit_code`".into()))?;
        let stack = match response.get("stack") {
            Some(Value::Array(records)) => decoder.decode_stack(records)?,
            None | Some(Value::Null) => Stack::new(),
            Some(_) => {
                return Err(StackError::MalformedRecord(
                    "`stack` must be an array".into(),
                ))
            }
        };
        Ok(Self { exit_code, stack })
    }

    /// 0 and 1 are the VM's normal termination codes.
    pub fn is_success(&self) -> bool {
        matches!(self.exit_code, 0 | 1)
    }

    pub fn into_stack(self) -> Result<Stack> {
        if self.is_success() {
            Ok(self.stack)
        } else {
            Err(StackError::MethodFailed {
                exit_code: self.exit_code,
            })
        }
    }
}

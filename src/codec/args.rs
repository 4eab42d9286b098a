//! Positional argument codec using `serde_json`.
//!
//! A serialized value maps onto an argument list as follows:
//!
//! - a JSON array (tuples, `Vec`, arrays) becomes the list itself
//! - `null` (including `()`) becomes an empty list
//! - anything else becomes a single argument
//!
//! To pass one sequence as a single argument, wrap it in a 1-tuple:
//! `(vec![1, 2, 3],)`.
//!
//! Decoding an empty list tries `null` first, so `()` and `Option<T>`
//! accept no arguments and a raw `Value` decodes as `Value::Null`, not an
//! empty array. Tuples must match the argument count exactly: a callback
//! typed `(Option<T>,)` still needs one argument, possibly `null`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Positional argument list passed to an action callback.
pub type Args = Vec<Value>;

/// Codec for positional arguments and callback results.
pub struct ArgsCodec;

impl ArgsCodec {
    /// Encode a value into a positional argument list.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized.
    pub fn encode<T: Serialize + ?Sized>(args: &T) -> Result<Args> {
        Ok(match serde_json::to_value(args)? {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        })
    }

    /// Decode a positional argument list into a typed value.
    ///
    /// An empty list also decodes into types that deserialize from `null`,
    /// so callbacks taking `()` accept no arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the arguments do not match type T.
    pub fn decode<T: DeserializeOwned>(args: Args) -> Result<T> {
        if args.is_empty() {
            if let Ok(unit) = serde_json::from_value(Value::Null) {
                return Ok(unit);
            }
        }
        Ok(serde_json::from_value(Value::Array(args))?)
    }

    /// Encode a single result value.
    #[inline]
    pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
        Ok(serde_json::to_value(value)?)
    }

    /// Decode a single result value.
    #[inline]
    pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T> {
        Ok(serde_json::from_value(value)?)
    }
}

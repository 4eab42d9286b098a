//! Codec module - conversion between typed values and positional arguments.
//!
//! Actions receive their arguments as a positional list of JSON values
//! ([`Args`]) and return a single JSON value. [`ArgsCodec`] converts Rust
//! values to and from that representation so callers and callbacks can stay
//! typed.
//!
//! # Example
//!
//! ```
//! use service_graph::codec::ArgsCodec;
//!
//! let args = ArgsCodec::encode(&(1, "two")).unwrap();
//! assert_eq!(args.len(), 2);
//!
//! let (a, b): (i32, String) = ArgsCodec::decode(args).unwrap();
//! assert_eq!(a, 1);
//! assert_eq!(b, "two");
//! ```

mod args;

pub use args::{Args, ArgsCodec};

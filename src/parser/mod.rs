//! Contains a parser for JVM field and method signatures.
//!
//! # Examples
//!
//! Basic usage:
//! ```
//! use rust_jvm_signature::parser::signature;
//!
//! let (ty, consumed) = signature::get_type("[[I").unwrap();
//! assert_eq!(ty.to_string(), "int[][]");
//! assert_eq!(consumed, 3);
//! assert!(signature::get_type("X").is_err());
//! ```

#[macro_use]
pub mod nom_support;

pub mod signature;

pub use self::signature::{Error, Reason};

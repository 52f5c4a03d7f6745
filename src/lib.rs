#![doc(html_root_url = "https://maxmcc.github.io/rust-jvm/")]

//! Type signatures of the Java virtual machine: the field and method descriptors of the [class
//! file format](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.3), the
//! types they denote, and the stack-slot bookkeeping a verifier or code generator needs.
//!
//! ```
//! use rust_jvm_signature::{MethodSignature, Type};
//!
//! let method = MethodSignature::parse("(Ljava/lang/String;J)[I").unwrap();
//! assert_eq!(method.argument_size(), 3);
//! assert_eq!(method.return_type().to_string(), "int[]");
//! assert_eq!(Type::BOOLEAN.normalize_for_stack_or_local(), Type::INT);
//! ```

#[macro_use]
extern crate log;

#[macro_use]
pub mod logging;
pub mod model;
pub mod parser;
pub mod util;

pub use crate::model::{ArrayType, BasicType, Kind, MethodSignature, ObjectType, RuntimeClass, Type};
pub use crate::parser::{Error, Reason};

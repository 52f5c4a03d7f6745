//! The values that JVM [field and method
//! descriptors](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.3) denote.

pub mod method;
pub mod runtime;
pub mod types;

pub use self::method::MethodSignature;
pub use self::runtime::RuntimeClass;
pub use self::types::{ArrayType, BasicType, Kind, ObjectType, Type};

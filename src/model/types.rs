//! Structural representations of JVM field types (JVMS §4.3.2).
//!
//! Every `Type` is immutable once constructed. Primitive types are static values, object types
//! are interned per class name, and array types are built per parse.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::parser::signature::{self, Error};
use crate::util::names;

/// Numeric tags of the type kinds, as used throughout class-file tooling. The primitive tags
/// double as the `atype` operand of the `newarray` instruction (JVMS §6.5).
pub mod tags {
    pub const T_BOOLEAN: u8 = 4;
    pub const T_CHAR: u8 = 5;
    pub const T_FLOAT: u8 = 6;
    pub const T_DOUBLE: u8 = 7;
    pub const T_BYTE: u8 = 8;
    pub const T_SHORT: u8 = 9;
    pub const T_INT: u8 = 10;
    pub const T_LONG: u8 = 11;
    pub const T_VOID: u8 = 12;
    pub const T_ARRAY: u8 = 13;
    pub const T_OBJECT: u8 = 14;
    pub const T_REFERENCE: u8 = 14;
    pub const T_UNKNOWN: u8 = 15;
}

/// An array type may have at most 255 dimensions (JVMS §4.4.1).
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// The kind of a `Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Boolean,
    Char,
    Float,
    Double,
    Byte,
    Short,
    Int,
    Long,
    Void,
    Array,
    Object,
    /// The type of the `null` reference.
    Null,
    /// Reserved for bookkeeping values that have no real type. It sorts above every real kind.
    Unknown,
}

impl Kind {
    /// Returns the numeric tag of this kind. `Null` shares the tag of all reference types.
    pub fn tag(self) -> u8 {
        match self {
            Kind::Boolean => tags::T_BOOLEAN,
            Kind::Char => tags::T_CHAR,
            Kind::Float => tags::T_FLOAT,
            Kind::Double => tags::T_DOUBLE,
            Kind::Byte => tags::T_BYTE,
            Kind::Short => tags::T_SHORT,
            Kind::Int => tags::T_INT,
            Kind::Long => tags::T_LONG,
            Kind::Void => tags::T_VOID,
            Kind::Array => tags::T_ARRAY,
            Kind::Object | Kind::Null => tags::T_REFERENCE,
            Kind::Unknown => tags::T_UNKNOWN,
        }
    }
}

/// The primitive types, plus `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Boolean,
    Char,
    Float,
    Double,
    Byte,
    Short,
    Int,
    Long,
    Void,
}

impl BasicType {
    /// Looks up the basic type denoted by a single-character signature.
    pub fn from_descriptor(c: char) -> Option<BasicType> {
        match c {
            'Z' => Some(BasicType::Boolean),
            'C' => Some(BasicType::Char),
            'F' => Some(BasicType::Float),
            'D' => Some(BasicType::Double),
            'B' => Some(BasicType::Byte),
            'S' => Some(BasicType::Short),
            'I' => Some(BasicType::Int),
            'J' => Some(BasicType::Long),
            'V' => Some(BasicType::Void),
            _ => None,
        }
    }

    /// Looks up a basic type by its numeric tag.
    pub fn from_tag(tag: u8) -> Option<BasicType> {
        match tag {
            tags::T_BOOLEAN => Some(BasicType::Boolean),
            tags::T_CHAR => Some(BasicType::Char),
            tags::T_FLOAT => Some(BasicType::Float),
            tags::T_DOUBLE => Some(BasicType::Double),
            tags::T_BYTE => Some(BasicType::Byte),
            tags::T_SHORT => Some(BasicType::Short),
            tags::T_INT => Some(BasicType::Int),
            tags::T_LONG => Some(BasicType::Long),
            tags::T_VOID => Some(BasicType::Void),
            _ => None,
        }
    }

    /// Looks up a basic type by its Java keyword (`int`, `void`, ...).
    pub fn from_name(name: &str) -> Option<BasicType> {
        match name {
            "boolean" => Some(BasicType::Boolean),
            "char" => Some(BasicType::Char),
            "float" => Some(BasicType::Float),
            "double" => Some(BasicType::Double),
            "byte" => Some(BasicType::Byte),
            "short" => Some(BasicType::Short),
            "int" => Some(BasicType::Int),
            "long" => Some(BasicType::Long),
            "void" => Some(BasicType::Void),
            _ => None,
        }
    }

    pub fn signature(self) -> &'static str {
        match self {
            BasicType::Boolean => "Z",
            BasicType::Char => "C",
            BasicType::Float => "F",
            BasicType::Double => "D",
            BasicType::Byte => "B",
            BasicType::Short => "S",
            BasicType::Int => "I",
            BasicType::Long => "J",
            BasicType::Void => "V",
        }
    }

    /// The Java keyword naming this type.
    pub fn name(self) -> &'static str {
        match self {
            BasicType::Boolean => "boolean",
            BasicType::Char => "char",
            BasicType::Float => "float",
            BasicType::Double => "double",
            BasicType::Byte => "byte",
            BasicType::Short => "short",
            BasicType::Int => "int",
            BasicType::Long => "long",
            BasicType::Void => "void",
        }
    }

    pub fn kind(self) -> Kind {
        match self {
            BasicType::Boolean => Kind::Boolean,
            BasicType::Char => Kind::Char,
            BasicType::Float => Kind::Float,
            BasicType::Double => Kind::Double,
            BasicType::Byte => Kind::Byte,
            BasicType::Short => Kind::Short,
            BasicType::Int => Kind::Int,
            BasicType::Long => Kind::Long,
            BasicType::Void => Kind::Void,
        }
    }

    /// The number of operand stack or local variable slots a value of this type occupies.
    pub fn size(self) -> usize {
        match self {
            BasicType::Long | BasicType::Double => 2,
            BasicType::Void => 0,
            _ => 1,
        }
    }
}

/// Indexed by `BasicType as usize`.
static BASIC_TYPES: [Type; 9] = [
    Type::Basic(BasicType::Boolean),
    Type::Basic(BasicType::Char),
    Type::Basic(BasicType::Float),
    Type::Basic(BasicType::Double),
    Type::Basic(BasicType::Byte),
    Type::Basic(BasicType::Short),
    Type::Basic(BasicType::Int),
    Type::Basic(BasicType::Long),
    Type::Basic(BasicType::Void),
];

/// Every object type handed out so far, keyed by dotted class name.
static OBJECT_TYPES: Lazy<DashMap<String, Arc<ObjectType>>> = Lazy::new(DashMap::new);

/// A class or interface type.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ObjectType {
    /// The fully-qualified class name, with `.` package separators.
    class_name: String,
    /// `L<binary name>;`, with `/` package separators.
    signature: String,
}

impl ObjectType {
    /// Returns the canonical object type for a class. The name may use either `.` or `/` as the
    /// package separator.
    ///
    /// Instances are interned: concurrent first requests for the same class race on a single
    /// shard of the cache, and every caller receives the instance that won.
    ///
    /// # Panics
    ///
    /// Panics if the class name is empty. `L;` is not a signature.
    pub fn get_instance(class_name: &str) -> Arc<ObjectType> {
        assert!(!class_name.is_empty(), "empty class name");
        let class_name = if class_name.contains('/') {
            names::path_to_package(class_name)
        } else {
            class_name.to_owned()
        };
        if let Some(existing) = OBJECT_TYPES.get(&class_name) {
            return existing.value().clone();
        }
        let mut inserted = false;
        let object_type = OBJECT_TYPES.entry(class_name.clone())
            .or_insert_with(|| {
                inserted = true;
                Arc::new(ObjectType::new(class_name.clone()))
            })
            .value()
            .clone();
        if inserted {
            debug!("interned object type {}", object_type.class_name());
        }
        object_type
    }

    fn new(class_name: String) -> ObjectType {
        let signature = format!("L{};", names::package_to_path(&class_name));
        ObjectType {
            class_name: class_name,
            signature: signature,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The package containing this class, or `""` for the unnamed package.
    pub fn package_name(&self) -> &str {
        names::package_of(&self.class_name)
    }
}

/// An array type. Multi-dimensional arrays are a single `ArrayType` with a dimension count,
/// never an array of arrays.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ArrayType {
    /// The innermost, non-array element type.
    basic_type: Type,
    /// Between 1 and `MAX_ARRAY_DIMENSIONS`.
    dimensions: usize,
    signature: String,
}

impl ArrayType {
    /// Creates an array type with `dimensions` dimensions over `element`. If `element` is itself
    /// an array type, the dimensions are added together.
    ///
    /// # Panics
    ///
    /// Panics if `dimensions` is zero, if the total exceeds `MAX_ARRAY_DIMENSIONS`, or if the
    /// element type is `void` or a sentinel.
    pub fn new(element: Type, dimensions: usize) -> ArrayType {
        assert!(dimensions >= 1, "invalid number of array dimensions: {}", dimensions);
        let (basic_type, dimensions) = match element {
            Type::Array(array) => (array.basic_type.clone(), array.dimensions + dimensions),
            other => (other, dimensions),
        };
        assert!(dimensions <= MAX_ARRAY_DIMENSIONS,
                "invalid number of array dimensions: {}", dimensions);
        match basic_type {
            Type::Basic(BasicType::Void) | Type::Null | Type::Unknown =>
                panic!("invalid array element type: {}", basic_type),
            _ => (),
        }
        let mut signature = "[".repeat(dimensions);
        signature.push_str(basic_type.signature());
        ArrayType {
            basic_type: basic_type,
            dimensions: dimensions,
            signature: signature,
        }
    }

    /// The innermost element type: `int` for `int[][]`.
    pub fn basic_type(&self) -> &Type {
        &self.basic_type
    }

    /// The type one dimension down: `int[]` for `int[][]`, `int` for `int[]`.
    pub fn element_type(&self) -> Type {
        if self.dimensions == 1 {
            self.basic_type.clone()
        } else {
            Type::array(self.basic_type.clone(), self.dimensions - 1)
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// A JVM field type, or one of the two sentinels used during verification and code generation.
///
/// Two types are equal if and only if their kinds and signatures are equal.
#[derive(Debug, Clone)]
pub enum Type {
    Basic(BasicType),
    Object(Arc<ObjectType>),
    Array(Arc<ArrayType>),
    /// The type of `null`, assignable to every reference type.
    Null,
    /// A placeholder with no real type.
    Unknown,
}

/// The argument list of a method that takes no arguments.
pub const NO_ARGS: &[Type] = &[];

pub static OBJECT: Lazy<Type> = Lazy::new(|| Type::object("java.lang.Object"));
pub static CLASS: Lazy<Type> = Lazy::new(|| Type::object("java.lang.Class"));
pub static STRING: Lazy<Type> = Lazy::new(|| Type::object("java.lang.String"));
pub static STRING_BUFFER: Lazy<Type> = Lazy::new(|| Type::object("java.lang.StringBuffer"));
pub static THROWABLE: Lazy<Type> = Lazy::new(|| Type::object("java.lang.Throwable"));

impl Type {
    pub const VOID: Type = Type::Basic(BasicType::Void);
    pub const BOOLEAN: Type = Type::Basic(BasicType::Boolean);
    pub const INT: Type = Type::Basic(BasicType::Int);
    pub const SHORT: Type = Type::Basic(BasicType::Short);
    pub const BYTE: Type = Type::Basic(BasicType::Byte);
    pub const LONG: Type = Type::Basic(BasicType::Long);
    pub const DOUBLE: Type = Type::Basic(BasicType::Double);
    pub const FLOAT: Type = Type::Basic(BasicType::Float);
    pub const CHAR: Type = Type::Basic(BasicType::Char);

    /// Returns the shared instance for a basic type.
    pub fn basic(basic_type: BasicType) -> &'static Type {
        &BASIC_TYPES[basic_type as usize]
    }

    /// Returns the (interned) object type for a class name.
    pub fn object(class_name: &str) -> Type {
        Type::Object(ObjectType::get_instance(class_name))
    }

    /// Returns an array type over `element`. See `ArrayType::new`.
    pub fn array(element: Type, dimensions: usize) -> Type {
        Type::Array(Arc::new(ArrayType::new(element, dimensions)))
    }

    pub fn kind(&self) -> Kind {
        match *self {
            Type::Basic(basic_type) => basic_type.kind(),
            Type::Object(_) => Kind::Object,
            Type::Array(_) => Kind::Array,
            Type::Null => Kind::Null,
            Type::Unknown => Kind::Unknown,
        }
    }

    /// The canonical signature of this type, e.g. `[Ljava/lang/String;`.
    pub fn signature(&self) -> &str {
        match *self {
            Type::Basic(basic_type) => basic_type.signature(),
            Type::Object(ref object_type) => object_type.signature(),
            Type::Array(ref array_type) => array_type.signature(),
            Type::Null => "<null object>",
            Type::Unknown => "<unknown object>",
        }
    }

    /// The number of operand stack or local variable slots a value of this type occupies: 2 for
    /// `long` and `double`, 0 for `void`, and 1 otherwise.
    pub fn size(&self) -> usize {
        match *self {
            Type::Basic(basic_type) => basic_type.size(),
            _ => 1,
        }
    }

    /// `boolean`, `byte`, `short` and `char` values live in `int` slots on the operand stack and
    /// in the local variables. Returns `int` for those types, and `self` for any other.
    pub fn normalize_for_stack_or_local(&self) -> Type {
        match *self {
            Type::Basic(BasicType::Boolean) | Type::Basic(BasicType::Byte)
                | Type::Basic(BasicType::Short) | Type::Basic(BasicType::Char) => Type::INT,
            _ => self.clone(),
        }
    }

    pub fn is_primitive(&self) -> bool {
        match *self {
            Type::Basic(basic_type) => basic_type != BasicType::Void,
            _ => false,
        }
    }

    /// True for object and array types, and for the type of `null`.
    pub fn is_reference(&self) -> bool {
        match *self {
            Type::Object(_) | Type::Array(_) | Type::Null => true,
            _ => false,
        }
    }

    /// The Java-source name of this type, e.g. `java.lang.String[]`.
    pub fn class_name(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Type) -> bool {
        self.kind() == other.kind() && self.signature() == other.signature()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.signature().hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Type::Basic(basic_type) => f.write_str(basic_type.name()),
            Type::Object(ref object_type) => f.write_str(object_type.class_name()),
            Type::Array(ref array_type) => {
                write!(f, "{}", array_type.basic_type())?;
                for _ in 0..array_type.dimensions() {
                    f.write_str("[]")?;
                }
                Ok(())
            },
            Type::Null | Type::Unknown => f.write_str(self.signature()),
        }
    }
}

impl FromStr for Type {
    type Err = Error;

    /// Parses a complete field type signature. Unlike `signature::get_type`, trailing input is an
    /// error.
    fn from_str(s: &str) -> Result<Type, Error> {
        signature::parse_field_type(s)
    }
}

impl From<BasicType> for Type {
    fn from(basic_type: BasicType) -> Type {
        Type::Basic(basic_type)
    }
}

impl From<Arc<ObjectType>> for Type {
    fn from(object_type: Arc<ObjectType>) -> Type {
        Type::Object(object_type)
    }
}

impl From<ArrayType> for Type {
    fn from(array_type: ArrayType) -> Type {
        Type::Array(Arc::new(array_type))
    }
}

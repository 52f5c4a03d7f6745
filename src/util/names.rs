//! Conversions between the spellings of class names used in Java source (`java.lang.String`), in
//! class files (`java/lang/String`), and in signatures (`Ljava/lang/String;`).

use std::borrow::Cow;

/// Single-character names of the primitive types, as they may appear in the `name_index` of a
/// `CONSTANT_Class_info` or wherever an internal type name is expected.
const PRIMITIVE_TYPE_NAMES: [&str; 9] = ["B", "C", "D", "F", "I", "J", "S", "Z", "V"];

/// Converts a binary name with `/` package separators to the dotted form.
pub fn path_to_package(name: &str) -> String {
    name.replace('/', ".")
}

/// Converts a dotted class name to the binary form with `/` package separators.
pub fn package_to_path(name: &str) -> String {
    name.replace('.', "/")
}

/// Returns the package portion of a dotted class name, or the empty string for a class in the
/// unnamed package.
pub fn package_of(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(index) => &class_name[..index],
        None => "",
    }
}

/// Erases a class type signature body by removing every `<...>` type-argument block, including
/// nested ones. `java/util/Map<Ljava/lang/String;[I>` becomes `java/util/Map`.
///
/// A `.` following a type-argument block introduces an inner class of a parameterized outer
/// class and becomes the `$` of the binary name: `a/Outer<TT;>.Inner` becomes `a/Outer$Inner`.
///
/// The input is expected to be balanced; a stray `>` is ignored.
pub fn strip_type_arguments(body: &str) -> Cow<str> {
    if !body.contains('<') {
        return Cow::Borrowed(body);
    }
    let mut depth = 0usize;
    let mut parameterized = false;
    let mut erased = String::with_capacity(body.len());
    for c in body.chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.saturating_sub(1);
                parameterized |= depth == 0;
            },
            '.' if depth == 0 && parameterized => erased.push('$'),
            _ if depth == 0 => erased.push(c),
            _ => {}
        }
    }
    Cow::Owned(erased)
}

/// Converts an internal type name, as stored in a `CONSTANT_Class_info`, to a type signature.
///
/// Array names and primitive names are already signatures and are returned unchanged, as are
/// names already wrapped in `L...;` or `T...;`. Any other name is treated as a binary class name
/// and wrapped: `java/lang/String` becomes `Ljava/lang/String;`.
pub fn internal_type_name_to_signature(internal_name: &str) -> String {
    if internal_name.is_empty() || PRIMITIVE_TYPE_NAMES.contains(&internal_name) {
        return internal_name.to_owned();
    }
    match internal_name.as_bytes()[0] {
        b'[' => internal_name.to_owned(),
        b'L' | b'T' if internal_name.ends_with(';') => internal_name.to_owned(),
        _ => format!("L{};", internal_name),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn converts_between_path_and_package() {
        assert_eq!(path_to_package("java/lang/String"), "java.lang.String");
        assert_eq!(package_to_path("java.util.Map$Entry"), "java/util/Map$Entry");
        assert_eq!(path_to_package("Foo"), "Foo");
    }

    #[test]
    fn finds_package() {
        assert_eq!(package_of("java.lang.String"), "java.lang");
        assert_eq!(package_of("HelloWorld"), "");
    }

    #[test]
    fn strips_nested_type_arguments() {
        assert_eq!(strip_type_arguments("java/lang/String"), "java/lang/String");
        assert_eq!(strip_type_arguments("java/util/Map<Ljava/lang/String;Ljava/util/List<[I>;>"),
                   "java/util/Map");
    }

    #[test]
    fn inner_class_suffix_becomes_binary_name() {
        assert_eq!(strip_type_arguments("a/Outer<TT;>.Inner<*>"), "a/Outer$Inner");
        assert_eq!(strip_type_arguments("java/util/Map<TK;TV;>.Entry"), "java/util/Map$Entry");
        assert_eq!(strip_type_arguments("a/A<TT;>.B<TU;>.C"), "a/A$B$C");
    }

    #[test]
    fn borrows_when_nothing_to_strip() {
        match strip_type_arguments("java/lang/Object") {
            Cow::Borrowed(_) => (),
            Cow::Owned(s) => panic!("unexpected allocation for {}", s),
        }
    }

    #[test]
    fn internal_names_to_signatures() {
        assert_eq!(internal_type_name_to_signature("java/lang/String"), "Ljava/lang/String;");
        assert_eq!(internal_type_name_to_signature("[Ljava/lang/String;"), "[Ljava/lang/String;");
        assert_eq!(internal_type_name_to_signature("I"), "I");
        assert_eq!(internal_type_name_to_signature("Ljava/lang/Object;"), "Ljava/lang/Object;");
        assert_eq!(internal_type_name_to_signature("TT;"), "TT;");
        assert_eq!(internal_type_name_to_signature("Lfoo"), "LLfoo;");
        assert_eq!(internal_type_name_to_signature(""), "");
    }
}

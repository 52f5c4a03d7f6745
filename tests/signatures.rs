use rust_jvm_signature::model::types::{OBJECT, STRING};
use rust_jvm_signature::parser::signature;
use rust_jvm_signature::{MethodSignature, Reason, Type};

#[test]
fn test_sample_signatures() {
    assert_eq!(signature::get_type("I").unwrap(), (Type::INT, 1));

    let (ty, consumed) = signature::get_type("[Ljava/lang/String;").unwrap();
    assert_eq!(ty, Type::array(Type::object("java.lang.String"), 1));
    assert_eq!(consumed, "[Ljava/lang/String;".len());

    assert_eq!(signature::get_argument_types("(Ljava/lang/String;I)V").unwrap(),
               vec![Type::object("java.lang.String"), Type::INT]);
    assert_eq!(signature::get_method_signature(&Type::VOID, &[OBJECT.clone(), Type::INT]),
               "(Ljava/lang/Object;I)V");

    let err = signature::get_type("X").unwrap_err();
    assert_eq!(*err.reason(), Reason::UnexpectedCharacter('X'));
}

#[test]
fn test_main_method() {
    let descriptor = "([Ljava/lang/String;)V";
    let method = MethodSignature::parse(descriptor).unwrap();
    assert_eq!(method.argument_types(), &[Type::array(STRING.clone(), 1)][..]);
    assert_eq!(*method.return_type(), Type::VOID);
    assert_eq!(method.signature(), descriptor);
    assert_eq!(signature::get_argument_types_size(descriptor).unwrap(), (1, 21));
    assert_eq!(signature::get_return_type_size(descriptor).unwrap(), (0, 1));
}

#[test]
fn test_method_round_trip() {
    let return_types = vec![Type::VOID, Type::DOUBLE, Type::array(Type::object("a.b.C"), 3)];
    let argument_lists = vec![
        vec![],
        vec![Type::LONG, Type::BOOLEAN, STRING.clone()],
        vec![Type::array(Type::CHAR, 1), Type::array(Type::array(Type::SHORT, 1), 1), Type::FLOAT],
    ];
    for return_type in &return_types {
        for argument_types in &argument_lists {
            let sig = signature::get_method_signature(return_type, argument_types);
            assert_eq!(&signature::get_argument_types(&sig).unwrap(), argument_types);
            assert_eq!(&signature::get_return_type(&sig).unwrap(), return_type);
            let slots: usize = argument_types.iter().map(Type::size).sum();
            assert_eq!(signature::get_argument_types_size(&sig).unwrap().0, slots);
            assert_eq!(signature::get_return_type_size(&sig).unwrap().0, return_type.size());
        }
    }
}

#[test]
fn test_generic_method_signature() {
    // The Signature attribute of `<K> long count(Map<K, int[]> m, long since)`.
    let sig = "<K:Ljava/lang/Object;>(Ljava/util/Map<TK;[I>;J)J";
    assert_eq!(signature::get_argument_types(sig).unwrap(),
               vec![Type::object("java.util.Map"), Type::LONG]);
    assert_eq!(signature::get_return_type(sig).unwrap(), Type::LONG);
    assert_eq!(signature::get_argument_types_size(sig).unwrap().0, 3);

    let sig = "(Ljava/util/Map<Ljava/lang/String;[I>;J)V";
    assert_eq!(signature::get_argument_types(sig).unwrap(),
               vec![Type::object("java.util.Map"), Type::LONG]);
}

#[test]
fn test_inner_class_of_generic_outer_uses_binary_name() {
    // `void put(Map<K, V>.Entry e, int i)` in a generic class.
    let sig = "(Ljava/util/Map<TK;TV;>.Entry;I)V";
    let argument_types = signature::get_argument_types(sig).unwrap();
    assert_eq!(argument_types, vec![Type::object("java.util.Map$Entry"), Type::INT]);
    assert_eq!(argument_types[0].signature(), "Ljava/util/Map$Entry;");
    assert_eq!(signature::get_argument_types_size(sig).unwrap(), (2, sig.len() - 1));
}

#[test]
fn test_consumed_counts_allow_manual_stepping() {
    let mut rest = "JLjava/util/List<Ljava/lang/Integer;>;[[DZ";
    let mut found = vec![];
    while !rest.is_empty() {
        let (ty, consumed) = signature::get_type(rest).unwrap();
        assert_eq!(signature::get_type_size(rest).unwrap(), (ty.size(), consumed));
        found.push(ty.to_string());
        rest = &rest[consumed..];
    }
    assert_eq!(found, vec!["long", "java.util.List", "double[][]", "boolean"]);
}

#[test]
fn test_internal_names() {
    assert_eq!(signature::internal_type_name_to_signature("java/lang/Thread"),
               "Ljava/lang/Thread;");
    let sig = signature::internal_type_name_to_signature("[Ljava/lang/Thread;");
    assert_eq!(signature::signature_to_string(&sig).unwrap(), "java.lang.Thread[]");
}

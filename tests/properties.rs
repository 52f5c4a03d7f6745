use proptest::prelude::*;

use rust_jvm_signature::parser::signature;
use rust_jvm_signature::{BasicType, Type};

fn primitive() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(BasicType::Boolean),
        Just(BasicType::Char),
        Just(BasicType::Float),
        Just(BasicType::Double),
        Just(BasicType::Byte),
        Just(BasicType::Short),
        Just(BasicType::Int),
        Just(BasicType::Long),
    ].prop_map(|basic_type| Type::basic(basic_type).clone())
}

fn class_name() -> impl Strategy<Value = String> {
    "([a-z][a-z0-9]{0,5}\\.){0,3}[A-Z][A-Za-z0-9_$]{0,8}"
}

fn element() -> impl Strategy<Value = Type> {
    prop_oneof![primitive(), class_name().prop_map(|name| Type::object(&name))]
}

fn field_type() -> impl Strategy<Value = Type> {
    prop_oneof![
        element(),
        (element(), 1usize..=4).prop_map(|(element, dimensions)| Type::array(element, dimensions)),
    ]
}

fn return_type() -> impl Strategy<Value = Type> {
    prop_oneof![Just(Type::VOID), field_type()]
}

proptest! {
    #[test]
    fn type_round_trip(ty in field_type()) {
        let (parsed, consumed) = signature::get_type(ty.signature()).unwrap();
        prop_assert_eq!(&parsed, &ty);
        prop_assert_eq!(consumed, ty.signature().len());
        prop_assert_eq!(signature::get_type_size(ty.signature()).unwrap(), (ty.size(), consumed));
    }

    #[test]
    fn method_round_trip(ret in return_type(), args in prop::collection::vec(field_type(), 0..6)) {
        let sig = signature::get_method_signature(&ret, &args);
        prop_assert_eq!(signature::get_argument_types(&sig).unwrap(), args.clone());
        prop_assert_eq!(signature::get_return_type(&sig).unwrap(), ret.clone());

        let slots: usize = args.iter().map(Type::size).sum();
        let (size, consumed) = signature::get_argument_types_size(&sig).unwrap();
        prop_assert_eq!(size, slots);
        prop_assert_eq!(consumed, sig.len() - ret.signature().len());
        prop_assert_eq!(signature::get_return_type_size(&sig).unwrap(),
                        (ret.size(), ret.signature().len()));
    }

    #[test]
    fn size_path_agrees_on_arbitrary_input(input in "[\\[LTIJVZ;<>a-z/]{0,12}") {
        match (signature::get_type(&input), signature::get_type_size(&input)) {
            (Ok((ty, consumed)), Ok(size)) => prop_assert_eq!((ty.size(), consumed), size),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "paths disagree on {:?}: {:?} vs {:?}", input, a, b),
        }
    }

    #[test]
    fn normalization_is_idempotent(ty in field_type()) {
        let normalized = ty.normalize_for_stack_or_local();
        prop_assert_eq!(normalized.normalize_for_stack_or_local(), normalized.clone());
        prop_assert_eq!(normalized.size(), ty.size());
    }
}

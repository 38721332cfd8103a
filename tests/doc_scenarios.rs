//! The scenarios from the crate documentation, end to end

use vtypes::predicate::*;
use vtypes::{
    validators, vtype, DeclarationError, Error, Failure, Kind, TypeRef, VType, VTypeDecl, Value,
};

fn positive_int() -> VType {
    vtype(
        "PositiveInt",
        Kind::Int,
        validators! { "should be positive" => |x: &Value| x.as_i64().is_some_and(|i| i >= 0) },
    )
    .unwrap()
}

fn non_empty() -> VType {
    VType::declare("NonEmpty")
        .doc("A VType describing non-empty containers, with strictly positive length.")
        .validators(validators! { "should be non empty" => |x: &Value| x.len().is_some_and(|n| n > 0) })
        .build()
        .unwrap()
}

#[test]
fn test_positive_int() {
    let positive_int = positive_int();

    assert!(positive_int.is_instance(&1.into()));
    assert!(!positive_int.is_instance(&(-1).into()));
    assert!(!positive_int.is_instance(&"1".into()));

    assert!(positive_int.has_valid_type(&(-1).into()));
    assert!(!positive_int.has_valid_value(&(-1).into(), true));

    let err = positive_int.validate("x", &(-1).into()).unwrap_err();
    assert!(matches!(err.failure(), Failure::Value { .. }));
    assert_eq!(err.name(), "x");
}

#[test]
fn test_positive_int_declared_by_hand() {
    let positive_int = VTypeDecl::new("PositiveInt")
        .parent(VType::root())
        .types(Kind::Int)
        .validators(validators! { "should be positive" => non_negative() })
        .build()
        .unwrap();

    assert_eq!(positive_int.effective_types(), &[TypeRef::Kind(Kind::Int)]);
    assert!(positive_int.is_instance(&1.into()));
    assert!(!positive_int.is_instance(&(-1).into()));
    assert!(!positive_int.is_instance(&"1".into()));
}

#[test]
fn test_non_empty_family() {
    let non_empty = non_empty();
    let non_empty_str = non_empty
        .derive("NonEmptyStr")
        .doc("A VType for non-empty strings")
        .parent(Kind::Str)
        .build()
        .unwrap();
    let alternate = VType::declare("AlternateNonEmptyStr")
        .doc("A VType for non-empty strings - alternate style")
        .types((&non_empty, Kind::Str))
        .build()
        .unwrap();

    assert!(non_empty.is_instance(&"hoho".into()));
    assert!(!non_empty.is_instance(&"".into()));
    assert!(!non_empty.is_instance(&Value::List(vec![])));
    assert!(non_empty.is_instance(&vec![1].into()));
    assert!(!non_empty.is_instance(&1.into()));

    for t in [&non_empty_str, &alternate] {
        assert!(t.is_instance(&"hoho".into()), "{}", t);
        assert!(!t.is_instance(&"".into()), "{}", t);
        assert!(!t.is_instance(&1.into()), "{}", t);
    }
}

#[test]
fn test_inherited_toggle() {
    let non_empty_str = non_empty().derive("NonEmptyStr").parent(Kind::Str).build().unwrap();

    assert!(non_empty_str.has_valid_value(&"".into(), false));
    assert!(!non_empty_str.has_valid_value(&"".into(), true));
}

#[test]
fn test_declaration_errors() {
    let err = VTypeDecl::new("JustAStr").parent(Kind::Str).build().unwrap_err();
    assert!(matches!(err, DeclarationError::NoValidatingAncestor { ref name } if name == "JustAStr"));

    let err = VType::declare("Leaky").attr("cache", "{}").build().unwrap_err();
    assert!(err.to_string().contains("cache"));
}

#[test]
fn test_errors_compose_with_question_mark() {
    fn check(port: i64) -> Result<(), Error> {
        let t = vtype("Port", Kind::Int, (between(1, 65535), "valid port"))?;
        t.validate("port", &port.into())?;
        Ok(())
    }

    assert!(check(80).is_ok());
    assert!(matches!(check(0), Err(Error::Validation(_))));
}

#[test]
fn test_instantiation_is_an_error() {
    let err: Error = positive_int().instantiate().unwrap_err().into();
    assert!(matches!(err, Error::Instantiation(_)));
}

#[test]
fn test_types_are_shareable_across_threads() {
    let t = positive_int();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let t = t.clone();
            std::thread::spawn(move || t.is_instance(&Value::from(i - 2)))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![false, false, true, true]);
}

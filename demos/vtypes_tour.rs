//! A tour of validating types
//!
//! Run with: cargo run --example vtypes_tour

use vtypes::predicate::*;
use vtypes::prelude::*;

fn main() -> Result<(), Error> {
    println!("Validating types tour");
    println!("=====================\n");

    // A structural type and a labeled validator
    let positive_int = vtype(
        "PositiveInt",
        Kind::Int,
        validators! { "should be positive" => non_negative() },
    )?;

    for v in [Value::from(1), Value::from(-1), Value::from("1")] {
        println!("{:>5} is a PositiveInt: {}", v, positive_int.is_instance(&v));
    }

    // Validators only, then a subtype adding a structural type
    let non_empty = VType::declare("NonEmpty")
        .doc("Containers with strictly positive length")
        .validators(validators! { "should be non empty" => not_empty() })
        .build()?;
    let non_empty_str = non_empty
        .derive("NonEmptyStr")
        .parent(Kind::Str)
        .help_msg("an empty string is not a name")
        .error_kind("InvalidName")
        .build()?;

    println!();
    println!("NonEmptyStr types: {:?}", non_empty_str.effective_types());
    println!(
        "own check of \"\": {}, inherited check of \"\": {}",
        non_empty_str.has_valid_value(&Value::from(""), false),
        non_empty_str.has_valid_value(&Value::from(""), true),
    );

    // Errors report what went wrong
    println!();
    for v in [Value::from(""), Value::from(7)] {
        if let Err(e) = non_empty_str.validate("name", &v) {
            println!("error: {}", e);
        }
    }

    // Subtyping
    println!();
    println!(
        "NonEmptyStr <: NonEmpty: {}",
        is_subtype(&non_empty_str, &non_empty)
    );
    println!("NonEmptyStr <: str: {}", is_subtype(&non_empty_str, Kind::Str));
    println!("str <: NonEmptyStr: {}", is_subtype(Kind::Str, &non_empty_str));

    // Declarations are checked
    println!();
    if let Err(e) = VTypeDecl::new("Orphan").parent(Kind::Str).build() {
        println!("rejected: {}", e);
    }
    if let Err(e) = VType::declare("Leaky").attr("cache", "{}").build() {
        println!("rejected: {}", e);
    }

    Ok(())
}

//! Logging composition and rejections with tracing
//!
//! Run with: RUST_LOG=vtypes=trace cargo run --example tracing_demo --features tracing

use tracing::info;
use vtypes::predicate::*;
use vtypes::prelude::*;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(true)
        .init();

    let port = VType::declare("Port")
        .types(Kind::Int)
        .validators((between(1, 65535), "should be a valid port number"))
        .error_kind("InvalidPort")
        .build()?;

    for candidate in [80, 0, 70000] {
        match port.validate("port", &Value::from(candidate)) {
            Ok(()) => info!(candidate, "accepted"),
            Err(e) => info!(candidate, error = %e, "rejected"),
        }
    }

    // Logged as a warning before the error comes back
    let _ = VTypeDecl::new("Orphan").parent(Kind::Int).build();

    Ok(())
}

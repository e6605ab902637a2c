//! Basic tee logger usage example
//!
//! Demonstrates fanning out to a console sink and a JSON file sink with
//! different minimum levels, field binding and check gating.
//!
//! Run with: cargo run --example basic_usage

use rust_tee_logger::prelude::*;
use rust_tee_logger::{info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Tee Logger - Basic Usage Example ===\n");

    let json_path = std::env::temp_dir().join("rust_tee_logger_demo.jsonl");

    let console: SharedLogger = Arc::new(
        SinkLogger::builder()
            .min_level(LogLevel::Debug)
            .appender(ConsoleAppender::new())
            .build(),
    );
    let audit: SharedLogger = Arc::new(
        SinkLogger::builder()
            .min_level(LogLevel::Warn)
            .field("sink", "audit")
            .appender(JsonAppender::new(&json_path)?)
            .build(),
    );

    let logger = tee_or_nop(vec![console, audit]);

    println!("1. Every sink sees the call, each filters on its own level:");
    logger.debug("console only", &Fields::new());
    info!(logger, "listening on port {}", 8080);
    warn!(logger, "disk usage at {}%", 91);

    println!("\n2. Binding fields for a request:");
    let request = logger.with(&Fields::new().with_field("request_id", "abc-123"));
    request.info("request accepted", &Fields::new());
    request.error("upstream timed out", &Fields::new().with_field("upstream", "billing"));

    println!("\n3. Skipping expensive work when nobody records it:");
    match logger.check(LogLevel::Debug, "cache dump") {
        Some(checked) => checked.write(&Fields::new().with_field("entries", 1024)),
        None => println!("   debug is disabled everywhere"),
    }

    println!("\nAudit entries written to {}", json_path.display());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}

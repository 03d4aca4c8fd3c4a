//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `formpulse_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use formpulse_core::QuestionType;

fn main() {
    println!("formpulse_core version={}", formpulse_core::core_version());

    let catalog: Vec<&str> = QuestionType::ALL
        .iter()
        .map(|kind| kind.as_str())
        .collect();
    println!("formpulse_core question_types={}", catalog.join(","));
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `staffdir_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("staffdir_core ping={}", staffdir_core::ping());
    println!("staffdir_core version={}", staffdir_core::core_version());
}

//! # Cave Generator Entry Point
//!
//! Generates one cave and prints its marker positions.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    if let Err(err) = cave_generator::run() {
        log::error!("Cave generation failed: {}", err);
        std::process::exit(1);
    }
}

//! Native entry point: sets up logging, runs the renderer, and maps an
//! unrecoverable error to a non-zero exit code.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release
//! ```

fn main() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    if let Err(error) = monochunk::run() {
        log::error!("exiting: {error}");
        std::process::exit(1);
    }
}

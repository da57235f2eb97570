//! # Vending Machine Simulator Entry Point
//!
//! ## Startup Sequence
//! 1. Load configuration from the environment
//! 2. Initialize tracing (logging to stderr)
//! 3. Build the starting catalog (built-in or `VEND_CATALOG_PATH`)
//! 4. Create state objects (MachineState, ConfigState)
//! 5. Run the console on stdin/stdout until the customer leaves

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match vend_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\n[FATAL ERROR] {}", err.message);
            ExitCode::FAILURE
        }
    }
}

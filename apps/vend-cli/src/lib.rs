//! # vend-cli: Terminal Front-End
//!
//! This crate wires up the terminal application:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Vending Machine Simulator                            │
//! │                                                                         │
//! │  main.rs ────► calls run()                                              │
//! │                                                                         │
//! │  lib.rs ─────► config, logging, catalog, console                        │
//! │                                                                         │
//! │  console.rs ─► customer menu loop + admin panel                         │
//! │                                                                         │
//! │  commands/ ──► customer.rs, admin.rs  (thin calls into vend-core)       │
//! │                                                                         │
//! │  state/ ─────► MachineState, ConfigState                                │
//! │                                                                         │
//! │  seed.rs ────► default drinks catalog / JSON catalog file               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod console;
pub mod display;
pub mod error;
pub mod seed;
pub mod state;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use console::Console;
use error::CliError;
use state::{ConfigState, MachineState};
use vend_core::VendingMachine;

/// Runs the simulator on the process's stdin and stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. ConfigState::from_env()                                             │
/// │     • VEND_MACHINE_NAME, VEND_CURRENCY_SYMBOL, VEND_ADMIN_PASSWORD      │
/// │     • VEND_CATALOG_PATH, VEND_LOG                                       │
/// │                                                                         │
/// │  2. Initialize Logging                                                  │
/// │     • RUST_LOG wins, otherwise VEND_LOG / "warn,vend=info"              │
/// │     • Written to stderr so menus stay readable                          │
/// │                                                                         │
/// │  3. Build Catalog                                                       │
/// │     • JSON file if VEND_CATALOG_PATH is set                             │
/// │     • Built-in drinks otherwise                                         │
/// │                                                                         │
/// │  4. Run Console until Refund & Exit / Quit / end of input               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), CliError> {
    let config = ConfigState::from_env();
    init_tracing(&config);

    info!(machine = %config.machine_name, "Starting vending machine simulator");

    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "Loading catalog file");
            seed::load_catalog(path)?
        }
        None => seed::default_catalog()?,
    };
    info!(products = catalog.len(), units = catalog.total_units(), "Catalog ready");

    let machine = MachineState::new(VendingMachine::new(catalog));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), machine, config);
    console.run()?;

    info!("Simulator stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `VEND_LOG=vend_core=debug` - Default filter when RUST_LOG is unset
/// - Default: `warn,vend=info`
fn init_tracing(config: &ConfigState) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

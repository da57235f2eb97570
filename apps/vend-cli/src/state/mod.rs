//! # Application State
//!
//! State objects shared by the console and the command handlers.
//!
//! ## State Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       State Management                                  │
//! │                                                                         │
//! │  ┌───────────────────────────────┐  ┌───────────────────────────────┐   │
//! │  │ MachineState                  │  │ ConfigState                   │   │
//! │  │ ───────────────────────────── │  │ ───────────────────────────── │   │
//! │  │ Arc<Mutex<VendingMachine>>    │  │ machine name, currency,       │   │
//! │  │ one lock per whole operation  │  │ admin password, catalog path  │   │
//! │  └───────────────────────────────┘  └───────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod machine;

pub use config::{ConfigState, DEFAULT_LOG_FILTER};
pub use machine::MachineState;

//! # Machine State
//!
//! The one lock around the vending machine.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MachineState { machine: Arc<Mutex<VendingMachine>> }                   │
//! │                                                                         │
//! │  with_machine_mut(|m| m.purchase("A1"))                                 │
//! │     │                                                                   │
//! │     ├── lock ──► lookup ─► stock ─► funds ─► settle ─► decrement ─┐     │
//! │     │                                                 reserve ─► log    │
//! │     └── unlock ◄──────────────────────────────────────────────────┘     │
//! │                                                                         │
//! │  A purchase never interleaves with a deposit, refund or restock.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use vend_core::VendingMachine;

/// Shared handle to the vending machine.
#[derive(Debug, Clone)]
pub struct MachineState {
    machine: Arc<Mutex<VendingMachine>>,
}

impl MachineState {
    pub fn new(machine: VendingMachine) -> Self {
        MachineState {
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    /// Executes a function with read access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let balance = machine_state.with_machine(|m| m.balance());
    /// ```
    pub fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VendingMachine) -> R,
    {
        let machine = self.machine.lock().expect("Machine mutex poisoned");
        f(&machine)
    }

    /// Executes a function with write access to the machine.
    ///
    /// The lock is held for the whole closure.
    pub fn with_machine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VendingMachine) -> R,
    {
        let mut machine = self.machine.lock().expect("Machine mutex poisoned");
        f(&mut machine)
    }
}

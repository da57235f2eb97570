//! # Console
//!
//! The interactive menu loop. Generic over its input and output so the
//! whole customer and admin flow can run against in-memory buffers.
//!
//! ## Menu Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer menu                          Admin panel (password)          │
//! │  ─────────────                          ──────────────────────          │
//! │  1 View Menu                            1 View Inventory                │
//! │  2 Insert Money                         2 Restock Item                  │
//! │  3 Select Item ──► receipt              3 View Transactions             │
//! │  4 View Statistics                      4 View Statistics + summary     │
//! │  5 Refund & Exit ──► stop               5 Add New Item                  │
//! │  6 Admin Mode ─────────────────────────►6 Cash Out                      │
//! │  7 Quit ──► stop                        7 Exit Admin Panel ──► back     │
//! │                                                                         │
//! │  End of input behaves like Refund & Exit.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Command errors are printed as `[ERROR]` lines and the loop continues.
//! Only a failure to read or write the console ends the session early.

use std::io::{BufRead, Write};

use tracing::debug;
use vend_core::DrinkKind;

use crate::commands::admin::{self, DrinkChoice, NewItemRequest};
use crate::commands::customer;
use crate::display;
use crate::error::CliError;
use crate::state::{ConfigState, MachineState};

/// Interactive session over a reader and a writer.
pub struct Console<R, W> {
    input: R,
    output: W,
    machine: MachineState,
    config: ConfigState,
    authenticated: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, machine: MachineState, config: ConfigState) -> Self {
        Console {
            input,
            output,
            machine,
            config,
            authenticated: false,
        }
    }

    /// Consumes the console and returns its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the customer menu until the customer leaves or input ends.
    pub fn run(&mut self) -> Result<(), CliError> {
        display::welcome(&mut self.output, &self.config)?;

        loop {
            display::customer_options(&mut self.output)?;
            let choice = match self.prompt("\nEnter choice (1-7): ")? {
                Some(choice) => choice,
                None => {
                    debug!("input closed");
                    self.refund_and_exit()?;
                    break;
                }
            };

            match choice.as_str() {
                "1" => self.show_menu()?,
                "2" => self.insert_money()?,
                "3" => self.select_item()?,
                "4" => self.show_statistics()?,
                "5" => {
                    self.refund_and_exit()?;
                    break;
                }
                "6" => self.admin_mode()?,
                "7" => {
                    display::info(&mut self.output, "Goodbye!")?;
                    break;
                }
                _ => display::error(&mut self.output, "Invalid choice. Please enter 1-7.")?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Customer actions
    // -------------------------------------------------------------------------

    fn show_menu(&mut self) -> Result<(), CliError> {
        let menu = customer::view_menu(&self.machine);
        display::menu(&mut self.output, &self.config, &menu)?;
        Ok(())
    }

    fn insert_money(&mut self) -> Result<(), CliError> {
        let prompt = format!("Enter amount to insert: {}", self.config.currency_symbol);
        let Some(input) = self.prompt(&prompt)? else {
            return Ok(());
        };

        match customer::insert_money(&self.machine, &input) {
            Ok(response) => {
                let message = format!(
                    "Inserted {}. New balance: {}",
                    self.config.format_currency(response.inserted),
                    self.config.format_currency(response.balance)
                );
                display::success(&mut self.output, &message)?;
            }
            Err(err) => display::error(&mut self.output, &err.message)?,
        }
        Ok(())
    }

    fn select_item(&mut self) -> Result<(), CliError> {
        self.show_menu()?;
        let Some(code) = self.prompt("\nEnter product code: ")? else {
            return Ok(());
        };

        match customer::select_item(&self.machine, &self.config, &code) {
            Ok(response) if response.dispensed => {
                display::success(&mut self.output, &response.message)?;
                if let Some(receipt) = &response.receipt {
                    display::receipt(&mut self.output, &self.config, receipt)?;
                }
            }
            Ok(response) => display::error(&mut self.output, &response.message)?,
            Err(err) => display::error(&mut self.output, &err.message)?,
        }
        Ok(())
    }

    fn show_statistics(&mut self) -> Result<(), CliError> {
        let stats = customer::statistics(&self.machine);
        display::statistics(&mut self.output, &self.config, &stats)?;
        Ok(())
    }

    fn refund_and_exit(&mut self) -> Result<(), CliError> {
        let refund = customer::refund(&self.machine);
        if refund.amount.is_positive() {
            let message = format!("Refunding {}", self.config.format_currency(refund.amount));
            display::info(&mut self.output, &message)?;
        }
        display::info(
            &mut self.output,
            "Thank you for using our vending machine. Goodbye!",
        )?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Admin panel
    // -------------------------------------------------------------------------

    fn admin_mode(&mut self) -> Result<(), CliError> {
        if !self.authenticated {
            let Some(password) = self.prompt("Enter admin password: ")? else {
                return Ok(());
            };
            match admin::authenticate(&self.config, &password) {
                Ok(()) => {
                    self.authenticated = true;
                    display::success(&mut self.output, "Authentication successful!")?;
                }
                Err(err) => {
                    display::error(&mut self.output, &err.message)?;
                    return Ok(());
                }
            }
        }

        display::header(&mut self.output, "ADMIN PANEL")?;

        loop {
            display::admin_options(&mut self.output)?;
            let Some(choice) = self.prompt("\nEnter choice (1-7): ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.view_inventory()?,
                "2" => self.restock_item()?,
                "3" => self.view_transactions()?,
                "4" => self.admin_statistics()?,
                "5" => self.add_new_item()?,
                "6" => self.cash_out()?,
                "7" => {
                    display::info(&mut self.output, "Exiting admin panel...")?;
                    return Ok(());
                }
                _ => display::error(&mut self.output, "Invalid choice. Please enter 1-7.")?,
            }
        }
    }

    fn view_inventory(&mut self) -> Result<(), CliError> {
        let response = admin::inventory(&self.machine);
        display::inventory(&mut self.output, &self.config, &response.items)?;
        Ok(())
    }

    fn restock_item(&mut self) -> Result<(), CliError> {
        self.view_inventory()?;

        let Some(code) = self.prompt("\nEnter item code to restock: ")? else {
            return Ok(());
        };
        let code = match admin::require_existing(&self.machine, &code) {
            Ok(code) => code,
            Err(err) => return self.show_error(err),
        };

        let Some(quantity) = self.prompt("Enter quantity to add: ")? else {
            return Ok(());
        };
        match admin::restock(&self.machine, &code, &quantity) {
            Ok(response) => {
                let message = format!(
                    "Restocked {}. New quantity: {}",
                    response.code, response.quantity
                );
                display::success(&mut self.output, &message)?;
                Ok(())
            }
            Err(err) => self.show_error(err),
        }
    }

    fn view_transactions(&mut self) -> Result<(), CliError> {
        let transactions = admin::transactions(&self.machine);
        display::transactions(&mut self.output, &self.config, &transactions)?;
        Ok(())
    }

    fn admin_statistics(&mut self) -> Result<(), CliError> {
        let response = admin::statistics(&self.machine);
        display::admin_statistics(&mut self.output, &self.config, &response)?;
        Ok(())
    }

    fn add_new_item(&mut self) -> Result<(), CliError> {
        display::header(&mut self.output, "ADD NEW ITEM")?;
        display::drink_types(&mut self.output)?;

        let Some(choice) = self.prompt("Enter choice (1-3): ")? else {
            return Ok(());
        };
        let choice = match DrinkChoice::parse(&choice) {
            Ok(choice) => choice,
            Err(err) => return self.show_error(err),
        };

        let Some(code) = self.prompt("Enter product code (e.g., D1): ")? else {
            return Ok(());
        };
        let code = match admin::require_unused(&self.machine, &code) {
            Ok(code) => code,
            Err(err) => return self.show_error(err),
        };

        let Some(name) = self.prompt("Enter product name: ")? else {
            return Ok(());
        };
        let price_prompt = format!("Enter price: {}", self.config.currency_symbol);
        let Some(price) = self.prompt(&price_prompt)? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt("Enter initial stock quantity: ")? else {
            return Ok(());
        };

        let kind = match choice {
            DrinkChoice::Soda => DrinkKind::Soda {
                is_diet: self.confirm("Is it diet? (y/n): ")?,
            },
            DrinkChoice::Juice => {
                let fruit = self
                    .prompt("Enter fruit type (e.g., Orange): ")?
                    .filter(|f| !f.is_empty())
                    .unwrap_or_else(|| "Mixed".to_string());
                DrinkKind::Juice { fruit }
            }
            DrinkChoice::Water => DrinkKind::Water {
                is_sparkling: self.confirm("Is it sparkling? (y/n): ")?,
            },
        };

        let request = NewItemRequest {
            code,
            name,
            price,
            quantity,
            kind,
        };
        match admin::add_item(&self.machine, request) {
            Ok(item) => {
                let message = format!(
                    "Added {} ({}) to inventory with {} units!",
                    item.name, item.code, item.quantity
                );
                display::success(&mut self.output, &message)?;
                Ok(())
            }
            Err(err) => self.show_error(err),
        }
    }

    fn cash_out(&mut self) -> Result<(), CliError> {
        let response = admin::cash_out(&self.machine);
        if response.amount.is_zero() {
            display::info(&mut self.output, "Cash reserve is empty.")?;
        } else {
            let message = format!(
                "Collected {} from the cash reserve.",
                self.config.format_currency(response.amount)
            );
            display::success(&mut self.output, &message)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Input helpers
    // -------------------------------------------------------------------------

    /// Prints a prompt and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads a y/n answer; anything but `y` is no.
    fn confirm(&mut self, message: &str) -> Result<bool, CliError> {
        Ok(self
            .prompt(message)?
            .map(|answer| answer.eq_ignore_ascii_case("y"))
            .unwrap_or(false))
    }

    fn show_error(&mut self, err: CliError) -> Result<(), CliError> {
        display::error(&mut self.output, &err.message)?;
        Ok(())
    }
}

//! Interactive menu session.
//!
//! A [`Session`] owns the in-memory [`Catalog`] for its whole lifetime and
//! borrows nothing global: the ledger, clock and terminal are all injected.
//! Admin edits change only that in-memory catalog. Purchases are the only
//! thing written anywhere, through the [`Ledger`].
//!
//! Invalid operator input aborts the current action with a message and
//! returns to the menu. End of input ends the session from any prompt.

use crate::config::DEFAULT_ADMIN_PASSWORD;
use crate::console::{Console, ConsoleError};
use crate::error::CliResult;
use crate::input::{self, InputError};
use crate::render::{self, RULE_WIDTH, WIDE_RULE_WIDTH};
use std::io::{BufRead, Write};
use std::sync::Arc;
use ticket_ledger_core::environment::Clock;
use ticket_ledger_core::stats::{DEFAULT_BAR_WIDTH, MAX_BAR_WIDTH};
use ticket_ledger_core::{Catalog, Ledger, LedgerStats, NewTicket, Purchase, Ticket};
use tracing::{debug, error, info, warn};

type Step = Result<(), ConsoleError>;

/// Prompts used when walking category → ticket.
struct SelectionPrompts {
    heading: &'static str,
    category: &'static str,
    ticket: &'static str,
}

const PURCHASE_PROMPTS: SelectionPrompts = SelectionPrompts {
    heading: "\nAvailable Categories:",
    category: "\nSelect category number: ",
    ticket: "\nSelect ticket number: ",
};

const EDIT_PROMPTS: SelectionPrompts = SelectionPrompts {
    heading: "\nSelect category:",
    category: "\nCategory number: ",
    ticket: "\nTicket number: ",
};

const DELETE_PROMPTS: SelectionPrompts = SelectionPrompts {
    heading: "\nSelect category:",
    category: "\nCategory number: ",
    ticket: "\nTicket number to delete: ",
};

/// One operator session over a catalog and a ledger.
pub struct Session<R, W, L> {
    catalog: Catalog,
    ledger: L,
    clock: Arc<dyn Clock>,
    console: Console<R, W>,
    admin_password: String,
    bar_width: usize,
}

impl<R: BufRead, W: Write, L: Ledger> Session<R, W, L> {
    /// Create a session with the default admin password and bar width
    pub fn new(catalog: Catalog, ledger: L, clock: Arc<dyn Clock>, console: Console<R, W>) -> Self {
        Self {
            catalog,
            ledger,
            clock,
            console,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    /// Set the admin panel password
    #[must_use]
    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = password.into();
        self
    }

    /// Set the longest bar in the statistics chart, capped at
    /// [`MAX_BAR_WIDTH`]
    #[must_use]
    pub const fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = if width > MAX_BAR_WIDTH {
            MAX_BAR_WIDTH
        } else {
            width
        };
        self
    }

    /// Current catalog, including any admin edits
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Consumes the session, returning the catalog and the output stream
    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.console.into_output())
    }

    /// Runs the main menu until the operator exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CliError::Io`] only if the terminal itself fails.
    pub fn run(&mut self) -> CliResult<()> {
        match self.main_menu() {
            Ok(()) => Ok(()),
            Err(ConsoleError::EndOfInput) => {
                debug!("Input closed, ending session");
                writeln!(self.console, "\nEnd of input. Goodbye!")?;
                Ok(())
            }
            Err(ConsoleError::Io(e)) => Err(e.into()),
        }
    }

    fn main_menu(&mut self) -> Step {
        loop {
            render::main_menu(&mut self.console)?;
            let choice = self.console.prompt("\nEnter your choice (1-7): ")?;
            debug!(choice = %choice.trim(), "Main menu");

            match choice.trim() {
                "1" => self.view_categories()?,
                "2" => self.search()?,
                "3" => self.purchase()?,
                "4" => self.view_my_purchases()?,
                "5" => self.view_stats()?,
                "6" => self.admin_panel()?,
                "7" => {
                    writeln!(self.console, "Thank you for using Bus Ticket System!")?;
                    return Ok(());
                }
                _ => writeln!(self.console, "Invalid choice! Please enter 1-7.")?,
            }
        }
    }

    /// Prompts once and parses the answer. A rejected answer is reported
    /// and yields `None`.
    fn ask<T>(
        &mut self,
        text: &str,
        parse: impl FnOnce(&str) -> Result<T, InputError>,
    ) -> Result<Option<T>, ConsoleError> {
        let answer = self.console.prompt(text)?;
        match parse(&answer) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                writeln!(self.console, "{e}")?;
                Ok(None)
            }
        }
    }

    /// Walks the operator through picking a category and then a ticket.
    fn select_ticket(
        &mut self,
        prompts: &SelectionPrompts,
    ) -> Result<Option<(usize, usize)>, ConsoleError> {
        writeln!(self.console, "{}", prompts.heading)?;
        render::category_names(&mut self.console, &self.catalog)?;

        let categories = self.catalog.len();
        let Some(category_index) = self.ask(prompts.category, |text| {
            input::parse_selection(text, categories, "category")
        })?
        else {
            return Ok(None);
        };

        let Some(category) = self.catalog.category_at(category_index) else {
            return Ok(None);
        };
        render::ticket_prices(&mut self.console, category)?;

        let tickets = category.count();
        let Some(ticket_index) = self.ask(prompts.ticket, |text| {
            input::parse_selection(text, tickets, "ticket")
        })?
        else {
            return Ok(None);
        };

        Ok(Some((category_index, ticket_index)))
    }

    fn ticket_at(&self, category_index: usize, ticket_index: usize) -> Option<&Ticket> {
        self.catalog
            .category_at(category_index)
            .and_then(|category| category.ticket(ticket_index))
    }

    /// Reads the ledger, reporting a failure as an empty history.
    fn ledger_lines(&mut self) -> Result<Vec<String>, ConsoleError> {
        match self.ledger.read_all() {
            Ok(lines) => Ok(lines),
            Err(e) => {
                warn!(error = %e, "Failed to read ledger");
                writeln!(self.console, "Error loading purchases: {e}")?;
                Ok(Vec::new())
            }
        }
    }

    fn view_categories(&mut self) -> Step {
        if self.catalog.is_empty() {
            writeln!(self.console, "No categories available.")?;
            return Ok(());
        }

        render::banner(&mut self.console, "AVAILABLE TICKET CATEGORIES", RULE_WIDTH)?;
        for (number, category) in self.catalog.categories().iter().enumerate() {
            writeln!(self.console, "{}. {category}", number + 1)?;
        }
        render::rule(&mut self.console, RULE_WIDTH)?;

        let answer = self
            .console
            .prompt("\nEnter category number for details (or Enter to return): ")?;
        if answer.trim().is_empty() {
            return Ok(());
        }

        match input::parse_selection(&answer, self.catalog.len(), "number") {
            Ok(index) => {
                if let Some(category) = self.catalog.category_at(index) {
                    render::category_details(&mut self.console, category)?;
                }
            }
            Err(e) => writeln!(self.console, "{e}")?,
        }
        Ok(())
    }

    fn search(&mut self) -> Step {
        let term = self.console.prompt("\nEnter search term: ")?;
        if term.trim().is_empty() {
            writeln!(self.console, "Search term cannot be empty!")?;
            return Ok(());
        }
        render::search_results(&mut self.console, &term, &self.catalog)?;
        Ok(())
    }

    fn purchase(&mut self) -> Step {
        render::banner(&mut self.console, "PURCHASE TICKET", RULE_WIDTH)?;

        let Some((category_index, ticket_index)) = self.select_ticket(&PURCHASE_PROMPTS)? else {
            return Ok(());
        };
        let Some(ticket) = self.ticket_at(category_index, ticket_index).cloned() else {
            return Ok(());
        };

        let Some(quantity) = self.ask("Enter quantity: ", input::parse_quantity)? else {
            return Ok(());
        };
        let Some(total) = ticket.price().checked_mul(quantity) else {
            writeln!(self.console, "{}", InputError::QuantityTooLarge)?;
            return Ok(());
        };

        writeln!(self.console, "\nYou are purchasing:")?;
        writeln!(self.console, "{quantity}x {}", ticket.topup_type())?;
        writeln!(self.console, "Total: {total}")?;

        let answer = self.console.prompt("\nConfirm purchase? (yes/no): ")?;
        if !input::is_confirmation(&answer) {
            writeln!(self.console, "Purchase cancelled.")?;
            return Ok(());
        }

        let purchase = match Purchase::new(&ticket, quantity, self.clock.as_ref()) {
            Ok(purchase) => purchase,
            Err(e) => {
                writeln!(self.console, "Error during purchase: {e}")?;
                return Ok(());
            }
        };

        match self.ledger.record(&purchase) {
            Ok(()) => {
                info!(
                    category = %purchase.category(),
                    ticket = %purchase.topup_type(),
                    quantity,
                    total = %purchase.total(),
                    "Purchase recorded"
                );
                render::receipt(&mut self.console, &purchase)?;
                writeln!(self.console, "\n✓ Purchase saved successfully!")?;
            }
            Err(e) => {
                error!(error = %e, "Failed to record purchase");
                writeln!(self.console, "\n✗ Error saving purchase!")?;
            }
        }
        Ok(())
    }

    fn view_my_purchases(&mut self) -> Step {
        let lines = self.ledger_lines()?;
        if lines.is_empty() {
            writeln!(self.console, "\nNo purchases found.")?;
            return Ok(());
        }

        render::purchase_history(&mut self.console, &lines)?;

        let answer = self
            .console
            .prompt("\nView purchase statistics? (yes/no): ")?;
        if input::is_confirmation(&answer) {
            self.show_stats(&lines)?;
        }
        Ok(())
    }

    fn view_stats(&mut self) -> Step {
        let lines = self.ledger_lines()?;
        self.show_stats(&lines)
    }

    fn show_stats(&mut self, lines: &[String]) -> Step {
        if lines.is_empty() {
            writeln!(self.console, "No purchase data to analyze.")?;
            return Ok(());
        }
        let stats = LedgerStats::from_lines(lines);
        render::stats_chart(&mut self.console, &stats, self.bar_width)?;
        Ok(())
    }

    fn admin_login(&mut self) -> Result<bool, ConsoleError> {
        render::banner(&mut self.console, "ADMIN LOGIN", RULE_WIDTH)?;
        let password = self.console.prompt("Enter admin password: ")?;

        if password == self.admin_password {
            info!("Admin login");
            writeln!(self.console, "✓ Login successful!")?;
            Ok(true)
        } else {
            warn!("Rejected admin login attempt");
            writeln!(self.console, "✗ Invalid password!")?;
            Ok(false)
        }
    }

    fn admin_panel(&mut self) -> Step {
        if !self.admin_login()? {
            return Ok(());
        }

        loop {
            render::admin_menu(&mut self.console)?;
            let choice = self.console.prompt("\nEnter your choice (1-7): ")?;
            debug!(choice = %choice.trim(), "Admin menu");

            match choice.trim() {
                "1" => render::all_tickets(&mut self.console, &self.catalog)?,
                "2" => self.add_ticket()?,
                "3" => self.edit_price()?,
                "4" => self.delete_ticket()?,
                "5" => self.view_all_purchases()?,
                "6" => self.view_system_statistics()?,
                "7" => {
                    writeln!(self.console, "Returning to main menu...")?;
                    return Ok(());
                }
                _ => writeln!(self.console, "Invalid choice! Please enter 1-7.")?,
            }
        }
    }

    fn add_ticket(&mut self) -> Step {
        render::banner(&mut self.console, "ADD NEW TICKET", RULE_WIDTH)?;
        writeln!(self.console, "\nEnter ticket details:")?;

        let Some(category) =
            self.ask("Category name: ", |text| input::required(text, "Category name"))?
        else {
            return Ok(());
        };
        let Some(topup_type) =
            self.ask("Ticket type/name: ", |text| input::required(text, "Ticket type"))?
        else {
            return Ok(());
        };
        let Some(price) = self.ask("Price in pounds (e.g., 5.50): ", input::parse_price)? else {
            return Ok(());
        };
        let description = input::optional(&self.console.prompt("Description (optional): ")?);
        let passenger_class = input::optional(
            &self
                .console
                .prompt("Passenger class (e.g., Adult, Student): ")?,
        );

        match self.catalog.add_ticket(NewTicket {
            category,
            topup_type,
            price,
            description,
            passenger_class,
        }) {
            Ok(ticket) => {
                writeln!(
                    self.console,
                    "\n✓ Ticket '{}' added successfully!",
                    ticket.topup_type()
                )?;
                writeln!(self.console, "  Category: {}", ticket.category())?;
                writeln!(self.console, "  Price: {}", ticket.price())?;
            }
            Err(e) => writeln!(self.console, "Error adding ticket: {e}")?,
        }
        Ok(())
    }

    fn edit_price(&mut self) -> Step {
        render::banner(&mut self.console, "EDIT TICKET PRICE", RULE_WIDTH)?;

        let Some((category_index, ticket_index)) = self.select_ticket(&EDIT_PROMPTS)? else {
            return Ok(());
        };
        if let Some(current) = self.ticket_at(category_index, ticket_index).map(Ticket::price) {
            writeln!(self.console, "\nCurrent price: {current}")?;
        }

        let Some(price) = self.ask("Enter new price in pounds: ", input::parse_price)? else {
            return Ok(());
        };

        match self.catalog.set_price(category_index, ticket_index, price) {
            Ok(_) => {
                writeln!(self.console, "\n✓ Price updated successfully!")?;
                writeln!(self.console, "  New price: {price}")?;
            }
            Err(e) => writeln!(self.console, "Error: {e}")?,
        }
        Ok(())
    }

    fn delete_ticket(&mut self) -> Step {
        render::banner(&mut self.console, "DELETE TICKET", RULE_WIDTH)?;

        let Some((category_index, ticket_index)) = self.select_ticket(&DELETE_PROMPTS)? else {
            return Ok(());
        };
        let Some(name) = self
            .ticket_at(category_index, ticket_index)
            .map(|ticket| ticket.topup_type().to_string())
        else {
            return Ok(());
        };

        writeln!(self.console, "\nYou are about to delete: {name}")?;
        let answer = self.console.prompt("Are you sure? (yes/no): ")?;
        if !input::is_confirmation(&answer) {
            writeln!(self.console, "Deletion cancelled.")?;
            return Ok(());
        }

        match self.catalog.remove_ticket(category_index, ticket_index) {
            Ok(removed) => writeln!(
                self.console,
                "\n✓ Ticket '{}' deleted successfully!",
                removed.topup_type()
            )?,
            Err(e) => writeln!(self.console, "Error: {e}")?,
        }
        Ok(())
    }

    fn view_all_purchases(&mut self) -> Step {
        render::banner(&mut self.console, "ALL PURCHASES (ADMIN VIEW)", WIDE_RULE_WIDTH)?;

        let lines = self.ledger_lines()?;
        if lines.is_empty() {
            writeln!(self.console, "\nNo purchases found in the system.")?;
            return Ok(());
        }
        render::all_purchases(&mut self.console, &lines)?;
        Ok(())
    }

    fn view_system_statistics(&mut self) -> Step {
        let lines = self.ledger_lines()?;
        let stats = LedgerStats::from_lines(&lines);
        render::system_statistics(&mut self.console, &self.catalog, &stats)?;
        Ok(())
    }
}

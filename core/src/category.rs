//! Named, ordered groups of tickets.

use crate::catalog::CatalogError;
use crate::ticket::Ticket;
use std::fmt;

/// A named group of tickets.
///
/// Tickets keep their insertion order, which is the order they are numbered
/// in when displayed. Every ticket's own category field equals the
/// category's name; [`Category::add`] refuses tickets that would break this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    name: String,
    tickets: Vec<Ticket>,
}

impl Category {
    /// Creates an empty category.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tickets: Vec::new(),
        }
    }

    /// Category name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a ticket and returns a reference to it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryMismatch`] if the ticket belongs to a
    /// different category. The category is left unchanged.
    pub fn add(&mut self, ticket: Ticket) -> Result<&Ticket, CatalogError> {
        if ticket.category() != self.name {
            return Err(CatalogError::CategoryMismatch {
                expected: self.name.clone(),
                found: ticket.category().to_string(),
            });
        }
        self.tickets.push(ticket);
        Ok(&self.tickets[self.tickets.len() - 1])
    }

    /// Tickets in insertion order.
    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Ticket at a zero-based position.
    #[must_use]
    pub fn ticket(&self, index: usize) -> Option<&Ticket> {
        self.tickets.get(index)
    }

    /// Mutable ticket at a zero-based position.
    pub fn ticket_mut(&mut self, index: usize) -> Option<&mut Ticket> {
        self.tickets.get_mut(index)
    }

    /// Removes and returns the ticket at a zero-based position.
    ///
    /// The category itself stays in place even when it becomes empty.
    pub fn remove(&mut self, index: usize) -> Option<Ticket> {
        (index < self.tickets.len()).then(|| self.tickets.remove(index))
    }

    /// Number of tickets
    #[must_use]
    pub fn count(&self) -> usize {
        self.tickets.len()
    }

    /// Returns `true` if the category holds no tickets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} tickets)", self.name, self.count())
    }
}

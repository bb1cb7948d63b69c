//! The in-memory ticket catalog and its CSV loader.
//!
//! A [`Catalog`] maps category names to [`Category`] values, ordered by the
//! first time each category was seen. It is loaded once per session from a
//! header-row CSV file and lives only in memory afterwards: admin changes are
//! never written back to the source file.
//!
//! # Example
//!
//! ```
//! use ticket_ledger_core::catalog::Catalog;
//!
//! let csv = "category_title,topup_title,topup_price_in_pence\n\
//!            Adult,Single,250\n\
//!            Student,Single,150\n\
//!            Adult,Day Rider,450\n";
//!
//! let catalog = Catalog::from_reader(csv.as_bytes())?;
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.ticket_count(), 3);
//! assert_eq!(catalog.categories()[0].to_string(), "Adult (2 tickets)");
//! # Ok::<(), ticket_ledger_core::catalog::CatalogError>(())
//! ```

use crate::category::Category;
use crate::money::Price;
use crate::ticket::{NewTicket, Ticket, TicketRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors raised while loading or editing the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The catalog file exists but cannot be read by this process.
    #[error("Permission denied reading catalog file: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Any other I/O failure while reading the catalog.
    #[error("I/O error reading catalog: {0}")]
    Io(#[from] io::Error),

    /// The file is not well-formed CSV (e.g. rows of unequal length).
    #[error("Malformed catalog data: {0}")]
    Malformed(#[source] csv::Error),

    /// A ticket was added to a category other than its own.
    #[error("Ticket belongs to category '{found}', not '{expected}'")]
    CategoryMismatch {
        /// The category being added to.
        expected: String,
        /// The ticket's own category.
        found: String,
    },

    /// A category position outside the catalog.
    #[error("No category at position {index} (catalog has {len})")]
    CategoryIndexOutOfRange {
        /// Requested zero-based position.
        index: usize,
        /// Number of categories.
        len: usize,
    },

    /// A ticket position outside its category.
    #[error("No ticket at position {index} in '{category}' ({len} tickets)")]
    TicketIndexOutOfRange {
        /// Category searched.
        category: String,
        /// Requested zero-based position.
        index: usize,
        /// Number of tickets in the category.
        len: usize,
    },
}

/// A search result: the ticket and the name of the category holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchHit<'a> {
    /// Owning category name
    pub category: &'a str,
    /// Matching ticket
    pub ticket: &'a Ticket,
}

/// Insertion-ordered mapping from category name to [`Category`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Loads a catalog, turning every failure into an empty catalog.
    ///
    /// Each failure kind is logged with its own diagnostic. Callers should
    /// treat an empty catalog as "cannot proceed" rather than run on partial
    /// data.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(catalog) => catalog,
            Err(CatalogError::NotFound(p)) => {
                error!(path = %p.display(), "Catalog file not found");
                Self::new()
            }
            Err(CatalogError::PermissionDenied(p)) => {
                error!(path = %p.display(), "Permission denied reading catalog file");
                Self::new()
            }
            Err(CatalogError::Malformed(e)) => {
                error!(path = %path.display(), error = %e, "Catalog file is not valid CSV");
                Self::new()
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load catalog");
                Self::new()
            }
        }
    }

    /// Loads a catalog from a CSV file.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`]: the file does not exist
    /// - [`CatalogError::PermissionDenied`]: the file cannot be opened
    /// - [`CatalogError::Malformed`]: the content is not valid CSV
    /// - [`CatalogError::Io`]: any other read failure
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CatalogError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => CatalogError::PermissionDenied(path.to_path_buf()),
            _ => CatalogError::Io(e),
        })?;

        let catalog = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            categories = catalog.len(),
            tickets = catalog.ticket_count(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Reads a catalog from any CSV source with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] for invalid CSV and
    /// [`CatalogError::Io`] if the underlying reader fails.
    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut catalog = Self::new();
        for row in csv_reader.deserialize::<TicketRecord>() {
            let record = row.map_err(|e| {
                if e.is_io_error() {
                    CatalogError::Io(io::Error::from(e))
                } else {
                    CatalogError::Malformed(e)
                }
            })?;
            catalog.insert(Ticket::from_record(record))?;
        }
        Ok(catalog)
    }

    /// Files a ticket under its own category, creating the category on first
    /// sight.
    ///
    /// # Errors
    ///
    /// Propagates [`Category::add`] failures.
    pub fn insert(&mut self, ticket: Ticket) -> Result<&Ticket, CatalogError> {
        self.get_or_create(ticket.category()).add(ticket)
    }

    /// Returns the named category, creating an empty one at the end if it
    /// does not exist yet.
    pub fn get_or_create(&mut self, name: &str) -> &mut Category {
        let position = match self.position(name) {
            Some(position) => position,
            None => {
                debug!(category = %name, "Creating category");
                self.categories.push(Category::new(name));
                self.categories.len() - 1
            }
        };
        &mut self.categories[position]
    }

    /// Looks up a category by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Looks up a category by zero-based position.
    #[must_use]
    pub fn category_at(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// All categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if no categories were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of tickets across all categories.
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.categories.iter().map(Category::count).sum()
    }

    /// Finds tickets whose type or category name contains `term`, ignoring
    /// case. A blank term matches nothing.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<SearchHit<'_>> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        self.categories
            .iter()
            .flat_map(|category| {
                category
                    .tickets()
                    .iter()
                    .filter(|ticket| ticket.matches(term))
                    .map(move |ticket| SearchHit {
                        category: category.name(),
                        ticket,
                    })
            })
            .collect()
    }

    /// Adds an operator-defined ticket, creating its category if needed.
    ///
    /// # Errors
    ///
    /// Propagates [`Category::add`] failures.
    pub fn add_ticket(&mut self, new_ticket: NewTicket) -> Result<&Ticket, CatalogError> {
        let ticket = Ticket::from_record(new_ticket.into_record());
        debug!(category = %ticket.category(), ticket = %ticket.topup_type(), "Adding ticket");
        self.insert(ticket)
    }

    /// Changes a ticket's price and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns an index error if either position is out of range.
    pub fn set_price(
        &mut self,
        category_index: usize,
        ticket_index: usize,
        price: Price,
    ) -> Result<Price, CatalogError> {
        let category = self.category_at_mut(category_index)?;
        let (name, len) = (category.name().to_string(), category.count());
        let ticket = category
            .ticket_mut(ticket_index)
            .ok_or(CatalogError::TicketIndexOutOfRange {
                category: name,
                index: ticket_index,
                len,
            })?;

        let previous = ticket.price();
        ticket.set_price(price);
        debug!(ticket = %ticket.topup_type(), %previous, new = %price, "Ticket price changed");
        Ok(previous)
    }

    /// Removes a ticket. Its category stays even if it becomes empty.
    ///
    /// # Errors
    ///
    /// Returns an index error if either position is out of range.
    pub fn remove_ticket(
        &mut self,
        category_index: usize,
        ticket_index: usize,
    ) -> Result<Ticket, CatalogError> {
        let category = self.category_at_mut(category_index)?;
        let (name, len) = (category.name().to_string(), category.count());
        let removed = category
            .remove(ticket_index)
            .ok_or(CatalogError::TicketIndexOutOfRange {
                category: name,
                index: ticket_index,
                len,
            })?;
        debug!(ticket = %removed.topup_type(), "Ticket removed");
        Ok(removed)
    }

    fn category_at_mut(&mut self, index: usize) -> Result<&mut Category, CatalogError> {
        let len = self.categories.len();
        self.categories
            .get_mut(index)
            .ok_or(CatalogError::CategoryIndexOutOfRange { index, len })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
category_title,category_id,topup_title,topup_price_in_pence,topup_passenger_class_name
Adult,cat-1,Single,250,Adult
Student,cat-2,Single,150,Student
Adult,cat-1,Day Rider,450,Adult
";

    fn sample() -> Catalog {
        match Catalog::from_reader(SAMPLE.as_bytes()) {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("sample catalog should parse: {e}"),
        }
    }

    #[test]
    fn test_from_reader_groups_by_first_seen_category() {
        let catalog = sample();
        let names: Vec<&str> = catalog.categories().iter().map(Category::name).collect();
        assert_eq!(names, vec!["Adult", "Student"]);

        let adult = catalog.category("Adult");
        let tickets: Vec<String> = adult
            .map(|c| c.tickets().iter().map(ToString::to_string).collect())
            .unwrap_or_default();
        assert_eq!(tickets, vec!["Single (£2.50)", "Day Rider (£4.50)"]);
    }

    #[test]
    fn test_from_reader_rejects_ragged_rows() {
        let ragged = "category_title,topup_title\nAdult,Single,extra\n";
        assert!(matches!(
            Catalog::from_reader(ragged.as_bytes()),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn test_header_only_gives_empty_catalog() {
        let catalog = Catalog::from_reader("category_title,topup_title\n".as_bytes());
        assert!(catalog.is_ok_and(|c| c.is_empty()));
    }

    #[test]
    fn test_search_matches_type_or_category() {
        let catalog = sample();
        let hits: Vec<(&str, &str)> = catalog
            .search("single")
            .iter()
            .map(|hit| (hit.category, hit.ticket.topup_type()))
            .collect();
        assert_eq!(hits, vec![("Adult", "Single"), ("Student", "Single")]);

        assert_eq!(catalog.search("STUD").len(), 1);
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("monthly").is_empty());
    }

    #[test]
    fn test_add_ticket_creates_category() {
        let mut catalog = sample();
        let added = catalog
            .add_ticket(NewTicket {
                category: "Night".to_string(),
                topup_type: "Owl".to_string(),
                price: Price::from_minor_units("300"),
                description: None,
                passenger_class: None,
            })
            .map(ToString::to_string);

        assert_eq!(added.ok(), Some("Owl (£3.00)".to_string()));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.ticket_count(), 4);
    }

    #[test]
    fn test_add_ticket_to_existing_category_appends() {
        let mut catalog = sample();
        let result = catalog.add_ticket(NewTicket {
            category: "Student".to_string(),
            topup_type: "Weekly".to_string(),
            price: Price::from_minor_units("1000"),
            description: Some("Seven days".to_string()),
            passenger_class: Some("Student".to_string()),
        });

        assert!(result.is_ok());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.category("Student").map(Category::count), Some(2));
    }

    #[test]
    fn test_set_price_returns_previous() {
        let mut catalog = sample();
        let previous = catalog.set_price(0, 1, Price::from_minor_units("500"));
        assert_eq!(previous.ok(), Some(Price::from_minor_units("450")));
        assert_eq!(
            catalog.category_at(0).and_then(|c| c.ticket(1)).map(Ticket::price),
            Some(Price::from_minor_units("500"))
        );
    }

    #[test]
    fn test_index_errors() {
        let mut catalog = sample();
        assert!(matches!(
            catalog.set_price(5, 0, Price::ZERO),
            Err(CatalogError::CategoryIndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            catalog.remove_ticket(1, 3),
            Err(CatalogError::TicketIndexOutOfRange { index: 3, len: 1, .. })
        ));
    }

    #[test]
    fn test_deleting_only_ticket_keeps_category() {
        let mut catalog = sample();
        let removed = catalog.remove_ticket(1, 0);
        assert!(removed.is_ok());

        let student = catalog.category("Student");
        assert_eq!(student.map(Category::count), Some(0));
        assert_eq!(catalog.len(), 2);
    }
}

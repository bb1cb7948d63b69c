//! Scripted end-to-end sessions

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use std::fs;
use std::sync::Arc;
use ticket_ledger_cli::{CliError, Command, Config, Console, Session};
use ticket_ledger_core::{Catalog, Ledger};
use ticket_ledger_testing::fixtures::{SAMPLE_CSV, sample_catalog};
use ticket_ledger_testing::{FailingLedger, InMemoryLedger, init_test_tracing, test_clock};

fn run_session<L: Ledger>(script: &str, ledger: L) -> (Catalog, String) {
    init_test_tracing();
    let console = Console::new(script.as_bytes(), Vec::new());
    let mut session = Session::new(sample_catalog(), ledger, Arc::new(test_clock()), console);
    session.run().unwrap();

    let (catalog, output) = session.into_parts();
    (catalog, String::from_utf8(output).unwrap())
}

#[test]
fn test_purchase_is_recorded_and_receipted() {
    let ledger = InMemoryLedger::new();
    let (_, output) = run_session("3\n1\n1\n3\nyes\n7\n", ledger.clone());

    assert_eq!(
        ledger.lines(),
        vec!["2025-01-01 00:00:00|Adult|Single|3|7.5"]
    );
    assert!(output.contains("3x Single"));
    assert!(output.contains("Total: £7.50"));
    assert!(output.contains("PURCHASE RECEIPT"));
    assert!(output.contains("✓ Purchase saved successfully!"));
    assert!(output.ends_with("Thank you for using Bus Ticket System!\n"));
}

#[test]
fn test_declined_purchase_is_not_recorded() {
    let ledger = InMemoryLedger::new();
    let (_, output) = run_session("3\n2\n2\n1\nno\n7\n", ledger.clone());

    assert!(ledger.is_empty());
    assert!(output.contains("Total: £12.00"));
    assert!(output.contains("Purchase cancelled."));
}

#[test]
fn test_invalid_purchase_input_returns_to_menu() {
    let ledger = InMemoryLedger::new();
    let (_, output) = run_session("3\n9\n3\nabc\n3\n1\n1\n0\n7\n", ledger.clone());

    assert!(ledger.is_empty());
    assert!(output.contains("Invalid category!"));
    assert!(output.contains("Invalid input! Please enter numbers only."));
    assert!(output.contains("Quantity must be positive!"));
    assert!(output.contains("Thank you for using Bus Ticket System!"));
}

#[test]
fn test_ledger_failure_is_reported() {
    let (_, output) = run_session("3\n1\n1\n1\ny\n7\n", FailingLedger);

    assert!(output.contains("✗ Error saving purchase!"));
    assert!(!output.contains("PURCHASE RECEIPT"));
}

#[test]
fn test_end_of_input_mid_purchase_ends_session() {
    let ledger = InMemoryLedger::new();
    let (_, output) = run_session("3\n1\n", ledger.clone());

    assert!(ledger.is_empty());
    assert!(output.ends_with("End of input. Goodbye!\n"));
}

#[test]
fn test_invalid_menu_choice() {
    let (_, output) = run_session("9\n7\n", InMemoryLedger::new());
    assert!(output.contains("Invalid choice! Please enter 1-7."));
}

#[test]
fn test_view_category_details() {
    let (_, output) = run_session("1\n2\n7\n", InMemoryLedger::new());

    assert!(output.contains("1. Adult (2 tickets)"));
    assert!(output.contains("Category: Student"));
    assert!(output.contains("Available tickets: 2"));
    assert!(output.contains("Value: 7 day"));
}

#[test]
fn test_search() {
    let (_, output) = run_session("2\nSINGLE\n2\n   \n7\n", InMemoryLedger::new());

    assert!(output.contains("Found 3 results:"));
    assert!(output.contains("1. Adult - Single"));
    assert!(output.contains("Search term cannot be empty!"));
}

#[test]
fn test_history_and_statistics() {
    let ledger = InMemoryLedger::with_lines([
        "2025-01-01 09:00:00|Adult|Single|3|7.5",
        "corrupted entry",
        "2025-01-01 09:05:00|Student|Weekly|1|12.0",
        "2025-01-01 09:10:00|Adult|Day Rider|1|4.5",
    ]);
    let (_, output) = run_session("4\nyes\n7\n", ledger);

    assert!(output.contains("YOUR PURCHASE HISTORY"));
    assert!(output.contains("Error reading purchase:"));
    assert!(output.contains("4. Date: 2025-01-01 09:10:00"));
    assert!(output.contains("Total spent: £24.00"));
    assert!(output.contains("PURCHASES BY CATEGORY"));
    assert!(output.contains(&format!("{:<20} {} (2)", "Adult", "█".repeat(30))));
    assert!(output.contains(&format!("{:<20} {} (1)", "Student", "█".repeat(15))));
}

#[test]
fn test_overflowing_totals_are_skipped_in_listings() {
    let huge = "70000000000000000000000000000";
    let ledger = InMemoryLedger::with_lines([
        format!("2025-01-01 09:00:00|Adult|Single|1|{huge}"),
        format!("2025-01-01 09:05:00|Adult|Single|1|{huge}"),
        "2025-01-01 09:10:00|Child|Single|1|1.0".to_string(),
    ]);
    let (_, output) = run_session("4\nyes\n6\nadmin123\n5\n7\n7\n", ledger);

    assert!(output.contains(&format!("Error reading purchase: Invalid total: '{huge}'")));
    assert!(output.contains("3. Date: 2025-01-01 09:10:00"));
    assert!(output.contains("Total spent: £70000000000000000000000000001.00"));
    assert!(output.contains("Purchase #3:"));
    assert!(output.contains("  Total purchases: 2"));
}

#[test]
fn test_empty_history_and_statistics() {
    let (_, output) = run_session("4\n5\n7\n", InMemoryLedger::new());

    assert!(output.contains("No purchases found."));
    assert!(output.contains("No purchase data to analyze."));
}

#[test]
fn test_custom_bar_width() {
    init_test_tracing();
    let ledger = InMemoryLedger::with_lines(["t|Adult|Single|1|2.5"]);
    let console = Console::new("5\n7\n".as_bytes(), Vec::new());
    let mut session = Session::new(sample_catalog(), ledger, Arc::new(test_clock()), console)
        .with_bar_width(5);
    session.run().unwrap();

    let output = String::from_utf8(session.into_parts().1).unwrap();
    assert!(output.contains(&format!("{:<20} █████ (1)", "Adult")));
}

#[test]
fn test_oversized_bar_width_is_capped() {
    init_test_tracing();
    let ledger = InMemoryLedger::with_lines(["t|Adult|Single|1|2.5"]);
    let console = Console::new("5\n7\n".as_bytes(), Vec::new());
    let mut session = Session::new(sample_catalog(), ledger, Arc::new(test_clock()), console)
        .with_bar_width(usize::MAX);
    session.run().unwrap();

    let output = String::from_utf8(session.into_parts().1).unwrap();
    assert!(output.contains(&format!("{:<20} {} (1)", "Adult", "█".repeat(200))));
}

#[test]
fn test_admin_rejects_wrong_password() {
    let (_, output) = run_session("6\nAdmin123\n7\n", InMemoryLedger::new());

    assert!(output.contains("✗ Invalid password!"));
    assert!(!output.contains("   ADMIN PANEL"));
}

#[test]
fn test_admin_custom_password() {
    init_test_tracing();
    let console = Console::new("6\nadmin123\n6\nhunter2\n7\n7\n".as_bytes(), Vec::new());
    let mut session = Session::new(
        sample_catalog(),
        InMemoryLedger::new(),
        Arc::new(test_clock()),
        console,
    )
    .with_admin_password("hunter2");
    session.run().unwrap();

    let output = String::from_utf8(session.into_parts().1).unwrap();
    assert!(output.contains("✗ Invalid password!"));
    assert!(output.contains("✓ Login successful!"));
    assert!(output.contains("Returning to main menu..."));
}

#[test]
fn test_admin_added_ticket_can_be_bought() {
    let ledger = InMemoryLedger::new();
    let (catalog, output) = run_session(
        "6\nadmin123\n2\nSenior\nOff Peak\n1.20\n\n\n7\n3\n4\n1\n5\ny\n7\n",
        ledger.clone(),
    );

    assert!(output.contains("✓ Ticket 'Off Peak' added successfully!"));
    assert!(output.contains("  Price: £1.20"));

    let ticket = catalog.category("Senior").unwrap().ticket(0).unwrap();
    assert_eq!(ticket.topup_description(), "Off Peak ticket");
    assert_eq!(ticket.passenger_class(), "Adult");
    assert_eq!(
        ledger.lines(),
        vec!["2025-01-01 00:00:00|Senior|Off Peak|5|6.0"]
    );
}

#[test]
fn test_admin_add_rejects_blank_and_negative_input() {
    let (catalog, output) = run_session(
        "6\nadmin123\n2\n  \n2\nSenior\nOff Peak\n-3\n7\n7\n",
        InMemoryLedger::new(),
    );

    assert!(output.contains("Category name cannot be empty!"));
    assert!(output.contains("Price cannot be negative!"));
    assert!(catalog.category("Senior").is_none());
}

#[test]
fn test_admin_add_rejects_price_beyond_pence_range() {
    let (catalog, output) = run_session(
        "6\nadmin123\n2\nSenior\nOff Peak\n79228162514264337593543950335\n7\n7\n",
        InMemoryLedger::new(),
    );

    assert!(output.contains("Price is too large!"));
    assert!(catalog.category("Senior").is_none());
}

#[test]
fn test_admin_edit_price_affects_new_purchases_only() {
    let ledger = InMemoryLedger::with_lines(["2024-12-31 10:00:00|Adult|Single|1|2.5"]);
    let (catalog, output) = run_session(
        "6\nadmin123\n3\n1\n1\n3.00\n7\n3\n1\n1\n2\nyes\n7\n",
        ledger.clone(),
    );

    assert!(output.contains("Current price: £2.50"));
    assert!(output.contains("  New price: £3.00"));
    let single = catalog.category("Adult").unwrap().ticket(0).unwrap();
    assert_eq!(single.price().to_string(), "£3.00");
    assert_eq!(
        ledger.lines(),
        vec![
            "2024-12-31 10:00:00|Adult|Single|1|2.5",
            "2025-01-01 00:00:00|Adult|Single|2|6.0",
        ]
    );
}

#[test]
fn test_admin_edit_rejects_invalid_price() {
    let (catalog, output) = run_session(
        "6\nadmin123\n3\n1\n1\nfree\n7\n7\n",
        InMemoryLedger::new(),
    );

    assert!(output.contains("Invalid price! Please enter a number."));
    let single = catalog.category("Adult").unwrap().ticket(0).unwrap();
    assert_eq!(single.price().to_string(), "£2.50");
}

#[test]
fn test_admin_delete_only_ticket_keeps_category() {
    let (catalog, output) = run_session(
        "6\nadmin123\n4\n3\n1\nyes\n6\n7\n7\n",
        InMemoryLedger::new(),
    );

    assert!(output.contains("You are about to delete: Single"));
    assert!(output.contains("✓ Ticket 'Single' deleted successfully!"));
    assert!(output.contains("  Child: 0 tickets"));
    assert!(output.contains("  Total tickets: 4"));

    let child = catalog.category("Child").unwrap();
    assert_eq!(child.count(), 0);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_admin_delete_can_be_cancelled() {
    let (catalog, output) = run_session(
        "6\nadmin123\n4\n1\n2\nno\n7\n7\n",
        InMemoryLedger::new(),
    );

    assert!(output.contains("Deletion cancelled."));
    assert_eq!(catalog.category("Adult").unwrap().count(), 2);
}

#[test]
fn test_admin_reports() {
    let ledger = InMemoryLedger::with_lines([
        "2025-01-01 09:00:00|Adult|Single|3|7.5",
        "2025-01-01 09:05:00|Student|Weekly|1|12.0",
    ]);
    let (_, output) = run_session("6\nadmin123\n1\n5\n6\n7\n7\n", ledger);

    assert!(output.contains("ALL TICKETS IN SYSTEM"));
    assert!(output.contains("     ID: adult-si..."));
    assert!(output.contains("Total tickets in system: 5"));

    assert!(output.contains("Purchase #2:"));
    assert!(output.contains("  Total purchases: 2"));
    assert!(output.contains("  Total revenue: £19.50"));

    assert!(output.contains("  Total categories: 3"));
    assert!(output.contains("  Average purchase: £9.75"));
}

#[test]
fn test_run_against_files() {
    init_test_tracing();
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("bus_tickets.csv");
    fs::write(&catalog_path, SAMPLE_CSV).unwrap();

    let config = Config {
        catalog_path,
        ledger_path: dir.path().join("data").join("purchases.txt"),
        ..Config::default()
    };

    let mut output = Vec::new();
    ticket_ledger_cli::run(None, &config, "3\n3\n1\n2\ny\n7\n".as_bytes(), &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("Loading ticket data...\nSuccessfully loaded 5 tickets\n"));

    let ledger = fs::read_to_string(&config.ledger_path).unwrap();
    assert!(ledger.ends_with("|Child|Single|2|2.0\n"));

    let mut output = Vec::new();
    ticket_ledger_cli::run(Some(Command::History), &config, "".as_bytes(), &mut output).unwrap();
    assert!(String::from_utf8(output).unwrap().contains("Total spent: £2.00"));
}

#[test]
fn test_run_without_catalog_fails() {
    init_test_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        catalog_path: dir.path().join("missing.csv"),
        ledger_path: dir.path().join("purchases.txt"),
        ..Config::default()
    };

    let mut output = Vec::new();
    let result = ticket_ledger_cli::run(None, &config, "7\n".as_bytes(), &mut output);

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::EmptyCatalog { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!config.ledger_path.exists());
}

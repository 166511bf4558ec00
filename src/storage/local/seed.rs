//! Demo records for a fresh local store.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::{LocalCollections, CUSTOMERS_KEY, LEDGER_KEY, ORDERS_KEY, QUOTES_KEY};
use crate::model::{Customer, EntryType, LedgerEntry, Order, OrderStatus, Quote, QuoteStatus};
use crate::storage::Result;

/// Seed each collection that has never been written. Existing data is left alone.
pub fn seed_demo_data(collections: &LocalCollections) -> Result<()> {
    if !collections.contains(CUSTOMERS_KEY)? {
        collections.save(CUSTOMERS_KEY, &demo_customers())?;
        info!("Seeded demo customers");
    }
    if !collections.contains(QUOTES_KEY)? {
        collections.save(QUOTES_KEY, &demo_quotes())?;
        info!("Seeded demo quotes");
    }
    if !collections.contains(ORDERS_KEY)? {
        collections.save(ORDERS_KEY, &demo_orders())?;
        info!("Seeded demo orders");
    }
    if !collections.contains(LEDGER_KEY)? {
        collections.save(LEDGER_KEY, &demo_entries())?;
        info!("Seeded demo ledger entries");
    }
    Ok(())
}

fn demo_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "1".to_string(),
            name: "João Silva".to_string(),
            document: "123.456.789-00".to_string(),
            email: "joao@email.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
            address: "Rua das Pedras, 123".to_string(),
            notes: None,
        },
        Customer {
            id: "2".to_string(),
            name: "Maria Oliveira".to_string(),
            document: "987.654.321-00".to_string(),
            email: "maria@email.com".to_string(),
            phone: "(11) 88888-8888".to_string(),
            address: "Av. Mármore, 456".to_string(),
            notes: None,
        },
    ]
}

fn demo_quotes() -> Vec<Quote> {
    vec![Quote {
        id: "o1".to_string(),
        document_number: "ORC-1001".to_string(),
        customer_id: "1".to_string(),
        customer_name: "João Silva".to_string(),
        description: "Bancada de cozinha".to_string(),
        material: "Granito Preto São Gabriel".to_string(),
        area: Decimal::new(35, 1),
        amount: Decimal::new(350000, 2),
        status: QuoteStatus::Pending,
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).single().unwrap_or_default(),
    }]
}

fn demo_orders() -> Vec<Order> {
    vec![Order {
        id: "p1".to_string(),
        document_number: "PED-1001".to_string(),
        quote_id: "o0".to_string(),
        customer_id: "2".to_string(),
        customer_name: "Maria Oliveira".to_string(),
        description: "Lavatório".to_string(),
        final_amount: Decimal::new(120000, 2),
        status: OrderStatus::Production,
        paid: false,
        delivery_date: "2024-01-20".to_string(),
        approved_at: Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).single(),
    }]
}

fn demo_entries() -> Vec<LedgerEntry> {
    let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap_or_default();
    vec![
        LedgerEntry {
            id: "f1".to_string(),
            description: "Compra de chapas".to_string(),
            amount: Decimal::new(50000, 2),
            date,
            entry_type: EntryType::Expense,
            category: "Stock".to_string(),
            paid: false,
            reference_id: None,
        },
        LedgerEntry {
            id: "f2".to_string(),
            description: "Order PED-1001 - Maria Oliveira".to_string(),
            amount: Decimal::new(120000, 2),
            date,
            entry_type: EntryType::Income,
            category: "Sale".to_string(),
            paid: true,
            reference_id: Some("p1".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::NewCustomer;
    use crate::storage::local::MemoryLocalStorage;

    #[test]
    fn test_seed_fills_empty_store() {
        let collections = LocalCollections::new(Arc::new(MemoryLocalStorage::new()));
        seed_demo_data(&collections).unwrap();

        assert_eq!(collections.list_customers().unwrap().len(), 2);
        let quote = collections.get_quote("o1").unwrap().unwrap();
        assert_eq!(quote.amount, Decimal::new(350000, 2));
        assert_eq!(quote.status, QuoteStatus::Pending);
        assert!(!collections.order_exists_for_quote("o1").unwrap());
        assert_eq!(collections.list_entries().unwrap().len(), 2);
    }

    #[test]
    fn test_seed_leaves_existing_collections() {
        let collections = LocalCollections::new(Arc::new(MemoryLocalStorage::new()));
        collections
            .add_customer(NewCustomer {
                name: "Pedro".to_string(),
                ..Default::default()
            })
            .unwrap();

        seed_demo_data(&collections).unwrap();
        seed_demo_data(&collections).unwrap();

        let customers = collections.list_customers().unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Pedro");
        assert_eq!(collections.list_quotes().unwrap().len(), 1);
    }
}

//! rochedo-admin: back-office command line
//!
//! Opens the configured stores, resolves the storage mode and runs a single
//! command against the shop repository.
//!
//! ## Usage
//! ```text
//! rochedo-admin [--config <path>] summary
//! rochedo-admin [--config <path>] quotes | orders | ledger
//! rochedo-admin [--config <path>] approve <quote-id> <delivery-date>
//! ```
//!
//! ## Configuration
//! - ROCHEDO_CONFIG: YAML config file (optional)
//! - ROCHEDO__STORAGE__MODE: primary | local
//! - ROCHEDO_LOG: tracing filter (default: info)

use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use rochedo::config::Config;
use rochedo::repository::ShopRepository;
use rochedo::services::{ApprovalService, DashboardStats, LedgerTotals};
use rochedo::utils::bootstrap::{init_tracing, open_repository};

#[derive(Parser)]
#[command(name = "rochedo-admin")]
#[command(about = "Back-office commands for the shop's quotes, orders and ledger")]
struct Cli {
    /// YAML config file
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dashboard figures as JSON
    Summary,
    /// List quotes
    Quotes,
    /// List orders
    Orders,
    /// List ledger entries and totals
    Ledger,
    /// Convert a pending quote into an order and its income entry
    Approve {
        quote_id: String,
        /// Agreed delivery date, stored as typed
        delivery_date: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let repository = Arc::new(open_repository(&config).await?);
    info!(mode = %repository.mode(), "rochedo-admin started");

    match cli.command {
        Command::Summary => summary(&repository).await?,
        Command::Quotes => {
            for q in repository.list_quotes().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    q.id, q.document_number, q.status, q.customer_name, q.amount
                );
            }
        }
        Command::Orders => {
            for o in repository.list_orders().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}\tpaid={}",
                    o.id, o.document_number, o.status, o.customer_name, o.final_amount, o.paid
                );
            }
        }
        Command::Ledger => {
            let entries = repository.list_entries().await?;
            for e in &entries {
                println!(
                    "{}\t{}\t{}\t{}\t{}\tpaid={}",
                    e.id, e.date, e.entry_type, e.category, e.amount, e.paid
                );
            }
            let totals = LedgerTotals::compute(&entries);
            println!(
                "income={} expense={} balance={}",
                totals.income, totals.expense, totals.balance
            );
        }
        Command::Approve {
            quote_id,
            delivery_date,
        } => {
            let service = ApprovalService::new(repository.clone());
            match service.approve_by_id(&quote_id, &delivery_date).await {
                Ok(order_id) => println!("{}", order_id),
                Err(e) => {
                    error!(error = %e, "Approval failed");
                    return Err(e.user_message().into());
                }
            }
        }
    }

    Ok(())
}

async fn summary(repository: &ShopRepository) -> Result<(), Box<dyn std::error::Error>> {
    let entries = repository.list_entries().await?;
    let quotes = repository.list_quotes().await?;
    let orders = repository.list_orders().await?;
    let stats = DashboardStats::compute(&entries, &quotes, &orders, Utc::now().date_naive());
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

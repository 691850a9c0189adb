//! Command-line surface

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use siga_core::{
    EventStatus, MemberStatus, MembershipType, PaymentStatus, TransactionStatus, TransactionType,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "siga")]
#[command(about = "SIGA association management console", long_about = None, version)]
pub struct Cli {
    /// Configuration file path (defaults to ./siga.toml when present)
    #[arg(short, long, global = true, env = "SIGA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage members
    #[command(subcommand)]
    Members(MemberCommand),
    /// Manage events
    #[command(subcommand)]
    Events(EventCommand),
    /// Income and expenses
    #[command(subcommand)]
    Finance(FinanceCommand),
    /// Maintain the offline store
    #[command(subcommand)]
    Store(StoreCommand),
    /// Show the configured operator and role
    Whoami,
}

#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// List all members
    List {
        #[arg(long, value_parser = parse_enum::<MemberStatus>)]
        status: Option<MemberStatus>,
    },
    /// Show one member
    Show { id: String },
    /// Register a new member
    Add(NewMember),
    /// Change fields of a member
    Update {
        id: String,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Delete a member
    Remove { id: String },
    /// Find members by name or email
    Search { query: String },
    /// Headcount by status
    Stats,
}

#[derive(Debug, Args)]
pub struct NewMember {
    /// Keep this id instead of generating one
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub profession: Option<String>,
    #[arg(long, value_parser = parse_enum::<MembershipType>)]
    pub membership_type: Option<MembershipType>,
    #[arg(long)]
    pub join_date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_enum::<MemberStatus>)]
    pub status: Option<MemberStatus>,
    #[arg(long, value_parser = parse_enum::<PaymentStatus>)]
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Args)]
pub struct MemberFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub profession: Option<String>,
    #[arg(long, value_parser = parse_enum::<MembershipType>)]
    pub membership_type: Option<MembershipType>,
    #[arg(long)]
    pub join_date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_enum::<MemberStatus>)]
    pub status: Option<MemberStatus>,
    #[arg(long, value_parser = parse_enum::<PaymentStatus>)]
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// List all events
    List,
    /// Show one event
    Show { id: String },
    /// Schedule an event
    Add(NewEvent),
    /// Change fields of an event
    Update {
        id: String,
        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Remove { id: String },
    /// Events between two dates (inclusive)
    Between {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Find events by title or description
    Search { query: String },
}

#[derive(Debug, Args)]
pub struct NewEvent {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub date: NaiveDate,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub capacity: Option<u32>,
    #[arg(long, value_parser = parse_enum::<EventStatus>)]
    pub status: Option<EventStatus>,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct EventFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub capacity: Option<u32>,
    #[arg(long, value_parser = parse_enum::<EventStatus>)]
    pub status: Option<EventStatus>,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum FinanceCommand {
    /// List transactions
    List(Filters),
    /// Record a transaction
    Add(NewTransaction),
    /// Change fields of a transaction
    Update {
        id: String,
        #[command(flatten)]
        fields: TransactionFields,
    },
    /// Delete a transaction
    Remove { id: String },
    /// Income, expenses, and balance
    Summary(Filters),
}

#[derive(Debug, Clone, Default, Args)]
pub struct Filters {
    #[arg(long = "type", value_parser = parse_enum::<TransactionType>)]
    pub kind: Option<TransactionType>,
    #[arg(long, value_parser = parse_enum::<TransactionStatus>)]
    pub status: Option<TransactionStatus>,
    /// Calendar month, YYYY-MM
    #[arg(long, value_parser = parse_month)]
    pub month: Option<String>,
}

#[derive(Debug, Args)]
pub struct NewTransaction {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long = "type", value_parser = parse_enum::<TransactionType>)]
    pub kind: TransactionType,
    #[arg(long)]
    pub category: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub amount: f64,
    #[arg(long)]
    pub date: NaiveDate,
    #[arg(long, value_parser = parse_enum::<TransactionStatus>)]
    pub status: Option<TransactionStatus>,
}

#[derive(Debug, Args)]
pub struct TransactionFields {
    #[arg(long = "type", value_parser = parse_enum::<TransactionType>)]
    pub kind: Option<TransactionType>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub amount: Option<f64>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_enum::<TransactionStatus>)]
    pub status: Option<TransactionStatus>,
}

#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Discard all data and restore the demo records
    Reset,
    /// Print the stored document as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse a lowercase wire name (`active`, `income`, ...) into its enum
pub fn parse_enum<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .map_err(|_| format!("unknown value: {value}"))
}

pub fn parse_month(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map(|_| value.to_string())
        .map_err(|_| format!("expected YYYY-MM, got {value}"))
}

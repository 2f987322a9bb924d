//! # CLI
//!
//! This module defines the command-line interface of `bugz` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring search queries are `field=value`).
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bugz", version, about = "Bugzilla CLI")]
pub struct Cli {
    /// Root URL of the Bugzilla installation (e.g. https://bugzilla.mozilla.org)
    pub url: String,

    /// API key sent along with every call
    #[arg(long, env = "BUGZ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Seconds to wait for the server before giving up
    #[arg(long, env = "BUGZ_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, search, update or comment bugs
    Bug {
        #[command(subcommand)]
        sub: BugCommands,
    },

    /// Inspect products
    Product {
        #[command(subcommand)]
        sub: ProductCommands,
    },

    /// Inspect bug field definitions
    Field {
        #[command(subcommand)]
        sub: FieldCommands,
    },
}

impl Commands {
    /// The command as typed on the command line, e.g. `bug search`.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Bug { sub } => match sub {
                BugCommands::Get { .. } => "bug get",
                BugCommands::Search { .. } => "bug search",
                BugCommands::Update { .. } => "bug update",
                BugCommands::Comment { .. } => "bug comment",
            },
            Commands::Product {
                sub: ProductCommands::Get { .. },
            } => "product get",
            Commands::Field { sub } => match sub {
                FieldCommands::Get { .. } => "field get",
                FieldCommands::List { .. } => "field list",
            },
        }
    }
}

#[derive(Subcommand)]
pub enum BugCommands {
    /// Fetch a single bug
    Get {
        /// Bug id or alias
        #[arg(value_parser = parse_lookup)]
        bug: Lookup,
    },

    /// Search bugs matching every given constraint
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// bugz https://bugzilla.example.org bug search --product Firefox --status NEW -q cf_build_id=20240101
    /// ```
    Search {
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        component: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        resolution: Option<String>,
        /// Login of the assignee
        #[arg(long)]
        assigned_to: Option<String>,
        /// Login of the reporter
        #[arg(long)]
        reporter: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        /// Constraint on any other field, custom fields included
        #[arg(short = 'q', long = "query", value_parser = parse_query)]
        queries: Vec<(String, String)>,
        /// Maximum number of bugs to return
        #[arg(long)]
        limit: Option<u64>,
        /// Number of matching bugs to skip
        #[arg(long)]
        offset: Option<u64>,
    },

    /// Update an existing bug
    ///
    /// The bug is fetched first, the given fields are changed and the result is sent back.
    Update {
        id: i64,
        #[arg(long)]
        status: Option<String>,
        /// Only sent when the status is CLOSED
        #[arg(long)]
        resolution: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        assigned_to: Option<String>,
        /// Priority from 1 (highest) to 5 (lowest)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        priority: Option<u8>,
        /// Comment attached to the change
        #[arg(long)]
        comment: Option<String>,
        /// Mark the attached comment as private
        #[arg(long, requires = "comment")]
        private: bool,
    },

    /// Add a comment to a bug
    Comment {
        id: i64,
        text: String,
        #[arg(long)]
        private: bool,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Fetch a single product with its components, versions and milestones
    Get {
        /// Product id or name
        #[arg(value_parser = parse_lookup)]
        product: Lookup,
    },
}

#[derive(Subcommand)]
pub enum FieldCommands {
    /// Fetch the definition of a single field
    Get {
        /// Field id or name
        #[arg(value_parser = parse_lookup)]
        field: Lookup,
    },
    /// List every field definition the server returns for the lookup
    List {
        /// Field id or name
        #[arg(value_parser = parse_lookup)]
        field: Lookup,
    },
}

/// How an entity is looked up on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(i64),
    Name(String),
}

fn parse_lookup(value: &str) -> Result<Lookup, String> {
    let value = value.trim();

    if value.is_empty() {
        return Err("Lookup cannot be empty".to_string());
    }

    Ok(value
        .parse()
        .map(Lookup::Id)
        .unwrap_or_else(|_| Lookup::Name(value.to_string())))
}

fn parse_query(s: &str) -> Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid query: '{s}'. Expected 'field=value'"))?;

    if field.trim().is_empty() {
        return Err("Query field cannot be empty".to_string());
    }

    Ok((field.trim().to_string(), value.trim().to_string()))
}

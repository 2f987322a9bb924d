//! # Bugz CLI Entry Point
//!
//! The main executable for the Bugz tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs logging.
//! 2. **Connection**: Builds a JSON-RPC client for the target installation via `bugz_core`.
//! 3. **Execution**: Runs the method descriptors matching the command through the `BugzillaClient`.
//! 4. **Presentation**: Prints the resulting entities or the error to standard output/error.
//!
//! Logging goes to standard error and is configured through `RUST_LOG` (default `warn`).

mod cli;
mod formatter;

use anyhow::Context;
use bugz_core::client::BugzillaClient;
use bugz_core::entity::{Bug, BugEntity, Comment, Entity};
use bugz_core::method::{
    BugFields, BugSearch, CommentBug, GetBug, GetBugField, GetProduct, SearchLimiter, UpdateBug,
};
use bugz_core::transport::{JsonRpcConfig, JsonRpcTransport};
use clap::Parser;
use cli::{BugCommands, Cli, Commands, FieldCommands, Lookup, ProductCommands};
use formatter::{Done, EntityList, FormattedString};
use std::{process, time::Duration};
use tracing_subscriber::EnvFilter;

type Client = BugzillaClient<JsonRpcTransport>;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut config =
        JsonRpcConfig::new(args.url).with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(api_key) = args.api_key {
        config = config.with_api_key(api_key);
    }

    let mut client = connect_or_exit(config);
    tracing::debug!(
        command = args.command.name(),
        endpoint = %client.transport().endpoint(),
        "running command"
    );

    let result = match args.command {
        Commands::Bug { sub } => run_bug(&mut client, sub).await,
        Commands::Product {
            sub: ProductCommands::Get { product },
        } => get_product(&mut client, product).await,
        Commands::Field { sub } => run_field(&mut client, sub).await,
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

fn connect_or_exit(config: JsonRpcConfig) -> Client {
    match BugzillaClient::connect(config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

async fn run_bug(client: &mut Client, command: BugCommands) -> anyhow::Result<FormattedString> {
    match command {
        BugCommands::Get { bug } => {
            let bug = fetch_bug(client, bug).await?;
            Ok(FormattedString::from(bug.as_export_map()))
        }
        BugCommands::Search {
            product,
            component,
            status,
            resolution,
            assigned_to,
            reporter,
            summary,
            queries,
            limit,
            offset,
        } => {
            let mut search = BugSearch::<Bug>::new();

            let limiters = [
                (SearchLimiter::Product, product),
                (SearchLimiter::Component, component),
                (SearchLimiter::Status, status),
                (SearchLimiter::Resolution, resolution),
                (SearchLimiter::Owner, assigned_to),
                (SearchLimiter::Reporter, reporter),
                (SearchLimiter::Summary, summary),
            ];
            for (limiter, value) in limiters {
                if let Some(value) = value {
                    search.add_limiter(limiter, value);
                }
            }
            for (field, value) in queries {
                search.add_query_param(field, value);
            }
            if let Some(limit) = limit {
                search.set_limit(limit);
            }
            if let Some(offset) = offset {
                search.set_offset(offset);
            }

            client
                .call(&mut search)
                .await
                .context("Failed to search bugs")?;

            let bugs = search.search_results()?;
            Ok(EntityList(bugs.iter().map(Entity::as_export_map).collect()).into())
        }
        BugCommands::Update {
            id,
            status,
            resolution,
            summary,
            assigned_to,
            priority,
            comment,
            private,
        } => {
            let mut bug = fetch_bug(client, Lookup::Id(id)).await?;

            if let Some(status) = status {
                bug.set_status(status);
            }
            if let Some(resolution) = resolution {
                bug.set_resolution(resolution);
            }
            if let Some(summary) = summary {
                bug.set_summary(summary);
            }
            if let Some(assigned_to) = assigned_to {
                bug.set_assigned_to(assigned_to);
            }
            if let Some(priority) = priority {
                bug.set_priority(priority);
            }

            let mut update = UpdateBug::new(bug)?;
            if let Some(comment) = comment {
                update = update.with_comment(comment, private);
            }

            client
                .call(&mut update)
                .await
                .with_context(|| format!("Failed to update bug {id}"))?;

            Ok(Done(format!("Bug {id} updated.")).into())
        }
        BugCommands::Comment { id, text, private } => {
            let mut comment = Comment::new(text);
            if private {
                comment = comment.private();
            }

            let mut method = CommentBug::new(id, comment);
            client
                .call(&mut method)
                .await
                .with_context(|| format!("Failed to comment on bug {id}"))?;

            Ok(Done(format!("Comment {} added to bug {id}.", method.comment_id()?)).into())
        }
    }
}

async fn fetch_bug(client: &mut Client, lookup: Lookup) -> anyhow::Result<Bug> {
    tracing::debug!(?lookup, "fetching bug");

    let mut method = match &lookup {
        Lookup::Id(id) => GetBug::<Bug>::by_id(*id),
        Lookup::Name(alias) => GetBug::<Bug>::by_alias(alias.as_str()),
    };

    client
        .call(&mut method)
        .await
        .context("Failed to fetch bug")?;

    method
        .bug()?
        .with_context(|| format!("The server returned no bug for {lookup:?}"))
}

async fn get_product(client: &mut Client, lookup: Lookup) -> anyhow::Result<FormattedString> {
    let mut method = match lookup {
        Lookup::Id(id) => GetProduct::by_id(id),
        Lookup::Name(name) => GetProduct::by_name(name),
    };

    client
        .call(&mut method)
        .await
        .context("Failed to fetch product")?;

    let product = method
        .product()?
        .context("The server returned no product")?;

    Ok(FormattedString::from(product.as_export_map()))
}

async fn run_field(client: &mut Client, command: FieldCommands) -> anyhow::Result<FormattedString> {
    match command {
        FieldCommands::Get { field } => {
            let mut method = match field {
                Lookup::Id(id) => GetBugField::by_id(id),
                Lookup::Name(name) => GetBugField::by_name(name),
            };

            client
                .call(&mut method)
                .await
                .context("Failed to fetch field")?;

            let field = method
                .bug_field()?
                .context("The server returned no field")?;

            Ok(FormattedString::from(field.as_export_map()))
        }
        FieldCommands::List { field } => {
            let mut method = match field {
                Lookup::Id(id) => BugFields::by_id(id),
                Lookup::Name(name) => BugFields::by_name(name),
            };

            client
                .call(&mut method)
                .await
                .context("Failed to fetch fields")?;

            let fields = method.bug_fields()?;
            Ok(EntityList(fields.iter().map(Entity::as_export_map).collect()).into())
        }
    }
}

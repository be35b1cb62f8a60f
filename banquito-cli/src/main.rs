//! Banquito CLI
//!
//! Command-line interface for the catalog API.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use banquito_client::CatalogClient;
use banquito_types::{
    Flag, InterestRateId, InterestRateRqrs, ProductAccountId, ProductAccountRqrs, State,
};

#[derive(Parser)]
#[command(name = "banquito")]
#[command(author, version, about = "Banquito catalog API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the catalog API
    #[arg(
        long,
        env = "BANQUITO_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Branch registry operations
    Branch {
        #[command(subcommand)]
        action: BranchCommands,
    },
    /// Interest-rate catalog operations
    Rate {
        #[command(subcommand)]
        action: RateCommands,
    },
    /// Product-account catalog operations
    Product {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum BranchCommands {
    /// List all branches
    List,
    /// Get a branch by code
    Get { code: String },
    /// Create a branch
    Create { code: String, name: String },
    /// Rename a branch
    Update { code: String, name: String },
}

#[derive(Args)]
struct RateFields {
    #[arg(long)]
    name: String,
    /// Rate in basis points (250 = 0.0250)
    #[arg(long)]
    bps: i64,
    /// Validity start (RFC 3339); defaults to now on create
    #[arg(long)]
    start: Option<DateTime<Utc>>,
    /// Validity end (RFC 3339)
    #[arg(long)]
    end: Option<DateTime<Utc>>,
}

impl RateFields {
    fn into_rqrs(self) -> InterestRateRqrs {
        InterestRateRqrs {
            id: None,
            name: self.name,
            rate_bps: self.bps,
            state: State::Active,
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Subcommand)]
enum RateCommands {
    /// List active interest rates
    List,
    /// Get an interest rate by id
    Get { id: i64 },
    /// Create an interest rate
    Create(RateFields),
    /// Update an interest rate
    Update {
        id: i64,
        #[command(flatten)]
        fields: RateFields,
    },
    /// Inactivate an interest rate
    Delete { id: i64 },
}

#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Minimum balance in cents
    #[arg(long, default_value_t = 0)]
    minimum_balance: i64,
    #[arg(long)]
    pay_interest: bool,
    #[arg(long)]
    accepts_checks: bool,
}

impl ProductFields {
    fn into_rqrs(self, id: Option<String>) -> ProductAccountRqrs {
        ProductAccountRqrs {
            id: id.map(ProductAccountId::new),
            name: self.name,
            description: self.description,
            minimum_balance: self.minimum_balance,
            pay_interest: Flag::from(self.pay_interest),
            accepts_checks: Flag::from(self.accepts_checks),
            state: State::Active,
            creation_date: None,
        }
    }
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List active product accounts
    List,
    /// Get a product account by id
    Get { id: String },
    /// Create a product account
    Create {
        /// Client-chosen id; the server generates one when omitted
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Update a product account
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Inactivate a product account
    Delete { id: String },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = CatalogClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Branch { action } => match action {
            BranchCommands::List => print_json(&client.list_branches().await?)?,
            BranchCommands::Get { code } => print_json(&client.get_branch(&code).await?)?,
            BranchCommands::Create { code, name } => {
                print_json(&client.create_branch(&code, &name).await?)?
            }
            BranchCommands::Update { code, name } => {
                print_json(&client.update_branch(&code, &name).await?)?
            }
        },

        Commands::Rate { action } => match action {
            RateCommands::List => print_json(&client.list_interest_rates().await?)?,
            RateCommands::Get { id } => {
                print_json(&client.get_interest_rate(InterestRateId::new(id)).await?)?
            }
            RateCommands::Create(fields) => {
                print_json(&client.create_interest_rate(&fields.into_rqrs()).await?)?
            }
            RateCommands::Update { id, fields } => print_json(
                &client
                    .update_interest_rate(InterestRateId::new(id), &fields.into_rqrs())
                    .await?,
            )?,
            RateCommands::Delete { id } => {
                client.delete_interest_rate(InterestRateId::new(id)).await?;
                println!("✓ Interest rate {id} inactivated");
            }
        },

        Commands::Product { action } => match action {
            ProductCommands::List => print_json(&client.list_product_accounts().await?)?,
            ProductCommands::Get { id } => print_json(&client.get_product_account(&id).await?)?,
            ProductCommands::Create { id, fields } => {
                print_json(&client.create_product_account(&fields.into_rqrs(id)).await?)?
            }
            ProductCommands::Update { id, fields } => {
                let account = fields.into_rqrs(Some(id.clone()));
                print_json(&client.update_product_account(&id, &account).await?)?
            }
            ProductCommands::Delete { id } => {
                client.delete_product_account(&id).await?;
                println!("✓ Product account {id} inactivated");
            }
        },
    }

    Ok(())
}

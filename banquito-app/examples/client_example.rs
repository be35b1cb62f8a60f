//! Client example walking the three catalogs against a running server.
//!
//! Run with: cargo run -p banquito-app --example client_example --no-default-features --features sqlite

use banquito_client::{CatalogClient, ClientError};
use banquito_hex::inbound::HttpServer;
use banquito_repo::build_repo;
use banquito_types::{Flag, InterestRateRqrs, ProductAccountRqrs, State};
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind an ephemeral port and hand the listener to the server
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("banquito.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on {addr}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = build_repo(&db_url).await?;
    let router = HttpServer::new(repo).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = CatalogClient::new(format!("http://{addr}"));

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // ─────────────────────────────────────────────────────────────────────────
    // Branches
    // ─────────────────────────────────────────────────────────────────────────

    let branch = client.create_branch("001", "Branch 1").await?;
    println!("✅ Created branch {} ({})", branch.code, branch.name);

    let branch = client.update_branch("001", "Updated Branch 1").await?;
    println!("✅ Renamed branch {} to {}", branch.code, branch.name);

    match client.update_branch("999", "Nobody").await {
        Err(ClientError::Api {
            status, message, ..
        }) => println!("✅ Update of unknown branch rejected ({status}): {message}"),
        other => anyhow::bail!("expected an API error, got {other:?}"),
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Interest rates
    // ─────────────────────────────────────────────────────────────────────────

    let savings = client
        .create_interest_rate(&InterestRateRqrs {
            id: None,
            name: "Savings".into(),
            rate_bps: 250,
            state: State::Active,
            start: None,
            end: None,
        })
        .await?;
    let savings_id = savings.id.ok_or_else(|| anyhow::anyhow!("rate without id"))?;
    println!("✅ Created interest rate {} (id={savings_id})", savings.name);

    client.delete_interest_rate(savings_id).await?;
    let actives = client.list_interest_rates().await?;
    println!("✅ Inactivated rate {savings_id}; {} active left", actives.len());

    // ─────────────────────────────────────────────────────────────────────────
    // Product accounts
    // ─────────────────────────────────────────────────────────────────────────

    let product = client
        .create_product_account(&ProductAccountRqrs {
            id: None,
            name: "Basic savings".into(),
            description: "Entry-level savings account".into(),
            minimum_balance: 10_000,
            pay_interest: Flag::Yes,
            accepts_checks: Flag::No,
            state: State::Active,
            creation_date: None,
        })
        .await?;
    println!(
        "✅ Created product account {} (id={:?})",
        product.name, product.id
    );

    let products = client.list_product_accounts().await?;
    println!("\n📋 Active product accounts:");
    for p in products {
        println!(
            "   - {} (min balance ${:.2})",
            p.name,
            p.minimum_balance as f64 / 100.0
        );
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}

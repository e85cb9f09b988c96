//! Shopping-agent walkthrough of a full checkout against an in-process server.
//!
//! Run with: cargo run -p ap2-app --example checkout_flow

use std::net::SocketAddr;
use std::sync::Arc;

use ap2_client::Ap2Client;
use ap2_hex::inbound::{AppState, HttpServer};
use ap2_repo::build_store;
use ap2_types::{CartItemRequest, DEFAULT_USER_EMAIL, PaymentMandate, PaymentOutcome};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr}...");

    // Start server in background
    let server = HttpServer::new(AppState::new(Arc::new(build_store())));
    let router = server.router();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = Ap2Client::new(format!("http://{addr}")).with_agent_id("demo_frontend");

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Full checkout flow
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {} ({})", health.status, health.service);

    let check = client.validate_product("coca cola").await?;
    println!("✅ Validated 'coca cola': exists={}", check.exists);

    let cart = client
        .create_cart(vec![
            CartItemRequest {
                name: "Coca Cola".into(),
                quantity: 2,
            },
            CartItemRequest {
                name: "Maggi 2-Minute Noodles".into(),
                quantity: 1,
            },
        ])
        .await?;
    println!(
        "✅ Cart {} signed by {}: total {}",
        cart.cart_id,
        cart.merchant_id,
        cart.total()?
    );

    let methods = client.payment_methods(DEFAULT_USER_EMAIL).await?;
    let card = methods
        .first()
        .ok_or_else(|| anyhow::anyhow!("demo account has no payment method"))?;
    println!("✅ Paying with {}", card.alias);

    let token = client.tokenize(DEFAULT_USER_EMAIL, Some(&card.alias)).await?;
    println!("✅ Payment token: {token}");

    let mandate = PaymentMandate::for_cart(&cart, token, "sig_user_demo");

    let code = match client.initiate_payment(&mandate, None).await? {
        PaymentOutcome::ChallengeRequired { display_text, .. } => {
            println!("🔐 {display_text}");
            ap2_repo::DEMO_CODE
        }
        PaymentOutcome::Success { .. } => anyhow::bail!("payment settled without a challenge"),
    };

    // A wrong code keeps the challenge open
    if let Err(e) = client.initiate_payment(&mandate, Some("000000")).await {
        println!("❌ Wrong code rejected: {e}");
    }

    match client.initiate_payment(&mandate, Some(code)).await? {
        PaymentOutcome::Success { receipt } => println!(
            "✅ Paid {} to {} with {} (receipt {})",
            receipt.amount, receipt.merchant, receipt.card_brand, receipt.id
        ),
        other => anyhow::bail!("unexpected outcome: {other:?}"),
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}

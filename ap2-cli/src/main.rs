//! AP2 CLI
//!
//! Command-line shopping agent for the AP2 demo backend.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use ap2_client::Ap2Client;
use ap2_types::{
    CartItemRequest, DEFAULT_CURRENCY, DEFAULT_USER_EMAIL, MandateId, PaymentMandate, PaymentOutcome,
};

#[derive(Parser)]
#[command(name = "ap2")]
#[command(author, version, about = "AP2 demo backend CLI client", long_about = None)]
struct Cli {
    /// Base URL of the AP2 API
    #[arg(long, env = "AP2_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Shopping agent id sent in the `shopping-agent-id` header
    #[arg(long, env = "AP2_AGENT_ID")]
    agent_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Merchant catalog
    Products {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// Cart mandates
    Cart {
        #[command(subcommand)]
        action: CartCommands,
    },
    /// Credentials provider operations
    Wallet {
        #[command(subcommand)]
        action: WalletCommands,
    },
    /// Submit a payment mandate to the processor
    Pay {
        #[arg(long)]
        mandate_id: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "cart_cli")]
        cart_id: String,
        /// One-time code; omit to request a challenge
        #[arg(long)]
        otp: Option<String>,
    },
    /// Cart, tokenize and pay in one go
    Checkout {
        /// Items as NAME:QUANTITY (repeatable)
        #[arg(long = "item", required = true, value_parser = parse_item)]
        items: Vec<CartItemRequest>,
        #[arg(long, default_value = DEFAULT_USER_EMAIL)]
        email: String,
        /// Card alias; the first stored card is used when absent
        #[arg(long)]
        alias: Option<String>,
        /// One-time code; prompted for when absent
        #[arg(long)]
        otp: Option<String>,
    },
    /// Show the agent audit log
    Logs,
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List all products
    List,
    /// Check whether a product exists
    Validate {
        /// Product name (case-insensitive)
        name: String,
    },
}

#[derive(Subcommand)]
enum CartCommands {
    /// Create a signed cart mandate
    Create {
        /// Items as NAME:QUANTITY (repeatable)
        #[arg(long = "item", required = true, value_parser = parse_item)]
        items: Vec<CartItemRequest>,
    },
}

#[derive(Subcommand)]
enum WalletCommands {
    /// List stored payment methods
    Methods {
        #[arg(long, default_value = DEFAULT_USER_EMAIL)]
        email: String,
    },
    /// Show the shipping address
    Address {
        #[arg(long, default_value = DEFAULT_USER_EMAIL)]
        email: String,
    },
    /// Issue a payment token
    Tokenize {
        #[arg(long, default_value = DEFAULT_USER_EMAIL)]
        email: String,
        #[arg(long)]
        alias: Option<String>,
    },
}

/// Parses `NAME:QUANTITY`; a bare name means one unit.
fn parse_item(s: &str) -> Result<CartItemRequest, String> {
    let (name, quantity) = match s.rsplit_once(':') {
        Some((name, qty)) => (
            name,
            qty.trim()
                .parse()
                .map_err(|_| format!("invalid quantity in '{}'", s))?,
        ),
        None => (s, 1),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err("item name cannot be empty".into());
    }
    Ok(CartItemRequest {
        name: name.to_string(),
        quantity,
    })
}

fn prompt(message: &str) -> Result<String> {
    print!("{}: ", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_outcome(outcome: &PaymentOutcome) -> Result<()> {
    match outcome {
        PaymentOutcome::ChallengeRequired { message, display_text } => {
            println!("🔐 {}", message);
            println!("   {}", display_text);
        }
        PaymentOutcome::Success { .. } => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = Ap2Client::new(&cli.api_url);
    if let Some(agent) = cli.agent_id {
        client = client.with_agent_id(agent);
    }

    match cli.command {
        Commands::Health => match client.health().await {
            Ok(health) => println!("✓ {} is {}", health.service, health.status),
            Err(e) => {
                println!("✗ API is not healthy: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Products { action } => match action {
            ProductCommands::List => {
                let products = client.list_products().await?;
                println!("{}", serde_json::to_string_pretty(&products)?);
            }
            ProductCommands::Validate { name } => {
                let result = client.validate_product(&name).await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        },

        Commands::Cart { action } => match action {
            CartCommands::Create { items } => {
                let cart = client.create_cart(items).await?;
                println!("{}", serde_json::to_string_pretty(&cart)?);
            }
        },

        Commands::Wallet { action } => match action {
            WalletCommands::Methods { email } => {
                let methods = client.payment_methods(&email).await?;
                println!("{}", serde_json::to_string_pretty(&methods)?);
            }
            WalletCommands::Address { email } => {
                let address = client.shipping_address(&email).await?;
                println!("{}", serde_json::to_string_pretty(&address)?);
            }
            WalletCommands::Tokenize { email, alias } => {
                let token = client.tokenize(&email, alias.as_deref()).await?;
                println!("{}", token);
            }
        },

        Commands::Pay {
            mandate_id,
            token,
            amount,
            cart_id,
            otp,
        } => {
            let mandate = PaymentMandate {
                mandate_id: MandateId::new(mandate_id),
                cart_id,
                amount,
                currency: DEFAULT_CURRENCY.into(),
                payment_token: token,
                user_signature: "sig_user_cli".into(),
            };
            let outcome = client.initiate_payment(&mandate, otp.as_deref()).await?;
            print_outcome(&outcome)?;
        }

        Commands::Checkout {
            items,
            email,
            alias,
            otp,
        } => {
            let cart = client.create_cart(items).await?;
            println!("✓ Cart {} total {}", cart.cart_id, cart.total()?);

            let token = client.tokenize(&email, alias.as_deref()).await?;
            let mandate = PaymentMandate::for_cart(&cart, token, "sig_user_cli");
            println!("✓ Mandate {}", mandate.mandate_id);

            let challenge = client.initiate_payment(&mandate, None).await?;
            print_outcome(&challenge)?;

            let code = match otp {
                Some(code) => code,
                None => prompt("Enter OTP")?,
            };
            let outcome = client.initiate_payment(&mandate, Some(&code)).await?;
            print_outcome(&outcome)?;
        }

        Commands::Logs => {
            let logs = client.agent_logs().await?;
            println!("{}", serde_json::to_string_pretty(&logs)?);
        }
    }

    Ok(())
}

//! # AP2 Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the seeded in-memory store
//! - Create one service per agent role
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ap2_hex::{
    MerchantService, PaymentChallengeCoordinator,
    inbound::{AppState, HttpServer},
};
use ap2_repo::{FixedCode, RandomDigits, build_store};
use config::{Config, OtpMode};

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("ap2-demo-backend"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Export spans only when a collector is configured
    let otel = config
        .otlp_endpoint
        .as_deref()
        .map(init_tracer)
        .transpose()?;
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ap2_app=debug,ap2_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting AP2 demo backend on port {}", config.port);
    tracing::info!(agents = ?config.known_agents, "known shopping agents");

    let store = Arc::new(build_store());

    let processor = match &config.otp_mode {
        OtpMode::Fixed(code) => {
            PaymentChallengeCoordinator::with_code_generator(store.clone(), FixedCode::new(code))
        }
        OtpMode::Random => {
            tracing::info!("challenge codes are random per mandate");
            PaymentChallengeCoordinator::with_code_generator(store.clone(), RandomDigits::default())
        }
    };
    let merchant = MerchantService::new(store.clone()).with_known_agents(config.known_agents);

    let state = AppState::new(store)
        .with_merchant(merchant)
        .with_processor(processor);

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(state, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}

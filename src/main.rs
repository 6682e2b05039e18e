use clap::Parser;
use item_broker::config::CliArgs;
use item_broker::utils::{logger, validation::Validate};
use item_broker::{Broker, BrokerConfig, CatalogClient, OrderClient, ServiceRegistry};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_logger(args.verbose);
    }

    tracing::info!("Starting item-broker");

    let mut config = BrokerConfig::from_file(&args.config)?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let registry = Arc::new(ServiceRegistry::from_config(&config)?);
    let client = reqwest::Client::new();
    let catalog = CatalogClient::new(client.clone(), Arc::clone(&registry));
    let order = OrderClient::new(client, &registry)?;
    let broker = Arc::new(Broker::new(catalog, order));

    let app = item_broker::web::router(broker);
    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

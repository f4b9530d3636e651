use crate::backend::ScheduleBackend;
use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::coordinator::BookingCoordinator;
use crate::database_interface::DatabaseInterface;
use crate::http::create_app;
use crate::local_store::LocalStore;
use crate::notifier::{MailApiNotifier, NullNotifier};
use axum::Router;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
mod coordinator;
mod database_interface;
mod error;
mod http;
mod local_store;
mod notifier;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
pub struct AppState<B, N, C> {
    pub coordinator: BookingCoordinator<B, N>,
    pub backend: B,
    pub configuration: C,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("#####################");
    println!("# Portfolio Backend #");
    println!("#####################");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessible at:\n{address}");
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = match configuration.database_url() {
        Some(database_url) => {
            let backend = loop {
                match DatabaseInterface::new(&database_url) {
                    Ok(backend) => {
                        info!("Successfully connected to database");
                        break backend;
                    }
                    Err(err) => {
                        error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart without a database (impersistent schedule).");
                        sleep(Duration::from_secs(1)).await;
                    }
                }
            };
            app_with_backend(backend, configuration)
        }
        None => {
            info!("No database configured, keeping the schedule in memory");
            app_with_backend(LocalStore::default(), configuration)
        }
    };

    axum::serve(listener, app).await.unwrap();
}

fn app_with_backend<B: ScheduleBackend>(backend: B, configuration: ConfigurationHandler) -> Router {
    match MailApiNotifier::from_configuration(&configuration) {
        Some(notifier) => create_app(backend, notifier, configuration),
        None => {
            warn!("Mail provider not configured, booking confirmations will only be logged");
            create_app(backend, NullNotifier, configuration)
        }
    }
}

pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;

pub use models::credentials::GatewayCredentials;
pub use models::params::ItemParameters;
pub use models::records::{ItemError, OperationalError, ResultRecord};
pub use repositories::intrapay::IntraPayClient;
pub use repositories::{GatewayError, PaymentGateway};
pub use services::{BatchError, Dispatcher, FailurePolicy};

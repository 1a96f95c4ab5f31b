pub mod app_config;
pub mod amadeus;

pub use amadeus::AmadeusClient;
pub use app_config::Config;

pub mod app_config;
pub mod probe_config;

pub use app_config::{load_settings, setup_client};
pub use probe_config::Settings;

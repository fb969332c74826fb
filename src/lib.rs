pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::Settings;
pub use crate::core::{
    api::ApiClient,
    endpoints::DashboardApi,
    format::{format_number, FormatSettings, Formatter, Locale},
    notify::{ToastQueue, ToastReceiver},
    transport::ReqwestTransport,
    widgets::{BootstrapInitializer, InitReport, StaticDocument, WidgetRegistry},
};
pub use utils::error::{DashError, Result};

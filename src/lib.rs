pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, OutputFormat};

pub use config::AppConfig;
pub use crate::core::{
    date::{format_date, DateFormat},
    empty::{display_or, display_or_dash, DashOnNull},
    loading::{LoadingGate, LoadingGuard, LoadingInterceptor},
    phone::{format_phone, PhoneMask},
    query::{validate_limit, validate_page, validate_sort, ListQuery},
};
pub use domain::model::{DisplayValue, PaginatedResponse, Person, PersonPayload};
pub use utils::error::{AppError, Result};

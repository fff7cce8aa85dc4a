pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::PricerConfig;

pub use crate::adapters::{headless::HeadlessForm, http::HttpPriceGateway};
pub use crate::core::{price_pipeline::PriceCalculator, resolver::DeviceAttributeResolver};
pub use crate::domain::model::{
    Component, ComponentCondition, ComponentFieldState, DeviceCatalog, DeviceTypeEntry,
    ModelOption, PriceResult,
};
pub use crate::domain::ports::{DisplayNode, Region, TextField};
pub use crate::utils::error::{PricerError, Result};

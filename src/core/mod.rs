pub mod format;
pub mod price_pipeline;
pub mod resolver;

pub use crate::domain::ports::{PriceGateway, PriceView, SelectorView};

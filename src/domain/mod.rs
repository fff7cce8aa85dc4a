// Domain layer: catalog/price models and the ports (view + gateway traits) the core talks to.

pub mod model;
pub mod ports;

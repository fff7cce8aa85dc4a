// Adapters layer: concrete implementations of the domain ports (http gateway, headless form, session cookies).

pub mod csrf;
pub mod headless;
pub mod http;

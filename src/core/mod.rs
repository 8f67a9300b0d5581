pub mod bounds;
pub mod builder;
pub mod config;
pub mod constants;
pub mod geo;
pub mod host;
pub mod map;
pub mod responder;
pub mod viewport;

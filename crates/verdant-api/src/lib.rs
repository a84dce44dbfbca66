// verdant-api: Async Rust client for the greenhouse controller backend API

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

mod actuators;
mod mode;
mod sensors;

pub use client::GreenhouseClient;
pub use error::Error;

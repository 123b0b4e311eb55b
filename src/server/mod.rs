pub mod builder;
pub mod capabilities;
pub mod config;
pub mod registry;
pub mod runtime;
pub mod transport;

pub use builder::Builder;

pub mod config;

pub use config::TagConfig;

pub mod common;
pub mod config;
pub mod convert;
pub mod detect;

pub use common::CommandOptions;
pub use config::Config;
pub use convert::{Convert, ConvertArgs};
pub use detect::Detect;

// Configuration loading

pub mod settings;

pub use settings::{OutputFormat, RowLayout, Settings};

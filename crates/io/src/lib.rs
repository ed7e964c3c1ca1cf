// File I/O operations

pub mod error;
pub mod file;
pub mod json;
pub mod loader;
pub mod text;

pub use error::LoadError;
pub use file::{load, Format};
pub use loader::{parse, parse_with, Layout, LoadOptions};

pub mod cleaner;
pub mod corruption;
pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use cleaner::{Cleaner, clean};
pub use corruption::{GarbleDetector, is_binary, is_garbled};
pub use model::{ExtractError, ExtractionMethod, ExtractionResult};

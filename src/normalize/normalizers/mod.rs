// Base trait and utilities for dataset-specific normalizers
pub mod base;

// Individual normalizer implementations
pub mod arctic_ice;
pub mod greenhouse;
pub mod temperature;

// Re-export the main components
pub use arctic_ice::ArcticIceNormalizer;
pub use base::{DatasetNormalizer, NormalizerUtils};
pub use greenhouse::GreenhouseGasNormalizer;
pub use temperature::TemperatureNormalizer;

pub mod generation;

pub use generation::{ApiResponse, GenerationRequest, GenerationResult, DESCRIPTION_REQUIRED};

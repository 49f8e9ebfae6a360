//! Input types shared by the engine and the HTTP adapter.

pub mod interaction;

pub use interaction::{AnalysisOptions, AnalysisRequest, Interaction};

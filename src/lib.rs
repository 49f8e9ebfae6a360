//! # Resonance
//!
//! Heuristic quality scoring for a single human-AI exchange.
//!
//! One user prompt and one AI response are scored on six dimensions (input
//! alignment, conceptual anchoring, process alignment, synchronization,
//! cognitive progression and cognitive safety), the prompt is classified into
//! an intent archetype, and everything is folded into a single Resonance
//! Index in [0, 1].
//!
//! ```
//! use resonance::{AnalysisOptions, Interaction, ResonanceEngine};
//!
//! let engine = ResonanceEngine::new();
//! let result = engine.analyze(
//!     &Interaction::new("What is a mutex?", "Think of it as a bathroom key."),
//!     &AnalysisOptions::default(),
//! );
//! assert!((0.0..=1.0).contains(&result.resonance_index));
//! ```

pub mod aggregate;
pub mod alignment;
pub mod config;
pub mod dimensions;
pub mod engine;
pub mod error;
pub mod features;
pub mod intent;
pub mod report;
pub mod server;
pub mod types;

pub use alignment::AlignmentResult;
pub use dimensions::{Dimension, DimensionScore, DimensionScores};
pub use engine::ResonanceEngine;
pub use error::{EngineError, EngineResult};
pub use intent::{Archetype, IntentResult};
pub use report::{AnalysisReport, AnalysisResult};
pub use types::{AnalysisOptions, AnalysisRequest, Interaction};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Analyzer module: one submodule per group of analysis passes.

pub mod audit_analysis;
pub mod clustering;
pub mod forecast;
pub mod prioritizer;
pub mod recommendations;
pub mod site_indicators;
pub mod statistics;

// Re-export the main Analyzer implementation for ease of use.
pub use audit_analysis::{Analyzer, AnalyzerImpl};
pub use forecast::GaussianNoise;

pub mod batching;
pub mod bridge;
pub mod engine;
pub mod evaluators;
pub mod operators;
pub mod population;
pub mod reporting;
pub mod traits;
pub mod types;

pub use engine::EvolutionEngine;
pub use evaluators::{EmbeddingF1Scorer, FitnessEvaluator};
pub use population::{build_initial_population, fill_generated_data};
pub use reporting::{check_stagnation, fitness_stats, FitnessStats, MemoryMetricsLog};
pub use traits::{MetricsSink, SimilarityScorer};
pub use types::{Genes, Individual};

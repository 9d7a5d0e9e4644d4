pub mod coherence;
pub mod diversity;
pub mod fitness;

pub use coherence::EmbeddingF1Scorer;
pub use fitness::FitnessEvaluator;

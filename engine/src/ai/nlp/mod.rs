pub mod embeddings;

pub use embeddings::EmbeddingEngine;

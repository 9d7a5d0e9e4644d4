// FICHIER : engine/src/experiment/mod.rs

// Répertoire d'exécution, corpus, journal CSV et instantanés JSON.

pub mod corpus;
pub mod runner;
pub mod saving;
pub mod setup;

pub use runner::{run_experiment, RunSummary};
pub use saving::{save_population, CsvMetricsLog};
pub use setup::{setup_experiment, ExperimentSetup, ReferenceSource};

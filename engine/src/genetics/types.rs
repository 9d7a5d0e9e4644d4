// FICHIER : engine/src/genetics/types.rs

use crate::utils::prelude::*;
use std::cmp::Ordering;

/// Un individu : persona, thème, consigne, texte produit et fitness.
/// Les noms de champs sont ceux des instantanés JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub role: String,
    pub topic: String,
    pub prompt: String,
    #[serde(default)]
    pub generated_data: Option<String>,
    #[serde(default)]
    pub fitness: f64,
}

impl Individual {
    /// Individu non évalué : pas de texte, fitness à 0.
    pub fn new(role: impl Into<String>, topic: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            topic: topic.into(),
            prompt: prompt.into(),
            generated_data: None,
            fitness: 0.0,
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.generated_data = Some(data.into());
        self
    }

    pub fn genes(&self) -> Genes {
        Genes {
            role: self.role.clone(),
            topic: self.topic.clone(),
        }
    }

    /// Texte évalué ; absent vaut texte vide.
    pub fn text(&self) -> &str {
        self.generated_data.as_deref().unwrap_or("")
    }

    pub fn has_data(&self) -> bool {
        self.generated_data
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// La paire évolutive transmise entre opérateurs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genes {
    pub role: String,
    pub topic: String,
}

impl Genes {
    pub fn new(role: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            topic: topic.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.role.trim().is_empty() && !self.topic.trim().is_empty()
    }
}

/// Tri décroissant par fitness (stable : l'ordre d'origine départage les égalités).
pub fn sort_by_fitness_desc(population: &mut [Individual]) {
    population.sort_by(|a, b| {
        b.fitness
            .partial_cmp(&a.fitness)
            .unwrap_or(Ordering::Equal)
    });
}

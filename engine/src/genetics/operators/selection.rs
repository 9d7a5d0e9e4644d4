// FICHIER : engine/src/genetics/operators/selection.rs

use crate::genetics::types::Individual;
use rand::seq::index;
use rand::Rng;

/// Tournoi de taille k : k individus distincts tirés sans remise,
/// le plus fit l'emporte. k est borné à la taille de la population.
pub fn tournament_select<'a, R: Rng + ?Sized>(
    population: &'a [Individual],
    k: usize,
    rng: &mut R,
) -> Option<&'a Individual> {
    if population.is_empty() {
        return None;
    }
    let k = k.clamp(1, population.len());

    index::sample(rng, population.len(), k)
        .iter()
        .map(|idx| &population[idx])
        .reduce(|best, challenger| {
            if challenger.fitness > best.fitness {
                challenger
            } else {
                best
            }
        })
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(values: &[f64]) -> Vec<Individual> {
        values
            .iter()
            .enumerate()
            .map(|(i, &f)| Individual {
                fitness: f,
                ..Individual::new(format!("role-{}", i), "t", "p")
            })
            .collect()
    }

    #[test]
    fn test_full_tournament_returns_global_max() {
        let pop = population(&[0.1, 0.7, 0.3, 0.9, 0.5]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let winner = tournament_select(&pop, pop.len(), &mut rng).unwrap();
            assert_eq!(winner.fitness, 0.9);
        }
    }

    #[test]
    fn test_oversized_k_is_clamped() {
        let pop = population(&[0.2, 0.4]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(tournament_select(&pop, 10, &mut rng).unwrap().fitness, 0.4);
    }

    #[test]
    fn test_empty_population() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(tournament_select(&[], 3, &mut rng).is_none());
    }

    #[test]
    fn test_tournament_pressure() {
        let pop = population(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut top_half = 0;
        for _ in 0..200 {
            if tournament_select(&pop, 3, &mut rng).unwrap().fitness > 0.5 {
                top_half += 1;
            }
        }
        // P(max des 3 dans la moitié haute) = 1 - C(5,3)/C(10,3) ≈ 0.92
        assert!(top_half > 150);
    }
}

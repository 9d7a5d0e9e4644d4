// FICHIER : engine/tests/evolution_suite/engine_flow_test.rs

use crate::common::{
    evaluated_population, evolution_config, fixed_evaluator, init_test_logging, scripted, REFERENCE,
};
use evoprompt::ai::llm::mock::OperatorKind;
use evoprompt::genetics::{EvolutionEngine, MemoryMetricsLog};
use evoprompt::utils::config::EvolutionConfig;

#[tokio::test]
async fn test_one_generation_elite_and_crossover_children() {
    init_test_logging();
    let llm = scripted();
    let config = EvolutionConfig {
        prob_crossover: 1.0,
        prob_mutation: 0.0,
        ..evolution_config(4, 1, 1)
    };
    let mut engine = EvolutionEngine::new(llm.clone(), fixed_evaluator(0.5), config).unwrap();
    let mut sink = MemoryMetricsLog::default();

    let initial = evaluated_population(&[0.2, 0.7, 0.1, 0.4]);
    let best = initial[1].clone();

    let out = engine.run(initial, REFERENCE, &mut sink).await.unwrap();

    assert_eq!(out.len(), 4);
    // L'élite passe en tête, gènes et texte intacts.
    assert_eq!(out[0].genes(), best.genes());
    assert_eq!(out[0].prompt, best.prompt);
    assert_eq!(out[0].generated_data, best.generated_data);

    // Les enfants portent des gènes issus d'un croisement.
    let produced = llm.crossover_outputs();
    for child in &out[1..] {
        assert!(produced.contains(&(child.role.clone(), child.topic.clone())));
        assert!(child.prompt.starts_with("regenerated-"));
        assert!(child.has_data());
    }
    assert_eq!(llm.calls(OperatorKind::Mutation), 0);
    assert_eq!(sink.rows.len(), 1);
    assert_eq!(sink.rows[0].0, 1);
    assert!(out.iter().all(|i| (0.0..=1.0).contains(&i.fitness)));
}

#[tokio::test]
async fn test_stagnation_switches_mutation_to_explore() {
    init_test_logging();
    let llm = scripted();
    let config = EvolutionConfig {
        prob_crossover: 0.0,
        prob_mutation: 1.0,
        stagnation_window: 2,
        ..evolution_config(3, 2, 1)
    };
    let mut engine = EvolutionEngine::new(llm.clone(), fixed_evaluator(0.1), config).unwrap();
    let mut sink = MemoryMetricsLog::default();

    // Moyenne initiale élevée : la génération 1 ne peut pas l'améliorer.
    engine
        .run(evaluated_population(&[0.9, 0.9, 0.9]), REFERENCE, &mut sink)
        .await
        .unwrap();

    let flags = llm.mutation_explore_flags();
    assert_eq!(flags.len(), 4);
    assert!(flags[..2].iter().all(|explore| !explore));
    assert!(flags[2..].iter().all(|explore| *explore));
    assert_eq!(engine.history().len(), 3);
}

#[tokio::test]
async fn test_flaky_service_still_fills_every_generation() {
    init_test_logging();
    let llm = std::sync::Arc::new(
        evoprompt::ai::llm::mock::ScriptedLlm::new()
            .with_failure_every(11)
            .with_panic_every(13),
    );
    let mut engine = EvolutionEngine::new(llm, fixed_evaluator(0.5), evolution_config(5, 2, 1)).unwrap();
    let mut sink = MemoryMetricsLog::default();

    let out = engine
        .run(evaluated_population(&[0.1, 0.2, 0.3, 0.4, 0.5]), REFERENCE, &mut sink)
        .await
        .unwrap();

    assert_eq!(out.len(), 5);
    assert!(sink.rows.iter().all(|(_, stats, _)| stats.count == 5));
}

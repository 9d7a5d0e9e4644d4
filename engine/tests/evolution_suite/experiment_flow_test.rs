// FICHIER : engine/tests/evolution_suite/experiment_flow_test.rs

use crate::common::{app_config, init_test_logging, scripted, REFERENCE};
use evoprompt::ai::llm::mock::ScriptedLlm;
use evoprompt::experiment::saving::{FINAL_SNAPSHOT, GEN0_SNAPSHOT, METRICS_FILE, METRICS_HEADER};
use evoprompt::experiment::setup::REFERENCE_FILE;
use evoprompt::experiment::{run_experiment, setup_experiment, ReferenceSource};
use evoprompt::genetics::bridge::{read_final_max_fitness, tuning_cost};
use evoprompt::genetics::evaluators::coherence::test_mocks::{FixedScorer, OverlapScorer};
use evoprompt::genetics::Individual;
use evoprompt::utils::{AppError, Arc};
use rand::rngs::StdRng;
use rand::SeedableRng;

async fn prepared_setup(dir: &std::path::Path) -> evoprompt::experiment::ExperimentSetup {
    let instance = dir.join("instance.txt");
    std::fs::write(&instance, format!("{}\n", REFERENCE)).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    setup_experiment(&dir.join("exec"), &ReferenceSource::File(instance), &mut rng)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_run_writes_metrics_and_snapshots() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let setup = prepared_setup(dir.path()).await;
    let output_dir = setup.output_dir.clone();

    let summary = run_experiment(&app_config(4, 2), scripted(), Arc::new(OverlapScorer), setup)
        .await
        .unwrap();

    assert_eq!(summary.output_dir, output_dir);
    assert_eq!(summary.final_stats.count, 4);
    assert!(summary.best.is_some());

    let reference = std::fs::read_to_string(output_dir.join(REFERENCE_FILE)).unwrap();
    assert_eq!(reference, REFERENCE);

    let csv = std::fs::read_to_string(output_dir.join(METRICS_FILE)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], METRICS_HEADER);
    assert_eq!(lines.len(), 1 + 3);
    for (g, line) in lines[1..].iter().enumerate() {
        assert!(line.starts_with(&format!("{},4,", g)));
    }

    for snapshot in [GEN0_SNAPSHOT, FINAL_SNAPSHOT] {
        let raw = std::fs::read_to_string(output_dir.join(snapshot)).unwrap();
        let population: Vec<Individual> = serde_json::from_str(&raw).unwrap();
        assert_eq!(population.len(), 4);
        assert!(population.iter().all(Individual::has_data));
    }

    let max = read_final_max_fitness(&output_dir.join(METRICS_FILE)).await.unwrap();
    assert!((0.0..=1.0).contains(&max));
    assert!((tuning_cost(max) - (1.0 - max)).abs() < 1e-12);
}

#[tokio::test]
async fn test_unavailable_service_aborts_before_snapshots() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let setup = prepared_setup(dir.path()).await;
    let output_dir = setup.output_dir.clone();

    let res = run_experiment(
        &app_config(4, 1),
        Arc::new(ScriptedLlm::always_failing()),
        Arc::new(FixedScorer(0.5)),
        setup,
    )
    .await;

    assert!(matches!(res, Err(AppError::Ai(_))));
    assert!(!output_dir.join(GEN0_SNAPSHOT).exists());
    assert!(!output_dir.join(METRICS_FILE).exists());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let setup = prepared_setup(dir.path()).await;
    let mut config = app_config(2, 1);
    config.evolution.elite_size = 2;

    let res = run_experiment(&config, scripted(), Arc::new(FixedScorer(0.5)), setup).await;
    assert!(matches!(res, Err(AppError::Config(_))));
}

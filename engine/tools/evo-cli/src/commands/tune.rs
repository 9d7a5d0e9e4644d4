// FICHIER : engine/tools/evo-cli/src/commands/tune.rs

use super::evolve::{self, EvolveArgs};
use clap::Args;
use evoprompt::experiment::saving::METRICS_FILE;
use evoprompt::genetics::bridge::{read_final_max_fitness, tuning_cost, TuningParameters};
use evoprompt::utils::io::PathBuf;
use evoprompt::utils::prelude::*;

/// Appelé par le tuner : seule la ligne du coût est écrite sur stdout.
#[derive(Args, Clone, Debug)]
pub struct TuneArgs {
    /// Fichier d'instance, utilisé comme texte de référence
    pub instance: PathBuf,

    #[arg(long)]
    pub n: usize,

    #[arg(long)]
    pub generations: usize,

    #[arg(long)]
    pub prob_mutation: f64,

    #[arg(long)]
    pub prob_crossover: f64,

    /// Taille du tournoi en fraction de n
    #[arg(long)]
    pub k_perc: f64,

    /// Élite en fraction de n
    #[arg(long)]
    pub elit_perc: f64,

    #[arg(long, default_value = "exec")]
    pub outdir_base: PathBuf,

    #[arg(long, env = "EVO_CONFIG")]
    pub config: Option<PathBuf>,
}

impl TuneArgs {
    pub fn parameters(&self) -> TuningParameters {
        TuningParameters {
            n: self.n,
            generations: self.generations,
            prob_mutation: self.prob_mutation,
            prob_crossover: self.prob_crossover,
            k_perc: self.k_perc,
            elit_perc: self.elit_perc,
        }
    }

    /// Paramètres du tuner traduits en exécution `evolve`.
    pub fn to_evolve_args(&self) -> EvolveArgs {
        let params = self.parameters();
        EvolveArgs {
            n: Some(params.n),
            generations: Some(params.generations),
            k: Some(params.tournament_size()),
            elite_size: Some(params.elite_size()),
            prob_crossover: Some(params.prob_crossover),
            prob_mutation: Some(params.prob_mutation),
            outdir_base: self.outdir_base.clone(),
            reference_text: Some(self.instance.clone()),
            config: self.config.clone(),
            ..EvolveArgs::default()
        }
    }
}

pub async fn handle(args: TuneArgs) -> Result<()> {
    let evolve_args = args.to_evolve_args();
    debug!("Paramètres traduits : {:?}", evolve_args);

    let summary = evolve::run(&evolve_args).await?;
    let max_fitness = read_final_max_fitness(&summary.output_dir.join(METRICS_FILE)).await?;

    println!("{:.6}", tuning_cost(max_fitness));
    Ok(())
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_to_evolve() {
        let args = TuneArgs {
            instance: PathBuf::from("instances/text_01.txt"),
            n: 20,
            generations: 4,
            prob_mutation: 0.2,
            prob_crossover: 0.7,
            k_perc: 0.25,
            elit_perc: 0.02,
            outdir_base: PathBuf::from("exec_tune"),
            config: None,
        };
        let evolve = args.to_evolve_args();

        assert_eq!(evolve.n, Some(20));
        assert_eq!(evolve.k, Some(5));
        assert_eq!(evolve.elite_size, Some(1));
        assert_eq!(evolve.reference_text, Some(PathBuf::from("instances/text_01.txt")));
        assert_eq!(evolve.outdir_base, PathBuf::from("exec_tune"));
    }
}

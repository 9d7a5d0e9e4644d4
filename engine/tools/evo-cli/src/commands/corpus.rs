// FICHIER : engine/tools/evo-cli/src/commands/corpus.rs

use clap::Args;
use evoprompt::experiment::corpus::{prepare_corpus, DEFAULT_CORPUS, DEFAULT_MIN_WORDS};
use evoprompt::utils::context::init_logging;
use evoprompt::utils::io::PathBuf;
use evoprompt::utils::prelude::*;
use evoprompt::{user_info, user_success};

#[derive(Args, Clone, Debug)]
pub struct CorpusArgs {
    /// Corpus brut (CSV sans en-tête, texte en première colonne)
    #[arg(long, default_value = "data/corpus.csv")]
    pub input: PathBuf,

    #[arg(long, default_value = DEFAULT_CORPUS)]
    pub output: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MIN_WORDS)]
    pub min_words: usize,
}

pub async fn handle(args: CorpusArgs) -> Result<()> {
    init_logging(None);
    user_info!(
        "CORPUS_START",
        "Filtrage de {} (minimum : {} mots)",
        args.input.display(),
        args.min_words
    );

    let (read, kept) = prepare_corpus(&args.input, &args.output, args.min_words).await?;

    user_success!(
        "CORPUS_DONE",
        "{} lignes lues, {} gardées, écrites dans {}",
        read,
        kept,
        args.output.display()
    );
    Ok(())
}

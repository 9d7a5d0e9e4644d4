// FICHIER : engine/src/experiment/corpus.rs

//! Corpus de textes de référence : CSV sans en-tête, texte dans la première colonne.

use crate::utils::fs::{self, Path};
use crate::utils::prelude::*;
use rand::seq::IndexedRandom;
use rand::Rng;

pub const DEFAULT_CORPUS: &str = "data/filtered_corpus.csv";
pub const FALLBACK_CORPUS: &str = "data/example_corpus.csv";
pub const DEFAULT_MIN_WORDS: usize = 5;

/// Découpe un contenu CSV (RFC 4180) en enregistrements.
/// Les champs entre guillemets peuvent contenir virgules, `""` et sauts de ligne.
pub fn parse_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// Premier champ de chaque ligne, en ignorant les lignes vides.
pub fn first_fields(content: &str) -> Vec<String> {
    parse_records(content)
        .into_iter()
        .filter_map(|r| r.into_iter().next())
        .filter(|f| !f.trim().is_empty())
        .collect()
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_record(record: &[String]) -> String {
    let mut line = record.iter().map(|f| quote_field(f)).collect::<Vec<_>>().join(",");
    line.push_str("\r\n");
    line
}

/// Tire une ligne au hasard dans le corpus.
pub async fn load_random_reference<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<String> {
    let content = fs::read_to_string(path).await?;
    let lines = first_fields(&content);
    let chosen = lines
        .choose(rng)
        .ok_or_else(|| AppError::Corpus(format!("aucune ligne exploitable dans {}", path.display())))?;
    debug!("Référence tirée parmi {} lignes de {}", lines.len(), path.display());
    Ok(chosen.clone())
}

/// Filtre un corpus brut : garde les lignes dont le texte compte au moins
/// `min_words` mots. Renvoie (lignes lues, lignes gardées).
#[instrument(skip_all, fields(input = ?input, min_words = min_words))]
pub async fn prepare_corpus(input: &Path, output: &Path, min_words: usize) -> Result<(usize, usize)> {
    let content = fs::read_to_string(input).await?;
    let records = parse_records(&content);

    let mut out = String::new();
    let mut kept = 0usize;
    for record in &records {
        let words = record
            .first()
            .map(|text| text.split_whitespace().count())
            .unwrap_or(0);
        if words >= min_words {
            out.push_str(&write_record(record));
            kept += 1;
        }
    }

    fs::write_atomic(output, out.as_bytes()).await?;
    info!("Corpus filtré : {} lignes lues, {} gardées (>= {} mots)", records.len(), kept, min_words);
    Ok((records.len(), kept))
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_quoted_fields() {
        let content = "plain,x\n\"with, comma\",y\r\n\"multi\nline \"\"quoted\"\"\"\n";
        let records = parse_records(content);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], vec!["plain", "x"]);
        assert_eq!(records[1][0], "with, comma");
        assert_eq!(records[2][0], "multi\nline \"quoted\"");
    }

    #[test]
    fn test_first_fields_skip_blank_rows() {
        let fields = first_fields("one\n\n  \n,second column only\ntwo");
        assert_eq!(fields, vec!["one", "two"]);
    }

    #[test]
    fn test_write_record_quotes_when_needed() {
        let rec = vec!["a, b".to_string(), "say \"hi\"".to_string(), "c".to_string()];
        assert_eq!(write_record(&rec), "\"a, b\",\"say \"\"hi\"\"\",c\r\n");
        assert_eq!(parse_records(&write_record(&rec))[0], rec);
    }

    #[tokio::test]
    async fn test_random_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.csv");
        std::fs::write(&path, "first tweet\nsecond tweet\n").unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let text = load_random_reference(&path, &mut rng).await.unwrap();
        assert!(text == "first tweet" || text == "second tweet");

        std::fs::write(&path, "\n\n").unwrap();
        assert!(matches!(
            load_random_reference(&path, &mut rng).await,
            Err(AppError::Corpus(_))
        ));
        assert!(matches!(
            load_random_reference(&dir.path().join("absent.csv"), &mut rng).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_prepare_corpus_counts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("corpus.csv");
        let output = dir.path().join("filtered_corpus.csv");
        std::fs::write(
            &input,
            "too short\n\"this one, however, has enough words\"\none two three four five\n",
        )
        .unwrap();

        let (read, kept) = prepare_corpus(&input, &output, 5).await.unwrap();
        assert_eq!((read, kept), (3, 2));

        let filtered = first_fields(&std::fs::read_to_string(&output).unwrap());
        assert_eq!(filtered, vec!["this one, however, has enough words", "one two three four five"]);
    }
}

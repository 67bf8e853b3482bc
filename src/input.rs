//! Input sources for product codes: CSV files, CLI arguments, and an
//! interactive prompt.

use crate::ean::Ean;
use std::io::BufRead;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// A problem with an input source as a whole. Individual bad records are
/// skipped with a diagnostic instead of raising this.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read input file '{path}': {source}")]
    Unreadable { path: String, source: csv::Error },
}

/// Reads product codes from the first column of a CSV file.
///
/// At most `limit` rows are read. Rows whose first field is not a valid
/// code are skipped with a warning, so a header row costs one row of the
/// cap but never poisons the batch.
pub fn codes_from_csv(path: &Path, limit: usize) -> Result<Vec<Ean>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| InputError::Unreadable { path: path.display().to_string(), source })?;

    let mut codes = Vec::new();

    for record in reader.records().take(limit) {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!("Skipping unreadable row: {}", err);
                continue;
            }
        };

        let Some(field) = record.get(0) else {
            continue;
        };

        let candidate = field.trim();
        if candidate.is_empty() {
            continue;
        }

        match Ean::parse(candidate) {
            Ok(ean) => codes.push(ean),
            Err(err) => warn!("Skipping invalid code: {}", err),
        }
    }

    Ok(codes)
}

/// Validates codes passed directly on the command line. Invalid entries are
/// skipped with a warning.
pub fn codes_from_args(raw: &[String]) -> Vec<Ean> {
    let mut codes = Vec::new();

    for candidate in raw {
        match Ean::parse(candidate.trim()) {
            Ok(ean) => codes.push(ean),
            Err(err) => warn!("Skipping invalid code: {}", err),
        }
    }

    codes
}

/// Collects codes interactively, one per line, until `done` (any case),
/// end of input, or the code limit. Prompts and diagnostics go to stderr
/// so piped stdout stays clean.
pub fn read_codes_interactive(mut input: impl BufRead, limit: usize) -> Vec<Ean> {
    let mut codes = Vec::new();

    eprintln!("Enter EAN codes one per line. Type 'done' to start the comparison.");

    loop {
        if codes.len() >= limit {
            eprintln!("Reached the limit of {} codes.", limit);
            break;
        }

        eprint!("> ");

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break, // End of input behaves like done
            Ok(_) => {}
            Err(err) => {
                warn!("Failed to read input line: {}", err);
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("done") {
            break;
        }

        match Ean::parse(trimmed) {
            Ok(ean) => {
                eprintln!("Added {}", ean);
                codes.push(ean);
            }
            Err(err) => eprintln!("{}", err),
        }
    }

    codes
}

//! Compare command implementation.

use crate::config::Config;
use crate::ean::Ean;
use crate::engine;
use crate::format::Formatter;
use crate::stores::{Store, StoreClient, StoreFetch};
use anyhow::{Context, Result};
use tracing::info;

/// Executes a price comparison for a batch of codes.
pub struct CompareCommand {
    config: Config,
}

impl CompareCommand {
    /// Creates a new compare command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the comparison and returns formatted output.
    pub async fn execute(&self, eans: &[Ean]) -> Result<String> {
        let client =
            StoreClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, eans).await
    }

    /// Executes the comparison with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl StoreFetch,
        eans: &[Ean],
    ) -> Result<String> {
        anyhow::ensure!(!eans.is_empty(), "No valid codes to compare");

        info!("Comparing {} codes across {} stores", eans.len(), Store::all().len());

        let comparisons = engine::compare_many(client, eans).await;

        let found = comparisons.iter().filter(|c| c.has_any_price()).count();
        let quotes: usize = comparisons.iter().map(|c| c.count_found()).sum();
        info!(
            "Found prices for {} of {} codes ({} store quotes)",
            found,
            comparisons.len(),
            quotes
        );

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_comparisons(&comparisons))
    }
}

//! Stores listing command implementation.

use crate::config::{Config, OutputFormat};
use crate::stores::Store;

/// Lists the registered stores.
pub struct StoresCommand {
    config: Config,
}

impl StoresCommand {
    /// Creates a new stores command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the formatted store registry.
    pub fn execute(&self) -> String {
        match self.config.format {
            OutputFormat::Json => self.json(),
            _ => self.table(),
        }
    }

    fn json(&self) -> String {
        let entries: Vec<_> = Store::all()
            .iter()
            .map(|store| {
                serde_json::json!({
                    "id": store.id(),
                    "name": store.display_name(),
                    "base_url": store.base_url(),
                })
            })
            .collect();

        serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    fn table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("{:<12} {:<16} {}", "ID", "Name", "Base URL"));
        for store in Store::all() {
            lines.push(format!(
                "{:<12} {:<16} {}",
                store.id(),
                store.display_name(),
                store.base_url()
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(format: OutputFormat) -> Config {
        Config { format, ..Config::default() }
    }

    #[test]
    fn test_stores_table() {
        let output = StoresCommand::new(make_config(OutputFormat::Table)).execute();

        assert!(output.contains("ID"));
        assert!(output.contains("supernova"));
        assert!(output.contains("carrefour"));
        assert!(output.contains("queiroz"));
        assert!(output.contains("https://mercado.carrefour.com.br"));
    }

    #[test]
    fn test_stores_json() {
        let output = StoresCommand::new(make_config(OutputFormat::Json)).execute();

        assert!(output.starts_with('['));
        assert!(output.contains("\"id\""));
        assert!(output.contains("Lojas Queiroz"));
        assert!(output.contains("https://www.supernovaera.com.br"));
    }

    #[test]
    fn test_stores_lists_every_store() {
        let output = StoresCommand::new(make_config(OutputFormat::Table)).execute();

        for store in Store::all() {
            assert!(output.contains(store.id()));
        }
    }
}

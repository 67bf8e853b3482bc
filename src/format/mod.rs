//! Output formatting for comparisons (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::stores::{Comparison, Store};

/// Formats comparisons for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single comparison.
    pub fn format_comparison(&self, comparison: &Comparison) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(comparison),
            OutputFormat::Table => self.table_single(comparison),
            OutputFormat::Markdown => self.markdown_single(comparison),
            OutputFormat::Csv => self.csv_comparisons(std::slice::from_ref(comparison)),
        }
    }

    /// Formats a batch of comparisons.
    pub fn format_comparisons(&self, comparisons: &[Comparison]) -> String {
        if comparisons.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No results.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_comparisons(comparisons),
            OutputFormat::Table => self.table_comparisons(comparisons),
            OutputFormat::Markdown => self.markdown_comparisons(comparisons),
            OutputFormat::Csv => self.csv_comparisons(comparisons),
        }
    }

    // JSON formatting

    fn json_single(&self, comparison: &Comparison) -> String {
        serde_json::to_string_pretty(comparison).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_comparisons(&self, comparisons: &[Comparison]) -> String {
        serde_json::to_string_pretty(comparisons).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, comparison: &Comparison) -> String {
        let mut lines = Vec::new();

        lines.push("=".repeat(40));
        lines.push(format!("PRICE SUMMARY - EAN: {}", comparison.ean));
        lines.push("=".repeat(40));

        let prices = comparison
            .quotes
            .iter()
            .map(|quote| {
                let price = match quote.price {
                    Some(price) => format!("R$ {:.2}", price),
                    None => "None Found".to_string(),
                };
                format!("{}: {}", quote.store.display_name(), price)
            })
            .collect::<Vec<_>>()
            .join(" | ");
        lines.push(format!("Prices: {}", prices));

        match &comparison.best {
            Some(best) => lines.push(format!(
                ">>> LOWEST: {} (R$ {:.2})",
                best.store.display_name(),
                best.price
            )),
            None => lines.push(">>> LOWEST: N/A".to_string()),
        }

        lines.join("\n")
    }

    fn table_comparisons(&self, comparisons: &[Comparison]) -> String {
        let mut blocks =
            comparisons.iter().map(|c| self.table_single(c)).collect::<Vec<_>>();

        blocks.push(format!("Total: {} codes", comparisons.len()));
        blocks.join("\n\n")
    }

    // Markdown formatting

    fn markdown_single(&self, comparison: &Comparison) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## EAN {}", comparison.ean));
        lines.push(String::new());

        for quote in &comparison.quotes {
            let price = match quote.price {
                Some(price) => format!("R$ {:.2}", price),
                None => "None Found".to_string(),
            };
            lines.push(format!("- **{}:** {}", quote.store.display_name(), price));
        }

        match &comparison.best {
            Some(best) => lines.push(format!(
                "- **Lowest:** {} (R$ {:.2})",
                best.store.display_name(),
                best.price
            )),
            None => lines.push("- **Lowest:** N/A".to_string()),
        }

        lines.join("\n")
    }

    fn markdown_comparisons(&self, comparisons: &[Comparison]) -> String {
        let mut lines = Vec::new();

        let mut header = String::from("| EAN |");
        let mut separator = String::from("|-----|");
        for store in Store::all() {
            header.push_str(&format!(" {} |", store.display_name()));
            separator.push_str("------|");
        }
        header.push_str(" Best |");
        separator.push_str("------|");

        lines.push(header);
        lines.push(separator);

        for comparison in comparisons {
            let mut row = format!("| {} |", comparison.ean);
            for &store in Store::all() {
                let cell = match comparison.price_at(store) {
                    Some(price) => format!("{:.2}", price),
                    None => "N/A".to_string(),
                };
                row.push_str(&format!(" {} |", cell));
            }
            let best = match &comparison.best {
                Some(best) => format!("{} ({:.2})", best.store.display_name(), best.price),
                None => "N/A".to_string(),
            };
            row.push_str(&format!(" {} |", best));
            lines.push(row);
        }

        lines.push(String::new());
        lines.push(format!("*{} codes compared*", comparisons.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        let stores = Store::all().iter().map(|s| s.id()).collect::<Vec<_>>().join(",");
        format!("ean,{},best_store,best_price", stores)
    }

    fn csv_comparisons(&self, comparisons: &[Comparison]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for comparison in comparisons {
            let mut fields = vec![comparison.ean.to_string()];

            for &store in Store::all() {
                let cell = comparison
                    .price_at(store)
                    .map(|price| format!("{:.2}", price))
                    .unwrap_or_default();
                fields.push(cell);
            }

            match &comparison.best {
                Some(best) => {
                    fields.push(best.store.id().to_string());
                    fields.push(format!("{:.2}", best.price));
                }
                None => {
                    fields.push(String::new());
                    fields.push(String::new());
                }
            }

            lines.push(fields.join(","));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ean::Ean;
    use crate::stores::Quote;

    fn ean() -> Ean {
        Ean::parse("7891234567895").unwrap()
    }

    fn make_comparison() -> Comparison {
        Comparison::new(
            ean(),
            vec![
                Quote::found(Store::Supernova, 15.9),
                Quote::found(Store::Carrefour, 14.5),
                Quote::found(Store::Queiroz, 7.49),
            ],
        )
    }

    fn make_partial_comparison() -> Comparison {
        Comparison::new(
            ean(),
            vec![
                Quote::missing(Store::Supernova),
                Quote::found(Store::Carrefour, 22.0),
                Quote::missing(Store::Queiroz),
            ],
        )
    }

    fn make_empty_comparison() -> Comparison {
        let quotes = Store::all().iter().map(|&s| Quote::missing(s)).collect();
        Comparison::new(ean(), quotes)
    }

    // JSON format tests

    #[test]
    fn test_json_single() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_comparison(&make_comparison());

        assert!(output.contains("7891234567895"));
        assert!(output.contains("queiroz"));
        assert!(output.contains("7.49"));
        assert!(output.contains("\"best\""));
    }

    #[test]
    fn test_json_multiple() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_comparisons(&[make_comparison(), make_partial_comparison()]);

        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
        assert!(output.contains("supernova"));
    }

    #[test]
    fn test_json_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_comparisons(&[]), "[]");
    }

    // Table format tests

    #[test]
    fn test_table_single() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_comparison(&make_comparison());

        assert!(output.contains("PRICE SUMMARY - EAN: 7891234567895"));
        assert!(output.contains("Supernova Era: R$ 15.90"));
        assert!(output.contains("Carrefour: R$ 14.50"));
        assert!(output.contains("Lojas Queiroz: R$ 7.49"));
        assert!(output.contains(">>> LOWEST: Lojas Queiroz (R$ 7.49)"));
    }

    #[test]
    fn test_table_single_partial() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_comparison(&make_partial_comparison());

        assert!(output.contains("Supernova Era: None Found"));
        assert!(output.contains("Carrefour: R$ 22.00"));
        assert!(output.contains(">>> LOWEST: Carrefour (R$ 22.00)"));
    }

    #[test]
    fn test_table_single_no_prices() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_comparison(&make_empty_comparison());

        assert!(output.contains("None Found"));
        assert!(output.contains(">>> LOWEST: N/A"));
    }

    #[test]
    fn test_table_multiple() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_comparisons(&[make_comparison(), make_partial_comparison()]);

        assert_eq!(output.matches("PRICE SUMMARY").count(), 2);
        assert!(output.contains("Total: 2 codes"));
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_comparisons(&[]), "No results.");
    }

    // Markdown format tests

    #[test]
    fn test_markdown_single() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_comparison(&make_comparison());

        assert!(output.contains("## EAN 7891234567895"));
        assert!(output.contains("- **Supernova Era:** R$ 15.90"));
        assert!(output.contains("- **Lojas Queiroz:** R$ 7.49"));
        assert!(output.contains("- **Lowest:** Lojas Queiroz (R$ 7.49)"));
    }

    #[test]
    fn test_markdown_single_no_prices() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_comparison(&make_empty_comparison());

        assert!(output.contains("- **Supernova Era:** None Found"));
        assert!(output.contains("- **Lowest:** N/A"));
    }

    #[test]
    fn test_markdown_multiple() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_comparisons(&[make_comparison(), make_partial_comparison()]);

        assert!(output.contains("| EAN | Supernova Era | Carrefour | Lojas Queiroz | Best |"));
        assert!(output.contains("| 7891234567895 | 15.90 | 14.50 | 7.49 | Lojas Queiroz (7.49) |"));
        assert!(output.contains("| 7891234567895 | N/A | 22.00 | N/A | Carrefour (22.00) |"));
        assert!(output.contains("*2 codes compared*"));
    }

    #[test]
    fn test_markdown_empty() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        assert_eq!(formatter.format_comparisons(&[]), "No results.");
    }

    // CSV format tests

    #[test]
    fn test_csv_header() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(
            formatter.csv_header(),
            "ean,supernova,carrefour,queiroz,best_store,best_price"
        );
    }

    #[test]
    fn test_csv_single() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_comparison(&make_comparison());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ean,"));
        assert_eq!(lines[1], "7891234567895,15.90,14.50,7.49,queiroz,7.49");
    }

    #[test]
    fn test_csv_missing_prices_are_empty_fields() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_comparisons(&[make_partial_comparison()]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "7891234567895,,22.00,,carrefour,22.00");
    }

    #[test]
    fn test_csv_no_prices() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_comparisons(&[make_empty_comparison()]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "7891234567895,,,,,");
    }

    #[test]
    fn test_csv_empty() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(
            formatter.format_comparisons(&[]),
            "ean,supernova,carrefour,queiroz,best_store,best_price"
        );
    }

    // Edge case tests

    #[test]
    fn test_all_formats_produce_output() {
        let comparisons = vec![make_comparison(), make_empty_comparison()];

        let json = Formatter::new(OutputFormat::Json).format_comparisons(&comparisons);
        let table = Formatter::new(OutputFormat::Table).format_comparisons(&comparisons);
        let md = Formatter::new(OutputFormat::Markdown).format_comparisons(&comparisons);
        let csv = Formatter::new(OutputFormat::Csv).format_comparisons(&comparisons);

        assert!(!json.is_empty());
        assert!(!table.is_empty());
        assert!(!md.is_empty());
        assert!(!csv.is_empty());
    }
}

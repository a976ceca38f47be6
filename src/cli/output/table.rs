//! Table output formatting for CLI commands
//!
//! Renders document listings and search hits with comfy-table.

use std::env;

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::cli::output::truncate;
use crate::domain::models::{Document, ScoredDocument};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format stored documents, one row each
    pub fn format_documents(&self, documents: &[Document]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("ID"),
            header("Title"),
            header("Content"),
            header("URL"),
            header("Created"),
        ]);

        for doc in documents {
            table.add_row(vec![
                Cell::new(doc.id),
                Cell::new(truncate(&doc.title, 40)),
                Cell::new(truncate(&single_line(&doc.content), 60)),
                Cell::new(doc.url.as_deref().unwrap_or("-")),
                Cell::new(doc.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ]);
        }

        table.to_string()
    }

    /// Format search hits with their similarity, best first
    pub fn format_search_results(&self, results: &[ScoredDocument]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("Rank"),
            header("Similarity"),
            header("ID"),
            header("Title"),
            header("Content"),
        ]);

        for (rank, hit) in results.iter().enumerate() {
            let score = format!("{:.4}", hit.similarity);
            let score_cell = if self.use_colors {
                Cell::new(score).fg(similarity_color(hit.similarity))
            } else {
                Cell::new(score)
            };

            table.add_row(vec![
                Cell::new(rank + 1),
                score_cell,
                Cell::new(hit.document.id),
                Cell::new(truncate(&hit.document.title, 40)),
                Cell::new(truncate(&single_line(&hit.document.content), 60)),
            ]);
        }

        table.to_string()
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(name: &str) -> Cell {
    Cell::new(name).add_attribute(Attribute::Bold)
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn similarity_color(similarity: f32) -> Color {
    if similarity >= 0.8 {
        Color::Green
    } else if similarity >= 0.6 {
        Color::Cyan
    } else {
        Color::Yellow
    }
}

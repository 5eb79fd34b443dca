//! CSV output format for attribution reports

/// CSV report accumulator: one row per analyzed node
#[derive(Debug, Default)]
pub struct CsvReport {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvReport {
    /// Create an empty CSV report
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header row; only the first call takes effect
    pub fn set_header(&mut self, header: Vec<String>) {
        if self.header.is_empty() {
            self.header = header;
        }
    }

    /// Add a node's row to the report
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        // If field contains comma, quote, or newline, wrap in quotes and escape quotes
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(row: &[String]) -> String {
        row.iter()
            .map(|field| Self::escape_field(field))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        if !self.header.is_empty() {
            output.push_str(&Self::format_row(&self.header));
            output.push('\n');
        }

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}

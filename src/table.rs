//! In-memory tables and their CSV / sheet representations.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

/// UTF-8 byte order mark, so spreadsheet apps pick the right encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A header row plus data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Demo table of people used by the workflow run.
    pub fn sample_people() -> Self {
        let mut table = Table::new(vec![
            "name".to_string(),
            "age".to_string(),
            "occupation".to_string(),
        ]);
        for (name, age, occupation) in [
            ("Hong Gil-dong", 25, "Developer"),
            ("Kim Cheol-su", 30, "Designer"),
            ("Lee Young-hee", 28, "Planner"),
        ] {
            table.push_row(vec![name.into(), age.into(), occupation.into()]);
        }
        table
    }

    /// Header row followed by the data rows, ready for values.update.
    pub fn to_values(&self) -> Vec<Vec<Value>> {
        let header = self.columns.iter().cloned().map(Value::String).collect();
        std::iter::once(header)
            .chain(self.rows.iter().cloned())
            .collect()
    }

    /// Write the table as BOM-prefixed UTF-8 CSV, header first.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(UTF8_BOM)?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(cell_to_field))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a CSV file, with or without BOM. Every cell comes back as a string.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut content = Vec::new();
        File::open(path)?.read_to_end(&mut content)?;
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content);

        let columns = reader.headers()?.iter().map(String::from).collect();
        let mut table = Table::new(columns);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(|f| Value::String(f.to_string())).collect());
        }
        Ok(table)
    }
}

fn cell_to_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Column-driven rendering of records into display cells.

use crate::core::date::DateFormat;
use crate::core::empty::DashOnNull;
use crate::core::phone::PhoneMask;
use crate::domain::model::{DisplayValue, Person};
use crate::domain::ports::DisplayPipe;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMask {
    Tel,
    Date,
}

impl FromStr for ColumnMask {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tel" => Ok(ColumnMask::Tel),
            "date" => Ok(ColumnMask::Date),
            other => Err(AppError::ValidationError {
                message: format!("Unknown column mask '{}', expected 'tel' or 'date'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub field: String,
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<ColumnMask>,
}

impl Column {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            mask: None,
        }
    }

    pub fn masked(mut self, mask: ColumnMask) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// Columns of the person listing.
pub fn person_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Nome"),
        Column::new("email", "E-mail"),
        Column::new("phone", "Telefone").masked(ColumnMask::Tel),
        Column::new("birthDate", "Data de nascimento").masked(ColumnMask::Date),
    ]
}

/// Anything a table can pull cell values out of by field name.
pub trait TableRow {
    fn field(&self, name: &str) -> DisplayValue;
}

impl TableRow for Person {
    fn field(&self, name: &str) -> DisplayValue {
        Person::field(self, name)
    }
}

impl TableRow for serde_json::Value {
    fn field(&self, name: &str) -> DisplayValue {
        self.get(name).map(DisplayValue::from).unwrap_or(DisplayValue::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableView {
    columns: Vec<Column>,
    phone: PhoneMask,
    date: DateFormat,
    empty: DashOnNull,
}

impl TableView {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            phone: PhoneMask,
            date: DateFormat::new(),
            empty: DashOnNull::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    fn pipe_for(&self, column: &Column) -> &dyn DisplayPipe {
        match column.mask {
            Some(ColumnMask::Tel) => &self.phone,
            Some(ColumnMask::Date) => &self.date,
            None => &self.empty,
        }
    }

    pub fn render_row<R: TableRow>(&self, row: &R) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| self.pipe_for(column).transform(&row.field(&column.field)))
            .collect()
    }

    pub fn render<R: TableRow>(&self, rows: &[R]) -> Vec<Vec<String>> {
        rows.iter().map(|row| self.render_row(row)).collect()
    }

    pub fn export<R: TableRow>(&self, rows: &[R], format: ExportFormat) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(format.delimiter())
            .from_writer(Vec::new());

        writer.write_record(self.headers())?;
        for cells in self.render(rows) {
            writer.write_record(&cells)?;
        }

        let bytes = writer.into_inner().map_err(|e| AppError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| AppError::ValidationError {
            message: format!("Exported table is not valid UTF-8: {}", e),
        })
    }

    /// Plain aligned text, one line per row, for terminals.
    pub fn to_text<R: TableRow>(&self, rows: &[R]) -> String {
        let body = self.render(rows);
        let mut widths: Vec<usize> = self.headers().iter().map(|h| h.chars().count()).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    let pad = width - cell.chars().count();
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(self.headers())];
        for cells in &body {
            out.push(line(cells.iter().map(String::as_str).collect()));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Person {
        Person {
            id: Some(1),
            photo: None,
            name: " Ana Souza ".to_string(),
            email: None,
            phone: "11987654321".to_string(),
            birth_date: "1990-04-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_mask_parsing() {
        assert_eq!("tel".parse::<ColumnMask>().unwrap(), ColumnMask::Tel);
        assert_eq!("date".parse::<ColumnMask>().unwrap(), ColumnMask::Date);
        assert!("phone".parse::<ColumnMask>().is_err());
    }

    #[test]
    fn test_render_person_row() {
        let table = TableView::new(person_columns());
        assert_eq!(
            table.render_row(&ana()),
            vec!["Ana Souza", "-", "(11) 98765-4321", "01/04/1990"]
        );
    }

    #[test]
    fn test_render_json_rows() {
        let table = TableView::new(vec![
            Column::new("count", "Total"),
            Column::new("when", "Quando").masked(ColumnMask::Date),
        ]);
        let row = serde_json::json!({"count": 0, "when": "nope"});
        assert_eq!(table.render_row(&row), vec!["0", "Data inválida"]);

        let negative_zero = serde_json::json!({"count": -0.0, "when": null});
        assert_eq!(table.render_row(&negative_zero), vec!["0", "-"]);
    }

    #[test]
    fn test_export_csv_and_tsv() {
        let table = TableView::new(person_columns());
        let rows = vec![ana()];

        let csv = table.export(&rows, ExportFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "Nome,E-mail,Telefone,Data de nascimento\nAna Souza,-,(11) 98765-4321,01/04/1990\n"
        );

        let tsv = table.export(&rows, ExportFormat::Tsv).unwrap();
        assert!(tsv.starts_with("Nome\tE-mail\tTelefone\tData de nascimento\n"));
    }

    #[test]
    fn test_to_text_aligns_columns() {
        let table = TableView::new(vec![Column::new("name", "N"), Column::new("phone", "Tel")]);
        let text = table.to_text(&[ana()]);
        assert_eq!(text, "N          Tel\nAna Souza  11987654321");
    }

    #[test]
    fn test_column_wire_format() {
        let column: Column =
            serde_json::from_value(serde_json::json!({"field": "phone", "header": "Telefone", "mask": "tel"}))
                .unwrap();
        assert_eq!(column.mask, Some(ColumnMask::Tel));
    }
}

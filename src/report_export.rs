use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::table::{Cell, Table};

pub struct ExportReport {
    pub sheets: Vec<String>,
    pub rows: usize,
}

/// Writes one worksheet per table, header in the first row.
pub fn export_tables(path: &Path, tables: &[Table]) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let mut rows = 0usize;

    for table in tables {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&table.name)
            .with_context(|| format!("invalid sheet name {:?}", table.name))?;
        write_table(sheet, table).with_context(|| format!("write sheet {}", table.name))?;
        rows += table.rows.len();
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    info!("wrote {} sheets to {}", tables.len(), path.display());

    Ok(ExportReport {
        sheets: tables.iter().map(|t| t.name.clone()).collect(),
        rows,
    })
}

fn write_table(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col_idx, title) in table.header.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, title)
            .with_context(|| format!("write header cell {col_idx}"))?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let xl_row = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let xl_col = col_idx as u16;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(xl_row, xl_col, s)?;
                }
                Cell::Int(v) => {
                    worksheet.write_number(xl_row, xl_col, *v as f64)?;
                }
                Cell::Number(v) => {
                    worksheet.write_number(xl_row, xl_col, *v)?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}

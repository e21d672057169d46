use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn opt_number(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Number(v) => f.write_str(&trim_number(*v)),
            Cell::Empty => Ok(()),
        }
    }
}

fn trim_number(value: f64) -> String {
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// A named, row-oriented table with a header row. This is what gets handed
/// to the spreadsheet writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: &str, header: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            header,
            rows: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Row whose `Team` column equals `team`.
    pub fn team_row(&self, team: &str) -> Option<&[Cell]> {
        let idx = self.column("Team")?;
        self.rows
            .iter()
            .find(|row| matches!(row.get(idx), Some(Cell::Text(t)) if t == team))
            .map(|row| row.as_slice())
    }

    /// Fixed-width plain text rendering, header first.
    pub fn to_text(&self) -> String {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();

        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &rendered {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(idx) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.header, &widths);
        for row in &rendered {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:>w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn week_label(week: u32) -> String {
    format!("Week {week}")
}

/// Team-keyed rows kept in first-insertion order.
#[derive(Debug, Clone)]
pub(crate) struct TeamRows<V> {
    index: HashMap<String, usize>,
    rows: Vec<(String, V)>,
}

impl<V: Default> TeamRows<V> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn entry(&mut self, team: &str) -> &mut V {
        let idx = match self.index.get(team) {
            Some(idx) => *idx,
            None => {
                self.rows.push((team.to_string(), V::default()));
                self.index.insert(team.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx].1
    }

    pub(crate) fn into_rows(self) -> Vec<(String, V)> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_trailing_zeros() {
        assert_eq!(Cell::Number(190.0).to_string(), "190");
        assert_eq!(Cell::Number(95.5).to_string(), "95.5");
        assert_eq!(Cell::Number(1.92780487).to_string(), "1.927805");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn team_rows_keep_first_insertion_order() {
        let mut rows: TeamRows<u32> = TeamRows::new();
        *rows.entry("B") += 1;
        *rows.entry("A") += 1;
        *rows.entry("B") += 1;
        let rows = rows.into_rows();
        assert_eq!(rows, vec![("B".to_string(), 2), ("A".to_string(), 1)]);
    }

    #[test]
    fn text_rendering_right_aligns_columns() {
        let mut t = Table::new("T", vec!["Team".into(), "Wins".into()]);
        t.rows.push(vec![Cell::text("Alpha"), Cell::Int(10)]);
        let text = t.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " Team  Wins");
        assert_eq!(lines[1], "Alpha    10");
    }
}

//! Label grids: the categorical input table and its numeric index form.

use crate::error::{HeatmapError, Result};

/// Rectangular table of category labels.
///
/// Values are stored in their string form, so `1` and `"1"` end up in the
/// same category. Optional row/column labels are used as tick labels when
/// rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGrid {
    rows: usize,
    cols: usize,
    cells: Vec<String>,
    row_labels: Option<Vec<String>>,
    col_labels: Option<Vec<String>>,
}

impl CategoryGrid {
    /// Build a grid from a list of rows. All rows must have the same length.
    pub fn from_rows<R, T>(rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = T>,
        T: ToString,
    {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut n_rows = 0;
        for (i, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row.into_iter().map(|v| v.to_string()));
            let found = cells.len() - before;
            match cols {
                None => cols = Some(found),
                Some(expected) if expected != found => {
                    return Err(HeatmapError::RaggedRows {
                        row: i,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            n_rows += 1;
        }
        let cols = cols.unwrap_or(0);
        if n_rows == 0 || cols == 0 {
            return Err(HeatmapError::EmptyData);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            cells,
            row_labels: None,
            col_labels: None,
        })
    }

    /// Build an `n x 1` grid from a one-dimensional series of values.
    pub fn from_column<I, T>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self::from_rows(values.into_iter().map(|v| std::iter::once(v)))
    }

    /// Parse delimited text (CSV, TSV, ...).
    ///
    /// With `has_header` the first line provides column labels; with
    /// `index_col` the first field of every line provides the row label.
    /// Blank lines are skipped. Fields may be wrapped in double quotes; a
    /// quoted field may span lines and keeps its line breaks.
    pub fn from_delimited(
        text: &str,
        delimiter: char,
        has_header: bool,
        index_col: bool,
    ) -> Result<Self> {
        let mut lines = split_records(text, delimiter).into_iter();

        let header = if has_header { lines.next() } else { None };

        let mut row_labels = Vec::new();
        let mut rows = Vec::new();
        for mut fields in lines {
            if index_col && !fields.is_empty() {
                row_labels.push(fields.remove(0));
            }
            rows.push(fields);
        }

        let mut grid = Self::from_rows(rows)?;
        if let Some(mut header) = header {
            if index_col && !header.is_empty() {
                header.remove(0);
            }
            grid = grid.with_column_labels(header)?;
        }
        if index_col {
            grid = grid.with_row_labels(row_labels)?;
        }
        Ok(grid)
    }

    /// Attach row (y tick) labels.
    pub fn with_row_labels<I, T>(mut self, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let labels: Vec<String> = labels.into_iter().map(|l| l.to_string()).collect();
        if labels.len() != self.rows {
            return Err(HeatmapError::LabelCount {
                axis: "row",
                expected: self.rows,
                found: labels.len(),
            });
        }
        self.row_labels = Some(labels);
        Ok(self)
    }

    /// Attach column (x tick) labels.
    pub fn with_column_labels<I, T>(mut self, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let labels: Vec<String> = labels.into_iter().map(|l| l.to_string()).collect();
        if labels.len() != self.cols {
            return Err(HeatmapError::LabelCount {
                axis: "column",
                expected: self.cols,
                found: labels.len(),
            });
        }
        self.col_labels = Some(labels);
        Ok(self)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).map(String::as_str)
    }

    /// Row tick labels; falls back to `0..rows`.
    pub fn row_labels(&self) -> Vec<String> {
        self.row_labels
            .clone()
            .unwrap_or_else(|| (0..self.rows).map(|i| i.to_string()).collect())
    }

    /// Column tick labels; falls back to `0..cols`.
    pub fn column_labels(&self) -> Vec<String> {
        self.col_labels
            .clone()
            .unwrap_or_else(|| (0..self.cols).map(|i| i.to_string()).collect())
    }

    /// Distinct labels, sorted by their string form.
    pub fn unique_labels(&self) -> Vec<String> {
        let mut labels = self.cells.clone();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Per-column flag: `true` unless every cell in the column parses as a number.
    pub fn is_categorical(&self) -> Vec<bool> {
        (0..self.cols)
            .map(|c| {
                (0..self.rows).any(|r| {
                    self.cells[r * self.cols + c]
                        .trim()
                        .parse::<f64>()
                        .is_err()
                })
            })
            .collect()
    }

    /// Map every cell to the position of its label in `categories`.
    pub fn to_indices(&self, categories: &[String]) -> Result<IndexGrid> {
        let data = self
            .cells
            .iter()
            .map(|cell| {
                categories
                    .binary_search(cell)
                    .or_else(|_| {
                        categories
                            .iter()
                            .position(|c| c == cell)
                            .ok_or_else(|| HeatmapError::UnknownLabel(cell.clone()))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(IndexGrid {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

/// Split one line into fields, honouring double-quoted fields.
/// Split `text` into records of trimmed fields. Line breaks inside quotes
/// belong to the field; blank records are dropped.
fn split_records(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    let mut end_record = |fields: &mut Vec<String>, cur: &mut String| {
        fields.push(cur.trim().to_string());
        cur.clear();
        let record = std::mem::take(fields);
        if !(record.len() == 1 && record[0].is_empty()) {
            records.push(record);
        }
    };

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cur.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => end_record(&mut fields, &mut cur),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            c if c == delimiter && !in_quotes => {
                fields.push(cur.trim().to_string());
                cur.clear();
            }
            c => cur.push(c),
        }
    }
    end_record(&mut fields, &mut cur);
    records
}

/// Grid of category indices with the same shape as its [`CategoryGrid`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexGrid {
    rows: usize,
    cols: usize,
    data: Vec<usize>,
}

impl IndexGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> &[usize] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.data
    }
}

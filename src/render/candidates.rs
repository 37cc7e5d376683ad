use std::ops::Range;

use super::width::str_width;
use crate::complete::Candidate;

/// Cells between two columns.
const COLUMN_GAP: usize = 2;

/// How the candidate area is tiled: candidates run down each column, then
/// across columns; columns are grouped into pages that fit the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLayout {
    rows: usize,
    columns: Vec<Column>,
    /// Column ranges, one per page.
    pages: Vec<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Column {
    items: Range<usize>,
    width: usize,
}

/// What a candidate shows: its value and, if any, its description.
pub(crate) fn label(candidate: &Candidate) -> String {
    match &candidate.description {
        Some(description) => format!("{} ({description})", candidate.value),
        None => candidate.value.clone(),
    }
}

impl CandidateLayout {
    /// Tiles `candidates` into at most `max_rows` rows of a terminal
    /// `width` cells wide. Fewer rows are preferred as long as every column
    /// fits on one page.
    pub fn compute(candidates: &[Candidate], width: usize, max_rows: usize) -> Self {
        let widths: Vec<usize> = candidates.iter().map(|c| str_width(&label(c))).collect();
        let max_rows = max_rows.max(1);
        let width = width.max(1);

        for rows in 1..=max_rows.min(widths.len().max(1)) {
            let columns = split_columns(&widths, rows);
            if total_width(&columns) <= width {
                let pages = vec![0..columns.len()];
                return Self {
                    rows,
                    columns,
                    pages,
                };
            }
        }

        let rows = max_rows.min(widths.len().max(1));
        let columns = split_columns(&widths, rows);
        let mut pages = Vec::new();
        let mut start = 0;
        let mut used = 0;
        for (i, column) in columns.iter().enumerate() {
            let needed = column.width + if i > start { COLUMN_GAP } else { 0 };
            if i > start && used + needed > width {
                pages.push(start..i);
                start = i;
                used = column.width;
            } else {
                used += needed;
            }
        }
        if start < columns.len() {
            pages.push(start..columns.len());
        }
        Self {
            rows,
            columns,
            pages,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn column_of(&self, index: usize) -> Option<usize> {
        self.columns.iter().position(|c| c.items.contains(&index))
    }

    /// The page showing candidate `index`.
    pub fn page_of(&self, index: usize) -> Option<usize> {
        let column = self.column_of(index)?;
        self.pages.iter().position(|p| p.contains(&column))
    }

    /// The candidate in the same row `delta` columns away, wrapping around
    /// the list.
    pub fn column_step(&self, index: usize, delta: isize) -> Option<usize> {
        let column = self.column_of(index)?;
        let row = index - self.columns[column].items.start;
        let count = self.columns.len() as isize;
        let target = &self.columns[(column as isize + delta).rem_euclid(count) as usize];
        let row = row.min(target.items.len().saturating_sub(1));
        Some(target.items.start + row)
    }

    /// The first candidate of the page `delta` pages away, wrapping.
    pub fn page_step(&self, index: usize, delta: isize) -> Option<usize> {
        let page = self.page_of(index)?;
        let count = self.pages.len() as isize;
        let target = &self.pages[(page as isize + delta).rem_euclid(count) as usize];
        self.columns.get(target.start).map(|c| c.items.start)
    }

    /// Each column of `page` as its starting cell and width.
    pub(crate) fn page_columns(&self, page: usize) -> Vec<(usize, usize, Range<usize>)> {
        let Some(range) = self.pages.get(page) else {
            return Vec::new();
        };
        let mut x = 0;
        self.columns[range.clone()]
            .iter()
            .map(|column| {
                let start = x;
                x += column.width + COLUMN_GAP;
                (start, column.width, column.items.clone())
            })
            .collect()
    }
}

fn split_columns(widths: &[usize], rows: usize) -> Vec<Column> {
    widths
        .chunks(rows)
        .enumerate()
        .map(|(i, chunk)| Column {
            items: i * rows..i * rows + chunk.len(),
            width: chunk.iter().copied().max().unwrap_or(0),
        })
        .collect()
}

fn total_width(columns: &[Column]) -> usize {
    let cells: usize = columns.iter().map(|c| c.width).sum();
    cells + COLUMN_GAP * columns.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(values: &[&str]) -> Vec<Candidate> {
        values.iter().map(|v| Candidate::new(*v)).collect()
    }

    #[test]
    fn fits_on_one_row_when_possible() {
        let layout = CandidateLayout::compute(&candidates(&["ab", "cd", "ef"]), 80, 10);
        assert_eq!(layout.rows(), 1);
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.column_step(0, 1), Some(1));
        assert_eq!(layout.column_step(0, -1), Some(2));
    }

    #[test]
    fn adds_rows_before_pages() {
        // 4 columns of 4 cells need 22 cells; 2 rows need 10.
        let layout = CandidateLayout::compute(&candidates(&["aaaa"; 4]), 12, 10);
        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.column_step(1, 1), Some(3));
    }

    #[test]
    fn splits_into_pages_when_rows_run_out() {
        let layout = CandidateLayout::compute(&candidates(&["aaaaaaa"; 6]), 10, 2);
        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.page_count(), 3);
        assert_eq!(layout.page_of(5), Some(2));
        assert_eq!(layout.page_step(0, 1), Some(2));
        assert_eq!(layout.page_step(0, -1), Some(4));
    }
}

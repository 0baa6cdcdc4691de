/// Horizontal alignment of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Plain-text table for console reports.
///
/// Text columns pad on the right, numeric columns on the left. Widths are
/// measured at render time so rows can be added in any order.
pub struct Table {
    columns: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    const GAP: &'static str = "  ";

    pub fn new(columns: &[(&str, Align)]) -> Self {
        Table {
            columns: columns.iter().map(|(title, align)| (title.to_string(), *align)).collect(),
            rows: Vec::new(),
        }
    }

    /// Cells beyond the column count are ignored
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let titles = self.columns.iter().map(|(title, _)| title.as_str());
        out.push_str(&self.line(titles, &widths));
        out.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join(Self::GAP));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&self.line(row.iter().map(String::as_str), &widths));
            out.push('\n');
        }

        out
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, (title, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .fold(title.chars().count(), usize::max)
            })
            .collect()
    }

    fn line<'a>(&self, cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .zip(self.columns.iter().zip(widths))
            .map(|(cell, ((_, align), width))| {
                let pad = " ".repeat(width.saturating_sub(cell.chars().count()));
                match align {
                    Align::Left => format!("{}{}", cell, pad),
                    Align::Right => format!("{}{}", pad, cell),
                }
            })
            .collect();
        padded.join(Self::GAP).trim_end().to_string()
    }
}

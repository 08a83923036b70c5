use crate::RenderableTable;
use prettytable::{Cell, Row, Table, format};

/// Render a titled table for a terminal.
///
/// The title sits on its own line above the grid. Rows shorter than the
/// header are padded with empty cells; longer rows are truncated.
pub fn render_table(table: &RenderableTable) -> String {
    let mut grid = Table::new();
    grid.set_format(*format::consts::FORMAT_BOX_CHARS);
    grid.set_titles(Row::new(
        table.headers.iter().map(|h| Cell::new(h)).collect(),
    ));

    let width = table.headers.len();
    for row in &table.rows {
        let cells = (0..width)
            .map(|i| Cell::new(row.get(i).map(String::as_str).unwrap_or("")))
            .collect();
        grid.add_row(Row::new(cells));
    }

    format!("{}\n{}", table.title, grid)
}

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::Cell;
use crate::ui::theme::Theme;

const CELL_WIDTH: u16 = 5;
const CELL_HEIGHT: u16 = 3;
const MAX_COLUMNS: u16 = 10;

/// One bordered box per letter of the current word.
pub struct LetterGrid<'a> {
    cells: &'a [Cell],
    theme: &'a Theme,
}

impl<'a> LetterGrid<'a> {
    pub fn new(cells: &'a [Cell], theme: &'a Theme) -> Self {
        Self { cells, theme }
    }

    /// Rows needed to show every cell in `width` columns.
    pub fn height_for(cell_count: usize, width: u16) -> u16 {
        let columns = columns_for(cell_count, width) as usize;
        if columns == 0 {
            return 0;
        }
        cell_count.div_ceil(columns) as u16 * CELL_HEIGHT
    }
}

fn columns_for(cell_count: usize, width: u16) -> u16 {
    let fit = (width / CELL_WIDTH).max(1);
    (cell_count as u16).min(MAX_COLUMNS).min(fit)
}

impl Widget for LetterGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let columns = columns_for(self.cells.len(), area.width);
        if columns == 0 {
            return;
        }

        let row_width = columns * CELL_WIDTH;
        let left = area.x + area.width.saturating_sub(row_width) / 2;

        for (i, cell) in self.cells.iter().enumerate() {
            let col = i as u16 % columns;
            let row = i as u16 / columns;
            let x = left + col * CELL_WIDTH;
            let y = area.y + row * CELL_HEIGHT;
            if y + CELL_HEIGHT > area.y + area.height || x + CELL_WIDTH > area.x + area.width {
                continue;
            }
            let rect = Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT);

            let (symbol, border, text_style, bg) = match *cell {
                Cell::Filled(ch) => (
                    ch.to_string(),
                    colors.border_focused(),
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                    colors.cell_filled_bg(),
                ),
                Cell::Hint(ch) => (
                    ch.to_string(),
                    colors.border(),
                    Style::default().fg(colors.hint()),
                    colors.bg(),
                ),
                Cell::Blank => (
                    String::new(),
                    colors.border(),
                    Style::default().fg(colors.fg()),
                    colors.bg(),
                ),
            };

            let block = Block::bordered()
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(bg));
            Paragraph::new(symbol)
                .style(text_style)
                .alignment(Alignment::Center)
                .block(block)
                .render(rect, buf);
        }
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::Mode;
use crate::ui::theme::Theme;
use crate::words::{Category, WordSource};

pub struct MenuItem {
    pub category: Category,
    pub label: String,
    pub word_count: usize,
}

/// Category rows, each playable in any of the three modes.
pub struct Menu {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub mode: Mode,
}

impl Menu {
    pub fn new(words: &WordSource) -> Self {
        let items = words
            .categories()
            .into_iter()
            .map(|category| MenuItem {
                label: words.label(&category).to_string(),
                word_count: words.words_for(&category).len(),
                category,
            })
            .collect();
        Self {
            items,
            selected: 0,
            mode: Mode::Untimed,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn next_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Untimed => Mode::Timed,
            Mode::Timed => Mode::Hard,
            Mode::Hard => Mode::Untimed,
        };
    }

    pub fn prev_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Untimed => Mode::Hard,
            Mode::Timed => Mode::Untimed,
            Mode::Hard => Mode::Timed,
        };
    }

    pub fn selected_category(&self) -> &Category {
        &self.items[self.selected].category
    }

    /// Move the cursor to `category` if it is listed.
    pub fn select(&mut self, category: &Category) {
        if let Some(idx) = self.items.iter().position(|i| &i.category == category) {
            self.selected = idx;
        }
    }
}

fn mode_caption(mode: Mode) -> String {
    if mode.is_timed() {
        format!("{} {}s", mode.label(), mode.word_seconds())
    } else {
        mode.label().to_string()
    }
}

pub struct MenuScreen<'a> {
    menu: &'a Menu,
    high_score: u32,
    theme: &'a Theme,
}

impl<'a> MenuScreen<'a> {
    pub fn new(menu: &'a Menu, high_score: u32, theme: &'a Theme) -> Self {
        Self {
            menu,
            high_score,
            theme,
        }
    }
}

impl Widget for MenuScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Spell-a-thon",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Best score ", Style::default().fg(colors.fg())),
                Span::styled(
                    self.high_score.to_string(),
                    Style::default()
                        .fg(colors.trophy())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.menu
                    .items
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.menu.items.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };

            let mut spans = vec![Span::styled(
                format!(" {indicator} {:<10} ", item.label),
                Style::default()
                    .fg(if is_selected {
                        colors.accent()
                    } else {
                        colors.fg()
                    })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            )];

            for mode in Mode::ALL {
                let chosen = is_selected && mode == self.menu.mode;
                let color = match mode {
                    Mode::Hard => colors.error(),
                    _ => colors.accent(),
                };
                let style = if chosen {
                    Style::default()
                        .fg(colors.bg())
                        .bg(color)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.text_pending())
                };
                spans.push(Span::styled(format!(" {} ", mode_caption(mode)), style));
                spans.push(Span::raw(" "));
            }

            spans.push(Span::styled(
                format!("{} words", item.word_count),
                Style::default().fg(colors.text_pending()),
            ));

            if i < menu_layout.len() {
                Paragraph::new(Line::from(spans)).render(menu_layout[i], buf);
            }
        }
    }
}

use chrono::Local;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::Summary;
use crate::session::record::{AttemptRecord, mismatched_positions};
use crate::ui::theme::Theme;

pub struct SummaryScreen<'a> {
    summary: &'a Summary,
    label: &'a str,
    high_score: u32,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> SummaryScreen<'a> {
    pub fn new(
        summary: &'a Summary,
        label: &'a str,
        high_score: u32,
        scroll: u16,
        theme: &'a Theme,
    ) -> Self {
        Self {
            summary,
            label,
            high_score,
            scroll,
            theme,
        }
    }
}

/// Lines for one finished word; earlier tries are listed with wrong letters
/// marked.
pub fn record_lines(record: &AttemptRecord, theme: &Theme) -> Vec<Line<'static>> {
    let colors = &theme.colors;
    let (mark, mark_color) = if record.first_try() {
        ("\u{2714}", colors.success())
    } else {
        ("\u{2718}", colors.error())
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {mark} "), Style::default().fg(mark_color)),
        Span::styled(
            format!("{:<12}", record.word),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(record.tries_label(), Style::default().fg(colors.text_pending())),
    ])];

    if record.attempts_count > 1 {
        for (i, attempt) in record.attempts.iter().enumerate() {
            let wrong = mismatched_positions(attempt, &record.word);
            let mut spans = vec![Span::styled(
                format!("     Try {}: ", i + 1),
                Style::default().fg(colors.text_pending()),
            )];
            if attempt.is_empty() {
                spans.push(Span::styled("(blank)", Style::default().fg(colors.error())));
            }
            for (pos, ch) in attempt.chars().enumerate() {
                let style = if wrong.contains(&pos) {
                    Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                spans.push(Span::styled(ch.to_string(), style));
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}

impl Widget for SummaryScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} Summary ", self.label))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let date = self
            .summary
            .finished_at
            .with_timezone(&Local)
            .format("%b %-d, %Y")
            .to_string();
        let header = Line::from(vec![
            Span::styled(format!(" {date}"), Style::default().fg(colors.text_pending())),
            Span::styled(
                format!("   {} mode", self.summary.mode.label()),
                Style::default().fg(colors.text_pending()),
            ),
            Span::styled("   Score ", Style::default().fg(colors.fg())),
            Span::styled(
                self.summary.score.to_string(),
                Style::default()
                    .fg(colors.trophy())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   Best {}", self.high_score),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                format!(
                    "   {}/{} first try",
                    self.summary.first_try_count(),
                    self.summary.history.len()
                ),
                Style::default().fg(colors.success()),
            ),
        ]);
        Paragraph::new(header).render(layout[0], buf);

        let mut lines: Vec<Line> = Vec::new();
        if self.summary.history.is_empty() {
            lines.push(Line::from(Span::styled(
                " No words finished this time.",
                Style::default().fg(colors.text_pending()),
            )));
        }
        for record in &self.summary.history {
            lines.extend(record_lines(record, self.theme));
        }
        Paragraph::new(lines)
            .scroll((self.scroll, 0))
            .render(layout[1], buf);
    }
}

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

use crate::screen::{CityDetail, Row, Summary, MISSING};

const WRAP: Wrap = Wrap { trim: false };

/// A titled, bordered section of the detail view.
struct Card<'a> {
    title: Option<&'a str>,
    lines: Vec<Line<'a>>,
}

impl<'a> Card<'a> {
    /// Rows needed at `width` once word-wrapped, borders included.
    fn height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2).max(1);
        let rows = Paragraph::new(self.lines.clone())
            .wrap(WRAP)
            .line_count(inner);
        u16::try_from(rows + 2).unwrap_or(u16::MAX)
    }

    fn widget(self) -> Paragraph<'a> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded);
        if let Some(title) = self.title {
            block = block
                .title(Span::styled(
                    format!(" {title} "),
                    Style::default().fg(Color::Yellow),
                ))
                .title_alignment(Alignment::Left);
        }
        Paragraph::new(self.lines)
            .block(block)
            .wrap(WRAP)
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, detail: &CityDetail) -> io::Result<()> {
    let last = cards(detail).len() - 1;
    let mut scroll = 0;
    loop {
        terminal.draw(|f| ui(f, detail, scroll))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => scroll = (scroll + 1).min(last),
                KeyCode::Up | KeyCode::Char('k') => scroll = scroll.saturating_sub(1),
                _ => {}
            }
        }
    }
}

fn display_headline(detail: &CityDetail) -> Card {
    let mut lines = vec![Line::from(vec![
        Span::raw(" "),
        Span::styled(
            detail.title.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    if let Some(ref updated) = detail.updated {
        lines.push(Line::from(format!(" Updated {updated}")));
    }
    Card { title: None, lines }
}

fn display_summary(summary: &Summary) -> Card {
    let (r, g, b) = summary.category.rgb();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            summary.aqi.as_str(),
            Style::default()
                .fg(Color::Rgb(r, g, b))
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(summary.category.status()).alignment(Alignment::Center),
    ];
    if let Some(ref dominant) = summary.dominant {
        lines.push(
            Line::from(Span::styled(
                format!("driven by {dominant}"),
                Style::default().fg(Color::Gray),
            ))
            .alignment(Alignment::Center),
        );
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", summary.category.recommendation()),
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    Card {
        title: Some("Air Quality Index"),
        lines,
    }
}

fn display_rows<'a>(title: &'a str, rows: &'a [Row]) -> Card<'a> {
    let mut lines = vec![Line::from("")];
    if rows.is_empty() {
        lines.push(Line::from(format!(" {MISSING}")));
    }
    for row in rows {
        lines.push(Line::from(vec![
            Span::raw(format!(" {:18}", row.label)),
            Span::styled(row.value.as_str(), Style::default().fg(Color::Green)),
        ]));
    }
    Card {
        title: Some(title),
        lines,
    }
}

fn cards(detail: &CityDetail) -> Vec<Card> {
    let mut cards = vec![
        display_headline(detail),
        display_summary(&detail.summary),
        display_rows("Pollutants", &detail.pollutants),
    ];
    if let Some(ref weather) = detail.weather {
        cards.push(display_rows("Weather", weather));
    }
    cards
}

/// Draws the detail with the first `scroll` cards scrolled out of view.
fn ui(f: &mut Frame, detail: &CityDetail, scroll: usize) {
    let area = f.area().inner(Margin::new(1, 1));
    let visible: Vec<Card> = cards(detail).into_iter().skip(scroll).collect();

    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|card| Constraint::Length(card.height(area.width)))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::vertical(constraints).split(area);
    for (card, chunk) in visible.into_iter().zip(chunks.iter()) {
        render_card(f, card, *chunk);
    }
}

fn render_card(f: &mut Frame, card: Card, area: Rect) {
    if area.height > 0 {
        f.render_widget(card.widget(), area);
    }
}

//! Ratatui rendering for the weather screen

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::controller::{ActiveTab, Controller};
use crate::format::{card_view, CardView};

pub fn draw(f: &mut Frame, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_tabs(f, chunks[0], controller.tab());
    draw_input(f, chunks[1], controller);
    let card = card_view(controller.state());
    draw_card(f, chunks[2], &card);
    draw_footer(f, chunks[3], &card);
}

fn draw_tabs(f: &mut Frame, area: Rect, tab: ActiveTab) {
    let selected = match tab {
        ActiveTab::Location => 0,
        ActiveTab::Search => 1,
    };
    let tabs = Tabs::new(vec!["📍 My Location", "🔍 Search City"])
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(" Skycast "))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_input(f: &mut Frame, area: Rect, controller: &Controller) {
    let searching = controller.tab() == ActiveTab::Search;
    let mut spans = vec![Span::raw(controller.input().to_string())];
    if searching {
        spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
    }

    let border_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" City "),
    );
    f.render_widget(input, area);
}

fn draw_card(f: &mut Frame, area: Rect, card: &CardView) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            card.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  {}", card.glyph, card.temperature),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(card.description.clone()),
        Line::from(""),
        Line::from(format!(
            "💨 Wind {}    💧 Humidity {}    ☁️ Clouds {}",
            card.wind, card.humidity, card.clouds
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Weather "));
    f.render_widget(paragraph, area);
}

fn draw_footer(f: &mut Frame, area: Rect, card: &CardView) {
    let mut hints = String::from("Tab switch pane | Enter search | Esc quit");
    if !card.footer_note.is_empty() {
        hints.push_str(" | ");
        hints.push_str(&card.footer_note);
    }
    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

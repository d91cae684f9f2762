//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Padding, Paragraph, Row, Table, TableState, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Focus, InputMode};
use crate::config::UiSettings;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("tab", "switch pane");
    map.insert("gg/G", "top/bottom");
    map.insert("a", "add movie");
    map.insert("space", "mark");
    map.insert("d", "delete marked");
    map.insert("n", "new catalog");
    map.insert("D", "delete catalog");
    map.insert("/", "filter");
    map.insert("R", "refresh");
    map.insert("q", "quit");
    map
});

/// Render the controls help text in a stable, human-friendly order.
fn controls_text() -> String {
    let order = [
        "j/k", "tab", "gg/G", "a", "space", "d", "n", "D", "/", "R", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Prompt label and current buffer for the input line, if one is open.
fn prompt(app: &App) -> Option<(String, String)> {
    match app.input_mode {
        InputMode::Normal => None,
        InputMode::Filter => Some((" filter ".into(), app.filter_query.clone())),
        InputMode::NewCatalog => Some((" new catalog name ".into(), app.input.clone())),
        InputMode::AddTitle => Some((" title ".into(), app.input.clone())),
        InputMode::AddYear => Some((
            format!(
                " year for '{}' (optional) ",
                app.pending_title().unwrap_or_default()
            ),
            app.input.clone(),
        )),
        InputMode::ConfirmDelete => Some((
            " confirm ".into(),
            format!(
                "Delete catalog '{}'? (y/n)",
                app.current_catalog_name().unwrap_or_default()
            ),
        )),
    }
}

/// Split `text` into spans, bolding the characters at `positions`.
fn highlighted(text: &str, positions: &[usize]) -> Line<'static> {
    let hit = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let spans: Vec<Span<'static>> = text
        .chars()
        .enumerate()
        .map(|(ci, ch)| {
            if positions.contains(&ci) {
                Span::styled(ch.to_string(), hit)
            } else {
                Span::raw(ch.to_string())
            }
        })
        .collect();
    Line::from(spans)
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}

fn draw_catalogs(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .catalogs
        .iter()
        .map(|c| ListItem::new(c.as_str()))
        .collect();

    let list = List::new(items)
        .block(pane_block(" catalogs ", app.focus == Focus::Catalogs))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if !app.catalogs.is_empty() {
        state.select(Some(app.catalog_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_movies(frame: &mut Frame, app: &App, display: &[usize], area: Rect) {
    let query = app.filter_query.trim();

    let rows: Vec<Row> = display
        .iter()
        .enumerate()
        .map(|(pos, &i)| {
            let record = &app.records[i];
            let mark = if app.is_marked(record) { "x" } else { " " };

            // Match positions are computed against the full display string,
            // so only the ones falling inside the title are highlighted.
            let title_cell = if query.is_empty() {
                Cell::from(record.title().to_string())
            } else {
                let positions =
                    App::fuzzy_match_positions(&record.to_string(), query).unwrap_or_default();
                Cell::from(highlighted(record.title(), &positions))
            };

            Row::new(vec![
                Cell::from((pos + 1).to_string()),
                Cell::from(mark),
                title_cell,
                Cell::from(record.genre().to_string()),
                Cell::from(record.year_label()),
            ])
        })
        .collect();

    let title = match app.current_catalog_name() {
        Some(name) => format!(" {name} ({} movie(s)) ", app.records.len()),
        None => " no catalog selected ".to_string(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(16),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["#", "", "Title", "Genre", "Year"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(pane_block(&title, app.focus == Focus::Movies))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut state = TableState::default();
    if let Some(pos) = display.iter().position(|&i| i == app.selected) {
        state.select(Some(pos));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, display: &[usize], ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reel ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(chunks[1]);
    draw_catalogs(frame, app, panes[0]);
    draw_movies(frame, app, display, panes[1]);

    // Status: last notice, else where the catalog lives.
    let (status, style) = match &app.notice {
        Some(n) if n.ok => (n.text.clone(), Style::default().fg(Color::Green)),
        Some(n) => (n.text.clone(), Style::default().fg(Color::Red)),
        None => {
            let mut parts = vec![format!("Dir: {}", app.base_dir().display())];
            if app.current_catalog_name().is_some() && !app.has_records() {
                parts.push("Catalog is empty".to_string());
            }
            if !app.marked.is_empty() {
                parts.push(format!("Marked: {}", app.marked.len()));
            }
            let q = app.filter_query.trim();
            if !q.is_empty() {
                parts.push(format!("FILTER: {q}"));
            }
            (parts.join(" • "), Style::default())
        }
    };
    let status_par = Paragraph::new(status).style(style).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" status "),
    );
    frame.render_widget(status_par, chunks[2]);

    // Prompt overlays the status line while editing.
    if let Some((label, text)) = prompt(app) {
        frame.render_widget(Clear, chunks[2]);
        let input = Paragraph::new(text).block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(label)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(input, chunks[2]);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_text_lists_every_binding_in_order() {
        let text = controls_text();
        assert!(text.starts_with("[j/k] up/down | [tab] switch pane"));
        assert!(text.ends_with("[q] quit"));
        assert_eq!(text.matches(" | ").count(), CONTROLS_MAP.len() - 1);
    }

    #[test]
    fn highlighted_styles_only_matched_chars() {
        let line = highlighted("Dune", &[0, 2]);
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[0].style.fg, Some(Color::Yellow));
        assert_eq!(line.spans[1].style.fg, None);
        assert_eq!(line.spans[2].style.fg, Some(Color::Yellow));
    }
}

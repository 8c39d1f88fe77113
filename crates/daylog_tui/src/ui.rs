//! View-model rendering.
//!
//! # Responsibility
//! - Draw each session view model with ratatui widgets.
//! - Keep all styling and layout decisions out of the core.

use daylog_core::ViewModel;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const HELP_BROWSE: &str =
    "(j/k) move • (ctrl+u/d) page • (enter) view • (a) add • (/) search • (B) backup • (q) quit";
const HELP_COMPOSE: &str = "(enter) save • (esc) cancel";
const HELP_VIEW: &str = "(j/k) scroll • (h) back • (q) quit";
const HELP_SEARCH: &str = "(enter) apply filter • (esc) clear";

pub fn render(frame: &mut Frame<'_>, view: &ViewModel<'_>) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    match view {
        ViewModel::Browse {
            items,
            selected,
            filter,
            error,
        } => {
            let title = browse_title(*filter);
            let rows: Vec<ListItem<'_>> = items
                .iter()
                .map(|item| ListItem::new(item.title.clone()))
                .collect();
            let list = List::new(rows)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(*selected));
            frame.render_stateful_widget(list, body, &mut state);
            render_footer(frame, footer, HELP_BROWSE, *error);
        }

        ViewModel::Compose { buffer, error } => {
            let input = Paragraph::new(format!("{buffer}▏"))
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Add Daily Note"));
            frame.render_widget(input, body);
            render_footer(frame, footer, HELP_COMPOSE, *error);
        }

        ViewModel::View {
            title,
            content,
            scroll,
            error,
        } => {
            let doc = Paragraph::new(content.to_string())
                .scroll((scroll_offset(*scroll), 0))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Viewing: {title}")),
                );
            frame.render_widget(doc, body);
            render_footer(frame, footer, HELP_VIEW, *error);
        }

        ViewModel::Search { query, error } => {
            let input = Paragraph::new(format!("/{query}▏"))
                .block(Block::default().borders(Borders::ALL).title("Search Notes"));
            frame.render_widget(input, body);
            render_footer(frame, footer, HELP_SEARCH, *error);
        }
    }
}

fn browse_title(filter: Option<&str>) -> String {
    match filter {
        Some(query) => format!("Daily Notes [filter: {query}]"),
        None => "Daily Notes".to_string(),
    }
}

/// Documents longer than the widget's scroll range pin to the last
/// reachable offset instead of wrapping.
fn scroll_offset(scroll: usize) -> u16 {
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, help: &str, error: Option<&str>) {
    let line = match error {
        Some(message) => Line::styled(
            format!("Error: {message} (press any key to continue)"),
            Style::default().fg(Color::Red),
        ),
        None => Line::styled(help.to_string(), Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

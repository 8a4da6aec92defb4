//! Todo list screen: title, add form, list, status bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::app::{App, Focus};
use super::form::PLACEHOLDER;
use crate::domain::{Clock, Todo};
use crate::storage::KeyValueStore;

/// Shown in place of the list when there are no todos
pub const EMPTY_STATE: &str = "No todos yet. Add one above!";

/// Draw the whole screen
pub fn draw<S: KeyValueStore, C: Clock>(frame: &mut Frame, app: &App<S, C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Form
            Constraint::Length(1), // Validation error
            Constraint::Min(3),    // List
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new("Todo List")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_form(frame, app, chunks[1], chunks[2]);
    draw_list(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);
}

fn draw_form<S: KeyValueStore, C: Clock>(
    frame: &mut Frame,
    app: &App<S, C>,
    area: Rect,
    error_area: Rect,
) {
    let form = app.form();
    let focused = app.focus() == Focus::Form;

    let border_style = match (form.error(), focused) {
        (Some(_), _) => Style::default().fg(Color::Red),
        (None, true) => Style::default().fg(Color::Cyan),
        (None, false) => Style::default(),
    };

    let content = if form.input().is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(form.input())
    };

    // Scroll so the end of the input and the cursor cell stay inside the box
    let inner_width = area.width.saturating_sub(2);
    let typed = u16::try_from(Span::raw(form.input()).width()).unwrap_or(u16::MAX);
    let offset = typed.saturating_sub(inner_width.saturating_sub(1));

    let input = Paragraph::new(Line::from(content))
        .scroll((0, offset))
        .block(
            Block::default()
                .title("New todo (Enter to add)")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(input, area);

    if focused {
        let x = area.x.saturating_add(1).saturating_add(typed - offset);
        frame.set_cursor_position((x, area.y.saturating_add(1)));
    }

    if let Some(error) = form.error() {
        let message = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
        frame.render_widget(message, error_area);
    }
}

fn draw_list<S: KeyValueStore, C: Clock>(frame: &mut Frame, app: &App<S, C>, area: Rect) {
    let focused = app.focus() == Focus::List;
    let done = app.todos().iter().filter(|t| t.completed).count();

    let block = Block::default()
        .title(format!("Todos ({}/{})", done, app.todos().len()))
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });

    if app.todos().is_empty() {
        let empty = Paragraph::new(EMPTY_STATE)
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app.todos().iter().map(todo_item).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Reset })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn todo_item(todo: &Todo) -> ListItem<'_> {
    let text_style = if todo.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    ListItem::new(Line::from(vec![
        Span::raw(todo.marker()),
        Span::raw(" "),
        Span::styled(todo.text.as_str(), text_style),
    ]))
}

fn draw_status_bar<S: KeyValueStore, C: Clock>(frame: &mut Frame, app: &App<S, C>, area: Rect) {
    let text = match app.status_message() {
        Some(message) => message.to_string(),
        None => match app.focus() {
            Focus::Form => "Enter:add  Esc/Tab:list  Ctrl+C:quit".to_string(),
            Focus::List => "j/k:move  space:toggle  d:delete  a:add  q:quit  ?:help".to_string(),
        },
    };

    let status = Paragraph::new(text).style(Style::default().fg(Color::Gray));
    frame.render_widget(status, area);
}

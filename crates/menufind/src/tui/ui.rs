//! UI rendering

use super::app::{App, Field, LoadState};
use crate::theme::Theme;
use menufind_core::{DisplayedItem, MenuView, Suggestions};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

struct Palette {
    base: Style,
    accent: Color,
    muted: Color,
    price: Color,
    error: Color,
    highlight: Style,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                accent: Color::Blue,
                muted: Color::DarkGray,
                price: Color::Magenta,
                error: Color::Red,
                highlight: Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::Gray).bg(Color::Black),
                accent: Color::Cyan,
                muted: Color::DarkGray,
                price: Color::Yellow,
                error: Color::LightRed,
                highlight: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            },
        }
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.base), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Restaurant search
            Constraint::Length(3), // Menu filters
            Constraint::Min(6),    // Candidates and menu
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_field(frame, app, Field::Restaurant, chunks[0], &palette);

    let filters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_field(frame, app, Field::Name, filters[0], &palette);
    render_field(frame, app, Field::Ingredient, filters[1], &palette);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[2]);
    render_suggestions(frame, app, body[0], &palette);
    render_menu(frame, app, body[1], &palette);

    render_status_bar(frame, app, chunks[3], &palette);
}

fn field_title(field: Field) -> &'static str {
    match field {
        Field::Restaurant => " Restaurant ",
        Field::Name => " Item / category ",
        Field::Ingredient => " Ingredient ",
    }
}

/// Render one text field, placing the terminal cursor in the focused one
fn render_field(frame: &mut Frame, app: &App, field: Field, area: Rect, palette: &Palette) {
    let focused = app.focus == field;
    let border = if focused {
        Style::default().fg(palette.accent)
    } else {
        palette.muted()
    };
    let input = app.input(field);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(field_title(field));
    frame.render_widget(Paragraph::new(input.text()).block(block), area);

    if focused {
        let max = area.width.saturating_sub(2);
        let x = area.x + 1 + input.cursor_width().min(max);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

/// Render the candidate list
fn render_suggestions(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette) {
    app.suggestion_area = area;

    let Some(session) = &app.session else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.muted())
            .title(" Restaurants ");
        frame.render_widget(block, area);
        return;
    };

    let border = Style::default().fg(if app.focus == Field::Restaurant {
        palette.accent
    } else {
        palette.muted
    });
    let title = match session.suggestions() {
        Suggestions::Matches(ids) => format!(" Restaurants [{}] ", ids.len()),
        _ => " Restaurants ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    match session.suggestions() {
        Suggestions::Idle => {
            let hint = Paragraph::new("Type to search, Tab here to list all")
                .style(palette.muted())
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(hint, area);
        }
        Suggestions::NoResults => {
            let empty = Paragraph::new("No results").block(block);
            frame.render_widget(empty, area);
        }
        Suggestions::Matches(_) => {
            let items: Vec<ListItem> = session
                .candidates()
                .map(|restaurant| ListItem::new(restaurant.name.clone()))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(palette.highlight)
                .highlight_symbol("> ");

            app.suggestion_state.select(session.navigator().active());
            frame.render_stateful_widget(list, area, &mut app.suggestion_state);
        }
    }
}

/// Render the filtered menu of the current restaurant
fn render_menu(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.muted());

    let session = match (&app.load_state, &app.session) {
        (LoadState::Loading { started_at }, _) => {
            let text = format!("Loading catalog… {:.1}s", started_at.elapsed().as_secs_f32());
            let loading = Paragraph::new(text)
                .style(palette.muted())
                .block(block.title(" Menu "));
            frame.render_widget(loading, area);
            return;
        }
        (LoadState::Failed(message), _) => {
            let lines = vec![
                Line::from(Span::styled(
                    "Could not load the restaurant catalog",
                    Style::default()
                        .fg(palette.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(message.as_str()),
            ];
            let failed = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(block.title(" Menu "));
            frame.render_widget(failed, area);
            return;
        }
        (LoadState::Ready, Some(session)) => session,
        (LoadState::Ready, None) => return,
    };

    let Some(restaurant) = session.current_restaurant() else {
        let prompt = Paragraph::new("Select a restaurant to see its menu")
            .style(palette.muted())
            .block(block.title(" Menu "));
        frame.render_widget(prompt, area);
        return;
    };

    let shown = session.menu().keys().len();
    let title = format!(" {} [{}/{}] ", restaurant.name, shown, restaurant.menu.len());
    let block = block.title(Span::styled(
        title,
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ));

    if let MenuView::NoMatchingItems = session.menu() {
        let empty = Paragraph::new("No matching items").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = session
        .displayed_items()
        .iter()
        .map(|row| menu_row(row, palette))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(list, area, &mut app.menu_state);
}

fn menu_row<'a>(row: &DisplayedItem<'a>, palette: &Palette) -> ListItem<'a> {
    let item = row.item;
    let expanded = row.panel.is_expanded();
    let marker = if expanded { "▾ " } else { "▸ " };

    let mut header = vec![
        Span::styled(marker, Style::default().fg(palette.accent)),
        Span::styled(
            item.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(category) = &item.category {
        header.push(Span::styled(format!("  {category}"), palette.muted()));
    }
    if let Some(price) = &item.price {
        header.push(Span::styled(
            format!("  {price}"),
            Style::default().fg(palette.price),
        ));
    }

    let mut lines = vec![Line::from(header)];
    if expanded {
        if let Some(description) = &item.description {
            lines.push(Line::from(Span::styled(
                format!("    {description}"),
                palette.muted().add_modifier(Modifier::ITALIC),
            )));
        }
        if item.ingredients.is_empty() {
            lines.push(Line::from(Span::styled(
                "    no ingredients listed",
                palette.muted(),
            )));
        }
        for ingredient in &item.ingredients {
            lines.push(Line::from(format!("    • {ingredient}")));
        }
    }

    ListItem::new(lines)
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let count = app
        .session
        .as_ref()
        .map_or(0, |session| session.catalog().len());

    let mut spans = vec![Span::styled(
        format!(
            " {count} restaurants │ Tab: field │ Enter: select/toggle │ ^E/^W: expand/collapse │ ^T: theme │ Esc: quit"
        ),
        palette.muted(),
    )];
    if let Some(toast) = &app.toast {
        spans.push(Span::styled(
            format!("  {}", toast.message),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

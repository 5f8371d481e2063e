use super::badge::type_badge;
use super::App;
use crate::display::{capitalize_first, clamp_lines, dex_number};
use crate::loader::LoadStatus;
use crate::sprite::{Sprite, SPRITE_COLS, SPRITE_ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const HEADER_RED: Color = Color::Rgb(220, 38, 38);

/// Background of the sprite cell when the asset is missing
const PLACEHOLDER_BG: Color = Color::Rgb(229, 231, 235);

/// Lines of description shown per row
const DESCRIPTION_LINES: usize = 2;

/// Search line, blank line and "Filter by Type:" above the buttons
const MENU_HEADER_LINES: u16 = 3;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.size();

    if app.status.is_loading() {
        render_centered(
            f,
            area,
            "Loading Pokédex...",
            Style::default().fg(Color::Gray),
        );
        return;
    }

    if let LoadStatus::Error(message) = &app.status {
        let text = format!("Error: {}", message);
        render_centered(f, area, &text, Style::default().fg(Color::Red));
        return;
    }

    render_ready(f, area, app);
}

fn render_centered(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(paragraph, chunks[1]);
}

fn render_ready(f: &mut Frame, area: Rect, app: &mut App) {
    let mut constraints = vec![Constraint::Length(4)]; // Header
    if app.menu_open {
        constraints.push(Constraint::Length(menu_height(app, area.width))); // Search & filter panel
    }
    constraints.push(Constraint::Min(0)); // Entry list
    constraints.push(Constraint::Length(3)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(f, chunks[0], app);

    let mut next = 1;
    if app.menu_open {
        render_menu(f, chunks[next], app);
        next += 1;
    }

    render_list(f, chunks[next], app);
    render_status_bar(f, chunks[next + 1], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let menu_hint = if app.menu_open { "Tab ✕ Close" } else { "Tab ☰ Menu" };

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                "  Pokédex",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(menu_hint, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            "  ◓ Kanto Region",
            Style::default().fg(Color::White),
        )),
    ])
    .style(Style::default().bg(HEADER_RED))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White).bg(HEADER_RED)),
    );

    f.render_widget(header, area);
}

fn render_menu(f: &mut Frame, area: Rect, app: &App) {
    let search_line = if app.filter.search_term.is_empty() {
        Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                "Search Pokémon...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::Cyan)),
            Span::styled(app.filter.search_term.clone(), Style::default().fg(Color::White)),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ])
    };

    let mut content = vec![
        search_line,
        Line::from(""),
        Line::from(Span::styled(
            " Filter by Type:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    content.extend(type_button_rows(app, area.width.saturating_sub(2)));

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Search & Filter (←/→ type, Esc close) "),
    );

    f.render_widget(panel, area);
}

/// "All" plus one button per type, packed into rows no wider than `width`
/// A button never straddles two rows
fn type_button_rows(app: &App, width: u16) -> Vec<Line<'static>> {
    let selected = Style::default()
        .fg(Color::White)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    let unselected = Style::default().fg(Color::Black).bg(Color::Gray);

    let mut buttons = vec![Span::styled(
        " All ",
        if app.filter.selected_type.is_none() {
            selected
        } else {
            unselected
        },
    )];
    for type_name in &app.types {
        let is_selected = app
            .filter
            .selected_type
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(type_name));
        buttons.push(Span::styled(
            format!(" {} ", capitalize_first(type_name)),
            if is_selected { selected } else { unselected },
        ));
    }

    let width = width as usize;
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for button in buttons {
        // leading gap before every button
        let needed = 1 + button.width();
        if !row.is_empty() && used + needed > width {
            rows.push(Line::from(std::mem::take(&mut row)));
            used = 0;
        }
        row.push(Span::raw(" "));
        row.push(button);
        used += needed;
    }
    if !row.is_empty() {
        rows.push(Line::from(row));
    }

    rows
}

/// Panel height for the given terminal width: borders, header lines, button rows
fn menu_height(app: &App, width: u16) -> u16 {
    let rows = type_button_rows(app, width.saturating_sub(2)).len() as u16;
    2 + MENU_HEADER_LINES + rows
}

/// One terminal row of a sprite as half-block cells
fn sprite_row(sprite: &Sprite, row: u16) -> Vec<Span<'static>> {
    if sprite.is_placeholder() {
        return vec![Span::styled(
            " ".repeat(SPRITE_COLS as usize),
            Style::default().bg(PLACEHOLDER_BG),
        )];
    }

    (0..SPRITE_COLS)
        .map(|x| {
            let top = sprite.pixel(x, row * 2);
            let bottom = sprite.pixel(x, row * 2 + 1);
            match (top, bottom) {
                (Some([r, g, b]), Some([r2, g2, b2])) => Span::styled(
                    "▀",
                    Style::default()
                        .fg(Color::Rgb(r, g, b))
                        .bg(Color::Rgb(r2, g2, b2)),
                ),
                (Some([r, g, b]), None) => {
                    Span::styled("▀", Style::default().fg(Color::Rgb(r, g, b)))
                }
                (None, Some([r, g, b])) => {
                    Span::styled("▄", Style::default().fg(Color::Rgb(r, g, b)))
                }
                (None, None) => Span::raw(" "),
            }
        })
        .collect()
}

fn render_list(f: &mut Frame, area: Rect, app: &mut App) {
    // borders + highlight symbol + sprite + gap
    let text_width = area.width.saturating_sub(2 + 2 + SPRITE_COLS + 2) as usize;

    let entries = app.status.entries();
    let mut items = Vec::with_capacity(app.visible.len());

    for &index in &app.visible {
        let entry = &entries[index];
        let sprite = app.sprites.get(entry.id);

        let mut text_lines: Vec<Line<'static>> = Vec::with_capacity(SPRITE_ROWS as usize);
        text_lines.push(Line::from(vec![
            Span::styled(
                entry.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(dex_number(entry.id), Style::default().fg(Color::DarkGray)),
        ]));

        let mut badges = Vec::with_capacity(entry.types.len() * 2);
        for type_name in &entry.types {
            badges.push(type_badge(type_name));
            badges.push(Span::raw(" "));
        }
        text_lines.push(Line::from(badges));

        for line in clamp_lines(&entry.description, text_width, DESCRIPTION_LINES) {
            text_lines.push(Line::from(Span::styled(
                line,
                Style::default().fg(Color::Gray),
            )));
        }

        let lines: Vec<Line> = (0..SPRITE_ROWS)
            .map(|row| {
                let mut spans = sprite_row(sprite, row);
                spans.push(Span::raw("  "));
                if let Some(text) = text_lines.get(row as usize) {
                    spans.extend(text.spans.iter().cloned());
                }
                Line::from(spans)
            })
            .collect();

        items.push(ListItem::new(lines));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" ☰ Generation 1 "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" Showing {} of {} ", app.visible.len(), app.total_count()),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(entry) = app.selected_entry() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("{} {}", dex_number(entry.id), entry.name),
            Style::default().fg(Color::White),
        ));
    }

    // Show filter status if active
    if !app.filter.search_term.is_empty() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Search: \"{}\"", app.filter.search_term),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(type_name) = &app.filter.selected_type {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Type: {}", capitalize_first(type_name)),
            Style::default().fg(Color::Green),
        ));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Menu | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowseConfig;
    use crate::db::Entry;
    use crate::error::LoadError;
    use crate::sprite::sprite_path;
    use image::{Rgba, RgbaImage};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::path::Path;

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &mut App) -> Buffer {
        draw_sized(app, 80, 30)
    }

    fn draw_sized(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn app_with(sprite_dir: &Path, entries: Vec<Entry>) -> App {
        let mut app = App::new(&BrowseConfig {
            sprite_dir: sprite_dir.to_path_buf(),
            ..BrowseConfig::default()
        });
        app.finish_load(Ok(entries));
        app
    }

    fn starters() -> Vec<Entry> {
        vec![
            Entry::new(1, "Bulbasaur", &["grass", "poison"], "A strange seed."),
            Entry::new(4, "Charmander", &["fire"], "Flame on its tail."),
        ]
    }

    #[test]
    fn test_loading_view() {
        let mut app = App::new(&BrowseConfig::default());
        let text = buffer_text(&draw(&mut app));

        assert!(text.contains("Loading Pokédex..."));
        assert!(!text.contains("Generation 1"));
    }

    #[test]
    fn test_error_view_shows_message() {
        let mut app = App::new(&BrowseConfig::default());
        app.finish_load(Err(LoadError::Empty));
        let text = buffer_text(&draw(&mut app));

        assert!(text.contains("Error: No Pokemon data available"));
        assert!(!text.contains("Generation 1"));
    }

    #[test]
    fn test_ready_view_rows_without_sprites() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), starters());
        let buffer = draw(&mut app);
        let text = buffer_text(&buffer);

        assert!(text.contains("Pokédex"));
        assert!(text.contains("Kanto Region"));
        assert!(text.contains("Generation 1"));
        assert!(text.contains("Bulbasaur #001"));
        assert!(text.contains("Charmander #004"));
        assert!(text.contains(" Grass "));
        assert!(text.contains(" Poison "));
        assert!(text.contains("A strange seed."));
        assert!(text.contains("Showing 2 of 2  | #001 Bulbasaur"));

        // Missing sprite cell painted with the placeholder background
        let row = (0..buffer.area.height)
            .find(|&y| buffer_text_row(&buffer, y).contains("Bulbasaur"))
            .unwrap();
        let sprite_x = (0..buffer.area.width)
            .find(|&x| buffer.get(x, row).bg == PLACEHOLDER_BG)
            .expect("placeholder cell");
        assert_eq!(buffer.get(sprite_x, row).symbol(), " ");
    }

    fn buffer_text_row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf.get(x, y).symbol()).collect()
    }

    #[test]
    fn test_decoded_sprite_renders_half_blocks() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]))
            .save(sprite_path(dir.path(), 4))
            .unwrap();
        let mut app = app_with(dir.path(), starters());
        let text = buffer_text(&draw(&mut app));

        assert!(text.contains('▀'));
        assert!(text.contains("Charmander #004"));
    }

    #[test]
    fn test_menu_panel_lists_type_buttons() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), starters());
        app.toggle_menu();
        app.select_type(Some("fire".to_string()));
        let text = buffer_text(&draw(&mut app));

        assert!(text.contains("Filter by Type:"));
        assert!(text.contains(" All "));
        assert!(text.contains(" Fire "));
        assert!(text.contains("Search Pokémon..."));
        assert!(text.contains("Showing 1 of 2"));
        assert!(!text.contains("Bulbasaur #001"));
    }

    #[test]
    fn test_every_kanto_type_button_fits_narrow_terminals() {
        let dir = tempfile::tempdir().unwrap();
        let seed = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/kanto.json");
        let mut app = app_with(dir.path(), crate::db::load_entries_file(&seed).unwrap());
        app.toggle_menu();
        assert_eq!(app.types.len(), 17);

        for width in [80, 70, 60, 40] {
            let text = buffer_text(&draw_sized(&mut app, width, 30));
            for type_name in &app.types {
                let button = format!(" {} ", capitalize_first(type_name));
                assert!(
                    text.contains(&button),
                    "width {}: missing {:?} button",
                    width,
                    button
                );
            }
            assert!(text.contains("Generation 1"), "width {}: list squeezed out", width);
        }
    }

    #[test]
    fn test_menu_grows_with_button_rows() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(dir.path(), starters());

        // gap + " All " / " Grass " / " Poison " / " Fire " = 6 + 8 + 9 + 7 columns
        assert_eq!(type_button_rows(&app, 30).len(), 1);
        assert_eq!(type_button_rows(&app, 29).len(), 2);
        assert_eq!(type_button_rows(&app, 14).len(), 3);
        assert_eq!(menu_height(&app, 32), 6);
        assert_eq!(menu_height(&app, 31), 7);
    }

    #[test]
    fn test_unknown_type_badge_still_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(
            dir.path(),
            vec![Entry::new(1000, "Gholdengo", &["steel", "stellar"], "")],
        );
        let text = buffer_text(&draw(&mut app));

        assert!(text.contains(" Stellar "));
        assert!(text.contains("#1000"));
    }
}

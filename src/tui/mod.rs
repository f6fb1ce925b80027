// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{calculate_progress, shift_rect, spinner_frame, swipe_tint};
pub use input::{handle_key_event, handle_mouse_event, KeyAction, MouseAction};

use crate::domain::gesture::emphasis;
use crate::domain::SessionState;
use crate::images::{ImageState, SyncImageManager};
use crate::view::ViewModel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};
use std::collections::HashMap;

/// Size of a liked-card tile on the summary screen, borders included
const TILE_WIDTH: u16 = 18;
const TILE_HEIGHT: u16 = 9;

/// Overlay drawn on top of the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help,
    /// Shown on first launch
    Welcome,
}

/// What the front card currently shows
#[derive(Debug, Clone, Copy)]
pub enum CardImage<'a> {
    Loading,
    Ready(&'a [Line<'static>]),
    Failed(&'a str),
}

/// UI-only state that is not part of the deck session
#[derive(Debug, Default)]
pub struct UiState {
    pub overlay: Overlay,
    /// Current drag displacement, in swipe units
    pub displacement: f64,
    /// Swipe units per column, used to move the card with the pointer
    pub drag_scale: f64,
    /// Cards accepted so far by a running build
    pub progress: Option<usize>,
    pub target: usize,
    thumbnails: HashMap<u32, Vec<Line<'static>>>,
}

impl UiState {
    pub fn new(target: usize, drag_scale: f64) -> Self {
        Self {
            target,
            drag_scale,
            ..Self::default()
        }
    }

    /// Column offset of the front card while dragging
    pub fn drag_offset(&self) -> i32 {
        if self.drag_scale <= 0.0 {
            return 0;
        }
        (self.displacement / self.drag_scale).round() as i32
    }

    /// Drops rendered thumbnails, e.g. when a new deck replaces the old one
    pub fn clear_thumbnails(&mut self) {
        self.thumbnails.clear();
    }
}

/// Renders the whole screen for the current session state.
///
/// Returns the area of the front card, for pointer hit testing.
pub fn render(
    frame: &mut Frame,
    view: &ViewModel,
    images: &mut SyncImageManager,
    ui: &mut UiState,
) -> Option<Rect> {
    let card = match view.state {
        SessionState::Loading => {
            render_loading(frame, view, ui.progress, ui.target);
            None
        }
        SessionState::Swiping => {
            let failed = match images.current_state() {
                ImageState::Failed(message) => Some(message.clone()),
                _ => None,
            };
            let (cols, rows) = image_size(card_rect(swipe_layout(frame.area())[1]));
            let image = match (images.render_current(cols, rows), failed.as_deref()) {
                (Some(lines), _) => CardImage::Ready(lines),
                (None, Some(message)) => CardImage::Failed(message),
                (None, None) => CardImage::Loading,
            };
            render_swiping(frame, view, image, ui.displacement, ui.drag_offset())
        }
        SessionState::Summary => {
            let (cols, rows) = (TILE_WIDTH - 2, TILE_HEIGHT - 3);
            for card in &view.liked {
                if !ui.thumbnails.contains_key(&card.id) {
                    if let Some(lines) = images.thumbnail(&card.reference, cols, rows) {
                        ui.thumbnails.insert(card.id, lines);
                    }
                }
            }
            render_summary(frame, view, &ui.thumbnails);
            None
        }
    };

    match ui.overlay {
        Overlay::Help => render_help_overlay(frame),
        Overlay::Welcome => render_welcome_overlay(frame),
        Overlay::None => {}
    }

    card
}

fn swipe_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with counter
            Constraint::Min(0),    // Card
            Constraint::Length(3), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Resting position of the front card inside the body area
fn card_rect(body: Rect) -> Rect {
    let width = (body.width * 3 / 5).max(20).min(body.width);
    Rect {
        x: body.x + (body.width - width) / 2,
        y: body.y,
        width,
        height: body.height,
    }
}

/// Cells available for the picture inside a card: borders and the label row
fn image_size(card: Rect) -> (u16, u16) {
    (card.width.saturating_sub(2), card.height.saturating_sub(3))
}

/// Renders the loading screen: progress while building, or the failure
pub fn render_loading(frame: &mut Frame, view: &ViewModel, progress: Option<usize>, target: usize) {
    let area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, area);

    if let Some(error) = &view.load_error {
        let block = Block::default()
            .title(" Couldn't load cats ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_PRIMARY))
            .style(Style::default().bg(BG_DARK));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "[!] Something went wrong",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(error.clone(), Style::default().fg(TEXT_PRIMARY))),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("r", Style::default().fg(ACCENT_HIGHLIGHT)),
                Span::raw(" to retry or "),
                Span::styled("q", Style::default().fg(ACCENT_HIGHLIGHT)),
                Span::raw(" to quit"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_SECONDARY))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let block = Block::default()
        .title(" catswp ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame(now)),
                Style::default().fg(ACCENT_HIGHLIGHT),
            ),
            Span::styled(
                "Loading cats… This might take a while...",
                Style::default().fg(TEXT_PRIMARY),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[0],
    );

    let done = progress.unwrap_or(0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(calculate_progress(done, target))
        .label(format!("{}/{}", done.min(target), target));
    frame.render_widget(gauge, chunks[1]);
}

/// Renders the swiping screen and returns where the front card was drawn
pub fn render_swiping(
    frame: &mut Frame,
    view: &ViewModel,
    image: CardImage,
    displacement: f64,
    offset: i32,
) -> Option<Rect> {
    let [header, body, footer] = swipe_layout(frame.area());

    render_header(frame, header, view);
    render_footer(frame, footer, view);

    let Some(front) = view.front() else {
        render_finished(frame, body);
        return None;
    };

    let resting = card_rect(body);

    // The next card peeks out from behind while the front one moves
    if offset != 0 && view.next().is_some() {
        let behind = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR))
            .style(Style::default().bg(BG_DARK));
        frame.render_widget(behind, resting);
    }

    let area = shift_rect(resting, offset, body);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" #{} ", front.id))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(swipe_tint(displacement)))
        .style(Style::default().bg(BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    if let Some(direction) = emphasis(displacement) {
        let (color, alignment) = if direction.is_like() {
            (ACCENT_SECONDARY, Alignment::Left)
        } else {
            (ACCENT_PRIMARY, Alignment::Right)
        };
        let label = Paragraph::new(Span::styled(
            format!(" {} ", direction.label()),
            Style::default()
                .fg(BG_DARK)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(alignment);
        frame.render_widget(label, chunks[0]);
    }

    let content = match image {
        CardImage::Ready(lines) => Paragraph::new(lines.to_vec()).alignment(Alignment::Center),
        CardImage::Loading => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Fetching picture...",
                Style::default()
                    .fg(TEXT_SECONDARY)
                    .add_modifier(Modifier::ITALIC),
            )),
        ])
        .alignment(Alignment::Center),
        CardImage::Failed(message) => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "[!] Picture unavailable",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(TEXT_SECONDARY),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
    };
    frame.render_widget(content, chunks[1]);

    Some(area)
}

fn render_header(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let undo_style = if view.can_undo {
        Style::default().fg(ACCENT_HIGHLIGHT)
    } else {
        Style::default().fg(BORDER_COLOR)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Cat {} / {} ", view.current, view.total),
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("♥ {}", view.liked_count()),
            Style::default().fg(ACCENT_SECONDARY),
        ),
        Span::raw("  "),
        Span::styled("↶ undo", undo_style),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect, view: &ViewModel) {
    // Swipes are ignored until the front picture has loaded
    let swipe_key = |color: Color| {
        if view.front_ready {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(BORDER_COLOR)
        }
    };

    let controls = Line::from(vec![
        Span::styled(" ← ", swipe_key(ACCENT_PRIMARY)),
        Span::styled("Pass", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("→ ", swipe_key(ACCENT_SECONDARY)),
        Span::styled("Like", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("u ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("Undo", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("s ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("Likes", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn render_finished(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "That's all for now",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("s", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw(" to see your likes or "),
            Span::styled("n", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw(" for a new deck"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .style(Style::default().fg(TEXT_SECONDARY))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn liked_title(count: usize) -> String {
    if count == 1 {
        "You liked 1 cat".to_string()
    } else {
        format!("You liked {} cats", count)
    }
}

/// Renders the summary of liked cards, with thumbnails where available
pub fn render_summary(
    frame: &mut Frame,
    view: &ViewModel,
    thumbnails: &HashMap<u32, Vec<Line<'static>>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(Span::styled(
        liked_title(view.liked_count()),
        Style::default()
            .fg(ACCENT_HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );
    frame.render_widget(title, chunks[0]);

    render_liked_grid(frame, chunks[1], view, thumbnails);

    let controls = Line::from(vec![
        Span::styled(
            " n ",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("New deck", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "s ",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Continue swiping", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("u ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("Undo", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);
    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

fn render_liked_grid(
    frame: &mut Frame,
    area: Rect,
    view: &ViewModel,
    thumbnails: &HashMap<u32, Vec<Line<'static>>>,
) {
    if view.liked.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No favourites yet. Swipe right on a cat you like.",
                Style::default().fg(TEXT_SECONDARY),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let columns = (area.width / TILE_WIDTH).max(1) as usize;
    let rows = (area.height / TILE_HEIGHT).max(1) as usize;
    let capacity = columns * rows;
    let overflow = view.liked.len().saturating_sub(capacity);
    // Keep the last slot for the overflow marker
    let shown = if overflow > 0 {
        capacity.saturating_sub(1)
    } else {
        view.liked.len()
    };

    for (index, card) in view.liked.iter().take(shown).enumerate() {
        let tile = tile_rect(area, index, columns);
        let block = Block::default()
            .title(format!(" #{} ", card.id))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_SECONDARY));
        let inner = block.inner(tile);
        frame.render_widget(block, tile);

        let content = match thumbnails.get(&card.id) {
            Some(lines) => Paragraph::new(lines.clone()),
            None => Paragraph::new(Span::styled("♥", Style::default().fg(ACCENT_SECONDARY))),
        };
        frame.render_widget(content.alignment(Alignment::Center), inner);
    }

    if overflow > 0 {
        let tile = tile_rect(area, shown, columns);
        let more = Paragraph::new(vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                format!("+{} more", view.liked.len() - shown),
                Style::default().fg(TEXT_SECONDARY),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(more, tile);
    }
}

fn tile_rect(area: Rect, index: usize, columns: usize) -> Rect {
    let col = (index % columns) as u16;
    let row = (index / columns) as u16;
    let rect = Rect {
        x: area.x + col * TILE_WIDTH,
        y: area.y + row * TILE_HEIGHT,
        width: TILE_WIDTH,
        height: TILE_HEIGHT,
    };
    rect.intersection(area)
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(50, 70, area);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let key = |k: &'static str, color: Color| Span::styled(k, Style::default().fg(color));
    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![key("  → / l    ", ACCENT_SECONDARY), Span::raw("Like")]),
        Line::from(vec![key("  ← / h    ", ACCENT_PRIMARY), Span::raw("Pass")]),
        Line::from(vec![key("  u / ^Z   ", ACCENT_HIGHLIGHT), Span::raw("Undo")]),
        Line::from(vec![key("  s        ", TEXT_SECONDARY), Span::raw("Likes / back to deck")]),
        Line::from(vec![key("  n        ", TEXT_SECONDARY), Span::raw("New deck")]),
        Line::from(vec![key("  r        ", TEXT_SECONDARY), Span::raw("Retry loading")]),
        Line::from(vec![key("  o        ", TEXT_SECONDARY), Span::raw("Open in browser")]),
        Line::from(vec![key("  q / Esc  ", TEXT_SECONDARY), Span::raw("Quit")]),
        Line::from(""),
        Line::from(Span::styled(
            "Drag the card with the mouse to swipe",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(80, 70, frame.area());

    frame.render_widget(Clear, area);

    let welcome_lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "Welcome to catswp!",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("A fresh deck of cats is waiting. Pick the ones you like."),
        Line::from(""),
        Line::from(vec![
            Span::styled("  1. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Drag the card right or press "),
            Span::styled(
                "→",
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to "),
            Span::styled("like", Style::default().fg(ACCENT_SECONDARY)),
        ]),
        Line::from(vec![
            Span::styled("  2. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Drag it left or press "),
            Span::styled(
                "←",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to "),
            Span::styled("pass", Style::default().fg(ACCENT_PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("  3. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Changed your mind? "),
            Span::styled("u", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" brings the last card back"),
        ]),
        Line::from(vec![
            Span::styled("  4. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Press "),
            Span::styled("s", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" to see every cat you liked"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("?", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" at any time for the full list of shortcuts."),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to start swiping...",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )]),
    ];

    let welcome_text = Paragraph::new(welcome_lines)
        .block(
            Block::default()
                .title(Span::styled(
                    " Welcome to catswp ",
                    Style::default()
                        .fg(ACCENT_HIGHLIGHT)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome_text, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

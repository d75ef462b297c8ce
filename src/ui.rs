//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a two-row split: the feed panel on top and a one-line
//!   status bar at the bottom.
//! * The feed panel shows one of three things depending on
//!   [`FeedStatus`]: a spinner, the row window, or an error panel.
//! * Below the row window sits a one-line footer ("loading more" or the
//!   end marker). It is reserved even when empty, so the viewport height
//!   stays fixed.
//! * Rows are positioned by [`WindowConfig`](crate::window::WindowConfig);
//!   only the render range is ever turned into widgets.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, NoticeLevel};
use crate::feed::FeedStatus;
use crate::source::Item;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_feed(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

fn spinner(app: &App) -> &'static str {
    SPINNER[(app.ticks % SPINNER.len() as u64) as usize]
}

/// Render the feed panel in whichever state the feed is in.
fn draw_feed(app: &mut App, frame: &mut Frame, area: Rect) {
    let status = app.feed.status();
    if status == FeedStatus::Errored {
        app.rendered_rows = 0;
        draw_error_panel(app, frame, area);
        return;
    }

    let block = Block::default()
        .title(format!(" {} ", app.feed.source_name()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match status {
        FeedStatus::Pending => {
            app.rendered_rows = 0;
            let loading = Paragraph::new(Line::from(vec![
                Span::styled(spinner(app), Style::default().fg(Color::Cyan)),
                Span::raw(" Loading posts…"),
            ]))
            .alignment(Alignment::Center);
            let [middle] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(inner);
            frame.render_widget(loading, middle);
        }
        FeedStatus::Loaded | FeedStatus::FetchingMore | FeedStatus::Errored => {
            let [list_area, footer] = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .areas(inner);
            draw_window(app, frame, list_area);
            draw_footer(app, frame, footer, status);
        }
    }
}

/// The line below the rows: a spinner while the next page loads, an end
/// marker once the feed is exhausted, blank otherwise.
fn draw_footer(app: &App, frame: &mut Frame, area: Rect, status: FeedStatus) {
    let line = if status == FeedStatus::FetchingMore {
        let label = match app.feed.loading_page() {
            Some(page) => format!(" Loading more (page {page})…"),
            None => " Loading more…".to_string(),
        };
        Line::from(vec![
            Span::styled(spinner(app), Style::default().fg(Color::Cyan)),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ])
    } else if !app.feed.has_next_page() && !app.feed.items().is_empty() {
        Line::styled("End of feed", Style::default().fg(Color::DarkGray))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Render only the rows in the window's render range.
///
/// Overscan rows are built but fall outside `area`; rows cut by the top edge
/// are scrolled so their visible lines line up.
fn draw_window(app: &mut App, frame: &mut Frame, area: Rect) {
    app.set_viewport_height(u32::from(area.height));

    let items = app.feed.items();
    let range = app.window.render_range(app.scroll_offset, items.len());
    app.rendered_rows = range.len();

    let offset = app.scroll_offset as i64;
    let row_height = i64::from(app.window.row_height);
    let bottom_edge = i64::from(area.height);

    for index in range {
        let top = app.window.row_top(index) as i64 - offset;
        let bottom = top + row_height;
        let row = render_row(&items[index]);

        if bottom <= 0 || top >= bottom_edge {
            continue;
        }
        let clipped_top = top.max(0);
        let clipped_bottom = bottom.min(bottom_edge);
        let row_area = Rect {
            x: area.x,
            y: area.y + clipped_top as u16,
            width: area.width,
            height: (clipped_bottom - clipped_top) as u16,
        };
        let skip = (clipped_top - top) as u16;
        frame.render_widget(row.scroll((skip, 0)), row_area);
    }
}

/// One post: a bold title line followed by its body, clamped to the row.
fn render_row(item: &Item) -> Paragraph<'_> {
    let body = item.body.replace('\n', " ");
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!("#{} ", item.id),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                item.title.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(body, Style::default().fg(Color::Gray)),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::Cyan)),
    )
}

/// Shown in place of the list once a fetch has failed.
fn draw_error_panel(app: &App, frame: &mut Frame, area: Rect) {
    let message = app
        .feed
        .error()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "An error occurred while loading posts".into());

    let panel = Paragraph::new(vec![
        Line::styled(message, Style::default().fg(Color::Red)),
        Line::raw(""),
        Line::styled("Press r to reload.", Style::default().fg(Color::DarkGray)),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Error Loading Posts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(panel, area);
}

/// Render the bottom status bar: item count, notice or status, key help.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let count = Span::styled(
        format!(
            "{} posts / {} pages",
            app.feed.items().len(),
            app.feed.pages().len()
        ),
        Style::default().fg(Color::Green),
    );
    let message = match &app.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Cyan,
                NoticeLevel::Error => Color::Red,
            };
            Span::styled(
                notice.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
        None => Span::styled(app.status.as_str(), Style::default().fg(Color::Yellow)),
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        count,
        Span::raw("  "),
        message,
        Span::raw("  q: quit  ↑/↓: scroll  PgUp/PgDn  Home/End  r: reload"),
    ]));
    frame.render_widget(status, area);
}

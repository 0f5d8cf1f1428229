//! Terminal rendering. Everything here consumes engine state and reports;
//! no game rule lives in this module.

pub mod battle_scene;
pub mod character_creation;
pub mod pages;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Tabs},
    Frame,
};

use crate::game::Game;

/// Top-level pages of the game screen, mirroring the nav bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Profile,
    Arena,
    Shop,
    History,
}

impl Page {
    pub fn all() -> [Page; 4] {
        [Page::Profile, Page::Arena, Page::Shop, Page::History]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Profile => "Profile",
            Page::Arena => "Arena",
            Page::Shop => "Shop",
            Page::History => "History",
        }
    }

    pub fn index(&self) -> usize {
        Page::all().iter().position(|p| p == self).unwrap_or(0)
    }
}

/// Draws the tabbed game screen (everything outside an active battle).
pub fn draw_game_screen(
    frame: &mut Frame,
    game: &Game,
    page: Page,
    arena_selected: usize,
    notification: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Page content
            Constraint::Length(1), // Notification line
        ])
        .split(frame.size());

    let titles: Vec<Line> = Page::all()
        .iter()
        .map(|p| Line::from(format!(" {} ", p.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(page.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            ratatui::widgets::Block::default()
                .borders(ratatui::widgets::Borders::ALL)
                .title(" Arena "),
        );
    frame.render_widget(tabs, chunks[0]);

    match page {
        Page::Profile => pages::draw_profile(frame, chunks[1], game),
        Page::Arena => pages::draw_arena_selection(frame, chunks[1], game, arena_selected),
        Page::Shop => pages::draw_shop(frame, chunks[1], game),
        Page::History => pages::draw_history(frame, chunks[1], game),
    }

    draw_notification(frame, chunks[2], notification);
}

/// Renders the transient notification line, if any.
pub fn draw_notification(frame: &mut Frame, area: Rect, notification: Option<&str>) {
    if let Some(message) = notification {
        let widget = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(widget, area);
    }
}

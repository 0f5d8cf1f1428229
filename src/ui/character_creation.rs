use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::character::CharacterClass;
use crate::constants::MAX_NAME_LENGTH;

/// Name input plus class selection, the pre-game screen.
pub struct CharacterCreationScreen {
    pub name_input: String,
    pub selected_class: usize,
    pub validation_error: Option<String>,
}

impl CharacterCreationScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            selected_class: 0,
            validation_error: None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Name input
                Constraint::Length(1), // Spacer
                Constraint::Length(8), // Class cards
                Constraint::Length(2), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(1), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Create Your Fighter")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let input = Paragraph::new(format!("{}_", self.name_input))
            .block(Block::default().borders(Borders::ALL).title(" Name "))
            .style(Style::default().fg(Color::White));
        f.render_widget(input, chunks[2]);

        self.draw_class_cards(f, chunks[4]);

        let validation = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if !self.name_input.trim().is_empty() {
            Line::from(Span::styled(
                "✓ Ready to fight",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(validation), chunks[5]);

        let controls =
            Paragraph::new("[←/→] Class    [Enter] Create    [Esc] Quit")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[7]);
    }

    fn draw_class_cards(&self, f: &mut Frame, area: Rect) {
        let classes = CharacterClass::all();
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        for (i, class) in classes.iter().enumerate() {
            let stats = class.base_stats();
            let selected = i == self.selected_class;

            let border_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", class.display_name()));

            let lines = vec![
                Line::from(""),
                Line::from(format!("  HP   {}", stats.hp)),
                Line::from(format!("  ATK  {}", stats.attack)),
                Line::from(format!("  DEF  {}", stats.defense)),
            ];
            let body = Paragraph::new(lines).block(block).style(if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            });
            f.render_widget(body, cards[i]);
        }
    }

    pub fn handle_char_input(&mut self, c: char) {
        if self.name_input.chars().count() < MAX_NAME_LENGTH {
            self.name_input.push(c);
            self.validation_error = None;
        }
    }

    pub fn handle_backspace(&mut self) {
        self.name_input.pop();
        self.validation_error = None;
    }

    pub fn previous_class(&mut self) {
        let count = CharacterClass::all().len();
        self.selected_class = (self.selected_class + count - 1) % count;
    }

    pub fn next_class(&mut self) {
        self.selected_class = (self.selected_class + 1) % CharacterClass::all().len();
    }

    pub fn selected_class(&self) -> CharacterClass {
        CharacterClass::all()[self.selected_class]
    }

    pub fn get_name(&self) -> String {
        self.name_input.trim().to_string()
    }
}

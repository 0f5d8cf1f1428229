//! The four nav pages plus the campaign-complete screen.

use chrono::DateTime;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::constants::{ARMOR_UPGRADE_COST, POTION_COST, WEAPON_UPGRADE_COST};
use crate::game::Game;
use crate::history::FightResult;
use crate::opponents::selectable_tiers;

pub fn draw_profile(frame: &mut Frame, area: Rect, game: &Game) {
    let Some(character) = game.character() else {
        return;
    };
    let state = game.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(9), // Stats
            Constraint::Length(3), // Exp bar
            Constraint::Length(6), // Record
            Constraint::Min(0),    // Filler
            Constraint::Length(1), // Controls
        ])
        .split(area);

    let stats = vec![
        Line::from(vec![
            Span::styled(
                character.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  ({})", character.class.display_name())),
        ]),
        Line::from(format!("Level    {}", character.level)),
        Line::from(format!("HP       {}/{}", character.hp, character.max_hp)),
        Line::from(format!("Attack   {}", character.attack)),
        Line::from(format!("Defense  {}", character.defense)),
        Line::from(format!("Gold     {}", character.gold)),
        Line::from(format!(
            "Upgrades {} weapon / {} armor",
            character.weapon_upgrades, character.armor_upgrades
        )),
    ];
    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::ALL).title(" Fighter "));
    frame.render_widget(stats_widget, chunks[0]);

    let exp_ratio = if character.exp_to_level > 0 {
        (character.exp as f64 / character.exp_to_level as f64).min(1.0)
    } else {
        0.0
    };
    let exp_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Experience "))
        .gauge_style(Style::default().fg(Color::Magenta))
        .label(format!("{}/{}", character.exp, character.exp_to_level))
        .ratio(exp_ratio);
    frame.render_widget(exp_gauge, chunks[1]);

    let record = vec![
        Line::from(format!("Fights   {}", state.total_fights)),
        Line::from(format!("Wins     {}", state.total_wins)),
        Line::from(format!("Losses   {}", state.total_losses)),
        Line::from(format!("Win rate {}%", state.win_rate_percent())),
    ];
    let record_widget = Paragraph::new(record)
        .block(Block::default().borders(Borders::ALL).title(" Record "));
    frame.render_widget(record_widget, chunks[2]);

    let controls = Paragraph::new("[H] Rest at home    [R] Restart    [Tab] Next page    [Q] Quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls, chunks[4]);
}

pub fn draw_arena_selection(frame: &mut Frame, area: Rect, game: &Game, selected: usize) {
    let Some(character) = game.character() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        "Choose your opponent:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));

    for (i, enemy) in selectable_tiers(character.level).iter().enumerate() {
        let marker = if i == selected { "▸ " } else { "  " };
        let style = if i == selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{}{} (level {})", marker, enemy.name, enemy.tier),
            style,
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "    HP {}  ATK {}  DEF {}  —  {} gold, {} exp",
                enemy.hp, enemy.attack, enemy.defense, enemy.gold_reward, enemy.exp_reward
            ),
            Style::default().fg(Color::Gray),
        )));
    }

    let list = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Opponents "));
    frame.render_widget(list, chunks[0]);

    let controls = Paragraph::new("[↑/↓] Select    [Enter] Fight    [Tab] Next page")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls, chunks[1]);
}

pub fn draw_shop(frame: &mut Frame, area: Rect, game: &Game) {
    let Some(character) = game.character() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            format!("Your gold: {}", character.gold),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "[1] Health Potion   — {} gold   (restores all HP)",
            POTION_COST
        )),
        Line::from(format!(
            "[2] Weapon Upgrade  — {} gold  (attack +5)",
            WEAPON_UPGRADE_COST
        )),
        Line::from(format!(
            "[3] Armor Upgrade   — {} gold  (defense +3)",
            ARMOR_UPGRADE_COST
        )),
    ];
    let shop = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Shop "));
    frame.render_widget(shop, chunks[0]);

    let controls = Paragraph::new("[1-3] Buy    [Tab] Next page")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls, chunks[1]);
}

pub fn draw_history(frame: &mut Frame, area: Rect, game: &Game) {
    let state = game.state();

    let lines: Vec<Line> = if state.history.is_empty() {
        vec![Line::from(Span::styled(
            "No fights yet",
            Style::default().fg(Color::Gray),
        ))]
    } else {
        state
            .history
            .iter()
            .map(|record| {
                let (label, style) = match record.result {
                    FightResult::Win => ("WIN ", Style::default().fg(Color::Green)),
                    FightResult::Loss => ("LOSS", Style::default().fg(Color::Red)),
                };
                let when = DateTime::from_timestamp(record.timestamp, 0)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let reward = if record.gold_delta >= 0 {
                    format!("+{}", record.gold_delta)
                } else {
                    record.gold_delta.to_string()
                };
                Line::from(vec![
                    Span::styled(label, style.add_modifier(Modifier::BOLD)),
                    Span::raw(format!(
                        "  vs {:<18} {:>6} gold   {}",
                        record.opponent, reward, when
                    )),
                ])
            })
            .collect()
    };

    let history = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Fight History "),
    );
    frame.render_widget(history, area);
}

/// Campaign-complete screen: final record, nothing left to fight.
pub fn draw_victory(frame: &mut Frame, game: &Game) {
    let state = game.state();
    let area = frame.size();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Champion of the Arena ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "🏆  You have beaten the Arena Boss!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Total fights: {}", state.total_fights)),
        Line::from(format!("Wins:         {}", state.total_wins)),
        Line::from(format!("Losses:       {}", state.total_losses)),
        Line::from(format!("Win rate:     {}%", state.win_rate_percent())),
        Line::from(""),
        Line::from(Span::styled(
            "[R] Start over    [Q] Quit",
            Style::default().fg(Color::Gray),
        )),
    ];
    let body = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(body, inner);
}

//! The battle screen: hp gauges, the scrolling log and the action bar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::battle::{Actor, BattleEvent};
use crate::character::Character;
use crate::opponents::EnemyTemplate;

/// Presentation-side snapshot of the fight. Outlives the engine's session
/// so the final blow stays on screen after the battle resolves.
#[derive(Debug, Clone)]
pub struct BattleView {
    pub enemy: &'static EnemyTemplate,
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub heal_used: bool,
}

/// Visual category of a log line, mirrors the log coloring of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    PlayerAction,
    EnemyAction,
    Outcome,
}

impl LogKind {
    fn style(&self) -> Style {
        match self {
            LogKind::PlayerAction => Style::default().fg(Color::Cyan),
            LogKind::EnemyAction => Style::default().fg(Color::Red),
            LogKind::Outcome => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Turns an engine event into a log line. This is the only place flavor
/// text exists; the engine reports bare facts.
pub fn describe_event(event: &BattleEvent, enemy_name: &str) -> (LogKind, String) {
    match event {
        BattleEvent::Attack {
            actor: Actor::Player,
            damage,
            ..
        } => (
            LogKind::PlayerAction,
            format!("You attack! Damage: {}", damage),
        ),
        BattleEvent::HeavyAttack {
            actor: Actor::Player,
            damage,
            ..
        } => (
            LogKind::PlayerAction,
            format!("Heavy strike! Critical damage: {}", damage),
        ),
        BattleEvent::HeavyMiss {
            actor: Actor::Player,
        } => (
            LogKind::PlayerAction,
            "Your heavy strike misses the target!".to_string(),
        ),
        BattleEvent::Defend { .. } => (
            LogKind::PlayerAction,
            "You take a defensive stance".to_string(),
        ),
        BattleEvent::Heal { amount, .. } => {
            (LogKind::PlayerAction, format!("You restore {} HP", amount))
        }
        BattleEvent::Attack {
            actor: Actor::Enemy,
            damage,
            blocked,
        } => {
            let text = if *blocked {
                format!("{} attacks! You blocked part of it: {}", enemy_name, damage)
            } else {
                format!("{} attacks! Damage: {}", enemy_name, damage)
            };
            (LogKind::EnemyAction, text)
        }
        BattleEvent::HeavyAttack {
            actor: Actor::Enemy,
            damage,
            blocked,
        } => {
            let text = if *blocked {
                format!(
                    "{} lands a heavy strike! You blocked part of it: {}",
                    enemy_name, damage
                )
            } else {
                format!(
                    "{} lands a heavy strike! Critical damage: {}",
                    enemy_name, damage
                )
            };
            (LogKind::EnemyAction, text)
        }
        BattleEvent::HeavyMiss { actor: Actor::Enemy } => (
            LogKind::EnemyAction,
            format!("{} misses with a heavy strike!", enemy_name),
        ),
    }
}

/// Draws the full battle screen.
pub fn draw_battle(
    frame: &mut Frame,
    character: &Character,
    view: &BattleView,
    log: &[(LogKind, String)],
    waiting_for_enemy: bool,
    battle_over: bool,
) {
    let area = frame.size();
    let block = Block::default().borders(Borders::ALL).title(" Battle ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Player gauge
            Constraint::Length(3), // Enemy gauge
            Constraint::Length(1), // Stat line
            Constraint::Min(3),    // Log
            Constraint::Length(1), // Action bar
        ])
        .split(inner);

    draw_hp_gauge(
        frame,
        chunks[0],
        &character.name,
        view.player_hp,
        character.max_hp,
    );
    draw_hp_gauge(frame, chunks[1], view.enemy.name, view.enemy_hp, view.enemy.hp);

    let stat_line = Paragraph::new(format!(
        "You: ATK {} / DEF {}    {}: ATK {} / DEF {}",
        character.attack,
        character.defense,
        view.enemy.name,
        view.enemy.attack,
        view.enemy.defense
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(stat_line, chunks[2]);

    draw_log(frame, chunks[3], log);

    let action_bar = if battle_over {
        "[Enter] Back to the arena".to_string()
    } else if waiting_for_enemy {
        format!("{} is about to act...", view.enemy.name)
    } else {
        let heal = if view.heal_used {
            "[E] Heal (used)"
        } else {
            "[E] Heal"
        };
        format!("[A] Attack    [S] Heavy strike    [D] Defend    {}", heal)
    };
    let controls = Paragraph::new(action_bar)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls, chunks[4]);
}

fn draw_hp_gauge(frame: &mut Frame, area: Rect, name: &str, hp: u32, max_hp: u32) {
    let ratio = if max_hp > 0 {
        hp as f64 / max_hp as f64
    } else {
        0.0
    };
    let color = if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", name)))
        .gauge_style(Style::default().fg(color))
        .label(format!("{}/{}", hp, max_hp))
        .ratio(ratio.clamp(0.0, 1.0));
    frame.render_widget(gauge, area);
}

fn draw_log(frame: &mut Frame, area: Rect, log: &[(LogKind, String)]) {
    let block = Block::default().borders(Borders::ALL).title(" Log ");
    let inner_height = block.inner(area).height as usize;
    let visible = log.len().saturating_sub(inner_height);

    let lines: Vec<Line> = log[visible..]
        .iter()
        .map(|(kind, text)| Line::from(Span::styled(text.clone(), kind.style())))
        .collect();

    let widget = Paragraph::new(lines).block(block);
    frame.render_widget(widget, area);
}

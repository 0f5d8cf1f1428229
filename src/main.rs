mod battle;
mod build_info;
mod character;
mod constants;
mod error;
mod game;
mod history;
mod opponents;
mod progression;
mod save_manager;
mod shop;
mod ui;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use battle::PlayerAction;
use constants::{
    LEVEL_UP_ATTACK_BONUS, LEVEL_UP_DEFENSE_BONUS, LEVEL_UP_HP_BONUS, TURN_DELAY_MS,
    VICTORY_SCREEN_DELAY_MS,
};
use error::GameError;
use game::{BattleEnd, Game, Intent, Response, ShopItem, TurnOutcome};
use opponents::selectable_tiers;
use save_manager::SaveManager;
use ui::battle_scene::{describe_event, draw_battle, BattleView, LogKind};
use ui::character_creation::CharacterCreationScreen;
use ui::Page;

const NOTIFICATION_SECONDS: u64 = 3;

enum Screen {
    Creation,
    Game,
    Battle,
    Victory,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "arena {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Arena - Turn-Based Combat Mini-Game\n");
                println!("Usage: arena [--version | --help]");
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'arena --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();

    let save_manager = SaveManager::new()?;
    let game = match save_manager.load() {
        Some(state) => Game::from_state(state),
        None => Game::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, game, &save_manager);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

/// File-based logging so the alternate screen stays clean. Failures here
/// only cost us the log.
fn init_logging() {
    let Some(project_dirs) = ProjectDirs::from("", "", "arena") else {
        return;
    };
    let log_dir = project_dirs.data_local_dir();
    if std::fs::create_dir_all(log_dir).is_err() {
        return;
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "arena.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .init();

    // Keep the writer thread alive for the whole process.
    std::mem::forget(guard);
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut game: Game,
    save_manager: &SaveManager,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();

    let mut screen = if game.character().is_some() {
        Screen::Game
    } else {
        Screen::Creation
    };
    let mut creation = CharacterCreationScreen::new();
    let mut page = Page::Profile;
    let mut arena_selected: usize = 0;
    let mut confirm_restart = false;
    let mut notification: Option<(String, Instant)> = None;

    // Battle presentation state
    let mut battle_log: Vec<(LogKind, String)> = Vec::new();
    let mut battle_view: Option<BattleView> = None;
    let mut battle_over = false;
    let mut enemy_turn_due: Option<Instant> = None;
    let mut victory_due: Option<Instant> = None;

    loop {
        if notification
            .as_ref()
            .is_some_and(|(_, until)| Instant::now() >= *until)
        {
            notification = None;
        }

        // The pacer: run the enemy half-turn once its delay has elapsed.
        if enemy_turn_due.is_some_and(|due| Instant::now() >= due) {
            enemy_turn_due = None;
            match game.advance_enemy_turn(&mut rng, Utc::now().timestamp()) {
                Ok(outcome) => {
                    apply_turn_outcome(
                        &outcome,
                        &game,
                        save_manager,
                        &mut battle_log,
                        &mut battle_view,
                        &mut battle_over,
                        &mut victory_due,
                    );
                }
                Err(e) => notify(&mut notification, error_message(&e)),
            }
        }

        if victory_due.is_some_and(|due| Instant::now() >= due) {
            victory_due = None;
            screen = Screen::Victory;
        }

        match screen {
            Screen::Creation => {
                terminal.draw(|f| creation.draw(f, f.size()))?;
            }
            Screen::Game => {
                let prompt;
                let message = if confirm_restart {
                    prompt = "Restart and lose all progress? [Y/N]".to_string();
                    Some(prompt.as_str())
                } else {
                    notification.as_ref().map(|(m, _)| m.as_str())
                };
                terminal.draw(|f| {
                    ui::draw_game_screen(f, &game, page, arena_selected, message)
                })?;
            }
            Screen::Battle => {
                terminal.draw(|f| {
                    if let (Some(character), Some(view)) = (game.character(), battle_view.as_ref())
                    {
                        draw_battle(
                            f,
                            character,
                            view,
                            &battle_log,
                            enemy_turn_due.is_some(),
                            battle_over,
                        );
                        ui::draw_notification(
                            f,
                            ratatui::layout::Rect {
                                x: f.size().x,
                                y: f.size().height.saturating_sub(1),
                                width: f.size().width,
                                height: 1,
                            },
                            notification.as_ref().map(|(m, _)| m.as_str()),
                        );
                    }
                })?;
            }
            Screen::Victory => {
                terminal.draw(|f| ui::pages::draw_victory(f, &game))?;
            }
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key_event) = event::read()? else {
            continue;
        };

        match screen {
            Screen::Creation => match key_event.code {
                KeyCode::Char(c) => creation.handle_char_input(c),
                KeyCode::Backspace => creation.handle_backspace(),
                KeyCode::Left => creation.previous_class(),
                KeyCode::Right => creation.next_class(),
                KeyCode::Enter => {
                    let intent = Intent::CreateCharacter {
                        name: creation.get_name(),
                        class: creation.selected_class(),
                    };
                    match game.handle(intent, &mut rng, Utc::now().timestamp()) {
                        Ok(_) => {
                            persist(save_manager, &game);
                            creation = CharacterCreationScreen::new();
                            page = Page::Profile;
                            screen = Screen::Game;
                        }
                        Err(e) => creation.validation_error = Some(error_message(&e)),
                    }
                }
                KeyCode::Esc => break,
                _ => {}
            },

            Screen::Game => {
                if confirm_restart {
                    match key_event.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => {
                            confirm_restart = false;
                            restart(&mut game, save_manager, &mut rng);
                            screen = Screen::Creation;
                        }
                        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                            confirm_restart = false;
                        }
                        _ => {}
                    }
                    continue;
                }

                match key_event.code {
                    KeyCode::Tab => {
                        let pages = Page::all();
                        page = pages[(page.index() + 1) % pages.len()];
                        arena_selected = 0;
                    }
                    KeyCode::Up if page == Page::Arena => {
                        arena_selected = arena_selected.saturating_sub(1);
                    }
                    KeyCode::Down if page == Page::Arena => {
                        let count = game
                            .character()
                            .map(|c| selectable_tiers(c.level).len())
                            .unwrap_or(0);
                        arena_selected = (arena_selected + 1).min(count.saturating_sub(1));
                    }
                    KeyCode::Enter if page == Page::Arena => {
                        let tier = game
                            .character()
                            .and_then(|c| selectable_tiers(c.level).get(arena_selected))
                            .map(|t| t.tier);
                        if let Some(tier) = tier {
                            match game.handle(
                                Intent::SelectOpponent { tier },
                                &mut rng,
                                Utc::now().timestamp(),
                            ) {
                                Ok(Response::BattleStarted { enemy }) => {
                                    let player_name = game
                                        .character()
                                        .map(|c| c.name.clone())
                                        .unwrap_or_default();
                                    battle_log = vec![(
                                        LogKind::Outcome,
                                        format!("The battle begins! {} VS {}", player_name, enemy.name),
                                    )];
                                    battle_view = Some(BattleView {
                                        enemy,
                                        player_hp: game
                                            .battle()
                                            .map(|b| b.session.player_hp)
                                            .unwrap_or(0),
                                        enemy_hp: enemy.hp,
                                        heal_used: false,
                                    });
                                    battle_over = false;
                                    enemy_turn_due = None;
                                    screen = Screen::Battle;
                                }
                                Ok(_) => {}
                                Err(e) => notify(&mut notification, error_message(&e)),
                            }
                        }
                    }
                    KeyCode::Char(c) => match (page, c.to_ascii_lowercase()) {
                        (Page::Profile, 'h') => {
                            match game.handle(Intent::HealAtHome, &mut rng, Utc::now().timestamp())
                            {
                                Ok(_) => {
                                    persist(save_manager, &game);
                                    notify(&mut notification, "Health restored!".to_string());
                                }
                                Err(e) => notify(&mut notification, error_message(&e)),
                            }
                        }
                        (Page::Profile, 'r') => confirm_restart = true,
                        (Page::Shop, '1') => {
                            buy(&mut game, save_manager, &mut rng, ShopItem::Potion, &mut notification)
                        }
                        (Page::Shop, '2') => {
                            buy(&mut game, save_manager, &mut rng, ShopItem::Weapon, &mut notification)
                        }
                        (Page::Shop, '3') => {
                            buy(&mut game, save_manager, &mut rng, ShopItem::Armor, &mut notification)
                        }
                        (_, 'q') => break,
                        _ => {}
                    },
                    KeyCode::Esc => break,
                    _ => {}
                }
            }

            Screen::Battle => {
                if battle_over {
                    if key_event.code == KeyCode::Enter && victory_due.is_none() {
                        screen = Screen::Game;
                        page = Page::Arena;
                        arena_selected = 0;
                        battle_view = None;
                    }
                    continue;
                }
                if enemy_turn_due.is_some() {
                    continue;
                }

                let action = match key_event.code {
                    KeyCode::Char(c) => match c.to_ascii_lowercase() {
                        'a' => Some(PlayerAction::Attack),
                        's' => Some(PlayerAction::HeavyAttack),
                        'd' => Some(PlayerAction::Defend),
                        'e' => Some(PlayerAction::Heal),
                        _ => None,
                    },
                    _ => None,
                };
                let Some(action) = action else { continue };

                match game.handle(
                    Intent::SubmitAction(action),
                    &mut rng,
                    Utc::now().timestamp(),
                ) {
                    Ok(Response::Turn(outcome)) => {
                        let ended = apply_turn_outcome(
                            &outcome,
                            &game,
                            save_manager,
                            &mut battle_log,
                            &mut battle_view,
                            &mut battle_over,
                            &mut victory_due,
                        );
                        if !ended {
                            enemy_turn_due =
                                Some(Instant::now() + Duration::from_millis(TURN_DELAY_MS));
                        }
                    }
                    Ok(_) => {}
                    Err(e) => notify(&mut notification, error_message(&e)),
                }
            }

            Screen::Victory => match key_event.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    restart(&mut game, save_manager, &mut rng);
                    screen = Screen::Creation;
                }
                KeyCode::Char('q') | KeyCode::Esc => break,
                _ => {}
            },
        }
    }

    Ok(())
}

/// Renders a turn report into the log, advances the view snapshot and, if
/// the battle just ended, settles the screen state. Returns whether the
/// battle ended.
fn apply_turn_outcome(
    outcome: &TurnOutcome,
    game: &Game,
    save_manager: &SaveManager,
    battle_log: &mut Vec<(LogKind, String)>,
    battle_view: &mut Option<BattleView>,
    battle_over: &mut bool,
    victory_due: &mut Option<Instant>,
) -> bool {
    let Some(view) = battle_view.as_mut() else {
        return false;
    };

    for event in &outcome.report.events {
        battle_log.push(describe_event(event, view.enemy.name));
    }
    view.player_hp = outcome.report.player_hp;
    view.enemy_hp = outcome.report.enemy_hp;
    if let Some(active) = game.battle() {
        view.heal_used = active.session.heal_used;
    }

    let Some(end) = &outcome.end else {
        return false;
    };

    match end {
        BattleEnd::Victory(summary) => {
            battle_log.push((
                LogKind::Outcome,
                format!("🎉 VICTORY! You defeated {}!", view.enemy.name),
            ));
            battle_log.push((
                LogKind::Outcome,
                format!(
                    "💰 Received {} gold and {} exp",
                    summary.gold_gained, summary.exp_gained
                ),
            ));
            if summary.levels_gained > 0 {
                battle_log.push((
                    LogKind::Outcome,
                    format!("⭐ LEVEL UP! You reached level {}!", summary.new_level),
                ));
                battle_log.push((
                    LogKind::Outcome,
                    format!(
                        "HP +{}, Attack +{}, Defense +{}",
                        summary.levels_gained * LEVEL_UP_HP_BONUS,
                        summary.levels_gained * LEVEL_UP_ATTACK_BONUS,
                        summary.levels_gained * LEVEL_UP_DEFENSE_BONUS
                    ),
                ));
            }
            if summary.campaign_complete {
                *victory_due =
                    Some(Instant::now() + Duration::from_millis(VICTORY_SCREEN_DELAY_MS));
            }
        }
        BattleEnd::Defeat(summary) => {
            battle_log.push((
                LogKind::Outcome,
                format!("💀 DEFEAT! {} has beaten you!", view.enemy.name),
            ));
            battle_log.push((
                LogKind::Outcome,
                format!("💰 Lost {} gold", summary.gold_lost),
            ));
        }
    }

    *battle_over = true;
    persist(save_manager, game);
    true
}

fn buy(
    game: &mut Game,
    save_manager: &SaveManager,
    rng: &mut impl rand::Rng,
    item: ShopItem,
    notification: &mut Option<(String, Instant)>,
) {
    match game.handle(Intent::Buy(item), rng, Utc::now().timestamp()) {
        Ok(_) => {
            persist(save_manager, game);
            let message = match item {
                ShopItem::Potion => "Health potion purchased! HP restored.",
                ShopItem::Weapon => "Weapon upgraded! Attack +5",
                ShopItem::Armor => "Armor upgraded! Defense +3",
            };
            notify(notification, message.to_string());
        }
        Err(e) => notify(notification, error_message(&e)),
    }
}

fn restart(game: &mut Game, save_manager: &SaveManager, rng: &mut impl rand::Rng) {
    let _ = game.handle(Intent::Restart, rng, Utc::now().timestamp());
    if let Err(e) = save_manager.delete() {
        tracing::warn!(error = %e, "failed to delete save");
    }
}

fn persist(save_manager: &SaveManager, game: &Game) {
    if let Err(e) = save_manager.store(game.state()) {
        tracing::warn!(error = %e, "failed to store save");
    }
}

fn notify(notification: &mut Option<(String, Instant)>, message: String) {
    *notification = Some((
        message,
        Instant::now() + Duration::from_secs(NOTIFICATION_SECONDS),
    ));
}

fn error_message(error: &GameError) -> String {
    match error {
        GameError::InsufficientFunds => "Not enough gold!".to_string(),
        GameError::AlreadyFull => "You are already at full health!".to_string(),
        other => format!("{}", other),
    }
}

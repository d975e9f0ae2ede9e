use crossterm::event::KeyCode;

use homing_shooter::config::Tuning;
use homing_shooter::entities::*;
use homing_shooter::input::*;

fn make_state() -> GameState {
    GameState {
        player: Player { x: 350.0, y: 300.0, health: 100 },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        phase: Phase::Running,
        area: PlayArea { width: 800.0, height: 600.0 },
        tuning: Tuning::default(),
        next_enemy_id: 0,
        ticks: 0,
    }
}

// ── command_for ───────────────────────────────────────────────────────────────

#[test]
fn arrows_and_wasd_move() {
    let cases = [
        (KeyCode::Up, Direction::Up),
        (KeyCode::Down, Direction::Down),
        (KeyCode::Left, Direction::Left),
        (KeyCode::Right, Direction::Right),
        (KeyCode::Char('w'), Direction::Up),
        (KeyCode::Char('S'), Direction::Down),
        (KeyCode::Char('a'), Direction::Left),
        (KeyCode::Char('D'), Direction::Right),
    ];
    for (code, dir) in cases {
        assert_eq!(command_for(code), Some(Command::Move(dir)), "{code:?}");
    }
}

#[test]
fn space_fires() {
    assert_eq!(command_for(KeyCode::Char(' ')), Some(Command::Fire));
}

#[test]
fn other_keys_map_to_nothing() {
    for code in [KeyCode::Enter, KeyCode::Char('x'), KeyCode::Tab, KeyCode::F(1)] {
        assert_eq!(command_for(code), None);
    }
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn move_steps_by_soldier_speed() {
    let s = make_state();
    assert_eq!(move_player(&s, Direction::Up).player.y, 290.0);
    assert_eq!(move_player(&s, Direction::Down).player.y, 310.0);
    assert_eq!(move_player(&s, Direction::Left).player.x, 340.0);
    assert_eq!(move_player(&s, Direction::Right).player.x, 360.0);
}

#[test]
fn move_clamps_at_top_left() {
    let mut s = make_state();
    s.player.x = 4.0;
    s.player.y = 0.0;
    assert_eq!(move_player(&s, Direction::Left).player.x, 0.0);
    assert_eq!(move_player(&s, Direction::Up).player.y, 0.0);
}

#[test]
fn move_clamps_at_bottom_right() {
    let mut s = make_state();
    s.player.x = 745.0;
    s.player.y = 550.0;
    // box must stay inside: max is extent - 50
    assert_eq!(move_player(&s, Direction::Right).player.x, 750.0);
    assert_eq!(move_player(&s, Direction::Down).player.y, 550.0);
}

#[test]
fn move_keeps_health() {
    let mut s = make_state();
    s.player.health = 42;
    assert_eq!(move_player(&s, Direction::Left).player.health, 42);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _ = move_player(&s, Direction::Left);
    let _ = fire(&s);
    assert_eq!(s.player.x, 350.0);
    assert!(s.bullets.is_empty());
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_spawns_bullet_at_muzzle() {
    let s = fire(&make_state());
    assert_eq!(s.bullets, vec![Bullet { x: 370.0, y: 300.0, speed: 10.0 }]);
}

#[test]
fn fire_has_no_cap() {
    let mut s = make_state();
    for _ in 0..25 {
        s = fire(&s);
    }
    assert_eq!(s.bullets.len(), 25);
}

// ── apply_command gating ──────────────────────────────────────────────────────

#[test]
fn commands_apply_while_running() {
    let s = make_state();
    let moved = apply_command(&s, Command::Move(Direction::Up));
    assert_eq!(moved.player.y, 290.0);
    let fired = apply_command(&s, Command::Fire);
    assert_eq!(fired.bullets.len(), 1);
}

#[test]
fn commands_ignored_unless_running() {
    for phase in [Phase::NotStarted, Phase::GameOver, Phase::Won] {
        let mut s = make_state();
        s.phase = phase;
        assert_eq!(apply_command(&s, Command::Fire), s, "{phase:?}");
        assert_eq!(apply_command(&s, Command::Move(Direction::Right)), s, "{phase:?}");
    }
}

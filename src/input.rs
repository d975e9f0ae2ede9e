/// Input mapping: raw key codes in, player movement or bullets out.
///
/// Only in-run controls live here.  Host actions (start, replay, quit) are
/// handled by the binary because they are not gated on a running game.

use crossterm::event::KeyCode;

use crate::entities::{Bullet, GameState, Phase, Player, MUZZLE_OFFSET};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Fire,
}

/// Arrow keys and WASD move, Space fires.  Anything else maps to nothing.
pub fn command_for(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Move(Direction::Right)
        }
        KeyCode::Char(' ') => Command::Fire,
        _ => return None,
    };
    Some(command)
}

/// Apply a command.  Outside a running game this is a no-op.
pub fn apply_command(state: &GameState, command: Command) -> GameState {
    if state.phase != Phase::Running {
        return state.clone();
    }
    match command {
        Command::Move(direction) => move_player(state, direction),
        Command::Fire => fire(state),
    }
}

/// Step the player by the soldier speed, keeping its box inside the area.
pub fn move_player(state: &GameState, direction: Direction) -> GameState {
    let step = state.tuning.soldier_speed;
    let Player { x, y, .. } = state.player;
    let (x, y) = match direction {
        Direction::Up => (x, (y - step).max(0.0)),
        Direction::Down => (x, (y + step).min(state.area.max_y())),
        Direction::Left => ((x - step).max(0.0), y),
        Direction::Right => ((x + step).min(state.area.max_x()), y),
    };
    GameState {
        player: Player {
            x,
            y,
            ..state.player
        },
        ..state.clone()
    }
}

/// Fire a bullet from the player's muzzle.  There is no cap on bullets.
pub fn fire(state: &GameState) -> GameState {
    let bullet = Bullet {
        x: state.player.x + MUZZLE_OFFSET,
        y: state.player.y,
        speed: state.tuning.bullet_speed,
    };
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    GameState {
        bullets,
        ..state.clone()
    }
}

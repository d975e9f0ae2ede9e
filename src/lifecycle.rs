/// Run lifecycle: the phase machine and the state resets that go with it.
///
/// `next_phase` is the only place a phase changes.  Everything else in the
/// crate asks it for the successor instead of assigning phases directly.

use log::info;

use crate::config::Tuning;
use crate::entities::{GameState, Phase, PlayArea, Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    /// The player pressed play.
    Start,
    /// The player asked for another run.
    Replay,
    /// Health reached zero or below during a tick.
    HealthDepleted,
    /// Score reached the winning threshold during a tick.
    ScoreReached,
}

/// The phase transition function.  Pairs not listed keep the current phase.
pub fn next_phase(phase: Phase, event: PhaseEvent, tuning: &Tuning) -> Phase {
    match (phase, event) {
        (Phase::NotStarted, PhaseEvent::Start) => Phase::Running,
        (Phase::Running, PhaseEvent::HealthDepleted) => Phase::GameOver,
        (Phase::Running, PhaseEvent::ScoreReached) if tuning.winning_score.is_some() => {
            Phase::Won
        }
        (Phase::GameOver | Phase::Won, PhaseEvent::Replay) => pre_run_phase(tuning),
        (current, _) => current,
    }
}

/// Where a run begins: the start screen, or straight into play without one.
pub fn pre_run_phase(tuning: &Tuning) -> Phase {
    if tuning.start_screen {
        Phase::NotStarted
    } else {
        Phase::Running
    }
}

/// Phase after a tick's damage and scoring have been applied.  A win in the
/// same tick as a loss is kept as a win.
pub fn settle(phase: Phase, health: i32, score: u32, tuning: &Tuning) -> Phase {
    let won = tuning.winning_score.is_some_and(|target| score >= target);
    if won {
        return next_phase(phase, PhaseEvent::ScoreReached, tuning);
    }
    if health <= 0 {
        return next_phase(phase, PhaseEvent::HealthDepleted, tuning);
    }
    phase
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state shown before the first run.
pub fn initial_state(tuning: Tuning, area: PlayArea) -> GameState {
    let (x, y) = area.clamp(tuning.start_position.0, tuning.start_position.1);
    GameState {
        player: Player {
            x,
            y,
            health: tuning.max_health,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        phase: pre_run_phase(&tuning),
        area,
        tuning,
        next_enemy_id: 0,
        ticks: 0,
    }
}

// ── User actions ─────────────────────────────────────────────────────────────

pub fn start(state: &GameState) -> GameState {
    let phase = next_phase(state.phase, PhaseEvent::Start, &state.tuning);
    if phase != state.phase {
        info!("run started ({:?} -> {:?})", state.phase, phase);
    }
    GameState {
        phase,
        ..state.clone()
    }
}

/// Reset the run.  Ignored unless the current run is over.
pub fn replay(state: &GameState) -> GameState {
    if !state.phase.is_over() {
        return state.clone();
    }
    let tuning = &state.tuning;
    let (x, y) = state
        .area
        .clamp(tuning.replay_position.0, tuning.replay_position.1);
    let phase = next_phase(state.phase, PhaseEvent::Replay, tuning);
    info!(
        "replay after {:?} with score {} ({:?} -> {:?})",
        state.phase, state.score, state.phase, phase
    );
    GameState {
        player: Player {
            x,
            y,
            health: tuning.max_health,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        phase,
        ticks: 0,
        // keep handing out fresh ids across runs
        next_enemy_id: state.next_enemy_id,
        ..state.clone()
    }
}

/// Adopt a new play area, pulling the player back inside it.  Entities
/// already outside are left to the normal culling rules.
pub fn resize(state: &GameState, area: PlayArea) -> GameState {
    if area == state.area {
        return state.clone();
    }
    let (x, y) = area.clamp(state.player.x, state.player.y);
    if (x, y) != (state.player.x, state.player.y) {
        info!(
            "play area shrank to {}x{}, player moved to ({x}, {y})",
            area.width, area.height
        );
    }
    GameState {
        player: Player {
            x,
            y,
            ..state.player
        },
        area,
        ..state.clone()
    }
}

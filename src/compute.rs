/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.
///
/// Nothing here mutates outside `Phase::Running`: the spawner and the tick
/// both hand back an unchanged clone in any other phase.

use log::{debug, info};
use rand::Rng;

use crate::entities::{Bullet, Enemy, EnemyId, GameState, Phase, Player, ENEMY_SIZE};
use crate::lifecycle::settle;

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Drop one enemy onto the top edge at a random column.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.phase != Phase::Running {
        return state.clone();
    }
    // PlayArea guarantees width >= ENEMY_SIZE, so the range is never empty
    let max_x = (state.area.width - ENEMY_SIZE).max(0.0);
    let x = rng.gen_range(0.0..=max_x).floor();
    let enemy = Enemy {
        id: EnemyId(state.next_enemy_id),
        x,
        y: 0.0,
        speed: state.tuning.enemy_speed,
    };
    debug!("spawned enemy {:?} at x={x}", enemy.id);

    let mut enemies = state.enemies.clone();
    enemies.push(enemy);
    GameState {
        enemies,
        next_enemy_id: state.next_enemy_id + 1,
        ..state.clone()
    }
}

/// Remove an enemy by id.  Removing an id that is already gone is a no-op.
pub fn remove_enemy(state: &GameState, id: EnemyId) -> GameState {
    GameState {
        enemies: state
            .enemies
            .iter()
            .filter(|e| e.id != id)
            .copied()
            .collect(),
        ..state.clone()
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Advance one enemy a single step straight at `(target_x, target_y)`.
/// The heading is recomputed from scratch every call, so there is no inertia.
pub fn home_toward(enemy: &Enemy, target_x: f32, target_y: f32) -> Enemy {
    let dx = target_x - enemy.x;
    let dy = target_y - enemy.y;
    let angle = dy.atan2(dx);
    Enemy {
        x: enemy.x + angle.cos() * enemy.speed,
        y: enemy.y + angle.sin() * enemy.speed,
        ..*enemy
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Pair bullets with enemies.  A bullet destroys at most one enemy (the first
/// unclaimed one it overlaps, in collection order) and an enemy dies at most
/// once.  Returns the survivors of both lists and the number of kills.
fn resolve_shots(bullets: Vec<Bullet>, enemies: Vec<Enemy>) -> (Vec<Bullet>, Vec<Enemy>, u32) {
    let mut spent = vec![false; bullets.len()];
    let mut killed = vec![false; enemies.len()];

    for (bi, bullet) in bullets.iter().enumerate() {
        let bullet_box = bullet.hitbox();
        let hit = enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !killed[*ei] && bullet_box.overlaps(&enemy.hitbox()));
        if let Some((ei, enemy)) = hit {
            debug!("bullet {bi} destroyed enemy {:?}", enemy.id);
            killed[ei] = true;
            spent[bi] = true;
        }
    }

    let kills = killed.iter().filter(|&&k| k).count() as u32;
    let bullets = bullets
        .into_iter()
        .zip(spent)
        .filter_map(|(b, s)| (!s).then_some(b))
        .collect();
    let enemies = enemies
        .into_iter()
        .zip(killed)
        .filter_map(|(e, k)| (!k).then_some(e))
        .collect();
    (bullets, enemies, kills)
}

// ── Per-tick step ────────────────────────────────────────────────────────────

/// Advance the simulation by one tick.
///
/// Movement reads only the incoming snapshot (enemies chase the player where
/// it stood when the tick began), collisions run on the moved positions, and
/// the result is committed as a single new state.
pub fn tick(state: &GameState) -> GameState {
    if state.phase != Phase::Running {
        return state.clone();
    }
    let player = state.player;
    let area = state.area;

    // ── 1. Move bullets up, cull at the top edge ─────────────────────────────
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .map(|b| Bullet {
            y: b.y - b.speed,
            ..*b
        })
        .filter(|b| b.y > 0.0)
        .collect();

    // ── 2. Home enemies on the player, cull past the bottom edge ─────────────
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| home_toward(e, player.x, player.y))
        .filter(|e| e.y < area.height)
        .collect();

    // ── 3. Collision: bullets ↔ enemies ──────────────────────────────────────
    let (bullets, enemies, kills) = resolve_shots(bullets, enemies);

    // ── 4. Collision: player ↔ surviving enemies ─────────────────────────────
    let player_box = player.hitbox();
    let hits = enemies
        .iter()
        .filter(|e| player_box.overlaps(&e.hitbox()))
        .count() as i32;
    if hits > 0 {
        debug!("player hit by {hits} enemies");
    }
    let health = player
        .health
        .saturating_sub(hits.saturating_mul(state.tuning.damage));
    let score = state.score + kills;

    // ── 5. Lifecycle checks ──────────────────────────────────────────────────
    let phase = settle(state.phase, health, score, &state.tuning);
    if phase != state.phase {
        info!(
            "run ended as {:?} after {} ticks (score {score}, health {health})",
            phase,
            state.ticks + 1
        );
    }

    GameState {
        player: Player { health, ..player },
        bullets,
        enemies,
        score,
        phase,
        ticks: state.ticks + 1,
        ..state.clone()
    }
}

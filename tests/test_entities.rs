use homing_shooter::config::Tuning;
use homing_shooter::entities::*;
use homing_shooter::error::ConfigError;

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect { x, y, w, h }
}

// ── Rect::overlaps ────────────────────────────────────────────────────────────

#[test]
fn touching_boxes_do_not_overlap() {
    let enemy = rect(100.0, 100.0, 50.0, 50.0);
    // bullet flush against each side in turn
    let left = rect(90.0, 120.0, 10.0, 40.0);
    let right = rect(150.0, 120.0, 10.0, 40.0);
    let above = rect(120.0, 60.0, 10.0, 40.0);
    let below = rect(120.0, 150.0, 10.0, 40.0);
    for bullet in [left, right, above, below] {
        assert!(!bullet.overlaps(&enemy), "{bullet:?} should only touch");
        assert!(!enemy.overlaps(&bullet));
    }
}

#[test]
fn one_unit_of_overlap_counts() {
    let enemy = rect(100.0, 100.0, 50.0, 50.0);
    let bullet = rect(91.0, 61.0, 10.0, 40.0); // 1px into the corner
    assert!(bullet.overlaps(&enemy));
    assert!(enemy.overlaps(&bullet));
}

#[test]
fn overlapping_on_one_axis_only_is_a_miss() {
    let a = rect(0.0, 0.0, 50.0, 50.0);
    let b = rect(10.0, 200.0, 50.0, 50.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn hitboxes_use_entity_sizes() {
    let p = Player { x: 1.0, y: 2.0, health: 100 };
    let e = Enemy { id: EnemyId(0), x: 3.0, y: 4.0, speed: 1.8 };
    let b = Bullet { x: 5.0, y: 6.0, speed: 10.0 };
    assert_eq!(p.hitbox(), rect(1.0, 2.0, PLAYER_SIZE, PLAYER_SIZE));
    assert_eq!(e.hitbox(), rect(3.0, 4.0, ENEMY_SIZE, ENEMY_SIZE));
    assert_eq!(b.hitbox(), rect(5.0, 6.0, BULLET_WIDTH, BULLET_HEIGHT));
}

// ── PlayArea ──────────────────────────────────────────────────────────────────

#[test]
fn play_area_must_fit_an_entity() {
    assert!(PlayArea::new(50.0, 50.0).is_ok());
    assert_eq!(
        PlayArea::new(49.0, 600.0),
        Err(ConfigError::PlayAreaTooSmall { width: 49.0, height: 600.0, min: 50.0 })
    );
    assert!(PlayArea::new(800.0, 0.0).is_err());
    assert!(PlayArea::new(f32::NAN, 600.0).is_err());
}

#[test]
fn play_area_rejects_infinite_sides() {
    assert_eq!(
        PlayArea::new(f32::INFINITY, 600.0),
        Err(ConfigError::PlayAreaNotFinite { width: f32::INFINITY, height: 600.0 })
    );
    assert!(matches!(
        PlayArea::new(800.0, f32::INFINITY),
        Err(ConfigError::PlayAreaNotFinite { .. })
    ));
    assert!(PlayArea::new(f32::NEG_INFINITY, 600.0).is_err());
}

#[test]
fn play_area_clamps_player_box_inside() {
    let area = PlayArea::new(800.0, 600.0).unwrap();
    assert_eq!(area.max_x(), 750.0);
    assert_eq!(area.max_y(), 550.0);
    assert_eq!(area.clamp(-5.0, 900.0), (0.0, 550.0));
    assert_eq!(area.clamp(300.0, 200.0), (300.0, 200.0));
}

// ── Phase ─────────────────────────────────────────────────────────────────────

#[test]
fn only_game_over_and_won_are_over() {
    assert!(!Phase::NotStarted.is_over());
    assert!(!Phase::Running.is_over());
    assert!(Phase::GameOver.is_over());
    assert!(Phase::Won.is_over());
}

// ── GameState ─────────────────────────────────────────────────────────────────

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player { x: 350.0, y: 500.0, health: 100 },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        phase: Phase::Running,
        area: PlayArea { width: 800.0, height: 600.0 },
        tuning: Tuning::default(),
        next_enemy_id: 0,
        ticks: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(Enemy { id: EnemyId(1), x: 5.0, y: 5.0, speed: 1.8 });

    assert_eq!(original.player.x, 350.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}

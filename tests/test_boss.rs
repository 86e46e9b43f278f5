use portal_platformer::boss::*;
use portal_platformer::entities::*;
use portal_platformer::geometry::Rect;
use portal_platformer::level::*;

use pretty_assertions::assert_eq;

fn make_boss(ranged: bool) -> Boss {
    Boss::new(&EnemySpawn { x: 400.0, y: 250.0, speed: 2.0, platform_index: 0 }, ranged)
}

fn make_player(x: f32, y: f32, velocity_y: f32) -> Player {
    let mut p = Player::new(&PlayerConfig::default(), &GameConfig::default());
    p.x = x;
    p.y = y;
    p.velocity_y = velocity_y;
    p
}

fn arena() -> Vec<Platform> {
    vec![Rect::new(0.0, 378.0, 1600.0, 20.0)]
}

// ── Zones ─────────────────────────────────────────────────────────────────────

#[test]
fn far_zone_uses_base_speed() {
    let mut boss = make_boss(false);
    boss.direction = -1.0;
    assert_eq!(boss.think(&make_player(1100.0, 300.0, 0.0)), Zone::Far);
    assert_eq!(boss.speed, 2.0);
    assert_eq!(boss.direction, -1.0); // keeps patrolling
}

#[test]
fn medium_zone_walks_toward_player() {
    let mut boss = make_boss(false);
    boss.direction = -1.0;
    assert_eq!(boss.think(&make_player(800.0, 300.0, 0.0)), Zone::Medium);
    assert_eq!(boss.speed, 1.0);
    assert_eq!(boss.direction, 1.0);
}

#[test]
fn close_zone_charges() {
    let mut boss = make_boss(false);
    assert_eq!(boss.think(&make_player(150.0, 300.0, 0.0)), Zone::Close);
    assert_eq!(boss.speed, 3.0);
    assert_eq!(boss.direction, -1.0);
}

#[test]
fn zone_boundaries() {
    let mut boss = make_boss(false);
    assert_eq!(boss.think(&make_player(1000.0, 300.0, 0.0)), Zone::Medium); // exactly 600
    assert_eq!(boss.think(&make_player(700.0, 300.0, 0.0)), Zone::Close); // exactly 300
}

#[test]
fn close_dead_zone_keeps_facing() {
    let mut boss = make_boss(false);
    boss.direction = 1.0;
    boss.think(&make_player(375.0, 300.0, 0.0));
    assert_eq!(boss.direction, 1.0);

    boss.think(&make_player(365.0, 300.0, 0.0));
    assert_eq!(boss.direction, -1.0);
}

#[test]
fn dodges_falling_player_overhead() {
    let mut boss = make_boss(false);
    assert_eq!(boss.think(&make_player(410.0, 190.0, 5.0)), Zone::Dodge);
    assert_eq!(boss.speed, 6.0);
    assert_eq!(boss.direction, -1.0);

    assert_eq!(boss.think(&make_player(390.0, 190.0, 5.0)), Zone::Dodge);
    assert_eq!(boss.direction, 1.0);
}

#[test]
fn no_dodge_unless_falling() {
    let mut boss = make_boss(false);
    assert_eq!(boss.think(&make_player(410.0, 190.0, -3.0)), Zone::Close);
    assert_eq!(boss.think(&make_player(410.0, 190.0, 0.0)), Zone::Close);
}

#[test]
fn no_dodge_when_barely_above() {
    let mut boss = make_boss(false);
    assert_eq!(boss.think(&make_player(410.0, 200.0, 5.0)), Zone::Close); // gap exactly 50
}

#[test]
fn update_moves_along_platform() {
    let mut boss = make_boss(false);
    let player = make_player(900.0, 300.0, 0.0); // medium zone, to the right
    boss.update(&arena(), 16.0, &player, 1600.0);
    assert_eq!(boss.x, 401.0);

    // Far away: base speed, facing left alone.
    let mut patrolling = make_boss(false);
    patrolling.direction = -1.0;
    patrolling.update(&arena(), 16.0, &make_player(1500.0, 300.0, 0.0), 1600.0);
    assert_eq!(patrolling.x, 398.0);
}

#[test]
fn stays_on_platform_while_chasing() {
    let platforms = arena();
    let mut boss = make_boss(false);
    let player = make_player(1590.0, 300.0, 0.0);
    for i in 0..1000 {
        boss.update(&platforms, i as f64 * 16.0, &player, 1600.0);
        assert!(boss.x >= 0.0 && boss.x + boss.width <= 1600.0);
    }
}

// ── Animation ─────────────────────────────────────────────────────────────────

#[test]
fn animation_ping_pongs() {
    let mut boss = make_boss(false);
    let mut now = 0.0;
    let mut seen = Vec::new();
    for _ in 0..9 {
        now += 210.0;
        boss.update_animation(now);
        seen.push(boss.frame_x);
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 3, 2, 1, 0, 1]);
}

#[test]
fn animation_waits_for_interval() {
    let mut boss = make_boss(false);
    boss.update_animation(200.0);
    assert_eq!(boss.frame_x, 0);
    boss.update_animation(201.0);
    assert_eq!(boss.frame_x, 1);
}

#[test]
fn hit_does_not_reset_animation() {
    let mut boss = make_boss(false);
    for i in 1..=3 {
        boss.update_animation(i as f64 * 210.0);
    }
    assert_eq!(boss.frame_x, 3);
    boss.take_damage(700.0);
    assert_eq!(boss.frame_x, 3);
    assert_eq!(boss.sequence_index, 3);
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn ten_hits_kill_for_380_points() {
    let mut boss = make_boss(false);
    let mut total = 0;
    for i in 0..9 {
        assert_eq!(boss.take_damage(i as f64 * 100.0), HIT_POINTS);
        total += HIT_POINTS;
        assert!(boss.alive);
    }
    total += boss.take_damage(1000.0);
    assert_eq!(total, 380);
    assert!(!boss.alive);
    assert_eq!(boss.health, 0);
    assert!(!boss.is_targetable());
}

#[test]
fn dead_boss_takes_no_damage() {
    let mut boss = make_boss(false);
    boss.health = 1;
    assert_eq!(boss.take_damage(0.0), KILL_POINTS);
    assert_eq!(boss.take_damage(10.0), 0);
    assert_eq!(boss.health, 0);
}

#[test]
fn health_percentage_tracks_hits() {
    let mut boss = make_boss(false);
    for _ in 0..5 {
        boss.take_damage(0.0);
    }
    assert_eq!(boss.health_percentage(), 0.5);
}

#[test]
fn hit_flash_expires() {
    let platforms = arena();
    let far = make_player(1500.0, 300.0, 0.0);
    let mut boss = make_boss(false);
    boss.take_damage(1000.0);
    assert!(boss.is_hit);
    boss.update(&platforms, 1399.0, &far, 1600.0);
    assert!(boss.is_hit);
    boss.update(&platforms, 1400.0, &far, 1600.0);
    assert!(!boss.is_hit);
}

#[test]
fn dead_boss_is_frozen() {
    let mut boss = make_boss(false);
    boss.alive = false;
    let before = boss.clone();
    boss.update(&arena(), 5000.0, &make_player(500.0, 300.0, 0.0), 1600.0);
    assert_eq!(boss, before);
}

// ── Ranged attack ─────────────────────────────────────────────────────────────

#[test]
fn fires_toward_player_in_range() {
    let mut boss = make_boss(true);
    let player = make_player(200.0, 270.0, 0.0);
    boss.update(&arena(), 16.0, &player, 1600.0);

    assert_eq!(boss.projectiles.len(), 1);
    let fireball = &boss.projectiles[0];
    assert!(fireball.velocity_x < 0.0);
    assert!(fireball.x < boss.x);
    assert!(fireball.y >= boss.y && fireball.y + fireball.height <= boss.y + boss.height);
}

#[test]
fn fire_respects_cooldown() {
    let platforms = arena();
    let mut boss = make_boss(true);
    let player = make_player(200.0, 270.0, 0.0);

    boss.update(&platforms, 16.0, &player, 1600.0);
    boss.update(&platforms, 32.0, &player, 1600.0);
    assert_eq!(boss.projectiles.len(), 1);

    boss.update(&platforms, 16.0 + SHOOT_COOLDOWN_MS, &player, 1600.0);
    assert_eq!(boss.projectiles.len(), 2);
}

#[test]
fn holds_fire_out_of_range() {
    let mut boss = make_boss(true);
    let player = make_player(1500.0, 300.0, 0.0);
    boss.update(&arena(), 16.0, &player, 1600.0);
    assert!(boss.projectiles.is_empty());
}

#[test]
fn ranged_attack_can_be_disabled() {
    let mut boss = make_boss(false);
    let player = make_player(200.0, 270.0, 0.0);
    boss.update(&arena(), 16.0, &player, 1600.0);
    assert!(boss.projectiles.is_empty());
}

#[test]
fn killing_blow_clears_fireballs() {
    let mut boss = make_boss(true);
    boss.projectiles.push(BossProjectile::new(300.0, 260.0, -1.0, 5.0));
    boss.health = 1;
    boss.take_damage(0.0);
    assert!(boss.projectiles.is_empty());
}

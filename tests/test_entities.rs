use portal_platformer::entities::*;
use portal_platformer::geometry::Rect;
use portal_platformer::input::InputFrame;
use portal_platformer::level::*;

use pretty_assertions::assert_eq;

fn make_player() -> Player {
    Player::new(&PlayerConfig::default(), &GameConfig::default())
}

fn idle() -> InputFrame {
    InputFrame::default()
}

fn right() -> InputFrame {
    InputFrame { right: true, ..InputFrame::default() }
}

fn level_platforms() -> Vec<Platform> {
    LevelData::default().platforms
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn player_starts_at_spawn() {
    let p = make_player();
    assert_eq!((p.x, p.y), (50.0, 200.0));
    assert_eq!((p.width, p.height), (30.0, 30.0));
    assert_eq!(p.direction, 1.0);
    assert!(!p.is_jumping);
    assert_eq!(p.animation, AnimState::Idle);
}

#[test]
fn move_right_then_fall() {
    let mut p = make_player();
    p.update(&right(), 16.0, 16.0);
    assert_eq!(p.x, 55.0);
    assert_eq!(p.velocity_y, 0.5);
    assert_eq!(p.y, 200.5);
}

#[test]
fn move_left_faces_left() {
    let mut p = make_player();
    p.update(&InputFrame { left: true, ..idle() }, 16.0, 16.0);
    assert_eq!(p.x, 45.0);
    assert_eq!(p.direction, -1.0);
}

#[test]
fn both_directions_cancel_out() {
    let mut p = make_player();
    p.update(&InputFrame { left: true, right: true, ..idle() }, 16.0, 16.0);
    assert_eq!(p.x, 50.0);
}

#[test]
fn jump_from_ground() {
    let mut p = make_player();
    p.update(&InputFrame { jump: true, ..idle() }, 16.0, 16.0);
    assert!(p.is_jumping);
    assert_eq!(p.velocity_y, -11.5); // -12 impulse, then one tick of gravity
    assert_eq!(p.y, 188.5);
    assert_eq!(p.animation, AnimState::Jump);
}

#[test]
fn no_double_jump() {
    let mut p = make_player();
    p.is_jumping = true;
    p.velocity_y = 3.0;
    p.update(&InputFrame { jump: true, ..idle() }, 16.0, 16.0);
    assert_eq!(p.velocity_y, 3.5);
    assert_eq!(p.animation, AnimState::Fall);
}

#[test]
fn bounce_uses_jump_impulse() {
    let mut p = make_player();
    p.velocity_y = 6.0;
    p.bounce(0.7);
    assert!((p.velocity_y + 8.4).abs() < 1e-4);
}

// ── Player damage & timers ────────────────────────────────────────────────────

#[test]
fn take_damage_respawns_and_costs_a_life() {
    let mut p = make_player();
    p.x = 900.0;
    p.y = 100.0;
    p.velocity_y = 7.0;

    let lives = p.take_damage(3, 1000.0);
    assert_eq!(lives, 2);
    assert_eq!((p.x, p.y, p.velocity_y), (50.0, 200.0, 0.0));
    assert!(p.is_invulnerable);
    assert!(p.is_hit);
}

#[test]
fn take_damage_ignored_while_invulnerable() {
    let mut p = make_player();
    let lives = p.take_damage(3, 0.0);
    p.x = 400.0;
    assert_eq!(p.take_damage(lives, 100.0), 2);
    assert_eq!(p.x, 400.0);
}

#[test]
fn take_damage_never_underflows() {
    let mut p = make_player();
    assert_eq!(p.take_damage(0, 0.0), 0);
}

#[test]
fn hit_flash_expires_before_invulnerability() {
    let mut p = make_player();
    p.make_invulnerable(1000.0, 2000.0);

    p.refresh_timers(1499.0);
    assert!(p.is_hit);
    p.refresh_timers(1500.0);
    assert!(!p.is_hit);
    assert!(p.is_invulnerable);

    p.refresh_timers(2999.0);
    assert!(p.is_invulnerable);
    p.refresh_timers(3000.0);
    assert!(!p.is_invulnerable);
}

#[test]
fn later_hit_restarts_windows() {
    let mut p = make_player();
    p.make_invulnerable(0.0, 2000.0);
    p.make_invulnerable(1800.0, 2000.0);

    p.refresh_timers(2100.0);
    assert!(p.is_hit);
    p.refresh_timers(2500.0);
    assert!(!p.is_hit);
    assert!(p.is_invulnerable);
    p.refresh_timers(3800.0);
    assert!(!p.is_invulnerable);
}

// ── Player animation ──────────────────────────────────────────────────────────

#[test]
fn hit_animation_overrides_motion() {
    let mut p = make_player();
    p.make_invulnerable(0.0, 2000.0);
    p.is_jumping = true;
    p.update(&right(), 16.0, 10.0);
    assert_eq!(p.animation, AnimState::Hit);
}

#[test]
fn idle_frames_advance_at_fifteen_fps() {
    let mut p = make_player();
    p.update(&idle(), 70.0, 70.0);
    assert_eq!(p.animation_frame, 1);
    p.update(&idle(), 70.0, 140.0);
    assert_eq!(p.animation_frame, 2);
}

#[test]
fn idle_frames_hold_below_interval() {
    let mut p = make_player();
    for i in 1..=3 {
        p.update(&idle(), 20.0, 20.0 * i as f64);
    }
    assert_eq!(p.animation_frame, 0);
    p.update(&idle(), 20.0, 80.0);
    assert_eq!(p.animation_frame, 1);
}

#[test]
fn state_change_resets_frame() {
    let mut p = make_player();
    p.update(&idle(), 70.0, 70.0);
    p.update(&idle(), 70.0, 140.0);
    assert_eq!(p.animation_frame, 2);

    p.update(&right(), 20.0, 160.0);
    assert_eq!(p.animation, AnimState::Run);
    assert_eq!(p.animation_frame, 0);
    assert_eq!(p.animation_timer, 20.0);
}

#[test]
fn single_frame_states_never_advance() {
    let mut p = make_player();
    p.is_jumping = true;
    p.velocity_y = 5.0;
    for i in 1..=10 {
        p.update(&idle(), 100.0, 100.0 * i as f64);
    }
    assert_eq!(p.animation, AnimState::Fall);
    assert_eq!(p.animation_frame, 0);
}

#[test]
fn frame_counts_per_state() {
    assert_eq!(AnimState::Idle.frame_count(), 11);
    assert_eq!(AnimState::Run.frame_count(), 12);
    assert_eq!(AnimState::Jump.frame_count(), 1);
    assert_eq!(AnimState::Fall.frame_count(), 1);
    assert_eq!(AnimState::Hit.frame_count(), 7);
}

// ── Coins & portal ────────────────────────────────────────────────────────────

#[test]
fn coin_collects_once() {
    let mut coin = Coin::new(&CoinSpawn { x: 350.0, y: 200.0, power_up: true });
    assert_eq!(
        coin.collect(),
        CoinPickup { collected: true, points: 10, power_up: true }
    );
    assert_eq!(
        coin.collect(),
        CoinPickup { collected: false, points: 0, power_up: false }
    );
    assert!(coin.collected);
}

#[test]
fn plain_coin_has_no_power_up() {
    let mut coin = Coin::new(&CoinSpawn { x: 0.0, y: 0.0, power_up: false });
    let pickup = coin.collect();
    assert!(pickup.collected);
    assert!(!pickup.power_up);
    assert_eq!(coin.bounds(), Rect::new(0.0, 0.0, 20.0, 20.0));
}

#[test]
fn portal_lock_toggle() {
    let mut portal = Portal::new(2700.0, 222.0, false);
    assert_eq!(portal.radius(), 64.0);
    portal.lock();
    assert!(portal.is_locked);
    portal.unlock();
    assert!(!portal.is_locked);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

fn make_enemy() -> Enemy {
    Enemy::new(&EnemySpawn { x: 320.0, y: 220.0, speed: 2.0, platform_index: 1 })
}

#[test]
fn enemy_patrols_right() {
    let mut e = make_enemy();
    e.update(&level_platforms(), 16.0);
    assert_eq!(e.x, 322.0);
    assert_eq!(e.direction, 1.0);
}

#[test]
fn enemy_turns_at_left_edge() {
    let mut e = make_enemy();
    e.x = 301.0;
    e.direction = -1.0;
    e.update(&level_platforms(), 16.0);
    assert_eq!(e.x, 300.0);
    assert_eq!(e.direction, 1.0);
}

#[test]
fn enemy_turns_at_right_edge() {
    let mut e = make_enemy();
    e.x = 455.0;
    e.update(&level_platforms(), 16.0);
    assert_eq!(e.x, 456.0); // 500 - 44
    assert_eq!(e.direction, -1.0);
}

#[test]
fn enemy_stays_on_platform() {
    let platforms = level_platforms();
    let mut e = make_enemy();
    for i in 0..500 {
        e.update(&platforms, i as f64 * 16.0);
        assert!(e.x >= 300.0 && e.x + e.width <= 500.0, "x = {}", e.x);
    }
}

#[test]
fn enemy_dies_after_hit_animation() {
    let platforms = level_platforms();
    let mut e = make_enemy();
    e.hit(1000.0);
    assert!(e.is_targetable()); // still collides while dying
    assert_eq!(e.animation_state(), "hit");

    e.update(&platforms, 1200.0);
    assert!(e.alive);
    assert!(e.is_in_hit_animation(1299.0));
    assert!(!e.is_in_hit_animation(1300.0));

    e.update(&platforms, 1300.0);
    assert!(!e.alive);
    assert!(!e.is_targetable());
    assert!(!e.is_visible(1300.0));
}

#[test]
fn second_hit_does_not_restart_death() {
    let mut e = make_enemy();
    e.hit(1000.0);
    e.hit(1200.0);
    assert_eq!(e.hit_at, 1000.0);
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn shot_leaves_from_facing_edge() {
    let mut p = make_player();
    let shot = Projectile::from_player(&p);
    assert_eq!((shot.x, shot.y, shot.direction), (80.0, 215.0, 1.0));

    p.direction = -1.0;
    let shot = Projectile::from_player(&p);
    assert_eq!((shot.x, shot.direction), (50.0, -1.0));
}

#[test]
fn shot_moves_and_leaves_view() {
    let mut shot = Projectile::new(885.0, 100.0, 1.0);
    shot.update();
    assert_eq!(shot.x, 895.0);
    assert!(!shot.is_out_of_bounds(0.0, 800.0));
    shot.update();
    assert!(shot.is_out_of_bounds(0.0, 800.0));

    let left = Projectile::new(-101.0, 100.0, -1.0);
    assert!(left.is_out_of_bounds(0.0, 800.0));
}

#[test]
fn fireball_moves_horizontally() {
    let mut f = BossProjectile::new(100.0, 200.0, 1.0, 5.0);
    f.update(3000.0);
    assert_eq!((f.x, f.y), (105.0, 200.0));
    assert!(f.active);
}

#[test]
fn fireball_expires_outside_world() {
    let mut f = BossProjectile::new(-198.0, 200.0, -1.0, 5.0);
    f.update(3000.0);
    assert!(!f.active);

    let mut f = BossProjectile::new(3198.0, 200.0, 1.0, 5.0);
    f.update(3000.0);
    assert!(!f.active);
}

#[test]
fn inactive_fireball_is_frozen() {
    let mut f = BossProjectile::new(100.0, 200.0, 1.0, 5.0);
    f.active = false;
    f.update(3000.0);
    assert_eq!(f.x, 100.0);
}

#[test]
fn fireball_animation_wraps() {
    let mut f = BossProjectile::new(100.0, 200.0, 1.0, 5.0);
    f.current_frame = 3;
    f.animation_timer = 0.9;
    f.update(3000.0);
    assert_eq!(f.current_frame, 0);
    assert_eq!(f.animation_timer, 0.0);
}

//! Cross-entity collision policy.
//!
//! Every function here borrows entities for one call and keeps nothing.

use crate::boss::Boss;
use crate::entities::{Combatant, Enemy, Platform, Player, Portal};
use crate::geometry::{clamp_to_bounds, distance, overlaps, Bounds, Clamped, Rect};

/// Extra pixels past an enemy's top edge that still count as a stomp.
pub const STOMP_TOLERANCE: f32 = 10.0;
/// Fraction of the player's width that must rest on a platform to land.
pub const LANDING_OVERLAP: f32 = 0.5;
/// Player centre must be within this fraction of the portal radius.
pub const PORTAL_CENTER_THRESHOLD: f32 = 0.6;
/// Downward nudge given when stepping off a ledge with no vertical speed.
const LEDGE_NUDGE: f32 = 0.1;

// ── Platforms ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformContact {
    pub is_grounded: bool,
    /// Index of the platform landed on.
    pub platform: Option<usize>,
    pub side: Option<Side>,
}

/// Resolve landings and ceiling bumps against every platform.
///
/// The player is marked airborne first and only a landing this call clears
/// it, so stepping off a ledge always costs one tick of falling.
pub fn check_platform_collisions(player: &mut Player, platforms: &[Platform]) -> PlatformContact {
    let was_airborne = player.is_jumping;
    player.is_jumping = true;

    let mut contact = PlatformContact::default();

    for (index, platform) in platforms.iter().enumerate() {
        let body = player.bounds();
        if !overlaps(&body, platform) {
            continue;
        }

        let platform_top = platform.y;
        let platform_bottom = platform.bottom();

        if player.velocity_y > 0.0 && body.bottom() > platform_top && body.y < platform_top {
            if body.horizontal_overlap(platform) >= body.width * LANDING_OVERLAP {
                player.y = platform_top - player.height;
                player.velocity_y = 0.0;
                player.is_jumping = false;
                contact = PlatformContact {
                    is_grounded: true,
                    platform: Some(index),
                    side: Some(Side::Top),
                };
            }
        } else if player.velocity_y < 0.0
            && body.y < platform_bottom
            && body.bottom() > platform_bottom
        {
            player.y = platform_bottom;
            player.velocity_y = 0.0;
            contact.side = Some(Side::Bottom);
        }
    }

    if !contact.is_grounded && !was_airborne && player.velocity_y == 0.0 {
        player.velocity_y = LEDGE_NUDGE;
    }

    contact
}

// ── Enemies & boss ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    /// Player landed on the target from above.
    Stomp,
    /// Target hurt the player.
    Damage,
}

/// Classify a player/target touch, or `None` if it has no effect.
pub fn check_enemy_collision<T: Combatant + ?Sized>(player: &Player, target: &T) -> Option<Contact> {
    if !target.is_targetable() || player.is_invulnerable {
        return None;
    }

    let target_bounds = target.bounds();
    let body = player.bounds();
    if !overlaps(&body, &target_bounds) {
        return None;
    }

    let penetration = body.bottom() - target_bounds.y;
    let falling = player.velocity_y > 0.0;
    if falling && penetration >= 0.0 && penetration <= player.velocity_y + STOMP_TOLERANCE {
        Some(Contact::Stomp)
    } else {
        Some(Contact::Damage)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Enemy(usize),
    Boss,
}

/// First live target the shot overlaps; enemies are checked before the boss.
pub fn check_projectile_collisions(
    shot: &Rect,
    enemies: &[Enemy],
    boss: Option<&Boss>,
) -> Option<HitTarget> {
    if let Some(index) = enemies
        .iter()
        .position(|e| e.is_targetable() && overlaps(shot, &e.bounds()))
    {
        return Some(HitTarget::Enemy(index));
    }

    match boss {
        Some(b) if b.is_targetable() && overlaps(shot, &b.bounds()) => Some(HitTarget::Boss),
        _ => None,
    }
}

// ── World bounds & portal ─────────────────────────────────────────────────────

/// Horizontal walls and a floor; no ceiling.
pub fn keep_in_bounds(rect: &Rect, bounds: &Bounds) -> Clamped {
    clamp_to_bounds(rect, bounds)
}

/// Overlap alone is not enough: the player's centre must be well inside.
pub fn check_portal_entry(player: &Player, portal: &Portal, threshold: f32) -> bool {
    if portal.is_locked {
        return false;
    }
    let body = player.bounds();
    let gate = portal.bounds();
    if !overlaps(&body, &gate) {
        return false;
    }
    distance(body.center(), gate.center()) < portal.radius() * threshold
}

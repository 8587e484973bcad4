//! Items module - the effect registry
//!
//! Holds the fixed item catalog, rarity-weighted selection, and the
//! active-effect bookkeeping. Timestamps are caller-supplied milliseconds from
//! a monotonic clock; nothing in here reads the time itself.
//!
//! Selection is two-stage: a rarity tier is drawn from the weight table
//! (`Common 50, Uncommon 30, Rare 15, Epic 4, Legendary 1`), then an item is
//! drawn uniformly among the catalog entries of that tier.

use log::warn;
use serde::Serialize;

use crate::rng::RandomSource;
use crate::types::{
    ItemKind, Rarity, MULTI_CLEAR_SCORE_MULTIPLIER, SLOW_MOTION_MULTIPLIER, TOTAL_RARITY_WEIGHT,
};

/// Immutable catalog record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ItemDefinition {
    pub kind: ItemKind,
    pub name: &'static str,
    pub description: &'static str,
    /// Effect length in milliseconds; 0 means instantaneous
    pub duration_ms: u64,
    pub rarity: Rarity,
}

impl ItemDefinition {
    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }
}

/// The fixed catalog. Every rarity tier has at least one entry.
pub const CATALOG: [ItemDefinition; 8] = [
    ItemDefinition {
        kind: ItemKind::ClearLine,
        name: "Line Clear",
        description: "Removes the bottom line immediately",
        duration_ms: 0,
        rarity: Rarity::Common,
    },
    ItemDefinition {
        kind: ItemKind::SlowMotion,
        name: "Slow Motion",
        description: "Pieces fall at half speed for 10 seconds",
        duration_ms: 10_000,
        rarity: Rarity::Common,
    },
    ItemDefinition {
        kind: ItemKind::GhostPiece,
        name: "Ghost Piece",
        description: "Shows where the piece will land for 15 seconds",
        duration_ms: 15_000,
        rarity: Rarity::Uncommon,
    },
    ItemDefinition {
        kind: ItemKind::Bomb,
        name: "Bomb",
        description: "Clears the 3x3 area around the board center",
        duration_ms: 0,
        rarity: Rarity::Uncommon,
    },
    ItemDefinition {
        kind: ItemKind::LineBomb,
        name: "Line Bomb",
        description: "Removes the fifth line from the bottom",
        duration_ms: 0,
        rarity: Rarity::Rare,
    },
    ItemDefinition {
        kind: ItemKind::Freeze,
        name: "Freeze",
        description: "Pieces stop falling for 8 seconds",
        duration_ms: 8_000,
        rarity: Rarity::Rare,
    },
    ItemDefinition {
        kind: ItemKind::MultiClear,
        name: "Multi Clear",
        description: "Line clear score is doubled for 20 seconds",
        duration_ms: 20_000,
        rarity: Rarity::Epic,
    },
    ItemDefinition {
        kind: ItemKind::RainbowPiece,
        name: "Rainbow Piece",
        description: "The next piece matches every color",
        duration_ms: 0,
        rarity: Rarity::Legendary,
    },
];

pub fn catalog() -> &'static [ItemDefinition] {
    &CATALOG
}

/// Catalog entry for a kind
pub fn definition(kind: ItemKind) -> ItemDefinition {
    CATALOG
        .iter()
        .copied()
        .find(|d| d.kind == kind)
        .unwrap_or(CATALOG[0])
}

/// Map a roll in `[0, TOTAL_RARITY_WEIGHT)` to its tier by cumulative weight
pub fn rarity_for_roll(roll: u32) -> Option<Rarity> {
    let mut cumulative = 0;
    for rarity in Rarity::ALL {
        cumulative += rarity.weight();
        if roll < cumulative {
            return Some(rarity);
        }
    }
    None
}

/// Draw an item: rarity tier by weight, then uniformly within the tier.
pub fn random_item(rng: &mut impl RandomSource) -> ItemDefinition {
    let roll = rng.next_below(TOTAL_RARITY_WEIGHT);
    if let Some(rarity) = rarity_for_roll(roll) {
        let in_tier = |d: &&ItemDefinition| d.rarity == rarity;
        let count = CATALOG.iter().filter(in_tier).count();
        if count > 0 {
            let idx = rng.next_below(count as u32) as usize % count;
            if let Some(item) = CATALOG.iter().filter(in_tier).nth(idx) {
                return *item;
            }
        }
    }
    warn!("item selection fell through for roll {}, using default item", roll);
    CATALOG[0]
}

/// An item's in-progress timed influence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveEffect {
    pub item: ItemDefinition,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl ActiveEffect {
    pub fn new(item: ItemDefinition, start_ms: u64) -> Self {
        Self {
            item,
            start_ms,
            end_ms: start_ms.saturating_add(item.duration_ms),
        }
    }

    /// Instant items never expire; timed items expire once `now > end`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        !self.item.is_instant() && now_ms > self.end_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if self.item.is_instant() {
            0
        } else {
            self.end_ms.saturating_sub(now_ms)
        }
    }
}

/// Engine behavior derived from the set of active effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectModifiers {
    pub fall_speed_multiplier: f64,
    pub freeze_remaining_ms: u64,
    pub score_multiplier: u32,
    pub ghost_preview: bool,
}

impl EffectModifiers {
    pub fn is_frozen(&self) -> bool {
        self.freeze_remaining_ms > 0
    }
}

impl Default for EffectModifiers {
    fn default() -> Self {
        Self {
            fall_speed_multiplier: 1.0,
            freeze_remaining_ms: 0,
            score_multiplier: 1,
            ghost_preview: false,
        }
    }
}

/// Recompute modifiers from scratch. Same-kind effects do not stack.
pub fn derive_modifiers(effects: &[ActiveEffect], now_ms: u64) -> EffectModifiers {
    let mut m = EffectModifiers::default();
    for effect in effects {
        match effect.item.kind {
            ItemKind::SlowMotion => m.fall_speed_multiplier = SLOW_MOTION_MULTIPLIER,
            ItemKind::Freeze => m.freeze_remaining_ms = effect.remaining_ms(now_ms),
            ItemKind::MultiClear => m.score_multiplier = MULTI_CLEAR_SCORE_MULTIPLIER,
            ItemKind::GhostPiece => m.ghost_preview = true,
            ItemKind::ClearLine | ItemKind::Bomb | ItemKind::LineBomb | ItemKind::RainbowPiece => {}
        }
    }
    m
}

/// Drop expired effects, then derive modifiers from the survivors.
pub fn advance_effects(effects: &mut Vec<ActiveEffect>, now_ms: u64) -> EffectModifiers {
    effects.retain(|e| !e.is_expired(now_ms));
    derive_modifiers(effects, now_ms)
}

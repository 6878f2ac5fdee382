//! Effect descriptors.
//!
//! A card carries an ordered list of `{kind, value}` descriptors. The list
//! is the only representation the resolver consumes; legacy shorthand
//! fields on card JSON are folded into it at ingestion time.

use serde::{Deserialize, Serialize};

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    /// Deal `value + strength` damage to the target.
    Damage,
    /// Gain `value + dexterity` block.
    Block,
    /// Draw `value` cards.
    Draw,
    /// Gain `value` energy (may exceed the per-turn maximum).
    Energy,
    /// Apply `value` vulnerable stacks to the target.
    Vulnerable,
    /// Apply `value` weak stacks to the target.
    Weak,
    /// Gain `value` strength for the rest of combat.
    Strength,
    /// Gain `value` dexterity for the rest of combat.
    Dexterity,
    /// Restore `value` hp, up to max.
    Heal,
    /// Lose `value` hp, never below 1.
    SelfDamage,
    /// Change run corruption by `value`.
    Corruption,
}

impl EffectKind {
    /// Every kind, in declaration order.
    pub const ALL: [EffectKind; 11] = [
        EffectKind::Damage,
        EffectKind::Block,
        EffectKind::Draw,
        EffectKind::Energy,
        EffectKind::Vulnerable,
        EffectKind::Weak,
        EffectKind::Strength,
        EffectKind::Dexterity,
        EffectKind::Heal,
        EffectKind::SelfDamage,
        EffectKind::Corruption,
    ];

    /// Does this kind act on an enemy rather than on the player?
    #[must_use]
    pub const fn is_targeted(self) -> bool {
        matches!(self, EffectKind::Damage | EffectKind::Vulnerable | EffectKind::Weak)
    }

    /// The JSON name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EffectKind::Damage => "damage",
            EffectKind::Block => "block",
            EffectKind::Draw => "draw",
            EffectKind::Energy => "energy",
            EffectKind::Vulnerable => "vulnerable",
            EffectKind::Weak => "weak",
            EffectKind::Strength => "strength",
            EffectKind::Dexterity => "dexterity",
            EffectKind::Heal => "heal",
            EffectKind::SelfDamage => "selfDamage",
            EffectKind::Corruption => "corruption",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One effect descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub value: i64,
}

impl Effect {
    /// Create an effect of any kind.
    #[must_use]
    pub const fn new(kind: EffectKind, value: i64) -> Self {
        Self { kind, value }
    }

    pub const fn damage(value: i64) -> Self {
        Self::new(EffectKind::Damage, value)
    }

    pub const fn block(value: i64) -> Self {
        Self::new(EffectKind::Block, value)
    }

    pub const fn draw(value: i64) -> Self {
        Self::new(EffectKind::Draw, value)
    }

    pub const fn energy(value: i64) -> Self {
        Self::new(EffectKind::Energy, value)
    }

    pub const fn vulnerable(value: i64) -> Self {
        Self::new(EffectKind::Vulnerable, value)
    }

    pub const fn weak(value: i64) -> Self {
        Self::new(EffectKind::Weak, value)
    }

    pub const fn strength(value: i64) -> Self {
        Self::new(EffectKind::Strength, value)
    }

    pub const fn dexterity(value: i64) -> Self {
        Self::new(EffectKind::Dexterity, value)
    }

    pub const fn heal(value: i64) -> Self {
        Self::new(EffectKind::Heal, value)
    }

    pub const fn self_damage(value: i64) -> Self {
        Self::new(EffectKind::SelfDamage, value)
    }

    pub const fn corruption(value: i64) -> Self {
        Self::new(EffectKind::Corruption, value)
    }
}

//! Target selection for card plays.
//!
//! A card needs a target when any of its effects is targeted (damage,
//! vulnerable, weak). Targets are indices into the list of living enemies.

use crate::cards::CardDefinition;
use crate::core::CombatError;

/// Pick the enemy index a play will act on.
///
/// - Untargeted cards ignore any requested target and resolve to `None`.
/// - An explicit index must name a living enemy.
/// - With no index, a single living enemy is chosen automatically and
///   several living enemies are an error.
/// - With no living enemies the play proceeds and targeted effects are
///   skipped.
///
/// ```
/// use roguedeck::cards::{CardDefinition, CardType};
/// use roguedeck::effects::{select_target, Effect};
///
/// let strike = CardDefinition::new("strike", "Strike", CardType::Attack, 1)
///     .with_effect(Effect::damage(6));
///
/// assert_eq!(select_target(&strike, 1, None).unwrap(), Some(0));
/// assert!(select_target(&strike, 2, None).is_err());
/// ```
pub fn select_target(
    card: &CardDefinition,
    living_enemies: usize,
    requested: Option<usize>,
) -> Result<Option<usize>, CombatError> {
    if !card.requires_target() {
        return Ok(None);
    }

    match requested {
        Some(index) if index < living_enemies => Ok(Some(index)),
        Some(index) => Err(CombatError::InvalidTarget {
            index,
            enemies: living_enemies,
        }),
        None => match living_enemies {
            0 => Ok(None),
            1 => Ok(Some(0)),
            enemies => Err(CombatError::TargetRequired { enemies }),
        },
    }
}

/// Every target choice a play of `card` could legally make.
#[must_use]
pub fn candidate_targets(card: &CardDefinition, living_enemies: usize) -> Vec<Option<usize>> {
    if card.requires_target() && living_enemies > 0 {
        (0..living_enemies).map(Some).collect()
    } else {
        vec![None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;
    use crate::effects::Effect;

    fn strike() -> CardDefinition {
        CardDefinition::new("strike", "Strike", CardType::Attack, 1).with_effect(Effect::damage(6))
    }

    fn defend() -> CardDefinition {
        CardDefinition::new("defend", "Defend", CardType::Skill, 1).with_effect(Effect::block(5))
    }

    #[test]
    fn test_untargeted_ignores_request() {
        assert_eq!(select_target(&defend(), 3, Some(7)).unwrap(), None);
    }

    #[test]
    fn test_auto_target_single_enemy() {
        assert_eq!(select_target(&strike(), 1, None).unwrap(), Some(0));
    }

    #[test]
    fn test_target_required_with_several() {
        assert!(matches!(
            select_target(&strike(), 3, None),
            Err(CombatError::TargetRequired { enemies: 3 })
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            select_target(&strike(), 2, Some(2)),
            Err(CombatError::InvalidTarget { index: 2, enemies: 2 })
        ));
    }

    #[test]
    fn test_no_living_enemies() {
        assert_eq!(select_target(&strike(), 0, None).unwrap(), None);
    }

    #[test]
    fn test_candidates() {
        assert_eq!(candidate_targets(&strike(), 2), vec![Some(0), Some(1)]);
        assert_eq!(candidate_targets(&defend(), 2), vec![None]);
        assert_eq!(candidate_targets(&strike(), 0), vec![None]);
    }
}

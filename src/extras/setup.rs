//! Setup rules that never fail, applied after the search returns.

use tracing::trace;

use crate::cards::{CardType, Catalog};
use crate::core::ShuffleRng;
use crate::rules::ConstraintState;
use crate::solver::Kingdom;

use super::SpecialCards;

/// Colony and platinum travel together.
///
/// With one already present the other follows unless excluded. With
/// neither present both are added with probability
/// `prosperity cards / cards to draw`.
pub fn draw_colony_platinum(
    catalog: &Catalog,
    special: &SpecialCards,
    constraints: &ConstraintState,
    kingdom: &mut Kingdom,
    cards_to_draw: usize,
    rng: &mut ShuffleRng,
) {
    let (Some(colony), Some(platinum)) = (special.colony, special.platinum) else {
        return;
    };
    let colony_excluded = constraints.has_excluded_card(colony);
    let platinum_excluded = constraints.has_excluded_card(platinum);
    if colony_excluded && platinum_excluded {
        return;
    }

    match (kingdom.contains(colony), kingdom.contains(platinum)) {
        (true, true) => {}
        (true, false) => {
            if !platinum_excluded {
                kingdom.add(platinum);
            }
        }
        (false, true) => {
            if !colony_excluded {
                kingdom.add(colony);
            }
        }
        (false, false) => {
            let Some(prosperity) = special.prosperity else {
                return;
            };
            let count = catalog.group(prosperity).count_in(&kingdom.cards);
            if rng.gen_below(cards_to_draw) < count {
                trace!(count, "adding colony and platinum");
                if !colony_excluded {
                    kingdom.add(colony);
                }
                if !platinum_excluded {
                    kingdom.add(platinum);
                }
            }
        }
    }
}

/// Shelters replace estates with probability `dark ages cards / cards to draw`.
pub fn draw_shelter(
    catalog: &Catalog,
    special: &SpecialCards,
    kingdom: &mut Kingdom,
    cards_to_draw: usize,
    rng: &mut ShuffleRng,
) {
    let (Some(shelter), Some(dark_ages)) = (special.shelter, special.dark_ages) else {
        return;
    };
    if kingdom.contains(shelter) {
        return;
    }

    let count = catalog.group(dark_ages).count_in(&kingdom.cards);
    if rng.gen_below(cards_to_draw) < count {
        trace!(count, "adding shelters");
        kingdom.add(shelter);
    }
}

/// Obelisk picks one of the kingdom's action cards. No action card, no target.
pub fn assign_landmark_target(
    catalog: &Catalog,
    special: &SpecialCards,
    kingdom: &mut Kingdom,
    rng: &mut ShuffleRng,
) {
    let Some(obelisk) = special.obelisk else {
        return;
    };
    if kingdom.landmark_target.is_some() || !kingdom.contains(obelisk) {
        return;
    }

    let actions: Vec<_> = kingdom
        .cards_where(catalog, |card| card.has_type(&CardType::Action))
        .collect();
    kingdom.landmark_target = rng.choose(&actions).copied();
}

/// Each trait gets a distinct action or treasure card, while they last.
pub fn assign_trait_targets(catalog: &Catalog, kingdom: &mut Kingdom, rng: &mut ShuffleRng) {
    if !kingdom.trait_targets.is_empty() {
        return;
    }
    let traits = kingdom
        .cards_where(catalog, |card| card.has_type(&CardType::Trait))
        .count();
    if traits == 0 {
        return;
    }

    let mut eligible: Vec<_> = kingdom
        .cards_where(catalog, |card| {
            card.has_type(&CardType::Action) || card.has_type(&CardType::Treasure)
        })
        .collect();
    let mut targets = Vec::with_capacity(traits);
    while targets.len() < traits {
        match rng.take(&mut eligible) {
            Some(card) => targets.push(card),
            None => break,
        }
    }
    kingdom.trait_targets = targets;
}

/// Run the post-search rules in order.
pub fn apply_setup(
    catalog: &Catalog,
    special: &SpecialCards,
    constraints: &ConstraintState,
    kingdom: &mut Kingdom,
    cards_to_draw: usize,
    rng: &mut ShuffleRng,
) {
    draw_colony_platinum(catalog, special, constraints, kingdom, cards_to_draw, rng);
    draw_shelter(catalog, special, kingdom, cards_to_draw, rng);
    assign_landmark_target(catalog, special, kingdom, rng);
    assign_trait_targets(catalog, kingdom, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, CatalogBuilder, Cost};
    use crate::core::Designations;

    struct Fixture {
        catalog: Catalog,
        special: SpecialCards,
        colony: CardId,
        platinum: CardId,
        shelter: CardId,
        obelisk: CardId,
        vault: CardId,
        hamlet: CardId,
        trait_cards: Vec<CardId>,
        event: CardId,
    }

    fn fixture() -> Fixture {
        let mut builder = CatalogBuilder::new();
        let basic = |name: &str, coins| {
            Card::new(CardId::new(0), name, "Prosperity", Cost::coins(coins))
                .with_type(CardType::Treasure)
                .basic()
        };
        let colony = builder.add_card(basic("Colony", 11)).unwrap();
        let platinum = builder.add_card(basic("Platinum", 9)).unwrap();
        let shelter = builder.add_card(basic("Shelter", 1)).unwrap();
        let obelisk = builder.card("Obelisk", "Empires", Cost::coins(0), [CardType::Landmark]).unwrap();
        let vault = builder.card("Vault", "Prosperity", Cost::coins(5), [CardType::Action]).unwrap();
        let hamlet = builder.card("Hamlet", "Cornucopia", Cost::coins(2), [CardType::Action]).unwrap();
        let trait_cards = ["Cheap", "Fated"]
            .iter()
            .map(|name| builder.card(name, "Plunder", Cost::coins(0), [CardType::Trait]).unwrap())
            .collect();
        let event = builder.card("Alms", "Adventures", Cost::coins(0), [CardType::Event]).unwrap();
        let rats = builder.card("Rats", "Dark Ages", Cost::coins(4), [CardType::Action]).unwrap();
        builder.group("Prosperity", [vault]).unwrap();
        builder.group("Dark_Ages", [rats]).unwrap();
        let catalog = builder.build();
        let special = SpecialCards::resolve(&catalog, &Designations::default());
        Fixture {
            catalog,
            special,
            colony,
            platinum,
            shelter,
            obelisk,
            vault,
            hamlet,
            trait_cards,
            event,
        }
    }

    #[test]
    fn test_colony_pulls_in_platinum() {
        let f = fixture();
        let constraints = ConstraintState::new();
        let mut kingdom = Kingdom { cards: vec![f.colony], ..Kingdom::default() };
        let mut rng = ShuffleRng::new(1);

        draw_colony_platinum(&f.catalog, &f.special, &constraints, &mut kingdom, 10, &mut rng);
        assert!(kingdom.contains(f.platinum));
    }

    #[test]
    fn test_excluded_companion_stays_out() {
        let f = fixture();
        let mut constraints = ConstraintState::new();
        constraints.add_excluded_card(f.colony);
        let mut kingdom = Kingdom { cards: vec![f.platinum], ..Kingdom::default() };
        let mut rng = ShuffleRng::new(1);

        draw_colony_platinum(&f.catalog, &f.special, &constraints, &mut kingdom, 10, &mut rng);
        assert!(!kingdom.contains(f.colony));
    }

    #[test]
    fn test_all_prosperity_always_pairs() {
        let f = fixture();
        let constraints = ConstraintState::new();
        // One prosperity card against a quota of one: the draw is always 0 < 1.
        for seed in 0..20 {
            let mut kingdom = Kingdom { cards: vec![f.vault], ..Kingdom::default() };
            let mut rng = ShuffleRng::new(seed);
            draw_colony_platinum(&f.catalog, &f.special, &constraints, &mut kingdom, 1, &mut rng);
            assert!(kingdom.contains(f.colony) && kingdom.contains(f.platinum));
        }
    }

    #[test]
    fn test_no_prosperity_never_pairs() {
        let f = fixture();
        let constraints = ConstraintState::new();
        for seed in 0..20 {
            let mut kingdom = Kingdom { cards: vec![f.hamlet], ..Kingdom::default() };
            let mut rng = ShuffleRng::new(seed);
            draw_colony_platinum(&f.catalog, &f.special, &constraints, &mut kingdom, 10, &mut rng);
            assert_eq!(kingdom.cards, vec![f.hamlet]);

            draw_shelter(&f.catalog, &f.special, &mut kingdom, 10, &mut rng);
            assert!(!kingdom.contains(f.shelter));
        }
    }

    #[test]
    fn test_shelter_added_once() {
        let f = fixture();
        let rats = f.catalog.card_by_name("Rats").unwrap();
        let mut kingdom = Kingdom { cards: vec![rats], ..Kingdom::default() };
        let mut rng = ShuffleRng::new(3);

        draw_shelter(&f.catalog, &f.special, &mut kingdom, 1, &mut rng);
        draw_shelter(&f.catalog, &f.special, &mut kingdom, 1, &mut rng);
        assert_eq!(kingdom.cards, vec![rats, f.shelter]);
    }

    #[test]
    fn test_landmark_target_is_an_action() {
        let f = fixture();
        let mut kingdom = Kingdom {
            cards: vec![f.obelisk, f.event, f.hamlet],
            ..Kingdom::default()
        };
        let mut rng = ShuffleRng::new(4);

        assign_landmark_target(&f.catalog, &f.special, &mut kingdom, &mut rng);
        assert_eq!(kingdom.landmark_target, Some(f.hamlet));
    }

    #[test]
    fn test_landmark_without_actions_is_noop() {
        let f = fixture();
        let mut kingdom = Kingdom { cards: vec![f.obelisk, f.event], ..Kingdom::default() };
        let mut rng = ShuffleRng::new(4);

        assign_landmark_target(&f.catalog, &f.special, &mut kingdom, &mut rng);
        assert_eq!(kingdom.landmark_target, None);
    }

    #[test]
    fn test_trait_targets_are_distinct() {
        let f = fixture();
        let mut kingdom = Kingdom {
            cards: vec![f.trait_cards[0], f.trait_cards[1], f.vault, f.hamlet, f.event],
            ..Kingdom::default()
        };
        let mut rng = ShuffleRng::new(8);

        assign_trait_targets(&f.catalog, &mut kingdom, &mut rng);
        let mut targets = kingdom.trait_targets.clone();
        targets.sort();
        assert_eq!(targets, vec![f.vault, f.hamlet]);
    }

    #[test]
    fn test_trait_targets_capped_by_eligible() {
        let f = fixture();
        let mut kingdom = Kingdom {
            cards: vec![f.trait_cards[0], f.trait_cards[1], f.hamlet],
            ..Kingdom::default()
        };
        let mut rng = ShuffleRng::new(8);

        assign_trait_targets(&f.catalog, &mut kingdom, &mut rng);
        assert_eq!(kingdom.trait_targets, vec![f.hamlet]);
    }
}

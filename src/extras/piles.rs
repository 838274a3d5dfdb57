//! Extra piles that depend on the completed draw.
//!
//! These run at the leaf of the search. An `InsufficientCandidates`
//! failure sends the search back to try another selection.

use im::OrdSet;
use tracing::trace;

use crate::cards::{CardId, CardType, Catalog};
use crate::core::{ShuffleRng, SolveError};
use crate::rules::ConstraintState;
use crate::solver::Kingdom;

use super::SpecialCards;

/// Kingdom cards still in the pool whose coin cost lies in `low..=high`.
fn cost_tier_candidates(catalog: &Catalog, pool: &OrdSet<CardId>, low: u8, high: u8) -> Vec<CardId> {
    pool.iter()
        .copied()
        .filter(|id| {
            let card = catalog.card(*id);
            card.is_countable() && card.cost.in_coin_tier(low, high)
        })
        .collect()
}

fn draw_side_pile(
    catalog: &Catalog,
    pool: &mut OrdSet<CardId>,
    rng: &mut ShuffleRng,
    (low, high): (u8, u8),
    pile: &'static str,
) -> Result<CardId, SolveError> {
    let candidates = cost_tier_candidates(catalog, pool, low, high);
    let card = *rng
        .choose(&candidates)
        .ok_or(SolveError::InsufficientCandidates { pile })?;
    pool.remove(&card);
    trace!(pile, card = %catalog.card(card).name, "side pile assigned");
    Ok(card)
}

/// Young witch: a cost 2 or 3 kingdom card from the remaining pool.
pub fn assign_bane(
    catalog: &Catalog,
    special: &SpecialCards,
    kingdom: &mut Kingdom,
    pool: &mut OrdSet<CardId>,
    rng: &mut ShuffleRng,
) -> Result<(), SolveError> {
    if kingdom.bane.is_some() {
        return Ok(());
    }
    let Some(witch) = special.young_witch else {
        return Ok(());
    };
    if !kingdom.contains(witch) {
        return Ok(());
    }

    let bane = draw_side_pile(catalog, pool, rng, (2, 3), "bane")?;
    kingdom.bane = Some(bane);
    kingdom.add(bane);
    Ok(())
}

/// Ferryman: a cost 3 or 4 kingdom card from the remaining pool.
pub fn assign_extra_pile(
    catalog: &Catalog,
    special: &SpecialCards,
    kingdom: &mut Kingdom,
    pool: &mut OrdSet<CardId>,
    rng: &mut ShuffleRng,
) -> Result<(), SolveError> {
    if kingdom.extra_pile.is_some() {
        return Ok(());
    }
    let Some(ferryman) = special.ferryman else {
        return Ok(());
    };
    if !kingdom.contains(ferryman) {
        return Ok(());
    }

    let pile = draw_side_pile(catalog, pool, rng, (3, 4), "extra pile")?;
    kingdom.extra_pile = Some(pile);
    kingdom.add(pile);
    Ok(())
}

/// Omens: one prophecy that is not individually excluded.
pub fn assign_prophecy(
    catalog: &Catalog,
    special: &SpecialCards,
    constraints: &ConstraintState,
    kingdom: &mut Kingdom,
    rng: &mut ShuffleRng,
) -> Result<(), SolveError> {
    let Some(prophecies) = special.prophecies else {
        return Ok(());
    };
    let prophecies = catalog.group(prophecies);

    if kingdom.prophecy.is_some() {
        return Ok(());
    }
    let has_omen = kingdom
        .cards_where(catalog, |card| card.has_type(&CardType::Omen))
        .next()
        .is_some();
    if !has_omen {
        return Ok(());
    }
    if let Some(chosen) = kingdom.cards.iter().copied().find(|card| prophecies.contains(*card)) {
        kingdom.prophecy = Some(chosen);
        return Ok(());
    }

    let candidates: Vec<CardId> = prophecies
        .cards()
        .filter(|card| !constraints.has_excluded_card(*card))
        .collect();
    let prophecy = *rng
        .choose(&candidates)
        .ok_or(SolveError::InsufficientCandidates { pile: "prophecy" })?;
    kingdom.prophecy = Some(prophecy);
    kingdom.add(prophecy);
    Ok(())
}

/// Run the leaf rules in order: bane, extra pile, prophecy.
pub fn complete_piles(
    catalog: &Catalog,
    special: &SpecialCards,
    constraints: &ConstraintState,
    kingdom: &mut Kingdom,
    pool: &mut OrdSet<CardId>,
    rng: &mut ShuffleRng,
) -> Result<(), SolveError> {
    assign_bane(catalog, special, kingdom, pool, rng)?;
    assign_extra_pile(catalog, special, kingdom, pool, rng)?;
    assign_prophecy(catalog, special, constraints, kingdom, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CatalogBuilder, Cost};
    use crate::core::Designations;

    struct Fixture {
        catalog: Catalog,
        special: SpecialCards,
        witch: CardId,
        ferryman: CardId,
        moat: CardId,
        smithy: CardId,
        copper: CardId,
        omen: CardId,
        prophecies: Vec<CardId>,
    }

    fn fixture() -> Fixture {
        let mut builder = CatalogBuilder::new();
        let witch = builder.card("Young_Witch", "Cornucopia", Cost::coins(4), [CardType::Action]).unwrap();
        let ferryman = builder.card("Ferryman", "Menagerie", Cost::coins(3), [CardType::Action]).unwrap();
        let moat = builder.card("Moat", "Base", Cost::coins(2), [CardType::Action]).unwrap();
        let smithy = builder.card("Smithy", "Base", Cost::coins(4), [CardType::Action]).unwrap();
        let copper = builder
            .add_card(
                crate::cards::Card::new(CardId::new(0), "Copper", "Base", Cost::coins(0))
                    .with_type(CardType::Treasure)
                    .basic(),
            )
            .unwrap();
        let omen = builder
            .card("Sheltered_Glen", "Rising Sun", Cost::coins(4), [CardType::Action, CardType::Omen])
            .unwrap();
        let prophecies: Vec<CardId> = ["Rapid_Expansion", "Kind_Emperor"]
            .iter()
            .map(|name| {
                builder
                    .card(name, "Rising Sun", Cost::coins(0), [CardType::Prophecy])
                    .unwrap()
            })
            .collect();
        builder.group("Prophecies", prophecies.clone()).unwrap();
        let catalog = builder.build();
        let special = SpecialCards::resolve(&catalog, &Designations::default());
        Fixture { catalog, special, witch, ferryman, moat, smithy, copper, omen, prophecies }
    }

    #[test]
    fn test_no_bane_without_young_witch() {
        let f = fixture();
        let mut kingdom = Kingdom { cards: vec![f.smithy], ..Kingdom::default() };
        let mut pool: OrdSet<CardId> = [f.moat].into_iter().collect();
        let mut rng = ShuffleRng::new(1);

        assign_bane(&f.catalog, &f.special, &mut kingdom, &mut pool, &mut rng).unwrap();
        assert_eq!(kingdom.bane, None);
        assert!(pool.contains(&f.moat));
    }

    #[test]
    fn test_bane_takes_only_eligible_card() {
        let f = fixture();
        let mut kingdom = Kingdom { cards: vec![f.witch], ..Kingdom::default() };
        let mut pool: OrdSet<CardId> = [f.moat, f.smithy, f.copper].into_iter().collect();
        let mut rng = ShuffleRng::new(5);

        assign_bane(&f.catalog, &f.special, &mut kingdom, &mut pool, &mut rng).unwrap();
        assert_eq!(kingdom.bane, Some(f.moat));
        assert!(kingdom.contains(f.moat));
        assert!(!pool.contains(&f.moat));
        assert_eq!(kingdom.countable(&f.catalog), 1);
    }

    #[test]
    fn test_bane_without_candidates_fails() {
        let f = fixture();
        let mut kingdom = Kingdom { cards: vec![f.witch], ..Kingdom::default() };
        let mut pool: OrdSet<CardId> = [f.smithy, f.copper].into_iter().collect();
        let mut rng = ShuffleRng::new(5);

        let err = assign_bane(&f.catalog, &f.special, &mut kingdom, &mut pool, &mut rng).unwrap_err();
        assert_eq!(err, SolveError::InsufficientCandidates { pile: "bane" });
        assert_eq!(kingdom.bane, None);
    }

    #[test]
    fn test_extra_pile_tier() {
        let f = fixture();
        let mut kingdom = Kingdom { cards: vec![f.ferryman], ..Kingdom::default() };
        let mut pool: OrdSet<CardId> = [f.moat, f.smithy].into_iter().collect();
        let mut rng = ShuffleRng::new(9);

        assign_extra_pile(&f.catalog, &f.special, &mut kingdom, &mut pool, &mut rng).unwrap();
        assert_eq!(kingdom.extra_pile, Some(f.smithy));
        assert_eq!(kingdom.countable(&f.catalog), 1);
    }

    #[test]
    fn test_prophecy_respects_exclusions() {
        let f = fixture();
        let mut constraints = ConstraintState::new();
        constraints.add_excluded_card(f.prophecies[0]);
        let mut kingdom = Kingdom { cards: vec![f.omen], ..Kingdom::default() };
        let mut rng = ShuffleRng::new(2);

        assign_prophecy(&f.catalog, &f.special, &constraints, &mut kingdom, &mut rng).unwrap();
        assert_eq!(kingdom.prophecy, Some(f.prophecies[1]));
        assert!(kingdom.contains(f.prophecies[1]));
    }

    #[test]
    fn test_prophecy_all_excluded_fails() {
        let f = fixture();
        let mut constraints = ConstraintState::new();
        constraints.add_excluded_cards(f.prophecies.iter().copied());
        let mut kingdom = Kingdom { cards: vec![f.omen], ..Kingdom::default() };
        let mut rng = ShuffleRng::new(2);

        let err = assign_prophecy(&f.catalog, &f.special, &constraints, &mut kingdom, &mut rng)
            .unwrap_err();
        assert_eq!(err, SolveError::InsufficientCandidates { pile: "prophecy" });
    }

    #[test]
    fn test_drawn_prophecy_needs_an_omen() {
        let f = fixture();
        let constraints = ConstraintState::new();
        let mut kingdom = Kingdom {
            cards: vec![f.smithy, f.prophecies[1]],
            ..Kingdom::default()
        };
        let mut rng = ShuffleRng::new(2);

        assign_prophecy(&f.catalog, &f.special, &constraints, &mut kingdom, &mut rng).unwrap();
        assert_eq!(kingdom.prophecy, None);

        kingdom.cards.push(f.omen);
        assign_prophecy(&f.catalog, &f.special, &constraints, &mut kingdom, &mut rng).unwrap();
        assert_eq!(kingdom.prophecy, Some(f.prophecies[1]));
        assert_eq!(kingdom.cards.len(), 3);
    }

    #[test]
    fn test_no_prophecy_without_omen() {
        let f = fixture();
        let constraints = ConstraintState::new();
        let mut kingdom = Kingdom { cards: vec![f.smithy], ..Kingdom::default() };
        let mut rng = ShuffleRng::new(2);

        assign_prophecy(&f.catalog, &f.special, &constraints, &mut kingdom, &mut rng).unwrap();
        assert_eq!(kingdom.prophecy, None);
        assert_eq!(kingdom.cards.len(), 1);
    }
}

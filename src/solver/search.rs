//! Backtracking kingdom search.
//!
//! Each call checks the partial kingdom against the branch's limits and,
//! once the quota is reached, completes the leaf rules. Otherwise it
//! draws candidates one at a time, tightest unmet minimum first, and
//! recurses. A candidate that fails is dropped from this depth's pool for
//! good: the same card from the same state fails the same way, so the
//! search stays complete while shrinking at every step.
//!
//! Side piles at the leaves draw from the full built pool minus the
//! kingdom, never from the pruned pick pool. A card rejected as a pick
//! may still be the only valid bane.

use im::OrdSet;
use tracing::{debug, info, trace};

use crate::cards::{CardId, CardOrGroup, CardType, Catalog};
use crate::core::{ShuffleConfig, ShuffleRng, ShuffleRngState, SolveError};
use crate::extras::{apply_setup, complete_piles, SpecialCards};
use crate::rules::ConstraintState;

use super::kingdom::Kingdom;
use super::pool::{build_pool, LimitSet};

/// Search context for one generate call.
struct Search<'a> {
    catalog: &'a Catalog,
    constraints: &'a ConstraintState,
    special: SpecialCards,
    /// The built pool, unpruned.
    available: OrdSet<CardId>,
    cards_to_draw: usize,
    rng: &'a mut ShuffleRng,
}

impl Search<'_> {
    fn solve(
        &mut self,
        kingdom: Kingdom,
        pool: OrdSet<CardId>,
        limits: LimitSet,
    ) -> Result<Kingdom, SolveError> {
        debug!(cards = ?kingdom.names(self.catalog), "current selection");

        if limits
            .iter()
            .any(|limit| !limit.maximum_satisfied(self.catalog, &kingdom.cards))
        {
            return Err(SolveError::UnsatisfiedRule);
        }

        if kingdom.countable(self.catalog) == self.cards_to_draw {
            return self.complete(kingdom, &limits);
        }

        self.check_capacity(&kingdom, &pool, &limits)?;

        let mut pool = pool;
        loop {
            let source = self.pick_source(&kingdom, &pool, &limits);
            let Some(&card) = self.rng.choose(&source) else {
                return Err(SolveError::RulesTooStrict);
            };
            pool.remove(&card);
            trace!(card = %self.catalog.card(card).name, remaining = pool.len(), "picked");

            let mut child = kingdom.clone();
            child.cards.push(card);
            let mut child_limits = limits.clone();
            self.link_allies(card, &mut child_limits);

            match self.solve(child, pool.clone(), child_limits) {
                Ok(done) => return Ok(done),
                Err(err) => trace!(card = %self.catalog.card(card).name, %err, "backtracking"),
            }
        }
    }

    /// Quota reached: verify every limit, then run the leaf rules.
    fn complete(&mut self, mut kingdom: Kingdom, limits: &LimitSet) -> Result<Kingdom, SolveError> {
        if !self.all_satisfied(&kingdom, limits) {
            return Err(SolveError::UnsatisfiedRule);
        }
        let mut remaining = self.available.clone();
        for card in &kingdom.cards {
            remaining.remove(card);
        }
        complete_piles(
            self.catalog,
            &self.special,
            self.constraints,
            &mut kingdom,
            &mut remaining,
            self.rng,
        )?;
        // Side piles land in the kingdom and may push a group over its maximum.
        if !self.all_satisfied(&kingdom, limits) {
            return Err(SolveError::UnsatisfiedRule);
        }
        Ok(kingdom)
    }

    fn all_satisfied(&self, kingdom: &Kingdom, limits: &LimitSet) -> bool {
        limits
            .iter()
            .all(|limit| limit.is_satisfied(self.catalog, &kingdom.cards))
    }

    /// Cards to draw from next: the pool, narrowed to the first limit
    /// whose minimum is still unmet.
    fn pick_source(&self, kingdom: &Kingdom, pool: &OrdSet<CardId>, limits: &LimitSet) -> Vec<CardId> {
        let unmet = limits
            .iter()
            .find(|limit| limit.minimum > 0 && !limit.minimum_satisfied(self.catalog, &kingdom.cards));
        match unmet {
            Some(limit) => {
                let group = self.catalog.group(limit.group);
                pool.iter().copied().filter(|card| group.contains(*card)).collect()
            }
            None => pool.iter().copied().collect(),
        }
    }

    /// Fail fast when the pool can no longer cover what is still needed.
    fn check_capacity(
        &self,
        kingdom: &Kingdom,
        pool: &OrdSet<CardId>,
        limits: &LimitSet,
    ) -> Result<(), SolveError> {
        for limit in limits.iter() {
            if !limit.is_active(self.catalog, &kingdom.cards) {
                continue;
            }
            let have = limit.count(self.catalog, &kingdom.cards);
            if have >= limit.minimum {
                continue;
            }
            let group = self.catalog.group(limit.group);
            let needed = limit.minimum - have;
            let available = pool.iter().filter(|card| group.contains(**card)).count();
            if needed > available {
                return Err(SolveError::OverconstrainedMinimums {
                    group: group.name.clone(),
                    needed,
                    available,
                });
            }
        }

        let needed = self.cards_to_draw.saturating_sub(kingdom.countable(self.catalog));
        let available = pool
            .iter()
            .filter(|card| self.catalog.card(**card).is_countable())
            .count();
        if needed > available {
            return Err(SolveError::RulesTooStrict);
        }
        Ok(())
    }

    /// Liaisons need an ally in the kingdom and allies need a liaison.
    fn link_allies(&self, card: CardId, limits: &mut LimitSet) {
        let drawn = self.catalog.card(card);
        let links = [
            (CardType::Liaison, self.special.allies, self.special.liaisons),
            (CardType::Ally, self.special.liaisons, self.special.allies),
        ];
        for (tag, needed, own) in links {
            let Some(needed) = needed else {
                continue;
            };
            if !drawn.has_type(&tag) {
                continue;
            }
            let condition = own.map_or(CardOrGroup::Card(card), CardOrGroup::Group);
            if limits.require_one(self.catalog, needed, condition) {
                trace!(card = %drawn.name, group = %self.catalog.group(needed).name, "linked limit");
            }
        }
    }
}

/// Generate one kingdom.
///
/// `rng` is the single source of randomness for the whole call; seed it
/// to make the result reproducible.
pub fn generate(
    catalog: &Catalog,
    constraints: &ConstraintState,
    config: &ShuffleConfig,
    rng: &mut ShuffleRng,
) -> Result<Kingdom, SolveError> {
    let special = SpecialCards::resolve(catalog, &config.designations);
    let pool = build_pool(catalog, constraints);

    let mut kingdom = Kingdom::default();
    kingdom.cards.extend(constraints.required_cards());

    let countable = kingdom.countable(catalog);
    if countable > config.cards_to_draw {
        return Err(SolveError::TooManyCards {
            countable,
            quota: config.cards_to_draw,
        });
    }

    let mut search = Search {
        catalog,
        constraints,
        special,
        available: pool.clone(),
        cards_to_draw: config.cards_to_draw,
        rng,
    };
    let mut limits = LimitSet::new(constraints.ordered_limits(catalog));
    for card in &kingdom.cards {
        search.link_allies(*card, &mut limits);
    }

    let mut kingdom = search.solve(kingdom, pool, limits)?;
    apply_setup(
        catalog,
        &search.special,
        constraints,
        &mut kingdom,
        config.cards_to_draw,
        search.rng,
    );

    info!(
        cards = kingdom.cards.len(),
        bane = kingdom.bane.is_some(),
        traits = kingdom.trait_targets.len(),
        "kingdom generated"
    );
    Ok(kingdom)
}

/// Generates kingdoms from a fixed config and one long-lived RNG.
///
/// Consecutive calls continue the same random stream, so they differ
/// from each other but replay identically from the same seed.
#[derive(Clone, Debug)]
pub struct Shuffler {
    config: ShuffleConfig,
    rng: ShuffleRng,
}

impl Shuffler {
    #[must_use]
    pub fn new(config: ShuffleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ShuffleRng::new(seed),
            None => ShuffleRng::from_entropy(),
        };
        Self { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Checkpoint of the random stream.
    #[must_use]
    pub fn rng_state(&self) -> ShuffleRngState {
        self.rng.state()
    }

    pub fn generate(
        &mut self,
        catalog: &Catalog,
        constraints: &ConstraintState,
    ) -> Result<Kingdom, SolveError> {
        generate(catalog, constraints, &self.config, &mut self.rng)
    }
}

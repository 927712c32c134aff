//! The game state and its turn entry points.
//!
//! A [`GameState`] owns the level, the store, the actor list and the single
//! random source every decision draws from. All play goes through
//! [`GameState::act`] (one actor, one action) and [`GameState::end_round`]
//! (periodic effects, then the AI pass). Solo and cooperative play share the
//! same API; solo is just a one-element actor list.

use std::collections::BTreeMap;

use delve_dungeon::{ContentTables, GeneratorConfig, Level, Map, Viewshed, generate, update_visibility};
use delve_foundation::{EntityId, GameRng, Point, Result};
use delve_storage::{
    CombatStats, ComponentKind, Furniture, FurnitureBonus, Health, Position, StatusKind, Store,
    Thorns,
};
use log::{debug, info, warn};

use crate::action::{Action, BlockReason, MoveResult, Rejection, Reflected, TurnOutcome};
use crate::ai::{AiAction, AiOutcome, run_ai};
use crate::combat::{self, CombatResult};
use crate::effects;
use crate::factory::{Factory, SpawnReport};
use crate::inventory::{self, adjust_max_health};
use crate::loot::resolve_death;
use crate::movement::resolve_move;
use crate::world::{blocker_at, find_at, is_alive, is_player, position_of, vision_radius};

// =============================================================================
// Reports
// =============================================================================

/// Periodic effect processing for one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectTick {
    /// The entity.
    pub entity: EntityId,
    /// Poison damage taken.
    pub poison: i32,
    /// Self-burn damage taken.
    pub burn: i32,
    /// Effects that ran out this tick.
    pub expired: Vec<StatusKind>,
    /// The damage was fatal.
    pub killed: bool,
}

/// One actor action and its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    /// The acting entity.
    pub actor: EntityId,
    /// The requested action, if one arrived.
    pub action: Option<Action>,
    /// What happened.
    pub outcome: TurnOutcome,
}

/// Everything that happened in one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Round number, starting at 1.
    pub round: u64,
    /// Actor turns, in order.
    pub turns: Vec<TurnRecord>,
    /// Effect ticks, in id order.
    pub effects: Vec<EffectTick>,
    /// AI actions, in id order.
    pub ai: Vec<AiOutcome>,
    /// Thorns damage dealt back to AI attackers.
    pub reflected: Vec<Reflected>,
    /// Entities that died during the shared pass.
    pub deaths: Vec<EntityId>,
    /// The round ended early on a floor change.
    pub descended: bool,
}

// =============================================================================
// GameState
// =============================================================================

/// A running game.
#[derive(Clone, Debug)]
pub struct GameState {
    level: Level,
    store: Store,
    rng: GameRng,
    actors: Vec<EntityId>,
    tables: ContentTables,
    config: GeneratorConfig,
    viewsheds: BTreeMap<EntityId, Viewshed>,
    round: u64,
}

impl GameState {
    /// Generates the first floor and places one actor per class.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a class is not in
    /// the tables.
    pub fn new(
        config: GeneratorConfig,
        tables: ContentTables,
        classes: &[&str],
        mut rng: GameRng,
    ) -> Result<Self> {
        let level = generate(&config, &tables, &mut rng)?;
        let mut store = Store::new();
        Factory::new(&tables).instantiate_level(&mut store, &level);

        let points = arrival_points(&level, &store, classes.len());
        let mut actors = Vec::with_capacity(classes.len());
        for (class, pos) in classes.iter().zip(points) {
            actors.push(Factory::new(&tables).spawn_player(&mut store, class, pos)?);
        }
        info!(
            "new game: floor {}, {} rooms, {} actors",
            level.floor,
            level.rooms.len(),
            actors.len()
        );

        let mut state = Self::from_parts(level, store, actors, tables, config, rng);
        state.refresh_visibility();
        Ok(state)
    }

    /// Assembles a state from prepared parts. Visibility is not computed.
    #[must_use]
    pub fn from_parts(
        level: Level,
        store: Store,
        actors: Vec<EntityId>,
        tables: ContentTables,
        config: GeneratorConfig,
        rng: GameRng,
    ) -> Self {
        Self {
            level,
            store,
            rng,
            actors,
            tables,
            config,
            viewsheds: BTreeMap::new(),
            round: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The current floor.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// The current map.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.level.map
    }

    /// The entity store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the store, for setup and tooling.
    pub const fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// The shared random source.
    pub const fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Human-controlled entities, in turn order.
    #[must_use]
    pub fn actors(&self) -> &[EntityId] {
        &self.actors
    }

    /// The content tables.
    #[must_use]
    pub const fn tables(&self) -> &ContentTables {
        &self.tables
    }

    /// Configuration of the current floor.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Completed rounds.
    #[must_use]
    pub const fn round(&self) -> u64 {
        self.round
    }

    /// Current floor number.
    #[must_use]
    pub const fn floor(&self) -> u32 {
        self.level.floor
    }

    /// The last computed view of `actor`.
    #[must_use]
    pub fn viewshed(&self, actor: EntityId) -> Option<&Viewshed> {
        self.viewsheds.get(&actor)
    }

    /// True once every actor is dead.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.actors.iter().all(|a| !is_alive(&self.store, *a))
    }

    // -------------------------------------------------------------------------
    // Turns
    // -------------------------------------------------------------------------

    /// Performs one action for `actor`.
    ///
    /// Dead actors are refused and stunned actors lose the action. Refusals
    /// leave the state untouched.
    pub fn act(&mut self, actor: EntityId, action: Action) -> TurnOutcome {
        if !is_alive(&self.store, actor) {
            return TurnOutcome::Rejected(Rejection::ActorDead);
        }
        if effects::is_stunned(&self.store, actor) {
            debug!("{actor} is stunned");
            return TurnOutcome::Stunned;
        }

        let outcome = match action {
            Action::Move(direction) => {
                match resolve_move(&mut self.store, &mut self.level.map, actor, direction) {
                    MoveResult::Moved { to, .. } => TurnOutcome::Moved {
                        to,
                        inscription: find_at(&self.store, to, ComponentKind::Inscription),
                    },
                    MoveResult::Blocked(reason) => TurnOutcome::Blocked(reason),
                    MoveResult::Attack(target) => self.melee(actor, target),
                    MoveResult::Interact(target) => self.interact(actor, target),
                }
            }
            Action::Wait => TurnOutcome::Waited,
            Action::PickUp => inventory::pick_up(&mut self.store, actor),
            Action::Use(item) => inventory::use_item(
                &mut self.store,
                &self.level.map,
                &self.level.rooms,
                actor,
                item,
                &mut self.rng,
            ),
            Action::Equip(item) => inventory::equip(&mut self.store, actor, item),
            Action::Unequip(slot) => inventory::unequip(&mut self.store, actor, slot),
            Action::Descend => return self.descend(actor),
        };

        if changes_view(&outcome) {
            self.refresh_visibility();
        }
        outcome
    }

    fn melee(&mut self, attacker: EntityId, defender: EntityId) -> TurnOutcome {
        let Some(result) = combat::attack(&mut self.store, attacker, defender, &mut self.rng) else {
            return TurnOutcome::Blocked(BlockReason::Wall);
        };
        debug!(
            "{attacker} hit {defender} for {} ({} left)",
            result.damage, result.remaining
        );
        let reflected = self.reflect(&result);
        let loot = if result.killed {
            resolve_death(&mut self.store, &Factory::new(&self.tables), defender, &mut self.rng)
        } else {
            Vec::new()
        };
        TurnOutcome::Attacked {
            result,
            reflected,
            loot,
        }
    }

    /// Deals the defender's thorns back to the attacker.
    fn reflect(&mut self, hit: &CombatResult) -> Option<Reflected> {
        let thorns = self.store.get::<Thorns>(hit.defender)?.damage;
        if thorns <= 0 {
            return None;
        }
        let remaining = combat::deal_direct(&mut self.store, hit.attacker, thorns)?;
        Some(Reflected {
            target: hit.attacker,
            damage: thorns,
            killed: remaining <= 0,
        })
    }

    fn interact(&mut self, actor: EntityId, target: EntityId) -> TurnOutcome {
        let bonus = match self.store.get_mut::<Furniture>(target) {
            Some(f) if !f.used && f.bonus.is_some() => {
                f.used = true;
                f.bonus
            }
            _ => None,
        };
        match bonus {
            Some(FurnitureBonus::Heal(n)) => {
                if let Some(h) = self.store.get_mut::<Health>(actor) {
                    h.heal(n);
                }
            }
            Some(FurnitureBonus::MaxHealth(n)) => adjust_max_health(&mut self.store, actor, n),
            Some(FurnitureBonus::Attack(n)) => {
                if let Some(c) = self.store.get_mut::<CombatStats>(actor) {
                    c.attack += n;
                }
            }
            Some(FurnitureBonus::Defense(n)) => {
                if let Some(c) = self.store.get_mut::<CombatStats>(actor) {
                    c.defense += n;
                }
            }
            None => {}
        }
        TurnOutcome::Interacted { target, bonus }
    }

    /// Applies poison and self-burn, then advances every effect one turn.
    pub fn tick_effects(&mut self) -> Vec<EffectTick> {
        let factory = Factory::new(&self.tables);
        let mut ticks = Vec::new();
        for entity in self.store.query(&[ComponentKind::Effects]) {
            let owed = effects::periodic_damage(&self.store, entity);
            let mut killed = false;
            if owed.total() > 0 && is_alive(&self.store, entity) {
                let remaining = combat::deal_direct(&mut self.store, entity, owed.total());
                killed = remaining.is_some_and(|hp| hp <= 0);
            }
            let expired = effects::advance(&mut self.store, entity);
            if owed.total() > 0 || !expired.is_empty() {
                ticks.push(EffectTick {
                    entity,
                    poison: owed.poison,
                    burn: owed.burn,
                    expired,
                    killed,
                });
            }
            if killed {
                resolve_death(&mut self.store, &factory, entity, &mut self.rng);
            }
        }
        ticks
    }

    /// Closes a round: periodic effects, then one AI pass, then visibility.
    pub fn end_round(&mut self) -> RoundReport {
        self.round += 1;
        let mut report = RoundReport {
            round: self.round,
            ..RoundReport::default()
        };
        report.effects = self.tick_effects();
        report
            .deaths
            .extend(report.effects.iter().filter(|t| t.killed).map(|t| t.entity));

        let centroid = self.level.room_centroid();
        report.ai = run_ai(
            &mut self.store,
            &self.level.map,
            &self.actors,
            centroid,
            &mut self.rng,
        );
        for outcome in &report.ai {
            let AiAction::Attacked { result, special } = outcome.action else {
                continue;
            };
            if result.killed || special.is_some_and(|s| s.killed) {
                report.deaths.push(result.defender);
            }
            if let Some(r) = self.reflect(&result) {
                report.reflected.push(r);
                if r.killed {
                    resolve_death(
                        &mut self.store,
                        &Factory::new(&self.tables),
                        r.target,
                        &mut self.rng,
                    );
                    report.deaths.push(r.target);
                }
            }
        }

        self.refresh_visibility();
        report
    }

    /// Takes `actor` down the stairs, generating and populating the next
    /// floor. Every other actor comes along.
    ///
    /// Non-player entities on the map are destroyed; carried and worn items
    /// survive.
    pub fn descend(&mut self, actor: EntityId) -> TurnOutcome {
        if position_of(&self.store, actor) != Some(self.level.stairs_down) {
            return TurnOutcome::Rejected(Rejection::NotOnStairs);
        }
        let config = self.config.next_floor();
        let level = match generate(&config, &self.tables, &mut self.rng) {
            Ok(level) => level,
            Err(e) => {
                warn!("floor {} generation failed: {e}", config.floor);
                return TurnOutcome::Rejected(Rejection::GenerationFailed);
            }
        };

        for entity in self.store.query(&[ComponentKind::Position]) {
            if !is_player(&self.store, entity) {
                self.store.destroy(entity);
            }
        }
        let report: SpawnReport = Factory::new(&self.tables).instantiate_level(&mut self.store, &level);
        let points = arrival_points(&level, &self.store, self.actors.len());
        for (a, p) in self.actors.iter().zip(points) {
            self.store.add(*a, Position(p));
        }

        info!(
            "descended to floor {} ({} entities, {} skipped)",
            level.floor,
            report.spawned,
            report.skipped.len()
        );
        self.level = level;
        self.config = config;
        self.viewsheds.clear();
        self.refresh_visibility();
        TurnOutcome::Descended {
            floor: self.level.floor,
        }
    }

    /// Recomputes every living actor's view and the map's visible flags.
    pub fn refresh_visibility(&mut self) {
        self.level.map.clear_visible();
        for actor in &self.actors {
            if !is_alive(&self.store, *actor) {
                continue;
            }
            let (Some(pos), Some(radius)) = (
                position_of(&self.store, *actor),
                vision_radius(&self.store, *actor),
            ) else {
                continue;
            };
            let view = self.viewsheds.entry(*actor).or_default();
            update_visibility(&mut self.level.map, view, pos, radius);
        }
    }

    pub(crate) fn next_round(&mut self) -> u64 {
        self.round += 1;
        self.round
    }
}

const fn changes_view(outcome: &TurnOutcome) -> bool {
    matches!(
        outcome,
        TurnOutcome::Moved { .. }
            | TurnOutcome::Blocked(BlockReason::DoorOpened(_))
            | TurnOutcome::Attacked { .. }
            | TurnOutcome::Used { .. }
            | TurnOutcome::Equipped { .. }
            | TurnOutcome::Unequipped { .. }
    )
}

/// Where `count` arriving actors stand: the spawn first, then the nearest
/// open tiles of the start room.
fn arrival_points(level: &Level, store: &Store, count: usize) -> Vec<Point> {
    let spawn = level.player_spawn;
    let mut open: Vec<Point> = level
        .rooms
        .get(level.start_room)
        .map(|room| {
            room.points()
                .filter(|p| *p != spawn && *p != level.stairs_down)
                .filter(|p| level.map.is_walkable(*p) && blocker_at(store, *p).is_none())
                .collect()
        })
        .unwrap_or_default();
    open.sort_by_key(|p| (p.distance_sq(spawn), p.y, p.x));

    let mut points = vec![spawn];
    points.extend(open);
    while points.len() < count {
        points.push(spawn);
    }
    points.truncate(count);
    points
}

//! Text rendering of game state and round reports.
//!
//! The engine reports plain data; everything a player reads is produced
//! here.

use std::fmt::Write;

use delve_engine::world::{entities_at, is_alive};
use delve_engine::{
    AiAction, BlockReason, GameState, RoundReport, TurnOutcome, TurnRecord, effective_attack,
    effective_defense,
};
use delve_foundation::{EntityId, Point};
use delve_storage::{
    ComponentKind, Equipment, FurnitureBonus, Health, Inscription, Inventory, Renderable,
    StatusEffects,
};

/// Display name of an entity, falling back to its id.
#[must_use]
pub fn name_of(state: &GameState, id: EntityId) -> String {
    state
        .store()
        .get::<Renderable>(id)
        .map_or_else(|| id.to_string(), |r| r.name.clone())
}

/// Glyph drawn for a visible tile: actors first, then other blockers, then
/// anything else standing there.
fn glyph_at(state: &GameState, p: Point) -> Option<char> {
    let store = state.store();
    let here = entities_at(store, p);
    let rank = |id: &EntityId| {
        if store.has(*id, ComponentKind::Player) {
            0
        } else if store.has(*id, ComponentKind::Blocking) {
            1
        } else {
            2
        }
    };
    here.iter()
        .filter(|id| store.has(**id, ComponentKind::Renderable))
        .min_by_key(|id| rank(id))
        .and_then(|id| store.get::<Renderable>(*id))
        .map(|r| r.glyph)
}

/// Draws the explored part of the map. Entities show only on tiles in view.
#[must_use]
pub fn render_map(state: &GameState) -> String {
    let map = state.map();
    let mut out =
        String::with_capacity(usize::try_from((map.width() + 1) * map.height()).unwrap_or(0));
    for y in 0..map.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..map.width() {
            let p = Point::new(x, y);
            let Some(tile) = map.at(p) else {
                continue;
            };
            let c = if tile.visible {
                glyph_at(state, p).unwrap_or_else(|| tile.kind.glyph())
            } else if tile.explored {
                tile.kind.glyph()
            } else {
                ' '
            };
            out.push(c);
        }
    }
    out
}

/// One block of lines per actor: vitals, effects, worn gear and backpack.
#[must_use]
pub fn status_lines(state: &GameState) -> Vec<String> {
    let store = state.store();
    let mut lines = vec![format!("Floor {}, round {}", state.floor(), state.round())];
    for &actor in state.actors() {
        let name = name_of(state, actor);
        if !is_alive(store, actor) {
            lines.push(format!("{name} [{}]: dead", actor.raw()));
            continue;
        }
        let (current, max) = store
            .get::<Health>(actor)
            .map_or((0, 0), |h| (h.current, h.max));
        let mut line = format!(
            "{name} [{}]: hp {current}/{max}, attack {}, defense {}",
            actor.raw(),
            effective_attack(store, actor),
            effective_defense(store, actor)
        );
        if let Some(effects) = store.get::<StatusEffects>(actor) {
            for e in &effects.effects {
                let _ = write!(line, ", {:?} {} ({})", e.kind, e.magnitude, e.turns_remaining);
            }
        }
        lines.push(line);

        if let Some(gear) = store.get::<Equipment>(actor) {
            let worn: Vec<_> = gear
                .slots
                .iter()
                .map(|(slot, e)| format!("{slot:?}: {}", name_of(state, e.item)))
                .collect();
            if !worn.is_empty() {
                lines.push(format!("  worn: {}", worn.join(", ")));
            }
        }
        if let Some(pack) = store.get::<Inventory>(actor) {
            let items: Vec<_> = pack
                .items
                .iter()
                .map(|i| format!("[{}] {}", i.raw(), name_of(state, *i)))
                .collect();
            lines.push(format!(
                "  pack ({}/{}): {}",
                pack.items.len(),
                pack.capacity,
                if items.is_empty() {
                    "empty".to_string()
                } else {
                    items.join(", ")
                }
            ));
        }
    }
    lines
}

/// A sentence for one turn, or `None` for turns worth no mention.
#[must_use]
pub fn describe_turn(state: &GameState, turn: &TurnRecord) -> Option<String> {
    let who = name_of(state, turn.actor);
    let text = match &turn.outcome {
        TurnOutcome::Moved { inscription, .. } => {
            let text = inscription
                .and_then(|i| state.store().get::<Inscription>(i))
                .map(|i| i.text.clone())?;
            format!("{who} reads: \"{text}\"")
        }
        TurnOutcome::Blocked(BlockReason::DoorOpened(_)) => format!("{who} opens a door."),
        TurnOutcome::Blocked(_) | TurnOutcome::Waited | TurnOutcome::NoAction => return None,
        TurnOutcome::Attacked {
            result,
            reflected,
            loot,
        } => {
            let mut s = format!(
                "{who} hits {} for {}.",
                name_of(state, result.defender),
                result.damage
            );
            if result.killed {
                s.push_str(" It dies.");
            }
            if let Some(r) = reflected {
                let _ = write!(s, " Thorns deal {} back.", r.damage);
            }
            if !loot.is_empty() {
                s.push_str(" Something drops.");
            }
            s
        }
        TurnOutcome::Interacted { target, bonus } => {
            let what = name_of(state, *target);
            match bonus {
                None => format!("{who} searches the {what}. Nothing."),
                Some(FurnitureBonus::Heal(n)) => format!("The {what} heals {who} for {n}."),
                Some(FurnitureBonus::MaxHealth(n)) => {
                    format!("The {what} fortifies {who} (+{n} max hp).")
                }
                Some(FurnitureBonus::Attack(n)) => format!("The {what} sharpens {who} (+{n} attack)."),
                Some(FurnitureBonus::Defense(n)) => format!("The {what} wards {who} (+{n} defense)."),
            }
        }
        TurnOutcome::PickedUp(item) => format!("{who} picks up the {}.", name_of(state, *item)),
        TurnOutcome::Used { effect, .. } => format!("{who} uses an item: {effect:?}."),
        TurnOutcome::Equipped { item, slot, .. } => {
            format!("{who} equips the {} ({slot:?}).", name_of(state, *item))
        }
        TurnOutcome::Unequipped { item, .. } => {
            format!("{who} takes off the {}.", name_of(state, *item))
        }
        TurnOutcome::Descended { floor } => format!("{who} leads the way down to floor {floor}."),
        TurnOutcome::Rejected(reason) => format!("{who} cannot: {reason}."),
        TurnOutcome::Stunned => format!("{who} is stunned."),
    };
    Some(text)
}

/// Every line worth printing for a round.
#[must_use]
pub fn describe_round(state: &GameState, report: &RoundReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .turns
        .iter()
        .filter_map(|t| describe_turn(state, t))
        .collect();

    for tick in &report.effects {
        let who = name_of(state, tick.entity);
        if tick.poison > 0 {
            lines.push(format!("{who} takes {} poison damage.", tick.poison));
        }
        if tick.burn > 0 {
            lines.push(format!("{who} burns for {}.", tick.burn));
        }
        for kind in &tick.expired {
            lines.push(format!("{who} is no longer affected by {kind:?}."));
        }
    }
    for outcome in &report.ai {
        let AiAction::Attacked { result, special } = outcome.action else {
            continue;
        };
        let mut s = format!(
            "{} hits {} for {}.",
            name_of(state, result.attacker),
            name_of(state, result.defender),
            result.damage
        );
        if let Some(sp) = special {
            let _ = write!(s, " {:?}!", sp.kind);
        }
        lines.push(s);
    }
    for r in &report.reflected {
        lines.push(format!("Thorns deal {} to {}.", r.damage, name_of(state, r.target)));
    }
    for dead in &report.deaths {
        lines.push(format!("{} dies.", name_of(state, *dead)));
    }
    lines
}

//! Requested actions and their outcomes.
//!
//! Outcomes are data only; turning them into messages is left to the
//! caller.

use std::fmt;

use delve_foundation::{Direction, EntityId, Point};
use delve_storage::{ConsumableEffect, EquipSlot, FurnitureBonus};

use crate::combat::CombatResult;

// =============================================================================
// Action
// =============================================================================

/// Something an actor asks to do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Step, attack or interact in a direction.
    Move(Direction),
    /// Do nothing this turn.
    Wait,
    /// Pick up the item underfoot.
    PickUp,
    /// Use a carried consumable.
    Use(EntityId),
    /// Wear a carried equippable.
    Equip(EntityId),
    /// Return a worn item to the backpack.
    Unequip(EquipSlot),
    /// Take the stairs down.
    Descend,
}

// =============================================================================
// Movement
// =============================================================================

/// Why a step did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// Impassable tile.
    Wall,
    /// Off the map.
    OutOfBounds,
    /// Occupied by someone on the same side.
    Ally(EntityId),
    /// A closed door was opened instead of moving.
    DoorOpened(Point),
}

/// Classification of a directional request. Exactly one per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// The actor moved.
    Moved {
        /// Old position.
        from: Point,
        /// New position.
        to: Point,
    },
    /// The actor stayed put.
    Blocked(BlockReason),
    /// A hostile blocker occupies the tile.
    Attack(EntityId),
    /// An inert interactable occupies the tile.
    Interact(EntityId),
}

// =============================================================================
// Outcome
// =============================================================================

/// Why an action was refused. Refusals never mutate state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The actor is dead or unknown.
    ActorDead,
    /// The actor has no position.
    NotPlaced,
    /// Nothing to pick up here.
    NothingHere,
    /// The backpack is full.
    InventoryFull,
    /// The item is not in the backpack.
    NotCarried,
    /// The item has no use effect.
    NotUsable,
    /// The item cannot be worn.
    NotEquippable,
    /// A two-handed weapon and an off-hand item cannot be worn together.
    TwoHandedConflict,
    /// Nothing is worn in that slot.
    SlotEmpty,
    /// Not standing on stairs down.
    NotOnStairs,
    /// The next floor could not be generated.
    GenerationFailed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ActorDead => "actor is dead",
            Self::NotPlaced => "actor is not on the map",
            Self::NothingHere => "nothing to pick up",
            Self::InventoryFull => "inventory full",
            Self::NotCarried => "item not carried",
            Self::NotUsable => "item cannot be used",
            Self::NotEquippable => "item cannot be equipped",
            Self::TwoHandedConflict => "two-handed conflict",
            Self::SlotEmpty => "slot empty",
            Self::NotOnStairs => "not on stairs",
            Self::GenerationFailed => "floor generation failed",
        };
        f.write_str(text)
    }
}

/// Damage reflected back onto an attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reflected {
    /// Who took the reflected damage.
    pub target: EntityId,
    /// Amount reflected.
    pub damage: i32,
    /// The reflection was fatal.
    pub killed: bool,
}

/// What happened when an actor took its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Moved; names the inscription underfoot, if any.
    Moved {
        /// New position.
        to: Point,
        /// Inscription entity on the destination tile.
        inscription: Option<EntityId>,
    },
    /// Bumped into something.
    Blocked(BlockReason),
    /// Hit a hostile.
    Attacked {
        /// The hit.
        result: CombatResult,
        /// Thorns damage taken in return.
        reflected: Option<Reflected>,
        /// Items dropped by the defender's death.
        loot: Vec<EntityId>,
    },
    /// Bumped furniture; carries the bonus granted, if any.
    Interacted {
        /// The furniture.
        target: EntityId,
        /// One-shot bonus granted now.
        bonus: Option<FurnitureBonus>,
    },
    /// Passed the turn.
    Waited,
    /// Picked up an item.
    PickedUp(EntityId),
    /// Used a consumable.
    Used {
        /// The consumed item.
        item: EntityId,
        /// What it did.
        effect: ConsumableEffect,
    },
    /// Wore an item.
    Equipped {
        /// The item.
        item: EntityId,
        /// Its slot.
        slot: EquipSlot,
        /// Item moved back to the backpack.
        swapped: Option<EntityId>,
    },
    /// Took an item off.
    Unequipped {
        /// The item.
        item: EntityId,
        /// Its slot.
        slot: EquipSlot,
    },
    /// Went down to a new floor.
    Descended {
        /// The new floor number.
        floor: u32,
    },
    /// The action was refused.
    Rejected(Rejection),
    /// Stunned; the action was skipped.
    Stunned,
    /// No action arrived (source disconnected).
    NoAction,
}

impl TurnOutcome {
    /// True if the actor's turn is used up.
    ///
    /// Refusals, bumps into walls or allies, and missing input leave the
    /// turn available; everything else spends it, stuns included.
    #[must_use]
    pub fn consumes_turn(&self) -> bool {
        match self {
            Self::Rejected(_) | Self::NoAction => false,
            Self::Blocked(reason) => matches!(reason, BlockReason::DoorOpened(_)),
            _ => true,
        }
    }
}

//! Damage and heal resolver.
//!
//! Pure functions computing numeric outcomes from two combatants, the
//! balance tables and the shared random source. Nothing here mutates a
//! combatant; action resolution applies the returned amounts.
//!
//! # Draw order
//!
//! Each call consumes random values in a fixed order:
//!
//! - physical: variance, then critical roll
//! - magic: variance only
//! - heal: variance, then super-heal roll
//! - poison and regen: no draws

pub mod damage;
pub mod heal;
pub mod result;

pub use damage::{magic_damage, physical_damage, poison_damage};
pub use heal::{heal_amount, regen_amount};
pub use result::{DamageKind, DamageRoll, HealRoll};

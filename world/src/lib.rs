#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative mission state for the Mars Rover engine.
//!
//! The [`Terrain`] is immutable once built and is shared read-only with the
//! command system. The [`Rover`] is owned by the mission loop and mutated
//! exclusively through commands. Neither type validates the other: the
//! command system is responsible for consulting the terrain before moving.

mod rover;
mod terrain;

pub use rover::Rover;
pub use terrain::Terrain;

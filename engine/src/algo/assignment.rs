//! Picking room names and roles for the slots of a generated graph.

use crate::rooms::RoomType;
use rand::{seq::index, Rng};

/// All names a room can get. Each run uses a random subset.
pub const ROOM_NAMES: [&str; 10] = [
    "Dungeon", "Barracks", "Garden", "Game", "Medical", "Corridor", "Kitchen", "Stairs", "Basement", "Attic",
];

/// Choose `count` distinct names uniformly at random without replacement.
pub fn select_names<'p, R: Rng + ?Sized>(pool: &[&'p str], count: usize, rng: &mut R) -> Vec<&'p str> {
    assert!(count <= pool.len(), "cannot pick {} names out of {}", count, pool.len());
    index::sample(rng, pool.len(), count).into_iter().map(|idx| pool[idx]).collect()
}

/// Assign one start room, one different end room and make everything else a mid room.
/// Start and end are drawn independently, the end is redrawn until it differs from the start.
pub fn assign_roles<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<RoomType> {
    assert!(count >= 2, "need at least two rooms for a start and an end");

    let start = rng.gen_range(0..count);
    let end = loop {
        let candidate = rng.gen_range(0..count);
        if candidate != start {
            break candidate;
        }
    };

    let mut roles = vec![RoomType::Mid; count];
    roles[start] = RoomType::Start;
    roles[end] = RoomType::End;
    roles
}

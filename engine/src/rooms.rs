//! Rooms, their roles and a complete validated set of rooms for one run.

use crate::{
    algo::{assignment::*, generation::random_connections},
    datastr::graph::*,
    error::{Error, Result},
};
use log::warn;
use rand::Rng;
use std::{collections::HashMap, fmt, str::FromStr};

/// Number of rooms generated per run.
pub const NUM_ROOMS: usize = 7;
/// A room can not be connected to more rooms than this.
pub const MAX_CONNECTIONS: usize = MAX_DEGREE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomType {
    Start,
    Mid,
    End,
}

impl RoomType {
    pub fn label(self) -> &'static str {
        match self {
            RoomType::Start => "START_ROOM",
            RoomType::Mid => "MID_ROOM",
            RoomType::End => "END_ROOM",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "START_ROOM" => Ok(RoomType::Start),
            "MID_ROOM" => Ok(RoomType::Mid),
            "END_ROOM" => Ok(RoomType::End),
            other => Err(Error::UnknownRoomType(other.to_string())),
        }
    }
}

/// A named room with a role and an ordered list of connected room names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    connections: Vec<String>,
    room_type: RoomType,
}

impl Room {
    /// Create a room, rejecting more than `MAX_CONNECTIONS` connections, connections to itself
    /// and connections listed twice.
    pub fn new(name: impl Into<String>, connections: Vec<String>, room_type: RoomType) -> Result<Room> {
        let name = name.into();

        if connections.len() > MAX_CONNECTIONS {
            return Err(Error::TooManyConnections {
                room: name,
                count: connections.len(),
                max: MAX_CONNECTIONS,
            });
        }
        for (idx, other) in connections.iter().enumerate() {
            if *other == name {
                return Err(Error::SelfConnection(name));
            }
            if connections[..idx].contains(other) {
                return Err(Error::DuplicateConnection { room: name, other: other.clone() });
            }
        }

        Ok(Room { name, connections, room_type })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connections(&self) -> &[String] {
        &self.connections
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn is_connected_to(&self, name: &str) -> bool {
        self.connections.iter().any(|connection| connection == name)
    }

    /// Name of the file this room is stored in within a run directory.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, ROOM_FILE_SUFFIX)
    }
}

/// Suffix of every room file name.
pub const ROOM_FILE_SUFFIX: &str = "_room";

/// All rooms of one run.
/// Guaranteed to contain exactly one start and one end room, unique names
/// and only connections to rooms of the set.
#[derive(Debug, Clone)]
pub struct RoomSet {
    rooms: Vec<Room>,
    // connections resolved to indices into `rooms`
    adjacency: Vec<Vec<NodeId>>,
    start: NodeId,
    end: NodeId,
}

impl RoomSet {
    /// Generate a fresh random set of `NUM_ROOMS` rooms.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> RoomSet {
        let graph = random_connections(NUM_ROOMS, rng);
        let names = select_names(&ROOM_NAMES, NUM_ROOMS, rng);
        let roles = assign_roles(NUM_ROOMS, rng);

        let rooms = (0..NUM_ROOMS)
            .map(|slot| {
                let connections = graph.neighbors(slot as NodeId).iter().map(|&other| names[other as usize].to_string()).collect();
                Room::new(names[slot], connections, roles[slot])
            })
            .collect::<Result<Vec<_>>>()
            .expect("generated rooms violate room invariants");

        RoomSet::from_rooms(rooms).expect("generated room set violates set invariants")
    }

    /// Validate and index a list of rooms.
    pub fn from_rooms(rooms: Vec<Room>) -> Result<RoomSet> {
        let mut ids = HashMap::with_capacity(rooms.len());
        for (idx, room) in rooms.iter().enumerate() {
            if ids.insert(room.name(), idx as NodeId).is_some() {
                return Err(Error::DuplicateRoom(room.name().to_string()));
            }
        }

        let mut adjacency = Vec::with_capacity(rooms.len());
        for room in &rooms {
            let links = room
                .connections()
                .iter()
                .map(|other| {
                    ids.get(other.as_str()).copied().ok_or_else(|| Error::UnknownConnection {
                        room: room.name().to_string(),
                        other: other.clone(),
                    })
                })
                .collect::<Result<Vec<NodeId>>>()?;
            adjacency.push(links);
        }

        for (idx, links) in adjacency.iter().enumerate() {
            for &other in links {
                if !adjacency[other as usize].contains(&(idx as NodeId)) {
                    warn!("connection {} -> {} has no way back", rooms[idx].name(), rooms[other as usize].name());
                }
            }
        }

        let start = unique_with_type(&rooms, RoomType::Start)?;
        let end = unique_with_type(&rooms, RoomType::End)?;

        Ok(RoomSet { rooms, adjacency, start, end })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: NodeId) -> &Room {
        &self.rooms[id as usize]
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.rooms.iter().position(|room| room.name() == name).map(|idx| idx as NodeId)
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

fn unique_with_type(rooms: &[Room], room_type: RoomType) -> Result<NodeId> {
    let mut matching = rooms.iter().enumerate().filter(|(_, room)| room.room_type() == room_type);
    match (matching.next(), matching.count()) {
        (Some((idx, _)), 0) => Ok(idx as NodeId),
        (first, rest) => Err(Error::RoleCount {
            role: room_type.label(),
            count: first.map_or(0, |_| 1 + rest),
        }),
    }
}

impl Graph for RoomSet {
    fn num_nodes(&self) -> usize {
        self.rooms.len()
    }

    fn num_arcs(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node as usize].len()
    }
}

impl<'a> LinkIterGraph<'a> for RoomSet {
    type Iter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn neighbor_iter(&'a self, node: NodeId) -> Self::Iter {
        self.adjacency[node as usize].iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn room(name: &str, connections: &[&str], room_type: RoomType) -> Room {
        Room::new(name, connections.iter().map(|c| c.to_string()).collect(), room_type).unwrap()
    }

    #[test]
    fn rejects_invalid_rooms() {
        let seven = ["A", "B", "C", "D", "E", "F", "G"].iter().map(|c| c.to_string()).collect();
        assert!(matches!(Room::new("X", seven, RoomType::Mid), Err(Error::TooManyConnections { count: 7, .. })));
        assert!(matches!(Room::new("X", vec!["X".to_string()], RoomType::Mid), Err(Error::SelfConnection(_))));
        assert!(matches!(
            Room::new("X", vec!["A".to_string(), "A".to_string()], RoomType::Mid),
            Err(Error::DuplicateConnection { .. })
        ));
    }

    #[test]
    fn room_type_labels() {
        for room_type in [RoomType::Start, RoomType::Mid, RoomType::End] {
            assert_eq!(room_type.label().parse::<RoomType>().unwrap(), room_type);
        }
        assert!("start_room".parse::<RoomType>().is_err());
    }

    #[test]
    fn set_requires_single_start_and_end() {
        let no_end = vec![room("A", &["B"], RoomType::Start), room("B", &["A"], RoomType::Mid)];
        assert!(matches!(RoomSet::from_rooms(no_end), Err(Error::RoleCount { role: "END_ROOM", count: 0 })));

        let two_starts = vec![
            room("A", &["B"], RoomType::Start),
            room("B", &["A", "C"], RoomType::Start),
            room("C", &["B"], RoomType::End),
        ];
        assert!(matches!(RoomSet::from_rooms(two_starts), Err(Error::RoleCount { role: "START_ROOM", count: 2 })));
    }

    #[test]
    fn set_rejects_dangling_connections_and_duplicates() {
        let dangling = vec![room("A", &["Z"], RoomType::Start), room("B", &[], RoomType::End)];
        assert!(matches!(RoomSet::from_rooms(dangling), Err(Error::UnknownConnection { .. })));

        let duplicate = vec![room("A", &[], RoomType::Start), room("A", &[], RoomType::End)];
        assert!(matches!(RoomSet::from_rooms(duplicate), Err(Error::DuplicateRoom(_))));
    }

    #[test]
    fn generated_sets_are_consistent() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let rooms = RoomSet::generate(&mut rng);
            assert_eq!(rooms.len(), NUM_ROOMS);
            assert_ne!(rooms.start(), rooms.end());
            assert_eq!(rooms.room(rooms.start()).room_type(), RoomType::Start);
            assert_eq!(rooms.room(rooms.end()).room_type(), RoomType::End);
            for room in rooms.rooms() {
                assert!((MIN_DEGREE..=MAX_CONNECTIONS).contains(&room.connections().len()));
                for other in room.connections() {
                    let other = rooms.room(rooms.id_of(other).unwrap());
                    assert!(other.is_connected_to(room.name()));
                }
            }
        }
    }
}

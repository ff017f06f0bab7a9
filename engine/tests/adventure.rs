use rand::prelude::*;
use room_adventure::{
    algo::reachability::*,
    datastr::graph::*,
    game::*,
    io::*,
    rooms::*,
    run_dir::*,
    time_request::*,
    Error,
};
use std::{fs, path::Path};

fn build_run(base: &Path, seed: u64) -> RoomSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let rooms = RoomSet::generate(&mut rng);
    let dir = create_run_dir(base, DEFAULT_PREFIX).unwrap();
    rooms.deconstruct_to(&dir).unwrap();
    rooms
}

fn load_newest(base: &Path) -> RoomSet {
    let dir = newest_run_dir(base, DEFAULT_PREFIX).unwrap();
    RoomSet::reconstruct_from(&dir).unwrap()
}

fn names(rooms: &RoomSet, path: &[NodeId]) -> Vec<String> {
    path.iter().map(|&id| rooms.room(id).name().to_string()).collect()
}

fn play(rooms: &RoomSet, input: &str, time_file: &TimeFile) -> (Vec<String>, String) {
    let mut output = Vec::new();
    let mut adventure = Adventure::new(rooms);
    adventure.run(input.as_bytes(), &mut output, time_file).unwrap();
    (adventure.path().to_vec(), String::from_utf8(output).unwrap())
}

fn looks_like_timestamp(line: &str) -> bool {
    const DAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December",
    ];

    let parts: Vec<&str> = line.split(", ").collect();
    if parts.len() != 4 {
        return false;
    }
    let clock = parts[0].trim_start();
    let (hour, rest) = match clock.split_once(':') {
        Some(split) => split,
        None => return false,
    };
    let hour_ok = hour.parse::<u32>().map_or(false, |hour| (1..=12).contains(&hour));
    let minute_ok = rest.len() == 4 && rest[..2].parse::<u32>().map_or(false, |minute| minute < 60) && (rest.ends_with("am") || rest.ends_with("pm"));
    let date_ok = match parts[2].split_once(' ') {
        Some((month, day)) => MONTHS.contains(&month) && day.len() == 2 && day.parse::<u32>().is_ok(),
        None => false,
    };

    hour_ok && minute_ok && DAYS.contains(&parts[1]) && date_ok && parts[3].len() == 4 && parts[3].parse::<u32>().is_ok()
}

#[test]
fn generated_runs_survive_the_round_trip() {
    let base = tempfile::tempdir().unwrap();
    let rooms = build_run(base.path(), 1);
    let loaded = load_newest(base.path());

    assert_eq!(loaded.len(), NUM_ROOMS);
    for room in rooms.rooms() {
        let loaded_room = loaded.room(loaded.id_of(room.name()).unwrap());
        assert_eq!(loaded_room, room);
    }
    assert_eq!(loaded.room(loaded.start()).name(), rooms.room(rooms.start()).name());
    assert_eq!(loaded.room(loaded.end()).name(), rooms.room(rooms.end()).name());
}

#[test]
fn end_is_reachable_from_start() {
    for seed in 0..50 {
        let base = tempfile::tempdir().unwrap();
        build_run(base.path(), seed);
        let rooms = load_newest(base.path());
        assert!(is_reachable(&rooms, rooms.start(), rooms.end()), "seed {}", seed);
    }
}

#[test]
fn scripted_walk_reaches_the_end() {
    let base = tempfile::tempdir().unwrap();
    build_run(base.path(), 3);
    let rooms = load_newest(base.path());
    let time_file = TimeFile::new(base.path().join(TIME_FILE_NAME));

    let route = shortest_path(&rooms, rooms.start(), rooms.end()).unwrap();
    let moves = names(&rooms, &route[1..]);
    let input: String = moves.iter().map(|name| format!("{}\n", name)).collect();

    let (path, transcript) = play(&rooms, &input, &time_file);

    assert_eq!(path, moves);
    let summary = format!(
        "YOU HAVE FOUND THE END ROOM. CONGRATULATIONS!\nYOU TOOK {} STEPS. YOUR PATH TO VICTORY WAS:\n{}\n",
        moves.len(),
        moves.join("\n")
    );
    assert!(transcript.ends_with(&summary), "{}", transcript);
    assert!(transcript.starts_with(&format!("CURRENT LOCATION: {}\n", rooms.room(rooms.start()).name())));
}

#[test]
fn unknown_room_keeps_position() {
    let base = tempfile::tempdir().unwrap();
    build_run(base.path(), 4);
    let rooms = load_newest(base.path());
    let time_file = TimeFile::new(base.path().join(TIME_FILE_NAME));

    let route = shortest_path(&rooms, rooms.start(), rooms.end()).unwrap();
    let moves = names(&rooms, &route[1..]);
    let start = rooms.room(rooms.start());

    let mut adventure = Adventure::new(&rooms);
    assert_eq!(adventure.advance(adventure.interpret("Nowhere")), Step::Invalid);
    assert_eq!(adventure.current(), start);
    assert!(adventure.path().is_empty());
    assert_eq!(adventure.advance(adventure.interpret(&moves[0])), if moves.len() == 1 { Step::Won } else { Step::Moved });
    assert_eq!(adventure.current().name(), moves[0]);

    let input = format!("Nowhere\n{}", moves.iter().map(|name| format!("{}\n", name)).collect::<String>());
    let (path, transcript) = play(&rooms, &input, &time_file);
    assert_eq!(path, moves);

    let location = format!("CURRENT LOCATION: {}\n", start.name());
    let expected_start = format!("{}{}\n{}\n{}\n\n{}", location, connections_line(start), PROMPT, UNKNOWN_ROOM_MESSAGE, location);
    assert!(transcript.starts_with(&expected_start), "{}", transcript);
}

fn connections_line(room: &Room) -> String {
    format!("POSSIBLE CONNECTIONS: {}.", room.connections().join(", "))
}

#[test]
fn time_request_shows_file_contents() {
    let base = tempfile::tempdir().unwrap();
    build_run(base.path(), 5);
    let rooms = load_newest(base.path());
    let time_file = TimeFile::new(base.path().join(TIME_FILE_NAME));

    let route = shortest_path(&rooms, rooms.start(), rooms.end()).unwrap();
    let moves = names(&rooms, &route[1..]);
    let input = format!("time\n{}", moves.iter().map(|name| format!("{}\n", name)).collect::<String>());

    let (path, transcript) = play(&rooms, &input, &time_file);
    assert_eq!(path, moves);

    let written = fs::read_to_string(time_file.path()).unwrap();
    let mut lines = written.lines();
    let stamp = lines.next().unwrap();
    assert_eq!(lines.next(), None);
    assert!(looks_like_timestamp(stamp), "{:?}", stamp);

    // the time follows the first prompt and the location is not repeated right after it
    let start = rooms.room(rooms.start());
    let expected_start = format!("CURRENT LOCATION: {}\n{}\n{}\n{}\n\n{}", start.name(), connections_line(start), PROMPT, stamp, PROMPT);
    assert!(transcript.starts_with(&expected_start), "{}", transcript);
}

#[test]
fn unreadable_run_fails_to_load() {
    let base = tempfile::tempdir().unwrap();
    let rooms = build_run(base.path(), 6);
    let dir = newest_run_dir(base.path(), DEFAULT_PREFIX).unwrap();

    let victim = rooms.room(rooms.end()).file_name();
    fs::write(dir.join(&victim), "ROOM NAME: Broken\nROOM TYPE: NOWHERE_ROOM\n").unwrap();
    match RoomSet::reconstruct_from(&dir) {
        Err(Error::InFile { path, source }) => {
            assert_eq!(path, dir.join(&victim));
            assert!(matches!(*source, Error::UnknownRoomType(_)));
        }
        other => panic!("unexpected {:?}", other),
    }

    fs::remove_file(dir.join(&victim)).unwrap();
    assert!(RoomSet::reconstruct_from(&dir).is_err());
}

#[macro_use]
extern crate room_adventure;
use room_adventure::{
    algo::reachability::shortest_path,
    cli::{init_logging, CliErr, Config},
    io::*,
    report::*,
    rooms::*,
    run_dir::create_run_dir,
};
use std::error::Error;

use log::info;
use rand::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let config = Config::from_env()?;
    let _reporter = enable_reporting("buildrooms", ReportSink::Stdout);

    let seed = config.seed.unwrap_or_else(random);
    report!("seed", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let rooms = {
        let _ctxt = push_context("generation".to_string());
        report_time("room generation", || RoomSet::generate(&mut rng))
    };

    report!(
        "rooms",
        rooms
            .rooms()
            .iter()
            .map(|room| json!({ "name": room.name(), "type": room.room_type().label(), "connections": room.connections() }))
            .collect::<Vec<_>>()
    );
    let hops = shortest_path(&rooms, rooms.start(), rooms.end()).map(|path| path.len() - 1);
    report!("start_end_hops", hops);

    let dir = create_run_dir(&config.base_dir, &config.dir_prefix)?;
    report!("run_dir", dir.display().to_string());
    info!("writing {} rooms to {}", rooms.len(), dir.display());

    let failures = rooms.deconstruct_best_effort(&dir);
    report!("write_failures", failures);
    if failures > 0 {
        return Err(Box::new(CliErr("Not all room files could be written")));
    }

    Ok(())
}

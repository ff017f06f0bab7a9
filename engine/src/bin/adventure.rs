#[macro_use]
extern crate room_adventure;
use room_adventure::{
    cli::{init_logging, Config},
    game::Adventure,
    io::*,
    report::*,
    rooms::*,
    run_dir::newest_run_dir,
    time_request::TimeFile,
    Error as RoomsError,
};
use std::{error::Error, io};

use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let config = Config::from_env()?;
    let _reporter = config.report.then(|| enable_reporting("adventure", ReportSink::Stderr));

    let dir = newest_run_dir(&config.base_dir, &config.dir_prefix).ok_or_else(|| RoomsError::NoRunDirectory {
        dir: config.base_dir.clone(),
        prefix: config.dir_prefix.clone(),
    })?;
    info!("loading rooms from {}", dir.display());
    report!("run_dir", dir.display().to_string());

    let rooms = RoomSet::reconstruct_from(&dir)?;
    let time_file = TimeFile::new(&config.time_file);

    let timer = Timer::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    Adventure::new(&rooms).run(stdin.lock(), stdout.lock(), &time_file)?;
    report!("session_ms", timer.get_passed_ms());

    Ok(())
}

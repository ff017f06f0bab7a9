//! Utilities for reading and writing rooms from and to disk.
//!
//! Each room is stored as a small text record in its own file.
//! A whole set of rooms is stored as a directory of such files.
//! To use it you should import the `Load`, `Store`, `Deconstruct` and `Reconstruct` traits and use the
//! `load_from`, `write_to`, `deconstruct_to` and `reconstruct_from` methods.
//!
//! # Example
//!
//! ```no_run
//! # use room_adventure::{io::*, rooms::*};
//! let rooms = RoomSet::reconstruct_from(&"rooms.1234")?;
//! rooms.room(rooms.start()).write_to(&"start_copy")?;
//! # Ok::<(), room_adventure::Error>(())
//! ```
//!
//! # Record format
//!
//! ```text
//! ROOM NAME: <name>
//! CONNECTION 1: <name>
//! CONNECTION 2: <name>
//! ROOM TYPE: <START_ROOM|MID_ROOM|END_ROOM>
//! ```

use crate::{
    error::{at, Error, Result},
    rooms::*,
};
use log::error;
use std::{
    ffi::OsStr,
    fs::File,
    io::{prelude::*, BufReader, BufWriter},
    path::{Path, PathBuf},
};

const NAME_LABEL: &str = "ROOM NAME: ";
const CONNECTION_LABEL: &str = "CONNECTION ";
const TYPE_LABEL: &str = "ROOM TYPE: ";

/// A trait for objects which can be written as a text record.
pub trait Store {
    /// Should write the serialized object to the given writer
    fn write_record(&self, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Writes the serialized object to the file with the given path
    fn write_to(&self, path: &dyn AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path).map_err(at(path))?);
        self.write_record(&mut writer).and_then(|_| writer.flush()).map_err(at(path))
    }
}

/// A trait to load text records back into objects.
pub trait Load: Sized {
    /// Should parse a single record from the reader.
    fn read_record(reader: &mut dyn BufRead) -> Result<Self>;

    /// This method will open the file, parse the record and return the object.
    /// Errors name the offending file.
    fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path).map_err(at(path))?);
        Self::read_record(&mut reader).map_err(|err| err.in_file(path))
    }
}

impl Store for Room {
    fn write_record(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}{}", NAME_LABEL, self.name())?;
        for (idx, connection) in self.connections().iter().enumerate() {
            writeln!(writer, "{}{}: {}", CONNECTION_LABEL, idx + 1, connection)?;
        }
        writeln!(writer, "{}{}", TYPE_LABEL, self.room_type())
    }
}

impl Load for Room {
    fn read_record(reader: &mut dyn BufRead) -> Result<Room> {
        let mut name = None;
        let mut room_type = None;
        let mut connections = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);

            if line.is_empty() {
                continue;
            } else if let Some(value) = line.strip_prefix(NAME_LABEL) {
                if name.replace(value.to_string()).is_some() {
                    return Err(Error::MalformedRecord("more than one room name".to_string()));
                }
            } else if let Some(value) = line.strip_prefix(TYPE_LABEL) {
                if room_type.replace(value.parse::<RoomType>()?).is_some() {
                    return Err(Error::MalformedRecord("more than one room type".to_string()));
                }
            } else if let Some(value) = line.strip_prefix(CONNECTION_LABEL) {
                connections.push(parse_connection(value)?.to_string());
            } else {
                return Err(Error::MalformedRecord(format!("unexpected line `{}`", line)));
            }
        }

        let name = name.ok_or_else(|| Error::MalformedRecord("missing room name".to_string()))?;
        let room_type = room_type.ok_or_else(|| Error::MalformedRecord("missing room type".to_string()))?;
        Room::new(name, connections, room_type)
    }
}

// `<n>: <name>` where n is the position of the connection, counted from 1
fn parse_connection(value: &str) -> Result<&str> {
    let (number, name) = value
        .split_once(": ")
        .ok_or_else(|| Error::MalformedRecord(format!("connection without name `{}`", value)))?;
    number
        .parse::<usize>()
        .map_err(|_| Error::MalformedRecord(format!("bad connection number `{}`", number)))?;
    Ok(name)
}

/// A trait to allow serializing objects which need more than a single file.
pub trait Deconstruct: Sized {
    /// Will be called indirectly and should call the `store_callback` for each file that should be written to disk.
    /// The first param of the callback is a name to identify the file, the second param the data to be stored.
    fn store_each(&self, store_callback: &mut dyn FnMut(&str, &dyn Store) -> Result<()>) -> Result<()>;

    /// Call with a directory arg to store this object in this directory.
    /// Stops at the first file which could not be written.
    fn deconstruct_to<D: AsRef<OsStr>>(&self, dir: &D) -> Result<()> {
        let path = Path::new(dir);
        self.store_each(&mut |name: &str, object: &dyn Store| object.write_to(&path.join(name)))
    }

    /// Like `deconstruct_to` but keeps going after failures.
    /// Each failure is logged, the number of files which could not be written is returned.
    fn deconstruct_best_effort<D: AsRef<OsStr>>(&self, dir: &D) -> usize {
        let path = Path::new(dir);
        let mut failures = 0;
        let result = self.store_each(&mut |name: &str, object: &dyn Store| {
            if let Err(err) = object.write_to(&path.join(name)) {
                error!("could not write {}: {}", name, err);
                failures += 1;
            }
            Ok(())
        });
        debug_assert!(result.is_ok());
        failures
    }
}

/// Helper struct for loading multiple objects back from disk.
/// Basically used as a callback for each object to load.
#[derive(Debug)]
pub struct Loader<'a> {
    path: &'a Path,
}

impl<'a> Loader<'a> {
    /// Call this method for each file that should be loaded back from disk.
    pub fn load<T: Load, P: AsRef<Path>>(&self, path: P) -> Result<T> {
        T::load_from(self.path.join(path))
    }

    /// Names of all regular files in the directory ending with `suffix`, sorted.
    pub fn files_with_suffix(&self, suffix: &str) -> Result<Vec<PathBuf>> {
        let dir = self.path.to_str().ok_or_else(|| Error::NonUnicodePath { path: self.path.to_path_buf() })?;
        let pattern = format!("{}/*{}", glob::Pattern::escape(dir), glob::Pattern::escape(suffix));

        let mut files = Vec::new();
        for entry in glob::glob(&pattern)? {
            let entry = entry?;
            if let (true, Some(name)) = (entry.is_file(), entry.file_name()) {
                files.push(PathBuf::from(name));
            }
        }
        files.sort();
        Ok(files)
    }
}

/// A trait to allow deserializing objects which need more than a single file.
pub trait Reconstruct: Sized {
    /// Will be called indirectly and should use the loader passed along to load all the necessary objects back.
    /// Should return the full deserialized object.
    fn reconstruct_with(loader: Loader) -> Result<Self>;

    /// Call with a directory arg to reconstruct an object from this directory.
    fn reconstruct_from<D: AsRef<OsStr>>(dir: &D) -> Result<Self> {
        let path = Path::new(dir);
        Self::reconstruct_with(Loader { path })
    }
}

impl Deconstruct for RoomSet {
    fn store_each(&self, store_callback: &mut dyn FnMut(&str, &dyn Store) -> Result<()>) -> Result<()> {
        for room in self.rooms() {
            store_callback(&room.file_name(), room)?;
        }
        Ok(())
    }
}

impl Reconstruct for RoomSet {
    fn reconstruct_with(loader: Loader) -> Result<Self> {
        let rooms = loader
            .files_with_suffix(ROOM_FILE_SUFFIX)?
            .into_iter()
            .map(|file| loader.load::<Room, _>(file))
            .collect::<Result<Vec<_>>>()?;
        RoomSet::from_rooms(rooms).map_err(|err| err.in_file(loader.path))
    }
}

//! Append-only file event log.
//!
//! Events are handed over a channel to a writer thread so that stations and
//! the arrival source never block on disk I/O. Files in the log directory:
//!
//! - `inserted.log`: admitted arrivals
//! - `dropped.log`: arrivals turned away
//! - `station_{index}.log`: service starts of one station

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::{LogConfig, LogFormat};
use crate::core::{
    Admission, ArrivalRecord, EventSink, FuelCatalog, FuelClass, ServiceRecord, SimulationError,
    StationEvent,
};
use crate::util::clock::format_timestamp;

/// Event sink writing one line per event into per-outcome files.
///
/// Text lines carry UTC wall-clock stamps; JSON lines keep epoch milliseconds.
pub struct FileEventSink {
    /// Sender half; `None` once closed.
    tx: Mutex<Option<Sender<StationEvent>>>,
    writer: Mutex<Option<JoinHandle<io::Result<u64>>>>,
    directory: PathBuf,
}

impl FileEventSink {
    /// Create the log directory if needed and start the writer thread.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::EventLog` if the directory cannot be created
    /// and `SimulationError::Spawn` if the writer thread cannot start.
    pub fn open(config: &LogConfig, catalog: FuelCatalog) -> Result<Self, SimulationError> {
        fs::create_dir_all(&config.directory)?;

        let (tx, rx) = unbounded();
        let writer = LogWriter::new(config.directory.clone(), config.format, catalog);
        let handle = thread::Builder::new()
            .name("event-log".into())
            .spawn(move || writer.run(&rx))
            .map_err(|source| SimulationError::Spawn {
                role: "event-log".into(),
                source,
            })?;

        info!(directory = %config.directory.display(), "event log opened");
        Ok(Self {
            tx: Mutex::new(Some(tx)),
            writer: Mutex::new(Some(handle)),
            directory: config.directory.clone(),
        })
    }

    /// Directory the log files live in.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Stop accepting events, flush everything queued and join the writer.
    ///
    /// Returns the number of lines written. Events recorded after closing are
    /// discarded with a warning.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::EventLog` on a write failure and
    /// `SimulationError::Panicked` if the writer thread panicked.
    pub fn close(&self) -> Result<u64, SimulationError> {
        self.tx.lock().take();
        let Some(handle) = self.writer.lock().take() else {
            return Ok(0);
        };
        let written = handle
            .join()
            .map_err(|_| SimulationError::Panicked("event-log".into()))??;
        debug!(written, "event log closed");
        Ok(written)
    }
}

impl EventSink for FileEventSink {
    fn record(&self, event: StationEvent) {
        let Some(tx) = self.tx.lock().clone() else {
            warn!(?event, "event log closed, dropping event");
            return;
        };
        if tx.send(event).is_err() {
            warn!("event log writer stopped, dropping event");
        }
    }
}

impl Drop for FileEventSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "event log did not close cleanly");
        }
    }
}

/// Writer-thread state: open files keyed by destination.
struct LogWriter {
    directory: PathBuf,
    format: LogFormat,
    catalog: FuelCatalog,
    files: HashMap<String, File>,
}

impl LogWriter {
    fn new(directory: PathBuf, format: LogFormat, catalog: FuelCatalog) -> Self {
        Self {
            directory,
            format,
            catalog,
            files: HashMap::new(),
        }
    }

    /// Drain the channel until every sender is gone.
    fn run(mut self, rx: &Receiver<StationEvent>) -> io::Result<u64> {
        let mut written = 0;
        for event in rx {
            let target = file_name(&event);
            let line = self.format_line(&event)?;
            info!("{line}");
            self.append(target, &line)?;
            written += 1;
        }
        Ok(written)
    }

    fn append(&mut self, file_name: String, line: &str) -> io::Result<()> {
        let file = match self.files.entry(file_name) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let path = self.directory.join(entry.key());
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                entry.insert(file)
            }
        };
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn fuel_name(&self, fuel: FuelClass) -> String {
        self.catalog
            .name(fuel)
            .map_or_else(|| fuel.to_string(), str::to_owned)
    }

    fn format_line(&self, event: &StationEvent) -> io::Result<String> {
        match self.format {
            LogFormat::Json => serde_json::to_string(event).map_err(io::Error::other),
            LogFormat::Text => Ok(match event {
                StationEvent::Arrival(ArrivalRecord {
                    vehicle_id,
                    fuel,
                    timestamp_ms,
                    outcome,
                }) => {
                    let verdict = match outcome {
                        Admission::Admitted => "entered the queue",
                        Admission::Dropped => "did not enter the queue",
                    };
                    format!(
                        "Vehicle {verdict}: id {vehicle_id}, fuel {}, arrived at {}",
                        self.fuel_name(*fuel),
                        format_timestamp(*timestamp_ms)
                    )
                }
                StationEvent::Service(ServiceRecord {
                    station_index,
                    vehicle_id,
                    fuel,
                    arrived_at_ms,
                    started_at_ms,
                }) => format!(
                    "Station {station_index} started serving vehicle {vehicle_id} \
                     (fuel {}, arrived at {}) at {}",
                    self.fuel_name(*fuel),
                    format_timestamp(*arrived_at_ms),
                    format_timestamp(*started_at_ms)
                ),
            }),
        }
    }
}

fn file_name(event: &StationEvent) -> String {
    match event {
        StationEvent::Arrival(r) if r.outcome == Admission::Admitted => "inserted.log".into(),
        StationEvent::Arrival(_) => "dropped.log".into(),
        StationEvent::Service(r) => format!("station_{}.log", r.station_index),
    }
}

// SPDX-License-Identifier: MIT

//! JSON export of an assembled workout.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::Workout;

/// Write a workout as pretty-printed JSON.
///
/// Truncates any existing file at `path`; the write is not atomic.
pub fn write_json(workout: &Workout, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, workout)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(
        workout_id = %workout.id,
        path = %path.display(),
        "Workout exported"
    );
    Ok(())
}

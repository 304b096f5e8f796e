//! LUMPREM irrigation schedule files.

use std::fs;
use std::path::Path;

use lumpr_calendar::RecurrenceEvent;
use lumpr_model::fmt_float;
use tracing::info;

use crate::error::DeckError;
use crate::writer::write_text;

/// Renders one `day flag rate` row per event.
pub fn render_irrigation(events: &[RecurrenceEvent]) -> String {
    events
        .iter()
        .map(|e| format!("{} {} {}\n", e.day(), e.flag(), fmt_float(e.rate())))
        .collect()
}

/// Writes an irrigation schedule file, creating its parent directory.
///
/// # Errors
///
/// Returns [`DeckError::Io`] on write failure.
pub fn write_irrigation_file(path: &Path, events: &[RecurrenceEvent]) -> Result<(), DeckError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| DeckError::io(parent, e))?;
    }
    write_text(path, &render_irrigation(events))?;
    info!(path = %path.display(), n_events = events.len(), "irrigation file written");
    Ok(())
}

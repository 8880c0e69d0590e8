//! Remove command for deleting a record.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::{RecordId, RecordStore, Tracker};

use crate::commands::show;
use crate::notify::{self, Notification, Outcome};

/// Deletes `id` and prints the refreshed view.
///
/// Deleting an ID that does not exist still succeeds, with a notification
/// saying there was nothing to delete.
pub fn run<S: RecordStore, W: Write>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    id: RecordId,
    today: NaiveDate,
) -> Result<Outcome> {
    let (removed, view) = match tracker.remove(id) {
        Ok(result) => result,
        Err(err) => return Ok(Outcome::Failed(notify::failure("deleting the record", &err))),
    };

    let notification = if removed {
        Notification::success("Record deleted", format!("Record #{id} was deleted."))
    } else {
        Notification::success("Nothing to delete", format!("There is no record #{id}."))
    };
    writeln!(writer, "{notification}")?;
    writeln!(writer)?;
    show::render(writer, &view, today)?;
    Ok(Outcome::Done)
}

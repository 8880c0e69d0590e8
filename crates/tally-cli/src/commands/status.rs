//! Status command for showing where records are stored.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tally_core::StoreError;
use tally_db::Database;

use crate::notify::{self, Outcome};

pub fn run<W: Write>(writer: &mut W, db: &Database, database_path: &Path) -> Result<Outcome> {
    let count = match db.count_records() {
        Ok(count) => count,
        Err(err) => {
            let err = StoreError::from(err);
            return Ok(Outcome::Failed(notify::failure("reading the database", &err)));
        }
    };

    writeln!(writer, "Tally status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Records: {count}")?;
    Ok(Outcome::Done)
}

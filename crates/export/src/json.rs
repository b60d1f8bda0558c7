use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{ExportError, writer_for_path};

/// Pretty-print `value` as JSON to `path` (`-` for stdout).
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
    let mut writer = writer_for_path(path)?;
    to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

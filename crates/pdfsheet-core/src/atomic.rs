use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::PdfSheetError;

/// Write `bytes` to `out` through a temporary file in the same directory,
/// renamed into place only once fully written.
///
/// A replaced file keeps its permissions. A new file gets the same mode a
/// plain `File::create` would (0o666 less the process umask).
pub fn write_atomic(out: &Path, bytes: &[u8]) -> Result<(), PdfSheetError> {
    let unwritable = |source: std::io::Error| PdfSheetError::OutputUnwritable {
        path: out.to_path_buf(),
        source,
    };

    let existing = std::fs::metadata(out).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdfsheet-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // open(2) applies the umask to this mode.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let dir = parent_dir(out);
    let mut tmp = builder.tempfile_in(&dir).map_err(unwritable)?;
    tmp.write_all(bytes).map_err(unwritable)?;
    tmp.as_file().sync_all().map_err(unwritable)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(unwritable)?;
    }
    tmp.persist(out).map_err(|e| unwritable(e.error))?;
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

//! Output routing for fetched bodies
//!
//! A body goes either to a file, written verbatim, or to stdout followed by
//! a newline. Nothing is written until the whole body is in memory.

use crate::error::FetchError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Mode for newly created output files
#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o644;

/// Write `body` to `destination`, or to stdout if there is none.
pub fn write_output(body: &[u8], destination: Option<&Path>) -> Result<(), FetchError> {
    match destination.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => write_file(body, path),
        None => {
            let stdout = std::io::stdout();
            write_stream(body, &mut stdout.lock()).map_err(|source| FetchError::Output {
                path: PathBuf::from("<stdout>"),
                source,
            })
        }
    }
}

/// Write `body` plus a trailing newline to `out`.
pub fn write_stream(body: &[u8], out: &mut impl Write) -> std::io::Result<()> {
    out.write_all(body)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Create or truncate `path` and write `body` into it.
pub fn write_file(body: &[u8], path: &Path) -> Result<(), FetchError> {
    let to_err = |source| FetchError::Output {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OUTPUT_FILE_MODE);
    }

    let mut file = options.open(path).map_err(to_err)?;
    file.write_all(body).map_err(to_err)?;
    file.flush().map_err(to_err)
}

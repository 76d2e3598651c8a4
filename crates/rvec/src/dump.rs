use core::{
    error,
    fmt::{self, Display, Formatter},
};

use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

pub const DEFAULT_PATH: &str = "test.son";

#[derive(Debug)]
pub enum DumpError {
    Open {
        path: PathBuf,
        err: io::Error,
    },
    Copy(io::Error),
}

impl Display for DumpError {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, .. } => write!(f, "Error opening file {}", path.display()),
            Self::Copy(_) => write!(f, "Error copying file"),
        }
    }
}

impl error::Error for DumpError {

    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Open { err, .. } => Some(err),
            Self::Copy(err) => Some(err),
        }
    }
}

/// Copies every byte of the file at `path` to `out`.
///
/// Nothing is written when the file cannot be opened.
pub fn dump(path: &Path, out: &mut impl Write) -> Result<u64, DumpError> {
    let file = File::open(path)
        .map_err(|err| DumpError::Open { path: path.to_path_buf(), err })?;
    let mut reader = BufReader::new(file);
    let copied = io::copy(&mut reader, out).map_err(DumpError::Copy)?;
    out.flush().map_err(DumpError::Copy)?;
    rvec_log::info!("dumped {} bytes from {}", copied, path.display());
    Ok(copied)
}

// crates/infra/src/persistence/file_reader.rs
use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::Path,
};

use enc_lines_shared_kernel::{InfraResult, InfrastructureError};

/// Convenience helpers for reading files with consistent error handling.
pub struct FileReader;

impl FileReader {
    /// Open the file at `path`.
    pub fn open(path: &Path) -> InfraResult<File> {
        File::open(path).map_err(InfrastructureError::file_read(path))
    }

    /// Length on disk of an already opened file.
    pub fn file_len(file: &File, path: &Path) -> InfraResult<u64> {
        file.metadata()
            .map(|meta| meta.len())
            .map_err(|source| InfrastructureError::FileMetadata { path: path.to_path_buf(), source })
    }

    /// Read the entire file into memory.
    pub fn read_to_end(path: &Path) -> InfraResult<Vec<u8>> {
        let mut file = Self::open(path)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).map_err(InfrastructureError::file_read(path))?;
        Ok(buf)
    }

    /// One `read` call, retried when interrupted. Returns 0 only at end of input.
    pub fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            match reader.read(buf) {
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                other => return other,
            }
        }
    }

    /// Fill `buf` as far as the input allows, returning the byte count.
    pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match Self::read_chunk(reader, &mut buf[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        Ok(filled)
    }
}

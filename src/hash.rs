//! BLAKE3 digests for resource package provenance

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{Result, file_read_failed};

/// Hash prefix for BLAKE3 digests
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate the BLAKE3 digest of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .map_err(|e| file_read_failed(path.display().to_string(), e.to_string()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| file_read_failed(path.display().to_string(), e.to_string()))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

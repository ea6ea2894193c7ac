use sha2::{Digest, Sha256, Sha512};
use std::fs;
use std::io;
use std::path::Path;

use crate::intoto::DigestSet;

/// Digest algorithms offered for subjects computed from files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Algorithm {
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Name used as the key in an in-toto digest set.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }

    pub fn hex_digest(self, data: &[u8]) -> String {
        match self {
            Algorithm::Sha256 => sha256_hex(data),
            Algorithm::Sha512 => sha512_hex(data),
        }
    }
}

/// Compute SHA-256 hex digest of a byte slice.
pub fn sha256_hex(data: &[u8]) -> String {
    hex_encode(&Sha256::digest(data))
}

/// Compute SHA-512 hex digest of a byte slice.
pub fn sha512_hex(data: &[u8]) -> String {
    hex_encode(&Sha512::digest(data))
}

/// Read a file once and digest it with every requested algorithm.
pub fn digest_file(path: &Path, algorithms: &[Algorithm]) -> io::Result<DigestSet> {
    let data = fs::read(path)?;
    Ok(algorithms
        .iter()
        .map(|alg| (alg.name().to_string(), alg.hex_digest(&data)))
        .collect())
}

pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn sha256_known_vector() {
        assert_eq!(sha256_hex(b"abc"), ABC_SHA256);
    }

    #[test]
    fn sha512_is_128_hex_chars() {
        let h = sha512_hex(b"abc");
        assert_eq!(h.len(), 128);
        assert!(h.starts_with("ddaf35a193617aba"));
    }

    #[test]
    fn digest_file_computes_each_algorithm() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();

        let set = digest_file(file.path(), &[Algorithm::Sha256, Algorithm::Sha512]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set["sha256"], ABC_SHA256);
        assert_eq!(set["sha512"], sha512_hex(b"abc"));
    }

    #[test]
    fn digest_file_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.bin");
        let err = digest_file(&missing, &[Algorithm::Sha256]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

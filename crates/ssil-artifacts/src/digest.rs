use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use ssil_core::SsilError;

/// A written output table plus its sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub sidecar_path: PathBuf,
    /// Lowercase hex SHA-256 of the table bytes.
    pub sha256: String,
    pub bytes_len: u64,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Streamed SHA-256 of a file on disk.
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String, SsilError> {
    let path = path.as_ref();
    let mut f = fs::File::open(path)
        .map_err(|e| SsilError::failure(format!("open '{}': {e}", path.display())))?;

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 1024 * 1024];
    loop {
        let n = f
            .read(&mut buf)
            .map_err(|e| SsilError::failure(format!("read '{}': {e}", path.display())))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// `<output path>.sha256`
pub fn sidecar_path(out: &Path) -> PathBuf {
    let mut s: OsString = out.as_os_str().to_owned();
    s.push(".sha256");
    PathBuf::from(s)
}

/// Write the rendered table, then the sidecar `<hex>  <file name>\n`.
///
/// The digest covers exactly the bytes written.
pub fn write_artifact(out: &Path, table: &[u8]) -> Result<WrittenArtifact, SsilError> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| SsilError::failure(format!("create dir '{}': {e}", parent.display())))?;
    }

    fs::write(out, table)
        .map_err(|e| SsilError::failure(format!("write '{}': {e}", out.display())))?;

    let digest = sha256_hex(table);
    let file_name = out
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| SsilError::failure(format!("output path has no file name: {}", out.display())))?;

    let sidecar = sidecar_path(out);
    fs::write(&sidecar, format!("{digest}  {file_name}\n"))
        .map_err(|e| SsilError::failure(format!("write '{}': {e}", sidecar.display())))?;

    Ok(WrittenArtifact {
        path: out.to_path_buf(),
        sidecar_path: sidecar,
        sha256: digest,
        bytes_len: table.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sidecar_appends_suffix() {
        assert_eq!(
            sidecar_path(Path::new("out/REPLAY_A/ssil_out.csv")),
            PathBuf::from("out/REPLAY_A/ssil_out.csv.sha256")
        );
    }

    #[test]
    fn write_artifact_records_digest_and_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("ssil_out.csv");
        let art = write_artifact(&out, b"t,a\r\n").unwrap();

        assert_eq!(art.bytes_len, 5);
        assert_eq!(fs::read(&out).unwrap(), b"t,a\r\n");
        assert_eq!(sha256_file(&out).unwrap(), art.sha256);

        let side = fs::read_to_string(&art.sidecar_path).unwrap();
        assert_eq!(side, format!("{}  ssil_out.csv\n", art.sha256));
    }
}

//! Save-file framing and the write/read protocols.
//!
//! Layout: a 20-byte header (magic, semver, reserved byte, CRC-32, payload
//! length, all little-endian) followed by the payload the collaborator
//! streams through [`SaveWriter`]. Writes go backup -> temp file -> atomic
//! rename so the previous good save survives any mid-write failure.

use crate::save::sidecar;
use crate::save::wire::{SaveReader, SaveWriter};
use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// `'N' 'E' 'C' 'R'` read as a little-endian u32.
pub const SAVE_MAGIC: u32 = 0x5243454E;
/// Format version written into every header. Major bumps reject older files.
pub const SAVE_VERSION: (u8, u8, u8) = (1, 0, 0);

const HEADER_LEN: usize = 20;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("save i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("not a save file (magic {found:#010x})")]
    BadMagic { found: u32 },
    #[error("incompatible save version {found}.x (this build reads {expected}.x)")]
    VersionMismatch { found: u8, expected: u8 },
    #[error("save file corrupted (stored crc {stored:#010x}, computed {computed:#010x})")]
    Corrupted { stored: u32, computed: u32 },
    #[error("payload truncated: wanted {wanted} bytes, {available} available")]
    ShortRead { wanted: usize, available: usize },
    #[error("save handler failed: {0}")]
    Handler(String),
}

/// Parsed file header. `minor`/`patch` drift is advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveHeader {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub checksum: u32,
    pub payload_len: u64,
}

impl SaveHeader {
    fn new(checksum: u32, payload_len: u64) -> Self {
        let (major, minor, patch) = SAVE_VERSION;
        Self {
            major,
            minor,
            patch,
            checksum,
            payload_len,
        }
    }

    fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&SAVE_MAGIC.to_le_bytes());
        bytes[4] = self.major;
        bytes[5] = self.minor;
        bytes[6] = self.patch;
        // bytes[7] reserved, zero
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..20].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    /// Parse and gate a header: magic and major version are checked here,
    /// before any payload allocation happens.
    fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self, SaveError> {
        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != SAVE_MAGIC {
            return Err(SaveError::BadMagic { found: magic });
        }
        let major = bytes[4];
        if major != SAVE_VERSION.0 {
            return Err(SaveError::VersionMismatch {
                found: major,
                expected: SAVE_VERSION.0,
            });
        }
        let mut len = [0u8; 8];
        len.copy_from_slice(&bytes[12..20]);
        Ok(Self {
            major,
            minor: bytes[5],
            patch: bytes[6],
            checksum: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            payload_len: u64::from_le_bytes(len),
        })
    }
}

/// Anything that can persist itself through the engine. The payload layout
/// inside the file is entirely the implementor's business; the engine only
/// frames and checks it.
pub trait SaveState: Sized {
    fn write_payload<W: Write>(&self, writer: &mut SaveWriter<W>) -> Result<(), SaveError>;
    fn read_payload(reader: &mut SaveReader<'_>) -> Result<Self, SaveError>;
    /// Operator-facing counts and flags for the JSON sidecar.
    fn sidecar_summary(&self) -> serde_json::Value;
}

/// `<home>/.necroshell_save.dat`, or the working directory without a home.
pub fn default_save_path() -> PathBuf {
    let base = directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".necroshell_save.dat")
}

/// Expand a leading `~` to the home directory; other paths pass through.
pub fn expand_home(path: &Path) -> PathBuf {
    let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) else {
        return path.to_path_buf();
    };
    if path == Path::new("~") {
        return home;
    }
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

pub fn save_file_exists(path: &Path) -> bool {
    expand_home(path).is_file()
}

/// Size in bytes of an existing save file, or `None` if absent.
pub fn save_file_size(path: &Path) -> Option<u64> {
    fs::metadata(expand_home(path)).ok().map(|meta| meta.len())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".bak");
    PathBuf::from(os)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

/// One-deep backup rotation: the current file becomes `<path>.bak`,
/// replacing any previous backup.
fn rotate_backup(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let backup = backup_path(path);
    if backup.exists() {
        fs::remove_file(&backup)?;
    }
    fs::rename(path, &backup)
}

/// Removes the temp file on drop unless the rename succeeded.
struct TempGuard<'a> {
    path: &'a Path,
    armed: bool,
}

impl Drop for TempGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(self.path);
        }
    }
}

/// Write `state` to `path` (with `~` expansion) and drop a JSON sidecar next
/// to it. The previous file, if any, is kept as `<path>.bak`.
pub fn save_to_path<S: SaveState>(state: &S, path: &Path) -> Result<(), SaveError> {
    let path = expand_home(path);
    rotate_backup(&path)?;

    let tmp = temp_path(&path);
    let mut guard = TempGuard {
        path: &tmp,
        armed: true,
    };

    write_framed(state, &tmp)?;
    fs::rename(&tmp, &path)?;
    guard.armed = false;
    drop(guard);

    sidecar::write_sidecar(&path, &state.sidecar_summary())?;
    Ok(())
}

fn write_framed<S: SaveState>(state: &S, tmp: &Path) -> Result<(), SaveError> {
    let mut file = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(tmp)?;

    // Placeholder header; checksum and length are patched after the payload
    // is on disk and read back.
    file.write_all(&SaveHeader::new(0, 0).to_bytes())?;

    let mut writer = SaveWriter::new(&mut file);
    state.write_payload(&mut writer)?;
    let payload_len = writer.bytes_written();

    file.seek(SeekFrom::Start(HEADER_LEN as u64))?;
    let mut payload = vec![0u8; payload_len as usize];
    file.read_exact(&mut payload)?;
    let checksum = crc32fast::hash(&payload);

    file.seek(SeekFrom::Start(0))?;
    file.write_all(&SaveHeader::new(checksum, payload_len).to_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Read and verify `path`, then hand the payload cursor to the collaborator
/// reader. Gating order: magic, major version, exact length, CRC.
pub fn load_from_path<S: SaveState>(path: &Path) -> Result<S, SaveError> {
    let payload = read_verified_payload(&expand_home(path))?;
    let mut reader = SaveReader::new(&payload);
    S::read_payload(&mut reader)
}

/// Check a file's framing and CRC without constructing any state.
pub fn validate_save_file(path: &Path) -> Result<SaveHeader, SaveError> {
    let path = expand_home(path);
    let mut file = fs::File::open(&path)?;
    let header = read_header(&mut file)?;
    let payload = read_payload(&mut file, &header)?;
    verify_crc(&header, &payload)?;
    Ok(header)
}

fn read_verified_payload(path: &Path) -> Result<Vec<u8>, SaveError> {
    let mut file = fs::File::open(path)?;
    let header = read_header(&mut file)?;
    let payload = read_payload(&mut file, &header)?;
    verify_crc(&header, &payload)?;
    Ok(payload)
}

fn read_header(file: &mut fs::File) -> Result<SaveHeader, SaveError> {
    let mut bytes = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        let n = file.read(&mut bytes[filled..])?;
        if n == 0 {
            return Err(SaveError::ShortRead {
                wanted: HEADER_LEN,
                available: filled,
            });
        }
        filled += n;
    }
    SaveHeader::parse(&bytes)
}

fn read_payload(file: &mut fs::File, header: &SaveHeader) -> Result<Vec<u8>, SaveError> {
    let wanted = header.payload_len as usize;
    let mut payload = Vec::with_capacity(wanted);
    file.take(header.payload_len).read_to_end(&mut payload)?;
    if payload.len() < wanted {
        return Err(SaveError::ShortRead {
            wanted,
            available: payload.len(),
        });
    }
    Ok(payload)
}

fn verify_crc(header: &SaveHeader, payload: &[u8]) -> Result<(), SaveError> {
    let computed = crc32fast::hash(payload);
    if computed != header.checksum {
        return Err(SaveError::Corrupted {
            stored: header.checksum,
            computed,
        });
    }
    Ok(())
}

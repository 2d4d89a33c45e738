//! ROM loading and validation for the Space Invaders board.
//!
//! The board's program ROM is four 2 KiB EPROMs (`invaders.h`, `.g`, `.f`,
//! `.e`, loaded in that order into 0x0000-0x1FFF) or, for convenience, a
//! single 8 KiB flat binary. Both forms assemble into the same memory
//! image; see [`ProgramRom::from_banks`]/[`ProgramRom::from_flat`].

use std::collections::HashMap;
use std::path::Path;

use crate::rom::{RomLoadError, crc32};

/// One 2 KiB bank of the program ROM, in load order.
pub const BANK_SIZE: usize = 0x0800;
pub const PROGRAM_SIZE: usize = BANK_SIZE * 4;

/// Bank file names, h/g/f/e, in the order they're concatenated.
pub const BANK_NAMES: [&str; 4] = ["invaders.h", "invaders.g", "invaders.f", "invaders.e"];

/// The assembled 8 KiB program ROM image, ready for [`crate::cpu::I8080::load`].
pub struct ProgramRom {
    pub image: [u8; PROGRAM_SIZE],
}

impl ProgramRom {
    /// Assemble from a single flat 8 KiB binary (e.g. `invaders.bin`).
    pub fn from_flat(data: &[u8]) -> Result<Self, RomLoadError> {
        if data.len() != PROGRAM_SIZE {
            return Err(RomLoadError::SizeMismatch {
                file: "<flat image>".into(),
                expected: PROGRAM_SIZE,
                actual: data.len(),
            });
        }
        let mut image = [0u8; PROGRAM_SIZE];
        image.copy_from_slice(data);
        Ok(Self { image })
    }

    /// Assemble from the four individually named 2 KiB banks, h/g/f/e in
    /// load order. `checksums` maps a bank file name to its known-good
    /// CRC32; banks absent from the map are size-checked only. Checksum
    /// checking is skipped entirely when `skip_checksums` is set.
    pub fn from_banks(
        files: &HashMap<String, Vec<u8>>,
        checksums: &HashMap<String, u32>,
        skip_checksums: bool,
    ) -> Result<Self, RomLoadError> {
        let mut image = [0u8; PROGRAM_SIZE];
        for (i, name) in BANK_NAMES.iter().enumerate() {
            let data = files
                .get(*name)
                .ok_or_else(|| RomLoadError::MissingFile(name.to_string()))?;
            if data.len() != BANK_SIZE {
                return Err(RomLoadError::SizeMismatch {
                    file: name.to_string(),
                    expected: BANK_SIZE,
                    actual: data.len(),
                });
            }
            if !skip_checksums && let Some(&expected) = checksums.get(*name) {
                let actual = crc32(data);
                if actual != expected {
                    return Err(RomLoadError::ChecksumMismatch {
                        file: name.to_string(),
                        expected,
                        actual,
                    });
                }
            }
            let offset = i * BANK_SIZE;
            image[offset..offset + BANK_SIZE].copy_from_slice(data);
        }
        Ok(Self { image })
    }

    /// Load from a directory containing either the four bank files or a
    /// single `invaders.bin` flat image, preferring the bank files.
    pub fn load_directory(
        dir: &Path,
        checksums: &HashMap<String, u32>,
        skip_checksums: bool,
    ) -> Result<Self, RomLoadError> {
        let mut files = HashMap::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                let name = path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                files.insert(name, std::fs::read(&path)?);
            }
        }

        if BANK_NAMES.iter().all(|name| files.contains_key(*name)) {
            return Self::from_banks(&files, checksums, skip_checksums);
        }
        if let Some(flat) = files.get("invaders.bin") {
            return Self::from_flat(flat);
        }
        Err(RomLoadError::MissingFile(
            "invaders.{h,g,f,e} or invaders.bin".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flat_rejects_wrong_size() {
        let data = vec![0u8; 100];
        assert!(matches!(
            ProgramRom::from_flat(&data),
            Err(RomLoadError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn from_flat_accepts_exact_size() {
        let data = vec![0xAAu8; PROGRAM_SIZE];
        let rom = ProgramRom::from_flat(&data).unwrap();
        assert_eq!(rom.image[0], 0xAA);
        assert_eq!(rom.image.len(), PROGRAM_SIZE);
    }

    #[test]
    fn from_banks_concatenates_in_hgfe_order() {
        let mut files = HashMap::new();
        files.insert("invaders.h".to_string(), vec![0x11; BANK_SIZE]);
        files.insert("invaders.g".to_string(), vec![0x22; BANK_SIZE]);
        files.insert("invaders.f".to_string(), vec![0x33; BANK_SIZE]);
        files.insert("invaders.e".to_string(), vec![0x44; BANK_SIZE]);
        let rom = ProgramRom::from_banks(&files, &HashMap::new(), true).unwrap();
        assert_eq!(rom.image[0], 0x11);
        assert_eq!(rom.image[BANK_SIZE], 0x22);
        assert_eq!(rom.image[BANK_SIZE * 2], 0x33);
        assert_eq!(rom.image[BANK_SIZE * 3], 0x44);
    }

    #[test]
    fn from_banks_reports_missing_file() {
        let files = HashMap::new();
        assert!(matches!(
            ProgramRom::from_banks(&files, &HashMap::new(), true),
            Err(RomLoadError::MissingFile(_))
        ));
    }

    #[test]
    fn from_banks_checksum_mismatch_detected() {
        let mut files = HashMap::new();
        files.insert("invaders.h".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.g".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.f".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.e".to_string(), vec![0x00; BANK_SIZE]);
        let mut checksums = HashMap::new();
        checksums.insert("invaders.h".to_string(), 0xDEAD_BEEFu32);
        assert!(matches!(
            ProgramRom::from_banks(&files, &checksums, false),
            Err(RomLoadError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn from_banks_skip_checksums_ignores_mismatch() {
        let mut files = HashMap::new();
        files.insert("invaders.h".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.g".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.f".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.e".to_string(), vec![0x00; BANK_SIZE]);
        let mut checksums = HashMap::new();
        checksums.insert("invaders.h".to_string(), 0xDEAD_BEEFu32);
        assert!(ProgramRom::from_banks(&files, &checksums, true).is_ok());
    }

    #[test]
    fn bank_absent_from_checksum_table_is_accepted_unverified() {
        let mut files = HashMap::new();
        files.insert("invaders.h".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.g".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.f".to_string(), vec![0x00; BANK_SIZE]);
        files.insert("invaders.e".to_string(), vec![0x00; BANK_SIZE]);
        assert!(ProgramRom::from_banks(&files, &HashMap::new(), false).is_ok());
    }
}

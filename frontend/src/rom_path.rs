//! ROM discovery: resolves a user-supplied path (or its absence) down to
//! an assembled [`ProgramRom`]. Search order matches the distilled spec's
//! §6: an explicit path wins; if it names the `.e` bank file its three
//! siblings are loaded from the same directory; if it's a directory, the
//! four bank files are preferred there and `invaders.bin` is the fallback.

use std::collections::HashMap;
use std::path::Path;

use invaders_core::machine::rom::ProgramRom;
use invaders_core::prelude::RomLoadError;

pub fn resolve_rom(
    path: Option<&str>,
    checksums: &HashMap<String, u32>,
    skip_checksums: bool,
) -> Result<ProgramRom, RomLoadError> {
    match path {
        None => ProgramRom::load_directory(Path::new("."), checksums, skip_checksums),
        Some(p) => {
            let p = Path::new(p);
            if p.is_dir() {
                return ProgramRom::load_directory(p, checksums, skip_checksums);
            }
            if p.file_name().and_then(|n| n.to_str()) == Some("invaders.e") {
                let dir = p.parent().unwrap_or(Path::new("."));
                return ProgramRom::load_directory(dir, checksums, skip_checksums);
            }
            let data = std::fs::read(p)?;
            ProgramRom::from_flat(&data)
        }
    }
}

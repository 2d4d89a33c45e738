use std::collections::HashMap;

use clap::Parser;
use invaders_core::machine::shell::SpaceInvaders;
use invaders_core::prelude::Machine;

mod audio;
mod config;
mod emulator;
mod error;
mod input;
mod overlay;
mod rom_path;
mod video;

/// Intel 8080 Space Invaders arcade board emulator.
#[derive(Parser, Debug)]
#[command(name = "invaders", about = "Space Invaders arcade board emulator")]
struct Args {
    /// Path to a ROM directory, a flat `invaders.bin`, or the `invaders.e`
    /// bank file. Defaults to the current directory.
    rom: Option<String>,

    /// Window scale factor.
    #[arg(long, default_value_t = 3)]
    scale: u32,

    /// Load ROMs without checking their CRC32 against known-good values.
    #[arg(long)]
    skip_checksum: bool,

    /// Draw a frames-per-second overlay in the top-left corner.
    #[arg(long)]
    fps: bool,
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = config::load();
    let scale = args.scale.max(1).min(8);
    if args.scale != scale {
        tracing::warn!(requested = args.scale, used = scale, "clamped window scale");
    }

    tracing::info!(rom = ?args.rom, scale, "starting");

    // No built-in checksum table is known to be correct for this ROM set;
    // verification only runs against checksums a user supplies, which this
    // CLI surface does not yet expose. `--skip-checksum` silences the
    // warning either way.
    let checksums: HashMap<String, u32> = HashMap::new();

    let rom = match rom_path::resolve_rom(args.rom.as_deref(), &checksums, args.skip_checksum) {
        Ok(rom) => rom,
        Err(err) => {
            tracing::error!(%err, "failed to load ROM");
            return std::process::ExitCode::from(1);
        }
    };

    let audio_sink = Box::new(audio::TracingAudioSink);
    let mut machine = match SpaceInvaders::with_audio_sink(&rom.image, audio_sink) {
        Ok(machine) => machine,
        Err(err) => {
            tracing::error!(%err, "failed to initialize CPU");
            return std::process::ExitCode::from(1);
        }
    };

    let key_map = input::default_key_map(machine.input_map(), &config.keys);
    let scale = config.scale.unwrap_or(scale);

    match emulator::run(&mut machine, &key_map, scale, args.fps) {
        Ok(Some(fault)) => {
            tracing::error!(%fault, "machine halted on a fatal CPU error");
            std::process::ExitCode::from(2)
        }
        Ok(None) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "presentation adapter failed");
            std::process::ExitCode::from(3)
        }
    }
}

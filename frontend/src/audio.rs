//! Sound port consumer. Full synthesis is out of scope; this sink exists
//! so the shell always has somewhere to send `SoundEvent`s, mirroring the
//! shape of a real audio backend without the sample generation.

use invaders_core::machine::shell::{AudioSink, SoundEvent};

pub struct TracingAudioSink;

impl AudioSink for TracingAudioSink {
    fn play(&mut self, event: SoundEvent) {
        tracing::debug!(?event, "sound trigger");
    }
}

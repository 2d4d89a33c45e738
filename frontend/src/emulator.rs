use std::time::Instant;

use invaders_core::machine::shell::SpaceInvaders;
use invaders_core::prelude::Machine;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use crate::error::AdapterError;
use crate::input::KeyMap;
use crate::overlay;
use crate::video::Video;

/// Run the SDL2 event/render loop until the window is closed or the
/// machine faults on an illegal opcode. Returns the fault, if any, so the
/// caller can report it and choose an exit code.
pub fn run(
    machine: &mut SpaceInvaders,
    key_map: &KeyMap,
    scale: u32,
    show_fps: bool,
) -> Result<Option<invaders_core::prelude::CpuError>, AdapterError> {
    let sdl_context = sdl2::init().map_err(AdapterError::Init)?;
    let sdl_video = sdl_context.video().map_err(AdapterError::Video)?;

    let (width, height) = machine.display_size();
    let mut video = Video::new(&sdl_video, "Space Invaders", width, height, scale)?;
    let mut event_pump = sdl_context
        .event_pump()
        .map_err(AdapterError::Init)?;

    let buffer_size = (width * height * 3) as usize;
    let mut framebuffer = vec![0u8; buffer_size];
    let mut last_frame = Instant::now();

    'main: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'main,

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, true);
                    }
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, false);
                    }
                }

                _ => {}
            }
        }

        machine.run_frame();
        if let Some(fault) = machine.fault() {
            return Ok(Some(fault));
        }

        machine.render_frame(&mut framebuffer);

        if show_fps {
            let elapsed = last_frame.elapsed();
            last_frame = Instant::now();
            let fps = if elapsed.as_secs_f64() > 0.0 {
                1.0 / elapsed.as_secs_f64()
            } else {
                0.0
            };
            overlay::draw_fps(&mut framebuffer, width as usize, &format!("{fps:.1}"));
        }

        video.present(&framebuffer);
    }

    Ok(None)
}

use std::collections::HashMap;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::api::Emulator;
use crate::controller::ButtonSnapshot;
use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};

/// Unpack the core's BGRA framebuffer into a tightly packed RGB24 buffer for
/// the SDL texture. The core never produces RGB24 itself — that would bake
/// an SDL-specific layout into the emulation core — so the front end does
/// the one conversion it needs at presentation time.
fn framebuffer_to_rgb24(framebuffer: &Framebuffer) -> [u8; 3 * WIDTH * HEIGHT] {
    let mut out = [0u8; 3 * WIDTH * HEIGHT];
    for (i, pixel) in framebuffer.pixels.iter().enumerate() {
        let r = ((pixel >> 16) & 0xFF) as u8;
        let g = ((pixel >> 8) & 0xFF) as u8;
        let b = (pixel & 0xFF) as u8;
        out[i * 3] = r;
        out[i * 3 + 1] = g;
        out[i * 3 + 2] = b;
    }
    out
}

/// Drive an `Emulator` in an SDL2 window: pump one frame per iteration,
/// blit it to a texture, and forward keyboard state as a button snapshot.
pub fn run(rom_bytes: &[u8]) {
    let sdl_context = sdl2::init().unwrap();
    let video_subsystem = sdl_context.video().unwrap();
    let window = video_subsystem
        .window("NES", (WIDTH as u32) * 3, (HEIGHT as u32) * 3)
        .position_centered()
        .build()
        .unwrap();

    let mut canvas = window.into_canvas().present_vsync().build().unwrap();
    let mut event_pump = sdl_context.event_pump().unwrap();
    canvas.set_scale(3.0, 3.0).unwrap();

    let creator = canvas.texture_creator();
    let mut texture = creator
        .create_texture_target(PixelFormatEnum::RGB24, WIDTH as u32, HEIGHT as u32)
        .unwrap();

    let mut key_map = HashMap::new();
    key_map.insert(Keycode::A, ButtonSnapshot::A);
    key_map.insert(Keycode::S, ButtonSnapshot::B);
    key_map.insert(Keycode::Q, ButtonSnapshot::SELECT);
    key_map.insert(Keycode::W, ButtonSnapshot::START);
    key_map.insert(Keycode::Up, ButtonSnapshot::UP);
    key_map.insert(Keycode::Down, ButtonSnapshot::DOWN);
    key_map.insert(Keycode::Left, ButtonSnapshot::LEFT);
    key_map.insert(Keycode::Right, ButtonSnapshot::RIGHT);

    let mut emulator = Emulator::new();
    emulator.load(rom_bytes).expect("failed to load ROM");
    emulator.reset();

    let mut framebuffer = Framebuffer::new();
    let mut buttons = ButtonSnapshot::empty();

    loop {
        emulator.step_frame(buttons, &mut framebuffer);

        let rgb = framebuffer_to_rgb24(&framebuffer);
        texture.update(None, &rgb, WIDTH * 3).unwrap();
        canvas.copy(&texture, None, None).unwrap();
        canvas.present();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => std::process::exit(0),
                Event::KeyDown { keycode: Some(keycode), .. } => {
                    if let Some(button) = key_map.get(&keycode) {
                        buttons.insert(*button);
                    }
                }
                Event::KeyUp { keycode: Some(keycode), .. } => {
                    if let Some(button) = key_map.get(&keycode) {
                        buttons.remove(*button);
                    }
                }
                _ => {}
            }
        }
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use tilequest::render::{NoAssets, Recorder};
use tilequest::{Game, GameConfig, Keys};

// Three bytes per frame: key bits (little endian), then frame time in
// hundredths of a second.
fuzz_target!(|data: &[u8]| {
    let config = GameConfig {
        seed: Some(1),
        ..GameConfig::default()
    };
    let mut game = Game::new(config, Box::new(NoAssets));

    for frame in data.chunks_exact(3).take(5000) {
        let keys = Keys::from_bits_truncate(u16::from_le_bytes([frame[0], frame[1]]));
        let dt = f32::from(frame[2]) / 100.0;
        game.tick(dt, keys);
        assert!(game.scene_name().is_some());
    }

    let mut surface = Recorder::new();
    game.draw(&mut surface);
});

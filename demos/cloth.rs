//! Headless cloth run: lets a pinned cloth settle under gravity and wind,
//! then releases one corner and reports the drape.
//!
//! ```sh
//! cargo run --example cloth
//! ```

use plume::prelude::*;
use plume::scenes;

const ROWS: usize = 12;
const COLS: usize = 12;

fn lowest_point(sys: &ParticleSystem) -> f32 {
    (0..sys.count())
        .map(|i| sys.state().position(i).z)
        .fold(f32::MAX, f32::min)
}

fn main() -> Result<(), SceneError> {
    let cfg = SimConfig::default();
    let mut sys = scenes::cloth(ROWS, COLS, 0.08)?;

    // Let it settle with both corners pinned.
    for _ in 0..300 {
        sys.step(&cfg);
    }
    println!(
        "cloth: {}x{} grid, lowest point after settling {:+.3}",
        ROWS,
        COLS,
        lowest_point(&sys)
    );

    // Release the first corner pin and let it swing.
    sys.constraint_mut(0)
        .expect("pin registered by the preset")
        .set_enabled(false);
    for _ in 0..300 {
        sys.step(&cfg);
    }
    println!(
        "released corner 0, lowest point now {:+.3}",
        lowest_point(&sys)
    );
    Ok(())
}

//! Headless snowfall run: steps the snow preset for a few simulated seconds
//! and prints where the flakes ended up.
//!
//! ```sh
//! cargo run --example snow
//! ```

use plume::prelude::*;
use plume::scenes;

fn main() -> Result<(), SceneError> {
    let cfg = SimConfig::default();
    let mut sys = scenes::snow(800)?;

    let mut time = Time::new();
    time.set_fixed_delta(Some(cfg.dt));
    let frames = 600; // ten simulated seconds
    for _ in 0..frames {
        time.update();
        for _ in 0..time.owed_steps(cfg.dt) {
            sys.step(&cfg);
        }
    }

    let mut grounded = 0;
    let mut falling = 0;
    for i in 0..sys.count() {
        if sys.state().position(i).z <= -1.99 {
            grounded += 1;
        } else if sys.state().velocity(i).z < 0.0 {
            falling += 1;
        }
    }
    println!(
        "snow: {} flakes, {} steps, {} resting on the ground, {} still falling",
        sys.count(),
        sys.steps(),
        grounded,
        falling
    );
    println!(
        "presentation buffer: {} floats ({} bytes)",
        sys.as_slice().len(),
        sys.as_bytes().len()
    );
    Ok(())
}

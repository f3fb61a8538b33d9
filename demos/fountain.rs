//! Headless fire fountain: steps the fountain preset and prints spark
//! statistics - heights, cooling, and recycle counts.
//!
//! ```sh
//! cargo run --example fountain
//! ```

use plume::prelude::*;
use plume::scenes;

fn main() -> Result<(), SceneError> {
    let cfg = SimConfig::default();
    let mut sys = scenes::fountain(500)?;

    for second in 1..=6 {
        for _ in 0..60 {
            sys.step(&cfg);
        }
        let mut peak = f32::MIN;
        let mut warm = 0;
        for i in 0..sys.count() {
            peak = peak.max(sys.state().position(i).z);
            if sys.state().color(i).x > 0.5 {
                warm += 1;
            }
        }
        println!(
            "t={}s  peak height {:+.2}  warm sparks {}/{}",
            second,
            peak,
            warm,
            sys.count()
        );
    }
    Ok(())
}

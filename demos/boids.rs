//! Headless boid flock: steps the flock and prints how velocity alignment
//! evolves - the classic signature of boid cohesion.
//!
//! ```sh
//! cargo run --example boids
//! ```

use plume::prelude::*;
use plume::scenes;

/// Mean length of the normalized-velocity sum: 1.0 means everyone flies the
/// same way, 0.0 means headings are fully scattered.
fn polarization(sys: &ParticleSystem) -> f32 {
    let mut sum = Vec3::ZERO;
    for i in 0..sys.count() {
        let v = sys.state().velocity(i);
        if v.length() > 1e-6 {
            sum += v.normalize();
        }
    }
    sum.length() / sys.count() as f32
}

fn main() -> Result<(), SceneError> {
    let cfg = SimConfig::default();
    let mut sys = scenes::boids(150)?;

    println!("boids: {} birds", sys.count());
    println!("  t=0s   polarization {:.3}", polarization(&sys));
    for second in 1..=8 {
        for _ in 0..60 {
            sys.step(&cfg);
        }
        println!("  t={}s   polarization {:.3}", second, polarization(&sys));
    }
    Ok(())
}

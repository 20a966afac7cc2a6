//! Example driving the playback scheduler with a simulated clock.
//! Shows the geodesic arc of a Hadamard and the straight-line shrink of noise.

use blochq::{
    BlochError, CircuitBuilder, Evaluator, GateStep, NoiseStep, PlaybackConfig, PlaybackScheduler, TickOutcome,
};
use tracing_subscriber::EnvFilter;

// Simulated frame interval of a 60 Hz render loop
const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<(), BlochError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("--- blochq Example: Hadamard Playback ---");

    let circuit = CircuitBuilder::new()
        .gate(GateStep::H)
        .noise(NoiseStep::AmplitudeDamping { gamma: 0.4 })
        .gate(GateStep::RotateZ { theta: std::f64::consts::FRAC_PI_2 })
        .build();
    println!("\nCircuit Definition:\n{}", circuit);

    let config = PlaybackConfig::from_json(r#"{"duration_ms": 200.0}"#)?;
    let mut scheduler = PlaybackScheduler::new(config);
    scheduler.load(Evaluator::new().run(&circuit));

    println!("\nRecorded frames:");
    if let Some(evaluation) = scheduler.evaluation() {
        println!("{}", evaluation);
    }

    println!("\nPlaying ({} frames, {} ms per transition):", scheduler.frame_count(), scheduler.config().duration_ms);
    let mut now = 0.0;
    scheduler.play(now);
    loop {
        now += FRAME_MS;
        match scheduler.tick(now) {
            TickOutcome::Advanced { vector } => {
                println!("  t={:>7.1}ms  {}  |r|={:.4}", now, vector, vector.length());
            }
            TickOutcome::Landed { index } => {
                println!("  t={:>7.1}ms  landed on frame {} -> {}", now, index, scheduler.published());
            }
            TickOutcome::Finished { index } => {
                println!("  t={:>7.1}ms  finished on frame {} -> {}", now, index, scheduler.published());
                break;
            }
            TickOutcome::Idle | TickOutcome::Stale => break,
        }
    }

    println!("\nFinal density matrix:\n{}", scheduler.published_density());
    println!("\n--- Example Finished ---");
    Ok(())
}

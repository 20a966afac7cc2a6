//! Example evaluating an editor-style JSON circuit with noise channels,
//! then re-running it strictly to surface the unknown step.

use blochq::operations::kraus::evolve_density;
use blochq::wire::{CircuitRequest, handle_request};
use blochq::{
    BlochError, DensityMatrix, Evaluator, EvaluatorConfig, UnknownStepPolicy, check_density, validate_frame,
};
use tracing_subscriber::EnvFilter;

const REQUEST: &str = r#"{"steps": [
    {"type": "gate", "name": "H", "qubit": 0},
    {"type": "noise", "name": "phase_damping", "params": {"lambda": 0.3}},
    {"type": "gate", "name": "Ry", "qubit": 0, "params": {"theta": 0.6}},
    {"type": "noise", "name": "amplitude_damping", "params": {"gamma": 0.25}},
    {"type": "gate", "name": "SWAP", "qubit": 0},
    {"type": "noise", "name": "depolarizing", "params": {"p": 0.1}}
]}"#;

fn main() -> Result<(), BlochError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blochq=debug")))
        .init();

    println!("--- blochq Example: Noisy Circuit ---");

    let request: CircuitRequest = serde_json::from_str(REQUEST)?;
    let circuit = request.to_circuit();
    println!("\nCircuit Definition:\n{}", circuit);

    // --- Fail-open evaluation ---
    let response = handle_request(&Evaluator::new(), &request)?;
    println!("\nFrames:");
    for (i, frame) in response.steps.iter().enumerate() {
        validate_frame(frame)?;
        println!(
            "  [{}] {}  theta={:.3} phi={:.3}",
            i,
            frame,
            frame.bloch_vector.theta(),
            frame.bloch_vector.phi()
        );
    }

    // --- Cross-check against the Kraus/unitary evolution ---
    let mut rho = DensityMatrix::from_bloch(response.steps[0].bloch_vector);
    for step in circuit.steps() {
        rho = evolve_density(&rho, step);
    }
    check_density(&rho, None)?;
    println!("\nMatrix-path final state: {}", rho.to_bloch());
    println!("Density matrix:\n{}", rho);

    // --- Strict evaluation ---
    let strict = Evaluator::with_config(EvaluatorConfig { unknown_steps: UnknownStepPolicy::Reject });
    match strict.try_run(&circuit) {
        Ok(_) => println!("\nStrict run accepted every step."),
        Err(e) => println!("\nStrict run rejected the circuit: {}", e),
    }

    println!("\n--- Example Finished ---");
    Ok(())
}

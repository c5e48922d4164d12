use simulation::{run_simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

pub mod simulation;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("\n╔══════════════════════════════════════════════════════╗");
    println!("║            DRIFTSYNC TWO-DEVICE SIMULATION           ║");
    println!("╚══════════════════════════════════════════════════════╝");

    // Lossless wire: every packet lands, no resync ever needed.
    let stats = run_simulation(&SimulationConfig {
        rounds: 200,
        drop_every: 0,
        seed: 7,
    })
    .expect("lossless run failed");
    stats.print();

    // Lossy wire: every 17th packet vanishes, the fallback kicks in.
    let stats = run_simulation(&SimulationConfig {
        rounds: 500,
        drop_every: 17,
        seed: 42,
    })
    .expect("lossy run failed");
    stats.print();

    println!("\n✓ Devices converged in every round");
}

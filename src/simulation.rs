//! Two-device sync simulation.
//!
//! Drives a sender and a receiver service through randomized rounds of
//! mutate -> packet -> compress -> wire -> decompress -> apply, with packet
//! loss injected on a fixed cadence to exercise the full-resync fallback.
//! Convergence is asserted after every delivery.

use dse_engine::{
    compress, decompress, DeltaPacket, DeltaSyncService, MemoryStorage, StateMap, StoreStats, SyncError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::time::{Duration, Instant};

const ENTITY_TYPE: &str = "fleet";

/// Knobs for one simulation run.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Mutation rounds to drive.
    pub rounds: usize,
    /// Drop every n-th packet on the simulated wire (0 = lossless).
    pub drop_every: usize,
    /// Seed for the mutation driver, so runs are reproducible.
    pub seed: u64,
}

/// Statistics collected during a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationStats {
    pub rounds: usize,
    pub packets_delivered: usize,
    pub packets_dropped: usize,
    pub no_change_rounds: usize,
    pub full_syncs: usize,
    /// Bytes a naive full-state sync would have shipped.
    pub full_state_bytes: usize,
    /// Bytes the delta wire actually carried.
    pub wire_bytes: usize,
    pub elapsed: Duration,
    pub store: StoreStats,
}

impl SimulationStats {
    pub fn print(&self) {
        let oldest = self
            .store
            .oldest_sync
            .and_then(|ms| chrono::DateTime::from_timestamp_millis(ms as i64))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!("\n╔══════════════════════════════════════════════════════╗");
        println!("║              Sync Simulation Statistics              ║");
        println!("╠══════════════════════════════════════════════════════╣");
        println!("║  Rounds:               {:>28} ║", self.rounds);
        println!("║  Packets Delivered:    {:>28} ║", self.packets_delivered);
        println!("║  Packets Dropped:      {:>28} ║", self.packets_dropped);
        println!("║  No-change Rounds:     {:>28} ║", self.no_change_rounds);
        println!("║  Full Resyncs:         {:>28} ║", self.full_syncs);
        println!("║  Full-state Bytes:     {:>28} ║", self.full_state_bytes);
        println!("║  Delta Wire Bytes:     {:>28} ║", self.wire_bytes);
        println!("║  Wire Savings:         {:>27}% ║", self.savings_percent());
        println!("║  Elapsed:              {:>26}ms ║", self.elapsed.as_millis());
        println!("║  Oldest Sync:          {:>28} ║", oldest);
        println!("╚══════════════════════════════════════════════════════╝");
    }

    fn savings_percent(&self) -> i64 {
        if self.full_state_bytes == 0 {
            return 0;
        }
        100 - (self.wire_bytes as i64 * 100) / self.full_state_bytes as i64
    }
}

fn initial_state() -> StateMap {
    match json!({
        "crew": {"pilot": {"status": "idle"}, "count": 2},
        "gauge0": 0, "gauge1": 0, "gauge2": 0, "gauge3": 0,
        "tags": ["alpha"]
    }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("literal is an object"),
    }
}

/// Apply one random field-level mutation.
fn mutate(state: &mut StateMap, rng: &mut StdRng) {
    match rng.gen_range(0..4) {
        0 => {
            let key = format!("gauge{}", rng.gen_range(0..4));
            state.insert(key, json!(rng.gen_range(0..1_000)));
        }
        1 => {
            let status = ["idle", "busy", "resting"][rng.gen_range(0..3)];
            state.insert(
                "crew".to_string(),
                json!({"pilot": {"status": status}, "count": rng.gen_range(1..6)}),
            );
        }
        2 => {
            let tags: Vec<String> = (0..rng.gen_range(1..5))
                .map(|_| format!("tag{}", rng.gen_range(0..10)))
                .collect();
            state.insert("tags".to_string(), json!(tags));
        }
        _ => {
            if state.contains_key("note") {
                state.remove("note");
            } else {
                state.insert("note".to_string(), json!("in transit"));
            }
        }
    }
}

/// Run one simulation and return its statistics.
pub fn run_simulation(config: &SimulationConfig) -> dse_engine::Result<SimulationStats> {
    let started = Instant::now();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let sender = DeltaSyncService::open(MemoryStorage::new())?;
    let receiver = DeltaSyncService::open(MemoryStorage::new())?;

    // Bootstrap: the receiver full-syncs off the sender's initial record.
    let mut current = initial_state();
    let record = sender.set_initial_state(ENTITY_TYPE, current.clone())?;
    receiver.commit_full_state(ENTITY_TYPE, record.version, current.clone())?;
    let mut full_syncs = 1;

    let mut packets_delivered = 0;
    let mut packets_dropped = 0;
    let mut no_change_rounds = 0;
    let mut full_state_bytes = 0;
    let mut wire_bytes = 0;

    for round in 1..=config.rounds {
        mutate(&mut current, &mut rng);

        let Some(packet) = sender.create_delta_packet(ENTITY_TYPE, &current)? else {
            // The mutation landed back on the stored value.
            no_change_rounds += 1;
            continue;
        };

        let payload = packet.to_json().map_err(|err| SyncError::Encoding(err.to_string()))?;
        let wire = compress(&payload)?;
        full_state_bytes += serde_json::to_string(&current)
            .map_err(|err| SyncError::Encoding(err.to_string()))?
            .len();
        wire_bytes += wire.len();

        if config.drop_every != 0 && round % config.drop_every == 0 {
            packets_dropped += 1;
            continue;
        }

        let received = DeltaPacket::from_json(&decompress(&wire)?)
            .map_err(|err| SyncError::Encoding(err.to_string()))?;
        match receiver.process_delta_packet(ENTITY_TYPE, &received)? {
            Some(rebuilt) => {
                assert_eq!(rebuilt, current, "receiver diverged after apply");
                packets_delivered += 1;
            }
            None => {
                // Stale after a dropped packet: ship the whole record.
                let version = sender
                    .get_version(ENTITY_TYPE)
                    .expect("sender always has a record here");
                receiver.commit_full_state(ENTITY_TYPE, version, current.clone())?;
                full_syncs += 1;
            }
        }

        assert_eq!(
            receiver.get_state(ENTITY_TYPE),
            sender.get_state(ENTITY_TYPE),
            "devices diverged"
        );
    }

    Ok(SimulationStats {
        rounds: config.rounds,
        packets_delivered,
        packets_dropped,
        no_change_rounds,
        full_syncs,
        full_state_bytes,
        wire_bytes,
        elapsed: started.elapsed(),
        store: sender.stats(),
    })
}

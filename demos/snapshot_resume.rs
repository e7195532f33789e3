//! Snapshot and Resume
//!
//! This example saves a machine's position mid-run, simulates a process
//! restart, and resumes by re-attaching freshly built states by name.
//!
//! Key concepts:
//! - Snapshots record names and counters, never hooks
//! - JSON for inspectable saves, binary for compact ones
//! - Restore fires no hooks; the entity is assumed already shaped
//! - Version checking rejects foreign snapshot formats
//!
//! Run with: cargo run --example snapshot_resume

use demeanor::builder::StateBuilder;
use demeanor::{Snapshot, StateHandle, StateMachine};

struct Hauler {
    cargo: u32,
    fuel: f32,
}

fn build_states() -> Vec<StateHandle<Hauler>> {
    let load = StateBuilder::new("LOAD")
        .on_entering(|hauler: &mut Hauler| {
            hauler.cargo += 10;
            println!("    -> LOAD: cargo at {}", hauler.cargo);
        })
        .build();

    let haul = StateBuilder::new("HAUL")
        .on_entering(|_: &mut Hauler| println!("    -> HAUL: rolling out"))
        .on_update(|hauler: &mut Hauler, dt| hauler.fuel -= 3.0 * dt)
        .build();

    let unload = StateBuilder::new("UNLOAD")
        .on_entering(|hauler: &mut Hauler| {
            hauler.cargo = 0;
            println!("    -> UNLOAD: cargo dropped");
        })
        .build();

    vec![load, haul, unload]
}

fn main() {
    println!("=== Snapshot and Resume ===\n");

    println!("Phase 1: a hauler works part of its shift");
    let states = build_states();
    let mut hauler = Hauler {
        cargo: 0,
        fuel: 100.0,
    };

    let mut machine = StateMachine::new(&states[0], &mut hauler);
    machine.change_state(&states[1], &mut hauler);
    for _ in 0..8 {
        machine.update(0.5, &mut hauler);
    }
    println!(
        "  mid-run: {} with {} cargo, {:.1} fuel, {} ticks",
        machine.current_state().name(),
        hauler.cargo,
        hauler.fuel,
        machine.ticks()
    );

    println!("\nPhase 2: save the position");
    let snapshot = machine.snapshot();
    let json = snapshot.to_json().unwrap();
    let bytes = snapshot.to_bytes().unwrap();
    println!("  JSON ({} bytes): {json}", json.len());
    println!("  binary: {} bytes", bytes.len());

    println!("\nPhase 3: the process restarts");
    drop(machine);
    drop(states);
    println!("  machine and states are gone; only the encoded snapshot survives");

    println!("\nPhase 4: rebuild states and resume");
    let states = build_states();
    let decoded = Snapshot::from_json(&json).unwrap();
    let mut machine = StateMachine::restore(&decoded, &states).unwrap();
    println!(
        "  resumed in {} at tick {} (no hooks fired)",
        machine.current_state().name(),
        machine.ticks()
    );

    // The entity itself is saved by the application, not by the machine.
    let mut hauler = Hauler {
        cargo: 10,
        fuel: 88.0,
    };
    machine.update(0.5, &mut hauler);
    machine.change_state(&states[2], &mut hauler);
    println!(
        "  back to work: {} with {} cargo after {} ticks",
        machine.current_state().name(),
        hauler.cargo,
        machine.ticks()
    );
    println!("  full route: {:?}", machine.log().path());

    println!("\nPhase 5: foreign versions are rejected");
    let mut tampered = decoded.clone();
    tampered.version = 99;
    let verdict = Snapshot::from_json(&tampered.to_json().unwrap());
    match verdict {
        Err(error) => println!("  rejected: {error}"),
        Ok(_) => println!("  unexpectedly accepted"),
    }

    println!("\n=== Example Complete ===");
}

//! Basic Entity State Machine
//!
//! This example demonstrates the core loop: build states with hooks, hold
//! the current one in a machine, tick it, and change state explicitly.
//!
//! Key concepts:
//! - Named states with optional lifecycle hooks
//! - Explicit state changes decided by the owner, never by the machine
//! - Per-tick update dispatch with a time delta in seconds
//! - The transition log as a record of the route taken
//!
//! Run with: cargo run --example basic

use demeanor::builder::StateBuilder;
use demeanor::StateMachine;

struct Critter {
    energy: f32,
    position: f32,
}

fn main() {
    println!("=== Basic Entity State Machine ===\n");

    let wander = StateBuilder::new("WANDER")
        .on_entering(|_: &mut Critter| println!("    -> WANDER: stretching legs"))
        .on_update(|critter: &mut Critter, dt| {
            critter.position += 16.0 * dt;
            critter.energy -= 12.0 * dt;
        })
        .build();

    let rest = StateBuilder::new("REST")
        .on_entering(|_: &mut Critter| println!("    -> REST: settling down"))
        .on_update(|critter: &mut Critter, dt| critter.energy += 20.0 * dt)
        .on_exiting(|_: &mut Critter| println!("    <- REST: refreshed"))
        .build();

    let mut critter = Critter {
        energy: 50.0,
        position: 0.0,
    };

    println!("Ticking at dt = 0.5s; the critter rests below 20 energy");
    println!("and wanders again at 80.\n");

    let mut machine = StateMachine::new(&wander, &mut critter);

    for tick in 0..12 {
        machine.update(0.5, &mut critter);

        if critter.energy <= 20.0 {
            machine.change_state(&rest, &mut critter);
        } else if critter.energy >= 80.0 {
            machine.change_state(&wander, &mut critter);
        }

        println!(
            "  tick {tick:2}: {:<6} energy {:5.1}  position {:5.1}",
            machine.current_state().name(),
            critter.energy,
            critter.position
        );
    }

    println!("\nRoute taken: {:?}", machine.log().path());
    println!("Changes logged: {}", machine.log().len());
    println!("Ticks counted: {}", machine.ticks());

    println!("\n=== Example Complete ===");
}

//! Sentry NPC Behavior
//!
//! This example drives a guard NPC through a full engagement: patrol,
//! attack, flee, and an absorbing dead state that ignores all stimuli.
//!
//! Key concepts:
//! - The owner's decision loop changes state; hooks only shape the entity
//! - Provenance-aware entry via on_entered_from and handle identity
//! - Per-state scratch captured inside a hook closure
//! - An absorbing state enforced by the owner checking is_in
//!
//! Run with: cargo run --example sentry

use demeanor::builder::StateBuilder;
use demeanor::{StateHandle, StateMachine};
use std::sync::Mutex;

const PATROL_SPEED: f32 = 80.0;
const RETURN_SPEED: f32 = 120.0;
const ATTACK_SPEED: f32 = 160.0;
const FLEE_SPEED: f32 = 200.0;

struct Npc {
    health: i32,
    distance_to_player: f32,
    speed: f32,
    x: f32,
}

struct SentryStates {
    patrol: StateHandle<Npc>,
    attack: StateHandle<Npc>,
    flee: StateHandle<Npc>,
    dead: StateHandle<Npc>,
}

fn build_states() -> SentryStates {
    // Fight counter lives inside the attack state's closure.
    let fights = Mutex::new(0u32);
    let attack = StateBuilder::new("ATTACK")
        .on_entering(move |npc: &mut Npc| {
            let mut fights = fights.lock().unwrap();
            *fights += 1;
            npc.speed = ATTACK_SPEED;
            println!("    -> ATTACK: engaging (fight #{fights})");
        })
        .build();

    // Returning from a fight, the sentry hustles back to its route.
    let from_attack = attack.clone();
    let patrol = StateBuilder::new("PATROL")
        .on_entering(|npc: &mut Npc| {
            npc.speed = PATROL_SPEED;
            println!("    -> PATROL: walking the route");
        })
        .on_entered_from(move |npc: &mut Npc, previous| {
            if *previous == from_attack {
                npc.speed = RETURN_SPEED;
                println!("    -> PATROL: double-timing it back");
            }
        })
        .on_update(|npc: &mut Npc, dt| npc.x += npc.speed * dt)
        .build();

    let flee = StateBuilder::new("FLEE")
        .on_entering(|npc: &mut Npc| {
            npc.speed = FLEE_SPEED;
            println!("    -> FLEE: running for it");
        })
        .build();

    let dead = StateBuilder::new("DEAD")
        .on_entering(|npc: &mut Npc| {
            npc.speed = 0.0;
            println!("    -> DEAD");
        })
        .build();

    SentryStates {
        patrol,
        attack,
        flee,
        dead,
    }
}

/// The owner's judgement, run once per tick after hooks have returned.
fn decide(machine: &mut StateMachine<Npc>, npc: &mut Npc, states: &SentryStates) {
    if machine.is_in(&states.dead) {
        return;
    }
    if npc.health <= 0 {
        machine.change_state(&states.dead, npc);
    } else if npc.health < 20 {
        machine.change_state(&states.flee, npc);
    } else if npc.distance_to_player < 150.0 {
        machine.change_state(&states.attack, npc);
    } else {
        machine.change_state(&states.patrol, npc);
    }
}

fn tick(machine: &mut StateMachine<Npc>, npc: &mut Npc, states: &SentryStates, count: u32) {
    for _ in 0..count {
        machine.update(0.25, npc);
        decide(machine, npc, states);
    }
    println!(
        "  {:<6} speed {:5.1}  x {:6.1}  hp {:3}",
        machine.current_state().name(),
        npc.speed,
        npc.x,
        npc.health
    );
}

fn main() {
    println!("=== Sentry NPC Behavior ===\n");

    let states = build_states();
    let mut npc = Npc {
        health: 100,
        distance_to_player: 400.0,
        speed: 0.0,
        x: 0.0,
    };

    println!("Spawning sentry on its route:");
    let mut machine = StateMachine::new(&states.patrol, &mut npc);

    println!("\nQuiet shift:");
    tick(&mut machine, &mut npc, &states, 4);

    println!("\nPlayer spotted at 100m:");
    npc.distance_to_player = 100.0;
    tick(&mut machine, &mut npc, &states, 2);

    println!("\nPlayer retreats out of range:");
    npc.distance_to_player = 300.0;
    tick(&mut machine, &mut npc, &states, 2);

    println!("\nPlayer charges back in:");
    npc.distance_to_player = 80.0;
    tick(&mut machine, &mut npc, &states, 2);

    println!("\nSentry takes heavy damage:");
    npc.health = 15;
    tick(&mut machine, &mut npc, &states, 2);

    println!("\nAnd is finished off:");
    npc.health = 0;
    tick(&mut machine, &mut npc, &states, 1);

    println!("\nStimuli no longer matter:");
    npc.health = 100;
    npc.distance_to_player = 10.0;
    tick(&mut machine, &mut npc, &states, 2);

    println!("\nRoute taken: {:?}", machine.log().path());
    println!(
        "Still dead: {} after {} ticks",
        machine.is_in(&states.dead),
        machine.ticks()
    );

    println!("\n=== Example Complete ===");
}

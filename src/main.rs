//! Gravemarch - Entry Point
//!
//! Drives the horde simulation from an interactive prompt: advance ticks,
//! watch waves spawn and escalate, and stand in for the player's weapon
//! with a simple auto-aimed shot. Optionally loads a JSON scenario that
//! overrides the seed, starting day and map.

use gravemarch::arena::map::ArenaMap;
use gravemarch::core::config::{Scenario, SimConfig};
use gravemarch::core::error::Result;
use gravemarch::simulation::tick::{Simulation, SimulationEvent};

use std::io::{self, Write};

/// Seconds of simulation time per tick
const TICK_DT: f32 = 0.1;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gravemarch=info".into()),
        )
        .init();

    tracing::info!("Gravemarch starting...");

    // Optional scenario file as the first argument
    let mut config = SimConfig::default();
    let mut map = ArenaMap::default_map();
    if let Some(path) = std::env::args().nth(1) {
        let scenario = Scenario::load(std::path::Path::new(&path))?;
        scenario.apply(&mut config);
        if let Some(text) = &scenario.map {
            map = ArenaMap::parse(text)?;
        }
        tracing::info!(path, "scenario loaded");
    }

    let mut sim = Simulation::new(config, map)?;

    println!("\n=== GRAVEMARCH ===");
    println!("Wave-based horde combat simulation");
    println!();
    println!("Commands:");
    println!("  tick / t   - Advance the simulation by one tick ({}s)", TICK_DT);
    println!("  run <n>    - Run n ticks");
    println!("  fire / f   - Shoot the nearest actor");
    println!("  status / s - Show detailed status");
    println!("  quit / q   - Exit");
    println!();

    // Main loop
    loop {
        display_status(&sim);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            report_events(&sim.run_tick(TICK_DT));
            println!("Tick {} complete.", sim.tick);
            continue;
        }

        if input == "fire" || input == "f" {
            match sim.nearest_actor() {
                Some(id) => {
                    if let Some(outcome) = sim.apply_player_hit(id) {
                        if outcome.evaded {
                            println!("The shot is evaded!");
                        } else if outcome.blocked {
                            println!("Blocked - only {:.0} damage lands.", outcome.actual_damage);
                        } else {
                            println!("Hit for {:.0} damage.", outcome.actual_damage);
                        }
                        if outcome.reflected_damage > 0.0 {
                            println!("Thorns bite back for {:.0}!", outcome.reflected_damage);
                        }
                        if outcome.will_revive {
                            println!("It crumples... but something still stirs.");
                        }
                        if outcome.undying_triggered {
                            println!("It refuses to die!");
                        }
                        if outcome.died {
                            println!("Kill confirmed.");
                        }
                    }
                }
                None => println!("Nothing to shoot."),
            }
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&sim);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.parse::<u32>() {
                println!("Running {} ticks...", n);
                for _ in 0..n {
                    report_events(&sim.run_tick(TICK_DT));
                }
                println!("Completed {} ticks. Now at tick {}.", n, sim.tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, fire, status, quit");
    }

    println!(
        "\nGoodbye! Final state: day {}, {} actors, {} ticks elapsed.",
        sim.day,
        sim.actors.len(),
        sim.tick
    );
    Ok(())
}

/// Print the tick's notable events
fn report_events(events: &[SimulationEvent]) {
    for event in events {
        match event {
            SimulationEvent::WaveSpawned { day, count } => {
                println!("! Day {}: a wave of {} rises.", day, count);
            }
            SimulationEvent::AttackLanded { attacker, damage, critical } => {
                let mark = if *critical { " (CRIT)" } else { "" };
                println!("! {} hits you for {:.0}{}.", attacker, damage, mark);
            }
            SimulationEvent::RingHit { attacker, damage } => {
                println!("! {}'s shockwave hits you for {:.0}.", attacker, damage);
            }
            SimulationEvent::ProjectileRequested { attacker, .. } => {
                println!("! {} looses a projectile at you.", attacker);
            }
            SimulationEvent::CorpseExploded { source, damage } => {
                println!("! {}'s corpse detonates for {:.0}.", source, damage);
            }
            SimulationEvent::DamageReflected { source, damage } => {
                println!("! {} reflects {:.0} back at you.", source, damage);
            }
            SimulationEvent::Summoned { summoner, count } => {
                println!("! {} calls {} packmates.", summoner, count);
            }
            SimulationEvent::ActorRevived { name } => {
                println!("! {} rises again.", name);
            }
            SimulationEvent::UndyingTriggered { name } => {
                println!("! {} refuses to die.", name);
            }
            SimulationEvent::ActorDied { name, level, .. } => {
                println!("! {} (level {}) is destroyed.", name, level);
            }
            SimulationEvent::PlayerDied => {
                println!("! You have fallen. The march goes on without you.");
            }
        }
    }
}

/// Display a brief status summary
fn display_status(sim: &Simulation) {
    println!();
    println!(
        "--- Day {} | Tick {} | Actors: {} ({} alive) | You: {:.0}/{:.0} HP ---",
        sim.day,
        sim.tick,
        sim.actors.len(),
        sim.alive_count(),
        sim.player.health,
        sim.player.max_health
    );
    println!();
}

/// Display detailed status of all actors
fn display_detailed_status(sim: &Simulation) {
    println!();
    println!("=== Detailed Status (Day {}, Tick {}) ===", sim.day, sim.tick);
    println!(
        "Player at ({:.0}, {:.0}), {:.0}/{:.0} HP",
        sim.player.position.x, sim.player.position.y, sim.player.health, sim.player.max_health
    );
    println!();

    for actor in actors_by_distance(sim).into_iter().take(15) {
        let dist = actor.position.distance(&sim.player.position);
        println!(
            "  {} [lvl {}] - {:.0}/{} HP, {:?}, {:.0} units away",
            actor.name(),
            actor.stats.level,
            actor.current_health,
            actor.stats.max_health,
            actor.state,
            dist
        );
    }
    if sim.actors.len() > 15 {
        println!("  ... and {} more", sim.actors.len() - 15);
    }
    if !sim.explosions.is_empty() {
        println!("  {} corpse explosion(s) pending", sim.explosions.len());
    }
    println!();
}

fn actors_by_distance(sim: &Simulation) -> Vec<&gravemarch::horde::Actor> {
    let mut actors: Vec<_> = sim.actors.iter().collect();
    actors.sort_by(|a, b| {
        let da = a.position.distance_sq(&sim.player.position);
        let db = b.position.distance_sq(&sim.player.position);
        da.total_cmp(&db)
    });
    actors
}

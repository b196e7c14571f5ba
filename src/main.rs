//! Hearthward - Demo Entry Point
//!
//! Runs a small scripted settlement scene through one agent's behavior
//! engine: a villager goes about its day, a thug shows up, trouble
//! follows. Useful for watching the decision log and for smoke-testing
//! the trigger entry points end to end.

use clap::Parser;
use hearthward::agent::Agent;
use hearthward::behavior::actions::default_action_set;
use hearthward::behavior::{BehaviorEngine, CrimeKind};
use hearthward::core::config::EngineConfig;
use hearthward::core::error::Result;
use hearthward::core::types::{ActorId, Vec2};
use hearthward::world::WorldView;

#[derive(Parser)]
#[command(name = "hearthward", about = "Behavior engine demo scene")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1200)]
    ticks: u64,

    /// RNG seed for the engine and its actions
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Dump history, memory and world records as JSON at the end
    #[arg(long)]
    dump_json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("hearthward=debug")
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    config.rng_seed = args.seed;
    config.validate()?;

    tracing::info!("Hearthward demo starting");

    // the villager whose engine we watch
    let mut villager = Agent::new("Maren", Vec2::new(0.0, 0.0)).with_home(Vec2::new(12.0, 8.0));
    villager.traits.curiosity = 0.7;
    villager.traits.civic_duty = 0.6;

    // the rest of the cast
    let mut world = WorldView::new();
    world.insert_actor(villager.id, villager.position, false);
    let thug = ActorId::new();
    world.insert_actor(thug, Vec2::new(18.0, 0.0), false);
    let guard_a = ActorId::new();
    world.insert_actor(guard_a, Vec2::new(30.0, 10.0), true);
    let guard_b = ActorId::new();
    world.insert_actor(guard_b, Vec2::new(-25.0, -5.0), true);

    let mut engine = BehaviorEngine::with_actions(config.clone(), default_action_set(&config));

    for tick in 0..args.ticks {
        villager.tick_upkeep();
        world.set_position(villager.id, villager.position);

        // scripted events
        match tick {
            200 => {
                println!("[tick {tick}] something rustles in the alley");
                engine.on_suspicious_activity(
                    &mut villager,
                    &mut world,
                    Some(thug),
                    "heard glass break in the alley",
                );
            }
            500 => {
                println!("[tick {tick}] the thug smashes a market stall");
                engine.on_witness_crime(&mut villager, &mut world, thug, CrimeKind::Vandalism, 6);
            }
            800 => {
                println!("[tick {tick}] the thug turns on Maren");
                engine.on_threatened(&mut villager, &mut world, thug, 8);
            }
            _ => {}
        }

        engine.tick(&mut villager, &mut world);

        if tick % 200 == 0 {
            println!(
                "[tick {tick}] state={} action={} emergency={} safety={:.0}",
                engine.current_state(),
                engine.current_action_id().unwrap_or("-"),
                engine.is_in_emergency(),
                villager.needs.safety(),
            );
        }
    }

    println!("\n=== SUMMARY ===");
    println!("final state: {}", engine.current_state());
    println!("wanted level of thug: {}", world.wanted_level(thug));
    println!("witness records: {}", world.witnesses().len());
    println!("actions run:");
    for entry in engine.history().iter() {
        println!("  tick {:>5}  {}", entry.tick, entry.action);
    }

    if args.dump_json {
        let dump = serde_json::json!({
            "history": engine.history(),
            "memory": villager.memory,
            "world": world,
        });
        println!("{}", serde_json::to_string_pretty(&dump)?);
    }

    Ok(())
}

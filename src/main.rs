//! Quarry -- random self-play driver.
//!
//! Plays a batch of matches with both sides moving at random and prints
//! an outcome tally.
//!
//! Usage: `quarry [games] [seed]`

use std::env;

use quarry::sim::{run_batch, SimConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SimConfig::default();
    if let Some(games) = args.get(1) {
        config.games = games.parse().expect("invalid games count");
    }
    if let Some(seed) = args.get(2) {
        config.seed = seed.parse().expect("invalid seed");
    }

    let stats = run_batch(&config);
    println!("games:            {}", stats.games);
    println!("escaped:          {}", stats.escaped);
    println!("trapped:          {}", stats.trapped);
    println!("organized deaths: {}", stats.organized_village);
    println!("surrendered:      {}", stats.surrendered);
    println!("mean rounds:      {:.1}", stats.mean_rounds);
}

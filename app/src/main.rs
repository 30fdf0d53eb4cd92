use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::controller::SpinController;

mod console;
mod controller;
mod logging;

// Starting entrants; more can be added from the console
const DEFAULT_PARTICIPANTS: [&str; 7] = [
    "John Doe",
    "Jane Smith",
    "Bob Johnson",
    "Alice Brown",
    "Charlie Wilson",
    "Diana Miller",
    "Evan Davis",
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::setup();
    dotenvy::from_path(".env").ok();

    // ROULETTE_SEED makes every draw reproducible; without it each run
    // gets a fresh generator
    let rng = match std::env::var("ROULETTE_SEED") {
        Ok(seed) => {
            let seed: u64 = seed.parse()?;
            info!("Seeding wheel RNG with ROULETTE_SEED={}", seed);
            SmallRng::seed_from_u64(seed)
        }
        Err(_) => SmallRng::from_entropy(),
    };

    let mut controller = SpinController::new(rng);
    for name in DEFAULT_PARTICIPANTS {
        controller.add_participant(name);
    }

    console::run(controller).await?;

    Ok(())
}

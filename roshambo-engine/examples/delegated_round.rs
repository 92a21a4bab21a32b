use parking_lot::Mutex;
use roshambo_engine::{commitment_digest, Choice, DelegateProxy, GameEngine, Secret};
use std::sync::Arc;
use uuid::Uuid;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let deployer = Uuid::new_v4();
    let user1 = Uuid::new_v4();
    let user2 = Uuid::new_v4();

    let game = Arc::new(Mutex::new(GameEngine::new(deployer)));
    println!("Game {} deployed, owner {}", game.lock().id(), deployer);

    // user2 plays through a delegate proxy instead of directly.
    let mut proxy = DelegateProxy::new(user2);
    proxy.set_game_contract(user2, Arc::clone(&game))?;
    println!("Proxy identity: {}", proxy.identity());

    // Commit phase: digests bind (identity, choice, secret).
    let secret1 = Secret::random();
    let hash1 = commitment_digest(user1, Choice::Scissors, &secret1);
    game.lock().commit(user1, hash1)?;

    let secret2 = Secret::random();
    let hash2 = commitment_digest(proxy.identity(), Choice::Paper, &secret2);
    proxy.commit_call(hash2)?;

    println!("Stage after commits: {}", game.lock().stage());

    // Reveal phase.
    game.lock().reveal(user1, Choice::Scissors, &secret1)?;
    proxy.reveal_call(Choice::Paper, &secret2)?;

    println!("Stage after reveals: {}", game.lock().stage());

    // Either participant may settle; here the proxied player does.
    let winner = proxy.result_call()?;
    if winner.is_nil() {
        println!("Standoff, no winner");
    } else {
        println!("Winner: {}", winner);
    }

    println!("\nEvents:");
    for event in game.lock().events() {
        println!("  {}", event);
    }

    Ok(())
}

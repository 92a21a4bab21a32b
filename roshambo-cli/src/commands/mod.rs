use anyhow::{anyhow, bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use roshambo_engine::{commitment_digest, Choice, GameEngine, Secret};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Everything one game needs between invocations: the serialized engine,
/// the name -> identity registry, and each committer's pending choice and
/// secret so `reveal` can replay them.
#[derive(Debug, Serialize, Deserialize)]
struct GameStorage {
    engine: GameEngine,
    names: HashMap<String, Uuid>,
    pending: HashMap<String, PendingReveal>, // key: player name
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingReveal {
    choice: Choice,
    secret: String, // hex encoded
}

fn storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join("game.json")
}

fn load_storage(data_dir: &Path) -> Result<GameStorage> {
    let path = storage_path(data_dir);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("no game in progress (run `roshambo new`), looked in {:?}", path))?;
    serde_json::from_str(&content).context("corrupt game state file")
}

fn save_storage(data_dir: &Path, storage: &GameStorage) -> Result<()> {
    let path = storage_path(data_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(storage)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn resolve(storage: &GameStorage, name: &str) -> Result<Uuid> {
    storage
        .names
        .get(name)
        .copied()
        .ok_or_else(|| anyhow!("unknown player '{}' (run `roshambo register {}`)", name, name))
}

fn name_of(storage: &GameStorage, id: Uuid) -> String {
    storage
        .names
        .iter()
        .find(|(_, &v)| v == id)
        .map(|(k, _)| k.clone())
        .unwrap_or_else(|| id.to_string())
}

pub fn new_game(data_dir: &Path, owner: &str) -> Result<()> {
    let owner_id = Uuid::new_v4();
    let engine = GameEngine::new(owner_id);

    let mut names = HashMap::new();
    names.insert(owner.to_string(), owner_id);

    let storage = GameStorage {
        engine,
        names,
        pending: HashMap::new(),
    };
    save_storage(data_dir, &storage)?;

    println!("New game {} created", storage.engine.id());
    println!("Administrator: {} ({})", owner, owner_id);
    Ok(())
}

pub fn register_player(data_dir: &Path, name: &str) -> Result<()> {
    let mut storage = load_storage(data_dir)?;

    if storage.names.contains_key(name) {
        bail!("player '{}' is already registered", name);
    }

    let id = Uuid::new_v4();
    storage.names.insert(name.to_string(), id);
    save_storage(data_dir, &storage)?;

    println!("Registered {} as {}", name, id);
    Ok(())
}

pub fn commit(data_dir: &Path, player: &str, choice: &str, secret: Option<&str>) -> Result<()> {
    let mut storage = load_storage(data_dir)?;
    let id = resolve(&storage, player)?;

    let choice: Choice = choice.parse().map_err(|e: String| anyhow!(e))?;
    let secret = match secret {
        Some(phrase) => Secret::from_phrase(phrase),
        None => Secret::random(),
    };

    let digest = commitment_digest(id, choice, &secret);
    storage.engine.commit(id, digest)?;

    // Kept locally so `reveal` can replay the pair later; the digest is
    // the only thing the engine saw.
    storage.pending.insert(
        player.to_string(),
        PendingReveal {
            choice,
            secret: secret.to_string(),
        },
    );
    save_storage(data_dir, &storage)?;

    println!("{} committed (stage {})", player, storage.engine.stage());
    println!("Digest: {}", digest);
    Ok(())
}

pub fn reveal(data_dir: &Path, player: &str) -> Result<()> {
    let mut storage = load_storage(data_dir)?;
    let id = resolve(&storage, player)?;

    let pending = storage
        .pending
        .get(player)
        .cloned()
        .ok_or_else(|| anyhow!("no pending commitment recorded for '{}'", player))?;

    let secret_bytes = hex::decode(&pending.secret).context("stored secret is not valid hex")?;
    let secret =
        Secret::from_bytes(&secret_bytes).ok_or_else(|| anyhow!("stored secret has wrong length"))?;

    storage.engine.reveal(id, pending.choice, &secret)?;
    storage.pending.remove(player);
    save_storage(data_dir, &storage)?;

    println!(
        "{} revealed {} (stage {})",
        player,
        pending.choice,
        storage.engine.stage()
    );
    Ok(())
}

pub fn settle(data_dir: &Path, player: &str) -> Result<()> {
    let mut storage = load_storage(data_dir)?;
    let id = resolve(&storage, player)?;

    let winner = storage.engine.result(id)?;
    storage.pending.clear();
    save_storage(data_dir, &storage)?;

    if winner.is_nil() {
        println!("Standoff: no winner this round");
    } else {
        println!("Winner: {} ({})", name_of(&storage, winner), winner);
    }
    println!("Round reset, stage {}", storage.engine.stage());
    Ok(())
}

pub fn reset(data_dir: &Path, caller: &str) -> Result<()> {
    let mut storage = load_storage(data_dir)?;
    let id = resolve(&storage, caller)?;

    storage.engine.reset_game(id)?;
    storage.pending.clear();
    save_storage(data_dir, &storage)?;

    println!("Game reset, stage {}", storage.engine.stage());
    Ok(())
}

pub fn show_status(data_dir: &Path) -> Result<()> {
    let storage = load_storage(data_dir)?;

    println!("Game {} — stage {}", storage.engine.id(), storage.engine.stage());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Slot", "Player", "Commitment", "Revealed", "Choice"]);

    for (i, slot) in storage.engine.players().iter().enumerate() {
        table.add_row(vec![
            i.to_string(),
            name_of(&storage, slot.id()),
            slot.commitment().to_string(),
            slot.revealed().to_string(),
            slot.choice().to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn show_events(data_dir: &Path) -> Result<()> {
    let storage = load_storage(data_dir)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Event"]);

    for (i, event) in storage.engine.events().iter().enumerate() {
        table.add_row(vec![i.to_string(), event.to_string()]);
    }

    println!("{table}");
    Ok(())
}

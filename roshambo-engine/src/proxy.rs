//! Delegate proxy: an intermediary identity that relays engine calls on an
//! operator's behalf. The engine only ever sees the proxy's own identity.

use crate::{Choice, CommitmentDigest, GameEngine, GameError, Result, Secret};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to one engine, standing in for the serializing substrate
/// when a proxy and direct callers mutate the same round.
pub type SharedGameEngine = Arc<Mutex<GameEngine>>;

/// Wraps an engine behind a fresh identity. The operator configures the
/// target once, then plays through `commit_call`/`reveal_call`/`result_call`;
/// commitment digests must be computed over `identity()`, not the operator's
/// own id, or every reveal will fail the hash check.
#[derive(Debug)]
pub struct DelegateProxy {
    owner: Uuid,
    identity: Uuid,
    game: Option<SharedGameEngine>,
}

impl DelegateProxy {
    pub fn new(owner: Uuid) -> Self {
        let identity = Uuid::new_v4();
        tracing::info!("Delegate proxy {} created, owner {}", identity, owner);

        Self {
            owner,
            identity,
            game: None,
        }
    }

    /// The identity under which all relayed calls reach the engine.
    pub fn identity(&self) -> Uuid {
        self.identity
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    pub fn is_configured(&self) -> bool {
        self.game.is_some()
    }

    /// Bind the target engine. Owner-only, and one-shot: rebinding a live
    /// proxy would let the owner redirect an opponent mid-round.
    pub fn set_game_contract(&mut self, caller: Uuid, game: SharedGameEngine) -> Result<()> {
        if caller != self.owner {
            return Err(GameError::OnlyOwner);
        }
        if self.game.is_some() {
            return Err(GameError::AlreadyConfigured);
        }

        tracing::info!("Delegate proxy {} bound to game {}", self.identity, game.lock().id());
        self.game = Some(game);
        Ok(())
    }

    fn game(&self) -> Result<&SharedGameEngine> {
        self.game.as_ref().ok_or(GameError::NotConfigured)
    }

    pub fn commit_call(&self, digest: CommitmentDigest) -> Result<()> {
        self.game()?.lock().commit(self.identity, digest)
    }

    pub fn reveal_call(&self, choice: Choice, secret: &Secret) -> Result<()> {
        self.game()?.lock().reveal(self.identity, choice, secret)
    }

    pub fn result_call(&self) -> Result<Uuid> {
        self.game()?.lock().result(self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commitment_digest, GameEvent};

    fn shared_game(owner: Uuid) -> SharedGameEngine {
        Arc::new(Mutex::new(GameEngine::new(owner)))
    }

    fn get_hash(player: Uuid, choice: Choice) -> (CommitmentDigest, Secret) {
        let secret = Secret::from_phrase(&format!("test{}", choice.as_u8()));
        (commitment_digest(player, choice, &secret), secret)
    }

    #[test]
    fn test_direct_player_vs_proxied_player() {
        let deployer = Uuid::new_v4();
        let user1 = Uuid::new_v4();
        let user2 = Uuid::new_v4();

        let game = shared_game(deployer);
        let mut proxy = DelegateProxy::new(user2);
        proxy.set_game_contract(user2, Arc::clone(&game)).unwrap();

        // user1 plays directly with scissors; user2 plays paper through
        // the proxy, committing over the proxy's identity.
        let (hash1, secret1) = get_hash(user1, Choice::Scissors);
        game.lock().commit(user1, hash1).unwrap();

        let (hash2, secret2) = get_hash(proxy.identity(), Choice::Paper);
        proxy.commit_call(hash2).unwrap();

        game.lock().reveal(user1, Choice::Scissors, &secret1).unwrap();
        proxy.reveal_call(Choice::Paper, &secret2).unwrap();

        let winner = proxy.result_call().unwrap();
        assert_eq!(winner, user1);
        assert_eq!(
            game.lock().events().last(),
            Some(&GameEvent::Result { winner: user1 })
        );
    }

    #[test]
    fn test_engine_records_proxy_identity_not_operator() {
        let user2 = Uuid::new_v4();
        let game = shared_game(Uuid::new_v4());
        let mut proxy = DelegateProxy::new(user2);
        proxy.set_game_contract(user2, Arc::clone(&game)).unwrap();

        let (hash, _) = get_hash(proxy.identity(), Choice::Rock);
        proxy.commit_call(hash).unwrap();

        let engine = game.lock();
        assert_eq!(engine.player(0).unwrap().id(), proxy.identity());
        assert_ne!(engine.player(0).unwrap().id(), user2);
    }

    #[test]
    fn test_calls_fail_until_configured() {
        let user = Uuid::new_v4();
        let proxy = DelegateProxy::new(user);

        let (hash, secret) = get_hash(proxy.identity(), Choice::Rock);
        assert_eq!(proxy.commit_call(hash), Err(GameError::NotConfigured));
        assert_eq!(
            proxy.reveal_call(Choice::Rock, &secret),
            Err(GameError::NotConfigured)
        );
        assert_eq!(proxy.result_call(), Err(GameError::NotConfigured));
    }

    #[test]
    fn test_set_game_contract_is_owner_only_and_one_shot() {
        let owner = Uuid::new_v4();
        let game = shared_game(Uuid::new_v4());
        let mut proxy = DelegateProxy::new(owner);

        assert_eq!(
            proxy.set_game_contract(Uuid::new_v4(), Arc::clone(&game)),
            Err(GameError::OnlyOwner)
        );

        proxy.set_game_contract(owner, Arc::clone(&game)).unwrap();
        assert_eq!(
            proxy.set_game_contract(owner, game),
            Err(GameError::AlreadyConfigured)
        );
    }

    #[test]
    fn test_engine_failures_propagate_unchanged() {
        let user2 = Uuid::new_v4();
        let game = shared_game(Uuid::new_v4());
        let mut proxy = DelegateProxy::new(user2);
        proxy.set_game_contract(user2, Arc::clone(&game)).unwrap();

        // Reveal before anyone committed: engine errors come back through
        // the proxy as-is.
        let (hash, secret) = get_hash(proxy.identity(), Choice::Rock);
        assert_eq!(
            proxy.reveal_call(Choice::Rock, &secret),
            Err(GameError::OnlyPlayers)
        );

        proxy.commit_call(hash).unwrap();
        assert_eq!(
            proxy.reveal_call(Choice::Rock, &secret),
            Err(GameError::WrongStage(crate::Stage::OneCommitted))
        );
    }
}

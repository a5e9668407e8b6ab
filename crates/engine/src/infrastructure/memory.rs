//! In-memory storage adapters.
//!
//! Character records live in a concurrent map keyed by ID. Saves replace the
//! whole record; readers holding a previously fetched value are unaffected,
//! which matches the copy-on-write contract of the ledger.

use async_trait::async_trait;
use dashmap::DashMap;

use grimoire_domain::{Character, CharacterId};

use super::ports::{CharacterRepo, RepoError};

/// Concurrent in-memory character store.
#[derive(Default)]
pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, Character>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.characters.get(&id).map(|entry| entry.clone()))
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        self.characters.insert(character.id(), character.clone());
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.characters
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        Ok(self
            .characters
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn character(name: &str) -> Character {
        Character::new(name, Utc::now()).expect("valid name")
    }

    #[tokio::test]
    async fn save_then_get_roundtrip() {
        let repo = InMemoryCharacterRepo::new();
        let c = character("Ezren");

        repo.save(&c).await.unwrap();
        let fetched = repo.get(c.id()).await.unwrap();
        assert_eq!(fetched, Some(c));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let repo = InMemoryCharacterRepo::new();
        assert_eq!(repo.get(CharacterId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_replaces_whole_record() {
        let repo = InMemoryCharacterRepo::new();
        let c = character("Seoni");
        repo.save(&c).await.unwrap();

        let leveled = c.clone().with_level(5);
        repo.save(&leveled).await.unwrap();

        let fetched = repo.get(c.id()).await.unwrap().unwrap();
        assert_eq!(fetched.level(), 5);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryCharacterRepo::new();
        let c = character("Valeros");
        repo.save(&c).await.unwrap();

        repo.delete(c.id()).await.unwrap();
        assert!(matches!(
            repo.delete(c.id()).await,
            Err(RepoError::NotFound)
        ));
    }
}

use rand::Rng;

use crate::identifiers::GameId;

/// Generates an opaque game ID. Uniqueness is not guaranteed here; callers
/// that care must check against their store and regenerate on collision.
pub fn generate_game_id() -> GameId {
    let mut rng = rand::rng();
    let suffix: u64 = rng.random();
    GameId::new(format!("game-{:016x}", suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_have_expected_shape() {
        let id = generate_game_id();
        let id = id.as_str();
        assert!(id.starts_with("game-"));
        assert_eq!(id.len(), "game-".len() + 16);
        assert!(id["game-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_ids_rarely_collide() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_game_id()));
        }
    }
}

use std::collections::BTreeMap;

use ahash::AHashMap;
use rules::Move;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningConfig {
    pub enabled: bool,
    /// First move of the game mapped to the reply, both in SAN.
    pub replies: BTreeMap<String, String>,
}

impl Default for OpeningConfig {
    fn default() -> Self {
        let replies = [
            ("e4", "e5"),
            ("d4", "d5"),
            ("c4", "e5"),
            ("Nf3", "d5"),
            ("e3", "e5"),
            ("d3", "e5"),
            ("c3", "e5"),
            ("g3", "d5"),
            ("b3", "e5"),
            ("f4", "d5"),
            ("Nc3", "d5"),
        ]
        .into_iter()
        .map(|(trigger, reply)| (trigger.to_string(), reply.to_string()))
        .collect();

        Self {
            enabled: true,
            replies,
        }
    }
}

/// Canned replies to the first move of the game.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    replies: AHashMap<String, String>,
}

impl OpeningBook {
    pub fn new(config: &OpeningConfig) -> Self {
        if !config.enabled {
            return Self::default();
        }

        let replies = config
            .replies
            .iter()
            .map(|(trigger, reply)| (plain(trigger).to_string(), reply.trim().to_string()))
            .collect();

        Self { replies }
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    /// The configured reply when exactly one move has been played and it is
    /// a known trigger. A reply that is not legal here yields `None`.
    pub fn respond(&self, history: &[String], legal_moves: &[Move]) -> Option<Move> {
        let [first] = history else {
            return None;
        };
        let reply = self.replies.get(plain(first))?;

        let found = legal_moves.iter().find(|mv| mv.matches(reply)).cloned();
        if found.is_none() {
            log::debug!("Opening reply {} to {} is not legal, searching instead", reply, first);
        }
        found
    }
}

/// SAN without check marks or annotations.
fn plain(notation: &str) -> &str {
    notation.trim().trim_end_matches(['+', '#', '!', '?'])
}

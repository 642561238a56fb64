use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::OracleError;
use crate::tablebase::{Outcome, Tablebase, TablebaseMove};

pub const LICHESS_TABLEBASE_URL: &str = "https://tablebase.lichess.ovh";

/// Client for the public Lichess tablebase HTTP API.
pub struct LichessTablebase {
    client: reqwest::Client,
    base: Url,
}

impl LichessTablebase {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, OracleError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(OracleError::UnsupportedUrl(base.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ohana/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    /// `{base}/standard?fen=...`
    fn endpoint(&self, fen: &str) -> Result<Url, OracleError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| OracleError::UnsupportedUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("standard");
        url.query_pairs_mut().append_pair("fen", fen);
        Ok(url)
    }
}

#[async_trait]
impl Tablebase for LichessTablebase {
    async fn probe(&self, fen: &str) -> Result<Vec<TablebaseMove>, OracleError> {
        let url = self.endpoint(fen)?;
        log::debug!("Probing {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_moves(&body)
    }
}

#[derive(Deserialize)]
struct ProbeResponse {
    #[serde(default)]
    moves: Vec<ProbeMove>,
}

#[derive(Deserialize)]
struct ProbeMove {
    uci: String,
    san: String,
    category: Category,
    dtz: Option<i32>,
    dtm: Option<i32>,
    #[serde(default)]
    checkmate: bool,
}

/// Result for the side to move after the move has been played.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum Category {
    Win,
    SyzygyWin,
    MaybeWin,
    CursedWin,
    Draw,
    BlessedLoss,
    MaybeLoss,
    SyzygyLoss,
    Loss,
    #[serde(other)]
    Unknown,
}

impl Category {
    /// The same result seen from the player who made the move.
    fn for_mover(self) -> Outcome {
        match self {
            Category::Loss | Category::SyzygyLoss | Category::MaybeLoss => Outcome::Win,
            Category::BlessedLoss => Outcome::CursedWin,
            Category::Draw => Outcome::Draw,
            Category::CursedWin => Outcome::BlessedLoss,
            Category::Win | Category::SyzygyWin | Category::MaybeWin => Outcome::Loss,
            Category::Unknown => Outcome::Unknown,
        }
    }
}

fn parse_moves(body: &str) -> Result<Vec<TablebaseMove>, OracleError> {
    let response: ProbeResponse = serde_json::from_str(body)?;

    Ok(response
        .moves
        .into_iter()
        .map(|mv| TablebaseMove {
            outcome: mv.category.for_mover(),
            distance: mv.dtm.or(mv.dtz).map(i32::unsigned_abs),
            checkmate: mv.checkmate,
            uci: mv.uci,
            san: mv.san,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "checkmate": false,
        "stalemate": false,
        "category": "win",
        "dtz": 1,
        "dtm": 17,
        "moves": [
            {"uci": "h7h8q", "san": "h8=Q+", "zeroing": true, "checkmate": false,
             "stalemate": false, "dtz": -2, "dtm": -16, "category": "loss"},
            {"uci": "e1d1", "san": "Kd1", "zeroing": false, "checkmate": false,
             "stalemate": false, "dtz": 0, "dtm": null, "category": "draw"},
            {"uci": "e1f2", "san": "Kf2", "zeroing": false, "checkmate": false,
             "stalemate": false, "dtz": 3, "dtm": null, "category": "cursed-win"},
            {"uci": "e1e2", "san": "Ke2", "zeroing": false, "checkmate": false,
             "stalemate": false, "dtz": null, "dtm": null, "category": "something-new"}
        ]
    }"#;

    #[test]
    fn test_parse_inverts_categories() {
        let moves = parse_moves(SAMPLE).unwrap();
        assert_eq!(moves.len(), 4);

        assert_eq!(moves[0].uci, "h7h8q");
        assert_eq!(moves[0].san, "h8=Q+");
        assert_eq!(moves[0].outcome, Outcome::Win);
        assert_eq!(moves[0].distance, Some(16));

        assert_eq!(moves[1].outcome, Outcome::Draw);
        assert_eq!(moves[1].distance, Some(0));

        assert_eq!(moves[2].outcome, Outcome::BlessedLoss);
        assert_eq!(moves[2].distance, Some(3));

        assert_eq!(moves[3].outcome, Outcome::Unknown);
        assert_eq!(moves[3].distance, None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_moves("<html>busy</html>"), Err(OracleError::Malformed(_))));
        assert!(parse_moves("{}").unwrap().is_empty());
    }

    #[test]
    fn test_endpoint() {
        let tablebase = LichessTablebase::new(LICHESS_TABLEBASE_URL, Duration::from_secs(1)).unwrap();
        let url = tablebase.endpoint("8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
        assert_eq!(url.path(), "/standard");
        assert_eq!(
            url.query_pairs().find(|(key, _)| key == "fen").map(|(_, value)| value.into_owned()),
            Some("8/8/8/8/8/8/8/K6k w - - 0 1".to_string())
        );

        let nested = LichessTablebase::new("http://localhost:9000/tb/", Duration::from_secs(1)).unwrap();
        assert_eq!(nested.endpoint("x").unwrap().path(), "/tb/standard");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            LichessTablebase::new("not a url", Duration::from_secs(1)),
            Err(OracleError::InvalidUrl(_))
        ));
        assert!(matches!(
            LichessTablebase::new("mailto:someone@example.com", Duration::from_secs(1)),
            Err(OracleError::UnsupportedUrl(_))
        ));
    }
}

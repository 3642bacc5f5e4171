use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::SettlementService,
    types::{RuleBasedScoreRoundRequest, RuleBasedScoreRoundResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for settling one round
///
/// POST /api/score_round_rule_based
/// Returns the updated scoreboard and each player's score breakdown
#[instrument(name = "score_round_rule_based", skip(state, request))]
pub async fn score_round_rule_based(
    State(state): State<AppState>,
    Json(request): Json<RuleBasedScoreRoundRequest>,
) -> Result<Json<RuleBasedScoreRoundResponse>, AppError> {
    info!(
        players = request.players.len(),
        inputs = request.player_rounds.len(),
        "Scoring round"
    );

    let service = SettlementService::new(Arc::clone(&state.ruleset), Arc::clone(&state.engine));
    let response = service.score_round(request)?;

    info!("Round settled successfully");

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        Router::new()
            .route(
                "/api/score_round_rule_based",
                axum::routing::post(score_round_rule_based),
            )
            .with_state(AppStateBuilder::new().build())
    }

    async fn post(body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/score_round_rule_based")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_score_round_self_draw() {
        let (status, body) = post(json!({
            "players": [
                {"name": "A", "score": 0},
                {"name": "B", "score": 0},
                {"name": "C", "score": 0},
                {"name": "D", "score": 0}
            ],
            "player_rounds": [
                {"name": "A", "hand_type_id": "hand.daduizi", "payer_names": ["B", "C", "D"]}
            ]
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: RuleBasedScoreRoundResponse = serde_json::from_value(body).unwrap();
        let scores: Vec<i64> = response.players.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![6, -2, -2, -2]);
        assert_eq!(response.player_scores[0].win_score, 6);
        assert_eq!(response.player_scores[0].applied_rule_ids, vec!["hand.daduizi"]);
    }

    #[tokio::test]
    async fn test_score_round_unknown_hand_type() {
        let (status, body) = post(json!({
            "players": [
                {"name": "A", "score": 0},
                {"name": "B", "score": 0},
                {"name": "C", "score": 0}
            ],
            "player_rounds": [
                {"name": "A", "hand_type_id": "hand.nope", "payer_name": "B"}
            ]
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("hand.nope"));
    }

    #[tokio::test]
    async fn test_score_round_unknown_player_input() {
        let (status, body) = post(json!({
            "players": [
                {"name": "A", "score": 0},
                {"name": "B", "score": 0},
                {"name": "C", "score": 0}
            ],
            "player_rounds": [{"name": "Z", "manual_delta": 3}]
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Player Z is not on the scoreboard");
    }
}

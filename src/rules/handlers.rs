use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::{
    basics::BasicRule,
    catalog::{rule_catalog, Rule},
    search::{search_rules as search, DEFAULT_SEARCH_LIMIT},
    types::{RuleSearchRequest, RuleSearchResponse},
};
use crate::shared::AppState;

/// HTTP handler for listing every hand type and factor as a rule
///
/// GET /api/rules
#[instrument(name = "list_rules", skip(state))]
pub async fn list_rules(State(state): State<AppState>) -> Json<Vec<Rule>> {
    let rules = rule_catalog(&state.ruleset);
    info!(rule_count = rules.len(), "Rules listed");
    Json(rules)
}

/// HTTP handler for listing the non-scoring basic rules
///
/// GET /api/rules/basics
#[instrument(name = "list_basic_rules", skip(state))]
pub async fn list_basic_rules(State(state): State<AppState>) -> Json<Vec<BasicRule>> {
    info!(rule_count = state.basic_rules.len(), "Basic rules listed");
    Json(state.basic_rules.as_ref().clone())
}

/// HTTP handler for keyword rule search
///
/// POST /api/rules/search
/// Returns matching rule ids ordered by relevance. Basic rules are searched
/// alongside hand types and factors.
#[instrument(name = "search_rules", skip(state))]
pub async fn search_rules(
    State(state): State<AppState>,
    Json(request): Json<RuleSearchRequest>,
) -> Json<RuleSearchResponse> {
    let mut rules = rule_catalog(&state.ruleset);
    rules.extend(state.basic_rules.iter().map(Rule::from));
    let rule_ids = search(&rules, &request.query, DEFAULT_SEARCH_LIMIT);
    info!(hits = rule_ids.len(), "Rules searched");
    Json(RuleSearchResponse { rule_ids })
}

/// HTTP handler returning the loaded ruleset document as authored
///
/// GET /api/ruleset
#[instrument(name = "get_ruleset", skip(state))]
pub async fn get_ruleset(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.ruleset.document().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::basics::{parse_basic_rules, BasicRuleSection};
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    const BASICS: &str = r#"[
        {"id": "basic.que_yi_men", "name": {"zh": "缺一门", "en": "Missing suit"},
         "description": {"zh": "开局定缺，胡牌时不能有该门", "en": "Void one suit before winning"},
         "section": "before_game"}
    ]"#;

    fn app_with(state: AppState) -> Router {
        Router::new()
            .route("/api/rules", axum::routing::get(list_rules))
            .route("/api/rules/basics", axum::routing::get(list_basic_rules))
            .route("/api/rules/search", axum::routing::post(search_rules))
            .route("/api/ruleset", axum::routing::get(get_ruleset))
            .with_state(state)
    }

    fn app() -> Router {
        app_with(AppStateBuilder::new().build())
    }

    fn app_with_basics() -> Router {
        app_with(
            AppStateBuilder::new()
                .with_basic_rules(parse_basic_rules(BASICS).unwrap())
                .build(),
        )
    }

    fn search_request(query: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/rules/search")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::json!({ "query": query }).to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_list_rules_handler() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/rules")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let rules: Vec<Rule> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(rules[0].id, "hand.pinghu");
        assert!(rules.iter().any(|r| r.id == "factor.gen"));
    }

    #[tokio::test]
    async fn test_search_rules_handler() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/rules/search")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"query": "zimo"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let search: RuleSearchResponse =
            serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(search.rule_ids, vec!["factor.zimo"]);
    }

    #[tokio::test]
    async fn test_get_ruleset_handler_returns_document() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/ruleset")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let document = body_json(response).await;
        let bundled: serde_json::Value =
            serde_json::from_str(crate::ruleset::BUNDLED_RULESET_JSON).unwrap();
        assert_eq!(document, bundled);
    }

    #[tokio::test]
    async fn test_list_basic_rules_handler() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/rules/basics")
            .body(Body::empty())
            .unwrap();

        let response = app_with_basics().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let basics: Vec<BasicRule> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(basics.len(), 1);
        assert_eq!(basics[0].name_cn.as_deref(), Some("缺一门"));
        assert_eq!(basics[0].section, BasicRuleSection::BeforeGame);
    }

    #[tokio::test]
    async fn test_list_basic_rules_handler_empty_without_file() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/rules/basics")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_search_includes_basic_rules() {
        let response = app_with_basics()
            .oneshot(search_request("缺一门"))
            .await
            .unwrap();
        let search: RuleSearchResponse =
            serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(search.rule_ids, vec!["basic.que_yi_men"]);

        let response = app_with_basics()
            .oneshot(search_request("Missing Suit"))
            .await
            .unwrap();
        let search: RuleSearchResponse =
            serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(search.rule_ids, vec!["basic.que_yi_men"]);
    }
}

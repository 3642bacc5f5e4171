use axum::Json;
use tracing::{info, instrument};

use super::catalog::{all_tiles, TileInfo};

/// HTTP handler for listing the tile catalog
///
/// GET /api/tiles
#[instrument(name = "list_tiles")]
pub async fn list_tiles() -> Json<Vec<TileInfo>> {
    let tiles = all_tiles();
    info!(tile_count = tiles.len(), "Tiles listed");
    Json(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_list_tiles_handler() {
        let app = Router::new().route("/api/tiles", axum::routing::get(list_tiles));

        let request = Request::builder()
            .method("GET")
            .uri("/api/tiles")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let tiles: Vec<TileInfo> = serde_json::from_slice(&body).unwrap();

        assert_eq!(tiles.len(), 27);
        assert_eq!(tiles[0].id, "1wan");
        assert_eq!(tiles[26].image_url, "/tiles/9tiao.jpg");
    }
}

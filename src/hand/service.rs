use tracing::{info, instrument};

use super::types::{CheckHandResponse, HandDetail};
use super::validator::{HandError, HandValidator};

/// Validates tile ids and renders the outcome for display.
#[instrument(skip(validator, tile_ids), fields(tile_count = tile_ids.len()))]
pub fn check_hand(
    validator: &HandValidator,
    tile_ids: &[String],
) -> Result<CheckHandResponse, HandError> {
    let result = validator.validate_ids(tile_ids)?;

    let response = match result.decomposition {
        Some(decomposition) if result.is_win => CheckHandResponse {
            is_win: true,
            message: format!(
                "Winning hand! Found pair {} and {} melds.",
                decomposition.pair.tile,
                decomposition.melds.len()
            ),
            detail: Some(HandDetail::from(&decomposition)),
        },
        _ => CheckHandResponse {
            is_win: false,
            message: "Not a winning hand yet.".to_string(),
            detail: None,
        },
    };

    info!(is_win = response.is_win, "Hand checked");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(spec: &str) -> Vec<String> {
        spec.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn winning_hand_reports_detail() {
        let response = check_hand(
            &HandValidator::new(),
            &ids("1wan 2wan 3wan 4wan 5wan 6wan 7wan 8wan 9wan 1tong 1tong 1tong 5tiao 5tiao"),
        )
        .unwrap();

        assert!(response.is_win);
        assert_eq!(response.message, "Winning hand! Found pair 5tiao and 4 melds.");
        let detail = response.detail.unwrap();
        assert_eq!(detail.pair, ["5tiao".to_string(), "5tiao".to_string()]);
        assert_eq!(detail.melds.len(), 4);
        assert_eq!(detail.melds[0], ["1wan".to_string(), "2wan".into(), "3wan".into()]);
        assert_eq!(detail.melds[3], ["1tong".to_string(), "1tong".into(), "1tong".into()]);
    }

    #[test]
    fn losing_hand_has_no_detail() {
        let response = check_hand(
            &HandValidator::new(),
            &ids("1wan 2wan 3wan 4wan 5wan 6wan 7wan 8wan 9wan 1tong 3tong 5tiao 7tiao 9tiao"),
        )
        .unwrap();

        assert!(!response.is_win);
        assert_eq!(response.message, "Not a winning hand yet.");
        assert!(response.detail.is_none());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn wrong_size_is_an_error() {
        let result = check_hand(&HandValidator::new(), &ids("1wan 2wan 3wan"));
        assert_eq!(
            result,
            Err(HandError::InvalidHandSize {
                expected: 14,
                actual: 3
            })
        );
    }
}

use sichuan_hu::{
    ruleset::KongType,
    scoring::{FactorValue, KongEventInput},
    settlement::{Player, RuleBasedScoreRoundRequest},
    PlayerRoundInput,
};

// ============================================================================
// Round Input Builder
// ============================================================================

pub struct RoundBuilder {
    inputs: Vec<PlayerRoundInput>,
}

impl RoundBuilder {
    pub fn new(names: &[&str]) -> Self {
        Self {
            inputs: names.iter().map(|name| PlayerRoundInput::new(*name)).collect(),
        }
    }

    /// Four players named A to D
    pub fn four_players() -> Self {
        Self::new(&["A", "B", "C", "D"])
    }

    /// Winner collects from every other player
    pub fn self_draw(mut self, winner: &str, hand_type_id: &str) -> Self {
        let others: Vec<String> = self
            .inputs
            .iter()
            .filter(|input| input.name != winner)
            .map(|input| input.name.clone())
            .collect();
        let input = self.input(winner);
        input.hand_type_id = Some(hand_type_id.to_string());
        input.payer_names = others;
        self
    }

    /// Winner collects from the discarder only
    pub fn discard_win(mut self, winner: &str, hand_type_id: &str, discarder: &str) -> Self {
        let input = self.input(winner);
        input.hand_type_id = Some(hand_type_id.to_string());
        input.payer_name = Some(discarder.to_string());
        self
    }

    pub fn flag(mut self, player: &str, factor_id: &str) -> Self {
        self.input(player)
            .factor_values
            .insert(factor_id.to_string(), FactorValue::Flag(true));
        self
    }

    pub fn count(mut self, player: &str, factor_id: &str, count: i64) -> Self {
        self.input(player)
            .factor_values
            .insert(factor_id.to_string(), FactorValue::Count(count));
        self
    }

    pub fn dian_gang(mut self, declarer: &str, discarder: &str) -> Self {
        self.input(declarer)
            .kong_events
            .push(KongEventInput::single(KongType::DianGang, discarder));
        self
    }

    pub fn kong(mut self, declarer: &str, kong_type: KongType, payers: &[&str]) -> Self {
        self.input(declarer)
            .kong_events
            .push(KongEventInput::many(kong_type, payers.iter().copied()));
        self
    }

    pub fn manual(mut self, player: &str, delta: i64) -> Self {
        self.input(player).manual_delta = delta;
        self
    }

    pub fn build(self) -> Vec<PlayerRoundInput> {
        self.inputs
    }

    /// Scoreboard request with every player starting at `score`
    pub fn request(self, score: i64) -> RuleBasedScoreRoundRequest {
        RuleBasedScoreRoundRequest {
            players: self
                .inputs
                .iter()
                .map(|input| Player {
                    name: input.name.clone(),
                    score,
                })
                .collect(),
            player_rounds: self.inputs,
        }
    }

    fn input(&mut self, name: &str) -> &mut PlayerRoundInput {
        self.inputs
            .iter_mut()
            .find(|input| input.name == name)
            .unwrap_or_else(|| panic!("no player named {}", name))
    }
}

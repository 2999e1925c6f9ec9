use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Contract kind carried in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("call") {
            Some(OptionKind::Call)
        } else if s.eq_ignore_ascii_case("put") {
            Some(OptionKind::Put)
        } else {
            None
        }
    }
}

/// One priced contract snapshot as returned by the pricing server.
///
/// Values are passed through untouched. Wire names follow the server's
/// snake_case keys; a few fields carry a different in-memory name.
/// Keys the server leaves out decode as 0.0 / empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionRecord {
    #[serde(rename = "type")]
    pub option_type: String,

    pub strike: f64,

    pub spot: f64,

    pub expiration: String,

    pub maturity: f64,

    pub sigma: f64,

    pub bs_price: f64,

    pub market_price: f64,

    pub mispricing: f64,

    pub delta: f64,

    pub gamma: f64,

    #[serde(rename = "theta")]
    pub theta_bleed: f64,

    pub vega: f64,

    pub rho: f64,

    #[serde(rename = "prob_ITM")]
    pub prob_itm: f64,

    pub moneyness: f64,

    pub iv_mean: f64,

    pub iv_std: f64,

    pub iv_z: f64,

    #[serde(rename = "vega_score")]
    pub vega_norm: f64,

    #[serde(rename = "liquidity")]
    pub liquidity_score: f64,

    pub gamma_risk: f64,

    #[serde(rename = "final_score")]
    pub enhanced_score: f64,

    pub action: String,

    pub action_reason: String,
}

impl OptionRecord {
    /// Parsed contract kind, `None` for anything other than call/put
    pub fn kind(&self) -> Option<OptionKind> {
        OptionKind::parse(&self.option_type)
    }

    /// Expiration as a calendar date (server sends `YYYY-MM-DD`)
    pub fn expiration_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.expiration, "%Y-%m-%d").ok()
    }

    /// False if any numeric field is NaN or infinite (JSON has no encoding for those)
    pub fn is_finite(&self) -> bool {
        [
            self.strike,
            self.spot,
            self.maturity,
            self.sigma,
            self.bs_price,
            self.market_price,
            self.mispricing,
            self.delta,
            self.gamma,
            self.theta_bleed,
            self.vega,
            self.rho,
            self.prob_itm,
            self.moneyness,
            self.iv_mean,
            self.iv_std,
            self.iv_z,
            self.vega_norm,
            self.liquidity_score,
            self.gamma_risk,
            self.enhanced_score,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Response envelope from the `/price` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub options: Option<HashMap<String, Vec<OptionRecord>>>,
}

impl PriceResponse {
    /// Records for `symbol`, empty when the mapping or the key is missing
    pub fn records_for(self, symbol: &str) -> Vec<OptionRecord> {
        self.options
            .and_then(|mut by_symbol| by_symbol.remove(symbol))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!(OptionKind::parse("call"), Some(OptionKind::Call));
        assert_eq!(OptionKind::parse("PUT"), Some(OptionKind::Put));
        assert_eq!(OptionKind::parse("straddle"), None);
    }

    #[test]
    fn test_records_for_missing_mapping() {
        let envelope = PriceResponse { options: None };
        assert!(envelope.records_for("AAPL").is_empty());
    }

    #[test]
    fn test_is_finite() {
        let mut record = OptionRecord::default();
        assert!(record.is_finite());

        record.enhanced_score = f64::NAN;
        assert!(!record.is_finite());

        record.enhanced_score = 0.5;
        record.theta_bleed = f64::NEG_INFINITY;
        assert!(!record.is_finite());
    }

    #[test]
    fn test_envelope_ignores_unknown_keys() {
        let envelope: PriceResponse =
            serde_json::from_str(r#"{"symbol":"AAPL","options":{"AAPL":[]}}"#).unwrap();
        assert!(envelope.options.is_some());
        assert!(envelope.records_for("AAPL").is_empty());
    }
}

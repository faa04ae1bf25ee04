//! Shareable state: the UI snapshot packed into a compact token for links.
//!
//! The token is base64 of the JSON-serialised [`ShareableState`]. Encoding emits the URL-safe
//! alphabet without padding. Decoding accepts that as well as the standard padded alphabet.

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use serde::{Deserialize, Serialize};

use crate::{chart::ChartConfig, filter::FilterConfig, prelude::*, score::WeightedCriteria};

#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareableState {
    pub chart: ChartConfig,
    pub filter: FilterConfig,
    pub weights: WeightedCriteria,

    /// Names of the selected batteries.
    pub selected: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("the token is not valid base64")]
    Base64(#[from] base64::DecodeError),

    #[error("the token does not contain a valid state")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// JSON cannot carry infinities or NaN.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("failed to serialize the state")]
    Json(#[from] serde_json::Error),
}

impl ShareableState {
    pub fn encode(&self) -> Result<String, EncodeError> {
        self.ensure_finite()?;
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?))
    }

    fn ensure_finite(&self) -> Result<(), EncodeError> {
        let (weights, filter) = (&self.weights, &self.filter);
        let fields = [
            ("weights.energyDensity", weights.energy_density),
            ("weights.cycleLife", weights.cycle_life),
            ("weights.cost", weights.cost),
            ("weights.safety", weights.safety),
            ("weights.chargeTime", weights.charge_time),
            ("weights.efficiency", weights.efficiency),
            ("filter.costRange", filter.cost_range.0),
            ("filter.costRange", filter.cost_range.1),
            ("filter.cycleLifeRange", filter.cycle_life_range.0),
            ("filter.cycleLifeRange", filter.cycle_life_range.1),
            ("filter.safetyMin", filter.safety_min),
            ("filter.efficiencyMin", filter.efficiency_min),
        ];
        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(EncodeError::NonFinite { field, value }),
            None => Ok(()),
        }
    }

    #[instrument(skip_all, fields(len = token.len()))]
    pub fn decode(token: &str) -> Result<Self, DecodeError> {
        let token = token.trim();
        let json = match URL_SAFE_NO_PAD.decode(token) {
            Ok(json) => json,
            Err(error) => {
                trace!(%error, "not URL-safe, trying the standard alphabet");
                STANDARD.decode(token)?
            }
        };
        Ok(serde_json::from_slice(&json)?)
    }

    /// Decode the token, falling back to the defaults when it is malformed.
    pub fn decode_or_default(token: &str) -> Self {
        Self::decode(token).unwrap_or_else(|error| {
            warn!(%error, "falling back to the default state");
            Self::default()
        })
    }

    /// Link to the state: `{base}?state=<token>`.
    pub fn shareable_url(&self, base: &str) -> Result<String> {
        let query = serde_qs::to_string(&Query { state: self.encode()? })
            .context("failed to build the query string")?;
        Ok(format!("{}?{query}", base.trim_end_matches('?')))
    }

    /// Extract the state from a query string or a full URL.
    ///
    /// A missing or malformed `state` parameter yields the defaults.
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.split_once('?').map_or(query, |(_, query)| query);
        let query: Query = serde_qs::from_str(query).context("malformed query string")?;
        Ok(query.state.as_deref().map_or_else(Self::default, Self::decode_or_default))
    }
}

#[derive(Serialize, Deserialize)]
struct Query<S = Option<String>> {
    #[serde(default)]
    state: S,
}

//! Search filters accepted by the offers search endpoint.
//!
//! Field names on the wire are the upstream API's own, case included (`codeNAF`,
//! `codeROME`, `offresMRS`, ...). Unset fields are never forwarded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort order applied when the caller does not send one (1 = date of creation).
pub const DEFAULT_SORT: u32 = 1;

/// Optional filters for `GET /offres/search`.
///
/// Deserialized straight from the inbound query string, so a value of the wrong type
/// (e.g. `distance=far`) is rejected before any upstream call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acces_travailleur_handicape: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appellation: Option<String>,
    #[serde(rename = "codeNAF", skip_serializing_if = "Option::is_none")]
    pub code_naf: Option<String>,
    #[serde(rename = "codeROME", skip_serializing_if = "Option::is_none")]
    pub code_rome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commune: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domaine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duree_contrat_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duree_contrat_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duree_hebdo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duree_hebdo_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duree_hebdo_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entreprises_adaptees: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_exigence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_domaine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclure_limitrophes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_selection_partenaires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mots_cles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature_contrat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niveau_formation: Option<String>,
    #[serde(rename = "offresMRS", skip_serializing_if = "Option::is_none")]
    pub offres_mrs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offres_manque_candidats: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origine_offre: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partenaires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pays_continent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periode_salaire: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publiee_depuis: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    /// Result window, `"<first>-<last>"` (upstream caps a page at 150 offers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salaire_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secteur_activite: Option<String>,
    /// Falls back to [`DEFAULT_SORT`] when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temps_plein: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_contrat: Option<String>,
}

/// Renders a scalar JSON value the way it appears in a query string.
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

impl SearchFilters {
    /// Returns the set fields as `(wire name, value)` pairs, sorted by name.
    ///
    /// `sort` is always present: the caller's value, or [`DEFAULT_SORT`].
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(name, value)| query_value(&value).map(|v| (name, v)))
                .collect(),
            _ => Vec::new(),
        };

        if self.sort.is_none() {
            pairs.push(("sort".to_string(), DEFAULT_SORT.to_string()));
        }

        pairs.sort();
        pairs
    }
}

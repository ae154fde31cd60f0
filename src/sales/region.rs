use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The regions the remote endpoint can filter sales by.
///
/// [Region::Brasil] covers the whole country and means no region filter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    /// The whole country.
    #[default]
    Brasil,
    /// The Centre-West macro-region.
    CentroOeste,
    /// The North-East macro-region.
    Nordeste,
    /// The North macro-region.
    Norte,
    /// The South-East macro-region.
    Sudeste,
    /// The South macro-region.
    Sul,
}

impl Region {
    /// All regions in the order they are offered to the user.
    pub const ALL: [Region; 6] = [
        Region::Brasil,
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sudeste,
        Region::Sul,
    ];

    /// The value to send as the `regiao` query parameter, or `None` if
    /// the parameter should be left out.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Region::Brasil => None,
            region => Some(region.slug()),
        }
    }

    /// The lower-case name used in URLs.
    pub fn slug(self) -> &'static str {
        match self {
            Region::Brasil => "brasil",
            Region::CentroOeste => "centro-oeste",
            Region::Nordeste => "nordeste",
            Region::Norte => "norte",
            Region::Sudeste => "sudeste",
            Region::Sul => "sul",
        }
    }

    /// The name to display to the user.
    pub fn label(self) -> &'static str {
        match self {
            Region::Brasil => "Brasil",
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::Region;

    #[test]
    fn brasil_has_no_query_value() {
        assert_eq!(Region::Brasil.query_value(), None);
    }

    #[test]
    fn query_value_is_lower_case() {
        assert_eq!(Region::CentroOeste.query_value(), Some("centro-oeste"));
        assert_eq!(Region::Sul.query_value(), Some("sul"));
    }

    #[test]
    fn slug_matches_serde_name() {
        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();

            assert_eq!(json, format!("\"{}\"", region.slug()));
        }
    }
}

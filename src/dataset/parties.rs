//! Fixed party → color table.
//!
//! Unrecognized labels fall back to a neutral color, never an error.

use bevy::prelude::*;

/// AKP (Orange).
pub const COLOR_AKP: Color = Color::srgb(1.0, 0.5, 0.0); // #FF8000
/// CHP (Red).
pub const COLOR_CHP: Color = Color::srgb(0.8, 0.0, 0.0); // #CC0000
/// HDP (Purple).
pub const COLOR_HDP: Color = Color::srgb(0.5, 0.0, 0.5); // #800080
/// MHP (Dark gray).
pub const COLOR_MHP: Color = Color::srgb(0.2, 0.2, 0.2); // #333333
/// DEVA (Cerulean).
pub const COLOR_DEVA: Color = Color::srgb(0.0, 0.48, 0.65); // #007BA7
/// GELECEK (Forest green).
pub const COLOR_GELECEK: Color = Color::srgb(0.13, 0.55, 0.13); // #228B22
/// SAADET (Gray).
pub const COLOR_SAADET: Color = Color::srgb(0.5, 0.5, 0.5); // #808080
/// DP (Dark silver).
pub const COLOR_DP: Color = Color::srgb(0.66, 0.66, 0.66); // #A9A9A9
/// IYI (Light silver).
pub const COLOR_IYI: Color = Color::srgb(0.83, 0.83, 0.83); // #D3D3D3
/// Fallback for parties not in the table.
pub const COLOR_PARTY_FALLBACK: Color = Color::WHITE;

/// Recognized party labels, in legend order.
pub const PARTIES: [&str; 9] = [
    "AKP", "CHP", "HDP", "MHP", "DEVA", "GELECEK", "SAADET", "DP", "IYI",
];

/// Get the base color for a party label.
pub fn party_color(party: &str) -> Color {
    match party {
        "AKP" => COLOR_AKP,
        "CHP" => COLOR_CHP,
        "HDP" => COLOR_HDP,
        "MHP" => COLOR_MHP,
        "DEVA" => COLOR_DEVA,
        "GELECEK" => COLOR_GELECEK,
        "SAADET" => COLOR_SAADET,
        "DP" => COLOR_DP,
        "IYI" => COLOR_IYI,
        _ => COLOR_PARTY_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_party_has_a_distinct_entry() {
        for party in PARTIES {
            assert_ne!(party_color(party), COLOR_PARTY_FALLBACK, "{party}");
        }
    }

    #[test]
    fn unknown_party_falls_back() {
        assert_eq!(party_color("INDEPENDENT"), COLOR_PARTY_FALLBACK);
        assert_eq!(party_color(""), COLOR_PARTY_FALLBACK);
    }
}

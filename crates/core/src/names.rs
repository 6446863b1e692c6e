//! Player name cleaning and normalization.
//!
//! Bookmakers print the same player in slightly different ways
//! (`"Djokovic  N."`, `" djokovic n. "`). Two forms are kept apart:
//!
//! - the *display* name: whitespace collapsed, retirement markers removed,
//!   case preserved;
//! - the *identity* name: the display name casefolded, used to decide whether
//!   two quotes refer to the same player.
//!
//! No fuzzy matching is attempted: `"Djokovic N."` and `"N. Djokovic"` are
//! different identities.

/// Markers some books append to a player who retired mid-match.
const RETIREMENT_MARKERS: [&str; 3] = ["(ret)", "(RET)", "[RET]"];

/// Collapses runs of whitespace into single spaces and trims the ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans a raw player name for display.
///
/// # Examples
/// ```
/// use tennis_odds_core::names::clean_player_name;
///
/// assert_eq!(clean_player_name("  Djokovic   N. (ret) "), "Djokovic N.");
/// ```
#[must_use]
pub fn clean_player_name(raw: &str) -> String {
    let mut name = raw.to_string();
    for marker in RETIREMENT_MARKERS {
        name = name.replace(marker, "");
    }
    collapse_whitespace(&name)
}

/// Normalizes a player name into its identity form.
///
/// # Examples
/// ```
/// use tennis_odds_core::names::normalize_player_name;
///
/// assert_eq!(normalize_player_name(" ALCARAZ\tC. "), "alcaraz c.");
/// ```
#[must_use]
pub fn normalize_player_name(raw: &str) -> String {
    clean_player_name(raw).to_lowercase()
}

//! Static catalog of supported teams.
//!
//! National teams come first, then the big international clubs. The order
//! is the display order.

use serde::Serialize;

/// A team the user can dedicate a tifo to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: &'static str,
    pub name: &'static str,
    /// Hex colours, primary first.
    pub colors: &'static [&'static str],
    pub flag: &'static str,
    pub is_club: bool,
}

const fn national(
    id: &'static str,
    name: &'static str,
    colors: &'static [&'static str],
    flag: &'static str,
) -> Team {
    Team {
        id,
        name,
        colors,
        flag,
        is_club: false,
    }
}

const fn club(
    id: &'static str,
    name: &'static str,
    colors: &'static [&'static str],
    flag: &'static str,
) -> Team {
    Team {
        id,
        name,
        colors,
        flag,
        is_club: true,
    }
}

static TEAMS: &[Team] = &[
    national("senegal", "Sénégal", &["#00853f", "#fdef42", "#e31b23"], "🇸🇳"),
    national("ivorycoast", "Côte d'Ivoire", &["#ff8200", "#ffffff", "#009e60"], "🇨🇮"),
    national("morocco", "Maroc", &["#c1272d", "#006233"], "🇲🇦"),
    national("cameroon", "Cameroun", &["#007a5e", "#ce1126", "#fcd116"], "🇨🇲"),
    national("algeria", "Algérie", &["#ffffff", "#006233", "#d21034"], "🇩🇿"),
    national("france", "France", &["#002395", "#ffffff", "#ed2939"], "🇫🇷"),
    national("brazil", "Brésil", &["#fedf00", "#009b3a", "#002776"], "🇧🇷"),
    national("argentina", "Argentine", &["#75aadb", "#ffffff", "#fcbf49"], "🇦🇷"),
    club("realmadrid", "Real Madrid", &["#ffffff", "#00529f", "#fecb00"], "⚪"),
    club("barcelona", "FC Barcelone", &["#a50044", "#004d98", "#edbb00"], "🔵🔴"),
    club("mancity", "Manchester City", &["#6cabdd", "#ffffff", "#1c2c5b"], "🩵"),
    club("liverpool", "Liverpool FC", &["#c8102e", "#f6eb61", "#00b2a9"], "🔴"),
    club("manunited", "Manchester United", &["#da291c", "#000000", "#fbe122"], "👹"),
    club("psg", "Paris Saint-Germain", &["#004170", "#da291c", "#ffffff"], "🗼"),
    club("bayern", "Bayern Munich", &["#dc052d", "#ffffff", "#0066b2"], "🥨"),
    club("juventus", "Juventus", &["#ffffff", "#000000"], "🦓"),
    club("acmilan", "AC Milan", &["#fb090b", "#000000"], "🔴⚫"),
    club("inter", "Inter Milan", &["#0068a8", "#000000", "#c2923b"], "🔵⚫"),
    club("arsenal", "Arsenal FC", &["#ef0107", "#ffffff", "#063672"], "🔫"),
    club("chelsea", "Chelsea FC", &["#034694", "#ffffff", "#dba111"], "🦁"),
    club("dortmund", "B. Dortmund", &["#fde100", "#000000"], "🐝"),
];

/// Every team, in display order.
pub fn all() -> &'static [Team] {
    TEAMS
}

/// Look up a team by id (case-insensitive).
pub fn find(id: &str) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

pub fn national_teams() -> impl Iterator<Item = &'static Team> {
    TEAMS.iter().filter(|t| !t.is_club)
}

pub fn clubs() -> impl Iterator<Item = &'static Team> {
    TEAMS.iter().filter(|t| t.is_club)
}

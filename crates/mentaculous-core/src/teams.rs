//! Team abbreviations and logo locations.

/// Abbreviation returned for names not in [`TEAM_ABBREVIATIONS`].
pub const UNKNOWN_ABBREVIATION: &str = "UNK";

/// Full club name to scoreboard abbreviation.
pub const TEAM_ABBREVIATIONS: [(&str, &str); 30] = [
    ("Arizona Diamondbacks", "ARI"),
    ("Atlanta Braves", "ATL"),
    ("Baltimore Orioles", "BAL"),
    ("Boston Red Sox", "BOS"),
    ("Chicago White Sox", "CHW"),
    ("Chicago Cubs", "CHC"),
    ("Cincinnati Reds", "CIN"),
    ("Cleveland Guardians", "CLE"),
    ("Colorado Rockies", "COL"),
    ("Detroit Tigers", "DET"),
    ("Houston Astros", "HOU"),
    ("Kansas City Royals", "KAN"),
    ("Los Angeles Angels", "LAA"),
    ("Los Angeles Dodgers", "LAD"),
    ("Miami Marlins", "MIA"),
    ("Milwaukee Brewers", "MIL"),
    ("Minnesota Twins", "MIN"),
    ("New York Yankees", "NYY"),
    ("New York Mets", "NYM"),
    ("Athletics", "OAK"),
    ("Philadelphia Phillies", "PHI"),
    ("Pittsburgh Pirates", "PIT"),
    ("San Diego Padres", "SD"),
    ("San Francisco Giants", "SF"),
    ("Seattle Mariners", "SEA"),
    ("St. Louis Cardinals", "STL"),
    ("Tampa Bay Rays", "TB"),
    ("Texas Rangers", "TEX"),
    ("Toronto Blue Jays", "TOR"),
    ("Washington Nationals", "WAS"),
];

/// Abbreviation for a full team name. Matching ignores case only.
pub fn abbreviation(team_name: &str) -> &'static str {
    TEAM_ABBREVIATIONS
        .iter()
        .find(|(full, _)| full.eq_ignore_ascii_case(team_name))
        .map(|(_, abbr)| *abbr)
        .unwrap_or(UNKNOWN_ABBREVIATION)
}

/// Remote logo for a team id.
pub fn logo_url(team_id: u32) -> String {
    format!("https://www.mlbstatic.com/team-logos/{team_id}.svg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_lookup() {
        assert_eq!(abbreviation("Boston Red Sox"), "BOS");
        assert_eq!(abbreviation("new york yankees"), "NYY");
        assert_eq!(abbreviation("Athletics"), "OAK");
        assert_eq!(abbreviation("Red Sox"), "UNK");
        assert_eq!(abbreviation(""), "UNK");
    }

    #[test]
    fn test_abbreviation_requires_exact_name() {
        assert_eq!(abbreviation(" Boston Red Sox"), "UNK");
        assert_eq!(abbreviation("Boston Red Sox "), "UNK");
        assert_eq!(abbreviation("Boston  Red Sox"), "UNK");
    }

    #[test]
    fn test_abbreviations_are_unique() {
        let mut abbrs: Vec<&str> = TEAM_ABBREVIATIONS.iter().map(|(_, a)| *a).collect();
        abbrs.sort();
        abbrs.dedup();
        assert_eq!(abbrs.len(), TEAM_ABBREVIATIONS.len());
    }

    #[test]
    fn test_logo_url() {
        assert_eq!(logo_url(111), "https://www.mlbstatic.com/team-logos/111.svg");
    }
}

//! Phrases called out alongside a ball.

/// Traditional call for a ball, if one exists.
pub fn lookup_phrase(number: u8) -> Option<&'static str> {
    let phrase = match number {
        1 => "Eenzaam en alleen",
        3 => "Drie keer is scheepsrecht",
        7 => "Zeven dagen in de week",
        10 => "Een tien met een griffel",
        11 => "Een voetbalelftal",
        12 => "Een dozijn",
        13 => "Het ongeluksgetal",
        14 => "Johan Cruijff",
        18 => "Eindelijk volwassen",
        22 => "Twee zwaantjes",
        24 => "Uren in een dag",
        25 => "Een kwartje",
        33 => "Dubbel drie",
        44 => "Dubbel vier",
        50 => "Abraham gezien",
        52 => "Weken in een jaar",
        55 => "Dubbel vijf",
        60 => "Minuten in een uur",
        64 => "Velden op een schaakbord",
        66 => "Dubbel zes",
        75 => "De hoogste bal",
        _ => return None,
    };
    Some(phrase)
}

/// Phrase for a ball, falling back to a plain "Nummer N" label.
pub fn phrase_or_fallback(number: u8) -> String {
    lookup_phrase(number)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Nummer {number}"))
}

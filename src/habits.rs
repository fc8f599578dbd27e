//! Habit definitions - tracked activities, protocols and moods

/// Activities shown as daily toggles
pub const DEFAULT_ACTIVITIES: &[&str] = &[
    "Workout",
    "Cold Plunge",
    "Red Light Therapy",
    "Peptide Dose",
    "Grounding",
];

/// Well-known numeric fields that can be charted
pub const CHART_FIELDS: &[&str] = &[
    "plungeDuration",
    "plungeTemp",
    "redlightDuration",
    "groundingDuration",
    "saunaDuration",
];

/// Recovery protocols as shown in the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Workout,
    ColdPlunge,
    RedLight,
    Sauna,
    Peptides,
    Grounding,
}

impl Protocol {
    /// Display name, also the key a nested protocol record is stored under
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::Workout => "Workout",
            Protocol::ColdPlunge => "Cold Plunge",
            Protocol::RedLight => "Red Light",
            Protocol::Sauna => "Sauna",
            Protocol::Peptides => "Peptides",
            Protocol::Grounding => "Grounding",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Protocol::Workout => "🏋️",
            Protocol::ColdPlunge => "🧊",
            Protocol::RedLight => "🔴",
            Protocol::Sauna => "🔥",
            Protocol::Peptides => "💉",
            Protocol::Grounding => "🌍",
        }
    }

    /// Flat day-entry fields that belong to this protocol
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Protocol::Workout => &["workoutNotes"],
            Protocol::ColdPlunge => &["plungeDuration", "plungeTemp"],
            Protocol::RedLight => &["redlightDuration"],
            Protocol::Sauna => &["saunaDuration"],
            Protocol::Peptides => &["peptideType"],
            Protocol::Grounding => &["groundingDuration"],
        }
    }

    /// Journal order
    pub fn all() -> &'static [Protocol] {
        &[
            Protocol::Workout,
            Protocol::ColdPlunge,
            Protocol::RedLight,
            Protocol::Sauna,
            Protocol::Peptides,
            Protocol::Grounding,
        ]
    }

    /// Find protocol by display name (case-insensitive)
    pub fn find(name: &str) -> Option<Protocol> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Daily mood, stored as its emoji label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Neutral,
    Tired,
    Stressed,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "😄 Happy",
            Mood::Neutral => "😐 Neutral",
            Mood::Tired => "😩 Tired",
            Mood::Stressed => "😠 Stressed",
        }
    }

    fn word(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Tired => "tired",
            Mood::Stressed => "stressed",
        }
    }

    pub fn all() -> &'static [Mood] {
        &[Mood::Happy, Mood::Neutral, Mood::Tired, Mood::Stressed]
    }

    /// Parse either the stored label or the bare word
    pub fn parse(raw: &str) -> Option<Mood> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        // "😄 Happy" -> "Happy"
        let word = raw.rsplit(' ').next().unwrap_or(raw);
        Self::all()
            .iter()
            .copied()
            .find(|m| m.label() == raw || m.word().eq_ignore_ascii_case(word))
    }
}

/// Find a tracked activity by name (case-insensitive), returning its canonical spelling
pub fn find_activity<'a>(activities: &'a [String], name: &str) -> Option<&'a str> {
    let name = name.trim();
    activities
        .iter()
        .find(|a| a.eq_ignore_ascii_case(name))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_find() {
        assert_eq!(Protocol::find("sauna"), Some(Protocol::Sauna));
        assert_eq!(Protocol::find(" Cold Plunge "), Some(Protocol::ColdPlunge));
        assert_eq!(Protocol::find("yoga"), None);
    }

    #[test]
    fn test_protocol_order() {
        let names: Vec<_> = Protocol::all().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Workout", "Cold Plunge", "Red Light", "Sauna", "Peptides", "Grounding"]);
    }

    #[test]
    fn test_mood_parse_label_and_word() {
        assert_eq!(Mood::parse("😄 Happy"), Some(Mood::Happy));
        assert_eq!(Mood::parse("tired"), Some(Mood::Tired));
        assert_eq!(Mood::parse("STRESSED"), Some(Mood::Stressed));
        assert_eq!(Mood::parse(""), None);
        assert_eq!(Mood::parse("ecstatic"), None);
    }

    #[test]
    fn test_find_activity_canonical() {
        let activities: Vec<String> = DEFAULT_ACTIVITIES.iter().map(|s| s.to_string()).collect();
        assert_eq!(find_activity(&activities, "cold plunge"), Some("Cold Plunge"));
        assert_eq!(find_activity(&activities, "Sauna"), None);
    }
}

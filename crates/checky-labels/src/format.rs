//! Display formatting for raw model class names.

/// Display name for a raw model label.
///
/// Known citrus-condition labels get their fixed form; anything else is
/// title-cased with dashes turned into spaces ("sedikit-busuk" -> "Sedikit
/// Busuk").
pub fn format_class_name(name: &str) -> String {
    match name.to_lowercase().as_str() {
        "matang" => "Matang".to_string(),
        "sedikit-busuk" => "Sedikit Busuk".to_string(),
        "sangat-busuk" => "Sangat Busuk".to_string(),
        _ => name
            .split('-')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ripeness condition behind a model label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruitCondition {
    Ripe,
    SlightlyRotten,
    Rotten,
}

impl FruitCondition {
    pub fn from_label(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "matang" => Some(Self::Ripe),
            "sedikit-busuk" => Some(Self::SlightlyRotten),
            "sangat-busuk" => Some(Self::Rotten),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Ripe => "Fruit is in good condition and ready to eat",
            Self::SlightlyRotten => "Fruit is starting to show minor spoilage",
            Self::Rotten => "Fruit is spoiled and no longer edible",
        }
    }
}

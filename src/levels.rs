//! Simplification levels
//!
//! Each level carries a short description and the instruction prefix that is
//! prepended to the user's text when prompting the model.

use serde::{Deserialize, Serialize};

/// Target reading level for a simplification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimplificationLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl Default for SimplificationLevel {
    fn default() -> Self {
        Self::Intermediate
    }
}

impl SimplificationLevel {
    pub const ALL: [SimplificationLevel; 3] = [Self::Basic, Self::Intermediate, Self::Advanced];

    /// Parse a level name case-insensitively, falling back to `Intermediate`
    /// for anything unknown (including names with surrounding whitespace)
    pub fn from_lenient(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "basic" => Self::Basic,
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            other => {
                tracing::debug!(level = %other, "Unknown simplification level, using intermediate");
                Self::default()
            }
        }
    }

    /// Lowercase name, also used in cache fingerprints
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Basic => "~Grade 4–6 reading level; very clear, short sentences, keep meaning.",
            Self::Intermediate => "~Grade 7–9; moderate simplification; preserve nuance.",
            Self::Advanced => "~Grade 10–12; mild simplification with careful rephrasing.",
        }
    }

    /// Instruction placed before the text in the model prompt
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Basic => concat!(
                "Simplify the following text to a grade 4–6 reading level. ",
                "Keep meaning and facts. Split long sentences. Preserve names and numbers. ",
                "Avoid rare words. Output only the simplified text.\n\n",
            ),
            Self::Intermediate => concat!(
                "Simplify to a grade 7–9 reading level. Keep nuance and all key facts. ",
                "Split long sentences if needed. Avoid jargon where possible. ",
                "Output only the simplified text.\n\n",
            ),
            Self::Advanced => concat!(
                "Lightly simplify to a grade 10–12 reading level. Preserve technical terms and nuance. ",
                "Prefer clarity over brevity. Output only the simplified text.\n\n",
            ),
        }
    }

    pub fn prompt(&self, text: &str) -> String {
        format!("{}{}", self.prefix(), text)
    }
}

impl std::fmt::Display for SimplificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lenient_known_levels() {
        assert_eq!(SimplificationLevel::from_lenient("basic"), SimplificationLevel::Basic);
        assert_eq!(SimplificationLevel::from_lenient("ADVANCED"), SimplificationLevel::Advanced);
        assert_eq!(SimplificationLevel::from_lenient("Intermediate"), SimplificationLevel::Intermediate);
    }

    #[test]
    fn test_from_lenient_falls_back_to_intermediate() {
        for raw in ["bogus", "", "expert", "basic!", " basic", "advanced\n"] {
            assert_eq!(
                SimplificationLevel::from_lenient(raw),
                SimplificationLevel::Intermediate
            );
        }
    }

    #[test]
    fn test_prompt_prepends_prefix() {
        let prompt = SimplificationLevel::Basic.prompt("The cat sat.");
        assert!(prompt.starts_with("Simplify the following text to a grade 4–6"));
        assert!(prompt.ends_with("Output only the simplified text.\n\nThe cat sat."));
    }

    #[test]
    fn test_round_trip_names() {
        for level in SimplificationLevel::ALL {
            assert_eq!(SimplificationLevel::from_lenient(level.as_str()), level);
            assert_eq!(level.to_string(), level.as_str());
        }
    }
}

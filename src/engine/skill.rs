//! Skill profiles selecting which rule cascade the engine runs.

use super::cascade::{INTERMEDIATE, PERFECT, RANDOM, Rule};
use serde::{Deserialize, Serialize};

/// How well the engine plays.
///
/// Determines move quality only; every profile returns a legal move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SkillProfile {
    /// Uniformly random legal moves.
    #[serde(alias = "easy")]
    #[strum(to_string = "random", serialize = "easy")]
    Random,
    /// Win, block, then positional preference. No fork play.
    #[serde(alias = "medium")]
    #[strum(to_string = "intermediate", serialize = "medium")]
    Intermediate,
    /// Full cascade including forks; never loses.
    #[default]
    #[serde(alias = "hard")]
    #[strum(to_string = "perfect", serialize = "hard")]
    Perfect,
}

impl SkillProfile {
    /// The ordered rules evaluated for this profile.
    pub fn cascade(self) -> &'static [Rule] {
        match self {
            SkillProfile::Random => RANDOM,
            SkillProfile::Intermediate => INTERMEDIATE,
            SkillProfile::Perfect => PERFECT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_original_difficulty_names() {
        assert_eq!("easy".parse::<SkillProfile>().unwrap(), SkillProfile::Random);
        assert_eq!(
            "Medium".parse::<SkillProfile>().unwrap(),
            SkillProfile::Intermediate
        );
        assert_eq!("HARD".parse::<SkillProfile>().unwrap(), SkillProfile::Perfect);
        assert_eq!(
            "perfect".parse::<SkillProfile>().unwrap(),
            SkillProfile::Perfect
        );
        assert!("expert".parse::<SkillProfile>().is_err());
    }

    #[test]
    fn test_display_uses_profile_name() {
        assert_eq!(SkillProfile::Intermediate.to_string(), "intermediate");
    }

    #[test]
    fn test_serde_accepts_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            skill: SkillProfile,
        }
        let w: Wrapper = toml::from_str("skill = \"medium\"").unwrap();
        assert_eq!(w.skill, SkillProfile::Intermediate);
        let w: Wrapper = toml::from_str("skill = \"random\"").unwrap();
        assert_eq!(w.skill, SkillProfile::Random);
    }
}

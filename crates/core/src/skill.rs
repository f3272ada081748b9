//! Skill axes and course kinds.
//!
//! A [`Skill`] is one of the four measured axes. A [`CourseKind`] tags a
//! course with the axis it trains, plus the synthetic `AllSkills` kind
//! for combined courses. Both round-trip through the strings stored in
//! the database.

use serde::{Deserialize, Serialize};

/// Valid skill strings (stored in the `courses.kind` column).
pub const KIND_LISTENING: &str = "LISTENING";
pub const KIND_SPEAKING: &str = "SPEAKING";
pub const KIND_READING: &str = "READING";
pub const KIND_WRITING: &str = "WRITING";
pub const KIND_ALLSKILLS: &str = "ALLSKILLS";

/// All valid course-kind strings.
pub const VALID_COURSE_KINDS: &[&str] = &[
    KIND_LISTENING,
    KIND_SPEAKING,
    KIND_READING,
    KIND_WRITING,
    KIND_ALLSKILLS,
];

/// One of the four measured skill axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Skill {
    Listening,
    Speaking,
    Reading,
    Writing,
}

impl Skill {
    /// All four axes in the canonical evaluation order.
    pub const ALL: [Skill; 4] = [
        Skill::Listening,
        Skill::Speaking,
        Skill::Reading,
        Skill::Writing,
    ];

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Listening => KIND_LISTENING,
            Skill::Speaking => KIND_SPEAKING,
            Skill::Reading => KIND_READING,
            Skill::Writing => KIND_WRITING,
        }
    }

    /// The course kind that trains this axis.
    pub fn course_kind(&self) -> CourseKind {
        match self {
            Skill::Listening => CourseKind::Listening,
            Skill::Speaking => CourseKind::Speaking,
            Skill::Reading => CourseKind::Reading,
            Skill::Writing => CourseKind::Writing,
        }
    }
}

/// The axis a course trains, including combined-skill courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseKind {
    Listening,
    Speaking,
    Reading,
    Writing,
    AllSkills,
}

impl CourseKind {
    /// All five kinds in the canonical evaluation order, combined last.
    pub const ALL: [CourseKind; 5] = [
        CourseKind::Listening,
        CourseKind::Speaking,
        CourseKind::Reading,
        CourseKind::Writing,
        CourseKind::AllSkills,
    ];

    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            KIND_LISTENING => Ok(Self::Listening),
            KIND_SPEAKING => Ok(Self::Speaking),
            KIND_READING => Ok(Self::Reading),
            KIND_WRITING => Ok(Self::Writing),
            KIND_ALLSKILLS => Ok(Self::AllSkills),
            _ => Err(format!(
                "Invalid course kind '{s}'. Must be one of: {}",
                VALID_COURSE_KINDS.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listening => KIND_LISTENING,
            Self::Speaking => KIND_SPEAKING,
            Self::Reading => KIND_READING,
            Self::Writing => KIND_WRITING,
            Self::AllSkills => KIND_ALLSKILLS,
        }
    }

    /// The single skill this kind trains, or `None` for `AllSkills`.
    pub fn skill(&self) -> Option<Skill> {
        match self {
            Self::Listening => Some(Skill::Listening),
            Self::Speaking => Some(Skill::Speaking),
            Self::Reading => Some(Skill::Reading),
            Self::Writing => Some(Skill::Writing),
            Self::AllSkills => None,
        }
    }

    /// Whether this is the synthetic combined axis.
    pub fn is_all_skills(&self) -> bool {
        matches!(self, Self::AllSkills)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_kind_round_trip() {
        for kind in CourseKind::ALL {
            assert_eq!(CourseKind::from_str_value(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn invalid_course_kind_rejected() {
        let result = CourseKind::from_str_value("GRAMMAR");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid course kind"));
    }

    #[test]
    fn course_kind_is_case_sensitive() {
        assert!(CourseKind::from_str_value("listening").is_err());
    }

    #[test]
    fn skill_maps_to_matching_kind() {
        for skill in Skill::ALL {
            assert_eq!(skill.course_kind().skill(), Some(skill));
        }
    }

    #[test]
    fn all_skills_has_no_single_skill() {
        assert_eq!(CourseKind::AllSkills.skill(), None);
        assert!(CourseKind::AllSkills.is_all_skills());
    }

    #[test]
    fn kind_strings_complete() {
        assert_eq!(VALID_COURSE_KINDS.len(), 5);
    }
}

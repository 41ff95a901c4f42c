//! `SkillRecord`: everything the index needs to know about one skill.

use super::extract;
use super::frontmatter::{self, Frontmatter, FrontmatterError};

/// One skill, built once from its SKILL.md and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRecord {
    /// Containing directory name; used for sorting, paths, and routing.
    pub id: String,
    /// Frontmatter `name`, or `id` when absent.
    pub name: String,
    pub description: String,
    pub user_invocable: bool,
    /// Error codes in description order, duplicates kept.
    pub error_codes: Vec<String>,
    pub short_description: String,
    pub triggers: Vec<String>,
}

impl SkillRecord {
    /// Build from already-parsed frontmatter.
    pub fn from_frontmatter(id: impl Into<String>, fm: Frontmatter) -> Self {
        let id = id.into();
        let description = fm.description.unwrap_or_default();
        Self {
            name: fm.name.unwrap_or_else(|| id.clone()),
            id,
            user_invocable: fm.user_invocable,
            error_codes: extract::error_codes(&description),
            short_description: extract::short_description(&description),
            triggers: extract::triggers(&description),
            description,
        }
    }

    /// Build from raw SKILL.md text. On a frontmatter problem the record still exists with
    /// defaults and the error is returned alongside it for reporting.
    pub fn parse(id: impl Into<String>, content: &str) -> (Self, Option<FrontmatterError>) {
        match frontmatter::parse(content) {
            Ok(fm) => (Self::from_frontmatter(id, fm), None),
            Err(e) => (Self::from_frontmatter(id, Frontmatter::default()), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record_from_skill_md() {
        let doc = "---\nname: Ownership\ndescription: \"CRITICAL: Use for ownership errors. Triggers: E0382, E0505, move\"\nuser-invocable: false\n---\n\n# Ownership\n";
        let (r, err) = SkillRecord::parse("m01-ownership", doc);
        assert!(err.is_none());
        assert_eq!(r.id, "m01-ownership");
        assert_eq!(r.name, "Ownership");
        assert_eq!(r.short_description, "ownership errors");
        assert_eq!(r.error_codes, vec!["E0382", "E0505"]);
        assert_eq!(r.triggers, vec!["E0382", "E0505", "move"]);
        assert!(!r.user_invocable);
    }

    #[test]
    fn name_falls_back_to_directory() {
        let (r, err) = SkillRecord::parse("m07-concurrency", "---\ndescription: Threads\n---\n");
        assert!(err.is_none());
        assert_eq!(r.name, "m07-concurrency");
        assert_eq!(r.short_description, "Threads");
    }

    #[test]
    fn unterminated_header_yields_defaults_and_error() {
        let (r, err) = SkillRecord::parse("broken", "---\nname: x\ndescription: E0382\n");
        assert!(matches!(err, Some(FrontmatterError::Unterminated)));
        assert_eq!(r.id, "broken");
        assert_eq!(r.name, "broken");
        assert_eq!(r.description, "");
        assert!(r.error_codes.is_empty());
        assert!(r.triggers.is_empty());
        assert_eq!(r.short_description, "");
    }
}

//! Skills: metadata records parsed from `<skills root>/<id>/SKILL.md`.
//!
//! Each SKILL.md carries YAML frontmatter (name, description, user-invocable). The description
//! is mined for error codes, a short description, and trigger keywords; the classifier then
//! places every skill in exactly one category.

mod classify;
mod extract;
mod frontmatter;
mod record;

pub use classify::{default_rules, Category, Classifier};
pub use extract::{error_codes, short_description, triggers, TRIGGERS_MARKER};
pub use frontmatter::{extract_block, parse as parse_frontmatter, Frontmatter, FrontmatterError};
pub use record::SkillRecord;

//! Index renderer: records in, one markdown document out.
//!
//! Each section is a pure function producing a self-contained block. `render_index` joins them
//! in a fixed order with `---` dividers; the result is always the complete document.

use std::collections::BTreeMap;

use crate::config::IndexConfig;
use crate::docs::DocRecord;
use crate::skills::{Category, Classifier, SkillRecord};

/// Short descriptions in the skills listing are clamped to this many characters.
pub const SKILL_DESC_WIDTH: usize = 60;
/// Titles in the docs listing are clamped to this many characters.
pub const DOC_TITLE_WIDTH: usize = 50;

const ENTRY_PAD: usize = 30;
const CODE_PAD: usize = 20;
const DIVIDER: &str = "---\n";

const USAGE_TEMPLATE: &str = include_str!("../templates/usage.md");

/// Display strings the renderer needs from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub title: String,
    /// Docs root as shown in the document, without trailing slash (e.g. "./rust-docs").
    pub docs_root: String,
    /// Skills root as shown in the document (e.g. "./rust-docs/rust-skills").
    pub skills_root: String,
    pub skill_file: String,
    pub doc_file: String,
}

impl Layout {
    pub fn from_config(config: &IndexConfig) -> Self {
        Self {
            title: config.title.clone(),
            docs_root: display_root(&config.docs_dir),
            skills_root: display_root(&config.resolve_skills_dir()),
            skill_file: config.skill_file.clone(),
            doc_file: config.doc_file.clone(),
        }
    }
}

fn display_root(path: &std::path::Path) -> String {
    let s = path.display().to_string();
    let trimmed = s.trim_end_matches('/');
    if trimmed.is_empty() {
        s
    } else {
        trimmed.to_string()
    }
}

/// First `width` characters of `s`; strings of exactly `width` characters are unchanged.
pub fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

fn entry(label: String, text: &str) -> String {
    format!("{:<width$} | {}", label, text, width = ENTRY_PAD)
}

fn sorted_by_id<'a, T>(items: &'a [T], id: impl Fn(&T) -> &str) -> Vec<&'a T> {
    let mut v: Vec<&'a T> = items.iter().collect();
    v.sort_by(|a, b| id(*a).cmp(id(*b)));
    v
}

fn header(layout: &Layout) -> Vec<String> {
    vec![
        format!("# {}\n", layout.title),
        format!(
            "**Instruction**: When working on Rust tasks, consult the skill files in `{}/` and documentation indexes in `{}/` for guidance. These files contain patterns, best practices, and decision frameworks.\n",
            layout.skills_root, layout.docs_root
        ),
    ]
}

/// Directory listing of skills with truncated short descriptions, sorted by id.
pub fn skills_section(layout: &Layout, skills: &[SkillRecord]) -> String {
    let mut out = vec![
        "## Skills Directory Structure\n".to_string(),
        "```".to_string(),
        format!("{}/", layout.skills_root),
    ];
    for skill in sorted_by_id(skills, |s| s.id.as_str()) {
        out.push(entry(
            format!("├── {}/", skill.id),
            &truncate(&skill.short_description, SKILL_DESC_WIDTH),
        ));
    }
    out.push("```\n".to_string());
    out.join("\n")
}

/// Error code -> skills table. Codes sorted; skills in scan order, one entry per occurrence.
pub fn routing_section(layout: &Layout, skills: &[SkillRecord]) -> String {
    let mut out = vec![
        "## Quick Error Code → Skill Routing\n".to_string(),
        "When encountering compiler errors, consult the corresponding skill:\n".to_string(),
        "```".to_string(),
    ];
    let mut by_code: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for skill in skills {
        for code in &skill.error_codes {
            by_code.entry(code).or_default().push(&skill.id);
        }
    }
    for (code, ids) in by_code {
        out.push(format!(
            "{:<width$}→ {}/{}/",
            code,
            layout.skills_root,
            ids.join(", "),
            width = CODE_PAD
        ));
    }
    out.push("```\n".to_string());
    out.join("\n")
}

/// Skills grouped by category, in the order `categories` is given.
pub fn categories_section(layout: &Layout, categories: &[Category<'_>]) -> String {
    let mut out = vec!["## Skill Selection by Task Type\n".to_string()];
    for category in categories {
        if category.skills.is_empty() {
            continue;
        }
        out.push(format!("**{}**", category.name));
        for skill in &category.skills {
            out.push(format!(
                "- `{}/{}/` - {}",
                layout.skills_root, skill.id, skill.short_description
            ));
        }
        out.push(String::new());
    }
    out.join("\n")
}

/// Directory listing of docs with truncated titles, then one block per doc with a quick reference.
pub fn docs_section(layout: &Layout, docs: &[DocRecord]) -> String {
    let docs = sorted_by_id(docs, |d| d.id.as_str());
    let mut out = vec![
        "## Documentation Index\n".to_string(),
        "```".to_string(),
        format!("{}/", layout.docs_root),
    ];
    for doc in &docs {
        out.push(entry(
            format!("├── {}/{}", doc.id, layout.doc_file),
            &truncate(&doc.title, DOC_TITLE_WIDTH),
        ));
    }
    out.push("```\n".to_string());

    out.push("### Documentation by Topic\n".to_string());
    for doc in &docs {
        if doc.quick_ref.is_empty() {
            continue;
        }
        out.push(format!(
            "**{}** → `{}/{}/{}`",
            doc.title, layout.docs_root, doc.id, layout.doc_file
        ));
        out.push(format!("- {}", doc.quick_ref));
        if !doc.source.is_empty() {
            out.push(format!("- Source: {}", doc.source));
        }
        out.push(String::new());
    }
    out.join("\n")
}

/// Static usage instructions with the configured roots filled in.
pub fn usage_section(layout: &Layout) -> String {
    USAGE_TEMPLATE
        .replace("{skills_root}", &layout.skills_root)
        .replace("{docs_root}", &layout.docs_root)
        .replace("{skill_file}", &layout.skill_file)
        .replace("{doc_file}", &layout.doc_file)
}

/// Render the complete index document.
pub fn render_index(
    layout: &Layout,
    skills: &[SkillRecord],
    docs: &[DocRecord],
    classifier: &Classifier,
) -> String {
    let categories = classifier.categorize(skills);
    let mut sections = header(layout);
    for section in [
        skills_section(layout, skills),
        routing_section(layout, skills),
        categories_section(layout, &categories),
        docs_section(layout, docs),
    ] {
        sections.push(DIVIDER.to_string());
        sections.push(section);
    }
    sections.push(DIVIDER.to_string());
    sections.push(usage_section(layout));
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::Frontmatter;

    fn layout() -> Layout {
        Layout::from_config(&IndexConfig::default())
    }

    fn skill(id: &str, description: &str) -> SkillRecord {
        SkillRecord::from_frontmatter(
            id,
            Frontmatter {
                description: Some(description.to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn layout_roots_from_default_config() {
        let l = layout();
        assert_eq!(l.docs_root, "./rust-docs");
        assert_eq!(l.skills_root, "./rust-docs/rust-skills");
    }

    #[test]
    fn short_description_truncation_boundary() {
        let exact = "a".repeat(SKILL_DESC_WIDTH);
        let over = "b".repeat(SKILL_DESC_WIDTH + 1);
        let out = skills_section(&layout(), &[skill("exact", &exact), skill("over", &over)]);
        assert!(out.contains(&format!(" | {}\n", exact)));
        assert!(out.contains(&format!(" | {}\n", "b".repeat(SKILL_DESC_WIDTH))));
        assert!(!out.contains(&over));
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("→→→", 2), "→→");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn skills_section_layout() {
        let out = skills_section(&layout(), &[skill("m02-b", "Second"), skill("m01-a", "First.")]);
        let expected = "## Skills Directory Structure\n\n```\n./rust-docs/rust-skills/\n\
├── m01-a/                     | First\n\
├── m02-b/                     | Second\n```\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn routing_sorted_codes_scan_order_skills() {
        let skills = vec![
            skill("m05", "E0599 and E0277"),
            skill("m01", "E0382, E0277"),
            skill("m09", "E0277 twice E0277"),
        ];
        let out = routing_section(&layout(), &skills);
        let rows: Vec<_> = out.lines().filter(|l| l.starts_with('E')).collect();
        assert_eq!(
            rows,
            vec![
                "E0277               → ./rust-docs/rust-skills/m05, m01, m09, m09/",
                "E0382               → ./rust-docs/rust-skills/m01/",
                "E0599               → ./rust-docs/rust-skills/m05/",
            ]
        );
    }

    #[test]
    fn routing_with_no_codes_is_empty_table() {
        let out = routing_section(&layout(), &[skill("x", "nothing")]);
        assert!(out.ends_with("```\n```\n"));
    }

    #[test]
    fn categories_section_lists_full_short_description() {
        let long = format!("ownership {}", "z".repeat(80));
        let skills = vec![skill("m01", &long)];
        let classifier = Classifier::from_config(&IndexConfig::default()).unwrap();
        let out = categories_section(&layout(), &classifier.categorize(&skills));
        assert_eq!(
            out,
            format!(
                "## Skill Selection by Task Type\n\n**Ownership & Borrowing**\n- `./rust-docs/rust-skills/m01/` - {}\n",
                long
            )
        );
    }

    #[test]
    fn docs_section_topics_only_with_quick_ref() {
        let docs = vec![
            DocRecord {
                id: "tokio".into(),
                title: "Tokio".into(),
                source: "https://tokio.rs".into(),
                quick_ref: "Spawn tasks".into(),
            },
            DocRecord {
                id: "axum".into(),
                title: "A".repeat(DOC_TITLE_WIDTH + 5),
                source: String::new(),
                quick_ref: String::new(),
            },
        ];
        let out = docs_section(&layout(), &docs);
        assert!(out.contains(&format!("├── axum/index.md              | {}\n", "A".repeat(DOC_TITLE_WIDTH))));
        assert!(out.contains("├── tokio/index.md             | Tokio\n"));
        assert!(out.ends_with(
            "### Documentation by Topic\n\n**Tokio** → `./rust-docs/tokio/index.md`\n- Spawn tasks\n- Source: https://tokio.rs\n"
        ));
        assert!(!out.contains("**AAAA"));
    }

    #[test]
    fn usage_section_substitutes_roots() {
        let out = usage_section(&layout());
        assert!(out.contains("Read ./rust-docs/rust-skills/m01-ownership/SKILL.md"));
        assert!(out.contains("Read ./rust-docs/tokio/index.md"));
        assert!(!out.contains('{'));
        assert!(out.ends_with("to rebuild.*\n"));
    }

    #[test]
    fn index_sections_in_order() {
        let classifier = Classifier::from_config(&IndexConfig::default()).unwrap();
        let out = render_index(&layout(), &[skill("m01", "ownership E0382")], &[], &classifier);
        assert!(out.starts_with("# Rust Development - Documentation Index\n\n**Instruction**"));
        let pos = |needle: &str| out.find(needle).unwrap();
        assert!(pos("## Skills Directory Structure") < pos("## Quick Error Code"));
        assert!(pos("## Quick Error Code") < pos("## Skill Selection by Task Type"));
        assert!(pos("## Skill Selection by Task Type") < pos("## Documentation Index"));
        assert!(pos("## Documentation Index") < pos("## How to Use This Index"));
        assert_eq!(out.matches("\n---\n").count(), 6);
    }
}

//! Rule-based skill classification: an ordered list of (category, pattern) rules, first match wins.
//!
//! Rule order is significant. A description that matches several patterns lands in the category
//! of the earliest rule, so the list is kept as a `Vec` and evaluated front to back.

use regex::{Regex, RegexBuilder};

use super::record::SkillRecord;
use crate::config::{CategoryRuleConfig, IndexConfig};
use crate::error::IndexError;

const DEFAULT_RULES: &[(&str, &str)] = &[
    ("Ownership & Borrowing", r"ownership|borrow|lifetime"),
    ("Smart Pointers & Resources", r"Box|Rc|Arc|RefCell|smart pointer"),
    ("Mutability", r"mutability|Cell|Mutex"),
    ("Generics & Traits", r"generic|trait|zero-cost"),
    ("Type Safety", r"type.*driven|newtype|PhantomData"),
    ("Error Handling", r"error.*handling|Result|Option"),
    ("Concurrency & Async", r"concurrency|async|thread|tokio"),
    ("Domain Modeling", r"domain|DDD|aggregate"),
    ("Performance", r"performance|benchmark|optim"),
    ("Ecosystem & Crates", r"ecosystem|crate|dependency"),
    ("Resource Lifecycle", r"lifecycle|RAII|Drop|pool"),
    ("Code Quality", r"anti-pattern|guideline|style|review"),
    ("Web Development", r"web|axum|actix|HTTP"),
    ("Unsafe & FFI", r"unsafe|FFI|raw pointer"),
    ("Tooling & LSP", r"LSP|call.*graph|navigator|refactor|symbol"),
    ("Meta & Utilities", r"meta|router|learner|visualiz|creator|daily"),
];

/// The built-in rule list, in evaluation order.
pub fn default_rules() -> Vec<CategoryRuleConfig> {
    DEFAULT_RULES
        .iter()
        .map(|(name, pattern)| CategoryRuleConfig {
            name: name.to_string(),
            pattern: pattern.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone)]
struct Rule {
    name: String,
    pattern: Regex,
}

/// Compiled, ordered classification rules plus the fallback category.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
    fallback: String,
}

/// One non-empty category with its skills in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category<'a> {
    pub name: String,
    pub skills: Vec<&'a SkillRecord>,
}

impl Classifier {
    /// Compile `rules` (case-insensitive). Fails on the first invalid pattern.
    pub fn new(rules: &[CategoryRuleConfig], fallback: impl Into<String>) -> Result<Self, IndexError> {
        let rules = rules
            .iter()
            .map(|r| {
                RegexBuilder::new(&r.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|pattern| Rule {
                        name: r.name.clone(),
                        pattern,
                    })
                    .map_err(|source| IndexError::InvalidPattern {
                        category: r.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rules,
            fallback: fallback.into(),
        })
    }

    /// Rules from `config.categories`, or the built-in list when unset.
    pub fn from_config(config: &IndexConfig) -> Result<Self, IndexError> {
        match &config.categories {
            Some(rules) => Self::new(rules, config.fallback_category.clone()),
            None => Self::new(&default_rules(), config.fallback_category.clone()),
        }
    }

    /// Category of the first rule whose pattern matches `description`, else the fallback.
    pub fn classify(&self, description: &str) -> &str {
        self.rules
            .iter()
            .find(|r| r.pattern.is_match(description))
            .map(|r| r.name.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Category names in presentation order: rule order (first occurrence of each name),
    /// with the fallback appended if no rule carries its name.
    pub fn category_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = Vec::new();
        for r in &self.rules {
            if !order.contains(&r.name.as_str()) {
                order.push(&r.name);
            }
        }
        if !order.contains(&self.fallback.as_str()) {
            order.push(&self.fallback);
        }
        order
    }

    /// Group skills by category. Empty categories are omitted; skills keep input order.
    pub fn categorize<'a>(&self, skills: &'a [SkillRecord]) -> Vec<Category<'a>> {
        let mut groups: Vec<Category<'a>> = self
            .category_order()
            .into_iter()
            .map(|name| Category {
                name: name.to_string(),
                skills: Vec::new(),
            })
            .collect();
        for skill in skills {
            let name = self.classify(&skill.description);
            if let Some(g) = groups.iter_mut().find(|g| g.name == name) {
                g.skills.push(skill);
            }
        }
        groups.retain(|g| !g.skills.is_empty());
        groups
    }
}

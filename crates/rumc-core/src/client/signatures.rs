//! Bot signature table: ordered categories of user-agent patterns.
//!
//! The table is configuration. It is compiled once at load time into a
//! single [`RegexSet`] whose pattern order follows the table order, so the
//! lowest matching pattern index always belongs to the first matching
//! category.

use regex::{RegexBuilder, RegexSet, RegexSetBuilder};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Table bundled with the crate.
const BUILTIN_TABLE: &str = include_str!("../../data/bots.toml");

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("failed to read signature table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed signature table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid pattern {pattern:?} in category {category:?}: {source}")]
    Pattern {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to compile signature set: {0}")]
    Set(#[source] regex::Error),
}

/// On-disk form of the table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignatureTableSource {
    #[serde(default)]
    pub spiders: Vec<String>,
    #[serde(default, rename = "category")]
    pub categories: Vec<CategorySource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySource {
    pub name: String,
    #[serde(default)]
    pub signatures: Vec<Signature>,
}

/// One signature: a regex plus an optional reference URL for maintainers.
#[derive(Debug, Clone, Deserialize)]
pub struct Signature {
    pub pattern: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Compiled, immutable bot signature table.
#[derive(Debug, Clone)]
pub struct BotSignatureTable {
    /// Lowercased category names, in table order.
    categories: Vec<String>,
    /// Category index for each pattern in `set`.
    pattern_category: Vec<usize>,
    set: RegexSet,
    /// Lowercased substrings.
    spiders: Vec<String>,
}

impl BotSignatureTable {
    /// The table bundled with the crate.
    pub fn builtin() -> Result<Self, SignatureError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, SignatureError> {
        let source: SignatureTableSource = toml::from_str(data)?;
        Self::compile(&source)
    }

    pub fn from_path(path: &Path) -> Result<Self, SignatureError> {
        let data = fs::read_to_string(path).map_err(|source| SignatureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_toml_str(&data)?;
        tracing::info!(
            path = %path.display(),
            categories = table.categories.len(),
            patterns = table.pattern_category.len(),
            "loaded bot signature table"
        );
        Ok(table)
    }

    /// A table with no categories and no spiders.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            pattern_category: Vec::new(),
            set: RegexSet::empty(),
            spiders: Vec::new(),
        }
    }

    pub fn compile(source: &SignatureTableSource) -> Result<Self, SignatureError> {
        let mut categories = Vec::with_capacity(source.categories.len());
        let mut pattern_category = Vec::new();
        let mut patterns = Vec::new();

        for (idx, cat) in source.categories.iter().enumerate() {
            categories.push(cat.name.to_lowercase());
            for sig in &cat.signatures {
                // Compile individually first so errors name the culprit.
                RegexBuilder::new(&sig.pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| SignatureError::Pattern {
                        category: cat.name.clone(),
                        pattern: sig.pattern.clone(),
                        source,
                    })?;
                patterns.push(sig.pattern.as_str());
                pattern_category.push(idx);
            }
        }

        let set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()
            .map_err(SignatureError::Set)?;

        let spiders = source
            .spiders
            .iter()
            .map(|s| s.to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            categories,
            pattern_category,
            set,
            spiders,
        })
    }

    /// True if any spider substring or table pattern matches.
    pub fn is_match(&self, lc_user_agent: &str) -> bool {
        self.is_spider(lc_user_agent) || self.set.is_match(lc_user_agent)
    }

    pub fn is_spider(&self, lc_user_agent: &str) -> bool {
        self.spiders.iter().any(|s| lc_user_agent.contains(s.as_str()))
    }

    /// First category (in table order) with a matching pattern.
    pub fn category(&self, lc_user_agent: &str) -> Option<&str> {
        self.set
            .matches(lc_user_agent)
            .iter()
            .next()
            .map(|i| self.categories[self.pattern_category[i]].as_str())
    }

    /// Category names in table order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }
}

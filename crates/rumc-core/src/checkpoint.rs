//! Checkpoint vocabulary.
//!
//! Events name the funnel stage they report with a checkpoint token. Only
//! tokens from the published vocabulary are meaningful downstream; the list
//! only grows, because stored events keep referencing old names.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Active checkpoint names, in the order they were introduced.
pub const KNOWN_CHECKPOINTS: &[&str] = &[
    "loadresource",
    "cwv",
    "cwv2",
    "click",
    "top",
    "lazy",
    "viewmedia",
    "viewblock",
    "leave",
    "load",
    "enter",
    "error",
    "navigate",
    "utm",
    "reload",
    "back_forward",
    "lcp",
    "missingresource",
    "sidekick:shown",
    "sidekick:loaded",
    "experiment",
    "formsubmit",
    "sidekick:hidden",
    "sidekick:updated",
    "sidekick:previewed",
    "sidekick:envswitched",
    "404",
    "crosswalk:previewed",
    "crosswalk:published",
    "sidekick:editoropened",
    "sidekick:published",
    "convert",
    "audiences",
    "viewfooter",
    "sidekick:loggedin",
    "search",
    "unsupported",
    "genai:prompt:generate",
    "sidekick:info",
    "genai:prompt:generatedvariations",
    "genai:prompt:isadobeselected",
    "formviews",
    "formready",
    "sidekick:custom:preflight",
    "formabondoned",
    "noscript",
    "sidekick:paletteclosed",
    "sidekick:custom:asset-library",
    "formfieldchange",
    "formfieldfocus",
    "nullsearch",
    "sidekick:custom:library",
    "variant",
    "genai:prompt:iscustomselected",
    "genai:consent:agree",
    "genai:prompt:new",
    "formhttppostput",
    "genai:prompt:copy",
    "sidekick:custom:localize-2",
    "sidekick:context-menu:addRemoveProject",
    "sidekick:viewdocsource",
    "sidekick:context-menu:openViewDocSource",
    "sidekick:unpublished",
    "sidekick:helpnext",
    "library:blockviewed",
    "formvalidationerrors",
    "showconsent",
    "consent",
    "paid",
    "email",
    "genai:consent:cancel",
    "sidekick:deleted",
    "sidekick:custom:version-history",
    "sidekick:custom:ost",
    "genai:prompt:thumbsup",
    "sidekick:custom:localize-v2",
    "sidekick:viewhidden",
    "sidekick:helpdismissed",
    "sidekick:custom:tagger",
    "sidekick:custom:assist",
    "sidekick:helpoptedout",
    "sidekick:custom:send-to-caas",
    "sidekick:share",
    "sidekick:custom:generate-variations",
    "sidekick:projectadded",
    "library:opened",
    "signin",
    "genai:prompt:export",
    "sidekick:custom:accessibility-mode",
    "sidekick:custom:locales",
];

/// Retired checkpoints. Kept for reference only; they are not members of the
/// vocabulary and cannot be re-added through configuration.
pub const RETIRED_CHECKPOINTS: &[&str] = &["pagesviewed", "datadesk", "rfq", "csperror"];

fn builtin_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| KNOWN_CHECKPOINTS.iter().copied().collect())
}

/// Exact, case-sensitive membership in the built-in vocabulary.
pub fn is_valid_checkpoint(name: &str) -> bool {
    builtin_set().contains(name)
}

pub fn is_retired_checkpoint(name: &str) -> bool {
    RETIRED_CHECKPOINTS.contains(&name)
}

/// Built-in vocabulary plus operator-supplied additions.
#[derive(Debug, Clone, Default)]
pub struct CheckpointVocabulary {
    extra: HashSet<String>,
}

impl CheckpointVocabulary {
    /// The built-in vocabulary with no additions.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Extend the built-in vocabulary. Empty and retired names are skipped.
    pub fn with_extra<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut extra = HashSet::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                continue;
            }
            if is_retired_checkpoint(&name) {
                tracing::warn!(checkpoint = %name, "refusing to reactivate retired checkpoint");
                continue;
            }
            if !is_valid_checkpoint(&name) {
                extra.insert(name);
            }
        }
        Self { extra }
    }

    pub fn contains(&self, name: &str) -> bool {
        is_valid_checkpoint(name) || self.extra.contains(name)
    }

    /// Total number of recognized names.
    pub fn len(&self) -> usize {
        builtin_set().len() + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_checkpoints_are_valid() {
        assert!(is_valid_checkpoint("click"));
        assert!(is_valid_checkpoint("cwv"));
        assert!(is_valid_checkpoint("404"));
        assert!(is_valid_checkpoint("sidekick:context-menu:addRemoveProject"));
    }

    #[test]
    fn unknown_checkpoints_are_rejected() {
        assert!(!is_valid_checkpoint("not-a-real-checkpoint"));
        assert!(!is_valid_checkpoint(""));
    }

    #[test]
    fn membership_is_exact_and_case_sensitive() {
        assert!(!is_valid_checkpoint("Click"));
        assert!(!is_valid_checkpoint("clic"));
        assert!(!is_valid_checkpoint("click "));
        assert!(!is_valid_checkpoint("sidekick:context-menu:addremoveproject"));
    }

    #[test]
    fn retired_checkpoints_are_unknown() {
        for name in RETIRED_CHECKPOINTS {
            assert!(!is_valid_checkpoint(name), "{name} should be retired");
        }
    }

    #[test]
    fn vocabulary_has_no_duplicates() {
        assert_eq!(builtin_set().len(), KNOWN_CHECKPOINTS.len());
    }

    #[test]
    fn extra_names_extend_vocabulary() {
        let vocab = CheckpointVocabulary::with_extra(["checkout", "click", ""]);
        assert!(vocab.contains("checkout"));
        assert!(vocab.contains("click"));
        assert!(!vocab.contains(""));
        assert_eq!(vocab.len(), KNOWN_CHECKPOINTS.len() + 1);
    }

    #[test]
    fn extra_names_cannot_reactivate_retired() {
        let vocab = CheckpointVocabulary::with_extra(["rfq", "pagesviewed"]);
        assert!(!vocab.contains("rfq"));
        assert!(!vocab.contains("pagesviewed"));
        assert_eq!(vocab.len(), KNOWN_CHECKPOINTS.len());
    }
}

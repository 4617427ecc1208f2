//! Fuzzy resolution of `--from` values to a [`TemplateTarget`].
//!
//! Users type things like `Node.js`, `nodejs`, `golang` or `py`. Each input is
//! scored against a fixed alias table by Levenshtein distance; the closest
//! alias wins and ties go to the alias listed first.

use tracing::debug;

use crate::domain::{error::DomainError, value_objects::TemplateTarget};

/// Inputs further than this from every alias are rejected.
pub const MAX_DISTANCE: usize = 7;

/// Accepted spellings, in tie-break order.
pub const TARGET_ALIASES: &[(&str, TemplateTarget)] = &[
    ("Node.js", TemplateTarget::Node),
    ("node", TemplateTarget::Node),
    ("Golang", TemplateTarget::Golang),
    ("Python", TemplateTarget::Python),
    ("Bash", TemplateTarget::Bash),
];

/// Resolve user input to the nearest known target.
pub fn resolve_target(from: &str) -> Result<TemplateTarget, DomainError> {
    let best = TARGET_ALIASES
        .iter()
        .map(|(alias, target)| (levenshtein(alias, from), *alias, *target))
        .fold(None::<(usize, &str, TemplateTarget)>, |best, cand| match best {
            Some(b) if b.0 <= cand.0 => Some(b),
            _ => Some(cand),
        });

    match best {
        Some((distance, alias, target)) if distance <= MAX_DISTANCE => {
            debug!(from, alias, distance, target = %target, "template target resolved");
            Ok(target)
        }
        _ => Err(DomainError::TemplateNotFound { from: from.into() }),
    }
}

/// Edit distance over `char`s (insert, delete, substitute all cost 1).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("node", "node"), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "bash"), 4);
        assert_eq!(levenshtein("Bash", "bash"), 1);
    }

    #[test]
    fn exact_aliases_resolve() {
        assert_eq!(resolve_target("node"), Ok(TemplateTarget::Node));
        assert_eq!(resolve_target("Node.js"), Ok(TemplateTarget::Node));
        assert_eq!(resolve_target("Golang"), Ok(TemplateTarget::Golang));
    }

    #[test]
    fn lowercase_and_typos_resolve() {
        assert_eq!(resolve_target("golang"), Ok(TemplateTarget::Golang));
        assert_eq!(resolve_target("python"), Ok(TemplateTarget::Python));
        assert_eq!(resolve_target("bash"), Ok(TemplateTarget::Bash));
        assert_eq!(resolve_target("nod"), Ok(TemplateTarget::Node));
        assert_eq!(resolve_target("pyhton"), Ok(TemplateTarget::Python));
    }

    #[test]
    fn far_input_is_not_found() {
        assert_eq!(
            resolve_target("not-a-template"),
            Err(DomainError::TemplateNotFound {
                from: "not-a-template".into()
            })
        );
    }
}

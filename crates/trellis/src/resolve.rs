//! Tag resolution against composite template names.
//!
//! A composite template `card-header-title` applies to a `title` tag whose
//! ancestors include `card` and then `header`, in that order but not
//! necessarily adjacent. Ancestor names may themselves contain the separator:
//! `card-header-title` also matches a `title` inside `card-header`.
//!
//! Among all matching entries the winner is the one with
//!
//! 1. the highest specificity,
//! 2. then a match on the ancestors directly above the tag,
//! 3. then the match that starts closest to the tag,
//! 4. then the lexicographically smaller name.

use std::cmp::Ordering;

use log::trace;

use crate::catalog::{TagEntry, TemplateCatalog};

/// How a composite entry matched the ancestor path.
#[derive(Debug)]
struct Match<'c> {
    entry: &'c TagEntry,
    /// The prefix groups sit on the ancestors right above the tag.
    contiguous: bool,
    /// Index of the outermost ancestor the match uses.
    start: usize,
}

impl Match<'_> {
    fn rank(&self, other: &Self) -> Ordering {
        self.entry
            .specificity()
            .cmp(&other.entry.specificity())
            .then(self.contiguous.cmp(&other.contiguous))
            .then(self.start.cmp(&other.start))
            .then_with(|| other.entry.name().cmp(self.entry.name()))
    }
}

fn joined(segments: &[String], separator: &str) -> String {
    segments.join(separator)
}

/// Match `segments` as consecutive groups against an ordered subsequence
/// of `ancestors`, trying the nearest ancestors first.
///
/// With `adjacent`, every group must sit directly above the next one and
/// the last group on the last ancestor. Returns the matched ancestor
/// indices, outermost first.
fn match_groups(
    segments: &[String],
    ancestors: &[String],
    separator: &str,
    adjacent: bool,
) -> Option<Vec<usize>> {
    if segments.is_empty() {
        return Some(Vec::new());
    }

    let lowest = if adjacent {
        ancestors.len().saturating_sub(1)
    } else {
        0
    };

    for index in (lowest..ancestors.len()).rev() {
        for size in 1..=segments.len() {
            let (rest, group) = segments.split_at(segments.len() - size);
            if joined(group, separator) != ancestors[index] {
                continue;
            }
            if let Some(mut indices) = match_groups(rest, &ancestors[..index], separator, adjacent)
            {
                indices.push(index);
                return Some(indices);
            }
        }
    }

    None
}

fn match_entry<'c>(entry: &'c TagEntry, path: &[String], separator: &str) -> Option<Match<'c>> {
    let (tag, ancestors) = path.split_last()?;
    let segments = entry.segments();

    // The tag takes a suffix of the segments; at least one must remain for
    // the ancestors, otherwise this is a plain name lookup.
    (1..segments.len())
        .filter(|&size| joined(&segments[segments.len() - size..], separator) == *tag)
        .find_map(|size| {
            let prefix = &segments[..segments.len() - size];
            match_groups(prefix, ancestors, separator, true)
                .map(|indices| (true, indices))
                .or_else(|| {
                    match_groups(prefix, ancestors, separator, false).map(|indices| (false, indices))
                })
                .map(|(contiguous, indices)| Match {
                    entry,
                    contiguous,
                    start: indices.first().copied().unwrap_or(ancestors.len()),
                })
        })
}

/// Pick the most specific composite template for the last tag of `path`.
///
/// `path` holds the tag names from the document root down to the current
/// tag, inclusive. Names are compared case-insensitively. Returns `None`
/// when no composite entry applies; plain names are the caller's fallback.
///
/// # Example
///
/// ```
/// # use trellis::{catalog::TemplateCatalog, resolve::resolve};
/// let catalog = TemplateCatalog::from_names(["card", "card-header", "card-header-title"], "-");
/// let path = ["Card", "Header", "Title"].map(String::from);
///
/// let entry = resolve(&path, &catalog).unwrap();
/// assert_eq!(entry.name(), "card-header-title");
/// ```
pub fn resolve<'c>(path: &[String], catalog: &'c TemplateCatalog) -> Option<&'c TagEntry> {
    let path: Vec<String> = path.iter().map(|name| name.to_lowercase()).collect();
    let separator = catalog.separator();

    let best = catalog
        .composites()
        .iter()
        .filter_map(|entry| match_entry(entry, &path, separator))
        .max_by(Match::rank)?;

    trace!(
        template = best.entry.name(),
        specificity = best.entry.specificity(),
        contiguous = best.contiguous;
        "Resolved composite template"
    );
    Some(best.entry)
}

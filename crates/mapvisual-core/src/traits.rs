// crates/mapvisual-core/src/traits.rs
use crate::model::Feature;
use crate::text::fold_key;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes accent-insensitive and case-insensitive
/// comparisons based on [`fold_key`]. Implementors provide a `&str` view of
/// their canonical name via [`NameMatch::name_str`], and get convenient helpers:
/// - [`NameMatch::is_named`]: equality on folded form
/// - [`NameMatch::name_starts_with`]: prefix match on folded form
///
/// # Examples
/// ```rust
/// use mapvisual_core::traits::NameMatch;
///
/// struct Region(&'static str);
/// impl NameMatch for Region {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Region("Jammu and Kashmir").is_named("JAMMU AND KASHMIR"));
/// assert!(Region("POK - Azad Kashmir").name_starts_with("pok - "));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Accent-insensitive and case-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        !self.name_str().is_empty() && fold_key(self.name_str()) == fold_key(q)
    }

    /// Accent-insensitive + case-insensitive prefix match.
    #[inline]
    fn name_starts_with(&self, prefix: &str) -> bool {
        !self.name_str().is_empty() && fold_key(self.name_str()).starts_with(&fold_key(prefix))
    }
}

impl NameMatch for Feature {
    /// Canonical name, or `""` for features that never resolved one.
    fn name_str(&self) -> &str {
        self.canonical_name().unwrap_or("")
    }
}

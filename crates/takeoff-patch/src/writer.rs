//! Provider registration in the bootstrap file.
//!
//! Provides functions to check, insert and remove `\Vendor\Provider::class`
//! entries in the provider list passed to the bootstrap call.

use regex::Regex;

use crate::scanner::{code_segments, find_call};

/// Indentation used for inserted list entries.
const INDENT: &str = "    ";

/// Result of a text patch. The engine never writes; callers persist
/// [`PatchOutcome::Patched`] content themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The text changed.
    Patched(String),
    /// The bootstrap call was not found; nothing was changed.
    AnchorNotFound,
    /// There was no provider line to remove; nothing was changed.
    NotRegistered,
}

impl PatchOutcome {
    /// The patched text, if any.
    pub fn into_patched(self) -> Option<String> {
        match self {
            Self::Patched(text) => Some(text),
            Self::AnchorNotFound | Self::NotRegistered => None,
        }
    }
}

/// Normalize a provider identifier to its bare namespace path.
///
/// Strips a leading namespace separator and a trailing `::class`.
fn bare_provider(provider: &str) -> &str {
    let provider = provider.trim();
    let provider = provider.strip_prefix('\\').unwrap_or(provider);
    provider.strip_suffix("::class").unwrap_or(provider)
}

/// The list entry written for `provider`, e.g. `\Foo\Provider::class`.
///
/// # Example
/// ```
/// use takeoff_patch::provider_reference;
///
/// assert_eq!(provider_reference("Foo\\Provider"), "\\Foo\\Provider::class");
/// assert_eq!(provider_reference("\\Foo\\Provider"), "\\Foo\\Provider::class");
/// ```
pub fn provider_reference(provider: &str) -> String {
    format!("\\{}::class", bare_provider(provider))
}

/// Checks whether `provider` is already listed in the bootstrap text.
///
/// A missing bootstrap file (`None`) counts as registered: there is nothing
/// to register into, and the install must not stall on it.
///
/// When the `anchor` call is present, only code inside its provider list
/// counts; commented-out entries do not. Without the call, the whole text is
/// searched.
///
/// The match tolerates a leading `\` and a trailing comma, and never matches
/// inside a longer namespace path.
///
/// # Example
/// ```
/// use takeoff_patch::is_registered;
///
/// let text = "AppBuilder::init(__DIR__, [\n    \\Foo\\Provider::class,\n]);";
/// assert!(is_registered(Some(text), "AppBuilder::init", "Foo\\Provider"));
/// assert!(!is_registered(Some(text), "AppBuilder::init", "Provider"));
/// assert!(is_registered(None, "AppBuilder::init", "Foo\\Provider"));
///
/// let commented = "AppBuilder::init(__DIR__, [\n    // \\Foo\\Provider::class,\n]);";
/// assert!(!is_registered(Some(commented), "AppBuilder::init", "Foo\\Provider"));
/// ```
pub fn is_registered(bootstrap: Option<&str>, anchor: &str, provider: &str) -> bool {
    let Some(text) = bootstrap else {
        return true;
    };
    let needle = format!("{}::class", bare_provider(provider));
    match find_call(text, anchor) {
        Some(call) => call.list_argument(text).is_some_and(|list| {
            code_segments(text, list)
                .into_iter()
                .any(|segment| contains_entry(&text[segment], &needle))
        }),
        None => contains_entry(text, &needle),
    }
}

fn contains_entry(text: &str, needle: &str) -> bool {
    text.match_indices(needle).any(|(pos, _)| {
        let before = text[..pos].strip_suffix('\\').unwrap_or(&text[..pos]);
        let after = &text[pos + needle.len()..];
        !ends_with_ident(before) && !starts_with_ident(after)
    })
}

/// Registers `provider` in the argument list of the `anchor` call.
///
/// - If the call already has a list literal argument, the entry becomes its
///   first element and the rest of the list is left untouched.
/// - Otherwise a new single-element list is appended as the last argument.
///
/// Returns [`PatchOutcome::AnchorNotFound`] when the call cannot be located.
///
/// # Example
/// ```
/// use takeoff_patch::{PatchOutcome, register};
///
/// let text = "AppBuilder::init(__DIR__ . '/../');";
/// let out = register(text, "AppBuilder::init", "Foo\\Provider");
/// assert_eq!(
///     out,
///     PatchOutcome::Patched(
///         "AppBuilder::init(__DIR__ . '/../', [\n    \\Foo\\Provider::class,\n]);".to_string()
///     )
/// );
/// ```
pub fn register(text: &str, anchor: &str, provider: &str) -> PatchOutcome {
    let Some(call) = find_call(text, anchor) else {
        return PatchOutcome::AnchorNotFound;
    };
    let entry = format!("{INDENT}{},", provider_reference(provider));

    let (at, insertion) = match call.list_argument(text) {
        Some(list) => {
            let inner = &text[list.start + 1..list.end - 1];
            if inner.trim().is_empty() {
                return PatchOutcome::Patched(splice(text, list, &format!("[\n{entry}\n]")));
            }
            (list.start + 1, format!("\n{entry}"))
        }
        None => match call.args.last() {
            None => (call.open + 1, format!("[\n{entry}\n]")),
            Some(last) if call.has_trailing_comma(text) => {
                let comma = last.end
                    + text[last.end..call.close]
                        .find(',')
                        .unwrap_or_default();
                (comma + 1, format!(" [\n{entry}\n]"))
            }
            Some(last) => (last.end, format!(", [\n{entry}\n]")),
        },
    };

    PatchOutcome::Patched(splice(text, at..at, &insertion))
}

/// Removes the entry of `provider` from the bootstrap text.
///
/// This is the inverse of [`register`]: the line break, indentation, entry
/// and trailing comma that `register` inserts are removed, and nothing else.
/// Only the first entry that starts its own line is removed, so an inline
/// entry such as `[\A::class, \B::class]` is left alone.
///
/// # Example
/// ```
/// use takeoff_patch::{PatchOutcome, unregister};
///
/// let text = "[\n    \\Foo\\Provider::class,\n    \\Bar::class,\n]";
/// assert_eq!(
///     unregister(text, "Foo\\Provider"),
///     PatchOutcome::Patched("[\n    \\Bar::class,\n]".to_string())
/// );
/// ```
pub fn unregister(text: &str, provider: &str) -> PatchOutcome {
    let pattern = format!(
        r"\r?\n[ \t]*\\?{}::class,",
        regex::escape(bare_provider(provider))
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!(provider, error = %e, "could not build provider entry pattern");
            return PatchOutcome::NotRegistered;
        }
    };

    match re.find(text) {
        Some(m) => PatchOutcome::Patched(splice(text, m.range(), "")),
        None => PatchOutcome::NotRegistered,
    }
}

fn splice(text: &str, range: std::ops::Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}

fn ends_with_ident(s: &str) -> bool {
    s.chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\\')
}

fn starts_with_ident(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

//! Display name validation mirroring the backend's constraints.
//!
//! Generated users must carry names the backend will accept, so the same
//! character set and length bounds are enforced here at generation time.

/// Minimum display name length in characters.
pub const DISPLAY_NAME_MIN: usize = 3;

/// Maximum display name length in characters.
pub const DISPLAY_NAME_MAX: usize = 32;

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '_'
}

/// Checks whether a display name satisfies the backend's rules.
///
/// A valid name is 3 to 32 characters of ASCII alphanumerics, spaces, and
/// underscores, and is not blank.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_display_name;
///
/// assert!(is_valid_display_name("Alice Example"));
/// assert!(!is_valid_display_name("ab"));
/// assert!(!is_valid_display_name("   "));
/// ```
#[must_use]
pub fn is_valid_display_name(name: &str) -> bool {
    let length = name.chars().count();
    if !(DISPLAY_NAME_MIN..=DISPLAY_NAME_MAX).contains(&length) {
        return false;
    }
    if name.trim().is_empty() {
        return false;
    }
    name.chars().all(is_allowed_char)
}

/// Replaces disallowed characters with underscores.
///
/// The result may still fail validation on length or blankness; callers
/// re-check with [`is_valid_display_name`].
#[must_use]
pub(crate) fn sanitize_display_name(name: &str) -> String {
    name.chars()
        .map(|c| if is_allowed_char(c) { c } else { '_' })
        .collect()
}

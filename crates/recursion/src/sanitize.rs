use std::borrow::Cow;

const INVALID: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces characters that cannot appear in a file name with `replacement`.
///
/// Path separators, the reserved characters `: * ? " < > |` and control
/// characters are replaced. Names without any of them are borrowed.
pub fn sanitize_name(name: &str, replacement: char) -> Cow<'_, str> {
    let invalid = |c: char| INVALID.contains(&c) || c.is_control();
    if !name.contains(invalid) {
        return Cow::Borrowed(name);
    }
    Cow::Owned(
        name.chars()
            .map(|c| if invalid(c) { replacement } else { c })
            .collect(),
    )
}

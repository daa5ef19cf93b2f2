//! Assertions for rendered HTML.

/// Normalizes line endings so fixtures written on any platform compare equal.
fn normalize(html: &str) -> String {
    html.replace("\r\n", "\n").replace('\r', "\n")
}

/// Asserts that two HTML fragments are equal, ignoring line-ending style.
///
/// # Panics
///
/// Panics with both fragments if they differ.
pub fn assert_html_eq(actual: &str, expected: &str) {
    let actual = normalize(actual);
    let expected = normalize(expected);
    assert!(
        actual == expected,
        "HTML does not match.\nExpected:\n{expected}\nActual:\n{actual}"
    );
}

/// Asserts that `html` contains `fragment`.
///
/// # Panics
///
/// Panics if the fragment is missing.
pub fn assert_html_contains(html: &str, fragment: &str) {
    let html = normalize(html);
    let fragment = normalize(fragment);
    assert!(
        html.contains(&fragment),
        "HTML does not contain '{fragment}'.\nActual HTML:\n{html}"
    );
}

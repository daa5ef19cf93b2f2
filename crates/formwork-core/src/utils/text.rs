//! String utility functions.
//!
//! Used to derive human-readable labels from attribute names.

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use formwork_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// assert_eq!(capfirst("HELLO"), "HELLO");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Splits an identifier into lowercase words.
///
/// Underscores, dashes and dots become word breaks, and camel-case
/// boundaries start a new word. A run of capitals stays together unless the
/// last capital begins a lowercase word (`HTMLParser` → `html parser`).
///
/// # Examples
///
/// ```
/// use formwork_core::utils::text::to_words;
///
/// assert_eq!(to_words("department_name"), "department name");
/// assert_eq!(to_words("rememberMe"), "remember me");
/// assert_eq!(to_words("HTMLParser"), "html parser");
/// ```
pub fn to_words(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut spaced = String::with_capacity(s.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if !prev_upper || next_lower {
                spaced.push(' ');
            }
        }
        match c {
            '_' | '-' | '.' => spaced.push(' '),
            _ => spaced.push(c),
        }
    }

    spaced
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generates a user-friendly label from an attribute name.
///
/// Words are split as in [`to_words`] and the first letter of each word is
/// upper-cased.
///
/// # Examples
///
/// ```
/// use formwork_core::utils::text::humanize;
///
/// assert_eq!(humanize("department_name"), "Department Name");
/// assert_eq!(humanize("DepartmentName"), "Department Name");
/// assert_eq!(humanize("testme"), "Testme");
/// ```
pub fn humanize(s: &str) -> String {
    to_words(s)
        .split(' ')
        .map(capfirst)
        .collect::<Vec<_>>()
        .join(" ")
}

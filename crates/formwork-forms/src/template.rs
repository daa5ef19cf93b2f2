//! Field templates.
//!
//! A template is plain text with the placeholders `{label}`, `{input}`,
//! `{hint}` and `{error}`. Each is replaced once, in a single pass, so a
//! rendered part containing a placeholder is not expanded again. Template
//! lines left empty by missing parts are dropped; the rendered parts
//! themselves are never altered.

/// The template used when a theme does not set one.
pub const DEFAULT_TEMPLATE: &str = "{label}\n{input}\n{hint}\n{error}";

/// Rendered parts of one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateParts<'a> {
    /// The rendered label.
    pub label: &'a str,
    /// The rendered input.
    pub input: &'a str,
    /// The rendered hint.
    pub hint: &'a str,
    /// The rendered error.
    pub error: &'a str,
}

impl<'a> TemplateParts<'a> {
    fn lookup(&self, token: &str) -> Option<&'a str> {
        match token {
            "{label}" => Some(self.label),
            "{input}" => Some(self.input),
            "{hint}" => Some(self.hint),
            "{error}" => Some(self.error),
            _ => None,
        }
    }
}

/// Splits `text` into `(line, terminator)` pairs, accepting `\n`, `\r\n`
/// and `\r` as terminators. The last terminator may be empty.
fn lines_with_endings(text: &str) -> Vec<(&str, &str)> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(['\n', '\r']) {
        let len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        lines.push((&rest[..pos], &rest[pos..pos + len]));
        rest = &rest[pos + len..];
    }
    if !rest.is_empty() {
        lines.push((rest, ""));
    }
    lines
}

fn substitute(line: &str, parts: &TemplateParts<'_>, out: &mut String) {
    let mut rest = line;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let replaced = candidate
            .find('}')
            .map(|end| &candidate[..=end])
            .and_then(|token| parts.lookup(token).map(|text| (token.len(), text)));

        match replaced {
            Some((len, text)) => {
                out.push_str(text);
                rest = &candidate[len..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
}

/// Fills `template` with `parts`, drops the template lines that rendered
/// blank, and trims the result.
///
/// Unknown `{...}` tokens are kept verbatim.
///
/// # Examples
///
/// ```
/// use formwork_forms::template::{render, TemplateParts, DEFAULT_TEMPLATE};
///
/// let html = render(
///     DEFAULT_TEMPLATE,
///     &TemplateParts { label: "<label>Job</label>", input: "<input>", ..Default::default() },
/// );
/// assert_eq!(html, "<label>Job</label>\n<input>");
/// ```
pub fn render(template: &str, parts: &TemplateParts<'_>) -> String {
    let mut out = String::with_capacity(template.len() + parts.input.len() + 64);

    for (line, ending) in lines_with_endings(template) {
        let start = out.len();
        substitute(line, parts, &mut out);
        if out[start..].trim().is_empty() && !line.trim().is_empty() {
            out.truncate(start);
            continue;
        }
        out.push_str(ending);
    }

    out.trim().to_string()
}

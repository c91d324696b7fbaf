//! `{{placeholder}}` substitution for rule message templates.

use std::collections::BTreeMap;

/// Renders `template`, replacing each `{{ name }}` with `data[name]`.
///
/// Whitespace inside the braces is ignored. Placeholders with no entry in
/// `data`, and unterminated `{{`, are left in the output verbatim.
pub fn render_template(template: &str, data: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = after[..close].trim();
        match data.get(key) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    #[case("Found {{count}} components: {{names}}.", "Found 2 components: A, B.")]
    #[case("Rename to '{{ suggestion }}'", "Rename to 'isOpen'")]
    #[case("no placeholders", "no placeholders")]
    #[case("{{missing}} stays", "{{missing}} stays")]
    #[case("dangling {{count", "dangling {{count")]
    fn renders(#[case] template: &str, #[case] expected: &str) {
        let d = data(&[
            ("count", "2"),
            ("names", "A, B"),
            ("suggestion", "isOpen"),
        ]);
        assert_eq!(render_template(template, &d), expected);
    }
}

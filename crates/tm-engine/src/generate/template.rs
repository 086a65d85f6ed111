//! Prompt placeholder substitution.

/// Replace `{{name}}` placeholders in `template` with the paired values.
///
/// Unknown placeholders are left in place so a typo in a stored template
/// shows up verbatim in the prompt instead of vanishing silently.
pub fn fill_template(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in pairs {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

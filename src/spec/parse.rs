//! Parsing and lookup of configobj-style configuration specifications.
//!
//! The host screen reader describes its settings with lines such as:
//!
//! ```text
//! [speech]
//!     [[espeak]]
//!         rate = integer(0, 100, default=50)
//!         voice = string(default="en")
//! ```
//!
//! Section headers nest by bracket count. For `integer` and `float` keys the
//! first two positional arguments are the minimum and maximum; `min=`, `max=`
//! and `default=` keyword arguments work for every type. A `#` outside quotes
//! starts a comment that runs to the end of the line.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{SpecEntry, SpecError, SpecSource};

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\[+)\s*([^\[\]]+?)\s*(\]+)$").expect("static regex must compile")
});
static KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^=\s]+)\s*=\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?:\((.*)\))?$")
        .expect("static regex must compile")
});

const NUMERIC_TYPES: &[&str] = &["integer", "float"];

/// A parsed configuration specification.
#[derive(Debug, Clone, Default)]
pub struct ConfigSpec {
    entries: Vec<SpecEntry>,
}

impl ConfigSpec {
    /// Parses specification text.
    ///
    /// ```
    /// use addon_config_helper::spec::{ConfigSpec, SpecSource};
    ///
    /// let spec = ConfigSpec::parse("[sound]\nvolume = integer(0, 100, default=50)\n")?;
    /// let entry = spec.resolve("volume")?;
    /// assert_eq!(entry.max.as_deref(), Some("100"));
    /// # Ok::<(), addon_config_helper::SpecError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        let mut sections: Vec<String> = Vec::new();
        let mut entries: Vec<SpecEntry> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = SECTION_RE.captures(line) {
                let depth = caps[1].len();
                if caps[3].len() != depth {
                    return Err(parse_error(line_no, "unbalanced section brackets"));
                }
                if depth > sections.len() + 1 {
                    return Err(parse_error(
                        line_no,
                        format!("section '{}' is nested too deeply", &caps[2]),
                    ));
                }
                sections.truncate(depth - 1);
                sections.push(caps[2].to_string());
                continue;
            }

            let Some(caps) = KEY_RE.captures(line) else {
                return Err(parse_error(line_no, format!("unrecognised line: {line}")));
            };

            let mut path = sections.clone();
            path.push(caps[1].to_string());
            if entries.iter().any(|e| e.path == path) {
                return Err(parse_error(
                    line_no,
                    format!("duplicate key '{}'", path.join(".")),
                ));
            }

            let mut entry = SpecEntry::new(path, &caps[2]);
            if let Some(args) = caps.get(3) {
                apply_args(&mut entry, args.as_str());
            }
            entries.push(entry);
        }

        debug!(entries = entries.len(), "parsed configuration specification");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SpecEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SpecSource for ConfigSpec {
    /// Resolves a full or partial dotted reference.
    ///
    /// An exact full-path match wins. Otherwise the reference matches every
    /// entry whose path ends with the same segments, and must match exactly
    /// one of them.
    fn resolve(&self, reference: &str) -> Result<SpecEntry, SpecError> {
        let segments: Vec<&str> = reference.split('.').map(str::trim).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(SpecError::InvalidReference(reference.to_string()));
        }

        if let Some(exact) = self.entries.iter().find(|e| e.path == segments) {
            return Ok(exact.clone());
        }

        let mut matches = self.entries.iter().filter(|e| ends_with(&e.path, &segments));
        match (matches.next(), matches.next()) {
            (None, _) => Err(SpecError::NotFound(reference.to_string())),
            (Some(entry), None) => Ok(entry.clone()),
            (Some(first), Some(second)) => {
                let candidates = [first, second]
                    .into_iter()
                    .chain(matches)
                    .map(SpecEntry::dotted_path)
                    .collect();
                Err(SpecError::Ambiguous {
                    reference: reference.to_string(),
                    candidates,
                })
            }
        }
    }
}

fn ends_with(path: &[String], segments: &[&str]) -> bool {
    path.len() >= segments.len()
        && path[path.len() - segments.len()..]
            .iter()
            .zip(segments)
            .all(|(key, segment)| key == segment)
}

fn parse_error(line: usize, message: impl Into<String>) -> SpecError {
    SpecError::Parse {
        line,
        message: message.into(),
    }
}

fn apply_args(entry: &mut SpecEntry, args: &str) {
    let numeric = NUMERIC_TYPES.contains(&entry.value_type.as_str());
    let mut positional = 0;

    for arg in split_args(args) {
        match keyword_arg(&arg) {
            Some((name, value)) => {
                let value = Some(unquote(value).to_string());
                match name {
                    "min" => entry.min = value,
                    "max" => entry.max = value,
                    "default" => entry.default = value,
                    _ => {}
                }
            }
            None => {
                if numeric {
                    let value = Some(unquote(&arg).to_string());
                    match positional {
                        0 => entry.min = entry.min.take().or(value),
                        1 => entry.max = entry.max.take().or(value),
                        _ => {}
                    }
                }
                positional += 1;
            }
        }
    }
}

/// Cuts a line at the first `#` that is not inside a quoted string.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (i, ch) in line.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '#') => return &line[..i],
            (None, _) => {}
        }
    }
    line
}

/// Splits an argument list on commas that sit outside quotes and parentheses.
fn split_args(args: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for ch in args.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '(') => {
                depth += 1;
                current.push(ch);
            }
            (None, ')') => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            (None, ',') if depth == 0 => {
                out.push(std::mem::take(&mut current));
            }
            (None, c) => current.push(c),
        }
    }
    out.push(current);

    out.into_iter()
        .map(|arg| arg.trim().to_string())
        .filter(|arg| !arg.is_empty())
        .collect()
}

fn keyword_arg(arg: &str) -> Option<(&str, &str)> {
    if arg.starts_with(['"', '\'']) {
        return None;
    }
    let (name, value) = arg.split_once('=')?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((name, value.trim()))
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    const NVDA_SPEC: &str = r#"
# Speech and braille settings
[speech]
    symbolLevel = integer(default=100)
    synth = string(default=auto)
    [[espeak]]
        rate = integer(0, 100, default=50)
        voice = string(default="en")
    [[oneCore]]
        rate = integer(min=0, max=100, default=50)
[braille]
    cursorBlinkRate = integer(default=500, min=200, max=2000)
    messageTimeout = float(0.0, 20.0, default=4.0)
    tetherTo = option("focus", "review", "auto", default="auto")
[keyboard]
    useCapsLockAsNVDAModifierKey = boolean(default=false)
    speakTypedCharacters = boolean
"#;

    fn make_spec() -> ConfigSpec {
        ConfigSpec::parse(NVDA_SPEC).unwrap()
    }

    #[test]
    fn test_parses_nested_sections() {
        let spec = make_spec();
        let paths: Vec<String> = spec.entries().iter().map(SpecEntry::dotted_path).collect();

        assert!(paths.contains(&"speech.espeak.rate".to_string()));
        assert!(paths.contains(&"speech.oneCore.rate".to_string()));
        assert!(paths.contains(&"braille.cursorBlinkRate".to_string()));
        assert_eq!(spec.len(), 10);
    }

    #[test]
    fn test_positional_min_max_for_numeric() {
        let spec = make_spec();
        let entry = spec.resolve("speech.espeak.rate").unwrap();

        assert_eq!(entry.value_type, "integer");
        assert_eq!(entry.min.as_deref(), Some("0"));
        assert_eq!(entry.max.as_deref(), Some("100"));
        assert_eq!(entry.default.as_deref(), Some("50"));
    }

    #[test]
    fn test_keyword_min_max() {
        let entry = make_spec().resolve("cursorBlinkRate").unwrap();
        assert_eq!(entry.min.as_deref(), Some("200"));
        assert_eq!(entry.max.as_deref(), Some("2000"));
        assert_eq!(entry.default.as_deref(), Some("500"));
    }

    #[test]
    fn test_option_positionals_are_not_bounds() {
        let entry = make_spec().resolve("tetherTo").unwrap();
        assert_eq!(entry.value_type, "option");
        assert_eq!(entry.min, None);
        assert_eq!(entry.max, None);
        assert_eq!(entry.default.as_deref(), Some("auto"));
    }

    #[test]
    fn test_quoted_default_is_unquoted() {
        let entry = make_spec().resolve("voice").unwrap();
        assert_eq!(entry.default.as_deref(), Some("en"));
    }

    #[test]
    fn test_bare_type_without_args() {
        let entry = make_spec().resolve("speakTypedCharacters").unwrap();
        assert_eq!(entry.value_type, "boolean");
        assert_eq!(entry.default, None);
    }

    #[test]
    fn test_partial_reference_resolves_unique_suffix() {
        let entry = make_spec().resolve("espeak.rate").unwrap();
        assert_eq!(entry.dotted_path(), "speech.espeak.rate");
    }

    #[test]
    fn test_ambiguous_reference_lists_candidates() {
        let result = make_spec().resolve("rate");
        match result {
            Err(SpecError::Ambiguous { reference, candidates }) => {
                assert_eq!(reference, "rate");
                assert_eq!(candidates, vec!["speech.espeak.rate", "speech.oneCore.rate"]);
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_path_beats_suffix() {
        let spec = ConfigSpec::parse(
            r#"
            rate = integer(default=1)
            [speech]
                rate = integer(default=2)
            "#,
        )
        .unwrap();

        assert_eq!(spec.resolve("rate").unwrap().default.as_deref(), Some("1"));
        assert_eq!(spec.resolve("speech.rate").unwrap().default.as_deref(), Some("2"));
    }

    #[test]
    fn test_not_found() {
        let result = make_spec().resolve("speech.pitch");
        assert!(matches!(result, Err(SpecError::NotFound(ref r)) if r == "speech.pitch"));
    }

    #[test]
    fn test_invalid_reference() {
        let spec = make_spec();
        assert!(matches!(spec.resolve(""), Err(SpecError::InvalidReference(_))));
        assert!(matches!(spec.resolve("speech..rate"), Err(SpecError::InvalidReference(_))));
    }

    #[test]
    fn test_unbalanced_section_brackets() {
        let result = ConfigSpec::parse("[[speech]\n");
        assert!(matches!(result, Err(SpecError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_section_skipping_a_level() {
        let result = ConfigSpec::parse("[speech]\n[[[espeak]]]\n");
        assert!(matches!(result, Err(SpecError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_duplicate_key() {
        let result = ConfigSpec::parse("[sound]\nvolume = integer\nvolume = integer\n");
        assert!(matches!(result, Err(SpecError::Parse { line: 3, .. })));
    }

    #[test]
    fn test_unrecognised_line() {
        let result = ConfigSpec::parse("[sound]\nthis is not a spec line\n");
        assert!(matches!(result, Err(SpecError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_trailing_comment_and_quoted_comma() {
        let spec = ConfigSpec::parse(
            "greeting = string(default=\"hello, world\")  # shown at startup\n",
        )
        .unwrap();
        let entry = spec.resolve("greeting").unwrap();
        assert_eq!(entry.default.as_deref(), Some("hello, world"));
    }

    #[test]
    fn test_trailing_comment_with_parens_is_not_an_argument() {
        let spec =
            ConfigSpec::parse("rate = integer(0, 100, default=50)  # range (percent)\n").unwrap();
        let entry = spec.resolve("rate").unwrap();
        assert_eq!(entry.max.as_deref(), Some("100"));
        assert_eq!(entry.default.as_deref(), Some("50"));
    }

    #[test]
    fn test_hash_inside_quotes_is_kept() {
        let spec = ConfigSpec::parse("color = string(default=\"#ff0000\")  # red\n").unwrap();
        let entry = spec.resolve("color").unwrap();
        assert_eq!(entry.default.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_section_header_with_trailing_comment() {
        let spec = ConfigSpec::parse(
            r#"
            [speech]  # speech settings
                [[espeak]]  # synth specific
                    rate = integer(0, 100)
            "#,
        )
        .unwrap();
        let entry = spec.resolve("speech.espeak.rate").unwrap();
        assert_eq!(entry.min.as_deref(), Some("0"));
    }

    #[test]
    fn test_sibling_sections_reset_path() {
        let spec = make_spec();
        let entry = spec.resolve("keyboard.speakTypedCharacters").unwrap();
        assert_eq!(entry.path, vec!["keyboard", "speakTypedCharacters"]);
    }
}

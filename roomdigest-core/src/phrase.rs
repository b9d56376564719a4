use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]*)\}").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<P> {
    Literal(String),
    Placeholder(P),
}

// Err carries the first placeholder name `resolve` rejected.
pub(crate) fn parse_segments<P>(
    pattern: &str,
    resolve: impl Fn(&str) -> Option<P>,
) -> std::result::Result<Vec<Segment<P>>, String> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for captures in PLACEHOLDER_RE.captures_iter(pattern) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let name = captures.get(1).map_or("", |m| m.as_str());
        let placeholder = resolve(name).ok_or_else(|| name.to_string())?;

        if whole.start() > cursor {
            segments.push(Segment::Literal(pattern[cursor..whole.start()].to_string()));
        }
        segments.push(Segment::Placeholder(placeholder));
        cursor = whole.end();
    }

    if cursor < pattern.len() {
        segments.push(Segment::Literal(pattern[cursor..].to_string()));
    }

    Ok(segments)
}

pub(crate) fn render_segments<'v, P>(
    segments: &[Segment<P>],
    value: impl Fn(&P) -> &'v str,
) -> String {
    let mut output = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Placeholder(placeholder) => output.push_str(value(placeholder)),
        }
    }
    output
}

// `fr-CA` and `fr_FR` fall back to `fr`.
pub(crate) fn lookup_locale<'a, T>(table: &'a [(&'static str, T)], locale: &str) -> Option<&'a T> {
    let normalized = locale.trim().to_ascii_lowercase().replace('_', "-");
    let language = normalized.split('-').next().unwrap_or_default();

    table
        .iter()
        .find(|(tag, _)| *tag == normalized)
        .or_else(|| table.iter().find(|(tag, _)| *tag == language))
        .map(|(_, entry)| entry)
}

pub(crate) fn supported_tags<T>(table: &[(&'static str, T)]) -> String {
    table
        .iter()
        .map(|(tag, _)| *tag)
        .collect::<Vec<_>>()
        .join(", ")
}

use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

const KNOWN_PARAMS: [&str; 4] = ["text", "key", "to", "mode"];

/// Shape of a successful response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The first translation entry only.
    Simple,
    /// The full list of translation entries.
    #[default]
    Json,
    /// Any other value. Accepted here, rejected by the gateway.
    Other(String),
}

impl OutputMode {
    /// Case-insensitive parse; unknown values are kept as `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "simple" => OutputMode::Simple,
            "json" => OutputMode::Json,
            _ => OutputMode::Other(raw.to_string()),
        }
    }
}

/// A query that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub api_key: String,
    pub target_language: String,
    pub output_mode: OutputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Required,
    Empty,
    /// The parameter was given more than once.
    NotAString,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub kind: ValidationKind,
}

impl ValidationError {
    fn new(field: &str, kind: ValidationKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValidationKind::Required => write!(f, "\"{}\" is required", self.field),
            ValidationKind::Empty => write!(f, "\"{}\" is not allowed to be empty", self.field),
            ValidationKind::NotAString => write!(f, "\"{}\" must be a string", self.field),
            ValidationKind::Unknown => write!(f, "\"{}\" is not allowed", self.field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate raw query pairs into a [`TranslationRequest`].
///
/// Fields are checked in the order text, key, to, mode, then unknown
/// parameters by name; the first failure wins. `mode` is not restricted
/// here: unrecognised values come through as [`OutputMode::Other`].
pub fn validate_query(pairs: &[(String, String)]) -> Result<TranslationRequest, ValidationError> {
    let mut query: HashMap<&str, &str> = HashMap::with_capacity(pairs.len());
    let mut repeated: Vec<&str> = Vec::new();
    for (name, value) in pairs {
        if query.insert(name.as_str(), value.as_str()).is_some() {
            repeated.push(name.as_str());
        }
    }

    let text = required(&query, &repeated, "text")?;
    let api_key = required(&query, &repeated, "key")?;
    let target_language = optional(&query, &repeated, "to")?
        .unwrap_or(DEFAULT_TARGET_LANGUAGE)
        .to_string();
    let output_mode = optional(&query, &repeated, "mode")?
        .map(OutputMode::parse)
        .unwrap_or_default();

    let mut unknown: Vec<&str> = query
        .keys()
        .copied()
        .filter(|name| !KNOWN_PARAMS.contains(name))
        .collect();
    unknown.sort_unstable();
    if let Some(name) = unknown.first() {
        return Err(ValidationError::new(name, ValidationKind::Unknown));
    }

    Ok(TranslationRequest {
        text: text.to_string(),
        api_key: api_key.to_string(),
        target_language,
        output_mode,
    })
}

fn required<'a>(
    query: &HashMap<&str, &'a str>,
    repeated: &[&str],
    field: &str,
) -> Result<&'a str, ValidationError> {
    optional(query, repeated, field)?
        .ok_or_else(|| ValidationError::new(field, ValidationKind::Required))
}

fn optional<'a>(
    query: &HashMap<&str, &'a str>,
    repeated: &[&str],
    field: &str,
) -> Result<Option<&'a str>, ValidationError> {
    if repeated.contains(&field) {
        return Err(ValidationError::new(field, ValidationKind::NotAString));
    }
    match query.get(field).copied() {
        None => Ok(None),
        Some("") => Err(ValidationError::new(field, ValidationKind::Empty)),
        Some(value) => Ok(Some(value)),
    }
}

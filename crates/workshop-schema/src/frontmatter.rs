//! # Frontmatter Extraction
//!
//! Step pages are MDX files whose metadata sits in a YAML block at the
//! very top, fenced by `---` lines:
//!
//! ```text
//! ---
//! id: step0-setup
//! tag: v0-setup
//! ---
//! # Bootstrap & Build
//! ```
//!
//! A document without a fence has empty frontmatter, which the schema then
//! reports field by field. An opening fence without a closing one is an
//! error.

use serde_json::Value;

use crate::schema::ContentValidationError;

/// A document split into its frontmatter text and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// YAML between the fences, if the document has a fenced block.
    pub frontmatter: Option<&'a str>,
    /// Everything after the closing fence.
    pub body: &'a str,
}

/// Split a document into frontmatter and body.
///
/// # Errors
///
/// Returns `ContentValidationError::Frontmatter` if the opening fence is
/// never closed.
pub fn split(text: &str) -> Result<SplitDocument<'_>, ContentValidationError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let opens = lines.next().is_some_and(|first| first.trim_end() == "---");
    if !opens {
        return Ok(SplitDocument {
            frontmatter: None,
            body: text,
        });
    }

    let start = text.find('\n').map_or(text.len(), |i| i + 1);
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Ok(SplitDocument {
                frontmatter: Some(&text[start..offset]),
                body: &text[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    Err(ContentValidationError::Frontmatter(
        "opening '---' fence is never closed".to_string(),
    ))
}

/// Parse the frontmatter of a document into a JSON value for schema
/// validation, returning it with the body.
///
/// Missing or empty frontmatter yields an empty object.
pub fn parse(text: &str) -> Result<(Value, &str), ContentValidationError> {
    let doc = split(text)?;
    let Some(yaml) = doc.frontmatter else {
        return Ok((Value::Object(serde_json::Map::new()), doc.body));
    };

    let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml)
        .map_err(|e| ContentValidationError::Frontmatter(format!("invalid YAML: {e}")))?;

    let value = match yaml_value {
        serde_yaml::Value::Null => Value::Object(serde_json::Map::new()),
        other => yaml_to_json_value(&other).map_err(ContentValidationError::Frontmatter)?,
    };
    Ok((value, doc.body))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Frontmatter uses the JSON-compatible subset of YAML. Core tags such as
/// `!!str` are resolved by `serde_yaml` before this point, so any tag left
/// is application-specific and rejected rather than silently unwrapped.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent {f} as a JSON number"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => Err(format!("unsupported YAML tag: {}", tagged.tag)),
    }
}

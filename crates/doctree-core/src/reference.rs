//! Reference signatures such as `java.base/java.util.List#add(int, E)`
//!
//! Only the syntax is checked here. Resolving the pieces against real
//! declarations is left to whoever consumes the tree.

use serde::Serialize;
use thiserror::Error;

/// Failure to split a signature into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("reference is empty")]
    Empty,

    #[error("missing module name before '/'")]
    EmptyModule,

    #[error("invalid identifier '{text}' at offset {offset}")]
    InvalidIdentifier { text: String, offset: usize },

    #[error("unbalanced parentheses at offset {offset}")]
    UnbalancedParentheses { offset: usize },

    #[error("unexpected text after parameter list at offset {offset}")]
    TrailingText { offset: usize },

    #[error("empty parameter type at position {index}")]
    EmptyParameter { index: usize },
}

/// Parsed components of a reference.
///
/// `params` is `None` when the signature has no parameter list at all and
/// `Some(vec![])` for an explicit `()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceParts {
    pub module: Option<String>,
    pub qualifier: Option<String>,
    pub member: Option<String>,
    pub params: Option<Vec<String>>,
}

/// Turns a reference signature into its components.
pub trait ReferenceParser {
    fn parse(&self, signature: &str) -> Result<ReferenceParts, ReferenceError>;
}

/// The grammar `[module/][qualifier][#member[(params)]]`.
///
/// A parameter list without `#` is read as a member of the enclosing type,
/// so `equals(Object)` works the same as `#equals(Object)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureParser;

impl SignatureParser {
    pub fn new() -> Self {
        Self
    }
}

impl ReferenceParser for SignatureParser {
    fn parse(&self, signature: &str) -> Result<ReferenceParts, ReferenceError> {
        let sig = signature.trim();
        if sig.is_empty() {
            return Err(ReferenceError::Empty);
        }
        let base = signature.len() - signature.trim_start().len();

        let hash = sig.find('#');
        let paren_search_from = hash.map_or(0, |h| h + 1);
        let lparen = sig[paren_search_from..]
            .find('(')
            .map(|p| p + paren_search_from);

        // A '/' only introduces a module when it comes before anything else.
        let head_end = hash.or(lparen).unwrap_or(sig.len());
        let (module, qual_start) = match sig[..head_end].find('/') {
            Some(0) => return Err(ReferenceError::EmptyModule),
            Some(slash) => {
                let name = &sig[..slash];
                check_dotted(name, base)?;
                (Some(name.to_string()), slash + 1)
            }
            None => (None, 0),
        };

        let mut parts = ReferenceParts {
            module,
            ..ReferenceParts::default()
        };

        let member_start = match (hash, lparen) {
            (Some(h), _) => {
                parts.qualifier = non_empty(&sig[qual_start..h], base + qual_start)?;
                Some(h + 1)
            }
            (None, Some(_)) => Some(qual_start),
            (None, None) => {
                parts.qualifier = non_empty(&sig[qual_start..], base + qual_start)?;
                None
            }
        };

        if let Some(start) = member_start {
            let member_end = lparen.unwrap_or(sig.len());
            let member = &sig[start..member_end];
            if !member.is_empty() {
                check_identifier(member, base + start)?;
                parts.member = Some(member.to_string());
            } else if lparen.is_some() || hash.is_some() {
                return Err(ReferenceError::InvalidIdentifier {
                    text: String::new(),
                    offset: base + start,
                });
            }
        }

        if let Some(open) = lparen {
            parts.params = Some(parse_params(sig, open, base)?);
        } else if let Some(close) = sig.find(')') {
            return Err(ReferenceError::UnbalancedParentheses {
                offset: base + close,
            });
        }

        Ok(parts)
    }
}

fn non_empty(text: &str, offset: usize) -> Result<Option<String>, ReferenceError> {
    if text.is_empty() {
        return Ok(None);
    }
    check_type(text, offset)?;
    Ok(Some(text.to_string()))
}

fn parse_params(sig: &str, open: usize, base: usize) -> Result<Vec<String>, ReferenceError> {
    let mut depth = 0usize;
    let mut close = None;
    for (i, ch) in sig[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close.ok_or(ReferenceError::UnbalancedParentheses { offset: base + open })?;
    if close + 1 != sig.len() {
        return Err(ReferenceError::TrailingText {
            offset: base + close + 1,
        });
    }

    let inner = sig[open + 1..close].trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    // Commas inside type arguments do not separate parameters.
    let mut params = Vec::new();
    let mut angle = 0usize;
    let mut current = String::new();
    for ch in inner.chars() {
        match ch {
            '<' => {
                angle += 1;
                current.push(ch);
            }
            '>' => {
                angle = angle.saturating_sub(1);
                current.push(ch);
            }
            ',' if angle == 0 => {
                params.push(finish_param(&current, params.len())?);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    params.push(finish_param(&current, params.len())?);
    Ok(params)
}

fn finish_param(text: &str, index: usize) -> Result<String, ReferenceError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ReferenceError::EmptyParameter { index });
    }
    Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// A type name: dotted identifiers optionally followed by type arguments.
fn check_type(text: &str, offset: usize) -> Result<(), ReferenceError> {
    let name_end = text.find('<').unwrap_or(text.len());
    check_dotted(&text[..name_end], offset)?;
    if name_end < text.len() && !text.ends_with('>') {
        return Err(ReferenceError::InvalidIdentifier {
            text: text.to_string(),
            offset,
        });
    }
    Ok(())
}

fn check_dotted(text: &str, offset: usize) -> Result<(), ReferenceError> {
    let mut at = offset;
    for segment in text.split('.') {
        check_identifier(segment, at)?;
        at += segment.len() + 1;
    }
    Ok(())
}

fn check_identifier(text: &str, offset: usize) -> Result<(), ReferenceError> {
    let mut chars = text.chars();
    let valid = match chars.next() {
        Some(first) => {
            is_identifier_start(first) && chars.all(|c| is_identifier_start(c) || c.is_numeric())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ReferenceError::InvalidIdentifier {
            text: text.to_string(),
            offset,
        })
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sig: &str) -> Result<ReferenceParts, ReferenceError> {
        SignatureParser::new().parse(sig)
    }

    #[test]
    fn plain_type() {
        let parts = parse("java.util.List").unwrap();
        assert_eq!(parts.qualifier.as_deref(), Some("java.util.List"));
        assert_eq!(parts.member, None);
        assert_eq!(parts.params, None);
    }

    #[test]
    fn module_qualifier_member_params() {
        let parts = parse("java.base/java.util.Map#put(K, V)").unwrap();
        assert_eq!(parts.module.as_deref(), Some("java.base"));
        assert_eq!(parts.qualifier.as_deref(), Some("java.util.Map"));
        assert_eq!(parts.member.as_deref(), Some("put"));
        assert_eq!(parts.params, Some(vec!["K".to_string(), "V".to_string()]));
    }

    #[test]
    fn member_without_hash() {
        let parts = parse("equals(Object)").unwrap();
        assert_eq!(parts.qualifier, None);
        assert_eq!(parts.member.as_deref(), Some("equals"));
        assert_eq!(parts.params, Some(vec!["Object".to_string()]));
    }

    #[test]
    fn field_reference() {
        let parts = parse("#MAX_VALUE").unwrap();
        assert_eq!(parts.qualifier, None);
        assert_eq!(parts.member.as_deref(), Some("MAX_VALUE"));
        assert_eq!(parts.params, None);
    }

    #[test]
    fn generic_parameters_keep_their_commas() {
        let parts = parse("#of(Map<K, V>, int...)").unwrap();
        assert_eq!(
            parts.params,
            Some(vec!["Map<K, V>".to_string(), "int...".to_string()])
        );
    }

    #[test]
    fn empty_parameter_list() {
        let parts = parse("Object#hashCode()").unwrap();
        assert_eq!(parts.params, Some(vec![]));
    }

    #[test]
    fn module_only() {
        let parts = parse("java.base/").unwrap();
        assert_eq!(parts.module.as_deref(), Some("java.base"));
        assert_eq!(parts.qualifier, None);
    }

    #[test]
    fn rejects_malformed_signatures() {
        assert_eq!(parse("   "), Err(ReferenceError::Empty));
        assert_eq!(parse("/Foo"), Err(ReferenceError::EmptyModule));
        assert!(matches!(
            parse("Foo#bar(int"),
            Err(ReferenceError::UnbalancedParentheses { .. })
        ));
        assert!(matches!(
            parse("Foo#bar(int)x"),
            Err(ReferenceError::TrailingText { offset: 12 })
        ));
        assert_eq!(
            parse("Foo#bar(int,)"),
            Err(ReferenceError::EmptyParameter { index: 1 })
        );
        assert!(matches!(
            parse("1Foo"),
            Err(ReferenceError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            parse("Foo#"),
            Err(ReferenceError::InvalidIdentifier { .. })
        ));
    }
}

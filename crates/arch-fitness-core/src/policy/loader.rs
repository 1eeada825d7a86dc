//! DTO → policy model conversion with validation.

use crate::config::{ForbiddenRuleDto, MatcherDto};
use crate::pattern::{Matcher, PathPattern};
use crate::rule::{RegisteredRule, RuleCategory, RuleDefinition};
use crate::types::Severity;

use super::PolicyError;

/// Category name given to `[[forbidden]]` rules.
pub const FORBIDDEN_CATEGORY: &str = "config";

/// Converts `[[forbidden]]` entries into a rule category.
///
/// # Errors
///
/// Returns the first invalid pattern or severity, naming its position.
pub fn load_forbidden(dtos: &[ForbiddenRuleDto], root: &str) -> Result<RuleCategory, PolicyError> {
    let rules = dtos
        .iter()
        .enumerate()
        .map(|(i, dto)| convert_forbidden(dto, i, root).map(RegisteredRule::Forbidden))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RuleCategory::new(FORBIDDEN_CATEGORY, rules))
}

fn convert_forbidden(dto: &ForbiddenRuleDto, index: usize, root: &str) -> Result<RuleDefinition, PolicyError> {
    let ctx = format!("forbidden[{index}]");
    if dto.name.trim().is_empty() {
        return Err(PolicyError::Invalid {
            context: format!("{ctx}.name"),
            message: "rule name must not be empty".to_string(),
        });
    }
    let severity = parse_severity(&dto.severity, &format!("{ctx} '{}'", dto.name))?;
    let from = convert_matcher(&dto.from, &format!("{ctx}.from"), root)?;
    let to = convert_matcher(&dto.to, &format!("{ctx}.to"), root)?;
    Ok(RuleDefinition::new(&dto.name, severity, &dto.comment, from, to))
}

fn convert_matcher(dto: &MatcherDto, ctx: &str, root: &str) -> Result<Matcher, PolicyError> {
    let include = PathPattern::with_root(&dto.path, root).map_err(|e| PolicyError::Pattern {
        context: format!("{ctx}.path"),
        source: e,
    })?;
    let excludes = compile_patterns(&dto.path_not, &format!("{ctx}.path_not"), root)?;
    Ok(Matcher::new(include, excludes))
}

/// Compiles a list of pattern templates, reporting the index of the first
/// failure.
///
/// # Errors
///
/// Returns error if any pattern is invalid.
pub fn compile_patterns<S: AsRef<str>>(
    patterns: &[S],
    context: &str,
    root: &str,
) -> Result<Vec<PathPattern>, PolicyError> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, p)| {
            PathPattern::with_root(p.as_ref(), root).map_err(|e| PolicyError::Pattern {
                context: format!("{context}[{i}]"),
                source: e,
            })
        })
        .collect()
}

/// Parses a severity string.
///
/// # Errors
///
/// Returns error for anything other than `error`, `warn`/`warning` or `info`.
pub fn parse_severity(value: &str, context: &str) -> Result<Severity, PolicyError> {
    Severity::parse(value).ok_or_else(|| PolicyError::UnknownSeverity {
        context: context.to_string(),
        value: value.to_string(),
    })
}

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::filter::gradient_to_filter;
use crate::options::TransformOptions;
use fg_css::list;
use fg_css::stylesheet::{CssRule, CssStylesheet};
use fg_css::walker::walk_rules_mut;

pub const EXISTING_FILTER_MESSAGE: &str =
    "The `filter` declaration already exists, we have skipped this rule.";
pub const MULTIPLE_GRADIENTS_MESSAGE: &str =
    "IE filter doesn't support multiple gradients, we pick the first as fallback.";

/// Property of the inserted declaration
const FILTER_PROPERTY: &str = "filter";

/// Declarations whose value is searched for gradients
fn is_gradient_property(property: &str) -> bool {
    property == "background" || property == "background-image"
}

fn is_filter_property(property: &str) -> bool {
    property == "filter" || property == "-ms-filter"
}

/// What happened to a single rule
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// No background declaration holds a linear gradient
    NoGradient,
    /// The rule already has a filter and was left alone
    ExistingFilter,
    /// The gradient could not be parsed, or one of its colors could not
    InvalidGradient,
    /// The gradient has more than two color stops and those are skipped
    SkippedMultiColor,
    /// The direction had to be approximated and approximations are turned off
    SkippedFallback,
    /// A filter declaration with this value was inserted
    Applied { filter: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleReport {
    pub outcome: RuleOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of a transform over a whole stylesheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformReport {
    /// Diagnostics of all rules in document order
    pub diagnostics: Vec<Diagnostic>,
    /// Number of inserted filter declarations
    pub applied: usize,
}

/// The declaration a filter is generated for
struct GradientSource {
    /// Child index of the declaration in the rule
    index: usize,
    /// The first linear gradient in the declaration value
    gradient: String,
    /// Number of linear gradients in the declaration value
    count: usize,
}

/// Finds the gradient of a rule. When more than one declaration holds a gradient, the last one
/// wins as it is the one a browser would use.
fn find_gradient(rule: &CssRule) -> Option<GradientSource> {
    rule.declarations_matching(is_gradient_property)
        .into_iter()
        .filter_map(|index| {
            let decl = rule.declaration(index)?;
            let gradients: Vec<String> = list::comma(&decl.value)
                .into_iter()
                .filter(|segment| segment.starts_with("linear-gradient"))
                .collect();

            Some(GradientSource {
                index,
                gradient: gradients.first()?.clone(),
                count: gradients.len(),
            })
        })
        .last()
}

/// Adds a filter declaration for the gradient of a single rule, if any
pub fn process_rule(rule: &mut CssRule, options: &TransformOptions) -> RuleReport {
    let mut diagnostics = Vec::new();
    let mut warn = |diagnostic: Diagnostic| {
        if !options.skip_warnings {
            diagnostics.push(diagnostic);
        }
    };

    let outcome = 'outcome: {
        let Some(source) = find_gradient(rule) else {
            break 'outcome RuleOutcome::NoGradient;
        };

        if rule.has_declaration(is_filter_property) {
            warn(Diagnostic::for_rule(
                DiagnosticKind::Policy,
                EXISTING_FILTER_MESSAGE,
                rule,
            ));
            break 'outcome RuleOutcome::ExistingFilter;
        }

        let Some(decl) = rule.declaration(source.index).cloned() else {
            break 'outcome RuleOutcome::NoGradient;
        };

        if source.count > 1 {
            warn(Diagnostic::for_declaration(
                DiagnosticKind::Policy,
                MULTIPLE_GRADIENTS_MESSAGE,
                &decl,
            ));
        }

        let outcome = match gradient_to_filter(&source.gradient) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn(Diagnostic::from_error(&err, &decl));
                break 'outcome RuleOutcome::InvalidGradient;
            }
        };

        if options.skip_multi_color && outcome.is_multi_color {
            break 'outcome RuleOutcome::SkippedMultiColor;
        }

        if !options.angle_fallback && outcome.is_fallback {
            break 'outcome RuleOutcome::SkippedFallback;
        }

        if let Some(message) = outcome.message {
            warn(Diagnostic::for_declaration(
                DiagnosticKind::Policy,
                message,
                &decl,
            ));
        }

        rule.insert_after(source.index, decl.clone_with(FILTER_PROPERTY, &outcome.filter));

        RuleOutcome::Applied {
            filter: outcome.filter,
        }
    };

    log::debug!("rule {:?}: {:?}", rule.selector, outcome);

    RuleReport {
        outcome,
        diagnostics,
    }
}

/// Adds filter declarations to all rules of the stylesheet
pub fn transform(stylesheet: &mut CssStylesheet, options: &TransformOptions) -> TransformReport {
    let mut report = TransformReport::default();

    walk_rules_mut(stylesheet, |rule| {
        let rule_report = process_rule(rule, options);
        if matches!(rule_report.outcome, RuleOutcome::Applied { .. }) {
            report.applied += 1;
        }
        report.diagnostics.extend(rule_report.diagnostics);
    });

    report
}

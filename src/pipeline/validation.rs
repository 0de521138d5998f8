//! Validation engine for extraction settings.
//!
//! The engine runs all registered [`ValidationRule`]s against the resolved
//! [`ExtractorConfig`] (and the [`ConfigSpec`] it came from, when there is
//! one) and collects every diagnostic into a [`ValidationReport`]. It never
//! short-circuits on the first error, so users see all problems at once.

use std::fmt;

use tracing::warn;

use super::spec::{parse_delimiter, ConfigSpec, CONFIG_VERSION};
use crate::errors::{ExtractError, Result};
use crate::nlp::stopwords::{StopwordFilter, SUPPORTED_LANGUAGES};
use crate::types::{ExtractorConfig, OutputFormat};

// ─── Issue ──────────────────────────────────────────────────────────────────

/// Stable category of a configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCode {
    UnsupportedLanguage,
    InvalidValue,
    UnsupportedVersion,
    UnknownField,
}

/// A configuration problem with a JSON-pointer style path and an optional
/// hint for fixing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub code: IssueCode,
    pub path: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ConfigIssue {
    pub fn new(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding.
#[derive(Debug, Clone)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    pub issue: ConfigIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.issue)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.issue)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Log warnings and turn errors into [`ExtractError::InvalidConfig`].
    pub fn into_result(self) -> Result<Self> {
        for issue in self.warnings() {
            warn!(path = %issue.path, "{}", issue);
        }
        if self.has_errors() {
            let message = self
                .errors()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ExtractError::InvalidConfig(message));
        }
        Ok(self)
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// What a rule inspects: the resolved settings and, when loaded from a file,
/// the raw configuration.
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    pub config: &'a ExtractorConfig,
    pub spec: Option<&'a ConfigSpec>,
}

impl<'a> ValidationInput<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config, spec: None }
    }

    pub fn with_spec(mut self, spec: Option<&'a ConfigSpec>) -> Self {
        self.spec = spec;
        self
    }
}

/// A single validation rule returning zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"language"`).
    fn name(&self) -> &str;

    fn validate(&self, input: &ValidationInput<'_>) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and collects all diagnostics.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(LanguageRule));
        engine.add_rule(Box::new(CountLimitsRule));
        engine.add_rule(Box::new(ExtensionRule));
        engine.add_rule(Box::new(DelimiterRule));
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, input: &ValidationInput<'_>) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(input));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Validate with the default rules; warnings are logged, errors returned.
pub fn ensure_valid(config: &ExtractorConfig, spec: Option<&ConfigSpec>) -> Result<ValidationReport> {
    ValidationEngine::with_defaults()
        .validate(&ValidationInput::new(config).with_spec(spec))
        .into_result()
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Stop-word language must exist ───────────────────────────────────────

struct LanguageRule;

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "language"
    }

    fn validate(&self, input: &ValidationInput<'_>) -> Vec<ValidationDiagnostic> {
        let lang = &input.config.language;
        if StopwordFilter::is_supported(lang) {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigIssue::new(
                IssueCode::UnsupportedLanguage,
                "/lang",
                format!("unsupported language \"{lang}\""),
            )
            .with_hint(format!("Use one of: {}", SUPPORTED_LANGUAGES.join(", "))),
        )]
    }
}

// ─── 2. Keyword counts and table limit ──────────────────────────────────────

struct CountLimitsRule;

impl ValidationRule for CountLimitsRule {
    fn name(&self) -> &str {
        "count_limits"
    }

    fn validate(&self, input: &ValidationInput<'_>) -> Vec<ValidationDiagnostic> {
        let cfg = input.config;
        let mut out = Vec::new();

        if cfg.num_of_keywords == 0 {
            out.push(ValidationDiagnostic::error(
                ConfigIssue::new(
                    IssueCode::InvalidValue,
                    "/num_of_keywords",
                    "num_of_keywords must be greater than 0",
                )
                .with_hint("Select at least one keyword per document"),
            ));
        }
        if cfg.keyword_limit_in_final_table == 0 {
            out.push(ValidationDiagnostic::warning(ConfigIssue::new(
                IssueCode::InvalidValue,
                "/keyword_limit_in_final_table",
                "keyword_limit_in_final_table is 0; the table will only have a header",
            )));
        }
        if cfg.min_count == 0 {
            out.push(ValidationDiagnostic::warning(ConfigIssue::new(
                IssueCode::InvalidValue,
                "/min_count",
                "min_count of 0 is treated as 1",
            )));
        }

        out
    }
}

// ─── 3. Document extension must be set ──────────────────────────────────────

struct ExtensionRule;

impl ValidationRule for ExtensionRule {
    fn name(&self) -> &str {
        "extension"
    }

    fn validate(&self, input: &ValidationInput<'_>) -> Vec<ValidationDiagnostic> {
        if input.config.extension.trim_start_matches('.').is_empty() {
            vec![ValidationDiagnostic::error(
                ConfigIssue::new(IssueCode::InvalidValue, "/extension", "extension is empty")
                    .with_hint("Use an extension such as \"txt\""),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 4. CSV delimiter must not collide with field content ───────────────────

struct DelimiterRule;

impl ValidationRule for DelimiterRule {
    fn name(&self) -> &str {
        "delimiter"
    }

    fn validate(&self, input: &ValidationInput<'_>) -> Vec<ValidationDiagnostic> {
        if let Some(raw) = input.spec.and_then(|s| s.output.delimiter.as_deref()) {
            if let Err(message) = parse_delimiter(raw) {
                return vec![ValidationDiagnostic::error(
                    ConfigIssue::new(IssueCode::InvalidValue, "/output/delimiter", message)
                        .with_hint("Use \",\", \";\" or \"\\t\""),
                )];
            }
        }

        let output = &input.config.output;
        if output.format != OutputFormat::Csv {
            return vec![];
        }
        let d = output.delimiter;
        let message = if !d.is_ascii() {
            format!("{d:?} is not an ASCII character")
        } else if d.is_alphanumeric() || matches!(d, '"' | '\n' | '\r') {
            format!("{d:?} cannot be used as a delimiter")
        } else {
            return vec![];
        };
        vec![ValidationDiagnostic::error(
            ConfigIssue::new(IssueCode::InvalidValue, "/output/delimiter", message)
                .with_hint("Use \",\", \";\" or \"\\t\""),
        )]
    }
}

// ─── 5. Config file version ─────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, input: &ValidationInput<'_>) -> Vec<ValidationDiagnostic> {
        match input.spec {
            Some(spec) if spec.v != CONFIG_VERSION => vec![ValidationDiagnostic::error(
                ConfigIssue::new(
                    IssueCode::UnsupportedVersion,
                    "/v",
                    format!("unsupported config version {}", spec.v),
                )
                .with_hint(format!("Set \"v\": {CONFIG_VERSION}")),
            )],
            _ => vec![],
        }
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ───────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &std::collections::HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigIssue::new(
                        IssueCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, input: &ValidationInput<'_>) -> Vec<ValidationDiagnostic> {
        let Some(spec) = input.spec else {
            return vec![];
        };
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &spec.unknown_fields, spec.strict));
        out.extend(Self::check_unknowns(
            "/output",
            &spec.output.unknown_fields,
            spec.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

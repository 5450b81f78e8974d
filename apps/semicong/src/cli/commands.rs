//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Commands build a report, then print it as text or JSON. The coordinator
//! itself runs on a blocking task; the async side only owns the timeout and
//! the Ctrl+C handler, and both act through the coordinator's cancel token.

use crate::config::load_presentation;
use semicong_core::{
    CancelToken, CongruenceError, CongruenceKind, CongruenceSpec, CoordinatorState,
    RewritingEngine, ToyCongruence, ToyRewriter, Verdict, Word,
};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// OPTIONS
// =============================================================================

/// Global options that shape a computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Overrides both step budgets of the coordinator.
    pub steps: Option<usize>,
    /// Cancel after this many milliseconds.
    pub timeout_ms: Option<u64>,
}

/// A query against a presentation, with words in text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Equals { lhs: String, rhs: String },
    LessThan { lhs: String, rhs: String },
    ClassIndex { word: String },
    NormalForm { word: String },
}

impl Query {
    /// Command name of the query.
    pub fn name(&self) -> &'static str {
        match self {
            Query::Equals { .. } => "equals",
            Query::LessThan { .. } => "less-than",
            Query::ClassIndex { .. } => "class-index",
            Query::NormalForm { .. } => "normal-form",
        }
    }
}

// =============================================================================
// REPORTS
// =============================================================================

/// Result of `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub kind: CongruenceKind,
    pub generators: usize,
    pub relations: usize,
    pub extra: usize,
    pub over_semigroup: bool,
    pub rules: usize,
    pub confluent: bool,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Presentation")?;
        writeln!(f, "============")?;
        writeln!(f, "Kind:       {}", self.kind)?;
        writeln!(f, "Generators: {}", self.generators)?;
        writeln!(f, "Relations:  {}", self.relations)?;
        writeln!(f, "Extra:      {}", self.extra)?;
        writeln!(f, "Rules:      {}", self.rules)?;
        write!(f, "Confluent:  {}", if self.confluent { "yes" } else { "no" })
    }
}

/// Result of `run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub state: CoordinatorState,
    pub elements: usize,
    /// Only known once the quotient is fully enumerated.
    pub classes: Option<usize>,
    pub rules: usize,
}

impl RunReport {
    fn from_coordinator(coordinator: &ToyCongruence) -> Self {
        Self {
            state: coordinator.state(),
            elements: coordinator.current_size(),
            classes: coordinator.is_done().then(|| coordinator.nr_classes()),
            rules: coordinator.nr_rules(),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "State:    {}", self.state)?;
        writeln!(f, "Elements: {}", self.elements)?;
        match self.classes {
            Some(classes) => writeln!(f, "Classes:  {}", classes)?,
            None => writeln!(f, "Classes:  UNKNOWN")?,
        }
        write!(f, "Rules:    {}", self.rules)
    }
}

/// Answer to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Verdict(Verdict),
    /// `None` when cancelled before the quotient was enumerated.
    ClassIndex(Option<usize>),
    NormalForm(Word),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Verdict(verdict) => write!(f, "{}", verdict),
            Answer::ClassIndex(Some(index)) => write!(f, "{}", index),
            Answer::ClassIndex(None) => f.write_str("UNKNOWN"),
            Answer::NormalForm(word) => write!(f, "{}", word),
        }
    }
}

/// Result of a query command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub query: &'static str,
    pub answer: Answer,
    pub state: CoordinatorState,
    pub elements: usize,
}

impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.answer)
    }
}

/// Print a report as text or pretty JSON.
fn emit<T: Serialize + fmt::Display>(report: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_default()
        );
    } else {
        println!("{}", report);
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Rules and confluence of a specification under the toy rewriter.
fn rule_summary(spec: &CongruenceSpec) -> (usize, bool) {
    let relations: Vec<_> = spec.relations().iter().chain(spec.extra()).cloned().collect();
    let mut rws = ToyRewriter::new();
    let confluent = rws.can_complete(&relations);
    rws.add_rules(&relations);
    (rws.nr_rules(), confluent)
}

/// Load a presentation and build a coordinator for it.
///
/// The over-semigroup precondition the coordinator asserts at
/// initialisation is turned into an error here; presentations the toy
/// rewriter cannot complete are refused by the coordinator itself.
pub fn load_coordinator(path: &Path, options: RunOptions) -> Result<ToyCongruence, CongruenceError> {
    let presentation = load_presentation(path)?;
    let spec = presentation.to_spec()?;

    if spec.is_over_semigroup() && spec.extra().is_empty() {
        return Err(CongruenceError::Config(
            "A congruence over a semigroup needs at least one generating pair".to_string(),
        ));
    }

    let mut config = presentation.config;
    if let Some(steps) = options.steps {
        config.default_nr_steps = steps;
        config.run_steps = steps;
    }
    ToyCongruence::with_config(spec, ToyRewriter::new(), config)
}

/// Parse a word and check it against the presentation's generators.
fn parse_word(coordinator: &ToyCongruence, text: &str) -> Result<Word, CongruenceError> {
    let word: Word = text.parse()?;
    coordinator.spec().validate_word(&word)?;
    Ok(word)
}

// =============================================================================
// DRIVING
// =============================================================================

/// Cancel `token` on timeout or Ctrl+C, whichever comes first.
async fn cancel_on_timeout_or_interrupt(token: CancelToken, timeout_ms: Option<u64>) {
    let timeout = async move {
        match timeout_ms {
            Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        () = timeout => tracing::warn!(timeout_ms = ?timeout_ms, "timeout reached, cancelling"),
        Ok(()) = tokio::signal::ctrl_c() => tracing::warn!("interrupted, cancelling"),
    }
    token.cancel();
}

/// Run `job` against the coordinator on a blocking task.
///
/// The coordinator is handed back with the job's output so its partial
/// state can still be reported after a cancellation.
pub async fn drive<T, F>(
    mut coordinator: ToyCongruence,
    timeout_ms: Option<u64>,
    job: F,
) -> Result<(ToyCongruence, T), CongruenceError>
where
    F: FnOnce(&mut ToyCongruence) -> T + Send + 'static,
    T: Send + 'static,
{
    let watchdog = tokio::spawn(cancel_on_timeout_or_interrupt(
        coordinator.cancel_token(),
        timeout_ms,
    ));

    let result = tokio::task::spawn_blocking(move || {
        let output = job(&mut coordinator);
        (coordinator, output)
    })
    .await;

    watchdog.abort();
    result.map_err(|e| CongruenceError::Io(format!("Coordinator task failed: {}", e)))
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validate a presentation and test its rules for confluence.
pub fn check_report(path: &Path) -> Result<CheckReport, CongruenceError> {
    let presentation = load_presentation(path)?;
    let spec = presentation.to_spec()?;
    let (rules, confluent) = rule_summary(&spec);

    Ok(CheckReport {
        kind: spec.kind(),
        generators: spec.nr_generators(),
        relations: spec.relations().len(),
        extra: spec.extra().len(),
        over_semigroup: spec.is_over_semigroup(),
        rules,
        confluent,
    })
}

/// Show presentation summary.
pub fn cmd_check(path: &Path, json_mode: bool) -> Result<(), CongruenceError> {
    let report = check_report(path)?;
    emit(&report, json_mode);
    Ok(())
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Enumerate the quotient until done or cancelled.
pub async fn run_report(path: &Path, options: RunOptions) -> Result<RunReport, CongruenceError> {
    let coordinator = load_coordinator(path, options)?;
    let (coordinator, ()) = drive(coordinator, options.timeout_ms, |c| c.run()).await?;

    let report = RunReport::from_coordinator(&coordinator);
    tracing::info!(state = %report.state, elements = report.elements, "run finished");
    Ok(report)
}

/// Run the enumeration and show the outcome.
pub async fn cmd_run(
    path: &Path,
    options: RunOptions,
    json_mode: bool,
) -> Result<(), CongruenceError> {
    let report = run_report(path, options).await?;
    emit(&report, json_mode);
    Ok(())
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// Answer a query against a presentation.
pub async fn query_report(
    path: &Path,
    options: RunOptions,
    query: &Query,
) -> Result<QueryReport, CongruenceError> {
    let coordinator = load_coordinator(path, options)?;
    let timeout_ms = options.timeout_ms;

    let (coordinator, answer) = match query {
        Query::Equals { lhs, rhs } => {
            let lhs = parse_word(&coordinator, lhs)?;
            let rhs = parse_word(&coordinator, rhs)?;
            drive(coordinator, timeout_ms, move |c| {
                Answer::Verdict(c.current_equals(&lhs, &rhs))
            })
            .await?
        }
        Query::LessThan { lhs, rhs } => {
            let lhs = parse_word(&coordinator, lhs)?;
            let rhs = parse_word(&coordinator, rhs)?;
            drive(coordinator, timeout_ms, move |c| {
                Answer::Verdict(c.current_less_than(&lhs, &rhs))
            })
            .await?
        }
        Query::ClassIndex { word } => {
            let word = parse_word(&coordinator, word)?;
            drive(coordinator, timeout_ms, move |c| {
                c.run();
                Answer::ClassIndex(c.is_done().then(|| c.word_to_class_index(&word)))
            })
            .await?
        }
        Query::NormalForm { word } => {
            let word = parse_word(&coordinator, word)?;
            drive(coordinator, timeout_ms, move |c| {
                Answer::NormalForm(c.normal_form(&word))
            })
            .await?
        }
    };

    Ok(QueryReport {
        query: query.name(),
        answer,
        state: coordinator.state(),
        elements: coordinator.current_size(),
    })
}

/// Answer a query and show the answer.
pub async fn cmd_query(
    path: &Path,
    options: RunOptions,
    json_mode: bool,
    query: Query,
) -> Result<(), CongruenceError> {
    let report = query_report(path, options, &query).await?;
    emit(&report, json_mode);
    Ok(())
}

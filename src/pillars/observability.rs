use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use super::CheckDef;
use super::probe::{RepoProbe, SOURCE_EXTENSIONS, contains_any, found_in};
use crate::error::Result;
use crate::model::{CheckResult, Severity};
use crate::pillar::Pillar;

const LOGGING_CONFIG: CheckDef =
    CheckDef::new("Logging configuration exists", 1, Severity::Required);
const ERROR_HANDLING: CheckDef = CheckDef::new("Error handling present", 1, Severity::Required);
const LOGGING_DOCUMENTED: CheckDef =
    CheckDef::new("Logging documented", 2, Severity::Recommended);
const DESCRIPTIVE_ERRORS: CheckDef =
    CheckDef::new("Error messages descriptive", 2, Severity::Recommended);
const DEBUG_MODE: CheckDef = CheckDef::new("Debug mode available", 2, Severity::Recommended);
const STRUCTURED_LOGGING: CheckDef =
    CheckDef::new("Structured logging indicators", 2, Severity::Optional);
const HEALTH_CHECK: CheckDef = CheckDef::new("Health check endpoint", 3, Severity::Optional);
const REQUEST_LOGGING: CheckDef =
    CheckDef::new("Request logging configured", 3, Severity::Optional);
const PERFORMANCE_METRICS: CheckDef =
    CheckDef::new("Performance metrics configured", 3, Severity::Optional);
const ERROR_CONTEXT: CheckDef = CheckDef::new("Error context preserved", 3, Severity::Optional);
const LOG_AGGREGATION: CheckDef =
    CheckDef::new("Log aggregation configured", 4, Severity::Optional);
const DISTRIBUTED_TRACING: CheckDef =
    CheckDef::new("Distributed tracing configured", 4, Severity::Optional);
const CUSTOM_METRICS: CheckDef = CheckDef::new("Custom metrics present", 4, Severity::Optional);
const ALERTS: CheckDef = CheckDef::new("Alert configuration present", 4, Severity::Optional);
const PROFILING: CheckDef = CheckDef::new("Profiling tools configured", 5, Severity::Optional);
const RESOURCE_MONITORING: CheckDef =
    CheckDef::new("Memory/CPU monitoring configured", 5, Severity::Optional);
const LOG_ANALYSIS: CheckDef =
    CheckDef::new("Log analysis tools configured", 5, Severity::Optional);
const FEEDBACK_LOOPS: CheckDef =
    CheckDef::new("Observability feedback loops configured", 5, Severity::Optional);

const SOURCE_SAMPLE: usize = 200;
const ERROR_HANDLING_THRESHOLD: f64 = 5.0;
const DESCRIPTIVE_RATIO: f64 = 0.5;

/// Source markers of a logging library, paired with the library's name.
const LOGGING_LIBRARIES: &[(&str, &str)] = &[
    ("import logging", "logging"),
    ("logging.getlogger", "logging"),
    ("loguru", "loguru"),
    ("structlog", "structlog"),
    ("winston", "winston"),
    ("pino", "pino"),
    ("bunyan", "bunyan"),
    ("use tracing", "tracing"),
    ("tracing =", "tracing"),
    ("tracing::", "tracing"),
    ("use log::", "log"),
    ("log::info!", "log"),
    ("log/slog", "slog"),
    ("go.uber.org/zap", "zap"),
    ("zerolog", "zerolog"),
];

const STRUCTURED_LIBRARIES: &[&str] =
    &["structlog", "pino", "bunyan", "winston", "tracing", "slog", "zap", "zerolog"];

const LOGGING_CONFIG_FILES: &[&str] = &[
    "logging.conf",
    "logging.yaml",
    "logging.yml",
    "logging.json",
    "log4j.properties",
    ".log4jrc",
    "log4rs.yaml",
];

const MONITORING_CONFIG_FILES: &[&str] = &[
    "prometheus.yml",
    "prometheus_rules.yml",
    "datadog.yaml",
    "jaeger.yml",
    "fluent.conf",
    "vector.toml",
    ".monitoring",
];

const ALERT_FILES: &[&str] = &["prometheus_rules.yml", "alert_rules.yml", "alerts.yml"];

const TRACING_CONFIG_PATTERNS: &[&str] = &[
    "**/otel*.{yml,yaml,json,toml}",
    "**/*-otel*.{yml,yaml}",
    "**/*tracing*.{yml,yaml,json,toml}",
];

const TRACING_KEYWORDS: &[&str] = &["opentelemetry", "jaeger", "zipkin", "otel"];
const METRICS_KEYWORDS: &[&str] = &["prometheus", "statsd", "metric", "gauge", "histogram"];
const METRICS_LIBRARIES: &[&str] = &["prometheus", "opentelemetry", "statsd", "metrics"];

static FUNCTION_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\b(?:def|fn|func|function)\s+\w+\s*[(<]|\bfunc\s+\([^)]*\)\s*\w+\(")
        .expect("Invalid regex")
});

static ERROR_HANDLING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btry\s*[:{]|\bexcept\b|\bcatch\b|result<|if err != nil").expect("Invalid regex")
});

static ERROR_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:raise \w+\(|throw new \w+\(|errors\.new\(|fmt\.errorf\(|bail!\(|anyhow!\(|#\[error\()(.*)",
    )
    .expect("Invalid regex")
});

static ERROR_CONTEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"raise\s.*\sfrom\s+\w+|\.(?:with_)?context\(|#\[source\]|#\[from\]|%w|\{\s*cause")
        .expect("Invalid regex")
});

/// Whether failures in the project can be observed and diagnosed.
pub struct ObservabilityPillar;

/// Everything gathered in one pass over docs, manifests and sampled sources.
struct Observations {
    docs: String,
    sources: Vec<String>,
    manifests: String,
    makefile: String,
    libraries: IndexSet<&'static str>,
}

impl Observations {
    fn gather(probe: &RepoProbe) -> Self {
        let sources: Vec<String> = probe
            .source_texts(SOURCE_EXTENSIONS, SOURCE_SAMPLE)
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        let manifests = ["pyproject.toml", "package.json", "Cargo.toml", "go.mod"]
            .iter()
            .filter_map(|m| probe.read_lower(m))
            .collect::<Vec<_>>()
            .join("\n");
        let libraries = LOGGING_LIBRARIES
            .iter()
            .filter(|(marker, _)| {
                manifests.contains(marker) || sources.iter().any(|s| s.contains(marker))
            })
            .map(|(_, library)| *library)
            .collect();
        Self {
            docs: probe.docs_text(),
            sources,
            manifests,
            makefile: probe.read_lower("Makefile").unwrap_or_default(),
            libraries,
        }
    }

    fn source_contains(&self, needles: &[&str]) -> bool {
        self.sources.iter().any(|s| contains_any(s, needles))
    }

    fn docs_mention(&self, needles: &[&str]) -> bool {
        contains_any(&self.docs, needles)
    }
}

impl Pillar for ObservabilityPillar {
    fn name(&self) -> &str {
        "Debugging & Observability"
    }

    fn evaluate(&self, target: &Path) -> Result<Vec<CheckResult>> {
        let probe = RepoProbe::new(target);
        let obs = Observations::gather(&probe);

        Ok(vec![
            check_logging_config(&probe, &obs),
            check_error_handling(&obs),
            check_logging_documented(&obs),
            check_descriptive_errors(&obs),
            check_debug_mode(&probe, &obs),
            check_structured_logging(&obs),
            check_health_check(&obs),
            check_request_logging(&obs),
            check_performance_metrics(&obs),
            check_error_context(&obs),
            check_log_aggregation(&probe, &obs),
            check_distributed_tracing(&probe, &obs),
            check_custom_metrics(&obs),
            check_alerts(&probe, &obs),
            check_profiling(&obs),
            check_resource_monitoring(&obs),
            check_log_analysis(&obs),
            check_feedback_loops(&probe, &obs),
        ])
    }
}

fn check_logging_config(probe: &RepoProbe, obs: &Observations) -> CheckResult {
    if let Some(file) = probe.first_existing(LOGGING_CONFIG_FILES) {
        return LOGGING_CONFIG.pass(format!("Logging configuration found: {file}"));
    }
    if obs.libraries.is_empty() {
        LOGGING_CONFIG.fail("No logging configuration found")
    } else {
        let names: Vec<&str> = obs.libraries.iter().copied().collect();
        LOGGING_CONFIG.pass(format!("Logging library detected: {}", names.join(", ")))
    }
}

fn check_error_handling(obs: &Observations) -> CheckResult {
    let functions: usize = obs
        .sources
        .iter()
        .map(|s| FUNCTION_DEF_RE.find_iter(s).count())
        .sum();
    let handlers: usize = obs
        .sources
        .iter()
        .map(|s| ERROR_HANDLING_RE.find_iter(s).count())
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let rate = handlers as f64 / functions.max(1) as f64 * 100.0;
    if rate > ERROR_HANDLING_THRESHOLD {
        ERROR_HANDLING.pass(format!("Error handling detected ({rate:.1}% coverage)"))
    } else {
        ERROR_HANDLING.fail("No error handling patterns detected")
    }
}

fn check_logging_documented(obs: &Observations) -> CheckResult {
    if obs.docs.len() > 100 && obs.docs_mention(&["logging", "logs", "debug", "monitoring"]) {
        LOGGING_DOCUMENTED.pass("Logging setup documented in README or AGENTS.md")
    } else {
        LOGGING_DOCUMENTED.fail("Logging setup not documented")
    }
}

fn is_descriptive(message: &str) -> bool {
    contains_any(message, &["{", "f\"", "f'", "%", "${", "+ "])
}

fn check_descriptive_errors(obs: &Observations) -> CheckResult {
    let (total, descriptive) = obs
        .sources
        .iter()
        .flat_map(|s| ERROR_MESSAGE_RE.captures_iter(s))
        .filter_map(|c| c.get(1))
        .fold((0_usize, 0_usize), |(total, descriptive), m| {
            (total + 1, descriptive + usize::from(is_descriptive(m.as_str())))
        });
    if total == 0 {
        return DESCRIPTIVE_ERRORS.fail("No error messages found to evaluate");
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = descriptive as f64 / total as f64;
    if ratio >= DESCRIPTIVE_RATIO {
        DESCRIPTIVE_ERRORS.pass(format!(
            "Error messages include descriptive context ({descriptive}/{total})"
        ))
    } else {
        DESCRIPTIVE_ERRORS.fail(format!(
            "Error messages lack descriptive context ({descriptive}/{total})"
        ))
    }
}

fn check_debug_mode(probe: &RepoProbe, obs: &Observations) -> CheckResult {
    let in_config = [".env.example", "config.py", "settings.py", ".flaskenv"]
        .iter()
        .filter_map(|f| probe.read_lower(f))
        .any(|text| text.contains("debug"));
    if obs.docs.contains("debug") || in_config {
        DEBUG_MODE.pass("Debug mode available via environment or config")
    } else {
        DEBUG_MODE.fail("No debug mode configuration found")
    }
}

fn check_structured_logging(obs: &Observations) -> CheckResult {
    let structured: Vec<&str> = obs
        .libraries
        .iter()
        .copied()
        .filter(|l| STRUCTURED_LIBRARIES.contains(l))
        .collect();
    if !structured.is_empty() {
        return STRUCTURED_LOGGING.pass(format!(
            "Structured logging library detected: {}",
            structured.join(", ")
        ));
    }
    let json_logging = obs
        .sources
        .iter()
        .any(|s| s.contains("json.dumps") && s.contains("logging"));
    if json_logging {
        return STRUCTURED_LOGGING.pass("JSON structured logging detected");
    }
    STRUCTURED_LOGGING.fail("No structured logging detected")
}

fn check_health_check(obs: &Observations) -> CheckResult {
    if obs.source_contains(&["/health", "healthz", "health_check"]) {
        HEALTH_CHECK.pass("Health check endpoint configured")
    } else {
        HEALTH_CHECK.fail("No health check endpoint found")
    }
}

fn check_request_logging(obs: &Observations) -> CheckResult {
    let keywords = [
        "request logging",
        "http logging",
        "middleware",
        "access_log",
        "request_log",
    ];
    if obs.docs_mention(&keywords) {
        return REQUEST_LOGGING.pass("Request logging documented");
    }
    if obs.source_contains(&["access_log", "request_log", "tracelayer", "morgan("]) {
        return REQUEST_LOGGING.pass("Request logging middleware detected");
    }
    REQUEST_LOGGING.fail("No request logging middleware found")
}

fn check_performance_metrics(obs: &Observations) -> CheckResult {
    let keywords = ["timing", "latency", "duration", "performance", "benchmark", "metric"];
    if obs.docs_mention(&keywords) {
        return PERFORMANCE_METRICS.pass("Performance metrics documented");
    }
    let timers = [
        "time.time()",
        "timeit",
        "instant::now",
        "performance.now",
        "time.since",
    ];
    if obs.source_contains(&timers) {
        return PERFORMANCE_METRICS.pass("Performance metrics detected");
    }
    PERFORMANCE_METRICS.fail("No performance metrics found")
}

fn check_error_context(obs: &Observations) -> CheckResult {
    if obs.sources.iter().any(|s| ERROR_CONTEXT_RE.is_match(s)) {
        ERROR_CONTEXT.pass("Error context preservation detected")
    } else {
        ERROR_CONTEXT.fail("Error context may not be preserved")
    }
}

fn check_log_aggregation(probe: &RepoProbe, obs: &Observations) -> CheckResult {
    if let Some(file) = probe.first_existing(MONITORING_CONFIG_FILES) {
        return LOG_AGGREGATION.pass(format!("Log aggregation configuration found: {file}"));
    }
    let services = found_in(
        &obs.docs,
        &["datadog", "elasticsearch", "logstash", "kibana", "loki"],
    );
    if services.is_empty() {
        LOG_AGGREGATION.fail("No log aggregation configuration found")
    } else {
        LOG_AGGREGATION.pass(format!(
            "Log aggregation service mentioned: {}",
            services.join(", ")
        ))
    }
}

fn check_distributed_tracing(probe: &RepoProbe, obs: &Observations) -> CheckResult {
    let config = probe.find_files(TRACING_CONFIG_PATTERNS);
    if let Some(file) = config.first() {
        return DISTRIBUTED_TRACING.pass(format!(
            "Distributed tracing configuration found: {}",
            probe.relative(file)
        ));
    }
    if obs.docs_mention(TRACING_KEYWORDS) {
        return DISTRIBUTED_TRACING.pass("Distributed tracing mentioned");
    }
    if contains_any(&obs.manifests, TRACING_KEYWORDS) {
        return DISTRIBUTED_TRACING.pass("Distributed tracing library found");
    }
    DISTRIBUTED_TRACING.fail("No distributed tracing configured")
}

fn check_custom_metrics(obs: &Observations) -> CheckResult {
    let libraries = found_in(&obs.manifests, METRICS_LIBRARIES);
    if !libraries.is_empty() {
        return CUSTOM_METRICS.pass(format!(
            "Metrics library detected: {}",
            libraries.join(", ")
        ));
    }
    if obs.docs_mention(METRICS_KEYWORDS) {
        return CUSTOM_METRICS.pass("Custom metrics documented");
    }
    if obs.source_contains(METRICS_KEYWORDS) {
        return CUSTOM_METRICS.pass("Custom metrics detected");
    }
    CUSTOM_METRICS.fail("No custom metrics found")
}

fn check_alerts(probe: &RepoProbe, obs: &Observations) -> CheckResult {
    if let Some(file) = probe.first_existing(ALERT_FILES) {
        return ALERTS.pass(format!("Alert configuration found: {file}"));
    }
    if obs.docs_mention(&["alert", "pagerduty", "opsgenie", "alarm"]) {
        return ALERTS.pass("Alert configuration mentioned");
    }
    ALERTS.fail("No alert configuration found")
}

fn check_profiling(obs: &Observations) -> CheckResult {
    let keywords = [
        "pprof",
        "py-spy",
        "cprofile",
        "flamegraph",
        "clinic.js",
        "autocannon",
        "samply",
    ];
    if obs.docs_mention(&keywords) {
        return PROFILING.pass("Profiling tools documented");
    }
    if contains_any(&obs.makefile, &keywords) {
        return PROFILING.pass("Profiling target in Makefile");
    }
    PROFILING.fail("No profiling tools configured")
}

fn check_resource_monitoring(obs: &Observations) -> CheckResult {
    let keywords = ["memory", "cpu", "heap", "gc monitoring", "resource utilization"];
    if obs.docs_mention(&keywords) {
        return RESOURCE_MONITORING.pass("Memory and CPU monitoring documented");
    }
    if obs.source_contains(&["psutil", "import resource", "sysinfo", "runtime.memstats"]) {
        return RESOURCE_MONITORING.pass("Memory/CPU monitoring detected");
    }
    RESOURCE_MONITORING.fail("No memory/CPU monitoring found")
}

fn check_log_analysis(obs: &Observations) -> CheckResult {
    let tools = found_in(
        &obs.docs,
        &["elk", "splunk", "datadog", "log analysis", "dashboard", "kibana", "grafana"],
    );
    if tools.is_empty() {
        LOG_ANALYSIS.fail("No log analysis tools found")
    } else {
        LOG_ANALYSIS.pass(format!("Log analysis tools documented: {}", tools.join(", ")))
    }
}

fn check_feedback_loops(probe: &RepoProbe, obs: &Observations) -> CheckResult {
    let keywords = [
        "autoscaling",
        "auto-scaling",
        "circuit breaker",
        "adaptive",
        "self-healing",
    ];
    if obs.docs_mention(&keywords) {
        return FEEDBACK_LOOPS.pass("Observability feedback loops documented");
    }
    if probe
        .first_existing(&[".keda/scaler.yaml", ".hpa/config.yaml"])
        .is_some()
    {
        return FEEDBACK_LOOPS.pass("Auto-scaling configuration found");
    }
    FEEDBACK_LOOPS.fail("No feedback loops from observability detected")
}

#[cfg(test)]
#[path = "observability_tests.rs"]
mod tests;

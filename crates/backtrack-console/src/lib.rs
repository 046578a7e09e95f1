//! Colored console output for search events.
//!
//! Provides a `tracing` layer that renders the structured events the search
//! engines emit (`search_start`, `search_end`, `attempt_end`,
//! `solution_found`, `exhausted`). Events are matched on their `event`
//! field, never on the message text.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "backtrack_solver=info";

/// Initializes console output.
///
/// Only the first call has effect. `RUST_LOG` overrides the default
/// [`DEFAULT_FILTER`]; `RUST_LOG=backtrack_solver=debug` adds per-attempt
/// and per-solution lines.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let line = format!(
        "Backtrack Search v{}  |  N-Queens & Subset Sum",
        env!("CARGO_PKG_VERSION")
    );
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", line.bright_cyan().bold());
    let _ = writeln!(stdout, "{}", "-".repeat(line.len()).bright_black());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("backtrack_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_search_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    engine: Option<String>,
    outcome: Option<String>,
    solution: Option<String>,
    board_size: Option<u64>,
    size: Option<u64>,
    target: Option<i64>,
    steps: Option<u64>,
    attempt: Option<u64>,
    attempts: Option<u64>,
    placed: Option<u64>,
    solutions: Option<u64>,
    count: Option<u64>,
    duration_ms: Option<u64>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "engine" => self.engine = Some(value),
            "outcome" => self.outcome = Some(value),
            "solution" => self.solution = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "board_size" => self.board_size = Some(value),
            "size" => self.size = Some(value),
            "steps" => self.steps = Some(value),
            "attempt" => self.attempt = Some(value),
            "attempts" => self.attempts = Some(value),
            "placed" => self.placed = Some(value),
            "solutions" => self.solutions = Some(value),
            "count" => self.count = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "target" => self.target = Some(value),
            _ if value >= 0 => self.record_u64(field, value as u64),
            _ => {}
        }
    }
}

fn format_search_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("search_start") => format_search_start(v),
        Some("search_end") => format_search_end(v),
        Some("attempt_end") => format_attempt_end(v),
        Some("solution_found") => format_solution_found(v),
        Some("exhausted") => format_exhausted(v),
        _ => String::new(),
    }
}

fn engine_tag(v: &EventVisitor) -> String {
    format!("[{}]", v.engine.as_deref().unwrap_or("Search"))
}

fn format_search_start(v: &EventVisitor) -> String {
    let detail = match (v.board_size, v.size, v.target) {
        (Some(n), _, _) => format!("board size ({})", n.to_string().bright_yellow()),
        (None, Some(len), Some(target)) => format!(
            "array size ({}), target ({})",
            len.to_string().bright_yellow(),
            target.to_string().bright_yellow()
        ),
        _ => String::new(),
    };

    format!(
        "{} {} {} search started: {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        engine_tag(v).bright_cyan(),
        detail
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let outcome = v.outcome.as_deref().unwrap_or("unknown");
    let mut output = format!(
        "{} {} {} search {}: time spent ({}), step total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        engine_tag(v).bright_cyan(),
        format_outcome(outcome),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.steps
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white()
    );
    if let Some(attempts) = v.attempts {
        output.push_str(&format!(
            ", attempts ({})",
            attempts.to_formatted_string(&Locale::en).bright_magenta()
        ));
    }
    if let Some(solutions) = v.solutions {
        output.push_str(&format!(
            ", solutions ({})",
            solutions.to_formatted_string(&Locale::en).bright_magenta().bold()
        ));
    }
    output
}

fn format_attempt_end(v: &EventVisitor) -> String {
    format!(
        "    {} Attempt {:>7} | {} | placed {}",
        "->".bright_blue(),
        v.attempt
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        format_outcome(v.outcome.as_deref().unwrap_or("unknown")),
        v.placed.unwrap_or(0)
    )
}

fn format_solution_found(v: &EventVisitor) -> String {
    format!(
        "    {} Solution {:>5} | {}",
        "->".bright_blue(),
        v.count.unwrap_or(0).to_string().white(),
        v.solution.as_deref().unwrap_or("[]").bright_green()
    )
}

fn format_exhausted(v: &EventVisitor) -> String {
    format!(
        "{} {} {} no solution exists for board size ({})",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        engine_tag(v).bright_cyan(),
        v.board_size.unwrap_or(0)
    )
}

fn format_outcome(outcome: &str) -> String {
    match outcome {
        "solved" => outcome.bright_green().bold().to_string(),
        "failed" => outcome.yellow().to_string(),
        "cancelled" => outcome.bright_red().to_string(),
        _ => outcome.white().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100_000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

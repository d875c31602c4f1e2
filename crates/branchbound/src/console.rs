//! Colorful console output for search progress.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Auto-initialized by [`solve`](crate::solve) when the `console` feature is
//! enabled.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("branchbound_solver=info"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _                           _     _                           _
| |__  _ __ __ _ _ __   ___| |__ | |__   ___  _   _ _ __   __| |
| '_ \| '__/ _` | '_ \ / __| '_ \| '_ \ / _ \| | | | '_ \ / _` |
| |_) | | | (_| | | | | (__| | | | |_) | (_) | |_| | | | | (_| |
|_.__/|_|  \__,_|_| |_|\___|_| |_|_.__/ \___/ \__,_|_| |_|\__,_|
"#;

    let version_line = format!(
        "                   v{} - Parallel Branch-and-Bound\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("branchbound_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    scheduler: Option<String>,
    sense: Option<String>,
    status: Option<String>,
    workers: Option<u64>,
    greedy: Option<bool>,
    value: Option<f64>,
    evaluations: Option<u64>,
    pruned: Option<u64>,
    open_nodes: Option<u64>,
    elapsed_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "scheduler" => self.scheduler = Some(s),
            "sense" => self.sense = Some(s),
            "status" => self.status = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "scheduler" => self.scheduler = Some(value.to_string()),
            "sense" => self.sense = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "workers" => self.workers = Some(value),
            "evaluations" => self.evaluations = Some(value),
            "pruned" => self.pruned = Some(value),
            "open_nodes" => self.open_nodes = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "value" {
            self.value = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "greedy" {
            self.greedy = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("solve_start") => format_solve_start(v),
        Some("incumbent") => format_incumbent(v),
        Some("solve_end") => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    let greedy = if v.greedy.unwrap_or(false) { "on" } else { "off" };
    format!(
        "{} {} {} Solving started: scheduler ({}), sense ({}), workers ({}), greedy ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        v.scheduler.as_deref().unwrap_or("unknown").white().bold(),
        v.sense.as_deref().unwrap_or("unknown").yellow(),
        v.workers.unwrap_or(1).to_formatted_string(&Locale::en).bright_yellow(),
        greedy.yellow()
    )
}

fn format_incumbent(v: &EventVisitor) -> String {
    let evaluations = v.evaluations.unwrap_or(0);
    let pruned = v.pruned.unwrap_or(0);
    format!(
        "    {} Evaluation {:>7} | value {} | pruned {}",
        "->".bright_blue(),
        evaluations.to_formatted_string(&Locale::en).white(),
        format_value(v.value).bright_green(),
        pruned.to_formatted_string(&Locale::en).bright_black()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let proven = status == "optimal" || status == "infeasible";
    let value = format_value(v.value);

    let mut output = format!(
        "{} {} {} Solving ended: status ({}), value ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        status.white().bold(),
        value.bright_yellow(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow()
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');

    let status_text = status.to_uppercase();
    let status_colored = if proven {
        format!("  {}  ", status_text).bright_green().bold().to_string()
    } else {
        format!("  {}  ", status_text).bright_red().bold().to_string()
    };
    let status_padding = 56usize.saturating_sub(status_text.len() + 4);
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');

    let rows = [
        ("Best value:", value),
        (
            "Evaluations:",
            v.evaluations.unwrap_or(0).to_formatted_string(&Locale::en),
        ),
        ("Pruned:", v.pruned.unwrap_or(0).to_formatted_string(&Locale::en)),
        (
            "Open nodes:",
            v.open_nodes.unwrap_or(0).to_formatted_string(&Locale::en),
        ),
    ];
    for (label, text) in rows {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            text,
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}", v),
        _ => "none".to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

//! Colorful console output for optimizer progress.
//!
//! Provides a `tracing` layer that renders the solver's structured events.
//! Enabled with the `console` feature.

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. The
/// `RUST_LOG` environment variable overrides the default
/// `regatta_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive(
                "regatta_solver=info"
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            );

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RegattaConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____                  _   _
|  _ \ ___  __ _  __ _| |_| |_ __ _
| |_) / _ \/ _` |/ _` | __| __/ _` |
|  _ <  __/ (_| | (_| | |_| || (_| |
|_| \_\___|\__, |\__,_|\__|\__\__,_|
           |___/
"#;
    let version_line = format!(
        "        v{} - Pairing List Optimizer\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats optimizer events with colors.
pub struct RegattaConsoleLayer;

impl<S: Subscriber> Layer<S> for RegattaConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("regatta_solver") {
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

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    phase_index: Option<u64>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    speed: Option<u64>,
    score: Option<f64>,
    teams: Option<u64>,
    boats: Option<u64>,
    flights: Option<u64>,
    seed: Option<u64>,
    flight: Option<u64>,
    iteration: Option<u64>,
    loops: Option<u64>,
    best_score: Option<f64>,
    worst_score: Option<f64>,
    best_age: Option<u64>,
    match_score: Option<f64>,
    boat_score: Option<f64>,
    shuttles_harbour: Option<u64>,
    shuttles_sea: Option<u64>,
    boat_changes: Option<u64>,
    run_id: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "phase" => self.phase = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "teams" => self.teams = Some(value),
            "boats" => self.boats = Some(value),
            "flights" => self.flights = Some(value),
            "seed" => self.seed = Some(value),
            "flight" => self.flight = Some(value),
            "iteration" => self.iteration = Some(value),
            "loops" => self.loops = Some(value),
            "best_age" => self.best_age = Some(value),
            "shuttles_harbour" => self.shuttles_harbour = Some(value),
            "shuttles_sea" => self.shuttles_sea = Some(value),
            "boat_changes" => self.boat_changes = Some(value),
            "run_id" => self.run_id = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "score" => self.score = Some(value),
            "best_score" => self.best_score = Some(value),
            "worst_score" => self.worst_score = Some(value),
            "match_score" => self.match_score = Some(value),
            "boat_score" => self.boat_score = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "phase_start" => format_phase_start(v),
        "checkpoint" => format_checkpoint(v),
        "early_stopping" => format_early_stopping(v),
        "phase_end" => format_phase_end(v),
        "solve_end" => format_solve_end(v),
        "run_failed" => format_run_failed(v),
        _ => String::new(),
    }
}

fn prefix(tag: &str) -> String {
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", tag).bright_cyan()
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} teams ({}), boats ({}), flights ({}), seed ({})",
        prefix("Optimizer"),
        v.teams.unwrap_or(0).bright_yellow(),
        v.boats.unwrap_or(0).bright_yellow(),
        v.flights.unwrap_or(0).bright_yellow(),
        v.seed.unwrap_or(0).to_string().white()
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} phase ({}) started",
        prefix(phase),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).to_string().yellow()
    )
}

fn format_checkpoint(v: &EventVisitor) -> String {
    let flight = match v.flight {
        Some(flight) => format!("flight {:>3} ", flight + 1),
        None => String::new(),
    };
    format!(
        "    {} {}{:>9}/{} | best {} | worst {} | age {}",
        "->".bright_blue(),
        flight,
        (v.iteration.unwrap_or(0) + 1)
            .to_formatted_string(&Locale::en)
            .white(),
        v.loops.unwrap_or(0).to_formatted_string(&Locale::en),
        format_score(v.best_score.unwrap_or(0.0)),
        format_score(v.worst_score.unwrap_or(0.0)),
        v.best_age.unwrap_or(0)
    )
}

fn format_early_stopping(v: &EventVisitor) -> String {
    format!(
        "    {} no improvement for {} checkpoints, stopping at iteration {}",
        "||".bright_yellow(),
        v.best_age.unwrap_or(0),
        v.iteration.unwrap_or(0).to_formatted_string(&Locale::en)
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} phase ({}) ended: time spent ({}), score ({}), speed ({}/sec), step total ({})",
        prefix(phase),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).to_string().yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_score(v.score.unwrap_or(0.0)),
        v.speed
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let harbour = v.shuttles_harbour.unwrap_or(0);
    let sea = v.shuttles_sea.unwrap_or(0);

    let mut output = format!(
        "{} Optimization ended in {}",
        prefix("Optimizer"),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    );
    output.push_str("\n\n");
    output.push_str(&BOX_TOP.bright_cyan().to_string());
    output.push('\n');
    let rows = [
        ("Match score:", format!("{:.3}", v.match_score.unwrap_or(0.0))),
        ("Boat score:", format!("{:.3}", v.boat_score.unwrap_or(0.0))),
        ("Saved shuttles:", format!("{} ({} harbour, {} sea)", harbour + sea, harbour, sea)),
        ("Boat changes:", v.boat_changes.unwrap_or(0).to_string()),
    ];
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(&BOX_BOTTOM.bright_cyan().to_string());
    output.push('\n');
    output
}

fn format_run_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} run {} failed",
        timestamp().bright_black(),
        "ERROR".bright_red(),
        v.run_id.unwrap_or(0)
    )
}

const BOX_TOP: &str = "╔══════════════════════════════════════════════════════════╗";
const BOX_BOTTOM: &str = "╚══════════════════════════════════════════════════════════╝";

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

// Lower is better; zero means nothing left to improve.
fn format_score(score: f64) -> String {
    let text = format!("{:.3}", score);
    if score.abs() < regatta_core::SCORE_EPSILON {
        text.bright_green().to_string()
    } else {
        text.yellow().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_human_readable() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn unknown_events_print_nothing() {
        let visitor = EventVisitor {
            event: Some("step".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
    }

    #[test]
    fn solve_end_shows_summary() {
        let visitor = EventVisitor {
            event: Some("solve_end".into()),
            match_score: Some(1.5),
            shuttles_harbour: Some(3),
            shuttles_sea: Some(2),
            boat_changes: Some(4),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor);
        assert!(output.contains("Match score:"));
        assert!(output.contains("5 (3 harbour, 2 sea)"));
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}

//! habitstack - Local recovery protocol and habit tracker

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use habitstack::config::{DEFAULT_DB_PATH, DEFAULT_WINDOW_DAYS};
use habitstack::entry::{DATE_FORMAT, ProtocolValue, format_number};
use habitstack::habits::{CHART_FIELDS, Mood, Protocol};
use habitstack::planner::build_plan_prompt;
use habitstack::plans::{self, DayPlan, WEEKDAYS};
use habitstack::profile::{self, FitnessLevel};
use habitstack::quotes::random_motivation;
use habitstack::stats::weekly_progress;
use habitstack::weekly_tracker::load_tracker_history;
use habitstack::{HabitTracker, SqliteStore, TrackerContext};

#[derive(Parser)]
#[command(name = "habitstack")]
#[command(author, version, about = "Recovery protocol and habit tracker")]
struct Cli {
    /// Store file
    #[arg(long, global = true, env = "HABITSTACK_DB", default_value = DEFAULT_DB_PATH)]
    db: String,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, env = "HABITSTACK_TODAY", value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Window length for summaries and trends
    #[arg(
        long,
        global = true,
        env = "HABITSTACK_DAYS",
        default_value_t = DEFAULT_WINDOW_DAYS as u16,
        value_parser = clap::value_parser!(u16)
    )]
    days: u16,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest activity, streak and a motivation line
    Dashboard,

    /// Check or uncheck an activity (e.g. "Workout", "Cold Plunge")
    Toggle {
        activity: String,
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Log mood: happy, neutral, tired, stressed
    Mood {
        mood: String,
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Set a protocol value (e.g. plungeDuration 5, peptideType BPC-157); empty value clears it
    Set {
        field: String,
        value: String,
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Set free-text notes for a day
    Note {
        text: String,
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Current and longest streak
    Streak,

    /// Per-activity counts over the window
    Summary,

    /// Chart series for a field (all chart fields when omitted)
    Trends { field: Option<String> },

    /// One day grouped by protocol
    Journal {
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Show a single protocol (e.g. "Sauna")
        #[arg(short, long)]
        protocol: Option<String>,
    },

    /// Most recent logged days
    History {
        #[arg(short, long, default_value = "7")]
        limit: usize,
    },

    /// Completion of the weekly workout plan
    Progress,

    /// Weekly workout planner
    Plan {
        #[command(subcommand)]
        action: Option<PlanCommand>,
    },

    /// Saved workout plans
    Plans {
        #[command(subcommand)]
        action: Option<SavedPlanCommand>,
    },

    /// Weekly tracker records, newest first
    Tracker,

    /// Show or update the body profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<f64>,
        /// Inches
        #[arg(long)]
        height: Option<f64>,
        /// Pounds
        #[arg(long)]
        weight: Option<f64>,
        /// beginner, intermediate, advanced, athlete
        #[arg(long)]
        level: Option<String>,
    },

    /// Show or replace goals
    Goals { goals: Vec<String> },

    /// Print the personalized-plan prompt for the completion service
    Prompt,

    /// Delete all stored data
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PlanCommand {
    /// Show the week
    Show,
    /// Replace a day's exercises
    Set { day: String, exercises: Vec<String> },
    /// Mark an exercise done (1-based)
    Done {
        day: String,
        number: usize,
        #[arg(long)]
        undo: bool,
    },
}

#[derive(Subcommand)]
enum SavedPlanCommand {
    /// List saved plans
    List,
    /// Show one saved plan
    Show { day: String },
    /// Save a plan under a day
    Save { day: String, exercises: Vec<String> },
    /// Delete a saved plan
    Delete { day: String },
}

fn print_day_plan(day: &str, plan: &DayPlan) {
    println!("{}", day);
    if plan.workout.is_empty() {
        println!("  (no exercises)");
    }
    for (i, exercise) in plan.workout.iter().enumerate() {
        println!(
            "  {}. [{}] {}",
            i + 1,
            if exercise.is_completed() { "x" } else { " " },
            exercise.name
        );
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let ctx = match cli.today {
        Some(today) => TrackerContext::new(today),
        None => TrackerContext::for_local_today(),
    }
    .with_window(usize::from(cli.days));
    let today = ctx.today;

    let tracker = HabitTracker::new(SqliteStore::open(&cli.db)?, ctx);

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            let analytics = tracker.analytics();
            let streak = analytics.streak();
            println!("{}", today.format("%A, %B %-d"));
            println!("{:-<40}", "");
            println!("Latest: {}", analytics.latest_activity());
            println!("Streak: {} day(s) (best {})", streak.current, streak.longest);
            if let Some(milestone) = streak.milestone() {
                println!("{}", milestone.message());
            }
            println!();
            println!("\"{}\"", random_motivation());
        }

        Commands::Toggle { activity, date } => {
            let date = date.unwrap_or(today);
            let checked = tracker.toggle_activity(date, &activity)?;
            println!(
                "{} {} on {}",
                if checked { "[x]" } else { "[ ]" },
                activity,
                date.format(DATE_FORMAT)
            );
        }

        Commands::Mood { mood, date } => {
            let Some(parsed) = Mood::parse(&mood) else {
                let options: Vec<_> = Mood::all().iter().map(|m| m.label()).collect();
                bail!("unknown mood '{}', expected one of: {}", mood, options.join(", "));
            };
            let date = date.unwrap_or(today);
            tracker.set_mood(date, parsed)?;
            println!("Mood {} on {}", parsed.label(), date.format(DATE_FORMAT));
        }

        Commands::Set { field, value, date } => {
            let date = date.unwrap_or(today);
            let value = ProtocolValue::parse_input(&value);
            tracker.set_value(date, &field, value.clone())?;
            println!("{} = {} on {}", field, value, date.format(DATE_FORMAT));
        }

        Commands::Note { text, date } => {
            let date = date.unwrap_or(today);
            tracker.set_notes(date, Some(text))?;
            println!("Notes saved for {}", date.format(DATE_FORMAT));
        }

        Commands::Streak => {
            let analytics = tracker.analytics();
            let streak = analytics.streak();
            println!("Current streak: {} day(s)", streak.current);
            println!("Longest streak: {} day(s)", streak.longest);
            println!("Best run ever:  {} day(s)", analytics.best_run());
            if let Some(milestone) = streak.milestone() {
                println!("{}", milestone.message());
            }
        }

        Commands::Summary => {
            let summary = tracker.analytics().weekly_summary();
            println!("Last {} days", summary.window_days);
            println!("{:-<40}", "");
            for (activity, count) in &summary.counts {
                println!(
                    "{:20} {} {}/{} ({}%)",
                    activity,
                    summary.bar(activity),
                    count,
                    summary.window_days,
                    summary.percent(activity)
                );
            }
        }

        Commands::Trends { field } => {
            let analytics = tracker.analytics();
            let fields: Vec<String> = match field {
                Some(f) => vec![f],
                None => CHART_FIELDS.iter().map(|f| f.to_string()).collect(),
            };
            for field in &fields {
                let series = analytics.series(field);
                println!(
                    "{} (total {}, peak {})",
                    series.field,
                    format_number(series.total()),
                    format_number(series.max())
                );
                for (label, value) in series.labels.iter().zip(&series.values) {
                    println!("  {} {:>6}", label, value);
                }
            }
            println!("Peptides used");
            let notes = analytics.peptide_notes();
            if notes.is_empty() {
                println!("  No entries this week.");
            }
            for line in notes {
                println!("  {}", line);
            }
        }

        Commands::Journal { date, protocol } => {
            let only = match protocol {
                Some(name) => match Protocol::find(&name) {
                    Some(p) => Some(p),
                    None => bail!("unknown protocol '{}'", name),
                },
                None => None,
            };
            let date = date.unwrap_or(today);
            let journal = tracker.analytics().journal(date);
            println!("Journal {}", date.format(DATE_FORMAT));
            println!("{:-<40}", "");
            for row in journal.rows.iter().filter(|r| only.is_none_or(|p| r.protocol == p)) {
                println!("{} {:12} {}", row.protocol.emoji(), row.protocol.name(), row.value.render());
            }
            if let Some(notes) = journal.notes {
                println!("Notes: {}", notes);
            }
        }

        Commands::History { limit } => {
            let days = tracker.analytics().recent_days(limit);
            if days.is_empty() {
                println!("No history data available.");
            }
            for day in days {
                println!(
                    "{} | Habits: {} | Mood: {}",
                    day.date.format(DATE_FORMAT),
                    day.habits_display(),
                    day.mood_display()
                );
            }
        }

        Commands::Progress => {
            let rows = weekly_progress(&plans::load_weekly_plan(tracker.store()));
            if rows.is_empty() {
                println!("No weekly plan yet.");
            }
            for row in rows {
                println!("{:10} {}/{} completed ({}%)", row.day, row.completed, row.total, row.percent);
            }
        }

        Commands::Plan { action } => {
            let store = tracker.store();
            match action.unwrap_or(PlanCommand::Show) {
                PlanCommand::Show => {
                    let week = plans::load_weekly_plan(store);
                    for day in WEEKDAYS {
                        match week.get(day) {
                            Some(plan) => print_day_plan(day, plan),
                            None => println!("{}\n  (no plan)", day),
                        }
                    }
                }
                PlanCommand::Set { day, exercises } => {
                    plans::save_day_plan(store, &day, DayPlan::from_names(&exercises))?;
                    println!("Saved {} exercise(s) for {}", exercises.len(), day);
                }
                PlanCommand::Done { day, number, undo } => {
                    let found = number > 0 && plans::mark_completed(store, &day, number - 1, !undo)?;
                    if !found {
                        bail!("no exercise #{} planned for {}", number, day);
                    }
                    println!("Exercise #{} on {} marked {}", number, day, if undo { "open" } else { "done" });
                }
            }
        }

        Commands::Plans { action } => {
            let store = tracker.store();
            match action.unwrap_or(SavedPlanCommand::List) {
                SavedPlanCommand::List => {
                    let saved = plans::all_workout_plans(store);
                    if saved.is_empty() {
                        println!("No saved plans.");
                    }
                    for (day, plan) in plans::ordered_days(&saved) {
                        println!("{:10} {} exercise(s)", day, plan.workout.len());
                    }
                }
                SavedPlanCommand::Show { day } => match plans::load_workout_plan(store, &day) {
                    Some(plan) => print_day_plan(&day, &plan),
                    None => println!("No saved plan for {}", day),
                },
                SavedPlanCommand::Save { day, exercises } => {
                    plans::save_workout_plan(store, &day, DayPlan::from_names(&exercises))?;
                    println!("Saved plan for {}", day);
                }
                SavedPlanCommand::Delete { day } => {
                    if plans::delete_workout_plan(store, &day)? {
                        println!("Deleted plan for {}", day);
                    } else {
                        println!("No saved plan for {}", day);
                    }
                }
            }
        }

        Commands::Tracker => {
            let history = load_tracker_history(tracker.store());
            if history.is_empty() {
                println!("No history available.");
            }
            for record in history {
                println!("{}", record.date);
                for metric in record.metrics() {
                    println!("  {}", metric);
                }
            }
        }

        Commands::Profile { name, age, height, weight, level } => {
            let store = tracker.store();
            let mut p = profile::load_profile(store);
            let updating = name.is_some() || age.is_some() || height.is_some() || weight.is_some() || level.is_some();

            if updating {
                if let Some(name) = name {
                    p.name = name;
                }
                if age.is_some() {
                    p.age = age;
                }
                if height.is_some() {
                    p.height = height;
                }
                if weight.is_some() {
                    p.weight = weight;
                }
                if let Some(level) = level {
                    let Some(parsed) = FitnessLevel::parse(&level) else {
                        bail!("unknown fitness level '{}'", level);
                    };
                    p.fitness_level = Some(parsed);
                }
                profile::save_profile(store, &p)?;
                println!("Profile saved!");
            }

            println!("{}", serde_json::to_string_pretty(&p)?);
        }

        Commands::Goals { goals } => {
            let store = tracker.store();
            let goals = if goals.is_empty() {
                profile::load_goals(store)
            } else {
                profile::save_goals(store, &goals)?
            };
            if goals.is_empty() {
                println!("No goals set.");
            }
            for goal in goals {
                println!("- {}", goal);
            }
        }

        Commands::Prompt => {
            let store = tracker.store();
            let p = profile::load_profile(store);
            p.validate()?;
            let goals = profile::load_goals(store);
            println!("{}", build_plan_prompt(&p, &goals));
        }

        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to clear without --yes");
            }
            tracker.clear_all()?;
            println!("All data cleared.");
        }
    }

    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use capacity_engine::calculations::assignment::AssignmentSuggester;
use capacity_engine::calculations::availability::AvailabilityCalculator;
use capacity_engine::calculations::capacity::CapacityCalculator;
use capacity_engine::calculations::estimation::EstimationCalculator;
use capacity_engine::calculations::scoping::ScopingCalculator;
use capacity_engine::calculations::team_calendar::TeamCalendar;
use capacity_engine::calendar::DateRange;
use capacity_engine::config::EngineConfig;
use capacity_engine::error::EngineError;
use capacity_engine::people::User;
use capacity_engine::persistence::{
    load_snapshot_from_json, save_capacity_report_to_csv, save_snapshot_to_json,
};
use capacity_engine::report::CapacityReport;
use capacity_engine::snapshot::PlanningSnapshot;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use polars::prelude::{AnyValue, DataFrame};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Parser)]
#[command(name = "capacity-cli", version, about = "Capacity, availability and assignment queries over a planning snapshot")]
struct Cli {
    /// Planning snapshot (JSON)
    #[arg(short, long, global = true, default_value = "planning.json")]
    data: PathBuf,

    /// Engine configuration (TOML); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Json,
    Table,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Day-by-day availability of one user
    Availability {
        #[arg(long)]
        user: i32,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Include the per-day calendar, not just the summary
        #[arg(long)]
        days: bool,
    },
    /// Capacity breakdown of one user
    Capacity {
        #[arg(long)]
        user: i32,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Hours per story point
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Capacity of every member of a team or project (all users by default)
    CapacityReport {
        #[arg(long, conflicts_with = "project")]
        team: Option<i32>,
        #[arg(long)]
        project: Option<i32>,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, value_enum, default_value = "json")]
        format: ReportFormat,
        /// Also write the report as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Consolidated team calendar with summary and who is out today
    TeamCalendar {
        #[arg(long)]
        team: i32,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Day used for the on-leave list; defaults to the local date
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Include every day of the consolidated view
        #[arg(long)]
        days: bool,
    },
    /// Effort estimate of a project
    Estimate {
        #[arg(long)]
        project: i32,
    },
    /// Ranked assignees for a story or subtask
    Suggest {
        #[arg(long)]
        project: i32,
        #[arg(long, conflicts_with = "subtask", required_unless_present = "subtask")]
        story: Option<i32>,
        #[arg(long)]
        subtask: Option<i32>,
    },
    /// Rough sizing and completion status of a project's scope
    Scoping {
        #[arg(long)]
        project: i32,
    },
    /// Turn an approved scope item into an epic and save the snapshot
    ConvertScope {
        #[arg(long)]
        project: i32,
        #[arg(long)]
        item: i32,
    },
    /// Close scoping and move the project to estimation, saving the snapshot
    CompleteScoping {
        #[arg(long)]
        project: i32,
    },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("capacity-cli error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let mut snapshot = load_snapshot_from_json(&cli.data, &config)
        .with_context(|| format!("failed to load snapshot {}", cli.data.display()))?;

    match cli.command {
        Command::Availability {
            user,
            start,
            end,
            days,
        } => {
            let user = snapshot.user(user)?;
            let facts = snapshot.absence_index_in_range(DateRange::new(start, end)?);
            let calculator = AvailabilityCalculator::new(user, start, end, &facts, &config.work_week)?;
            if days {
                print_json(&json!({
                    "user_id": user.id,
                    "days": calculator.days(),
                    "summary": calculator.summary(),
                }))
            } else {
                print_json(&calculator.summary())
            }
        }
        Command::Capacity {
            user,
            start,
            end,
            rate,
        } => {
            let user = snapshot.user(user)?;
            let facts = snapshot.absence_index_in_range(DateRange::new(start, end)?);
            let calculator = CapacityCalculator::new(user, start, end, &facts, &config)?;
            let rate = rate.unwrap_or(config.default_points_to_hours);
            print_json(&calculator.breakdown_with_rate(rate))
        }
        Command::CapacityReport {
            team,
            project,
            start,
            end,
            format,
            csv,
        } => {
            let users = report_users(&snapshot, team, project)?;
            let facts = snapshot.absence_index_in_range(DateRange::new(start, end)?);
            let report = CapacityReport::build(&users, start, end, &facts, &config)?;
            if let Some(path) = &csv {
                save_capacity_report_to_csv(&report, path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            match format {
                ReportFormat::Json => print_json(&report),
                ReportFormat::Table => {
                    println!("{}", render_df_as_text_table(&report.to_dataframe()?));
                    Ok(())
                }
            }
        }
        Command::TeamCalendar {
            team,
            start,
            end,
            today,
            days,
        } => {
            let team = snapshot.team(team)?;
            let members = snapshot.team_members(team);
            let facts = snapshot.absence_index_in_range(DateRange::new(start, end)?);
            let calendar = TeamCalendar::new(members, start, end, &facts, &config.work_week)?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let mut output = json!({
                "team": team.name,
                "summary": calendar.summary(),
                "today": today,
                "on_leave": calendar.on_leave(today),
            });
            if days {
                output["days"] = serde_json::to_value(calendar.consolidated())?;
            }
            print_json(&output)
        }
        Command::Estimate { project } => {
            let project = snapshot.project(project)?;
            let members = snapshot.project_members(project);
            let estimator = EstimationCalculator::new(project, &config);
            print_json(&json!({
                "breakdown": estimator.breakdown(),
                "by_epic": estimator.by_epic(),
                "by_team_member": estimator.by_team_member(&members),
            }))
        }
        Command::Suggest {
            project,
            story,
            subtask,
        } => {
            let project = snapshot.project(project)?;
            let members = snapshot.project_members(project);
            let suggestions = match (story, subtask) {
                (Some(id), _) => {
                    let story = project.find_story(id).ok_or(EngineError::UnknownStory(id))?;
                    let suggester = AssignmentSuggester::new(project, members, story, &config);
                    json!({
                        "required_skill": suggester.required_skill(),
                        "suggestions": suggester.suggest(),
                    })
                }
                (None, Some(id)) => {
                    let subtask = project
                        .find_subtask(id)
                        .ok_or(EngineError::UnknownSubtask(id))?;
                    let suggester = AssignmentSuggester::new(project, members, subtask, &config);
                    json!({
                        "required_skill": suggester.required_skill(),
                        "suggestions": suggester.suggest(),
                    })
                }
                (None, None) => anyhow::bail!("either --story or --subtask is required"),
            };
            print_json(&suggestions)
        }
        Command::Scoping { project } => {
            let project = snapshot.project(project)?;
            let scoping = ScopingCalculator::new(project, &config);
            print_json(&json!({
                "total_rough_hours": scoping.total_rough_hours(),
                "rough_weeks": scoping.rough_weeks(config.scoping_hours_per_week),
                "hours_by_size": scoping.hours_by_size(),
                "hours_by_category": scoping.hours_by_category(),
                "completion_status": scoping.completion_status(),
                "ready_to_complete": scoping.ready_to_complete(),
            }))
        }
        Command::ConvertScope { project, item } => {
            let epic_id = snapshot.project_mut(project)?.convert_scope_item(item)?;
            save(&snapshot, &cli.data)?;
            print_json(&json!({ "project": project, "scope_item": item, "epic_id": epic_id }))
        }
        Command::CompleteScoping { project } => {
            let target = snapshot.project_mut(project)?;
            target.advance_to_estimation(Utc::now())?;
            let completed_at = target.scoping_completed_at;
            save(&snapshot, &cli.data)?;
            print_json(&json!({ "project": project, "scoping_completed_at": completed_at }))
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("CAPACITY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn report_users(
    snapshot: &PlanningSnapshot,
    team: Option<i32>,
    project: Option<i32>,
) -> anyhow::Result<Vec<&User>> {
    let users = match (team, project) {
        (Some(id), _) => snapshot.team_members(snapshot.team(id)?),
        (None, Some(id)) => snapshot.project_members(snapshot.project(id)?),
        (None, None) => snapshot.users.iter().collect(),
    };
    Ok(users)
}

fn save(snapshot: &PlanningSnapshot, path: &Path) -> anyhow::Result<()> {
    save_snapshot_to_json(snapshot, path)
        .with_context(|| format!("failed to save snapshot {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cells: Vec<Vec<String>> = (0..df.height())
        .map(|row_idx| {
            columns
                .iter()
                .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (ci, value) in values.iter().enumerate() {
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(value.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = Vec::with_capacity(cells.len() + 4);
    out.push(sep.clone());
    out.push(render_row(&col_names));
    out.push(sep.clone());
    out.extend(cells.iter().map(|row| render_row(row)));
    out.push(sep);
    out.join("\n")
}

use crate::infra::{DriverSummaryExplainer, InMemoryHistoryRepository};
use burnout_radar::error::AppError;
use burnout_radar::workflows::burnout::breakdown::zone_magnitudes;
use burnout_radar::workflows::burnout::{
    simulate_sleep_increase, Assessment, BurnoutService, HistorySeries, Insights, RawInputs,
    UserId,
};
use burnout_radar::workflows::journal::JournalImporter;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// User requesting the score
    #[arg(long)]
    pub(crate) user: String,
    /// Hours slept last night (0-12)
    #[arg(long, default_value_t = 7.0)]
    pub(crate) sleep: f64,
    /// Hours of screen time today (0-16)
    #[arg(long, default_value_t = 6.0)]
    pub(crate) screen: f64,
    /// Number of tasks on today's plate (0-10)
    #[arg(long, default_value_t = 3)]
    pub(crate) tasks: i32,
    /// Self-rated mood, 1 (low) to 5 (great)
    #[arg(long, default_value_t = 3)]
    pub(crate) mood: i32,
}

#[derive(Args, Debug)]
pub(crate) struct JournalArgs {
    /// CSV journal with date, sleep_hours, screen_hours, task_count, mood columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// User the imported days belong to
    #[arg(long)]
    pub(crate) user: String,
    /// Day treated as today when computing the trend (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// User the simulated week is saved under
    #[arg(long, default_value = "demo")]
    pub(crate) user: String,
    /// Last day of the simulated week (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let user_id = UserId::parse(Some(args.user.as_str()))?;
    let inputs = RawInputs::new(args.sleep, args.screen, args.tasks, args.mood);
    let service = BurnoutService::new(Arc::new(InMemoryHistoryRepository::default()));
    let assessment = service.assess(&inputs);

    println!("Burnout risk score for {}", user_id);
    render_assessment(&assessment);
    Ok(())
}

pub(crate) fn run_journal_import(args: JournalArgs) -> Result<(), AppError> {
    let JournalArgs { csv, user, today } = args;
    let user_id = UserId::parse(Some(user.as_str()))?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let entries = JournalImporter::from_path(&csv)?;
    let service = BurnoutService::new(Arc::new(InMemoryHistoryRepository::default()));
    let summary = JournalImporter::import_into(&service, &user_id, &entries)?;

    println!("Journal import for {}", user_id);
    println!(
        "- {} rows read from {} | {} days stored | {} days overwritten by later rows",
        entries.len(),
        csv.display(),
        summary.inserted,
        summary.replaced
    );

    let history = service.history(&user_id)?;
    render_history(&history);

    match history.latest() {
        Some(latest) => {
            let insights = service.insights(&user_id, &latest.inputs(), today);
            render_trend(&insights);
        }
        None => println!("No days imported; nothing to project."),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { user, today } = args;
    let user_id = UserId::parse(Some(user.as_str()))?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let service = BurnoutService::new(Arc::new(InMemoryHistoryRepository::default()))
        .with_explainer(Arc::new(DriverSummaryExplainer));

    println!("Burnout radar demo for {}", user_id);
    let week = demo_week();
    let first_day = today - Duration::days(week.len() as i64 - 1);

    for (offset, inputs) in week.iter().enumerate() {
        let date = first_day + Duration::days(offset as i64);
        let saved = service.save(&user_id, date, inputs)?;
        println!(
            "- {}: sleep {:.1}h | screen {:.1}h | {} tasks | mood {} -> {} ({})",
            date,
            inputs.sleep_hours,
            inputs.screen_hours,
            inputs.task_count,
            inputs.mood,
            saved.record.score,
            saved.record.category
        );
    }

    let current = week.last().copied().unwrap_or_default();
    let insights = service.insights(&user_id, &current, today);
    println!("\nToday's assessment");
    render_assessment(&insights.assessment);
    render_trend(&insights);

    match service.explain(&user_id, &current, "Sprint review on Friday") {
        Ok(text) => println!("\nExplanation\n  {}", text),
        Err(err) => println!("\nExplanation unavailable: {}", err),
    }

    Ok(())
}

fn demo_week() -> Vec<RawInputs> {
    vec![
        RawInputs::new(8.0, 3.0, 2, 4),
        RawInputs::new(7.5, 4.0, 3, 4),
        RawInputs::new(7.0, 5.5, 4, 3),
        RawInputs::new(6.5, 7.0, 5, 3),
        RawInputs::new(6.0, 8.0, 6, 3),
        RawInputs::new(5.5, 9.0, 7, 2),
        RawInputs::new(5.0, 10.0, 8, 2),
    ]
}

fn render_assessment(assessment: &Assessment) {
    let inputs = &assessment.inputs;
    let sub_scores = &assessment.sub_scores;
    println!(
        "- Inputs: sleep {:.1}h | screen {:.1}h | {} tasks | mood {}",
        inputs.sleep_hours, inputs.screen_hours, inputs.task_count, inputs.mood
    );
    println!(
        "- Score {} / 100 -> {} risk",
        assessment.score, assessment.category
    );
    println!(
        "- Drivers: sleep {:.2} | screen {:.2} | tasks {:.2} | mood {:.2}",
        sub_scores.sleep, sub_scores.screen, sub_scores.tasks, sub_scores.mood
    );
    println!("- Stress zones:");
    for share in zone_magnitudes(assessment.score) {
        println!("    - {}: {}", share.zone.label(), share.magnitude);
    }
    println!(
        "- With one more hour of sleep: {}",
        simulate_sleep_increase(inputs, sub_scores)
    );
}

fn render_history(history: &HistorySeries) {
    println!("Stored history ({} days):", history.len());
    for record in history.records() {
        println!(
            "  - {}: {} ({})",
            record.date, record.score, record.category
        );
    }
}

fn render_trend(insights: &Insights) {
    match insights.trend {
        Some(trend) => println!(
            "Trend: {} ({:+.1} per day) | projected next score {}",
            trend.direction.label(),
            trend.mean_delta,
            trend.projected_next
        ),
        None => println!("Trend: not enough earlier days to project yet"),
    }
}

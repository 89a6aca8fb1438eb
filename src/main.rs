use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use exit_advisor::config::AppConfig;
use exit_advisor::error::AppError;
use exit_advisor::telemetry;
use exit_advisor::workflows::assessment::repository::RecordOverview;
use exit_advisor::workflows::assessment::{
    AnswerSheetImporter, AssessmentCatalog, AssessmentResultSummary, AssessmentService,
    InMemoryResultRepository,
};
use exit_advisor::workflows::wealth::{
    compute_wealth_gap, parse_money, scenario_analysis, ScenarioOutcome, WealthGapInputs,
    WealthGapResult,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    advisor: Arc<AssessmentService<InMemoryResultRepository>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Exit Advisor",
    about = "Run the exit-planning advisory service or its calculators from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score an assessment from an exported answer sheet
    Assessment {
        #[command(subcommand)]
        command: AssessmentCommand,
    },
    /// Run the wealth gap calculator for advisor demos
    WealthGap(WealthGapArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum AssessmentCommand {
    /// Score a `Question ID,Answer` CSV against a cataloged assessment
    Score(AssessmentScoreArgs),
}

#[derive(Args, Debug)]
struct AssessmentScoreArgs {
    /// Catalog slug to score against
    #[arg(long, default_value = "owner-centricity")]
    assessment: String,
    /// Path to the exported answer sheet
    #[arg(long)]
    answers_csv: PathBuf,
    /// Include the category-by-category breakdown
    #[arg(long)]
    breakdown: bool,
}

#[derive(Args, Debug)]
struct WealthGapArgs {
    /// Current annual income (dollar formatting accepted)
    #[arg(long, default_value = "")]
    current_income: String,
    /// Desired post-exit annual income
    #[arg(long, default_value = "")]
    desired_income: String,
    /// Current personal assets outside the business
    #[arg(long, default_value = "")]
    current_assets: String,
    /// Estimated business value
    #[arg(long, default_value = "")]
    business_value: String,
    /// Years until the planned exit
    #[arg(long, default_value_t = 0.0)]
    time_to_exit: f64,
    /// Current annual living expenses
    #[arg(long, default_value = "")]
    current_expenses: String,
    /// Projected post-exit annual expenses
    #[arg(long, default_value = "")]
    post_exit_expenses: String,
    /// Include the withdrawal-rate scenario table
    #[arg(long)]
    scenarios: bool,
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    /// Selected option index (0-based) per question id.
    #[serde(default)]
    answers: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
struct ScoreResponse {
    answered: usize,
    questions: usize,
    complete: bool,
    summary: AssessmentResultSummary,
}

#[derive(Debug, Serialize)]
struct RecordResponse {
    result_id: String,
    recorded_at: chrono::DateTime<chrono::Utc>,
    summary: AssessmentResultSummary,
}

#[derive(Debug, Serialize)]
struct CatalogEntry {
    slug: &'static str,
    title: &'static str,
    categories: usize,
    questions: usize,
    max_option_score: u32,
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    limit: usize,
}

fn default_recent_limit() -> usize {
    20
}

/// Money fields arrive from forms as numbers or formatted strings; blank or
/// garbled values compute as zero instead of failing the request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MoneyField {
    Number(f64),
    Text(String),
}

impl MoneyField {
    fn amount(&self) -> f64 {
        match self {
            MoneyField::Number(value) => value.max(0.0),
            MoneyField::Text(raw) => parse_money(raw),
        }
    }
}

fn money_or_zero(field: &Option<MoneyField>) -> f64 {
    field.as_ref().map(MoneyField::amount).unwrap_or(0.0)
}

#[derive(Debug, Deserialize)]
struct WealthGapRequest {
    #[serde(default)]
    current_income: Option<MoneyField>,
    #[serde(default)]
    desired_income: Option<MoneyField>,
    #[serde(default)]
    current_assets: Option<MoneyField>,
    #[serde(default)]
    business_value: Option<MoneyField>,
    #[serde(default)]
    time_to_exit: Option<MoneyField>,
    #[serde(default)]
    current_expenses: Option<MoneyField>,
    #[serde(default)]
    post_exit_expenses: Option<MoneyField>,
    #[serde(default)]
    include_scenarios: bool,
}

impl WealthGapRequest {
    fn inputs(&self) -> WealthGapInputs {
        WealthGapInputs {
            current_income: money_or_zero(&self.current_income),
            desired_income: money_or_zero(&self.desired_income),
            current_assets: money_or_zero(&self.current_assets),
            business_value: money_or_zero(&self.business_value),
            time_to_exit: money_or_zero(&self.time_to_exit),
            current_expenses: money_or_zero(&self.current_expenses),
            post_exit_expenses: money_or_zero(&self.post_exit_expenses),
        }
    }
}

#[derive(Debug, Serialize)]
struct WealthGapResponse {
    inputs: WealthGapInputs,
    result: WealthGapResult,
    recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenarios: Option<Vec<ScenarioOutcome>>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Assessment {
            command: AssessmentCommand::Score(args),
        } => run_assessment_score(args),
        Command::WealthGap(args) => run_wealth_gap(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = AssessmentCatalog::standard()?;
    let advisor = Arc::new(AssessmentService::new(
        catalog,
        Arc::new(InMemoryResultRepository::new()),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        advisor,
    };

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "exit advisor service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assessments", get(list_assessments_endpoint))
        .route("/api/v1/assessments/:slug/score", post(score_endpoint))
        .route("/api/v1/assessments/:slug/results", post(record_endpoint))
        .route("/api/v1/results", get(recent_results_endpoint))
        .route("/api/v1/wealth-gap", post(wealth_gap_endpoint))
        .with_state(state)
}

fn run_assessment_score(args: AssessmentScoreArgs) -> Result<(), AppError> {
    let catalog = AssessmentCatalog::standard()?;
    let assessment = catalog
        .get(&args.assessment)
        .ok_or_else(|| AppError::UnknownAssessment(args.assessment.clone()))?;

    let session = AnswerSheetImporter::from_path(&args.answers_csv, assessment)?;
    let summary = session.result().summary();

    render_assessment_report(
        &summary,
        session.answered_count(),
        assessment.question_count(),
        args.breakdown,
    );

    Ok(())
}

fn run_wealth_gap(args: WealthGapArgs) -> Result<(), AppError> {
    let inputs = WealthGapInputs {
        current_income: parse_money(&args.current_income),
        desired_income: parse_money(&args.desired_income),
        current_assets: parse_money(&args.current_assets),
        business_value: parse_money(&args.business_value),
        time_to_exit: args.time_to_exit.max(0.0),
        current_expenses: parse_money(&args.current_expenses),
        post_exit_expenses: parse_money(&args.post_exit_expenses),
    };

    let result = compute_wealth_gap(&inputs);
    render_wealth_gap_report(&inputs, &result);

    if args.scenarios {
        render_scenario_table(&scenario_analysis(&inputs));
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn list_assessments_endpoint(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    let entries = state
        .advisor
        .catalog()
        .assessments()
        .iter()
        .map(|assessment| CatalogEntry {
            slug: assessment.slug,
            title: assessment.title,
            categories: assessment.categories.len(),
            questions: assessment.question_count(),
            max_option_score: assessment.max_option_score(),
        })
        .collect();

    Json(entries)
}

/// Live scoring for an in-flight session: partial answer maps are welcome
/// and produce the running re-normalized score.
async fn score_endpoint(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let mut session = state
        .advisor
        .begin(&slug)
        .map_err(|_| AppError::UnknownAssessment(slug.clone()))?;

    for (question_id, option_index) in &payload.answers {
        session.answer(question_id, *option_index)?;
    }

    Ok(Json(ScoreResponse {
        answered: session.answered_count(),
        questions: session.assessment().question_count(),
        complete: session.is_complete(),
        summary: session.result().summary(),
    }))
}

/// Final hand-off: a complete answer map is scored and recorded with the
/// results collaborator.
async fn record_endpoint(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let mut session = state
        .advisor
        .begin(&slug)
        .map_err(|_| AppError::UnknownAssessment(slug.clone()))?;

    for (question_id, option_index) in &payload.answers {
        session.answer(question_id, *option_index)?;
    }

    let record = state.advisor.complete(&session)?;

    Ok(Json(RecordResponse {
        result_id: record.result_id.0.clone(),
        recorded_at: record.recorded_at,
        summary: record.result.summary(),
    }))
}

async fn recent_results_endpoint(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<RecordOverview>>, AppError> {
    let overviews = state
        .advisor
        .recent_results(query.limit)
        .map_err(AppError::Service)?;
    Ok(Json(overviews))
}

async fn wealth_gap_endpoint(
    Json(payload): Json<WealthGapRequest>,
) -> Result<Json<WealthGapResponse>, AppError> {
    let inputs = payload.inputs();
    let result = compute_wealth_gap(&inputs);
    let scenarios = payload.include_scenarios.then(|| scenario_analysis(&inputs));

    Ok(Json(WealthGapResponse {
        inputs,
        recommendation: result.recommendation(),
        result,
        scenarios,
    }))
}

fn render_assessment_report(
    summary: &AssessmentResultSummary,
    answered: usize,
    questions: usize,
    breakdown: bool,
) {
    println!("{}", summary.assessment_title);
    println!("Answered: {answered}/{questions} questions");
    println!(
        "\nFinal score: {}/100 ({})",
        summary.final_score, summary.tier_label
    );
    println!("{}", summary.interpretation.description);
    println!("Value impact: {}", summary.interpretation.value_impact);
    println!("Exit readiness: {}", summary.interpretation.readiness);

    if breakdown {
        println!("\nCategory breakdown");
        for category in &summary.categories {
            match category.score {
                Some(score) => println!(
                    "- {} ({}% weight): {}/100 ({}) [{} of {} answered]",
                    category.name,
                    category.weight_pct,
                    score,
                    category.tier_label.unwrap_or("n/a"),
                    category.answered,
                    category.questions
                ),
                None => println!(
                    "- {} ({}% weight): not yet assessed",
                    category.name, category.weight_pct
                ),
            }
        }
    }
}

fn render_wealth_gap_report(inputs: &WealthGapInputs, result: &WealthGapResult) {
    println!("Wealth gap analysis");
    println!(
        "Desired income ${:.0}/yr over a {:.0}-year exit window",
        inputs.desired_income,
        inputs.time_to_exit.max(1.0)
    );

    println!("\nCapital needed (4% rule): ${:.0}", result.capital_needed);
    println!("Projected assets: ${:.0}", result.total_assets);

    if result.has_gap {
        println!("Wealth gap: ${:.0}", result.wealth_gap);
        println!(
            "Required business value growth: ${:.0}/yr ({:.1}% annually)",
            result.annual_value_needed, result.required_growth_pct
        );
    } else {
        println!("Wealth gap: none");
        println!("Years of income security: {:.1}", result.years_of_security);
    }

    println!("\n{}", result.recommendation());
}

fn render_scenario_table(outcomes: &[ScenarioOutcome]) {
    println!("\nWithdrawal-rate scenarios");
    for outcome in outcomes {
        let standing = if outcome.has_gap {
            format!("gap ${:.0}", outcome.wealth_gap)
        } else {
            format!("surplus ${:.0}", outcome.surplus)
        };
        println!(
            "- {} [{}]: needs ${:.0}, {} (adequacy {:.2})",
            outcome.name, outcome.risk_level, outcome.capital_needed, standing, outcome.adequacy_ratio
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::util::ServiceExt;

    fn test_state() -> AppState {
        let catalog = AssessmentCatalog::standard().expect("catalog builds");
        let advisor = Arc::new(AssessmentService::new(
            catalog,
            Arc::new(InMemoryResultRepository::new()),
        ));

        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: PrometheusBuilder::new().build_recorder().handle(),
            advisor,
        }
    }

    fn full_answer_map(option_index: usize) -> BTreeMap<String, usize> {
        exit_advisor::workflows::assessment::catalog::owner_centricity()
            .categories
            .iter()
            .flat_map(|category| category.questions.iter())
            .map(|question| (question.id.to_string(), option_index))
            .collect()
    }

    #[tokio::test]
    async fn catalog_endpoint_lists_both_assessments() {
        let Json(entries) = list_assessments_endpoint(State(test_state())).await;

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|entry| entry.slug == "owner-centricity"
            && entry.questions == 12
            && entry.max_option_score == 4));
        assert!(entries
            .iter()
            .any(|entry| entry.slug == "personal-vision" && entry.max_option_score == 5));
    }

    #[tokio::test]
    async fn score_endpoint_accepts_partial_answer_maps() {
        let mut answers = BTreeMap::new();
        answers.insert("customer_relationships".to_string(), 0usize);
        answers.insert("sales_process".to_string(), 0usize);
        answers.insert("new_customer_acquisition".to_string(), 0usize);

        let Json(body) = score_endpoint(
            State(test_state()),
            Path("owner-centricity".to_string()),
            Json(ScoreRequest { answers }),
        )
        .await
        .expect("partial scoring succeeds");

        assert_eq!(body.answered, 3);
        assert!(!body.complete);
        // Only the sales category is assessable, so its perfect score carries.
        assert_eq!(body.summary.final_score, 100);
    }

    #[tokio::test]
    async fn score_endpoint_rejects_unknown_slugs() {
        let error = score_endpoint(
            State(test_state()),
            Path("mystery".to_string()),
            Json(ScoreRequest {
                answers: BTreeMap::new(),
            }),
        )
        .await
        .expect_err("unknown assessment rejected");

        assert!(matches!(error, AppError::UnknownAssessment(_)));
    }

    #[tokio::test]
    async fn record_endpoint_persists_completed_assessments() {
        let state = test_state();

        let Json(recorded) = record_endpoint(
            State(state.clone()),
            Path("owner-centricity".to_string()),
            Json(ScoreRequest {
                answers: full_answer_map(0),
            }),
        )
        .await
        .expect("complete submission records");

        assert!(recorded.result_id.starts_with("res-"));
        assert_eq!(recorded.summary.final_score, 100);

        let Json(recent) = recent_results_endpoint(State(state), Query(RecentQuery { limit: 10 }))
            .await
            .expect("recent listing succeeds");
        assert!(recent
            .iter()
            .any(|overview| overview.result_id.0 == recorded.result_id));
    }

    #[tokio::test]
    async fn record_endpoint_rejects_incomplete_submissions() {
        let mut answers = BTreeMap::new();
        answers.insert("customer_relationships".to_string(), 0usize);

        let error = record_endpoint(
            State(test_state()),
            Path("owner-centricity".to_string()),
            Json(ScoreRequest { answers }),
        )
        .await
        .expect_err("incomplete submission rejected");

        assert!(matches!(error, AppError::Service(_)));
    }

    #[tokio::test]
    async fn wealth_gap_endpoint_tolerates_formatted_and_missing_fields() {
        let payload = WealthGapRequest {
            current_income: None,
            desired_income: Some(MoneyField::Text("$150,000".to_string())),
            current_assets: Some(MoneyField::Number(500_000.0)),
            business_value: Some(MoneyField::Text("3,000,000".to_string())),
            time_to_exit: Some(MoneyField::Number(5.0)),
            current_expenses: None,
            post_exit_expenses: Some(MoneyField::Text(String::new())),
            include_scenarios: true,
        };

        let Json(body) = wealth_gap_endpoint(Json(payload))
            .await
            .expect("calculator always computes");

        assert_eq!(body.result.wealth_gap, 250_000.0);
        assert_eq!(body.result.required_growth_pct, 1.7);
        let scenarios = body.scenarios.expect("scenario table included");
        assert_eq!(scenarios.len(), 3);
    }

    #[tokio::test]
    async fn router_serves_health_and_readiness() {
        let app = router(test_state());

        let response = app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/ready")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}

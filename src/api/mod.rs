use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{Assumptions, YearSnapshot, project_series};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Fields the web UI may send; anything omitted falls back to the CLI
/// defaults, which mirror the source widget's initial form state.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    contribution_cutoff_age: Option<u32>,
    current_savings: Option<f64>,
    annual_contribution: Option<f64>,
    expected_return: Option<f64>,
    social_security_benefit: Option<f64>,
    annual_expenses: Option<f64>,
    inflation_rate: Option<f64>,
    years: Option<u32>,
}

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Retirement income estimator (compound growth + 4% rule)"
)]
struct Cli {
    #[arg(long, default_value_t = 30, help = "Current age in years (20-80)")]
    current_age: u32,
    #[arg(long, default_value_t = 65, help = "Age the projection starts at")]
    retirement_age: u32,
    #[arg(
        long,
        help = "Last age annual contributions accrue; defaults to retirement age"
    )]
    contribution_cutoff_age: Option<u32>,
    #[arg(long, default_value_t = 100_000.0, help = "Current investment balance")]
    current_savings: f64,
    #[arg(
        long,
        default_value_t = 10_000.0,
        help = "Annual contribution in today's dollars, applied until the cutoff age"
    )]
    annual_contribution: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Expected annual return in percent, e.g. 7"
    )]
    expected_return: f64,
    #[arg(
        long,
        default_value_t = 20_000.0,
        help = "Annual Social Security benefit in today's dollars"
    )]
    social_security_benefit: f64,
    #[arg(
        long,
        default_value_t = 50_000.0,
        help = "Annual expenses in today's dollars"
    )]
    annual_expenses: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Expected annual inflation in percent"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 30,
        help = "Number of consecutive years to project from retirement age"
    )]
    years: u32,
}

#[derive(Debug)]
struct ApiRequest {
    assumptions: Assumptions,
    years: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    current_age: u32,
    retirement_age: u32,
    contribution_cutoff_age: u32,
    years: u32,
    snapshots: Vec<YearSnapshot>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_assumptions(cli: &Cli) -> Result<Assumptions, String> {
    if !(20..=80).contains(&cli.current_age) {
        return Err("--current-age must be between 20 and 80".to_string());
    }

    if cli.retirement_age < cli.current_age {
        return Err("--retirement-age must be >= --current-age".to_string());
    }

    if cli.retirement_age > 100 {
        return Err("--retirement-age must be <= 100".to_string());
    }

    if let Some(cutoff) = cli.contribution_cutoff_age {
        if cutoff > 100 {
            return Err("--contribution-cutoff-age must be <= 100".to_string());
        }
    }

    for (name, value) in [
        ("--current-savings", cli.current_savings),
        ("--annual-contribution", cli.annual_contribution),
        ("--social-security-benefit", cli.social_security_benefit),
        ("--annual-expenses", cli.annual_expenses),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be a finite amount >= 0"));
        }
    }

    // Zero is allowed through: the engine documents NaN output for a zero
    // expected return rather than rejecting it here.
    if !cli.expected_return.is_finite() {
        return Err("--expected-return must be finite".to_string());
    }

    if !cli.inflation_rate.is_finite() {
        return Err("--inflation-rate must be finite".to_string());
    }

    if cli.years == 0 || cli.years > 100 {
        return Err("--years must be between 1 and 100".to_string());
    }

    Ok(Assumptions {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        contribution_cutoff_age: cli.contribution_cutoff_age.unwrap_or(cli.retirement_age),
        current_savings: cli.current_savings,
        annual_contribution: cli.annual_contribution,
        expected_return: cli.expected_return,
        social_security_benefit: cli.social_security_benefit,
        annual_expenses: cli.annual_expenses,
        inflation_rate: cli.inflation_rate,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("nestegg HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let assumptions = request.assumptions;
    let snapshots = project_series(&assumptions, assumptions.retirement_age, request.years);
    json_response(
        StatusCode::OK,
        ProjectResponse {
            current_age: assumptions.current_age,
            retirement_age: assumptions.retirement_age,
            contribution_cutoff_age: assumptions.contribution_cutoff_age,
            years: request.years,
            snapshots,
        },
    )
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ProjectPayload) -> Result<ApiRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.contribution_cutoff_age {
        cli.contribution_cutoff_age = Some(v);
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.annual_contribution {
        cli.annual_contribution = v;
    }
    if let Some(v) = payload.expected_return {
        cli.expected_return = v;
    }
    if let Some(v) = payload.social_security_benefit {
        cli.social_security_benefit = v;
    }
    if let Some(v) = payload.annual_expenses {
        cli.annual_expenses = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }

    let assumptions = build_assumptions(&cli)?;
    Ok(ApiRequest {
        assumptions,
        years: cli.years,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 30,
        retirement_age: 65,
        contribution_cutoff_age: None,
        current_savings: 100_000.0,
        annual_contribution: 10_000.0,
        expected_return: 7.0,
        social_security_benefit: 20_000.0,
        annual_expenses: 50_000.0,
        inflation_rate: 3.0,
        years: 30,
    }
}

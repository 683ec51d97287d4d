use gearcart_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

use crate::context::AppContext;

use super::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub async fn run(ctx: &AppContext, json_output: bool) -> CommandResult {
    let report = build_report(ctx).await;
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report)
            .unwrap_or_else(|error| format!("doctor serialization failed: {error}"))
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

async fn build_report(ctx: &AppContext) -> DoctorReport {
    let checks = vec![check_config(), check_local_store(ctx), check_api_health(ctx).await];

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_config() -> DoctorCheck {
    match AppConfig::load(LoadOptions::default()) {
        Ok(_) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Pass,
            details: "configuration loaded and validated".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_local_store(ctx: &AppContext) -> DoctorCheck {
    const PROBE_KEY: &str = "__doctor_probe";

    ctx.store.set(PROBE_KEY, "ok");
    let readback = ctx.store.get(PROBE_KEY);
    ctx.store.remove(PROBE_KEY);

    if readback.as_deref() == Some("ok") {
        DoctorCheck {
            name: "local_store",
            status: CheckStatus::Pass,
            details: format!("local store at `{}` is writable", ctx.config.storage.path.display()),
        }
    } else {
        DoctorCheck {
            name: "local_store",
            status: CheckStatus::Fail,
            details: "local store probe write could not be read back".to_string(),
        }
    }
}

async fn check_api_health(ctx: &AppContext) -> DoctorCheck {
    match ctx.client.health().await {
        Ok(health) => DoctorCheck {
            name: "api_health",
            status: CheckStatus::Pass,
            details: format!("service reports `{}`", health.status),
        },
        Err(error) => DoctorCheck {
            name: "api_health",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![report.summary.clone()];
    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
        };
        lines.push(format!("  [{marker}] {}: {}", check.name, check.details));
    }
    lines.join("\n")
}

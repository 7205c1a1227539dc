use std::path::{Path, PathBuf};

use heat_recovery_toolbox::app::{self, AppContext};
use heat_recovery_toolbox::config::Config;
use heat_recovery_toolbox::form::{AnalysisForm, FieldId};
use heat_recovery_toolbox::service::models::{AnalysisInput, AnalysisResult};
use heat_recovery_toolbox::session::{load_analysis, store_analysis, MemoryStorage};

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("whr-app-{}", uuid::Uuid::new_v4()))
}

/// 아무것도 듣고 있지 않은 주소로 요청을 보내는 컨텍스트.
fn offline_context(dir: &Path) -> AppContext {
    let cfg = Config {
        api_base_url: "http://127.0.0.1:9".to_string(),
        language: "en".to_string(),
        number_locale: "en-US".to_string(),
        request_timeout_secs: 2,
        ..Config::default()
    };
    AppContext::new(
        cfg,
        dir.join("config.toml"),
        None,
        Box::new(MemoryStorage::new()),
    )
    .expect("context")
}

fn valid_form() -> AnalysisForm {
    AnalysisForm::new("Coal")
        .with(FieldId::FlueTempIn, "300")
        .with(FieldId::FlueTempOut, "150")
        .with(FieldId::FlowRate, "20000")
        .with(FieldId::SteamDemand, "5000")
        .with(FieldId::FuelCost, "2.5")
        .with(FieldId::OperatingHours, "8000")
        .with(FieldId::InstallationCost, "1500000")
}

#[test]
fn analyze_reports_service_failure_without_storing() {
    let dir = scratch_dir();
    let mut ctx = offline_context(&dir);
    let outcome = app::analyze(&mut ctx, &valid_form());
    assert!(outcome.is_ok(), "{outcome:?}");
    assert_eq!(load_analysis(ctx.storage.as_ref()).unwrap(), None);
}

#[test]
fn report_reports_service_failure_without_writing_file() {
    let dir = scratch_dir();
    let mut ctx = offline_context(&dir);
    let input = AnalysisInput {
        flue_temp_in: 300.0,
        flue_temp_out: 150.0,
        flow_rate: 20_000.0,
        steam_demand: 5000.0,
        fuel_type: "Coal".to_string(),
        fuel_cost: 2.5,
        operating_hours: 8000.0,
        installation_cost: 1_500_000.0,
    };
    store_analysis(
        ctx.storage.as_mut(),
        &AnalysisResult::with_steam_saved(800.0),
        &input,
    )
    .unwrap();

    let path = dir.join("report.pdf");
    let outcome = app::report(&ctx, &path);
    assert!(outcome.is_ok(), "{outcome:?}");
    assert!(!path.exists());
}

#[test]
fn rejected_form_is_still_an_error() {
    let dir = scratch_dir();
    let mut ctx = offline_context(&dir);
    let form = valid_form().with(FieldId::FlowRate, "");
    let err = app::analyze(&mut ctx, &form).unwrap_err();
    assert!(matches!(err, app::AppError::Rejected(1)), "{err:?}");
}

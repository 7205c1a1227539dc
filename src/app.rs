use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};
use crate::dashboard::{self, DashboardView, DisplayOptions};
use crate::economics::SensitivityParam;
use crate::form::{AnalysisForm, Validator};
use crate::format::NumberLocale;
use crate::i18n::{self, Translator};
use crate::service::models::AnalysisInput;
use crate::service::{chat, ApiClient, ServiceError};
use crate::session::{self, SessionError, SessionStorage, StoredAnalysis};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 세션 저장소 오류
    #[error(transparent)]
    Session(#[from] SessionError),
    /// 분석 서비스 호출 오류
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// 검증된 입력의 JSON 출력 실패
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// 입력 폼 검증 실패. 필드별 메시지는 이미 출력된 상태다.
    #[error("input rejected: {0} field(s) failed validation")]
    Rejected(usize),
}

impl AppError {
    /// 입력 스트림이 닫혀 프롬프트를 더 진행할 수 없는 경우
    pub fn is_eof(&self) -> bool {
        matches!(self, AppError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

/// 화면 처리에 필요한 객체 묶음. 전역 상태 없이 모든 핸들러에 명시적으로 넘긴다.
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
    pub validator: Validator,
    pub display: DisplayOptions,
    pub client: ApiClient,
    pub storage: Box<dyn SessionStorage>,
}

impl AppContext {
    pub fn new(
        config: Config,
        config_path: PathBuf,
        cli_lang: Option<String>,
        storage: Box<dyn SessionStorage>,
    ) -> Result<Self, AppError> {
        let lang = i18n::resolve_language(cli_lang.as_deref(), Some(&config.language));
        let locale = NumberLocale::resolve(&config.number_locale);
        Ok(Self {
            tr: Translator::new_with_pack(&lang, config.locale_dir.as_deref()),
            validator: Validator::new(locale),
            display: display_options(&config, locale),
            client: ApiClient::new(&config.api_base_url, config.request_timeout())?,
            config,
            config_path,
            storage,
        })
    }

    /// 설정을 바꾸고 저장한 뒤 번역기/클라이언트를 다시 만든다.
    /// 여기서 고른 언어는 실행 시 준 `--lang`보다 우선한다.
    pub fn reconfigure(&mut self, config: Config) -> Result<(), AppError> {
        let client = ApiClient::new(&config.api_base_url, config.request_timeout())?;
        config.save(&self.config_path)?;
        let lang = i18n::resolve_language(None, Some(&config.language));
        let locale = NumberLocale::resolve(&config.number_locale);
        self.tr = Translator::new_with_pack(&lang, config.locale_dir.as_deref());
        self.validator = Validator::new(locale);
        self.display = display_options(&config, locale);
        self.client = client;
        self.config = config;
        tracing::info!(api = self.client.base_url(), "settings updated");
        Ok(())
    }

    /// `/analyze`를 호출하고 성공하면 결과와 입력을 세션에 저장한다.
    pub fn analyze_and_store(&mut self, input: &AnalysisInput) -> Result<StoredAnalysis, AppError> {
        let result = self.client.analyze(input)?;
        session::store_analysis(self.storage.as_mut(), &result, input)?;
        tracing::info!(steam_saved_kg_hr = result.steam_saved_kg_hr, "analysis completed");
        Ok(StoredAnalysis {
            result,
            input: input.clone(),
        })
    }

    /// `/report`를 호출해 받은 문서를 파일로 쓴다.
    pub fn download_report(&self, input: &AnalysisInput, path: &Path) -> Result<(), AppError> {
        let bytes = self.client.report(input)?;
        fs::write(path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "report saved");
        Ok(())
    }
}

fn display_options(config: &Config, locale: NumberLocale) -> DisplayOptions {
    DisplayOptions {
        locale,
        currency_symbol: config.currency_symbol.clone(),
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(ctx: &mut AppContext) -> Result<(), AppError> {
    tracing::debug!(api = ctx.client.base_url(), "interactive session started");
    loop {
        let step = match ui_cli::main_menu(&ctx.tr) {
            Ok(MenuChoice::NewAnalysis) => ui_cli::handle_new_analysis(ctx),
            Ok(MenuChoice::Dashboard) => ui_cli::handle_dashboard(ctx),
            Ok(MenuChoice::WhatIf) => ui_cli::handle_what_if(ctx),
            Ok(MenuChoice::Report) => ui_cli::handle_report(ctx),
            Ok(MenuChoice::Chat) => ui_cli::handle_chat(ctx),
            Ok(MenuChoice::Settings) => ui_cli::handle_settings(ctx),
            Ok(MenuChoice::Exit) => break,
            Err(err) => Err(err),
        };
        match step {
            Ok(()) => {}
            Err(err) if err.is_eof() => break,
            Err(err) => return Err(err),
        }
    }
    println!("{}", ctx.tr.t(i18n::keys::APP_EXIT));
    Ok(())
}

/// 폼을 검증만 하고 결과를 출력한다. 통과하면 전송될 JSON을 보여준다.
pub fn validate(ctx: &AppContext, form: &AnalysisForm) -> Result<(), AppError> {
    let input = submit_or_report(ctx, form)?;
    let json = serde_json::to_string_pretty(&input)?;
    println!("{json}");
    Ok(())
}

/// 폼을 검증하고 통과하면 분석을 요청해 대시보드를 출력한다.
/// 서비스 오류는 대화형 화면과 같은 문구로 출력하고 세션은 건드리지 않는다.
pub fn analyze(ctx: &mut AppContext, form: &AnalysisForm) -> Result<(), AppError> {
    let input = submit_or_report(ctx, form)?;
    match ctx.analyze_and_store(&input) {
        Ok(stored) => {
            let view = DashboardView::build(&stored, &ctx.display);
            ui_cli::print_dashboard(&ctx.tr, &view, &ctx.display);
        }
        Err(AppError::Service(err)) => ui_cli::print_analysis_failure(&ctx.tr, &err),
        Err(other) => return Err(other),
    }
    Ok(())
}

fn submit_or_report(ctx: &AppContext, form: &AnalysisForm) -> Result<AnalysisInput, AppError> {
    ctx.validator.submit(form).map_err(|report| {
        ui_cli::print_form_report(&ctx.tr, &report);
        AppError::Rejected(report.errors().count())
    })
}

/// 세션에 저장된 마지막 분석 결과를 출력한다.
pub fn show_dashboard(ctx: &AppContext) -> Result<(), AppError> {
    match session::load_analysis(ctx.storage.as_ref())? {
        Some(stored) => {
            ui_cli::print_dashboard(&ctx.tr, &DashboardView::build(&stored, &ctx.display), &ctx.display)
        }
        None => println!("{}", ctx.tr.t(i18n::keys::NO_DATA)),
    }
    Ok(())
}

/// 민감도 변수 덮어쓰기 값. `None`이면 세션 입력값을 그대로 쓴다.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatIfOverrides {
    pub fuel_cost: Option<f64>,
    pub operating_hours: Option<f64>,
    pub installation_cost: Option<f64>,
}

/// 세션 결과를 기준으로 경제성 지표를 다시 계산해 출력한다.
pub fn what_if(ctx: &AppContext, overrides: WhatIfOverrides) -> Result<(), AppError> {
    let Some(stored) = session::load_analysis(ctx.storage.as_ref())? else {
        println!("{}", ctx.tr.t(i18n::keys::NO_DATA));
        return Ok(());
    };
    let mut model = dashboard::sensitivity_model(&stored);
    let changes = [
        (SensitivityParam::FuelCost, overrides.fuel_cost),
        (SensitivityParam::OperatingHours, overrides.operating_hours),
        (SensitivityParam::InstallationCost, overrides.installation_cost),
    ];
    for (param, value) in changes {
        if let Some(v) = value {
            model.set(param, v);
        }
    }
    println!("{}", ctx.tr.t(i18n::keys::WHAT_IF_HEADING));
    ui_cli::print_metrics(&ctx.tr, &model.metrics(), &ctx.display);
    Ok(())
}

/// 세션 입력으로 보고서를 받아 `path`에 저장한다.
pub fn report(ctx: &AppContext, path: &Path) -> Result<(), AppError> {
    let Some(stored) = session::load_analysis(ctx.storage.as_ref())? else {
        println!("{}", ctx.tr.t(i18n::keys::NO_DATA));
        return Ok(());
    };
    match ctx.download_report(&stored.input, path) {
        Ok(()) => println!("{} {}", ctx.tr.t(i18n::keys::REPORT_SAVED), path.display()),
        Err(AppError::Service(err)) => ui_cli::print_report_failure(&ctx.tr, &err),
        Err(other) => return Err(other),
    }
    Ok(())
}

/// 메시지 하나에 대한 챗봇 응답을 출력한다.
pub fn ask_chat(ctx: &AppContext, message: &str) -> Result<(), AppError> {
    if let Some(reply) = chat::reply(&ctx.client, message) {
        println!("{}", reply.text());
    }
    Ok(())
}

pub fn clear_session(ctx: &mut AppContext) -> Result<(), AppError> {
    ctx.storage.clear()?;
    tracing::info!("session cleared");
    Ok(())
}

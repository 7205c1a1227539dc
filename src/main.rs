use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use heat_recovery_toolbox::app::{self, AppContext, WhatIfOverrides};
use heat_recovery_toolbox::config;
use heat_recovery_toolbox::form::{AnalysisForm, FieldId};
use heat_recovery_toolbox::session::{FileStorage, MemoryStorage, SessionStorage};
use heat_recovery_toolbox::ui_cli::DEFAULT_REPORT_FILE;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// 폐열 회수 분석 클라이언트
#[derive(Parser, Debug)]
#[command(name = "heat_recovery_toolbox", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// 표시 언어 (ko / en). 설정 파일보다 우선한다.
    #[arg(long, global = true)]
    lang: Option<String>,

    /// 분석 서버 주소. 설정 파일과 환경 변수보다 우선한다.
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 번호 메뉴 방식의 대화형 모드 (기본)
    Interactive {
        /// 세션을 파일에 남기지 않는다
        #[arg(long)]
        ephemeral: bool,
    },
    /// 입력값을 검증만 한다
    Validate(FormArgs),
    /// 입력값을 검증한 뒤 분석을 요청하고 결과를 세션에 저장한다
    Analyze(FormArgs),
    /// 마지막 분석 결과를 출력한다
    Dashboard,
    /// 연료비/가동 시간/설치비를 바꿔 경제성 지표를 다시 계산한다
    WhatIf {
        #[arg(long, allow_hyphen_values = true)]
        fuel_cost: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        operating_hours: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        installation_cost: Option<f64>,
    },
    /// 기술 보고서를 내려받는다
    Report {
        #[arg(long, short, default_value = DEFAULT_REPORT_FILE)]
        output: PathBuf,
    },
    /// 챗봇에 메시지 하나를 보낸다
    Chat { message: String },
    /// 세션 저장소 관리
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    /// 저장된 분석 결과와 입력을 지운다
    Clear,
}

/// 폼 필드 원문. 숫자 해석과 범위 검사는 검증기에서 한다.
#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long, allow_hyphen_values = true)]
    flue_temp_in: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    flue_temp_out: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    flow_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true, default_value = "5000")]
    steam_demand: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    fuel_cost: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    operating_hours: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    installation_cost: Option<String>,
    #[arg(long, default_value = "Bagasse")]
    fuel_type: String,
}

impl FormArgs {
    fn into_form(self) -> AnalysisForm {
        let mut form = AnalysisForm::new(self.fuel_type);
        let values = [
            (FieldId::FlueTempIn, self.flue_temp_in),
            (FieldId::FlueTempOut, self.flue_temp_out),
            (FieldId::FlowRate, self.flow_rate),
            (FieldId::SteamDemand, self.steam_demand),
            (FieldId::FuelCost, self.fuel_cost),
            (FieldId::OperatingHours, self.operating_hours),
            (FieldId::InstallationCost, self.installation_cost),
        ];
        for (field, raw) in values {
            if let Some(raw) = raw {
                form.set(field, raw);
            }
        }
        form
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("heat_recovery_toolbox=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 선택된 명령을 실행한다.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut cfg = config::load_from(&cli.config)?;
    cfg.apply_env();
    if let Some(url) = cli.api_base {
        cfg.api_base_url = url;
    }

    let command = cli.command.unwrap_or(Commands::Interactive { ephemeral: false });
    let storage: Box<dyn SessionStorage> = match command {
        Commands::Interactive { ephemeral: true } => Box::new(MemoryStorage::new()),
        _ => Box::new(FileStorage::new(cfg.session_dir.clone())),
    };
    let mut ctx = AppContext::new(cfg, cli.config, cli.lang, storage)?;

    match command {
        Commands::Interactive { .. } => app::run(&mut ctx)?,
        Commands::Validate(args) => app::validate(&ctx, &args.into_form())?,
        Commands::Analyze(args) => app::analyze(&mut ctx, &args.into_form())?,
        Commands::Dashboard => app::show_dashboard(&ctx)?,
        Commands::WhatIf {
            fuel_cost,
            operating_hours,
            installation_cost,
        } => app::what_if(
            &ctx,
            WhatIfOverrides {
                fuel_cost,
                operating_hours,
                installation_cost,
            },
        )?,
        Commands::Report { output } => app::report(&ctx, &output)?,
        Commands::Chat { message } => app::ask_chat(&ctx, &message)?,
        Commands::Session {
            action: SessionAction::Clear,
        } => app::clear_session(&mut ctx)?,
    }
    Ok(())
}

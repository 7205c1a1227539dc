use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::{AppContext, AppError};
use crate::dashboard::{self, DashboardView, DisplayOptions};
use crate::economics::{DerivedMetrics, SensitivityParam};
use crate::format::{
    format_currency, format_fixed, format_grouped, format_payback, format_roi, NumberLocale,
};
use crate::form::{AnalysisForm, FieldId, FormReport, FUEL_TYPES};
use crate::i18n::{keys, Translator};
use crate::service::chat::{self, GREETING, SUGGESTIONS};
use crate::service::ServiceError;
use crate::session;

/// 보고서 기본 파일 이름.
pub const DEFAULT_REPORT_FILE: &str = "WHR_Technical_Report.pdf";

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewAnalysis,
    Dashboard,
    WhatIf,
    Report,
    Chat,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_NEW_ANALYSIS,
        keys::MAIN_MENU_DASHBOARD,
        keys::MAIN_MENU_WHAT_IF,
        keys::MAIN_MENU_REPORT,
        keys::MAIN_MENU_CHAT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::NewAnalysis),
            "2" => return Ok(MenuChoice::Dashboard),
            "3" => return Ok(MenuChoice::WhatIf),
            "4" => return Ok(MenuChoice::Report),
            "5" => return Ok(MenuChoice::Chat),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 입력 폼을 채운다. 필드마다 즉시 검증해 통과할 때까지 다시 묻는다.
pub fn handle_new_analysis(ctx: &mut AppContext) -> Result<(), AppError> {
    println!("{}", ctx.tr.t(keys::FORM_HEADING));
    println!("{}", ctx.tr.t(keys::FORM_HELP));
    let mut form = AnalysisForm::default();
    for field in FieldId::ALL {
        let prompt = field_prompt(field, ctx.validator.locale());
        loop {
            let raw = read_line(&prompt)?;
            let state = ctx.validator.validate_field(field, &raw);
            if state.is_valid() {
                form.set(field, raw.trim());
                break;
            }
            println!("  ✗ {}", state.error_message());
        }
    }
    form.fuel_type = read_fuel_type(&ctx.tr)?;

    match ctx.validator.submit(&form) {
        Ok(input) => {
            println!("{}", ctx.tr.t(keys::FORM_SUBMITTING));
            match ctx.analyze_and_store(&input) {
                Ok(stored) => {
                    println!("{}", ctx.tr.t(keys::ANALYSIS_STORED));
                    print_dashboard(&ctx.tr, &DashboardView::build(&stored, &ctx.display), &ctx.display);
                }
                Err(AppError::Service(err)) => print_analysis_failure(&ctx.tr, &err),
                Err(other) => return Err(other),
            }
        }
        Err(report) => print_form_report(&ctx.tr, &report),
    }
    Ok(())
}

/// 필드 입력 프롬프트. 경계값은 범위 오류 문구와 같은 형식으로 표시한다.
pub fn field_prompt(field: FieldId, locale: NumberLocale) -> String {
    let spec = field.spec();
    format!(
        "{} [{} - {}]: ",
        spec.label,
        format_grouped(spec.min, locale),
        format_grouped(spec.max, locale)
    )
}

pub fn print_analysis_failure(tr: &Translator, err: &ServiceError) {
    println!("{} {err}", tr.t(keys::ANALYSIS_FAILED));
    println!("{}", tr.t(keys::ANALYSIS_FAILED_HINT));
}

pub fn print_report_failure(tr: &Translator, err: &ServiceError) {
    println!("{} {err}", tr.t(keys::REPORT_FAILED));
}

fn read_fuel_type(tr: &Translator) -> Result<String, AppError> {
    for (i, fuel) in FUEL_TYPES.iter().enumerate() {
        print!("{}) {fuel}  ", i + 1);
    }
    println!();
    let sel = read_line(tr.t(keys::FORM_PROMPT_FUEL_TYPE))?;
    let sel = sel.trim();
    let fuel = sel
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| FUEL_TYPES.get(i))
        .map(|f| f.to_string())
        .unwrap_or_else(|| sel.to_string());
    Ok(fuel)
}

/// 저장된 분석 결과를 보여준다.
pub fn handle_dashboard(ctx: &AppContext) -> Result<(), AppError> {
    match session::load_analysis(ctx.storage.as_ref())? {
        Some(stored) => {
            let view = DashboardView::build(&stored, &ctx.display);
            print_dashboard(&ctx.tr, &view, &ctx.display);
        }
        None => println!("{}", ctx.tr.t(keys::NO_DATA)),
    }
    Ok(())
}

/// 세 변수를 바꿔 가며 경제성 지표를 다시 계산한다.
pub fn handle_what_if(ctx: &AppContext) -> Result<(), AppError> {
    let Some(stored) = session::load_analysis(ctx.storage.as_ref())? else {
        println!("{}", ctx.tr.t(keys::NO_DATA));
        return Ok(());
    };
    let mut model = dashboard::sensitivity_model(&stored);
    println!("{}", ctx.tr.t(keys::WHAT_IF_HEADING));
    print_metrics(&ctx.tr, &model.metrics(), &ctx.display);
    loop {
        println!("{}", ctx.tr.t(keys::WHAT_IF_OPTIONS));
        let state = model.state();
        println!(
            "   {}  /  {} hrs  /  {}",
            format_fixed(Some(state.fuel_cost), 2, ctx.display.locale),
            format_fixed(Some(state.operating_hours), 0, ctx.display.locale),
            format_fixed(Some(state.installation_cost), 0, ctx.display.locale),
        );
        let param = match read_line(ctx.tr.t(keys::PROMPT_SELECT))?.trim() {
            "1" => SensitivityParam::FuelCost,
            "2" => SensitivityParam::OperatingHours,
            "3" => SensitivityParam::InstallationCost,
            "0" | "" => break,
            _ => {
                println!("{}", ctx.tr.t(keys::INVALID_SELECTION_RETRY));
                continue;
            }
        };
        let value = read_f64(&ctx.tr, ctx.tr.t(keys::WHAT_IF_PROMPT_VALUE))?;
        let metrics = model.set(param, value);
        print_metrics(&ctx.tr, &metrics, &ctx.display);
    }
    Ok(())
}

/// 세션의 입력으로 보고서를 받아 파일로 저장한다.
pub fn handle_report(ctx: &AppContext) -> Result<(), AppError> {
    let Some(stored) = session::load_analysis(ctx.storage.as_ref())? else {
        println!("{}", ctx.tr.t(keys::NO_DATA));
        return Ok(());
    };
    let path = read_line(ctx.tr.t(keys::REPORT_PROMPT_PATH))?;
    let path = match path.trim() {
        "" => PathBuf::from(DEFAULT_REPORT_FILE),
        p => PathBuf::from(p),
    };
    match ctx.download_report(&stored.input, &path) {
        Ok(()) => println!("{} {}", ctx.tr.t(keys::REPORT_SAVED), path.display()),
        Err(AppError::Service(err)) => print_report_failure(&ctx.tr, &err),
        Err(other) => return Err(other),
    }
    Ok(())
}

/// 챗 상담 루프. 빈 줄을 입력하면 메뉴로 돌아간다.
pub fn handle_chat(ctx: &AppContext) -> Result<(), AppError> {
    println!("{}", ctx.tr.t(keys::CHAT_HEADING));
    println!("ThermaBot: {GREETING}");
    println!("{} {}", ctx.tr.t(keys::CHAT_SUGGESTIONS), SUGGESTIONS.join(" | "));
    loop {
        let line = read_line(ctx.tr.t(keys::CHAT_PROMPT))?;
        match chat::reply(&ctx.client, &line) {
            Some(reply) => println!("ThermaBot: {}", reply.text()),
            None => break,
        }
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(ctx: &mut AppContext) -> Result<(), AppError> {
    println!("{}", ctx.tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", ctx.tr.t(keys::SETTINGS_CURRENT_API_BASE), ctx.config.api_base_url);
    println!("{} {}", ctx.tr.t(keys::SETTINGS_CURRENT_LANGUAGE), ctx.config.language);
    println!("{}", ctx.tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(ctx.tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    let mut cfg = ctx.config.clone();
    match sel.trim() {
        "1" | "2" | "3" => {
            let value = read_line(ctx.tr.t(keys::SETTINGS_PROMPT_VALUE))?;
            let value = value.trim().to_string();
            if value.is_empty() {
                println!("{}", ctx.tr.t(keys::SETTINGS_INVALID));
                return Ok(());
            }
            match sel.trim() {
                "1" => cfg.api_base_url = value,
                "2" => cfg.language = value,
                _ => cfg.currency_symbol = value,
            }
        }
        _ => {
            println!("{}", ctx.tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    ctx.reconfigure(cfg)?;
    println!("{}", ctx.tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 제출이 막혔을 때 실패한 필드만 나열한다.
pub fn print_form_report(tr: &Translator, report: &FormReport) {
    println!("{}", tr.t(keys::FORM_REJECTED));
    for (field, err) in report.errors() {
        println!("  {:<20} {err}", field.as_str());
    }
}

/// 민감도 재계산 결과를 등급과 함께 출력한다.
pub fn print_metrics(tr: &Translator, metrics: &DerivedMetrics, opts: &DisplayOptions) {
    println!(
        "  {} {}",
        tr.t(keys::WHAT_IF_SAVINGS),
        format_currency(Some(metrics.annual_savings), &opts.currency_symbol)
    );
    println!(
        "  {} {} [{}]",
        tr.t(keys::WHAT_IF_PAYBACK),
        format_payback(metrics.payback_years),
        metrics.payback_tier().as_str()
    );
    println!(
        "  {} {} [{}]",
        tr.t(keys::WHAT_IF_ROI),
        format_roi(metrics.roi_5yr),
        metrics.roi_tier().as_str()
    );
}

/// 대시보드 전체를 출력한다.
pub fn print_dashboard(tr: &Translator, view: &DashboardView, opts: &DisplayOptions) {
    println!("{}", tr.t(keys::DASHBOARD_HEADING));
    for card in &view.metrics {
        println!("  {:<22} {}", card.label, card.value);
    }
    if let Some(summary) = &view.summary {
        println!("\n{} {summary}", tr.t(keys::DASHBOARD_SUMMARY));
    }
    if let Some(warning) = &view.dew_point_warning {
        println!("\n⚠ {} {warning}", tr.t(keys::DASHBOARD_WARNING));
    }
    if let Some(rec) = &view.recommendation {
        println!(
            "\n{} {} (exit {}°C) - {}",
            tr.t(keys::DASHBOARD_RECOMMENDATION),
            rec.heat_exchanger_type,
            rec.optimal_exit_temp,
            rec.efficiency_improvement
        );
    }
    if !view.scenarios.is_empty() {
        println!("\n{}", tr.t(keys::DASHBOARD_SCENARIOS));
        for (i, s) in view.scenarios.iter().enumerate() {
            let mark = if view.best_scenario == Some(i) { "*" } else { " " };
            println!(
                " {mark} {:<18} {:>12} kW {:>10} kg/hr {:>12} {:>8} yrs {:>10} t {:>7}%",
                s.label,
                format_fixed(Some(s.heat_recovered_kw), 2, opts.locale),
                format_fixed(Some(s.steam_saved_kg_hr), 2, opts.locale),
                format_currency(Some(s.annual_savings), &opts.currency_symbol),
                format_fixed(Some(s.payback_years), 2, opts.locale),
                format_fixed(Some(s.co2_reduction_tons), 2, opts.locale),
                format_fixed(Some(s.efficiency_gain_pct), 2, opts.locale),
            );
        }
    }
    if let Some(impact) = &view.climate_impact {
        let (co2, trees, cars) = dashboard::climate_lines(impact, opts.locale);
        println!("\n{} {co2} / {trees} / {cars}", tr.t(keys::DASHBOARD_CLIMATE));
    }
    println!(
        "\n{} {} / {} / {}",
        tr.t(keys::DASHBOARD_STEAM),
        format_fixed(Some(view.steam.before), 0, opts.locale),
        format_fixed(Some(view.steam.after), 0, opts.locale),
        format_fixed(Some(view.steam.saved), 0, opts.locale),
    );
    if let Some((recovered, lost)) = view.energy_breakdown {
        println!("{} {recovered:.1} / {lost:.1}", tr.t(keys::DASHBOARD_ENERGY));
    }
    let roi: Vec<String> = view.roi_series.iter().map(|v| format!("{v:.1}")).collect();
    println!("{} {}", tr.t(keys::DASHBOARD_ROI), roi.join(" → "));
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf).map_err(AppError::Io)? == 0 {
        // 입력 스트림이 닫히면 프롬프트 루프를 끝낸다.
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match crate::form::parse_number(&s) {
            Some(v) => return Ok(v),
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Validator;

    #[test]
    fn prompt_bounds_match_range_message() {
        let prompt = field_prompt(FieldId::InstallationCost, NumberLocale::EnUs);
        assert_eq!(prompt, "Installation Cost [1 - 100,000,000]: ");

        let state = Validator::new(NumberLocale::EnUs).validate_field(FieldId::InstallationCost, "0");
        assert_eq!(state.error_message(), "Must be between 1 and 100,000,000");
    }

    #[test]
    fn prompt_follows_number_locale() {
        assert_eq!(
            field_prompt(FieldId::FuelCost, NumberLocale::DeDe),
            "Fuel Cost [0,01 - 1.000]: "
        );
    }
}

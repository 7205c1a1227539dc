use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_NEW_ANALYSIS: &str = "main_menu.new_analysis";
    pub const MAIN_MENU_DASHBOARD: &str = "main_menu.dashboard";
    pub const MAIN_MENU_WHAT_IF: &str = "main_menu.what_if";
    pub const MAIN_MENU_REPORT: &str = "main_menu.report";
    pub const MAIN_MENU_CHAT: &str = "main_menu.chat";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const FORM_HEADING: &str = "form.heading";
    pub const FORM_HELP: &str = "form.help";
    pub const FORM_PROMPT_FUEL_TYPE: &str = "form.prompt_fuel_type";
    pub const FORM_REJECTED: &str = "form.rejected";
    pub const FORM_SUBMITTING: &str = "form.submitting";
    pub const ANALYSIS_FAILED: &str = "analysis.failed";
    pub const ANALYSIS_FAILED_HINT: &str = "analysis.failed_hint";
    pub const ANALYSIS_STORED: &str = "analysis.stored";

    pub const NO_DATA: &str = "dashboard.no_data";
    pub const DASHBOARD_HEADING: &str = "dashboard.heading";
    pub const DASHBOARD_SUMMARY: &str = "dashboard.summary";
    pub const DASHBOARD_WARNING: &str = "dashboard.warning";
    pub const DASHBOARD_RECOMMENDATION: &str = "dashboard.recommendation";
    pub const DASHBOARD_SCENARIOS: &str = "dashboard.scenarios";
    pub const DASHBOARD_CLIMATE: &str = "dashboard.climate";
    pub const DASHBOARD_STEAM: &str = "dashboard.steam";
    pub const DASHBOARD_ENERGY: &str = "dashboard.energy";
    pub const DASHBOARD_ROI: &str = "dashboard.roi";

    pub const WHAT_IF_HEADING: &str = "what_if.heading";
    pub const WHAT_IF_OPTIONS: &str = "what_if.options";
    pub const WHAT_IF_PROMPT_VALUE: &str = "what_if.prompt_value";
    pub const WHAT_IF_SAVINGS: &str = "what_if.savings";
    pub const WHAT_IF_PAYBACK: &str = "what_if.payback";
    pub const WHAT_IF_ROI: &str = "what_if.roi";

    pub const REPORT_PROMPT_PATH: &str = "report.prompt_path";
    pub const REPORT_SAVED: &str = "report.saved";
    pub const REPORT_FAILED: &str = "report.failed";

    pub const CHAT_HEADING: &str = "chat.heading";
    pub const CHAT_SUGGESTIONS: &str = "chat.suggestions";
    pub const CHAT_PROMPT: &str = "chat.prompt";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_API_BASE: &str = "settings.current_api_base";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_VALUE: &str = "settings.prompt_value";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 한국어에 없으면 영어로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 (중첩 가능한) 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Heat Recovery Toolbox ===",
        MAIN_MENU_NEW_ANALYSIS => "1) 새 분석",
        MAIN_MENU_DASHBOARD => "2) 결과 대시보드",
        MAIN_MENU_WHAT_IF => "3) 민감도 분석 (What-if)",
        MAIN_MENU_REPORT => "4) 보고서 다운로드",
        MAIN_MENU_CHAT => "5) ThermaBot 상담",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        FORM_HEADING => "\n-- 폐열 회수 분석 입력 --",
        FORM_HELP => "도움말: 값이 허용 범위를 벗어나면 다시 입력을 요청합니다.",
        FORM_PROMPT_FUEL_TYPE => "연료 종류 (번호 또는 직접 입력): ",
        FORM_REJECTED => "입력값을 확인하세요:",
        FORM_SUBMITTING => "분석 요청 중...",
        ANALYSIS_FAILED => "분석 실패:",
        ANALYSIS_FAILED_HINT => "분석 서버가 실행 중인지 확인하세요.",
        ANALYSIS_STORED => "분석 결과를 세션에 저장했습니다.",
        NO_DATA => "저장된 분석 결과가 없습니다. 먼저 새 분석을 실행하세요.",
        DASHBOARD_HEADING => "\n-- 분석 결과 --",
        DASHBOARD_SUMMARY => "AI 요약:",
        DASHBOARD_WARNING => "경고:",
        DASHBOARD_RECOMMENDATION => "추천 설비:",
        DASHBOARD_SCENARIOS => "시나리오 비교 (* = 최단 회수기간):",
        DASHBOARD_CLIMATE => "5년 기후 영향 (CO2 t / 나무 / 자동차):",
        DASHBOARD_STEAM => "증기 [kg/hr] 회수 전 / 회수 후 / 절감:",
        DASHBOARD_ENERGY => "에너지 회수 / 손실 [%]:",
        DASHBOARD_ROI => "누적 ROI [%] (1~5년):",
        WHAT_IF_HEADING => "\n-- 민감도 분석 --",
        WHAT_IF_OPTIONS => "1) 연료 단가  2) 운전 시간  3) 설치비  0) 돌아가기",
        WHAT_IF_PROMPT_VALUE => "새 값: ",
        WHAT_IF_SAVINGS => "연간 절감액:",
        WHAT_IF_PAYBACK => "회수기간:",
        WHAT_IF_ROI => "5년 ROI:",
        REPORT_PROMPT_PATH => "저장 경로 (엔터 시 기본 파일명): ",
        REPORT_SAVED => "보고서를 저장했습니다:",
        REPORT_FAILED => "보고서 다운로드 실패:",
        CHAT_HEADING => "\n-- ThermaBot --",
        CHAT_SUGGESTIONS => "추천 질문:",
        CHAT_PROMPT => "질문 (엔터 시 종료): ",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_API_BASE => "분석 서버 주소:",
        SETTINGS_CURRENT_LANGUAGE => "언어:",
        SETTINGS_OPTIONS => "1) 서버 주소  2) 언어(auto/ko/en)  3) 통화 기호",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_VALUE => "새 값: ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Heat Recovery Toolbox ===",
        MAIN_MENU_NEW_ANALYSIS => "1) New analysis",
        MAIN_MENU_DASHBOARD => "2) Results dashboard",
        MAIN_MENU_WHAT_IF => "3) Sensitivity (what-if)",
        MAIN_MENU_REPORT => "4) Download report",
        MAIN_MENU_CHAT => "5) Ask ThermaBot",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        FORM_HEADING => "\n-- Waste Heat Recovery Analysis --",
        FORM_HELP => "Help: values outside the accepted range are asked for again.",
        FORM_PROMPT_FUEL_TYPE => "Fuel type (number or free text): ",
        FORM_REJECTED => "Please check the following fields:",
        FORM_SUBMITTING => "Requesting analysis...",
        ANALYSIS_FAILED => "Analysis failed:",
        ANALYSIS_FAILED_HINT => "Make sure the analysis server is running.",
        ANALYSIS_STORED => "Analysis stored in the current session.",
        NO_DATA => "No analysis in this session yet. Run a new analysis first.",
        DASHBOARD_HEADING => "\n-- Analysis Results --",
        DASHBOARD_SUMMARY => "AI insight:",
        DASHBOARD_WARNING => "Warning:",
        DASHBOARD_RECOMMENDATION => "Recommended equipment:",
        DASHBOARD_SCENARIOS => "Scenarios (* = shortest payback):",
        DASHBOARD_CLIMATE => "5-year climate impact (CO2 t / trees / cars):",
        DASHBOARD_STEAM => "Steam [kg/hr] before / after / saved:",
        DASHBOARD_ENERGY => "Energy recovered / lost [%]:",
        DASHBOARD_ROI => "Cumulative ROI [%] (years 1-5):",
        WHAT_IF_HEADING => "\n-- Sensitivity Analysis --",
        WHAT_IF_OPTIONS => "1) Fuel cost  2) Operating hours  3) Installation cost  0) Back",
        WHAT_IF_PROMPT_VALUE => "New value: ",
        WHAT_IF_SAVINGS => "Annual savings:",
        WHAT_IF_PAYBACK => "Payback:",
        WHAT_IF_ROI => "5-year ROI:",
        REPORT_PROMPT_PATH => "Save as (enter for default file name): ",
        REPORT_SAVED => "Report saved:",
        REPORT_FAILED => "PDF download failed:",
        CHAT_HEADING => "\n-- ThermaBot --",
        CHAT_SUGGESTIONS => "Try asking:",
        CHAT_PROMPT => "You (enter to leave): ",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_API_BASE => "Analysis server:",
        SETTINGS_CURRENT_LANGUAGE => "Language:",
        SETTINGS_OPTIONS => "1) Server URL  2) Language (auto/ko/en)  3) Currency symbol",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_VALUE => "New value: ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        _ => "[missing translation]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_falls_back_to_builtin() {
        let tr = Translator::new("ko-KR");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::MAIN_MENU_SETTINGS), "6) 설정");
        assert_eq!(Translator::new("fr").t(keys::MAIN_MENU_EXIT), "0) Exit");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko"), Some("en")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("en-US")), "en");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[main_menu]\nexit = \"0) Quit\"\n").unwrap();
        assert_eq!(map.get(keys::MAIN_MENU_EXIT).map(String::as_str), Some("0) Quit"));
    }
}

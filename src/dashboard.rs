//! 결과 대시보드 화면 모델. 세션에 저장된 분석 한 건을 표시용 값으로 정리한다.

use crate::economics::{SensitivityModel, SensitivityState};
use crate::format::{format_currency, format_fixed, format_int, NumberLocale};
use crate::service::models::{
    AnalysisInput, AnalysisResult, ClimateImpact, Recommendation, ScenarioResult,
    DEFAULT_STEAM_DEMAND,
};
use crate::session::StoredAnalysis;

/// 이슬점 경고 문구가 비어 있을 때 쓰는 기본 문구.
pub const DEW_POINT_DEFAULT_MESSAGE: &str =
    "Outlet temperature is below acid dew point. Corrosion risk detected.";

/// 표시 형식 설정.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub locale: NumberLocale,
    pub currency_symbol: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            locale: NumberLocale::EnUs,
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

/// 폐열 회수 전/후 증기 비교 [kg/h].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteamComparison {
    pub before: f64,
    pub after: f64,
    pub saved: f64,
}

/// 증기 수요(0이면 기본값)에서 절감량을 뺀다. 음수가 되지 않게 자른다.
pub fn steam_comparison(result: &AnalysisResult, input: &AnalysisInput) -> SteamComparison {
    let before = if input.steam_demand != 0.0 {
        input.steam_demand
    } else {
        DEFAULT_STEAM_DEMAND
    };
    SteamComparison {
        before,
        after: (before - result.steam_saved_kg_hr).max(0.0),
        saved: result.steam_saved_kg_hr,
    }
}

/// 회수기간이 가장 짧은 시나리오. 같으면 앞쪽이 이긴다.
pub fn best_scenario_index(scenarios: &[ScenarioResult]) -> Option<usize> {
    if scenarios.is_empty() {
        return None;
    }
    let mut best = 0;
    for (i, s) in scenarios.iter().enumerate().skip(1) {
        if s.payback_years < scenarios[best].payback_years {
            best = i;
        }
    }
    Some(best)
}

/// 이슬점 경고가 켜져 있으면 표시할 문구.
pub fn dew_point_warning(result: &AnalysisResult) -> Option<String> {
    let rec = result.recommendation.as_ref()?;
    if !rec.dew_point_warning {
        return None;
    }
    Some(
        rec.warning_message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEW_POINT_DEFAULT_MESSAGE.to_string()),
    )
}

/// 연도별 누적 ROI [%]. 응답에 없으면 0 다섯 개.
pub fn roi_series(result: &AnalysisResult) -> Vec<f64> {
    result.roi_5yr.clone().unwrap_or_else(|| vec![0.0; 5])
}

/// 대시보드 한 화면 분량의 표시값.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub metrics: Vec<MetricCard>,
    pub summary: Option<String>,
    pub dew_point_warning: Option<String>,
    pub recommendation: Option<Recommendation>,
    pub scenarios: Vec<ScenarioResult>,
    pub best_scenario: Option<usize>,
    pub climate_impact: Option<ClimateImpact>,
    pub steam: SteamComparison,
    /// (회수 %, 손실 %)
    pub energy_breakdown: Option<(f64, f64)>,
    pub roi_series: Vec<f64>,
}

impl DashboardView {
    pub fn build(stored: &StoredAnalysis, opts: &DisplayOptions) -> Self {
        let r = &stored.result;
        let metrics = vec![
            MetricCard {
                label: "Heat Recovered (kW)",
                value: format_fixed(r.heat_recovered_kw, 2, opts.locale),
            },
            MetricCard {
                label: "Steam Saved (kg/hr)",
                value: format_fixed(Some(r.steam_saved_kg_hr), 2, opts.locale),
            },
            MetricCard {
                label: "Annual Savings",
                value: format_currency(r.annual_savings, &opts.currency_symbol),
            },
            MetricCard {
                label: "Payback (yrs)",
                value: format_fixed(r.payback_years, 2, opts.locale),
            },
            MetricCard {
                label: "CO2 Reduction (t/yr)",
                value: format_fixed(r.co2_reduction_tons, 2, opts.locale),
            },
            MetricCard {
                label: "Efficiency Gain",
                value: format!("{}%", format_fixed(r.efficiency_gain_pct, 2, opts.locale)),
            },
        ];
        let energy_breakdown = match (r.energy_recovered_pct, r.energy_lost_pct) {
            (Some(rec), Some(lost)) => Some((rec, lost)),
            _ => None,
        };
        Self {
            metrics,
            summary: r.ai_summary.clone(),
            dew_point_warning: dew_point_warning(r),
            recommendation: r.recommendation.clone(),
            best_scenario: best_scenario_index(&r.scenarios),
            scenarios: r.scenarios.clone(),
            climate_impact: r.climate_impact.clone(),
            steam: steam_comparison(r, &stored.input),
            energy_breakdown,
            roi_series: roi_series(r),
        }
    }
}

/// 기후 영향을 정수로 표시한다: (CO2 t, 나무, 자동차).
pub fn climate_lines(impact: &ClimateImpact, locale: NumberLocale) -> (String, String, String) {
    (
        format_int(Some(impact.total_co2_avoided_tons), locale),
        format_int(Some(impact.equivalent_trees_planted as f64), locale),
        format_int(Some(impact.equivalent_cars_removed as f64), locale),
    )
}

/// 슬라이더 초기값을 입력에서 가져온 what-if 모델.
pub fn sensitivity_model(stored: &StoredAnalysis) -> SensitivityModel {
    SensitivityModel::new(
        stored.result.steam_saved_kg_hr,
        SensitivityState::from(&stored.input),
    )
}

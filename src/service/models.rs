//! 외부 분석 서비스와 주고받는 JSON 모델.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 입력 폼이 없을 때 서비스가 가정하는 증기 수요 [kg/h].
pub const DEFAULT_STEAM_DEMAND: f64 = 5000.0;

fn default_steam_demand() -> f64 {
    DEFAULT_STEAM_DEMAND
}

/// `/analyze`, `/report` 요청 본문. 제출 후에는 바꾸지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub flue_temp_in: f64,
    pub flue_temp_out: f64,
    pub flow_rate: f64,
    #[serde(default = "default_steam_demand")]
    pub steam_demand: f64,
    pub fuel_type: String,
    pub fuel_cost: f64,
    pub operating_hours: f64,
    pub installation_cost: f64,
}

/// 시나리오 하나의 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub label: String,
    #[serde(rename = "heat_recovered_kW")]
    pub heat_recovered_kw: f64,
    pub steam_saved_kg_hr: f64,
    pub annual_savings: f64,
    pub payback_years: f64,
    pub co2_reduction_tons: f64,
    pub efficiency_gain_pct: f64,
}

/// 열교환기 추천 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub heat_exchanger_type: String,
    pub optimal_exit_temp: f64,
    pub efficiency_improvement: String,
    #[serde(default)]
    pub dew_point_warning: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
}

/// 5년 누적 기후 영향.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateImpact {
    pub total_co2_avoided_tons: f64,
    pub equivalent_trees_planted: u64,
    pub equivalent_cars_removed: u64,
}

/// `/analyze` 응답.
///
/// 민감도 재계산에 꼭 필요한 값은 `steam_saved_kg_hr` 하나뿐이다. 나머지는 대시보드 표시용이라
/// 없어도 되며, 모르는 필드는 `extra`에 담아 세션에 다시 쓸 때 그대로 보존한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub steam_saved_kg_hr: f64,
    #[serde(rename = "heat_recovered_kW", default, skip_serializing_if = "Option::is_none")]
    pub heat_recovered_kw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_savings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_reduction_tons: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_gain_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<ScenarioResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate_impact: Option<ClimateImpact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi_5yr: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_recovered_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_lost_pct: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// 다른 값 없이 증기 절감량만 가진 결과.
    pub fn with_steam_saved(steam_saved_kg_hr: f64) -> Self {
        Self {
            steam_saved_kg_hr,
            heat_recovered_kw: None,
            annual_savings: None,
            payback_years: None,
            co2_reduction_tons: None,
            efficiency_gain_pct: None,
            scenarios: Vec::new(),
            recommendation: None,
            climate_impact: None,
            ai_summary: None,
            roi_5yr: None,
            energy_recovered_pct: None,
            energy_lost_pct: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// 2xx가 아닌 응답 본문. FastAPI 검증 오류는 detail이 배열이라 Value로 받는다.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

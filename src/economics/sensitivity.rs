use serde::{Deserialize, Serialize};

use crate::service::models::AnalysisInput;

/// 민감도 분석에서 사용자가 조정하는 세 변수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityState {
    /// 연료 단가 [/kg]
    pub fuel_cost: f64,
    /// 연간 운전 시간 [h]
    pub operating_hours: f64,
    /// 설치비
    pub installation_cost: f64,
}

impl From<&AnalysisInput> for SensitivityState {
    fn from(input: &AnalysisInput) -> Self {
        Self {
            fuel_cost: input.fuel_cost,
            operating_hours: input.operating_hours,
            installation_cost: input.installation_cost,
        }
    }
}

/// 재계산된 경제성 지표.
///
/// 절감량이 0이면 회수기간은 무한대, 설치비가 0이면 무한대/NaN이 나올 수 있으며
/// 오류가 아니라 그대로 표시해야 하는 상태다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// 연간 절감액
    pub annual_savings: f64,
    /// 단순 회수기간 [년]
    pub payback_years: f64,
    /// 5년 ROI [%]
    pub roi_5yr: f64,
}

impl DerivedMetrics {
    pub fn payback_tier(&self) -> PaybackTier {
        PaybackTier::classify(self.payback_years)
    }

    pub fn roi_tier(&self) -> RoiTier {
        RoiTier::classify(self.roi_5yr)
    }
}

/// 서비스가 돌려준 증기 절감량과 조정 변수로 지표를 다시 계산한다.
///
/// 열역학 계산은 다시 하지 않는다. 0 나눗셈은 IEEE-754 규칙대로 둔다.
pub fn recompute(steam_saved_kg_hr: f64, state: &SensitivityState) -> DerivedMetrics {
    let annual_savings = steam_saved_kg_hr * state.operating_hours * state.fuel_cost;
    let payback_years = state.installation_cost / annual_savings;
    let roi_5yr =
        ((annual_savings * 5.0 - state.installation_cost) / state.installation_cost) * 100.0;
    DerivedMetrics {
        annual_savings,
        payback_years,
        roi_5yr,
    }
}

/// 회수기간 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaybackTier {
    /// 3년 미만
    Good,
    /// 3년 이상 5년 미만
    Moderate,
    /// 5년 이상, 무한대, NaN
    Poor,
}

impl PaybackTier {
    pub fn classify(payback_years: f64) -> Self {
        if payback_years < 3.0 {
            PaybackTier::Good
        } else if payback_years < 5.0 {
            PaybackTier::Moderate
        } else {
            PaybackTier::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaybackTier::Good => "good",
            PaybackTier::Moderate => "moderate",
            PaybackTier::Poor => "poor",
        }
    }
}

/// ROI 등급. 0 초과만 Positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiTier {
    Positive,
    Negative,
}

impl RoiTier {
    pub fn classify(roi_percent: f64) -> Self {
        if roi_percent > 0.0 {
            RoiTier::Positive
        } else {
            RoiTier::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoiTier::Positive => "positive",
            RoiTier::Negative => "negative",
        }
    }
}

/// 조정 가능한 변수 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensitivityParam {
    FuelCost,
    OperatingHours,
    InstallationCost,
}

/// 슬라이더 화면이 값을 바꿀 때마다 호출하는 what-if 모델.
///
/// 기준 증기 절감량은 고정이고, 변수 하나가 바뀔 때마다 지표를 처음부터 다시 계산한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityModel {
    steam_saved_kg_hr: f64,
    state: SensitivityState,
}

impl SensitivityModel {
    pub fn new(steam_saved_kg_hr: f64, state: SensitivityState) -> Self {
        Self {
            steam_saved_kg_hr,
            state,
        }
    }

    pub fn steam_saved_kg_hr(&self) -> f64 {
        self.steam_saved_kg_hr
    }

    pub fn state(&self) -> SensitivityState {
        self.state
    }

    pub fn metrics(&self) -> DerivedMetrics {
        recompute(self.steam_saved_kg_hr, &self.state)
    }

    /// 변수 하나를 바꾸고 새 지표를 돌려준다.
    pub fn set(&mut self, param: SensitivityParam, value: f64) -> DerivedMetrics {
        match param {
            SensitivityParam::FuelCost => self.state.fuel_cost = value,
            SensitivityParam::OperatingHours => self.state.operating_hours = value,
            SensitivityParam::InstallationCost => self.state.installation_cost = value,
        }
        self.metrics()
    }
}

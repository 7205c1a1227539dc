//! 입력 폼 검증. 필드별 범위 검사, 입구/출구 온도 교차 검사, 제출 게이트를 제공한다.
//!
//! 모든 함수는 순수 함수이며 표시(빨간 테두리 등)는 호출하는 쪽에서 처리한다.

use std::collections::BTreeMap;

use super::fields::{FieldId, FieldSpec};
use crate::format::{format_grouped, NumberLocale};
use crate::service::models::AnalysisInput;

/// 필드 하나의 검증 실패 사유. `Display` 문자열이 화면에 그대로 표시된다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// 비어 있거나 숫자로 읽을 수 없음
    #[error("{label} is required")]
    Required { label: &'static str },
    /// 허용 범위 밖. 경계값은 로케일 형식으로 미리 만들어 둔다.
    #[error("Must be between {min} and {max}")]
    OutOfRange { min: String, max: String },
    /// 출구 온도가 입구 온도 이상
    #[error("Outlet must be lower than inlet temperature")]
    OutletNotBelowInlet,
}

/// 검증 시점의 필드 상태. 저장하지 않고 입력이 바뀔 때마다 새로 만든다.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub field: FieldId,
    /// 읽은 숫자. 숫자로 읽지 못하면 None
    pub value: Option<f64>,
    pub error: Option<FieldError>,
}

impl FieldState {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// 오류 문구. 유효하면 빈 문자열.
    pub fn error_message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

/// 앞뒤 공백을 제거하고 유한한 f64로 읽는다. `inf`, `NaN`, 뒤에 붙은 문자는 거부한다.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 배기가스는 열을 잃어야 하므로 출구 온도는 입구보다 낮아야 한다.
/// 둘 중 하나라도 숫자가 아니면 이 규칙으로는 실패시키지 않는다.
pub fn validate_outlet_below_inlet(inlet_c: f64, outlet_c: f64) -> bool {
    inlet_c.is_nan() || outlet_c.is_nan() || outlet_c < inlet_c
}

/// 기본 검증기(en-US 숫자 형식)로 필드 하나를 검증한다.
pub fn validate_field(field: FieldId, raw: &str) -> FieldState {
    Validator::default().validate_field(field, raw)
}

/// 사용자가 입력한 원문 그대로의 폼 값.
#[derive(Debug, Clone, Default)]
pub struct AnalysisForm {
    values: BTreeMap<FieldId, String>,
    pub fuel_type: String,
}

impl AnalysisForm {
    pub fn new(fuel_type: impl Into<String>) -> Self {
        Self {
            values: BTreeMap::new(),
            fuel_type: fuel_type.into(),
        }
    }

    pub fn with(mut self, field: FieldId, raw: impl Into<String>) -> Self {
        self.set(field, raw);
        self
    }

    pub fn set(&mut self, field: FieldId, raw: impl Into<String>) {
        self.values.insert(field, raw.into());
    }

    /// 입력 원문. 아직 입력하지 않은 필드는 빈 문자열.
    pub fn raw(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// 모든 입력값을 지운다(폼 리셋).
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// 폼 전체 검증 결과. 첫 실패에서 멈추지 않고 모든 필드를 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct FormReport {
    states: Vec<FieldState>,
}

impl FormReport {
    /// 모든 필드가 유효하고 교차 검사를 통과했는지.
    pub fn is_accepted(&self) -> bool {
        self.states.iter().all(FieldState::is_valid)
    }

    /// 스키마 순서의 필드 상태 목록.
    pub fn states(&self) -> &[FieldState] {
        &self.states
    }

    pub fn state(&self, field: FieldId) -> &FieldState {
        &self.states[field as usize]
    }

    /// 실패한 필드와 사유.
    pub fn errors(&self) -> impl Iterator<Item = (FieldId, &FieldError)> {
        self.states
            .iter()
            .filter_map(|s| s.error.as_ref().map(|e| (s.field, e)))
    }

    fn value(&self, field: FieldId) -> f64 {
        self.state(field).value.unwrap_or(f64::NAN)
    }
}

/// 필드 검증기. 오류 문구의 경계값 표시에 쓸 숫자 형식을 들고 있다.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    locale: NumberLocale,
}

impl Validator {
    pub fn new(locale: NumberLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    /// 필드 하나를 검증한다. 빈 값/숫자 아님 → Required, 범위 밖 → OutOfRange.
    pub fn validate_field(&self, field: FieldId, raw: &str) -> FieldState {
        let spec = field.spec();
        let Some(value) = parse_number(raw) else {
            return FieldState {
                field,
                value: None,
                error: Some(FieldError::Required { label: spec.label }),
            };
        };
        let error = if spec.contains(value) {
            None
        } else {
            Some(self.out_of_range(spec))
        };
        FieldState {
            field,
            value: Some(value),
            error,
        }
    }

    fn out_of_range(&self, spec: &FieldSpec) -> FieldError {
        FieldError::OutOfRange {
            min: format_grouped(spec.min, self.locale),
            max: format_grouped(spec.max, self.locale),
        }
    }

    /// 일곱 필드를 모두 검증하고, 두 온도가 각각 유효할 때 교차 검사를 적용한다.
    /// 교차 검사 실패는 출구 온도 필드의 오류로 기록한다.
    pub fn validate_form(&self, form: &AnalysisForm) -> FormReport {
        let mut states: Vec<FieldState> = FieldId::ALL
            .iter()
            .map(|&field| self.validate_field(field, form.raw(field)))
            .collect();

        let inlet = &states[FieldId::FlueTempIn as usize];
        let outlet = &states[FieldId::FlueTempOut as usize];
        if let (Some(tin), Some(tout), true, true) =
            (inlet.value, outlet.value, inlet.is_valid(), outlet.is_valid())
        {
            if !validate_outlet_below_inlet(tin, tout) {
                states[FieldId::FlueTempOut as usize].error = Some(FieldError::OutletNotBelowInlet);
            }
        }

        FormReport { states }
    }

    /// 제출 게이트. 통과하면 서비스로 보낼 입력을, 아니면 전체 검증 결과를 돌려준다.
    pub fn submit(&self, form: &AnalysisForm) -> Result<AnalysisInput, FormReport> {
        let report = self.validate_form(form);
        if !report.is_accepted() {
            tracing::debug!(
                invalid = report.errors().count(),
                "analysis form rejected"
            );
            return Err(report);
        }
        Ok(AnalysisInput {
            flue_temp_in: report.value(FieldId::FlueTempIn),
            flue_temp_out: report.value(FieldId::FlueTempOut),
            flow_rate: report.value(FieldId::FlowRate),
            steam_demand: report.value(FieldId::SteamDemand),
            fuel_type: form.fuel_type.clone(),
            fuel_cost: report.value(FieldId::FuelCost),
            operating_hours: report.value(FieldId::OperatingHours),
            installation_cost: report.value(FieldId::InstallationCost),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_trailing_garbage_and_non_finite() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn nan_never_trips_cross_rule() {
        assert!(validate_outlet_below_inlet(f64::NAN, 400.0));
        assert!(validate_outlet_below_inlet(300.0, f64::NAN));
    }
}

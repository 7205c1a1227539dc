use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 분석 입력 폼의 숫자 필드 식별자.
///
/// 순서는 입력 폼에 표시되는 순서와 같고, 직렬화 시 snake_case id를 그대로 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    /// 배기가스 입구 온도 [°C]
    FlueTempIn,
    /// 배기가스 출구 온도 [°C]
    FlueTempOut,
    /// 배기가스 질량 유량 [kg/h]
    FlowRate,
    /// 현재 증기 수요 [kg/h]
    SteamDemand,
    /// 연료 단가 [/kg]
    FuelCost,
    /// 연간 운전 시간 [h/년]
    OperatingHours,
    /// 설치비
    InstallationCost,
}

impl FieldId {
    pub const ALL: [FieldId; 7] = [
        FieldId::FlueTempIn,
        FieldId::FlueTempOut,
        FieldId::FlowRate,
        FieldId::SteamDemand,
        FieldId::FuelCost,
        FieldId::OperatingHours,
        FieldId::InstallationCost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::FlueTempIn => "flue_temp_in",
            FieldId::FlueTempOut => "flue_temp_out",
            FieldId::FlowRate => "flow_rate",
            FieldId::SteamDemand => "steam_demand",
            FieldId::FuelCost => "fuel_cost",
            FieldId::OperatingHours => "operating_hours",
            FieldId::InstallationCost => "installation_cost",
        }
    }

    /// 이 필드의 검증 규칙을 반환한다.
    pub fn spec(&self) -> &'static FieldSpec {
        // FIELD_SPECS는 ALL과 같은 순서로 정의되어 있다.
        &FIELD_SPECS[*self as usize]
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 스키마에 없는 필드 id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// 필드 하나의 허용 범위와 표시 이름.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,
    /// 최솟값(포함)
    pub min: f64,
    /// 최댓값(포함)
    pub max: f64,
    pub label: &'static str,
}

impl FieldSpec {
    /// 값이 [min, max] 구간 안에 있는지 확인한다.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// 전체 입력 허용 범위. 외부 분석 서비스와의 호환을 위해 값이 바뀌면 안 된다.
pub const FIELD_SPECS: [FieldSpec; 7] = [
    FieldSpec {
        id: FieldId::FlueTempIn,
        min: 50.0,
        max: 800.0,
        label: "Inlet Temperature",
    },
    FieldSpec {
        id: FieldId::FlueTempOut,
        min: 30.0,
        max: 600.0,
        label: "Outlet Temperature",
    },
    FieldSpec {
        id: FieldId::FlowRate,
        min: 1.0,
        max: 500_000.0,
        label: "Flow Rate",
    },
    FieldSpec {
        id: FieldId::SteamDemand,
        min: 1.0,
        max: 500_000.0,
        label: "Steam Demand",
    },
    FieldSpec {
        id: FieldId::FuelCost,
        min: 0.01,
        max: 1000.0,
        label: "Fuel Cost",
    },
    FieldSpec {
        id: FieldId::OperatingHours,
        min: 1.0,
        max: 8760.0,
        label: "Operating Hours",
    },
    FieldSpec {
        id: FieldId::InstallationCost,
        min: 1.0,
        max: 100_000_000.0,
        label: "Installation Cost",
    },
];

/// 입력 폼에서 고를 수 있는 연료 종류. 필드 자체는 자유 문자열이다.
pub const FUEL_TYPES: [&str; 5] = ["Coal", "Natural Gas", "Bagasse", "Fuel Oil", "Biomass"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_table_matches_field_order() {
        for (idx, id) in FieldId::ALL.iter().enumerate() {
            assert_eq!(FIELD_SPECS[idx].id, *id);
            assert_eq!(id.spec().id, *id);
        }
    }

    #[test]
    fn parses_schema_ids_only() {
        assert_eq!("flow_rate".parse::<FieldId>(), Ok(FieldId::FlowRate));
        assert_eq!(
            "fuel_type".parse::<FieldId>(),
            Err(UnknownField("fuel_type".into()))
        );
    }
}

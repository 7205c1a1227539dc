//! 폐열 회수 분석 입력 폼: 필드 스키마와 검증.

pub mod fields;
pub mod validation;

pub use fields::{FieldId, FieldSpec, UnknownField, FIELD_SPECS, FUEL_TYPES};
pub use validation::{
    parse_number, validate_field, validate_outlet_below_inlet, AnalysisForm, FieldError,
    FieldState, FormReport, Validator,
};

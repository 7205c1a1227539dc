use heat_recovery_toolbox::form::{
    validate_field, AnalysisForm, FieldError, FieldId, FormReport, Validator,
};
use heat_recovery_toolbox::format::NumberLocale;

fn full_form() -> AnalysisForm {
    AnalysisForm::new("Bagasse")
        .with(FieldId::FlueTempIn, "300")
        .with(FieldId::FlueTempOut, "150")
        .with(FieldId::FlowRate, "20000")
        .with(FieldId::SteamDemand, "5000")
        .with(FieldId::FuelCost, "2.5")
        .with(FieldId::OperatingHours, "8000")
        .with(FieldId::InstallationCost, "1500000")
}

fn failed_fields(report: &FormReport) -> Vec<FieldId> {
    report.errors().map(|(f, _)| f).collect()
}

#[test]
fn bounds_are_inclusive_for_every_field() {
    let eps = 1e-6;
    for field in FieldId::ALL {
        let spec = field.spec();
        assert!(validate_field(field, &spec.min.to_string()).is_valid(), "{field} min");
        assert!(validate_field(field, &spec.max.to_string()).is_valid(), "{field} max");

        let below = validate_field(field, &(spec.min - eps).to_string());
        assert!(
            matches!(below.error, Some(FieldError::OutOfRange { .. })),
            "{field} below min: {:?}",
            below.error
        );
        let above = validate_field(field, &(spec.max + eps).to_string());
        assert!(
            matches!(above.error, Some(FieldError::OutOfRange { .. })),
            "{field} above max: {:?}",
            above.error
        );
    }
}

#[test]
fn blank_input_is_required_for_every_field() {
    for field in FieldId::ALL {
        for raw in ["", "   ", "\t"] {
            let state = validate_field(field, raw);
            assert_eq!(state.value, None);
            assert_eq!(
                state.error_message(),
                format!("{} is required", field.spec().label)
            );
        }
    }
}

#[test]
fn non_numeric_input_counts_as_missing() {
    let state = validate_field(FieldId::FlowRate, "abc");
    assert_eq!(state.error_message(), "Flow Rate is required");
}

#[test]
fn out_of_range_message_uses_grouped_bounds() {
    let state = validate_field(FieldId::FlowRate, "0");
    assert_eq!(state.error_message(), "Must be between 1 and 500,000");

    let de = Validator::new(NumberLocale::DeDe).validate_field(FieldId::InstallationCost, "0.5");
    assert_eq!(de.error_message(), "Must be between 1 and 100.000.000");

    let fuel = validate_field(FieldId::FuelCost, "2000");
    assert_eq!(fuel.error_message(), "Must be between 0.01 and 1,000");
}

#[test]
fn outlet_must_be_strictly_below_inlet() {
    let validator = Validator::default();
    let cases = [("300", "300", false), ("300", "299.99", true), ("300", "301", false)];
    for (tin, tout, accepted) in cases {
        let form = full_form()
            .with(FieldId::FlueTempIn, tin)
            .with(FieldId::FlueTempOut, tout);
        let report = validator.validate_form(&form);
        assert_eq!(report.is_accepted(), accepted, "in={tin} out={tout}");
        if !accepted {
            assert_eq!(failed_fields(&report), vec![FieldId::FlueTempOut]);
            assert_eq!(
                report.state(FieldId::FlueTempOut).error,
                Some(FieldError::OutletNotBelowInlet)
            );
        }
    }
}

#[test]
fn cross_rule_skipped_when_a_temperature_is_invalid() {
    // 입구 온도가 범위 밖이면 그 오류만 보고한다.
    let form = full_form()
        .with(FieldId::FlueTempIn, "40")
        .with(FieldId::FlueTempOut, "100");
    let report = Validator::default().validate_form(&form);
    assert_eq!(failed_fields(&report), vec![FieldId::FlueTempIn]);
}

#[test]
fn one_bad_field_blocks_submission() {
    let validator = Validator::default();
    for field in FieldId::ALL {
        let form = full_form().with(field, "");
        let report = validator.submit(&form).expect_err("must be blocked");
        assert_eq!(failed_fields(&report), vec![field]);
    }
}

#[test]
fn accepted_form_builds_request_body() {
    let input = Validator::default().submit(&full_form()).expect("valid form");
    assert_eq!(input.flue_temp_in, 300.0);
    assert_eq!(input.flue_temp_out, 150.0);
    assert_eq!(input.installation_cost, 1_500_000.0);
    assert_eq!(input.fuel_type, "Bagasse");

    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(json["operating_hours"], 8000.0);
    assert_eq!(json["fuel_type"], "Bagasse");
}

#[test]
fn field_ids_parse_from_wire_names() {
    assert_eq!("flow_rate".parse::<FieldId>().unwrap(), FieldId::FlowRate);
    let err = "boiler_size".parse::<FieldId>().unwrap_err();
    assert!(err.to_string().contains("boiler_size"));
}

#[test]
fn negative_values_are_out_of_range_not_missing() {
    let state = validate_field(FieldId::FuelCost, "-5");
    assert_eq!(state.value, Some(-5.0));
    assert_eq!(state.error_message(), "Must be between 0.01 and 1,000");
}

#[test]
fn scientific_notation_hits_inclusive_bounds() {
    let at_min = validate_field(FieldId::FlueTempIn, "5e1");
    assert!(at_min.is_valid());
    assert_eq!(at_min.value, Some(50.0));

    assert!(validate_field(FieldId::InstallationCost, "1e8").is_valid());
    assert!(!validate_field(FieldId::FlueTempIn, "4.9e1").is_valid());
}

use heat_recovery_toolbox::economics::{
    recompute, PaybackTier, RoiTier, SensitivityModel, SensitivityParam, SensitivityState,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

fn state(fuel_cost: f64, operating_hours: f64, installation_cost: f64) -> SensitivityState {
    SensitivityState {
        fuel_cost,
        operating_hours,
        installation_cost,
    }
}

#[test]
fn zero_steam_saving_never_pays_back() {
    let m = recompute(0.0, &state(5.0, 8000.0, 1_000_000.0));
    assert_eq!(m.annual_savings, 0.0);
    assert!(m.payback_years.is_infinite() && m.payback_years > 0.0);
    assert_close(m.roi_5yr, -100.0, 1e-12);
    assert_eq!(m.payback_tier(), PaybackTier::Poor);
    assert_eq!(m.roi_tier(), RoiTier::Negative);
}

#[test]
fn reference_case_metrics() {
    let m = recompute(1000.0, &state(2.0, 8000.0, 1_000_000.0));
    assert_close(m.annual_savings, 16_000_000.0, 1e-6);
    assert_close(m.payback_years, 0.0625, 1e-12);
    assert_close(m.roi_5yr, 7900.0, 1e-9);
    assert_eq!(m.payback_tier(), PaybackTier::Good);
    assert_eq!(m.roi_tier(), RoiTier::Positive);
}

#[test]
fn recompute_is_deterministic() {
    let s = state(3.7, 6200.0, 2_400_000.0);
    let a = recompute(812.5, &s);
    let b = recompute(812.5, &s);
    assert_eq!(a, b);
}

#[test]
fn payback_tier_thresholds() {
    assert_eq!(PaybackTier::classify(2.999), PaybackTier::Good);
    assert_eq!(PaybackTier::classify(3.0), PaybackTier::Moderate);
    assert_eq!(PaybackTier::classify(4.999), PaybackTier::Moderate);
    assert_eq!(PaybackTier::classify(5.0), PaybackTier::Poor);
    assert_eq!(PaybackTier::classify(f64::INFINITY), PaybackTier::Poor);
    assert_eq!(PaybackTier::classify(f64::NAN), PaybackTier::Poor);
}

#[test]
fn roi_tier_thresholds() {
    assert_eq!(RoiTier::classify(0.1), RoiTier::Positive);
    assert_eq!(RoiTier::classify(0.0), RoiTier::Negative);
    assert_eq!(RoiTier::classify(-25.0), RoiTier::Negative);
    assert_eq!(RoiTier::classify(f64::NAN), RoiTier::Negative);
}

#[test]
fn zero_installation_cost_is_not_an_error() {
    let m = recompute(1000.0, &state(2.0, 8000.0, 0.0));
    assert_eq!(m.payback_years, 0.0);
    assert!(m.roi_5yr.is_infinite());

    let nothing = recompute(0.0, &state(2.0, 8000.0, 0.0));
    assert!(nothing.payback_years.is_nan());
    assert!(nothing.roi_5yr.is_nan());
}

#[test]
fn model_recomputes_after_each_change() {
    let mut model = SensitivityModel::new(1000.0, state(2.0, 8000.0, 1_000_000.0));
    assert_close(model.metrics().payback_years, 0.0625, 1e-12);

    let m = model.set(SensitivityParam::InstallationCost, 48_000_000.0);
    assert_close(m.payback_years, 3.0, 1e-12);
    assert_eq!(m.payback_tier(), PaybackTier::Moderate);

    let m = model.set(SensitivityParam::FuelCost, 1.0);
    assert_close(m.annual_savings, 8_000_000.0, 1e-6);
    assert_close(m.payback_years, 6.0, 1e-12);
    assert_eq!(m.roi_tier(), RoiTier::Negative);

    let m = model.set(SensitivityParam::OperatingHours, 0.0);
    assert!(m.payback_years.is_infinite());
    assert_eq!(model.state().operating_hours, 0.0);
    assert_eq!(model.steam_saved_kg_hr(), 1000.0);
}

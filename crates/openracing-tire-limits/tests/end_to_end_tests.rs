//! End-to-end tests through the crate-level entry points.

use approx::assert_relative_eq;
use openracing_tire_limits::thermal::next_temperature;
use openracing_tire_limits::wear::{CompoundHardness, next_wear};
use openracing_tire_limits::{
    LimitModel, LimitResult, StabilityStatus, TireCompound, TireLimitError, TireLimits, TireState,
    ValidationError, combined_slip_limit, effective_friction, friction_ellipse_limit,
    stability_assessment, validate,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init()
        .ok();
}

fn reference_state() -> TireState {
    TireState::new(4000.0, TireCompound::Performance)
        .with_temperature(80.0)
        .with_pressure(200.0)
        .with_wear(0.0)
}

#[test]
fn test_reference_state_moderate_demand() -> TestResult {
    init_tracing();
    let state = reference_state();

    let friction = effective_friction(&state)?;
    assert_relative_eq!(friction.mu_x, 1.1, epsilon = 1e-12);
    assert_relative_eq!(friction.mu_y, 1.1, epsilon = 1e-12);

    let ellipse = friction_ellipse_limit(&state, 1500.0, 2000.0)?;
    assert!(ellipse.within_limit);
    assert_eq!(ellipse.model(), LimitModel::FrictionEllipse);
    assert_relative_eq!(ellipse.axes.fx_max, 4400.0, epsilon = 1e-9);
    assert_relative_eq!(ellipse.axes.fy_max, 4400.0, epsilon = 1e-9);
    let usage = ellipse.usage.value().ok_or("usage should be bounded")?;
    assert_relative_eq!(usage, 0.568, epsilon = 1e-3);

    let report = stability_assessment(&state, 1500.0, 2000.0, 0.85)?;
    assert_eq!(report.status, StabilityStatus::Stable);
    assert!(report.force_margin > 0.0);
    Ok(())
}

#[test]
fn test_reference_state_excessive_demand() -> TestResult {
    let state = reference_state();

    let ellipse = friction_ellipse_limit(&state, 4000.0, 3500.0)?;
    assert!(!ellipse.within_limit);
    let usage = ellipse.usage.value().ok_or("usage should be bounded")?;
    assert!(usage > 1.0);

    let report = stability_assessment(&state, 4000.0, 3500.0, 0.85)?;
    assert_eq!(report.status, StabilityStatus::Unstable);
    assert!(report.status.requires_force_reduction());
    assert!(report.force_margin < 0.0);
    assert!(report.force_margin_pct < 0.0);
    Ok(())
}

#[test]
fn test_combined_slip_reports_coupling() -> TestResult {
    let state = reference_state().with_slip(0.05, 8.0_f64.to_radians());
    let combined = combined_slip_limit(&state, 1500.0, 2000.0, 0.3)?;
    let ellipse = friction_ellipse_limit(&state, 1500.0, 2000.0)?;
    assert_eq!(combined.model(), LimitModel::CombinedSlip);
    assert!(combined.usage > ellipse.usage);

    let detail = combined.combined_slip().ok_or("missing combined-slip detail")?;
    assert_relative_eq!(detail.lateral_reduction, 1.0 - 0.3 * 1500.0 / 4400.0, epsilon = 1e-9);
    assert_relative_eq!(detail.longitudinal_reduction, 1.0 - 0.3 * 2000.0 / 4400.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_invalid_state_is_rejected_everywhere() {
    init_tracing();
    let state = reference_state().with_temperature(200.0);
    let expected = ValidationError::OutOfRange {
        field: "temperature",
        value: 200.0,
        min: -50.0,
        max: 150.0,
    };
    assert_eq!(validate(&state), Err(expected));
    assert_eq!(
        friction_ellipse_limit(&state, 0.0, 0.0),
        Err(TireLimitError::Validation(expected))
    );
    assert_eq!(
        stability_assessment(&state, 0.0, 0.0, 0.85),
        Err(TireLimitError::Validation(expected))
    );
}

#[test]
fn test_warm_worn_tire_loses_grip() -> TestResult {
    let fresh = reference_state();
    let mut worn = fresh.with_wear(next_wear(0.0, 2000.0, CompoundHardness::Medium));
    worn.temperature = next_temperature(80.0, 10.0, 3000.0, 3000.0, 25.0, 1.0);
    assert_relative_eq!(worn.wear, 0.2, epsilon = 1e-12);
    assert!(worn.temperature > 100.0 && worn.temperature < 150.0);

    let limits = TireLimits::STANDARD;
    let f_fresh = limits.effective_friction(&fresh)?;
    let f_worn = limits.effective_friction(&worn)?;
    assert!(f_worn.mu_y < f_fresh.mu_y);

    let fresh_eval = limits.evaluate(&fresh, 2500.0, 2500.0)?;
    let worn_eval = limits.evaluate(&worn, 2500.0, 2500.0)?;
    assert!(worn_eval.ellipse.usage > fresh_eval.ellipse.usage);
    Ok(())
}

#[test]
fn test_force_scale_brings_demand_back_to_limit() -> TestResult {
    let state = reference_state();
    let over = friction_ellipse_limit(&state, 4000.0, 3500.0)?;
    let scale = over.usage.force_scale();
    assert!(scale < 1.0);

    let scaled = friction_ellipse_limit(&state, 4000.0 * scale, 3500.0 * scale)?;
    let usage = scaled.usage.value().ok_or("usage should be bounded")?;
    assert_relative_eq!(usage, 1.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_out_of_band_parameters_are_clamped() -> TestResult {
    init_tracing();
    let state = reference_state().with_slip(0.0, 8.0_f64.to_radians());

    let clamped = combined_slip_limit(&state, 1000.0, 1000.0, 7.0)?;
    let max = combined_slip_limit(&state, 1000.0, 1000.0, 0.5)?;
    assert_eq!(clamped, max);

    let nan = stability_assessment(&state, 3900.0, 0.0, f64::NAN)?;
    assert_eq!(nan.status, StabilityStatus::Warning);
    let strict = stability_assessment(&state, 100.0, 0.0, -1.0)?;
    assert_eq!(strict.status, StabilityStatus::Warning);
    Ok(())
}

#[test]
fn test_huge_force_usage_survives_json_round_trip() -> TestResult {
    let state = reference_state();
    let result = friction_ellipse_limit(&state, 1e200, 0.0)?;
    assert!(!result.within_limit);
    assert!(result.usage.value().is_some_and(f64::is_finite));

    let json = serde_json::to_string(&result)?;
    let back: LimitResult = serde_json::from_str(&json)?;
    assert_eq!(back.within_limit, result.within_limit);
    assert_eq!(back.usage.is_unbounded(), result.usage.is_unbounded());
    Ok(())
}

//! End-to-end exit state scenarios for an air nozzle.

use nz_core::GasProperties;
use nz_core::units::{k, pa};
use nz_flow::{DesignParameters, ExpansionRegime, NozzleError, compute, isentropic};

#[test]
fn area_ratio_five_from_one_megapascal() {
    let gas = GasProperties::AIR;
    let params = DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 5.0).unwrap();
    let sol = compute(&params, &gas).unwrap();

    assert!((sol.mach - 3.17).abs() < 0.01, "M = {}", sol.mach);

    let t = sol.temperature.value;
    assert!((99.0..=100.0).contains(&t), "T = {t}");

    // Velocity must match a direct closed-form evaluation at the solved Mach number.
    let direct = isentropic::evaluate(sol.mach, k(300.0), &gas).unwrap();
    assert!((sol.velocity.value - direct.velocity.value).abs() < 1e-9);
    let a = (1.4_f64 * 287.0 * t).sqrt();
    assert!((sol.velocity.value - sol.mach * a).abs() < 1e-9);
    assert!((sol.velocity.value - 634.7).abs() < 1.0, "V = {}", sol.velocity.value);

    // p/p0 at M ≈ 3.17 is about 0.021, so a 1 bar back pressure is far off.
    assert!((sol.p_isentropic.value - 20_993.0).abs() < 5.0);
    assert_eq!(sol.regime, ExpansionRegime::UnderOrOverExpanded);
}

#[test]
fn smaller_area_ratio_gives_smaller_mach() {
    let gas = GasProperties::AIR;
    let wide = DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 5.0).unwrap();
    let narrow = DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 1.5).unwrap();

    let m_wide = compute(&wide, &gas).unwrap().mach;
    let m_narrow = compute(&narrow, &gas).unwrap().mach;

    assert!((m_narrow - 1.85).abs() < 0.01, "M = {m_narrow}");
    assert!(m_narrow > 1.0);
    assert!(m_narrow < m_wide);
}

#[test]
fn matched_back_pressure_is_perfectly_expanded() {
    let gas = GasProperties::AIR;
    let probe = DesignParameters::new(pa(2e6), k(800.0), pa(1e5), 4.0).unwrap();
    let p_is = compute(&probe, &gas).unwrap().p_isentropic.value;

    let matched = DesignParameters::new(pa(2e6), k(800.0), pa(p_is * 1.02), 4.0).unwrap();
    let sol = compute(&matched, &gas).unwrap();
    assert!((sol.mismatch_pct - 2.0).abs() < 1e-6);
    assert_eq!(sol.regime, ExpansionRegime::PerfectlyExpanded);
}

#[test]
fn gas_model_changes_exit_state() {
    let params = DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 5.0).unwrap();
    let air = compute(&params, &GasProperties::AIR).unwrap();
    let helium = compute(&params, &GasProperties::new(5.0 / 3.0, 2077.1).unwrap()).unwrap();

    assert!(helium.velocity.value > air.velocity.value);
    assert!(helium.mach != air.mach);
}

#[test]
fn failures_do_not_poison_later_evaluations() {
    let gas = GasProperties::AIR;
    assert!(matches!(
        DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 0.5),
        Err(NozzleError::InvalidParameter { .. })
    ));

    let params = DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 2.0).unwrap();
    let first = compute(&params, &gas).unwrap();
    let second = compute(&params, &gas).unwrap();
    assert_eq!(first, second);
}

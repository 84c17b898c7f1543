//! End-to-end layout scenarios.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use pore_layout::{
    compute_report, compute_report_in_cube, units, validate_layout, LayoutParams,
    PlacementSampler, PoreShape, VolumetricError,
};

#[test]
fn reference_unit_cube_scenario() {
    let params = LayoutParams::default()
        .with_pore_count(10)
        .with_distribution(0.5, 0.15)
        .with_cube_size(1.0)
        .with_shape(PoreShape::sphere(0.05).unwrap())
        .with_gap(0.01);

    let layout = PlacementSampler::new(params)
        .unwrap()
        .sample_seeded(2024)
        .accepted()
        .expect("ten small pores fit comfortably");

    assert_eq!(layout.len(), 10);
    validate_layout(&layout).unwrap();

    let placements = layout.placements();
    for (i, a) in placements.iter().enumerate() {
        assert!(a.center.min_element() >= 0.05);
        assert!(a.center.max_element() <= 0.95);
        for b in &placements[i + 1..] {
            assert!(a.center.distance(b.center) >= 0.11);
        }
    }

    let report = compute_report(&layout, 1.0).unwrap();
    let expected = 10.0 * 4.0 / 3.0 * PI * 0.05_f64.powi(3);
    assert_relative_eq!(report.porosity, expected, max_relative = 1e-9);
    assert_relative_eq!(report.porosity_percent(), 0.524, epsilon = 1e-3);
}

#[test]
fn millimetre_cube_with_steel_density() {
    let params = LayoutParams::default()
        .with_pore_count(20)
        .with_cube_size(10.0)
        .with_shape(PoreShape::sphere(0.5).unwrap())
        .with_gap(0.1);

    let layout = PlacementSampler::new(params)
        .unwrap()
        .sample_seeded(8)
        .accepted()
        .unwrap();

    let density = units::g_per_cm3_to_g_per_mm3(7.85);
    let report = compute_report(&layout, density).unwrap();

    // Solid 10 mm steel cube weighs 7.85 g; pores take ~1% off
    assert!(report.mass < 7.85);
    assert!(report.mass > 7.7);
    assert_relative_eq!(report.mass, report.effective_density * 1000.0, max_relative = 1e-12);
}

#[test]
fn synthetic_overfull_layout_is_a_domain_error() {
    let shape = PoreShape::sphere(0.6).unwrap();
    let placements: Vec<_> = (0..2)
        .map(|_| pore_layout::PorePlacement::new(shape, glam::DVec3::splat(0.5)))
        .collect();

    let result = compute_report_in_cube(&placements, 1.0, 1.0);
    assert!(matches!(result, Err(VolumetricError::DomainViolation { .. })));
}

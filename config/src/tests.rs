//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_volume_tolerance_is_finer_than_reported_precision() {
    assert!(VOLUME_RELATIVE_TOLERANCE < 1e-6);
}

// =============================================================================
// SAMPLING TESTS
// =============================================================================

#[test]
fn test_default_attempt_budget() {
    assert_eq!(DEFAULT_MAX_ATTEMPTS_PER_PORE, 100);
}

#[test]
fn test_retry_budget_is_bounded() {
    assert!(DEFAULT_MAX_TOTAL_RETRIES > 0);
}

#[test]
fn test_default_distribution_is_normalized() {
    assert!(DEFAULT_MEAN > 0.0 && DEFAULT_MEAN < 1.0);
    assert!(DEFAULT_STD_DEV > 0.0);
}

#[test]
fn test_default_pore_fits_in_default_cube() {
    assert!(2.0 * (DEFAULT_PORE_RADIUS + DEFAULT_GAP) < DEFAULT_CUBE_SIZE);
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_default_segments_above_minimum() {
    assert!(DEFAULT_PORE_SEGMENTS >= MIN_PORE_SEGMENTS);
}

#[test]
fn test_bsp_epsilon_coarser_than_epsilon() {
    assert!(BSP_PLANE_EPSILON > EPSILON);
}

// =============================================================================
// ARTIFACT TESTS
// =============================================================================

#[test]
fn test_snapshot_is_square() {
    assert_eq!(SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT);
}

#[test]
fn test_section_count_exact_division() {
    assert_eq!(section_count(10.0, 1.0), 11);
    assert_eq!(section_count(1.0, 0.25), 5);
}

#[test]
fn test_section_count_inexact_division() {
    // 0, 0.3, 0.6, 0.9 and the clamped final offset 1.0
    assert_eq!(section_count(1.0, 0.3), 5);
}

#[test]
fn test_section_count_float_noise() {
    // 0.3 / 0.1 is 2.9999999999999996 in f64
    assert_eq!(section_count(0.3, 0.1), 4);
}

#[test]
fn test_section_count_step_larger_than_cube() {
    assert_eq!(section_count(1.0, 5.0), 2);
}

#[test]
fn test_section_count_huge_ratio_saturates() {
    assert!(section_count(1.0e300, 1.0e-300) > MAX_SECTIONS_PER_PLANE);
}

#[test]
fn test_section_count_degenerate() {
    assert_eq!(section_count(0.0, 1.0), 0);
    assert_eq!(section_count(1.0, 0.0), 0);
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[test]
fn test_density_conversion_factor() {
    let water_g_per_mm3 = 1.0 / MM3_PER_CM3;
    assert!((water_g_per_mm3 - 0.001).abs() < EPSILON);
}

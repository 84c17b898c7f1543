//! Full batch runs on the mesh backend.

use std::fs;

use pore_batch::{run, BatchError, BatchParams, CollaboratorError, ExportFormat, ModelPhase};
use pore_layout::{LayoutParams, PoreShape};
use pore_mesh::{MeshEngine, SvgRenderer};

fn params(root: &std::path::Path) -> BatchParams {
    BatchParams::default()
        .with_layout(
            LayoutParams::default()
                .with_pore_count(3)
                .with_cube_size(10.0)
                .with_distribution(0.5, 0.15)
                .with_shape(PoreShape::sphere(0.8).unwrap())
                .with_gap(0.2),
        )
        .with_model_count(2)
        .with_section_step(5.0)
        .with_output_root(root)
        .with_seed(9)
}

#[test]
fn batch_writes_stl_reports_and_svg() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = MeshEngine::default().with_segments(8);

    let batch = run(&params(dir.path()), &mut engine, &mut SvgRenderer::new()).unwrap();

    assert_eq!(batch.models().len(), 2);
    assert_eq!(engine.open_sessions(), 0);
    for model in batch.models() {
        let artifacts = &model.artifacts;

        let stl = fs::read(&artifacts.solid).unwrap();
        assert!(artifacts.solid.extension().is_some_and(|e| e == "stl"));
        assert!(stl.len() > 84);
        assert_eq!((stl.len() - 84) % 50, 0);
        let triangles = u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]) as usize;
        assert_eq!(stl.len(), 84 + 50 * triangles);
        // Cube alone is 12 triangles; every pore adds its cavity.
        assert!(triangles > 12);

        assert_eq!(artifacts.snapshots.len(), 4);
        // offsets 0, 5 and 10 on three planes
        assert_eq!(artifacts.sections.len(), 9);
        for path in artifacts.snapshots.iter().chain(artifacts.sections.iter().map(|s| &s.path)) {
            assert!(path.extension().is_some_and(|e| e == "svg"));
            let svg = fs::read_to_string(path).unwrap();
            assert!(svg.starts_with("<svg"));
            assert!(svg.trim_end().ends_with("</svg>"));
        }

        let text = fs::read_to_string(&artifacts.report_text).unwrap();
        assert!(text.contains("Material density: 7.8500 g/cm^3"));
    }
}

#[test]
fn mid_section_cuts_through_pores() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = MeshEngine::default().with_segments(8);

    let batch = run(
        &params(dir.path()).with_model_count(1),
        &mut engine,
        &mut SvgRenderer::new(),
    )
    .unwrap();

    // The pores cluster around the cube center, so a central cut crosses at
    // least the cube outline and usually pore outlines as well.
    let model = &batch.models()[0];
    let middle = model
        .artifacts
        .sections
        .iter()
        .find(|s| s.plane == "XY" && s.offset == 5.0)
        .unwrap();
    let svg = fs::read_to_string(&middle.path).unwrap();
    assert!(svg.contains("<path"));
    assert!(svg.contains("XY @ 5.00"));
}

#[test]
fn boundary_rep_export_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = MeshEngine::default().with_segments(8);
    let params = params(dir.path()).with_export_format(ExportFormat::BoundaryRep);

    let err = run(&params, &mut engine, &mut SvgRenderer::new()).unwrap_err();

    match err {
        BatchError::Collaborator {
            completed: 0,
            phase: ModelPhase::Exporting,
            source: CollaboratorError::Unsupported { .. },
            ..
        } => {}
        other => panic!("expected unsupported export, got {other}"),
    }
    assert_eq!(engine.open_sessions(), 0);
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

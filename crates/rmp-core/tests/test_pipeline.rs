mod common;

use rmp_core::element::ElementShape;
use rmp_core::error::RmpError;
use rmp_core::pipeline::{
    output_title, process, process_stack, NoOpReporter, OperatorKind, RmpConfig, SliceSelection,
};
use rmp_core::raster::BitDepth;

use common::*;

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

#[test]
fn test_progress_runs_from_zero_to_total() {
    let src = noise(12, 12, 4);
    for op in OperatorKind::ALL {
        let iterations = 3;
        let reporter = RecordingReporter::default();
        process(&src, &config(op, ElementShape::Disk, 3, iterations), &reporter).unwrap();

        let total = op.total_steps(iterations as usize);
        let reports = reporter.reports.lock().unwrap();
        let expected: Vec<(usize, usize)> = (0..=total).map(|i| (i, total)).collect();
        assert_eq!(*reports, expected, "{op}");
    }
}

#[test]
fn test_progress_totals_per_operator() {
    let n = 6;
    assert_eq!(OperatorKind::Opening.total_steps(n), n + 1);
    assert_eq!(OperatorKind::Closing.total_steps(n), n + 1);
    assert_eq!(OperatorKind::WhiteTopHat.total_steps(n), n + 2);
    assert_eq!(OperatorKind::BlackTopHat.total_steps(n), n + 2);
    assert_eq!(OperatorKind::Smoothing.total_steps(n), 4 * n + 3);
    assert_eq!(OperatorKind::EnhanceType1.total_steps(n), 2 * n + 12);
    assert_eq!(OperatorKind::EnhanceType2.total_steps(n), 2 * n + 12);
}

// ---------------------------------------------------------------------------
// Stacks
// ---------------------------------------------------------------------------

#[test]
fn test_stack_processes_selected_slices_only() {
    let slices = vec![noise(10, 10, 1), noise(10, 10, 2), noise(10, 10, 3)];
    let selection = SliceSelection::parse("3,1", slices.len()).unwrap();
    let cfg = config(OperatorKind::Closing, ElementShape::Square, 3, 2);
    let reporter = RecordingReporter::default();

    let results = process_stack(&slices, &selection, &cfg, &reporter).unwrap();

    let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![1, 3]);
    assert_eq!(*reporter.slices.lock().unwrap(), vec![(1, 3), (3, 3)]);

    let single = process(&slices[2], &cfg, &NoOpReporter).unwrap();
    assert_eq!(results[1].raster, single);
}

#[test]
fn test_stack_validates_every_slice_first() {
    let slices = vec![noise(10, 10, 1), flat(3000, 1, 0, BitDepth::Eight)];
    let cfg = config(OperatorKind::Opening, ElementShape::Disk, 3, 1);
    let reporter = RecordingReporter::default();

    let err = process_stack(&slices, &SliceSelection::All, &cfg, &reporter).unwrap_err();
    assert!(matches!(err, RmpError::ImageTooLarge { .. }));
    assert!(reporter.slices.lock().unwrap().is_empty());
    assert!(reporter.reports.lock().unwrap().is_empty());
}

#[test]
fn test_stack_rejects_out_of_range_selection() {
    let slices = vec![noise(6, 6, 1)];
    let cfg = RmpConfig::default();
    let err = process_stack(&slices, &SliceSelection::Indices(vec![2]), &cfg, &NoOpReporter)
        .unwrap_err();
    assert!(matches!(err, RmpError::InvalidSliceSelection(_)));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_config_toml_roundtrip() {
    let cfg = config(OperatorKind::EnhanceType2, ElementShape::Line, 9, 12);
    let text = toml::to_string_pretty(&cfg).unwrap();
    assert!(text.contains("operator = \"enhance-type2\""));
    assert!(text.contains("shape = \"line\""));
    let back: RmpConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let cfg: RmpConfig = toml::from_str("operator = \"white-top-hat\"\nse_size = 7\n").unwrap();
    assert_eq!(cfg.operator, OperatorKind::WhiteTopHat);
    assert_eq!(cfg.shape, ElementShape::Disk);
    assert_eq!((cfg.se_size, cfg.iterations), (7, 1));
}

#[test]
fn test_output_titles() {
    let cfg = config(OperatorKind::Smoothing, ElementShape::Square, 5, 8);
    assert_eq!(output_title("nuclei", &cfg), "nuclei-MS_S5N8");
    let cfg = config(OperatorKind::BlackTopHat, ElementShape::Disk, 3, 1);
    assert_eq!(output_title("x", &cfg), "x-BTH_D3N1");
}

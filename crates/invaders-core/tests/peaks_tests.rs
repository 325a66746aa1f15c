// Host-side tests for spectral peak detection and board mapping.

use invaders_core::*;
use rand::prelude::*;

const BINS: usize = 512;

fn mapper() -> PeakMapper {
    PeakMapper::new(&GameConfig::default())
}

fn snapshot_with(spikes: &[(usize, u8)]) -> MagnitudeSnapshot {
    let mut bins = vec![0u8; BINS];
    for &(bin, value) in spikes {
        bins[bin] = value;
    }
    MagnitudeSnapshot::from_bins(bins)
}

fn full_board() -> Board {
    Board::new(ROWS, COLUMNS)
}

const ROWS: usize = 5;
const COLUMNS: usize = 11;

#[test]
fn expected_frequencies_are_evenly_spaced() {
    let freqs = expected_frequencies(FrequencyBracket::new(2200.0, 5800.0), 11);
    assert_eq!(freqs.len(), 11);
    for (n, f) in freqs.iter().enumerate() {
        let expected = (2200.0 + n as f64 * (5800.0 - 2200.0) / 10.0).round() as u32;
        assert_eq!(*f, expected, "column {n}");
    }
    assert_eq!(freqs[0], 2200);
    assert_eq!(freqs[10], 5800);
}

#[test]
fn single_spike_maps_to_column_zero_of_its_row() {
    let m = mapper();
    let spans = m.row_spans(BINS);
    for span in &spans {
        let bin = span.start + span.len() / 3;
        let frame = m.map(&snapshot_with(&[(bin, 255)]), &full_board(), 0.0, 0.0, 7);
        assert_eq!(frame.id, 7);
        assert_eq!(frame.peaks.len(), 1, "row {}", span.row);
        let p = frame.peaks[0];
        assert_eq!(p.row, span.row);
        assert_eq!(p.column, 0);
        assert_eq!(p.bin_index, bin);
        assert_eq!(p.magnitude, 255);
    }
}

#[test]
fn spike_in_trimmed_edge_is_ignored() {
    let m = mapper();
    let frame = m.map(&snapshot_with(&[(3, 255), (505, 255)]), &full_board(), 0.0, 0.0, 1);
    assert!(frame.peaks.is_empty());
}

#[test]
fn silent_snapshot_has_no_peaks() {
    let m = mapper();
    let frame = m.map(&MagnitudeSnapshot::new(BINS), &full_board(), 0.0, 0.0, 1);
    assert!(frame.peaks.is_empty());
    assert_eq!(frame.max_magnitude, 0);
    assert!(m.locate_player(&MagnitudeSnapshot::new(BINS)).is_none());
}

#[test]
fn threshold_is_exclusive() {
    let m = mapper();
    // bins 60 and 80 in row 0 are far enough apart to both qualify
    let near = m.map(&snapshot_with(&[(60, 200), (80, 161)]), &full_board(), 0.0, 0.0, 1);
    assert_eq!(near.peaks.len(), 2);
    let far = m.map(&snapshot_with(&[(60, 200), (80, 160)]), &full_board(), 0.0, 0.0, 1);
    assert_eq!(far.peaks.len(), 1);
}

#[test]
fn nearby_bins_collapse_into_one_peak() {
    let m = mapper();
    // row 0 steps are 9.3px: two bins apart is 18.6px, three is 27.9px
    let close = m.map(&snapshot_with(&[(60, 255), (62, 255)]), &full_board(), 0.0, 0.0, 1);
    assert_eq!(close.peaks.len(), 1);
    assert_eq!(close.peaks[0].bin_index, 60);

    let apart = m.map(&snapshot_with(&[(60, 255), (63, 255)]), &full_board(), 0.0, 0.0, 1);
    let cols: Vec<_> = apart.peaks.iter().map(|p| (p.column, p.bin_index)).collect();
    assert_eq!(cols, vec![(0, 60), (1, 63)]);
}

#[test]
fn dead_cell_consumes_its_column_slot() {
    let m = mapper();
    let mut board = full_board();
    board.mark_hit(0, 1);
    let frame = m.map(&snapshot_with(&[(50, 255), (60, 255), (70, 255)]), &board, 0.0, 0.0, 1);
    let cols: Vec<_> = frame.row(0).map(|p| (p.column, p.bin_index)).collect();
    assert_eq!(cols, vec![(0, 50), (2, 70)]);
}

#[test]
fn pixel_positions_follow_offsets() {
    let m = mapper();
    let snap = snapshot_with(&[(41, 255)]);
    let frame = m.map(&snap, &full_board(), 0.0, 0.0, 1);
    // first bin of row 0 sits one step right of the row start
    assert!((frame.peaks[0].pixel_x - 109.3).abs() < 1e-3);
    assert_eq!(frame.peaks[0].pixel_y, 0.0);

    let shifted = m.map(&snap, &full_board(), 12.5, 3.0, 2);
    assert!((shifted.peaks[0].pixel_x - 121.8).abs() < 1e-3);
    assert_eq!(shifted.peaks[0].pixel_y, 3.0);

    let row2 = m.map(&snapshot_with(&[(213, 255)]), &full_board(), 0.0, 3.0, 3);
    assert_eq!(row2.peaks[0].row, 2);
    assert_eq!(row2.peaks[0].pixel_y, 203.0);
}

#[test]
fn random_snapshots_respect_column_limits_and_order() {
    let m = mapper();
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..500 {
        let bins: Vec<u8> = (0..BINS).map(|_| rng.gen()).collect();
        let mut board = full_board();
        for _ in 0..rng.gen_range(0..20) {
            board.mark_hit(rng.gen_range(0..ROWS), rng.gen_range(0..COLUMNS));
        }
        let frame = m.map(&MagnitudeSnapshot::from_bins(bins), &board, 0.0, 0.0, 1);
        let spans = m.row_spans(BINS);
        for row in 0..ROWS {
            let peaks: Vec<_> = frame.row(row).collect();
            assert!(peaks.len() <= COLUMNS);
            for w in peaks.windows(2) {
                assert!(w[0].column < w[1].column);
                assert!(w[0].bin_index < w[1].bin_index);
            }
            for p in &peaks {
                assert!(board.is_alive(p.row, p.column));
                assert!(p.bin_index >= spans[row].start && p.bin_index < spans[row].end);
                assert!(frame.max_magnitude.abs_diff(p.magnitude) < 40);
            }
        }
    }
}

#[test]
fn player_is_located_at_first_maximum() {
    let m = mapper();
    let peak = m
        .locate_player(&snapshot_with(&[(256, 255), (300, 255), (100, 90)]))
        .unwrap();
    assert_eq!(peak.bin_index, 256);
    // step = round2(800 / 512) = 1.56
    assert!((peak.pixel_x - 400.92).abs() < 1e-3);
    assert!((peak.viewport_x - (-200.0 + 1.5 * 400.92)).abs() < 1e-3);
}

#[test]
fn frame_extent_and_column_lookup() {
    let m = mapper();
    // row 0 bin 60 and row 4 bin 395
    let frame = m.map(&snapshot_with(&[(60, 255), (395, 255)]), &full_board(), 0.0, 0.0, 1);
    let (left, right) = frame.extent(50.0).unwrap();
    let xs: Vec<f32> = frame.peaks.iter().map(|p| p.pixel_x).collect();
    assert_eq!(left, xs.iter().cloned().fold(f32::MAX, f32::min));
    assert_eq!(right, xs.iter().cloned().fold(f32::MIN, f32::max) + 50.0);

    let bottom = frame.peaks.iter().find(|p| p.row == 4).unwrap();
    assert_eq!(frame.column_at(bottom.pixel_x + 1.0, 50.0), Some(0));
    assert_eq!(frame.column_at(-1000.0, 50.0), None);
    assert!(PeakFrame::default().extent(50.0).is_none());
}

use psd_core::PsdError;
use psd_instrument::{ChannelGrid, CHANNEL_EDGES, CHANNEL_TABLE_REVISION, MULTISIZER_BOUNDARIES};

#[test]
fn embedded_table_spans_twenty_to_six_hundred() {
    assert_eq!(MULTISIZER_BOUNDARIES.len(), CHANNEL_EDGES);
    assert_eq!(MULTISIZER_BOUNDARIES[0], 20.0);
    assert_eq!(MULTISIZER_BOUNDARIES[CHANNEL_EDGES - 1], 600.0);
    let grid = ChannelGrid::multisizer();
    assert_eq!(grid.channels(), 300);
    assert_eq!(grid.pivots().len(), 300);
    assert_eq!(grid.widths().len(), 300);
}

#[test]
fn channels_grow_near_geometrically() {
    let grid = ChannelGrid::multisizer();
    let ratios: Vec<f64> = grid.widths().windows(2).map(|w| w[1] / w[0]).collect();
    assert!(ratios.iter().all(|ratio| (1.005..1.02).contains(ratio)));
    let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
    assert!((mean - 1.0114).abs() < 1e-3, "mean ratio {mean}");
}

#[test]
fn revision_one_is_the_geometric_approximation() {
    assert_eq!(CHANNEL_TABLE_REVISION, 1);
    for (k, edge) in MULTISIZER_BOUNDARIES.iter().enumerate() {
        let geometric = 20.0 * 30f64.powf(k as f64 / 300.0);
        assert!((edge - geometric).abs() < 6e-4, "edge {k}: {edge} vs {geometric}");
    }
}

#[test]
fn pivots_are_edge_midpoints() {
    let grid = ChannelGrid::multisizer();
    for (k, pivot) in grid.pivots().iter().enumerate() {
        let edges = &grid.boundaries()[k..k + 2];
        assert_eq!(*pivot, (edges[0] + edges[1]) / 2.0);
    }
}

#[test]
fn channel_lookup_is_strict_at_edges() {
    let grid = ChannelGrid::new(vec![1.0, 2.0, 4.0]).unwrap();
    assert_eq!(grid.channel_of(1.5), Some(0));
    assert_eq!(grid.channel_of(3.9), Some(1));
    assert_eq!(grid.channel_of(1.0), None);
    assert_eq!(grid.channel_of(2.0), None);
    assert_eq!(grid.channel_of(4.0), None);
    assert_eq!(grid.channel_of(0.5), None);
    assert_eq!(grid.channel_of(5.0), None);
}

#[test]
fn custom_grids_are_validated() {
    for edges in [vec![], vec![1.0], vec![1.0, 1.0], vec![2.0, 1.0], vec![1.0, f64::NAN]] {
        assert!(matches!(
            ChannelGrid::new(edges),
            Err(PsdError::Validation(_))
        ));
    }
}

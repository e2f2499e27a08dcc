//! The instrument channel table.
//!
//! 301 channel edges from 20 to 600 covering 300 channels, each about 1.13%
//! wider than the one before. The table is a versioned data asset: remapped
//! output is only comparable between runs that used the same revision.
//!
//! Revision 1 is not the manufacturer's published table. Its edges are
//! `20·30^(k/300)` rounded to three decimals, with exact `20` and `600`
//! endpoints, so results are close to but not bit-compatible with a
//! reference instrument. Replacing the literals with the published values
//! requires bumping [`CHANNEL_TABLE_REVISION`].

use psd_core::errors::{ErrorInfo, PsdError};

/// Revision of [`MULTISIZER_BOUNDARIES`].
pub const CHANNEL_TABLE_REVISION: u32 = 1;

/// Number of edges in the embedded table.
pub const CHANNEL_EDGES: usize = 301;

/// Channel edges of the embedded instrument grid, ascending.
///
/// Geometric approximation of the instrument table; see the module docs.
#[rustfmt::skip]
pub const MULTISIZER_BOUNDARIES: [f64; CHANNEL_EDGES] = [
    20.0, 20.228, 20.459, 20.692, 20.928, 21.166, 21.408, 21.652,
    21.899, 22.148, 22.401, 22.656, 22.915, 23.176, 23.44, 23.708,
    23.978, 24.251, 24.528, 24.807, 25.09, 25.376, 25.666, 25.958,
    26.254, 26.554, 26.856, 27.163, 27.472, 27.786, 28.102, 28.423,
    28.747, 29.075, 29.406, 29.741, 30.08, 30.423, 30.77, 31.121,
    31.476, 31.835, 32.198, 32.565, 32.936, 33.312, 33.692, 34.076,
    34.464, 34.857, 35.255, 35.657, 36.063, 36.474, 36.89, 37.311,
    37.736, 38.167, 38.602, 39.042, 39.487, 39.937, 40.393, 40.853,
    41.319, 41.79, 42.267, 42.748, 43.236, 43.729, 44.227, 44.732,
    45.242, 45.758, 46.279, 46.807, 47.341, 47.88, 48.426, 48.978,
    49.537, 50.102, 50.673, 51.251, 51.835, 52.426, 53.024, 53.628,
    54.24, 54.858, 55.484, 56.116, 56.756, 57.403, 58.058, 58.72,
    59.389, 60.067, 60.751, 61.444, 62.145, 62.853, 63.57, 64.295,
    65.028, 65.769, 66.519, 67.278, 68.045, 68.82, 69.605, 70.399,
    71.201, 72.013, 72.834, 73.665, 74.505, 75.354, 76.213, 77.082,
    77.961, 78.85, 79.749, 80.658, 81.578, 82.508, 83.449, 84.4,
    85.363, 86.336, 87.32, 88.316, 89.323, 90.341, 91.372, 92.413,
    93.467, 94.533, 95.611, 96.701, 97.803, 98.918, 100.046, 101.187,
    102.341, 103.508, 104.688, 105.881, 107.089, 108.31, 109.545, 110.794,
    112.057, 113.334, 114.627, 115.934, 117.255, 118.592, 119.945, 121.312,
    122.695, 124.094, 125.509, 126.94, 128.388, 129.851, 131.332, 132.829,
    134.344, 135.876, 137.425, 138.992, 140.577, 142.179, 143.8, 145.44,
    147.098, 148.776, 150.472, 152.188, 153.923, 155.678, 157.453, 159.248,
    161.064, 162.9, 164.757, 166.636, 168.536, 170.458, 172.401, 174.367,
    176.355, 178.366, 180.399, 182.456, 184.537, 186.641, 188.769, 190.921,
    193.098, 195.3, 197.526, 199.778, 202.056, 204.36, 206.69, 209.047,
    211.43, 213.841, 216.279, 218.745, 221.239, 223.762, 226.313, 228.894,
    231.503, 234.143, 236.813, 239.513, 242.244, 245.006, 247.799, 250.624,
    253.482, 256.372, 259.295, 262.252, 265.242, 268.266, 271.325, 274.418,
    277.547, 280.712, 283.913, 287.15, 290.424, 293.735, 297.084, 300.471,
    303.897, 307.362, 310.867, 314.411, 317.996, 321.622, 325.289, 328.998,
    332.749, 336.543, 340.38, 344.261, 348.186, 352.156, 356.172, 360.233,
    364.34, 368.494, 372.696, 376.945, 381.243, 385.59, 389.986, 394.433,
    398.93, 403.479, 408.079, 412.732, 417.438, 422.197, 427.011, 431.88,
    436.804, 441.784, 446.822, 451.916, 457.069, 462.28, 467.551, 472.882,
    478.274, 483.727, 489.242, 494.821, 500.462, 506.169, 511.94, 517.777,
    523.68, 529.651, 535.69, 541.798, 547.976, 554.224, 560.543, 566.934,
    573.398, 579.936, 586.548, 593.236, 600.0,
];

/// A fixed channel grid: edges, pivots and widths.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelGrid {
    boundaries: Vec<f64>,
    pivots: Vec<f64>,
    widths: Vec<f64>,
}

impl ChannelGrid {
    /// Builds a grid from strictly increasing finite edges.
    ///
    /// # Errors
    /// Returns [`PsdError::Validation`] for fewer than two edges or edges that
    /// are not finite and strictly increasing.
    pub fn new(boundaries: Vec<f64>) -> Result<Self, PsdError> {
        if boundaries.len() < 2 {
            return Err(PsdError::Validation(
                ErrorInfo::new("grid-too-short", "a channel grid needs at least two edges")
                    .with_context("len", boundaries.len()),
            ));
        }
        if let Some(idx) = boundaries.iter().position(|edge| !edge.is_finite()) {
            return Err(PsdError::Validation(
                ErrorInfo::new("grid-non-finite", "channel edges must be finite")
                    .with_context("index", idx),
            ));
        }
        if let Some(idx) = boundaries.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(PsdError::Validation(
                ErrorInfo::new("grid-not-increasing", "channel edges must be strictly increasing")
                    .with_context("index", idx + 1),
            ));
        }
        let pivots = boundaries
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect();
        let widths = boundaries.windows(2).map(|pair| pair[1] - pair[0]).collect();
        Ok(Self {
            boundaries,
            pivots,
            widths,
        })
    }

    /// The embedded 300-channel instrument grid.
    pub fn multisizer() -> Self {
        let boundaries = MULTISIZER_BOUNDARIES.to_vec();
        let pivots = boundaries
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect();
        let widths = boundaries.windows(2).map(|pair| pair[1] - pair[0]).collect();
        Self {
            boundaries,
            pivots,
            widths,
        }
    }

    /// Channel edges, ascending.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Arithmetic means of adjacent edges.
    pub fn pivots(&self) -> &[f64] {
        &self.pivots
    }

    /// Differences of adjacent edges.
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Number of channels, one fewer than the edges.
    pub fn channels(&self) -> usize {
        self.pivots.len()
    }

    /// Channel strictly containing `value`, if any. A value equal to an edge
    /// belongs to no channel.
    pub fn channel_of(&self, value: f64) -> Option<usize> {
        let upper = self.boundaries.partition_point(|edge| *edge <= value);
        if upper == 0 || upper == self.boundaries.len() {
            return None;
        }
        let lower = upper - 1;
        (self.boundaries[lower] < value && value < self.boundaries[upper]).then_some(lower)
    }
}

impl Default for ChannelGrid {
    fn default() -> Self {
        Self::multisizer()
    }
}

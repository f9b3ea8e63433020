use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ENHANCE_EXTRA_STEPS, EQUALIZE_LEVELS, EQUALIZE_LEVELS_WIDE, SMOOTHING_EXTRA_STEPS,
};
use crate::error::{Result, RmpError};
use crate::raster::BitDepth;

/// Operator applied to each image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorKind {
    #[default]
    Opening,
    Closing,
    WhiteTopHat,
    BlackTopHat,
    Smoothing,
    EnhanceType1,
    EnhanceType2,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 7] = [
        Self::Opening,
        Self::Closing,
        Self::WhiteTopHat,
        Self::BlackTopHat,
        Self::Smoothing,
        Self::EnhanceType1,
        Self::EnhanceType2,
    ];

    /// Short tag used in result titles.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Opening => "Opn",
            Self::Closing => "Clos",
            Self::WhiteTopHat => "WTH",
            Self::BlackTopHat => "BTH",
            Self::Smoothing => "MS",
            Self::EnhanceType1 => "MCE1",
            Self::EnhanceType2 => "MCE2",
        }
    }

    /// Number of progress steps for `iterations` orientations. Reports run
    /// from 0 to this value inclusive.
    pub fn total_steps(self, iterations: usize) -> usize {
        match self {
            Self::Opening | Self::Closing => iterations + 1,
            Self::WhiteTopHat | Self::BlackTopHat => iterations + 2,
            Self::Smoothing => 4 * iterations + SMOOTHING_EXTRA_STEPS,
            Self::EnhanceType1 | Self::EnhanceType2 => 2 * iterations + ENHANCE_EXTRA_STEPS,
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opening => write!(f, "Opening"),
            Self::Closing => write!(f, "Closing"),
            Self::WhiteTopHat => write!(f, "White top-hat"),
            Self::BlackTopHat => write!(f, "Black top-hat"),
            Self::Smoothing => write!(f, "Smoothing"),
            Self::EnhanceType1 => write!(f, "Enhance - type 1"),
            Self::EnhanceType2 => write!(f, "Enhance - type 2"),
        }
    }
}

impl FromStr for OperatorKind {
    type Err = RmpError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "opening" | "opn" | "open" => Ok(Self::Opening),
            "closing" | "clos" | "close" => Ok(Self::Closing),
            "whitetophat" | "wth" => Ok(Self::WhiteTopHat),
            "blacktophat" | "bth" => Ok(Self::BlackTopHat),
            "smoothing" | "ms" => Ok(Self::Smoothing),
            "enhancetype1" | "enhance1" | "mce1" => Ok(Self::EnhanceType1),
            "enhancetype2" | "enhance2" | "mce2" => Ok(Self::EnhanceType2),
            _ => Err(RmpError::InvalidValue {
                field: "operator",
                value: s.to_string(),
            }),
        }
    }
}

/// Variant of the multiscale contrast enhancement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnhanceVariant {
    Type1,
    Type2,
}

/// Equalization bin counts for the three contrast chains of an Enhance run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnhanceLevels {
    pub white: usize,
    pub black: usize,
    pub combined: usize,
}

impl EnhanceVariant {
    /// Type 2 widens the black top-hat chain to 128 bins on 16-bit images.
    pub fn levels(self, bit_depth: BitDepth) -> EnhanceLevels {
        let black = match (self, bit_depth) {
            (Self::Type2, BitDepth::Sixteen) => EQUALIZE_LEVELS_WIDE,
            _ => EQUALIZE_LEVELS,
        };
        EnhanceLevels {
            white: EQUALIZE_LEVELS,
            black,
            combined: EQUALIZE_LEVELS,
        }
    }
}

/// Thread-safe progress reporting.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// Processing of stack slice `index` (1-based) of a `total`-slice stack
    /// starts.
    fn begin_slice(&self, _index: usize, _total: usize) {}

    /// `completed` of `total` steps of the current operator are done.
    fn report(&self, _completed: usize, _total: usize) {}
}

/// Reporter that discards every event.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Step counter for one operator run. Each [`tick`](Self::tick) reports the
/// steps completed so far, then counts one more.
pub struct Progress<'a> {
    reporter: &'a dyn ProgressReporter,
    completed: usize,
    total: usize,
}

impl<'a> Progress<'a> {
    pub fn new(reporter: &'a dyn ProgressReporter, total: usize) -> Self {
        Self {
            reporter,
            completed: 0,
            total,
        }
    }

    pub fn tick(&mut self) {
        self.reporter.report(self.completed, self.total);
        self.completed += 1;
    }

    /// Steps reported so far.
    pub fn completed(&self) -> usize {
        self.completed
    }
}

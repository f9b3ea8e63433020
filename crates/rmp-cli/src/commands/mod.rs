pub mod config;
pub mod info;
pub mod run;

use clap::ValueEnum;
use rmp_core::element::ElementShape;
use rmp_core::pipeline::OperatorKind;

#[derive(Clone, Copy, ValueEnum)]
pub enum OperatorArg {
    Opening,
    Closing,
    WhiteTopHat,
    BlackTopHat,
    Smoothing,
    Enhance1,
    Enhance2,
}

impl From<OperatorArg> for OperatorKind {
    fn from(arg: OperatorArg) -> Self {
        match arg {
            OperatorArg::Opening => OperatorKind::Opening,
            OperatorArg::Closing => OperatorKind::Closing,
            OperatorArg::WhiteTopHat => OperatorKind::WhiteTopHat,
            OperatorArg::BlackTopHat => OperatorKind::BlackTopHat,
            OperatorArg::Smoothing => OperatorKind::Smoothing,
            OperatorArg::Enhance1 => OperatorKind::EnhanceType1,
            OperatorArg::Enhance2 => OperatorKind::EnhanceType2,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    Disk,
    Line,
    Square,
}

impl From<ShapeArg> for ElementShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Disk => ElementShape::Disk,
            ShapeArg::Line => ElementShape::Line,
            ShapeArg::Square => ElementShape::Square,
        }
    }
}

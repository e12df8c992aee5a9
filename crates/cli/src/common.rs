//! Common types shared across CLI commands

use clap::ValueEnum;
use umigen_core::EnumStyle;

/// Enum field rendering, as accepted on the command line.
#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum EnumStyleArg {
    /// `Array<any>` for every enum field
    ArrayAny,
    /// Enum fields rendered like string fields
    String,
}

impl From<EnumStyleArg> for EnumStyle {
    fn from(arg: EnumStyleArg) -> Self {
        match arg {
            EnumStyleArg::ArrayAny => EnumStyle::ArrayAny,
            EnumStyleArg::String => EnumStyle::String,
        }
    }
}

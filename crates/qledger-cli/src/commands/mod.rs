//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod master;

use qledger_core::{ValidationMode, Variant};

/// Vendor layout selected on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum VariantArg {
    /// Six-line item blocks (item number, description, category, qty, net price, amount)
    A,
    /// Eight-line part blocks with shape-checked fields
    B,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::A => Variant::A,
            VariantArg::B => Variant::B,
        }
    }
}

/// Variant B validation mode selected on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Drop blocks with any failing field
    Strict,
    /// Keep partial blocks, blanking failing fields
    Relaxed,
}

impl From<ModeArg> for ValidationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Strict => ValidationMode::Strict,
            ModeArg::Relaxed => ValidationMode::Relaxed,
        }
    }
}

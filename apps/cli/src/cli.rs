//! # Command-Line Arguments
//!
//! ```text
//! aurum sales    --purity 18K --weight 5 [--labor 10000] [--basis vat|cash]
//! aurum purchase --price 300000 --purity 14K --weight 3.75
//! aurum settings show
//! aurum settings set-price --vat 350000 --cash 320000
//! aurum settings set-margins [--k14 25] [--k18 23] [--k24 15]
//!                            [--discount-points 3 | --discount-rate 3]
//!
//! global: --db <path> (or AURUM_DB_PATH), --json
//! ```
//!
//! Weight, labor and price stay raw text so that blank, negative and
//! non-numeric input reach the calculator and render as guidance instead of
//! a clap error.

use std::path::PathBuf;

use aurum_core::{DiscountPolicy, PriceBasis, PurchaseForm, PurchasePurity, Purity, SalesForm};
use clap::{Args, Parser, Subcommand};

use crate::commands::settings::MarginsUpdate;

#[derive(Parser, Debug)]
#[command(name = "aurum", version, about = "Gold jewelry sale and buy-back price calculator.")]
pub struct Cli {
    /// SQLite settings file. Defaults to the platform data directory.
    #[arg(long, global = true, env = "AURUM_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sale price, discount price and profit for a piece.
    Sales(SalesArgs),

    /// Buy-back amount for gold brought in by a customer.
    Purchase(PurchaseArgs),

    /// Show or edit the gold price and margins.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
pub struct SalesArgs {
    /// 14K, 18K or 24K
    #[arg(long, default_value_t = Purity::K14)]
    pub purity: Purity,

    /// Weight in grams
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub weight: String,

    /// Labor cost in won
    #[arg(long, allow_hyphen_values = true)]
    pub labor: Option<String>,

    /// Which spot price to use
    #[arg(long, default_value_t = PriceBasis::Vat)]
    pub basis: PriceBasis,
}

impl From<SalesArgs> for SalesForm {
    fn from(args: SalesArgs) -> Self {
        SalesForm {
            purity: args.purity,
            weight: args.weight,
            labor_cost: args.labor,
            price_basis: args.basis,
        }
    }
}

#[derive(Args, Debug)]
pub struct PurchaseArgs {
    /// Buy-back price per 3.75 g
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub price: String,

    /// 14K or 18K
    #[arg(long, default_value_t = PurchasePurity::K14)]
    pub purity: PurchasePurity,

    /// Weight in grams
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub weight: String,
}

impl From<PurchaseArgs> for PurchaseForm {
    fn from(args: PurchaseArgs) -> Self {
        PurchaseForm {
            purchase_price: args.price,
            purity: args.purity,
            weight: args.weight,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the gold price and margins.
    Show,

    /// Save today's gold price (per 3.75 g).
    SetPrice {
        /// VAT-inclusive price
        #[arg(long)]
        vat: f64,

        /// Cash price
        #[arg(long)]
        cash: f64,
    },

    /// Change one or more margins or the discount policy.
    SetMargins(MarginArgs),
}

#[derive(Args, Debug, Default)]
pub struct MarginArgs {
    /// 14K margin, percent
    #[arg(long, allow_negative_numbers = true)]
    pub k14: Option<f64>,

    /// 18K margin, percent
    #[arg(long, allow_negative_numbers = true)]
    pub k18: Option<f64>,

    /// 24K margin, percent
    #[arg(long, allow_negative_numbers = true)]
    pub k24: Option<f64>,

    /// Discount price = margin minus this many points
    #[arg(long, conflicts_with = "discount_rate")]
    pub discount_points: Option<f64>,

    /// Discount price = regular price minus this percent
    #[arg(long)]
    pub discount_rate: Option<f64>,
}

impl From<MarginArgs> for MarginsUpdate {
    fn from(args: MarginArgs) -> Self {
        let discount = match (args.discount_points, args.discount_rate) {
            (Some(points), _) => Some(DiscountPolicy::MarginPointReduction { points }),
            (None, Some(rate_percent)) => Some(DiscountPolicy::RateOnRegularPrice { rate_percent }),
            (None, None) => None,
        };

        MarginsUpdate {
            k14: args.k14,
            k18: args.k18,
            k24: args.k24,
            discount,
        }
    }
}

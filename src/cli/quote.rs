//! Quote command implementation

use crate::model::european_put_price;
use clap::Args;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Current token price
    #[arg(long)]
    pub spot: f64,

    /// Strike price, usually the spot
    #[arg(long)]
    pub strike: f64,

    /// Annualized volatility as a decimal (0.6 = 60%)
    #[arg(long)]
    pub volatility: f64,

    /// Years until the tokens unlock
    #[arg(long)]
    pub years: f64,

    /// Annual risk-free rate as a decimal
    #[arg(long, default_value = "0")]
    pub rate: f64,
}

impl QuoteArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let premium =
            european_put_price(self.spot, self.strike, self.years, self.rate, self.volatility)?;
        let discounted = (self.spot - premium).max(0.0);

        println!("Put premium:      {premium:.6}");
        println!("Discounted price: {discounted:.6}");
        println!("Discount:         {:.2}%", premium / self.spot * 100.0);
        Ok(())
    }
}

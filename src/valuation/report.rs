//! Plain-text rendering of a valuation

use super::{SeriesView, Valuation};
use rust_decimal_macros::dec;

const RULE: &str = "══════════════════════════════════════════════════════════════════════════";
const THIN: &str = "──────────────────────────────────────────────────────────────────────────";

impl Valuation {
    /// Format as table for CLI output
    pub fn format_table(&self, view: SeriesView) -> String {
        let summary = &self.summary;
        let locked_share = if summary.total_amount.is_zero() {
            dec!(0)
        } else {
            summary.total_locked_amount / summary.total_amount * dec!(100)
        };

        let mut out = format!(
            r#"
{RULE}
                       VESTING DLOM VALUATION
{RULE}
Evaluated at:     {}

PORTFOLIO
{THIN}
Total Amount:     {:.4}
Unlocked:         {:.4}
Locked:           {:.4} ({:.2}% of total)
Unlocked Value:   {:.2}
Locked Value:     {:.2}
Total Value:      {:.2}
"#,
            summary.evaluation_instant.to_rfc3339(),
            summary.total_amount,
            summary.total_unlocked_amount,
            summary.total_locked_amount,
            locked_share,
            summary.total_unlocked_value,
            summary.total_locked_value,
            summary.total_value,
        );

        if summary.by_token.len() > 1 {
            out.push_str(&format!(
                "\nBY TOKEN\n{THIN}\n{:<16} {:>16} {:>16} {:>18}\n",
                "Token", "Unlocked", "Locked", "Value"
            ));
            for (token, totals) in &summary.by_token {
                out.push_str(&format!(
                    "{:<16} {:>16.4} {:>16.4} {:>18.2}\n",
                    token, totals.unlocked_amount, totals.locked_amount, totals.value
                ));
            }
        }

        out.push_str(&format!(
            "\nUNLOCK EVENTS\n{THIN}\n{:<11} {:<10} {:>14} {:>12} {:>10} {:>16}\n",
            "Date", "Token", "Amount", "Disc. Price", "Discount", "Value"
        ));
        for priced in &self.events {
            out.push_str(&format!(
                "{:<11} {:<10} {:>14.4} {:>12.4} {:>9.2}% {:>16.2}\n",
                priced.event.date.to_string(),
                priced.event.token_id,
                priced.event.amount,
                priced.discounted_price,
                priced.discount_percent,
                priced.event_value,
            ));
        }

        let title = match view {
            SeriesView::PerPeriod => "SERIES (per period)",
            SeriesView::Cumulative => "SERIES (cumulative)",
        };
        out.push_str(&format!(
            "\n{title}\n{THIN}\n{:<11} {:>16} {:>16} {:>18}\n",
            "Date", "Unlocked", "Locked", "Value"
        ));
        for point in summary.series(view) {
            out.push_str(&format!(
                "{:<11} {:>16.4} {:>16.4} {:>18.2}\n",
                point.date.to_string(),
                point.unlocked_amount,
                point.locked_amount,
                point.value
            ));
        }
        out.push_str(RULE);
        out.push('\n');

        out
    }
}

//! Minimal end-to-end run: synthetic returns to a saved HTML tearsheet.
//!
//! ```bash
//! cargo run --example simple_report
//! ```

use chrono::NaiveDate;
use quantanalysis::{Language, QuantAnalysis, ReportOutput, ReturnSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).ok_or("bad date")?;
    let dates: Vec<NaiveDate> = (0..252)
        .map(|i| start + chrono::Duration::days(i))
        .collect();
    let values: Vec<f64> = (0..252)
        .map(|i| 0.0005 + 0.01 * ((i as f64 * 0.7).sin()))
        .collect();
    let returns = ReturnSeries::new(dates, values)?.with_name("Demo Strategy");

    let qa = QuantAnalysis::new()
        .risk_free_rate(0.02)
        .language(Language::En);

    let metrics = qa.analyze(&returns, None)?;
    println!("Total return: {:.2}%", metrics.return_metrics.total_return * 100.0);
    println!("Sharpe:       {:.3}", metrics.performance_metrics.sharpe);
    println!("Max drawdown: {:.2}%", metrics.risk_metrics.max_drawdown * 100.0);

    let artifact = qa.generate_report(&returns, None, ReportOutput::Save(None))?;
    if let Some(path) = artifact.path() {
        println!("Report saved to {}", path.display());
    }
    Ok(())
}

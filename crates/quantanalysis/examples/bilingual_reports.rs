//! Renders the same portfolio against a benchmark in Chinese and English.
//!
//! ```bash
//! cargo run --example bilingual_reports
//! ```

use chrono::NaiveDate;
use quantanalysis::{Language, QuantAnalysis, ReportOutput, ReturnSeries};

fn synthetic(seed: f64, name: &str) -> Result<ReturnSeries, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("bad date")?;
    let dates: Vec<NaiveDate> = (0..504)
        .map(|i| start + chrono::Duration::days(i))
        .collect();
    let values: Vec<f64> = (0..504)
        .map(|i| 0.0003 + 0.011 * ((i as f64 * seed).sin()))
        .collect();
    Ok(ReturnSeries::new(dates, values)?.with_name(name))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let returns = synthetic(0.7, "量化多因子组合")?;
    let benchmark = synthetic(1.3, "沪深300")?;

    for language in [Language::Zh, Language::En] {
        let qa = QuantAnalysis::new()
            .risk_free_rate(0.025)
            .language(language);

        let path = std::env::temp_dir().join(format!("tearsheet_{}.html", language.code()));
        let artifact = qa.generate_report(
            &returns,
            Some(&benchmark),
            ReportOutput::Save(Some(path)),
        )?;
        if let Some(path) = artifact.path() {
            println!("{} report: {}", language.code(), path.display());
        }
    }
    Ok(())
}

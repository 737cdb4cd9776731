use crate::error::{CreditAnalysisError, Result};
use crate::metrics::{DerivedMetricsData, Metric, PresentationSection};
use log::info;
use std::io::Write;

/// Renders derived metrics in presentation order.
pub struct MetricsReport<'a> {
    data: &'a DerivedMetricsData,
}

impl<'a> MetricsReport<'a> {
    pub fn new(data: &'a DerivedMetricsData) -> Self {
        Self { data }
    }

    /// Metrics present in the data, in report order, each once.
    pub fn ordered_metrics(&self) -> Vec<Metric> {
        PresentationSection::report_order()
            .into_iter()
            .filter(|metric| self.data.contains(*metric))
            .collect()
    }

    /// Writes `Particulars,<year1>,<year2>,...` followed by one row per
    /// metric. A year the metric was not computed for is an empty cell.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let years = self.data.fiscal_years();

        let mut header = Vec::with_capacity(years.len() + 1);
        header.push("Particulars".to_string());
        header.extend(years.iter().map(str::to_string));
        csv_writer.write_record(&header)?;

        let metrics = self.ordered_metrics();
        for metric in &metrics {
            let mut record = Vec::with_capacity(years.len() + 1);
            record.push(metric.label().to_string());
            for year in years.iter() {
                record.push(
                    self.data
                        .get(*metric, year)
                        .map(|value| format!("{:.2}", value))
                        .unwrap_or_default(),
                );
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        info!("Exported {} metrics across {} years to CSV", metrics.len(), years.len());
        Ok(())
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| CreditAnalysisError::ComputationFault(format!("CSV output is not UTF-8: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(self.data.to_json()?)
    }

    /// One table per presentation section, titled as on screen.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        let years: Vec<&str> = self.data.fiscal_years().iter().collect();

        output.push_str("# Credit Analysis\n\n");

        for section in PresentationSection::ALL {
            let metrics: Vec<Metric> = section
                .metrics()
                .iter()
                .copied()
                .filter(|metric| self.data.contains(*metric))
                .collect();
            if metrics.is_empty() {
                continue;
            }

            output.push_str(&format!("## {}\n\n", section.title()));
            if let Some(subtitle) = section.subtitle() {
                output.push_str(&format!("*{}*\n\n", subtitle));
            }

            output.push_str("| Particulars |");
            for year in &years {
                output.push_str(&format!(" {} |", year));
            }
            output.push('\n');

            output.push_str("|---|");
            for _ in &years {
                output.push_str("---:|");
            }
            output.push('\n');

            for metric in metrics {
                output.push_str(&format!("| {} |", metric.label()));
                for year in &years {
                    match self.data.get(metric, year) {
                        Some(value) => output.push_str(&format!(" {:.2} |", value)),
                        None => output.push_str(" - |"),
                    }
                }
                output.push('\n');
            }
            output.push('\n');
        }

        output
    }
}

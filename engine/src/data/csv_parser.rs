use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use shared::models::PriceBar;
use std::fs::File;
use std::io::BufReader;

use crate::error::EngineError;

pub struct DailyCsvParser;

impl DailyCsvParser {
    // CSV Header: Date,Open,High,Low,Close,Volume
    // Example Row: 2023-01-03,130.28,130.90,124.17,125.07,112117500
    pub fn load_bars_from_csv(file_path: &str) -> Result<Vec<PriceBar>, EngineError> {
        let file = File::open(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let mut bars = Vec::new();
        let headers = rdr.headers()?.clone();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2; // 1-based, first data row is below the header

            let date_str = Self::require_field(&record, &headers, "Date", line)?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                EngineError::CsvDataFormatError(format!(
                    "Error parsing 'Date' at line {}: {}",
                    line, e
                ))
            })?;

            let open = Self::parse_price(&record, &headers, "Open", line)?;
            let high = Self::parse_price(&record, &headers, "High", line)?;
            let low = Self::parse_price(&record, &headers, "Low", line)?;
            let close = Self::parse_price(&record, &headers, "Close", line)?;
            if close <= 0.0 {
                return Err(EngineError::CsvDataFormatError(format!(
                    "Non-positive close {} at line {}",
                    close, line
                )));
            }

            let volume_str = Self::require_field(&record, &headers, "Volume", line)?;
            let volume = volume_str.trim().parse::<u64>().map_err(|e| {
                EngineError::CsvDataFormatError(format!(
                    "Error parsing 'Volume' at line {}: {}",
                    line, e
                ))
            })?;

            bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }
        Ok(bars)
    }

    fn parse_price(
        record: &StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<f64, EngineError> {
        let raw = Self::require_field(record, headers, name, line)?;
        let value = raw.trim().parse::<f64>().map_err(|e| {
            EngineError::CsvDataFormatError(format!(
                "Error parsing '{}' at line {}: {}",
                name, line, e
            ))
        })?;
        // f64 parsing accepts "NaN" and "inf"; neither is a price.
        if !value.is_finite() {
            return Err(EngineError::CsvDataFormatError(format!(
                "Non-finite '{}' value at line {}",
                name, line
            )));
        }
        Ok(value)
    }

    // Field lookup by header name keeps parsing robust to column reordering.
    fn require_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<&'a str, EngineError> {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|pos| record.get(pos))
            .ok_or_else(|| {
                EngineError::CsvDataFormatError(format!(
                    "Missing '{}' field in CSV record at line {}",
                    name, line
                ))
            })
    }
}

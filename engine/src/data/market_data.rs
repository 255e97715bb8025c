// Holds the price series loaded into the engine, one ordered run of daily
// bars per symbol.
use anyhow::Result;
use chrono::NaiveDate;
use shared::models::PriceBar;
use std::collections::HashMap;

pub struct PriceSeriesStore {
    data: HashMap<String, Vec<PriceBar>>,
}

impl PriceSeriesStore {
    pub fn new() -> Self {
        PriceSeriesStore {
            data: HashMap::new(),
        }
    }

    /// Merge bars into a symbol's series. The series invariant (strictly
    /// increasing dates, no duplicates) is restored after every merge:
    /// bars are sorted by date and later duplicates of a date are dropped.
    pub fn add_bars(&mut self, symbol: &str, new_bars: Vec<PriceBar>) -> Result<()> {
        let bars = self.data.entry(symbol.to_string()).or_insert_with(Vec::new);
        bars.extend(new_bars);
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Ok(())
    }

    /// Bars for a symbol, optionally restricted to an inclusive date range.
    /// `None` means the symbol has never been loaded.
    pub fn get_bars(
        &self,
        symbol: &str,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Option<Vec<PriceBar>> {
        self.data.get(symbol).map(|bars| {
            bars.iter()
                .filter(|b| from_date.map_or(true, |start| b.date >= start))
                .filter(|b| to_date.map_or(true, |end| b.date <= end))
                .cloned()
                .collect()
        })
    }
}

impl Default for PriceSeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

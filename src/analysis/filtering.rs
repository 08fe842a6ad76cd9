use polars::prelude::{col, lit, LazyFrame};

pub trait AirQualityFrameFilterExt {
    /// Keeps only rows whose `city` equals `city`.
    /// An unknown city produces an empty frame.
    fn filter_city(self, city: &str) -> LazyFrame;

    /// Keeps weekend rows when `weekend` is true, weekday rows otherwise.
    /// Assumes the derived `is_weekend` column exists.
    fn filter_weekend(self, weekend: bool) -> LazyFrame;
}

impl AirQualityFrameFilterExt for LazyFrame {
    fn filter_city(self, city: &str) -> LazyFrame {
        self.filter(col("city").eq(lit(city)))
    }

    fn filter_weekend(self, weekend: bool) -> LazyFrame {
        self.filter(col("is_weekend").eq(lit(weekend)))
    }
}

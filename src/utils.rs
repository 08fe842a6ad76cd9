use std::error::Error;

/// Renders an error and its `source()` chain as one line, outermost first.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

/// Minimal escaping for text interpolated into HTML element content and attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::error::DatasetError;

    #[test]
    fn test_error_chain_includes_sources() {
        let err = DatasetError::ColumnOperation {
            resource: "r.csv".to_string(),
            source: polars::error::PolarsError::ComputeError("boom".into()),
        };
        let chain = error_chain(&err);
        assert!(chain.starts_with("Polars operation failed for resource r.csv"));
        assert_eq!(chain.matches("boom").count(), 1);
    }

    #[test]
    fn test_error_chain_wrapped_polars_errors_name_cause_once() {
        let err = DatasetError::DataFrameProcessing(polars::error::PolarsError::ComputeError(
            "schema mismatch".into(),
        ));
        assert_eq!(error_chain(&err).matches("schema mismatch").count(), 1);

        let err = crate::render::error::RenderError::ChartData(
            polars::error::PolarsError::ComputeError("bad cast".into()),
        );
        assert_eq!(error_chain(&err).matches("bad cast").count(), 1);

        let err = crate::error::AirQualityError::DataFrameProcessing(
            polars::error::PolarsError::ComputeError("empty".into()),
        );
        assert_eq!(error_chain(&err).matches("empty").count(), 1);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("Dongsi"), "Dongsi");
    }
}

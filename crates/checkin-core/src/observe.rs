//! Optional metrics instrumentation.
//!
//! When the `observe` feature is enabled, scans and maintenance operations
//! emit counters and histograms via the [`metrics`] crate. A downstream
//! application must install a metrics recorder to collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record a scan (counter by outcome + latency histogram).
///
/// - `checkin.scan.total` – counter with `outcome` label
/// - `checkin.scan.duration_seconds` – histogram
#[inline]
pub fn record_scan(duration: std::time::Duration, outcome: &'static str) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("checkin.scan.total", "outcome" => outcome).increment(1);
        metrics::histogram!("checkin.scan.duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, outcome);
    }
}

/// Record a scan that failed with a store fault.
///
/// - `checkin.scan.faults_total` – counter
#[inline]
pub fn record_scan_fault() {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("checkin.scan.faults_total").increment(1);
    }
}

/// Record a bulk id initialization.
///
/// - `checkin.registry.initialized_rows_total` – counter
#[inline]
pub fn record_initialize(rows: u64) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("checkin.registry.initialized_rows_total").increment(rows);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = rows;
    }
}

/// Record a log clear.
///
/// - `checkin.log.clears_total` – counter
#[inline]
pub fn record_clear() {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("checkin.log.clears_total").increment(1);
    }
}

/// Record a log export.
///
/// - `checkin.export.rows_total` – counter
/// - `checkin.export.duration_seconds` – histogram
#[inline]
pub fn record_export(duration: std::time::Duration, rows: u64) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("checkin.export.rows_total").increment(rows);
        metrics::histogram!("checkin.export.duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, rows);
    }
}

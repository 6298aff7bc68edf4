use super::error::ConverterError;

/// Output surface driven by the converter.
///
/// Implementations must be cheap to call; the converter invokes them inline
/// from the conversion flow.
pub trait Renderer: Send + Sync {
    /// Shows the converted amount, already formatted.
    fn set_result(&self, value: &str);
    /// Shows the rate summary line.
    fn set_rate_info(&self, summary: &str);
    fn set_busy(&self, busy: bool);
    /// Blocking notification for validation and provider failures.
    fn notify_error(&self, error: &ConverterError);
}

use crate::core::{Conversion, Converter};
use anyhow::{Context, Result};

/// Runs a single conversion for the converter's current form.
///
/// With `swap` the selected currencies are exchanged first. Failures have
/// already been shown to the user by the renderer; the error returned here
/// only drives the exit status.
pub async fn run(converter: &Converter, swap: bool) -> Result<Conversion> {
    let conversion = if swap {
        converter.swap().await
    } else {
        converter.convert().await
    };
    conversion.context("Conversion failed")
}

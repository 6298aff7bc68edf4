//! The conversion flow: form state, validation, quote fetch and rendering

use super::currency::CurrencyCode;
use super::error::ConverterError;
use super::quote::{Conversion, ConversionRequest, ExchangeQuote};
use super::rates::ExchangeRateProvider;
use super::render::Renderer;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, instrument};

const MISSING_FIELDS: &str = "Please fill in all fields";
const PROVIDER_FAILURE: &str = "Failed to fetch the exchange rate. Please try again later.";

/// What the user has entered so far. `None` means nothing is selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub amount: String,
    pub from: Option<CurrencyCode>,
    pub to: Option<CurrencyCode>,
}

impl FormState {
    pub fn new(amount: impl Into<String>, from: CurrencyCode, to: CurrencyCode) -> Self {
        Self {
            amount: amount.into(),
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn has_amount(&self) -> bool {
        !self.amount.trim().is_empty()
    }
}

/// Checks the form and builds a request from it.
pub fn validate(form: &FormState) -> Result<ConversionRequest, ConverterError> {
    let (Some(from), Some(to)) = (form.from, form.to) else {
        return Err(ConverterError::Validation(MISSING_FIELDS.to_string()));
    };
    if !form.has_amount() {
        return Err(ConverterError::Validation(MISSING_FIELDS.to_string()));
    }

    let input = form.amount.trim();
    let amount: f64 = input
        .parse()
        .map_err(|_| ConverterError::Validation(format!("Amount is not a number: {input}")))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ConverterError::Validation(
            "Amount must be a positive number".to_string(),
        ));
    }

    Ok(ConversionRequest { amount, from, to })
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks the converter busy for as long as it is alive.
///
/// Busy is counted over all requests in flight; the renderer only sees the
/// first enter and the last exit.
struct BusyGuard<'a> {
    converter: &'a Converter,
}

impl<'a> BusyGuard<'a> {
    fn enter(converter: &'a Converter) -> Self {
        let mut in_flight = lock(&converter.in_flight);
        *in_flight += 1;
        if *in_flight == 1 {
            converter.renderer.set_busy(true);
        }
        Self { converter }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = lock(&self.converter.in_flight);
        if *in_flight == 0 {
            return;
        }
        *in_flight -= 1;
        if *in_flight == 0 {
            self.converter.renderer.set_busy(false);
        }
    }
}

pub struct Converter {
    provider: Arc<dyn ExchangeRateProvider>,
    renderer: Arc<dyn Renderer>,
    form: Mutex<FormState>,
    in_flight: Mutex<usize>,
    // Ticket of the most recently started conversion.
    generation: Mutex<u64>,
}

impl Converter {
    pub fn new(
        provider: Arc<dyn ExchangeRateProvider>,
        renderer: Arc<dyn Renderer>,
        form: FormState,
    ) -> Self {
        Self {
            provider,
            renderer,
            form: Mutex::new(form),
            in_flight: Mutex::new(0),
            generation: Mutex::new(0),
        }
    }

    pub fn form(&self) -> FormState {
        lock(&self.form).clone()
    }

    pub fn is_busy(&self) -> bool {
        *lock(&self.in_flight) > 0
    }

    pub fn set_amount(&self, amount: impl Into<String>) {
        lock(&self.form).amount = amount.into();
    }

    /// Selects the source currency, converting again if an amount is present.
    pub async fn select_from(&self, currency: CurrencyCode) -> Option<Conversion> {
        let has_amount = {
            let mut form = lock(&self.form);
            form.from = Some(currency);
            form.has_amount()
        };
        if has_amount { self.convert().await } else { None }
    }

    /// Selects the target currency, converting again if an amount is present.
    pub async fn select_to(&self, currency: CurrencyCode) -> Option<Conversion> {
        let has_amount = {
            let mut form = lock(&self.form);
            form.to = Some(currency);
            form.has_amount()
        };
        if has_amount { self.convert().await } else { None }
    }

    /// Exchanges the selected currencies. With an amount present this always
    /// fetches a fresh quote for the swapped pair.
    pub async fn swap(&self) -> Option<Conversion> {
        let has_amount = {
            let mut form = lock(&self.form);
            let form = &mut *form;
            std::mem::swap(&mut form.from, &mut form.to);
            form.has_amount()
        };
        if has_amount { self.convert().await } else { None }
    }

    /// Runs one conversion attempt for the current form.
    ///
    /// Returns `None` when validation fails, the provider fails, or a newer
    /// conversion was started while this one was waiting for its quote. In
    /// all of those cases the previously rendered result is left untouched.
    /// A superseded attempt renders nothing at all, not even its failure.
    pub async fn convert(&self) -> Option<Conversion> {
        let form = self.form();
        let request = match validate(&form) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, amount = %form.amount, "Rejected conversion input");
                self.renderer.notify_error(&e);
                return None;
            }
        };

        let ticket = {
            let mut generation = lock(&self.generation);
            *generation += 1;
            *generation
        };

        let outcome = self.fetch_quote(request.from, request.to).await;

        let latest = lock(&self.generation);
        if *latest != ticket {
            debug!(
                ticket,
                latest = *latest,
                failed = outcome.is_err(),
                "Discarding stale quote"
            );
            return None;
        }

        match outcome {
            Ok(quote) => {
                let conversion = Conversion::new(request, quote);
                self.renderer.set_result(&conversion.result_text());
                self.renderer.set_rate_info(&conversion.summary());
                Some(conversion)
            }
            Err(e) => {
                self.renderer.notify_error(&e);
                None
            }
        }
    }

    /// Fetches a quote for the pair, notifying the renderer on failure.
    pub async fn request_quote(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Option<ExchangeQuote> {
        match self.fetch_quote(from, to).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                self.renderer.notify_error(&e);
                None
            }
        }
    }

    /// Calls the provider with the busy flag raised. Busy is cleared before
    /// this returns, whatever the outcome.
    #[instrument(name = "FetchQuote", skip_all, fields(from = %from, to = %to))]
    async fn fetch_quote(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ExchangeQuote, ConverterError> {
        let _busy = BusyGuard::enter(self);

        match self.provider.latest_quote(from, to).await {
            Ok(quote) => {
                debug!(rate = quote.rate, as_of = %quote.as_of, "Received quote");
                Ok(quote)
            }
            Err(e) => {
                error!(error = ?e, "Failed to fetch exchange rate");
                Err(ConverterError::Provider(PROVIDER_FAILURE.to_string()))
            }
        }
    }
}

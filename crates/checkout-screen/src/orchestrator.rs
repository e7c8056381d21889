//! # Checkout Orchestrator
//!
//! Mediates between the session endpoint and the chosen checkout flow.
//!
//! ```text
//! idle ──► loading ──► done                 (native sheet, confirmed)
//!   │         └──────► idle                 (native sheet, any error)
//!   └───────────────► hosted_page_active    (hosted page shown)
//! ```
//!
//! One attempt runs at a time. A second invocation while one is in flight
//! is rejected before any network or SDK call is made.

use crate::view::{CheckoutOption, ScreenView};
use checkout_core::{
    Alert, CheckoutError, CheckoutResult, CheckoutSession, CheckoutStrategy, PaymentSheetConfig,
    SharedAlertPresenter, SharedPaymentSheet, SharedRenderer, SharedSessionSource, SheetError,
    SheetParams, UiState,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, instrument, warn};

/// Orchestrator settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Fixed SDK settings
    #[serde(default)]
    pub sheet: PaymentSheetConfig,

    /// Alert the user when the hosted-page flow fails (off: log only)
    #[serde(default)]
    pub alert_on_hosted_page_failure: bool,
}

impl OrchestratorConfig {
    /// Load from environment variables.
    ///
    /// Sheet settings come from `PaymentSheetConfig::from_env`; set
    /// `CHECKOUT_ALERT_HOSTED_FAILURES=true` to alert on hosted-page failures.
    pub fn from_env() -> CheckoutResult<Self> {
        let alert_on_hosted_page_failure = std::env::var("CHECKOUT_ALERT_HOSTED_FAILURES")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            sheet: PaymentSheetConfig::from_env()?,
            alert_on_hosted_page_failure,
        })
    }

    pub fn with_sheet(mut self, sheet: PaymentSheetConfig) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn with_hosted_page_alerts(mut self, enabled: bool) -> Self {
        self.alert_on_hosted_page_failure = enabled;
        self
    }
}

/// How a checkout attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Hosted page handed to the renderer
    HostedPageShown { url: String },
    /// Native sheet completed and the success alert was shown
    PaymentConfirmed,
    /// Attempt ran and failed
    Failed(CheckoutError),
    /// Attempt never started (another one in flight, or a page is open)
    Rejected(CheckoutError),
}

impl CheckoutOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            CheckoutOutcome::HostedPageShown { .. } | CheckoutOutcome::PaymentConfirmed
        )
    }
}

/// Checkout orchestrator for the dual-checkout screen
pub struct CheckoutOrchestrator {
    sessions: SharedSessionSource,
    sheet: SharedPaymentSheet,
    renderer: SharedRenderer,
    alerts: SharedAlertPresenter,
    config: OrchestratorConfig,
    state: Mutex<UiState>,
    in_flight: AtomicBool,
    last_token: Mutex<Option<String>>,
}

/// Releases the in-flight flag when an attempt ends, including when the
/// attempt's future is dropped mid-way.
struct AttemptGuard<'a> {
    in_flight: &'a AtomicBool,
    state: &'a Mutex<UiState>,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        if *state == UiState::Loading {
            warn!("Checkout attempt abandoned while loading, back to idle");
            *state = UiState::Idle;
        }
        drop(state);
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CheckoutOrchestrator {
    /// Create an orchestrator with the default sheet settings
    pub fn new(
        sessions: SharedSessionSource,
        sheet: SharedPaymentSheet,
        renderer: SharedRenderer,
        alerts: SharedAlertPresenter,
    ) -> Self {
        Self {
            sessions,
            sheet,
            renderer,
            alerts,
            config: OrchestratorConfig::default(),
            state: Mutex::new(UiState::Idle),
            in_flight: AtomicBool::new(false),
            last_token: Mutex::new(None),
        }
    }

    /// Builder: replace the configuration
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Current screen state
    pub fn state(&self) -> UiState {
        *lock(&self.state)
    }

    /// True while an attempt is running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// What the screen should render right now
    pub fn view(&self) -> ScreenView {
        match self.state() {
            UiState::HostedPageActive => ScreenView::HostedPage,
            state => ScreenView::Menu {
                options: CheckoutOption::all().to_vec(),
                show_spinner: state == UiState::Loading,
            },
        }
    }

    /// Back to the strategy menu (screen remount).
    ///
    /// Token history is kept so a remounted screen still refuses a reused token.
    pub fn reset(&self) {
        self.set_state(UiState::Idle);
    }

    fn set_state(&self, next: UiState) {
        let mut state = lock(&self.state);
        debug!("UI state {} -> {}", *state, next);
        *state = next;
    }

    fn begin_attempt(&self) -> CheckoutResult<AttemptGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CheckoutError::AttemptInProgress);
        }

        let guard = AttemptGuard {
            in_flight: &self.in_flight,
            state: &self.state,
        };

        match self.state() {
            state if state.accepts_attempt() => Ok(guard),
            UiState::HostedPageActive => Err(CheckoutError::HostedPageOpen),
            _ => Err(CheckoutError::AttemptInProgress),
        }
    }

    /// Request a fresh checkout session for `strategy` outside a full flow.
    ///
    /// Counts as an attempt: it is rejected while another one is running or a
    /// hosted page is open, and the token it returns is remembered for the
    /// reuse check.
    pub async fn request_session(
        &self,
        strategy: CheckoutStrategy,
    ) -> CheckoutResult<CheckoutSession> {
        let _attempt = self.begin_attempt()?;
        self.fetch_session(strategy).await
    }

    /// Rejects a session whose token equals the previous attempt's.
    #[instrument(skip(self), fields(source = self.sessions.source_name()))]
    async fn fetch_session(&self, strategy: CheckoutStrategy) -> CheckoutResult<CheckoutSession> {
        let session = self.sessions.request_session(strategy).await?;

        let mut last = lock(&self.last_token);
        if last.as_deref() == Some(session.token()) {
            return Err(CheckoutError::SessionReused);
        }
        *last = Some(session.token().to_string());
        drop(last);

        debug!(received_at = %session.received_at, "Checkout session accepted");
        Ok(session)
    }

    /// Run whichever flow the user picked
    pub async fn run(&self, strategy: CheckoutStrategy) -> CheckoutOutcome {
        match strategy {
            CheckoutStrategy::HostedPage => self.run_hosted_page_strategy().await,
            CheckoutStrategy::NativeSheet => self.run_native_sheet_strategy().await,
        }
    }

    /// Hosted-page flow: fetch a session and hand its page to the renderer.
    ///
    /// Failures are logged and leave the state untouched; they only alert
    /// when `alert_on_hosted_page_failure` is set.
    #[instrument(skip(self))]
    pub async fn run_hosted_page_strategy(&self) -> CheckoutOutcome {
        let _attempt = match self.begin_attempt() {
            Ok(guard) => guard,
            Err(err) => {
                warn!("Hosted checkout rejected: {}", err);
                return CheckoutOutcome::Rejected(err);
            }
        };

        let result = match self.fetch_session(CheckoutStrategy::HostedPage).await {
            Ok(session) => session.into_hosted_page_url(),
            Err(err) => Err(err),
        };

        match result {
            Ok(url) => {
                self.set_state(UiState::HostedPageActive);
                self.renderer.show(&url);
                info!("Hosted checkout page shown");
                CheckoutOutcome::HostedPageShown { url }
            }
            Err(err) => {
                error!(retryable = err.is_retryable(), "Hosted checkout failed: {}", err);
                if self.config.alert_on_hosted_page_failure {
                    self.alerts.present(&Alert::from(&err));
                }
                CheckoutOutcome::Failed(err)
            }
        }
    }

    /// Native-sheet flow: fetch a client secret, init the sheet, present it.
    ///
    /// Always settles in `Done` (confirmed) or `Idle` (any failure), with an
    /// alert either way.
    #[instrument(skip(self))]
    pub async fn run_native_sheet_strategy(&self) -> CheckoutOutcome {
        let _attempt = match self.begin_attempt() {
            Ok(guard) => guard,
            Err(err) => {
                warn!("Native checkout rejected: {}", err);
                return CheckoutOutcome::Rejected(err);
            }
        };

        self.set_state(UiState::Loading);

        match self.checkout_with_sheet().await {
            Ok(()) => {
                self.set_state(UiState::Done);
                self.alerts.present(&Alert::payment_confirmed());
                info!("Payment confirmed through the payment sheet");
                CheckoutOutcome::PaymentConfirmed
            }
            Err(err) => {
                error!(retryable = err.is_retryable(), "Native checkout failed: {}", err);
                self.set_state(UiState::Idle);
                self.alerts.present(&Alert::from(&err));
                CheckoutOutcome::Failed(err)
            }
        }
    }

    async fn checkout_with_sheet(&self) -> CheckoutResult<()> {
        let client_secret = self
            .fetch_session(CheckoutStrategy::NativeSheet)
            .await?
            .into_client_secret()?;

        let params = SheetParams::new(client_secret, &self.config.sheet);

        self.sheet
            .init_payment_sheet(&params)
            .await
            .map_err(SheetError::into_init_error)?;

        debug!("Payment sheet initialized, presenting");

        self.sheet
            .present_payment_sheet()
            .await
            .map_err(SheetError::into_presentation_error)
    }
}

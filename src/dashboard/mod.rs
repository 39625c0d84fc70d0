//! Donor dashboard
//!
//! Runs aggregation cycles (identity gate -> fetch -> normalize ->
//! aggregate -> present) and owns the single current-view slot.
//!
//! # Staleness
//!
//! Every cycle takes a generation number when it begins. A result is
//! committed only if no newer cycle has begun since, so the view always
//! belongs to the most recently resolved identity, whatever order the
//! fetches complete in.

mod cycle;

pub use cycle::{CycleOutcome, CycleTicket};

use crate::aggregate::aggregate;
use crate::amount::{normalize_all, NormalizedBatch};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::identity::{cycle_trigger, resolve, CycleTrigger, GateDecision};
use crate::ledger::ReceiptFetcher;
use crate::presentation::{present, ViewModel};
use crate::traits::{LedgerService, WalletIdentityProvider};
use crate::types::{AggregateSummary, WalletIdentity};
use cycle::ViewSlot;
use tokio::sync::{watch, RwLock};

/// Donation dashboard for one wallet session
///
/// # Example
///
/// ```rust,ignore
/// use donor_dashboard::{Dashboard, DashboardConfig, LedgerHttpClient, WalletSession};
///
/// let config = DashboardConfig::load("dashboard.toml")?;
/// let ledger = LedgerHttpClient::new(config.ledger.clone())?;
/// let dashboard = Arc::new(Dashboard::new(ledger, config));
///
/// let session = WalletSession::new();
/// let driver = dashboard.clone();
/// let updates = session.subscribe();
/// tokio::spawn(async move { driver.drive(updates).await });
///
/// session.connect("0x7a1f...");
/// let view = dashboard.view().await;
/// ```
pub struct Dashboard<L> {
    fetcher: ReceiptFetcher<L>,
    config: DashboardConfig,
    slot: RwLock<ViewSlot>,
}

impl<L: LedgerService> Dashboard<L> {
    pub fn new(ledger: L, config: DashboardConfig) -> Self {
        Self {
            fetcher: ReceiptFetcher::new(ledger),
            config,
            slot: RwLock::new(ViewSlot::default()),
        }
    }

    /// Create a dashboard with default configuration
    pub fn with_defaults(ledger: L) -> Self {
        Self::new(ledger, DashboardConfig::default())
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        self.fetcher.ledger()
    }

    /// Current view
    pub async fn view(&self) -> ViewModel {
        self.slot.read().await.view.clone()
    }

    /// Identity of the most recently begun cycle
    pub async fn identity(&self) -> Option<WalletIdentity> {
        self.slot.read().await.identity.clone()
    }

    /// Start a cycle unconditionally, superseding any cycle in flight.
    ///
    /// The slot shows `Loading` (or `Unauthenticated`) until the cycle
    /// commits.
    pub async fn begin_cycle(&self, identity: WalletIdentity) -> CycleTicket {
        let mut slot = self.slot.write().await;
        Self::begin_locked(&mut slot, identity)
    }

    /// Start a cycle only if `identity` differs from the last one.
    pub async fn try_begin_cycle(&self, identity: WalletIdentity) -> Option<CycleTicket> {
        let mut slot = self.slot.write().await;
        match cycle_trigger(slot.identity.as_ref(), &identity) {
            CycleTrigger::Noop => None,
            CycleTrigger::StartNewCycle => Some(Self::begin_locked(&mut slot, identity)),
        }
    }

    fn begin_locked(slot: &mut ViewSlot, identity: WalletIdentity) -> CycleTicket {
        slot.generation += 1;
        slot.view = if identity.is_connected() {
            ViewModel::Loading
        } else {
            ViewModel::Unauthenticated
        };
        slot.identity = Some(identity.clone());

        tracing::debug!(
            cycle = slot.generation,
            connected = identity.is_connected(),
            "Starting dashboard cycle"
        );

        CycleTicket {
            generation: slot.generation,
            identity,
        }
    }

    /// Compute the view for an identity without touching the slot.
    ///
    /// Every failure ends up as a view state; nothing is returned as an
    /// error.
    pub async fn evaluate(&self, identity: &WalletIdentity) -> ViewModel {
        let presentation = &self.config.presentation;

        let address = match resolve(identity) {
            GateDecision::Skip => {
                return present(
                    identity,
                    &AggregateSummary::default(),
                    &NormalizedBatch::default(),
                    None,
                    presentation,
                );
            }
            GateDecision::Proceed(address) => address,
        };

        let batch = match self.fetcher.fetch(&address).await {
            Ok(records) => normalize_all(records, self.config.malformed_amounts),
            Err(e) => Err(DashboardError::from(e)),
        };

        match batch {
            Ok(batch) => {
                let summary = aggregate(&batch.records);
                present(identity, &summary, &batch, None, presentation)
            }
            Err(e) => {
                if matches!(e, DashboardError::MalformedAmount { .. }) {
                    tracing::error!(address = %address, error = %e, "Donation history rejected");
                }
                present(
                    identity,
                    &AggregateSummary::default(),
                    &NormalizedBatch::default(),
                    Some(&e),
                    presentation,
                )
            }
        }
    }

    /// Write a cycle's view if the cycle is still current.
    pub async fn commit(&self, ticket: &CycleTicket, view: ViewModel) -> CycleOutcome {
        let mut slot = self.slot.write().await;
        if slot.generation != ticket.generation {
            tracing::warn!(
                cycle = ticket.generation,
                current = slot.generation,
                "Discarding result of superseded cycle"
            );
            return CycleOutcome::Superseded;
        }

        tracing::info!(
            cycle = ticket.generation,
            state = view.state_name(),
            "Dashboard view committed"
        );
        slot.view = view.clone();
        CycleOutcome::Committed(view)
    }

    /// Evaluate and commit one cycle
    pub async fn run_cycle(&self, ticket: CycleTicket) -> CycleOutcome {
        let view = self.evaluate(&ticket.identity).await;
        self.commit(&ticket, view).await
    }

    /// React to an identity change. Returns `None` when the identity is
    /// the same as the last cycle's.
    pub async fn identity_changed(&self, identity: WalletIdentity) -> Option<CycleOutcome> {
        let ticket = self.try_begin_cycle(identity).await?;
        Some(self.run_cycle(ticket).await)
    }

    /// Re-run the cycle for the provider's current identity, even if it
    /// has not changed.
    pub async fn refresh<P: WalletIdentityProvider + ?Sized>(&self, provider: &P) -> CycleOutcome {
        let ticket = self.begin_cycle(provider.current()).await;
        self.run_cycle(ticket).await
    }

    /// Follow identity updates until the sender goes away.
    ///
    /// A change that arrives while a fetch is pending drops that fetch and
    /// starts the next cycle straight away.
    pub async fn drive(&self, mut updates: watch::Receiver<WalletIdentity>) {
        // Set when a cycle was dropped before committing; the slot then
        // names an identity whose view was never written.
        let mut interrupted = false;

        loop {
            let identity = updates.borrow_and_update().clone();

            let ticket = if std::mem::take(&mut interrupted) {
                Some(self.begin_cycle(identity).await)
            } else {
                self.try_begin_cycle(identity).await
            };

            if let Some(ticket) = ticket {
                let cycle = self.run_cycle(ticket);
                tokio::pin!(cycle);

                tokio::select! {
                    _ = &mut cycle => {}
                    changed = updates.changed() => {
                        if changed.is_err() {
                            cycle.await;
                            break;
                        }
                        tracing::debug!("Wallet identity changed during fetch");
                        interrupted = true;
                        continue;
                    }
                }
            }

            if updates.changed().await.is_err() {
                break;
            }
        }

        tracing::debug!("Identity updates closed, dashboard driver stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::ledger::MockLedger;
    use crate::types::CertificateRecord;

    #[tokio::test]
    async fn test_initial_view_is_loading() {
        let dashboard = Dashboard::with_defaults(MockLedger::new());
        assert_eq!(dashboard.view().await, ViewModel::Loading);
        assert_eq!(dashboard.identity().await, None);
    }

    #[tokio::test]
    async fn test_disconnected_never_queries() {
        let dashboard = Dashboard::with_defaults(MockLedger::new());

        let outcome = dashboard.identity_changed(WalletIdentity::Disconnected).await;
        assert_eq!(outcome, Some(CycleOutcome::Committed(ViewModel::Unauthenticated)));
        assert_eq!(dashboard.ledger().call_count(), 0);
    }

    #[tokio::test]
    async fn test_same_identity_is_noop() {
        let ledger = MockLedger::new().with_history("0xA", vec![CertificateRecord::new("c1", "p1", "1")]);
        let dashboard = Dashboard::with_defaults(ledger);

        assert!(dashboard.identity_changed(WalletIdentity::connected("0xA")).await.is_some());
        assert!(dashboard.identity_changed(WalletIdentity::connected("0xA")).await.is_none());
        assert_eq!(dashboard.ledger().call_count(), 1);
    }

    #[tokio::test]
    async fn test_refresh_reruns_same_identity() {
        let dashboard = Dashboard::with_defaults(MockLedger::new());
        let identity = WalletIdentity::connected("0xA");

        dashboard.identity_changed(identity.clone()).await;
        let outcome = dashboard.refresh(&identity).await;

        assert_eq!(outcome, CycleOutcome::Committed(ViewModel::Empty { skipped_records: 0 }));
        assert_eq!(dashboard.ledger().call_count(), 2);
    }

    #[tokio::test]
    async fn test_stale_commit_is_discarded() {
        let dashboard = Dashboard::with_defaults(MockLedger::new());

        let stale = dashboard.begin_cycle(WalletIdentity::connected("0xA")).await;
        let current = dashboard.begin_cycle(WalletIdentity::connected("0xB")).await;
        assert!(current.generation() > stale.generation());

        let outcome = dashboard
            .commit(&stale, ViewModel::Failed { message: "late".into() })
            .await;
        assert_eq!(outcome, CycleOutcome::Superseded);
        assert_eq!(dashboard.view().await, ViewModel::Loading);

        assert!(dashboard.run_cycle(current).await.is_committed());
        assert_eq!(dashboard.view().await, ViewModel::Empty { skipped_records: 0 });
    }

    #[tokio::test]
    async fn test_fetch_failure_is_failed_not_empty() {
        let ledger = MockLedger::new().with_failure("0xA", FetchError::Transport("timeout".into()));
        let dashboard = Dashboard::with_defaults(ledger);

        dashboard.identity_changed(WalletIdentity::connected("0xA")).await;
        assert!(matches!(dashboard.view().await, ViewModel::Failed { .. }));
    }
}

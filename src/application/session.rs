//! UserSession - the explicit owner of the signed-in account.
//!
//! Each mutating call applies one engine operation, swaps in the new stats,
//! records a `ProgressionEvent` and then saves. A failed save never rolls back
//! the in-memory stats; it is reported through [`SaveStatus`] and can be
//! retried with [`UserSession::retry_save`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use super::errors::SessionError;
use crate::domain::account::UserAccount;
use crate::domain::alerts::{default_alerts, AlertAction, FinancialAlert};
use crate::domain::foundation::{AlertId, Timestamp};
use crate::domain::progression::{ProgressionEngine, UserStats};
use crate::domain::wizard::{ChallengeAsset, ChallengeWizard, TrainingOutcome, TrainingWizard};
use crate::ports::{AdviceService, PersistenceGateway};

/// What kind of event changed the stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressionEventKind {
    TrainingCompleted,
    ChallengeCompleted,
    AlertAction { alert_id: AlertId, action: String },
}

/// Entry of the in-memory progression log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionEvent {
    pub kind: ProgressionEventKind,
    pub total_before: u32,
    pub total_after: u32,
    pub occurred_at: Timestamp,
}

/// Outcome of the save that follows a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// Nothing was written: guest session or nothing changed.
    Skipped,
    /// The write failed. The in-memory state is still current.
    NotSaved { reason: String },
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

/// Session of one user, guest or registered.
pub struct UserSession {
    account: UserAccount,
    gateway: Arc<dyn PersistenceGateway>,
    engine: ProgressionEngine,
    events: Vec<ProgressionEvent>,
    suppressed_alerts: BTreeSet<AlertId>,
    last_save: Option<SaveStatus>,
}

impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSession")
            .field("account", &self.account)
            .field("engine", &self.engine)
            .field("events", &self.events)
            .field("suppressed_alerts", &self.suppressed_alerts)
            .field("last_save", &self.last_save)
            .finish_non_exhaustive()
    }
}

impl UserSession {
    pub fn new(
        account: UserAccount,
        gateway: Arc<dyn PersistenceGateway>,
        engine: ProgressionEngine,
    ) -> Self {
        Self {
            account,
            gateway,
            engine,
            events: Vec::new(),
            suppressed_alerts: BTreeSet::new(),
            last_save: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn account(&self) -> &UserAccount {
        &self.account
    }

    pub fn stats(&self) -> &UserStats {
        self.account.stats()
    }

    pub fn is_guest(&self) -> bool {
        self.account.is_guest()
    }

    pub fn events(&self) -> &[ProgressionEvent] {
        &self.events
    }

    pub fn is_alert_suppressed(&self, alert_id: &AlertId) -> bool {
        self.suppressed_alerts.contains(alert_id)
    }

    /// Status of the most recent save attempt, if any.
    pub fn last_save(&self) -> Option<&SaveStatus> {
        self.last_save.as_ref()
    }

    /// True when the last save attempt failed.
    pub fn has_unsaved_changes(&self) -> bool {
        matches!(self.last_save, Some(SaveStatus::NotSaved { .. }))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Progression
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a finished training run and records it in the history.
    ///
    /// # Errors
    ///
    /// - `TrainingAlreadyRecorded` if this run was applied before
    pub async fn complete_training(&mut self, outcome: TrainingOutcome) -> Result<SaveStatus, SessionError> {
        if self.stats().training_history().contains(&outcome.session_id) {
            return Err(SessionError::TrainingAlreadyRecorded(outcome.session_id));
        }

        let next = self
            .engine
            .apply_training_completion(self.stats(), &outcome.delta)
            .with_training_recorded(outcome.session_id);
        self.record(ProgressionEventKind::TrainingCompleted, next);

        Ok(self.persist().await)
    }

    /// Applies the fixed challenge reward.
    pub async fn complete_challenge(&mut self) -> SaveStatus {
        let next = self.engine.apply_challenge_completion(self.stats());
        self.record(ProgressionEventKind::ChallengeCompleted, next);
        self.persist().await
    }

    /// Applies an alert button press.
    ///
    /// `add`, `ignore` and `skip` hide the alert for the rest of the session;
    /// further actions on a hidden alert are skipped. Actions that leave the
    /// stats unchanged are not saved.
    ///
    /// # Errors
    ///
    /// - `Progression` if the token is unknown and the engine rejects it
    pub async fn apply_alert_action(
        &mut self,
        alert_id: &AlertId,
        token: &str,
    ) -> Result<SaveStatus, SessionError> {
        if self.suppressed_alerts.contains(alert_id) {
            tracing::debug!(alert = %alert_id, token, "alert already handled");
            return Ok(SaveStatus::Skipped);
        }

        let action = AlertAction::parse(token);
        let next = self.engine.apply_parsed_alert_action(self.stats(), &action)?;

        if action.suppresses_alert() {
            self.suppressed_alerts.insert(alert_id.clone());
        }

        if &next == self.stats() {
            tracing::debug!(alert = %alert_id, action = %action, "alert action left stats unchanged");
            return Ok(SaveStatus::Skipped);
        }

        self.record(
            ProgressionEventKind::AlertAction {
                alert_id: alert_id.clone(),
                action: action.token().to_string(),
            },
            next,
        );
        Ok(self.persist().await)
    }

    /// Built-in alerts minus the ones the user dismissed.
    pub async fn visible_alerts(&self, advice: &dyn AdviceService) -> Result<Vec<FinancialAlert>, SessionError> {
        let opportunity = advice.fetch_opportunity_advice(self.stats()).await;
        let alerts = default_alerts(Some(&opportunity))?;

        Ok(alerts
            .into_iter()
            .filter(|alert| !self.suppressed_alerts.contains(&alert.id))
            .collect())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Wizards
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves the training wizard forward, fetching the discovery message when
    /// the wizard enters the discovery step.
    pub async fn advance_training(
        &self,
        wizard: &mut TrainingWizard,
        advice: &dyn AdviceService,
    ) -> Result<(), SessionError> {
        if let Some(ticket) = wizard.advance()? {
            let message = advice.fetch_discovery_message(&wizard.preview_stats()).await;
            wizard.resolve_discovery(ticket, message);
        }
        Ok(())
    }

    /// Picks a challenge asset and fetches the feedback for it.
    pub async fn choose_challenge_asset(
        &self,
        wizard: &mut ChallengeWizard,
        asset: ChallengeAsset,
        advice: &dyn AdviceService,
    ) -> Result<(), SessionError> {
        let ticket = wizard.choose(asset)?;
        let feedback = advice.fetch_challenge_feedback(asset.name(), wizard.bonus()).await;
        wizard.resolve_feedback(ticket, feedback);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Account
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn update_profile(
        &mut self,
        name: &str,
        profile_image: Option<String>,
    ) -> Result<SaveStatus, SessionError> {
        self.account.update_profile(name, profile_image)?;
        Ok(self.persist().await)
    }

    /// Removes the persisted record and ends the session.
    ///
    /// Guest sessions have no record; they are just dropped.
    pub async fn delete_account(self) -> Result<(), SessionError> {
        if self.is_guest() {
            return Ok(());
        }

        self.gateway.delete(self.account.email()).await?;
        tracing::info!(email = %self.account.email(), "account deleted");
        Ok(())
    }

    /// Saves the current account again.
    pub async fn retry_save(&mut self) -> SaveStatus {
        self.persist().await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn record(&mut self, kind: ProgressionEventKind, next: UserStats) {
        let prev = self.account.replace_stats(next);
        let event = ProgressionEvent {
            kind,
            total_before: prev.confidence_score().total(),
            total_after: self.stats().confidence_score().total(),
            occurred_at: Timestamp::now(),
        };

        tracing::info!(
            email = %self.account.email(),
            kind = ?event.kind,
            total_before = event.total_before,
            total_after = event.total_after,
            "progression applied"
        );
        self.events.push(event);
    }

    async fn persist(&mut self) -> SaveStatus {
        let status = if self.is_guest() {
            SaveStatus::Skipped
        } else {
            match self.gateway.save(&self.account).await {
                Ok(()) => SaveStatus::Saved,
                Err(err) => {
                    tracing::warn!(email = %self.account.email(), error = %err, "failed to save account");
                    SaveStatus::NotSaved {
                        reason: err.to_string(),
                    }
                }
            }
        };

        self.last_save = Some(status.clone());
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::advice::StaticAdviceService;
    use crate::adapters::storage::InMemoryPersistence;
    use crate::domain::foundation::{Amount, Email, ErrorCode};
    use crate::domain::progression::{FinancialsDelta, InvestmentBucket, UnknownAlertActionPolicy};
    use crate::domain::wizard::{ChallengeStep, TrainingStep};
    use crate::ports::PersistenceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlakyPersistence {
        inner: InMemoryPersistence,
        failing: AtomicBool,
    }

    impl FlakyPersistence {
        fn failing() -> Self {
            Self {
                inner: InMemoryPersistence::new(),
                failing: AtomicBool::new(true),
            }
        }

        fn recover(&self) {
            self.failing.store(false, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl PersistenceGateway for FlakyPersistence {
        async fn load(&self, email: &Email) -> Result<Option<UserAccount>, PersistenceError> {
            self.inner.load(email).await
        }

        async fn save(&self, account: &UserAccount) -> Result<(), PersistenceError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PersistenceError::QuotaExceeded { needed: 6_000_000, limit: 5_000_000 });
            }
            self.inner.save(account).await
        }

        async fn delete(&self, email: &Email) -> Result<(), PersistenceError> {
            self.inner.delete(email).await
        }
    }

    fn registered() -> UserAccount {
        UserAccount::register("Ana", "ana@example.com", "segredo").unwrap()
    }

    fn session_with(gateway: Arc<dyn PersistenceGateway>, account: UserAccount) -> UserSession {
        UserSession::new(account, gateway, ProgressionEngine::default())
    }

    fn alert(id: &str) -> AlertId {
        AlertId::new(id).unwrap()
    }

    fn outcome_with_stocks(stocks: f64) -> TrainingOutcome {
        TrainingOutcome {
            session_id: Default::default(),
            delta: FinancialsDelta::empty()
                .with_investment(InvestmentBucket::Stocks, Amount::try_new(stocks).unwrap()),
        }
    }

    #[tokio::test]
    async fn complete_training_applies_engine_and_saves() {
        let store = InMemoryPersistence::new();
        let mut session = session_with(Arc::new(store.clone()), registered());
        let outcome = outcome_with_stocks(100.0);
        let session_id = outcome.session_id;

        let status = session.complete_training(outcome).await.unwrap();

        assert_eq!(status, SaveStatus::Saved);
        assert_eq!(session.stats().confidence_score().total(), 25);
        assert_eq!(session.stats().training_history(), &[session_id]);

        let saved = store.require(session.account().email()).await.unwrap();
        assert_eq!(saved.stats(), session.stats());
    }

    #[tokio::test]
    async fn complete_training_rejects_replayed_outcome() {
        let mut session = session_with(Arc::new(InMemoryPersistence::new()), registered());
        let outcome = outcome_with_stocks(100.0);

        session.complete_training(outcome.clone()).await.unwrap();
        let err = session.complete_training(outcome).await.unwrap_err();

        assert!(matches!(err, SessionError::TrainingAlreadyRecorded(_)));
        assert_eq!(session.stats().streak(), 1);
    }

    #[tokio::test]
    async fn events_record_totals_before_and_after() {
        let mut session = session_with(Arc::new(InMemoryPersistence::new()), registered());

        session.complete_challenge().await;
        session.complete_challenge().await;

        let events = session.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, ProgressionEventKind::ChallengeCompleted);
        assert_eq!((events[0].total_before, events[0].total_after), (0, 8));
        assert_eq!((events[1].total_before, events[1].total_after), (8, 16));
    }

    #[tokio::test]
    async fn guest_session_is_never_persisted() {
        let store = InMemoryPersistence::new();
        let mut session = session_with(Arc::new(store.clone()), UserAccount::guest());

        let status = session.complete_challenge().await;

        assert_eq!(status, SaveStatus::Skipped);
        assert!(store.is_empty().await);
        assert_eq!(session.stats().confidence_score().education(), 5);
    }

    #[tokio::test]
    async fn failed_save_keeps_stats_and_can_be_retried() {
        let gateway = Arc::new(FlakyPersistence::failing());
        let mut session = session_with(gateway.clone(), registered());

        let status = session.complete_challenge().await;

        assert!(matches!(status, SaveStatus::NotSaved { .. }));
        assert!(session.has_unsaved_changes());
        assert_eq!(session.stats().confidence_score().progress(), 3);

        gateway.recover();
        assert_eq!(session.retry_save().await, SaveStatus::Saved);
        assert!(!session.has_unsaved_changes());

        let saved = gateway.require(session.account().email()).await.unwrap();
        assert_eq!(saved.stats().confidence_score().progress(), 3);
    }

    #[tokio::test]
    async fn add_action_tops_up_and_hides_alert() {
        let mut session = session_with(Arc::new(InMemoryPersistence::new()), registered());
        let id = alert("security-1");

        let status = session.apply_alert_action(&id, "add").await.unwrap();

        assert_eq!(status, SaveStatus::Saved);
        assert_eq!(session.stats().investments().tesouro, Amount::from_whole(500));
        assert!(session.is_alert_suppressed(&id));
        assert_eq!(
            session.events()[0].kind,
            ProgressionEventKind::AlertAction { alert_id: id, action: "add".into() }
        );
    }

    #[tokio::test]
    async fn second_add_on_handled_alert_is_skipped() {
        let store = InMemoryPersistence::new();
        let mut session = session_with(Arc::new(store.clone()), registered());
        let id = alert("security-1");

        session.apply_alert_action(&id, "add").await.unwrap();
        let second = session.apply_alert_action(&id, "add").await.unwrap();

        assert_eq!(second, SaveStatus::Skipped);
        assert_eq!(session.stats().investments().tesouro, Amount::from_whole(500));
        assert_eq!(session.events().len(), 1);

        let saved = store.require(session.account().email()).await.unwrap();
        assert_eq!(saved.stats().investments().tesouro, Amount::from_whole(500));
    }

    #[tokio::test]
    async fn ignore_hides_alert_without_saving() {
        let store = InMemoryPersistence::new();
        let mut session = session_with(Arc::new(store.clone()), registered());
        let id = alert("security-1");

        let status = session.apply_alert_action(&id, "ignore").await.unwrap();

        assert_eq!(status, SaveStatus::Skipped);
        assert!(session.is_alert_suppressed(&id));
        assert!(session.events().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn simulate_keeps_alert_visible() {
        let mut session = session_with(Arc::new(InMemoryPersistence::new()), registered());
        let id = alert("opportunity-1");

        session.apply_alert_action(&id, "simulate").await.unwrap();

        assert!(!session.is_alert_suppressed(&id));
    }

    #[tokio::test]
    async fn unknown_action_fails_under_reject_policy() {
        let mut session = UserSession::new(
            registered(),
            Arc::new(InMemoryPersistence::new()),
            ProgressionEngine::new(UnknownAlertActionPolicy::Reject),
        );

        let err = session
            .apply_alert_action(&alert("security-1"), "teleport")
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::UnrecognizedAlertAction);
    }

    #[tokio::test]
    async fn visible_alerts_drop_suppressed_ones() {
        let mut session = session_with(Arc::new(InMemoryPersistence::new()), registered());
        let advice = StaticAdviceService::new();

        assert_eq!(session.visible_alerts(&advice).await.unwrap().len(), 2);

        session.apply_alert_action(&alert("security-1"), "skip").await.unwrap();
        let alerts = session.visible_alerts(&advice).await.unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id.as_str(), "opportunity-1");
        assert!(alerts[0].is_ai_advice());
    }

    #[tokio::test]
    async fn update_profile_persists_new_name() {
        let store = InMemoryPersistence::new();
        let mut session = session_with(Arc::new(store.clone()), registered());

        session
            .update_profile("Ana Souza", Some("data:image/png;base64,AAAA".into()))
            .await
            .unwrap();

        let saved = store.require(session.account().email()).await.unwrap();
        assert_eq!(saved.name(), "Ana Souza");
        assert!(saved.profile_image().is_some());
    }

    #[tokio::test]
    async fn update_profile_rejects_blank_name() {
        let mut session = session_with(Arc::new(InMemoryPersistence::new()), registered());
        let err = session.update_profile("  ", None).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyField);
    }

    #[tokio::test]
    async fn delete_account_removes_record() {
        let store = InMemoryPersistence::new();
        let mut session = session_with(Arc::new(store.clone()), registered());
        session.retry_save().await;
        let email = session.account().email().clone();

        session.delete_account().await.unwrap();

        assert!(store.load(&email).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn advance_training_resolves_discovery() {
        let session = session_with(Arc::new(InMemoryPersistence::new()), registered());
        let advice = StaticAdviceService::new();
        let mut wizard = TrainingWizard::new();

        while wizard.step() != TrainingStep::AiDiscovery {
            session.advance_training(&mut wizard, &advice).await.unwrap();
        }

        assert!(!wizard.is_discovery_pending());
        assert!(wizard.discovery_message().is_some());
        assert!(wizard.can_advance());
    }

    #[tokio::test]
    async fn choose_challenge_asset_settles_feedback() {
        let session = session_with(Arc::new(InMemoryPersistence::new()), registered());
        let advice = StaticAdviceService::new();
        let mut wizard = ChallengeWizard::new();
        wizard.proceed_to_choice().unwrap();

        session
            .choose_challenge_asset(&mut wizard, ChallengeAsset::Fii, &advice)
            .await
            .unwrap();

        assert_eq!(wizard.step(), ChallengeStep::Result);
        assert!(wizard.feedback().is_some());
        wizard.advance_to_reward().unwrap();
    }
}

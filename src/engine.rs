//! Wires the analytics core to the stores and the notifier.
//!
//! [Tracker] owns the write-path fan-out (every recorded expense updates the
//! streak and runs the budget-alert check in the same logical step) and the
//! read-path queries returned upward to the caller.

use time::Date;

use crate::{
    Error,
    analytics::{
        BudgetStatus, CategoryForecast, CategoryTotal, MonthProjection, SpendingSummary,
        TrendReport, advance_streak, category_totals, compute_trend, over_budget,
        project_categories, project_month, round2, spending_summary,
    },
    calendar::{month_to_date, trailing_week},
    models::{Budget, Streak, Transaction, TransactionBuilder, User, UserID},
    notify::{BudgetAlert, Notifier},
    stores::{BudgetStore, SortOrder, StreakStore, TransactionQuery, TransactionStore, UserStore},
};

/// The analytics engine over a user's expense ledger.
///
/// Generic over the store traits and the notifier so tests can substitute
/// fakes for any collaborator.
#[derive(Debug, Clone)]
pub struct Tracker<T, B, S, U, N>
where
    T: TransactionStore,
    B: BudgetStore,
    S: StreakStore,
    U: UserStore,
    N: Notifier,
{
    /// The append-only transaction ledger.
    pub transaction_store: T,
    /// The per-user budget and alert-flag rows.
    pub budget_store: B,
    /// The per-user streak rows.
    pub streak_store: S,
    /// User profiles, read for notification addressing.
    pub user_store: U,
    /// Where over-budget alerts are delivered.
    pub notifier: N,
}

/// What happened when an expense was recorded.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RecordedExpense {
    /// The stored transaction.
    pub transaction: Transaction,
    /// The streak after this expense counted towards it.
    pub current_streak: u32,
    /// The alert that was dispatched, if this expense pushed the user over
    /// budget for the first time this episode.
    pub alert: Option<BudgetAlert>,
}

impl<T, B, S, U, N> Tracker<T, B, S, U, N>
where
    T: TransactionStore,
    B: BudgetStore,
    S: StreakStore,
    U: UserStore,
    N: Notifier,
{
    /// Create a new [Tracker] over the given collaborators.
    pub fn new(
        transaction_store: T,
        budget_store: B,
        streak_store: S,
        user_store: U,
        notifier: N,
    ) -> Self {
        Self {
            transaction_store,
            budget_store,
            streak_store,
            user_store,
            notifier,
        }
    }

    /// Register a new user profile.
    ///
    /// # Errors
    /// Returns [Error::DuplicateEmail] if the email is already registered.
    pub fn register_user(&mut self, name: &str, email: &str) -> Result<User, Error> {
        self.user_store.create(name, email)
    }

    /// Create or replace `user_id`'s monthly budget, clearing any previous
    /// alert episode.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveBudget] if `monthly_budget` is zero or
    /// negative.
    pub fn set_budget(&mut self, user_id: UserID, monthly_budget: f64) -> Result<Budget, Error> {
        self.budget_store.set_budget(user_id, monthly_budget)
    }

    /// Record an expense and fan out to the streak tracker and the budget
    /// alert check.
    ///
    /// A failed alert dispatch is logged and swallowed: the expense itself
    /// always succeeds, and the alert is retried on the next qualifying
    /// transaction because the alert flag is only committed after a
    /// successful send.
    pub fn record_expense(
        &mut self,
        builder: TransactionBuilder,
    ) -> Result<RecordedExpense, Error> {
        let user_id = builder.user_id;
        let date = builder.date;

        let transaction = self.transaction_store.create(builder)?;
        let streak = self.record_activity(user_id, date)?;

        let alert = match self.on_new_transaction(user_id, date) {
            Ok(alert) => alert,
            Err(Error::NotificationFailed(reason)) => {
                tracing::warn!(%user_id, "budget alert could not be delivered, will retry: {reason}");
                None
            }
            Err(error) => return Err(error),
        };

        Ok(RecordedExpense {
            transaction,
            current_streak: streak.current_streak,
            alert,
        })
    }

    /// Advance `user_id`'s logging streak for activity on `today`.
    ///
    /// Called exactly once per logged transaction with the transaction's
    /// calendar date.
    pub fn record_activity(&mut self, user_id: UserID, today: Date) -> Result<Streak, Error> {
        let prior = self.streak_store.get(user_id)?;
        let streak = advance_streak(prior.as_ref(), user_id, today);
        self.streak_store.upsert(&streak)?;

        Ok(streak)
    }

    /// Run the over-budget alert check after a transaction has been appended
    /// to the ledger.
    ///
    /// At most one notification fires per (user, budget-value) episode: the
    /// alert flag is committed only after the notifier reports success, so a
    /// failed dispatch leaves the alert retryable. Returns the dispatched
    /// alert, if any.
    ///
    /// # Errors
    /// Returns [Error::NotificationFailed] if the notifier could not deliver
    /// the alert, or [Error::UnknownRecipient] if the user has no profile to
    /// address the alert to.
    pub fn on_new_transaction(
        &mut self,
        user_id: UserID,
        as_of_date: Date,
    ) -> Result<Option<BudgetAlert>, Error> {
        // Alerting is opt-in: no budget, no check.
        let Some(budget) = self.budget_store.get(user_id)? else {
            return Ok(None);
        };

        if budget.alert_sent {
            return Ok(None);
        }

        let spent = self
            .transaction_store
            .sum(user_id, Some(month_to_date(as_of_date)))?;

        if !over_budget(&budget, spent) {
            return Ok(None);
        }

        let user = match self.user_store.get(user_id) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::UnknownRecipient(user_id)),
            Err(error) => return Err(error),
        };

        let alert = BudgetAlert {
            recipient: user.email,
            user_name: user.name,
            spent: round2(spent),
            budget: budget.monthly_budget,
        };

        // No store lock is held while the notifier is in flight.
        self.notifier.send_budget_alert(&alert)?;

        let committed = self
            .budget_store
            .mark_alert_sent(user_id, budget.monthly_budget)?;
        if !committed {
            // The budget changed while the alert was in flight; the new
            // episode starts with a clear flag.
            tracing::debug!(%user_id, "alert flag not committed, budget changed during dispatch");
        }

        Ok(Some(alert))
    }

    /// The user's current logging streak, 0 if they have never logged an
    /// expense.
    pub fn current_streak(&self, user_id: UserID) -> Result<u32, Error> {
        Ok(self
            .streak_store
            .get(user_id)?
            .map(|streak| streak.current_streak)
            .unwrap_or(0))
    }

    /// The user's spend measured against their budget.
    ///
    /// Reports [BudgetStatus::NotSet] when the user has no budget.
    pub fn budget_status(&self, user_id: UserID) -> Result<BudgetStatus, Error> {
        let budget = self.budget_store.get(user_id)?;
        let spent = self.transaction_store.sum(user_id, None)?;

        Ok(BudgetStatus::new(budget.as_ref(), spent))
    }

    /// Headline totals: trailing-week spend, month-to-date spend, and the
    /// current streak.
    pub fn summary(&self, user_id: UserID, today: Date) -> Result<SpendingSummary, Error> {
        let weekly_total = self
            .transaction_store
            .sum(user_id, Some(trailing_week(today)))?;
        let monthly_total = self
            .transaction_store
            .sum(user_id, Some(month_to_date(today)))?;
        let current_streak = self
            .streak_store
            .get(user_id)?
            .map(|streak| streak.current_streak);

        Ok(spending_summary(weekly_total, monthly_total, current_streak))
    }

    /// All-time spend per category, in category-name order.
    pub fn category_summary(&self, user_id: UserID) -> Result<Vec<CategoryTotal>, Error> {
        let transactions = self
            .transaction_store
            .get_query(TransactionQuery::for_user(user_id))?;

        Ok(category_totals(&transactions))
    }

    /// The user's full expense history, newest first.
    pub fn expense_history(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.transaction_store
            .get_query(TransactionQuery::for_user(user_id).sorted(SortOrder::Descending))
    }

    /// Fit a linear trend over the user's complete transaction history.
    pub fn spending_trend(&self, user_id: UserID) -> Result<TrendReport, Error> {
        let transactions = self
            .transaction_store
            .get_query(TransactionQuery::for_user(user_id).sorted(SortOrder::Ascending))?;

        Ok(compute_trend(&transactions))
    }

    /// Extrapolate this month's total spend from the daily average so far.
    pub fn month_projection(
        &self,
        user_id: UserID,
        today: Date,
    ) -> Result<MonthProjection, Error> {
        let spent = self
            .transaction_store
            .sum(user_id, Some(month_to_date(today)))?;

        Ok(project_month(spent, today))
    }

    /// Project month-end totals per category from this month's transactions.
    pub fn category_projections(
        &self,
        user_id: UserID,
        today: Date,
    ) -> Result<CategoryForecast, Error> {
        let transactions = self
            .transaction_store
            .get_query(TransactionQuery::for_user(user_id).in_range(month_to_date(today)))?;

        Ok(project_categories(&transactions, today))
    }
}

#[cfg(test)]
mod tracker_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        analytics::{BudgetStatus, TrendDirection, TrendReport},
        db::initialize,
        models::{Transaction, UserID},
        notify::{BudgetAlert, Notifier},
        stores::{
            BudgetStore, TransactionStore,
            sqlite::{
                SQLiteBudgetStore, SQLiteStreakStore, SQLiteTransactionStore, SQLiteUserStore,
            },
        },
    };

    use super::Tracker;

    /// Records dispatched alerts, optionally failing the next few sends.
    #[derive(Debug, Default)]
    struct RecordingNotifier {
        sent: Vec<BudgetAlert>,
        failures_remaining: usize,
    }

    impl Notifier for RecordingNotifier {
        fn send_budget_alert(&mut self, alert: &BudgetAlert) -> Result<(), Error> {
            if self.failures_remaining > 0 {
                self.failures_remaining -= 1;
                return Err(Error::NotificationFailed("SMTP timeout".to_owned()));
            }

            self.sent.push(alert.clone());
            Ok(())
        }
    }

    type TestTracker = Tracker<
        SQLiteTransactionStore,
        SQLiteBudgetStore,
        SQLiteStreakStore,
        SQLiteUserStore,
        RecordingNotifier,
    >;

    fn get_test_tracker() -> (TestTracker, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let mut tracker = Tracker::new(
            SQLiteTransactionStore::new(connection.clone()),
            SQLiteBudgetStore::new(connection.clone()),
            SQLiteStreakStore::new(connection.clone()),
            SQLiteUserStore::new(connection),
            RecordingNotifier::default(),
        );

        let user = tracker.register_user("Ada", "ada@example.com").unwrap();

        (tracker, user.id)
    }

    #[test]
    fn recording_expenses_on_consecutive_days_grows_streak() {
        let (mut tracker, user_id) = get_test_tracker();

        for (day, want_streak) in [(1u8, 1u32), (2, 2), (3, 3)] {
            let recorded = tracker
                .record_expense(Transaction::build(
                    user_id,
                    10.0,
                    date!(2025 - 06 - 01).replace_day(day).unwrap(),
                ))
                .unwrap();

            assert_eq!(recorded.current_streak, want_streak);
        }

        assert_eq!(tracker.current_streak(user_id).unwrap(), 3);
    }

    #[test]
    fn streak_is_zero_for_user_with_no_expenses() {
        let (tracker, user_id) = get_test_tracker();

        assert_eq!(tracker.current_streak(user_id).unwrap(), 0);
    }

    #[test]
    fn at_most_one_alert_per_budget_episode() {
        let (mut tracker, user_id) = get_test_tracker();
        tracker.set_budget(user_id, 1000.0).unwrap();

        let first = tracker
            .record_expense(Transaction::build(user_id, 1500.0, date!(2025 - 06 - 02)))
            .unwrap();
        let second = tracker
            .record_expense(Transaction::build(user_id, 1000.0, date!(2025 - 06 - 03)))
            .unwrap();

        assert_eq!(
            first.alert,
            Some(BudgetAlert {
                recipient: "ada@example.com".to_owned(),
                user_name: "Ada".to_owned(),
                spent: 1500.0,
                budget: 1000.0,
            })
        );
        assert_eq!(second.alert, None);
        assert_eq!(tracker.notifier.sent.len(), 1);
    }

    #[test]
    fn resetting_the_budget_starts_a_new_alert_episode() {
        let (mut tracker, user_id) = get_test_tracker();
        tracker.set_budget(user_id, 1000.0).unwrap();
        tracker
            .record_expense(Transaction::build(user_id, 1500.0, date!(2025 - 06 - 02)))
            .unwrap();
        assert_eq!(tracker.notifier.sent.len(), 1);

        tracker.set_budget(user_id, 2000.0).unwrap();
        let recorded = tracker
            .record_expense(Transaction::build(user_id, 1000.0, date!(2025 - 06 - 03)))
            .unwrap();

        assert!(recorded.alert.is_some());
        assert_eq!(tracker.notifier.sent.len(), 2);
        assert_eq!(tracker.notifier.sent[1].spent, 2500.0);
        assert_eq!(tracker.notifier.sent[1].budget, 2000.0);
    }

    #[test]
    fn alert_is_not_cleared_by_dipping_back_under_budget() {
        let (mut tracker, user_id) = get_test_tracker();
        tracker.set_budget(user_id, 1000.0).unwrap();
        tracker
            .record_expense(Transaction::build(user_id, 1500.0, date!(2025 - 06 - 02)))
            .unwrap();

        // A new month starts well under budget, then exceeds it again. The
        // flag belongs to the budget-value episode, not the month, so no
        // second alert fires.
        tracker
            .record_expense(Transaction::build(user_id, 100.0, date!(2025 - 07 - 01)))
            .unwrap();
        tracker
            .record_expense(Transaction::build(user_id, 1500.0, date!(2025 - 07 - 02)))
            .unwrap();

        assert_eq!(tracker.notifier.sent.len(), 1);
    }

    #[test]
    fn no_budget_means_no_alert_check() {
        let (mut tracker, user_id) = get_test_tracker();

        let recorded = tracker
            .record_expense(Transaction::build(user_id, 10_000.0, date!(2025 - 06 - 02)))
            .unwrap();

        assert_eq!(recorded.alert, None);
        assert!(tracker.notifier.sent.is_empty());
    }

    #[test]
    fn month_to_date_spend_includes_the_triggering_transaction() {
        let (mut tracker, user_id) = get_test_tracker();
        tracker.set_budget(user_id, 100.0).unwrap();

        let recorded = tracker
            .record_expense(Transaction::build(user_id, 150.0, date!(2025 - 06 - 02)))
            .unwrap();

        assert_eq!(recorded.alert.unwrap().spent, 150.0);
    }

    #[test]
    fn previous_month_spend_does_not_count_towards_the_alert() {
        let (mut tracker, user_id) = get_test_tracker();
        tracker.set_budget(user_id, 1000.0).unwrap();

        tracker
            .record_expense(Transaction::build(user_id, 900.0, date!(2025 - 05 - 30)))
            .unwrap();
        let recorded = tracker
            .record_expense(Transaction::build(user_id, 200.0, date!(2025 - 06 - 02)))
            .unwrap();

        assert_eq!(recorded.alert, None);
        assert!(tracker.notifier.sent.is_empty());
    }

    #[test]
    fn failed_dispatch_leaves_the_alert_retryable() {
        let (mut tracker, user_id) = get_test_tracker();
        tracker.set_budget(user_id, 1000.0).unwrap();
        tracker.notifier.failures_remaining = 1;

        // The expense still succeeds even though the dispatch fails.
        let first = tracker
            .record_expense(Transaction::build(user_id, 1500.0, date!(2025 - 06 - 02)))
            .unwrap();
        assert_eq!(first.alert, None);
        assert!(tracker.notifier.sent.is_empty());
        assert!(
            !tracker
                .budget_store
                .get(user_id)
                .unwrap()
                .unwrap()
                .alert_sent
        );

        // The next transaction retries and succeeds.
        let second = tracker
            .record_expense(Transaction::build(user_id, 10.0, date!(2025 - 06 - 03)))
            .unwrap();
        assert!(second.alert.is_some());
        assert_eq!(tracker.notifier.sent.len(), 1);
    }

    #[test]
    fn alert_for_user_without_profile_is_unknown_recipient() {
        let (mut tracker, _) = get_test_tracker();
        let ghost = UserID::new(99);
        tracker.set_budget(ghost, 100.0).unwrap();
        tracker
            .transaction_store
            .create(Transaction::build(ghost, 150.0, date!(2025 - 06 - 02)))
            .unwrap();

        let got = tracker.on_new_transaction(ghost, date!(2025 - 06 - 02));

        assert_eq!(got, Err(Error::UnknownRecipient(ghost)));
    }

    #[test]
    fn budget_status_reports_not_set_without_a_budget() {
        let (tracker, user_id) = get_test_tracker();

        assert_eq!(
            tracker.budget_status(user_id).unwrap(),
            BudgetStatus::NotSet
        );
    }

    #[test]
    fn budget_status_bands_follow_spend() {
        let (mut tracker, user_id) = get_test_tracker();
        tracker.set_budget(user_id, 1000.0).unwrap();

        tracker
            .record_expense(Transaction::build(user_id, 799.9, date!(2025 - 06 - 02)))
            .unwrap();
        let status = tracker.budget_status(user_id).unwrap();
        assert!(matches!(status, BudgetStatus::Safe(_)));
        assert_eq!(status.usage().unwrap().percent, 79.99);

        tracker
            .record_expense(Transaction::build(user_id, 0.1, date!(2025 - 06 - 02)))
            .unwrap();
        let status = tracker.budget_status(user_id).unwrap();
        assert!(matches!(status, BudgetStatus::Warning(_)));

        tracker
            .record_expense(Transaction::build(user_id, 200.0, date!(2025 - 06 - 02)))
            .unwrap();
        let status = tracker.budget_status(user_id).unwrap();
        assert!(matches!(status, BudgetStatus::Exceeded(_)));
    }

    #[test]
    fn summary_reports_windowed_totals_and_streak() {
        let (mut tracker, user_id) = get_test_tracker();

        // Outside the trailing week, inside the month.
        tracker
            .record_expense(Transaction::build(user_id, 100.0, date!(2025 - 06 - 01)))
            .unwrap();
        // Inside both windows.
        tracker
            .record_expense(Transaction::build(user_id, 50.0, date!(2025 - 06 - 09)))
            .unwrap();
        tracker
            .record_expense(Transaction::build(user_id, 25.0, date!(2025 - 06 - 10)))
            .unwrap();

        let summary = tracker.summary(user_id, date!(2025 - 06 - 10)).unwrap();

        assert_eq!(summary.weekly_total, 75.0);
        assert_eq!(summary.monthly_total, 175.0);
        assert_eq!(summary.current_streak, 2);
    }

    #[test]
    fn month_projection_matches_daily_average() {
        let (mut tracker, user_id) = get_test_tracker();
        tracker
            .record_expense(Transaction::build(user_id, 300.0, date!(2025 - 06 - 04)))
            .unwrap();

        let projection = tracker
            .month_projection(user_id, date!(2025 - 06 - 10))
            .unwrap();

        assert_eq!(projection.daily_average, 30.0);
        assert_eq!(projection.predicted_month_total, 900.0);
    }

    #[test]
    fn spending_trend_over_rising_history() {
        let (mut tracker, user_id) = get_test_tracker();
        for (day, amount) in [(1, 10.0), (2, 20.0), (3, 30.0), (4, 40.0), (5, 50.0)] {
            tracker
                .record_expense(Transaction::build(
                    user_id,
                    amount,
                    date!(2025 - 06 - 01).replace_day(day).unwrap(),
                ))
                .unwrap();
        }

        let TrendReport::Ok(trend) = tracker.spending_trend(user_id).unwrap() else {
            panic!("want a fitted trend");
        };

        assert_eq!(trend.trend, TrendDirection::Increasing);
        assert_eq!(trend.daily_change, 10.0);
    }

    #[test]
    fn expense_history_is_newest_first() {
        let (mut tracker, user_id) = get_test_tracker();
        for day in [3, 1, 2] {
            tracker
                .record_expense(Transaction::build(
                    user_id,
                    10.0,
                    date!(2025 - 06 - 01).replace_day(day).unwrap(),
                ))
                .unwrap();
        }

        let history = tracker.expense_history(user_id).unwrap();

        let days: Vec<u8> = history
            .iter()
            .map(|transaction| transaction.date().day())
            .collect();
        assert_eq!(days, vec![3, 2, 1]);
    }
}

//! Defines the notifier boundary used to deliver over-budget alerts.
//!
//! The engine only decides whether an alert fires and with what payload;
//! actual delivery (SMTP or otherwise) lives behind the [Notifier] trait.

use serde::Serialize;

/// The payload for a single over-budget notification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetAlert {
    /// Where to deliver the alert, e.g. the user's email address.
    pub recipient: String,
    /// The display name used to address the user.
    pub user_name: String,
    /// Month-to-date spend at the time the alert fired, rounded to 2
    /// decimals.
    pub spent: f64,
    /// The monthly budget that was exceeded.
    pub budget: f64,
}

impl BudgetAlert {
    /// The subject line for the alert message.
    pub fn subject(&self) -> &'static str {
        "Monthly Budget Exceeded"
    }

    /// Render the plain-text body of the alert message.
    pub fn body(&self) -> String {
        let exceeded_by = self.spent - self.budget;

        format!(
            "Hello {},\n\n\
             This is an automatic alert from your finance tracker.\n\n\
             Budget exceeded!\n\n\
             * Monthly budget: {:.2}\n\
             * Total spent: {:.2}\n\
             * Exceeded by: {:.2}\n\n\
             Please review your expenses and plan accordingly.",
            self.user_name, self.budget, self.spent, exceeded_by
        )
    }
}

/// Delivers budget alerts to the user.
///
/// Implementations must report failure so the caller can withhold the
/// alert-sent commit and retry on the next qualifying transaction.
pub trait Notifier {
    /// Deliver `alert` to its recipient.
    ///
    /// # Errors
    /// Returns [Error::NotificationFailed](crate::Error::NotificationFailed)
    /// if the alert could not be delivered.
    fn send_budget_alert(&mut self, alert: &BudgetAlert) -> Result<(), crate::Error>;
}

/// A notifier that reports alerts through the application log.
///
/// Stands in for a real delivery channel in the CLI and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send_budget_alert(&mut self, alert: &BudgetAlert) -> Result<(), crate::Error> {
        tracing::info!(
            recipient = %alert.recipient,
            subject = alert.subject(),
            "{}",
            alert.body()
        );

        Ok(())
    }
}

#[cfg(test)]
mod budget_alert_tests {
    use super::BudgetAlert;

    #[test]
    fn body_names_user_and_overspend() {
        let alert = BudgetAlert {
            recipient: "ada@example.com".to_owned(),
            user_name: "Ada".to_owned(),
            spent: 1500.0,
            budget: 1000.0,
        };

        let body = alert.body();

        assert!(body.contains("Hello Ada"));
        assert!(body.contains("Monthly budget: 1000.00"));
        assert!(body.contains("Total spent: 1500.00"));
        assert!(body.contains("Exceeded by: 500.00"));
    }
}

/// Host notification seam. Real delivery (email, SMS, push) lives outside
/// this service; the contract is fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, host_username: &str, claimer_name: &str, giveaway_title: &str);
}

/// Production notifier: a structured log line per claim.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, host_username: &str, claimer_name: &str, giveaway_title: &str) {
        tracing::info!(
            host = host_username,
            claimer = claimer_name,
            title = giveaway_title,
            "claim notification: {claimer_name} wants to claim \"{giveaway_title}\" from {host_username}"
        );
    }
}

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::WidgetIntent;

/// Holds the single pending turn timer. Scheduling a new one aborts the old.
///
/// Only a weak sender is kept, so the widget's channel closes once every
/// [`WidgetHandle`](super::WidgetHandle) is gone.
#[derive(Debug)]
pub struct TurnScheduler {
    intent_tx: mpsc::WeakUnboundedSender<WidgetIntent>,
    pending: Option<JoinHandle<()>>,
}

impl TurnScheduler {
    pub fn new(intent_tx: &mpsc::UnboundedSender<WidgetIntent>) -> Self {
        Self { intent_tx: intent_tx.downgrade(), pending: None }
    }

    /// Post `intent` back to the widget after `delay`.
    pub fn schedule(&mut self, delay: Duration, intent: WidgetIntent) {
        self.cancel();

        let tx = self.intent_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(intent);
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("aborting pending turn timer");
            }
            handle.abort();
        }
    }
}

impl Drop for TurnScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timer_posts_intent_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TurnScheduler::new(&tx);

        scheduler.schedule(Duration::from_millis(1000), WidgetIntent::ReplyDue { turn: 1 });
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(rx.try_recv().ok(), Some(WidgetIntent::ReplyDue { turn: 1 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_aborts_previous_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TurnScheduler::new(&tx);

        scheduler.schedule(Duration::from_millis(100), WidgetIntent::ReplyDue { turn: 1 });
        scheduler.schedule(Duration::from_millis(200), WidgetIntent::ReplyDue { turn: 2 });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(rx.try_recv().ok(), Some(WidgetIntent::ReplyDue { turn: 2 }));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TurnScheduler::new(&tx);

        scheduler.schedule(Duration::from_millis(100), WidgetIntent::TypingElapsed { turn: 3 });
        scheduler.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_does_not_keep_channel_open() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TurnScheduler::new(&tx);
        drop(tx);

        scheduler.schedule(Duration::from_millis(100), WidgetIntent::ReplyDue { turn: 1 });
        assert_eq!(rx.recv().await, None);
    }
}

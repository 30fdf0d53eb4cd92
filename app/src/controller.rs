use std::pin::Pin;

use engine::roster::Participant;
use engine::wheel::{SpinRejection, WheelGame, WheelView, SPIN_DURATION_MS};
use rand::Rng;
use tokio::time::{sleep, Duration, Sleep};
use tracing::{debug, info};

/// Drives the wheel and owns the completion timer for the spin in
/// flight. The timer lives and dies with the controller: dropping it
/// mid-spin releases the pending wakeup, so a spin can never resolve
/// against a torn-down context.
pub struct SpinController<R: Rng> {
    game: WheelGame,
    rng: R,
    timer: Option<Pin<Box<Sleep>>>,
}

impl<R: Rng> SpinController<R> {
    pub fn new(rng: R) -> Self {
        Self {
            game: WheelGame::new(),
            rng,
            timer: None,
        }
    }

    pub fn add_participant(&mut self, raw: &str) -> bool {
        let added = self.game.add_participant(raw);
        if added {
            debug!(
                "Entrant added: {} (#{} on the wheel)",
                raw.trim(),
                self.game.roster.len()
            );
        }
        added
    }

    /// Launches a spin and arms the completion timer. A rejected request
    /// leaves both the wheel and any armed timer untouched.
    pub fn request_spin(&mut self) -> Result<(), SpinRejection> {
        let rotation_before = self.game.rotation_degrees;
        let pending = match self.game.spin(&mut self.rng) {
            Ok(pending) => pending,
            Err(rejection) => {
                debug!("Spin request ignored: {:?}", rejection);
                return Err(rejection);
            }
        };

        info!(
            "🎡 WHEEL SPIN: {} entrants, +{:.0}° to {:.0}°, resolving in {}ms",
            pending.entrants.len(),
            pending.target_rotation - rotation_before,
            pending.target_rotation,
            SPIN_DURATION_MS
        );
        self.timer = Some(Box::pin(sleep(Duration::from_millis(SPIN_DURATION_MS))));
        Ok(())
    }

    /// Waits for the armed completion timer. When no spin is pending this
    /// never resolves, which makes it safe to park in a select loop.
    pub async fn spin_elapsed(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => timer.await,
            None => std::future::pending().await,
        }
    }

    /// Resolves the elapsed spin and disarms the timer. Returns the
    /// winner, or `None` when nothing was pending.
    pub fn finish_spin(&mut self) -> Option<Participant> {
        self.timer = None;
        let winner = self.game.complete_spin().cloned();
        match &winner {
            Some(winner) => info!("🏆 WHEEL RESULT: {} wins", winner),
            None => debug!("Completion fired with no spin pending"),
        }
        winner
    }

    pub fn view(&self) -> WheelView {
        self.game.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::wheel::winning_index;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tokio::time::{advance, timeout};

    fn seeded_controller(names: &[&str], seed: u64) -> SpinController<SmallRng> {
        let mut controller = SpinController::new(SmallRng::seed_from_u64(seed));
        for name in names {
            controller.add_participant(name);
        }
        controller
    }

    #[tokio::test(start_paused = true)]
    async fn test_spin_resolves_only_after_full_duration() {
        let mut controller = seeded_controller(
            &[
                "John Doe",
                "Jane Smith",
                "Bob Johnson",
                "Alice Brown",
                "Charlie Wilson",
                "Diana Miller",
                "Evan Davis",
            ],
            99,
        );
        controller.request_spin().unwrap();
        assert!(controller.view().is_spinning);
        assert!(controller.view().winner.is_none());

        // One millisecond short of the deadline the timer must still hold
        advance(Duration::from_millis(SPIN_DURATION_MS - 1)).await;
        assert!(timeout(Duration::ZERO, controller.spin_elapsed()).await.is_err());
        assert!(controller.view().is_spinning);

        advance(Duration::from_millis(1)).await;
        assert!(timeout(Duration::ZERO, controller.spin_elapsed()).await.is_ok());
        let winner = controller.finish_spin().expect("spin should resolve");

        let view = controller.view();
        assert!(!view.is_spinning);
        let expected = winning_index(view.rotation_degrees, 7);
        assert_eq!(winner.name(), view.participants[expected].name());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reentrant_spin_does_not_restart_timer() {
        let mut controller = seeded_controller(&["A", "B", "C"], 7);
        controller.request_spin().unwrap();
        let target = controller.view().rotation_degrees;

        advance(Duration::from_millis(3000)).await;
        assert!(matches!(
            controller.request_spin(),
            Err(SpinRejection::AlreadySpinning)
        ));
        assert_eq!(controller.view().rotation_degrees, target);

        // The original deadline still stands: 2000ms more, not a fresh 5000
        advance(Duration::from_millis(2000)).await;
        assert!(timeout(Duration::ZERO, controller.spin_elapsed()).await.is_ok());
        assert!(controller.finish_spin().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_roster_spin_arms_nothing() {
        let mut controller = SpinController::new(SmallRng::seed_from_u64(1));
        assert!(matches!(
            controller.request_spin(),
            Err(SpinRejection::EmptyRoster)
        ));
        assert!(!controller.view().is_spinning);
        assert!(
            timeout(Duration::from_millis(SPIN_DURATION_MS * 2), controller.spin_elapsed())
                .await
                .is_err()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_mid_spin_addition_waits_for_next_spin() {
        let mut controller = seeded_controller(&["A", "B", "C", "D"], 5);
        controller.request_spin().unwrap();

        advance(Duration::from_millis(1000)).await;
        assert!(controller.add_participant("Late Entry"));

        advance(Duration::from_millis(4000)).await;
        controller.spin_elapsed().await;
        let winner = controller.finish_spin().expect("spin should resolve");

        // Resolved against the four entrants frozen at launch
        let view = controller.view();
        assert_eq!(view.participants.len(), 5);
        let expected = winning_index(view.rotation_degrees, 4);
        assert_eq!(winner.name(), ["A", "B", "C", "D"][expected]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_same_winner() {
        let names = ["Ana", "Ben", "Cleo", "Drew", "Eli"];
        let mut first = seeded_controller(&names, 2024);
        let mut second = seeded_controller(&names, 2024);

        first.request_spin().unwrap();
        advance(Duration::from_millis(SPIN_DURATION_MS)).await;
        first.spin_elapsed().await;
        let first_winner = first.finish_spin();

        second.request_spin().unwrap();
        advance(Duration::from_millis(SPIN_DURATION_MS)).await;
        second.spin_elapsed().await;
        let second_winner = second.finish_spin();

        assert!(first_winner.is_some());
        assert_eq!(first_winner, second_winner);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_mid_spin_releases_timer() {
        let mut controller = seeded_controller(&["A", "B"], 3);
        controller.request_spin().unwrap();
        // Dropping the controller drops the armed timer with it
        drop(controller);
        advance(Duration::from_millis(SPIN_DURATION_MS)).await;
    }
}

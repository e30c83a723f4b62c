use dioxus::prelude::*;

use crate::prelude::*;
use crate::utils::CCStr;

/// Monotonic ticket counter guarding async fetches against stale
/// responses: every new fetch takes a ticket, and only the holder of
/// the latest ticket may apply its result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generations {
    issued: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generations {
    pub fn next(&mut self) -> Generation {
        self.issued += 1;
        Generation(self.issued)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.issued
    }
}

/// Maximum transferable balance of (address, token), refreshed whenever
/// either input changes. The most recently triggered fetch wins;
/// superseded responses are discarded, never applied.
pub fn use_free_balance(
    address: ReadOnlySignal<CCStr>,
    token_slug: ReadOnlySignal<CCStr>,
) -> ReadOnlySignal<Option<FreeBalance>> {
    let bridge_service = state_management::use_bridge_service();
    let mut balance = use_signal(|| None);
    let mut generations = use_signal(Generations::default);

    use_effect(move || {
        let address = address();
        let token_slug = token_slug();
        let ticket = generations.write().next();
        balance.set(None);

        if address.is_empty() || token_slug.is_empty() {
            return;
        }

        spawn(async move {
            let fetched =
                state_management::get_free_balance(bridge_service, address, token_slug).await;
            if !generations.peek().is_current(ticket) {
                log::debug!("use_free_balance - discarding superseded balance response");
                return;
            }
            match fetched {
                Ok(free_balance) => balance.set(Some(free_balance)),
                Err(e) => log::error!("Could not fetch free balance: {e}"),
            }
        });
    });

    balance.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let mut generations = Generations::default();

        let first = generations.next();
        assert!(generations.is_current(first));

        // A new fetch supersedes the first one before it resolved
        let second = generations.next();
        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
    }

    #[test]
    fn tickets_are_not_interchangeable() {
        let mut a = Generations::default();
        let ticket = a.next();
        let _ = a.next();
        let newer = a.next();
        assert!(!a.is_current(ticket));
        assert!(a.is_current(newer));
    }
}

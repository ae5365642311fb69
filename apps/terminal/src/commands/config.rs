//! # Config & Session Commands

use tracing::debug;

use crate::state::{ConfigState, Session};
use stockdesk_core::PosState;

/// Gets the current application configuration.
pub fn get_config(session: &Session) -> ConfigState {
    debug!("get_config command");
    session.config().clone()
}

/// Snapshot of the whole point-of-sale state for `export`.
pub fn export_state(session: &Session) -> PosState {
    debug!("export_state command");
    session.pos().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::Action;

    #[test]
    fn test_export_is_a_snapshot() {
        let mut session = Session::new(ConfigState::default());
        let before = export_state(&session);

        session
            .apply(Action::AddToCart {
                id: "STK001".to_string(),
                quantity: 1,
            })
            .unwrap();

        assert_eq!(before.cart().item_count(), 0);
        assert_eq!(export_state(&session).cart().item_count(), 1);

        let json = serde_json::to_value(export_state(&session)).unwrap();
        assert_eq!(json["inventory"][0]["quantity"], 9);
        assert_eq!(json["cart"][0]["id"], "STK001");
    }
}

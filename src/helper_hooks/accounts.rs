use dioxus::prelude::*;

use crate::prelude::*;

/// The account currently selected in the account switcher, if any.
pub fn use_memo_selected_account() -> Memo<Option<Account>> {
    use_memo(move || {
        let selected = state_management::SELECTED_ACCOUNT();
        selected.and_then(|address| {
            Account::find(&state_management::ACCOUNTS(), &address).cloned()
        })
    })
}

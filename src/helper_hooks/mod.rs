mod accounts;
mod generation;
mod staking;

pub mod prelude {
    pub use super::generation::{Generation, Generations};
    pub use super::staking::{StakingData, StakingSummary, ALL_NETWORK_KEY};

    pub mod helper_hooks {
        pub use super::super::accounts::use_memo_selected_account;
        pub use super::super::generation::use_free_balance;
        pub use super::super::staking::{build_staking_summary, use_memo_staking_summary};
    }
}

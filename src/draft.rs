//! Transient transaction drafts and their field-level validation.
//!
//! A draft is created when a transaction form mounts, mutated by field
//! changes, and discarded on submit or navigation. It is never
//! persisted. Validators return tagged errors so forms can surface them
//! inline and block submission without any network round trip.

use crate::address::{address_kind, AddressKind};
use crate::utils::CCStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Recipient address is required")]
    RecipientRequired,
    #[error("Invalid recipient address")]
    InvalidRecipient,
    #[error("The recipient address cannot be the same as the sender address")]
    SameAsSender,
    #[error("The recipient address must be the same type as the sender address")]
    AddressTypeMismatch,
    #[error("The recipient address must be {expected} type")]
    DestinationTypeMismatch { expected: AddressKind },
    #[error("Amount is required")]
    AmountRequired,
    #[error("Amount must be a number")]
    AmountNotNumeric,
    #[error("Amount must be greater than 0")]
    AmountZero,
}

/// Draft of a same-chain or cross-chain transfer. `value` holds base
/// units, already converted by the amount field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferDraft {
    pub from: CCStr,
    pub token: CCStr,
    pub chain: CCStr,
    pub dest_chain: CCStr,
    pub to: String,
    pub value: String,
}

impl TransferDraft {
    pub fn is_same_chain(&self) -> bool {
        *self.chain == *self.dest_chain
    }

    /// Run every field validator. The first failure wins, recipient
    /// before amount, mirroring the order the form displays them in.
    pub fn validate(&self, dest_chain_is_evm: bool) -> Result<(), FieldError> {
        validate_recipient(
            &self.from,
            &self.to,
            self.is_same_chain(),
            dest_chain_is_evm,
        )?;
        validate_amount(&self.value)
    }
}

/// Recipient rules:
/// - required, and must parse as some address kind;
/// - same-chain: must differ from the sender and share its address
///   kind (an EVM sender cannot target a Substrate recipient on one
///   chain);
/// - cross-chain: must match the destination chain's address kind.
pub fn validate_recipient(
    from: &str,
    recipient: &str,
    is_same_chain: bool,
    dest_chain_is_evm: bool,
) -> Result<(), FieldError> {
    if recipient.is_empty() {
        return Err(FieldError::RecipientRequired);
    }
    let Some(recipient_kind) = address_kind(recipient) else {
        return Err(FieldError::InvalidRecipient);
    };

    if is_same_chain {
        if recipient == from {
            return Err(FieldError::SameAsSender);
        }
        if address_kind(from).is_some_and(|sender_kind| sender_kind != recipient_kind) {
            return Err(FieldError::AddressTypeMismatch);
        }
    } else {
        let expected = if dest_chain_is_evm {
            AddressKind::Evm
        } else {
            AddressKind::Substrate
        };
        if recipient_kind != expected {
            return Err(FieldError::DestinationTypeMismatch { expected });
        }
    }

    Ok(())
}

/// Amount rules: required, numeric base units, strictly positive.
pub fn validate_amount(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::AmountRequired);
    }
    let amount: u128 = value.parse().map_err(|_| FieldError::AmountNotNumeric)?;
    if amount == 0 {
        return Err(FieldError::AmountZero);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBSTRATE_SENDER: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const SUBSTRATE_RECIPIENT: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
    const EVM_SENDER: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
    const EVM_RECIPIENT: &str = "0x1f9090aae28b8a3dceadf281b0f12828e676c326";

    #[test]
    fn recipient_is_required() {
        assert_eq!(
            validate_recipient(SUBSTRATE_SENDER, "", true, false),
            Err(FieldError::RecipientRequired)
        );
    }

    #[test]
    fn recipient_must_be_an_address() {
        assert_eq!(
            validate_recipient(SUBSTRATE_SENDER, "not-an-address", true, false),
            Err(FieldError::InvalidRecipient)
        );
    }

    #[test]
    fn same_chain_rejects_self_transfer() {
        assert_eq!(
            validate_recipient(SUBSTRATE_SENDER, SUBSTRATE_SENDER, true, false),
            Err(FieldError::SameAsSender)
        );
    }

    #[test]
    fn same_chain_rejects_address_type_mismatch() {
        // EVM sender, Substrate recipient: rejected before any bridge
        // call can happen.
        assert_eq!(
            validate_recipient(EVM_SENDER, SUBSTRATE_RECIPIENT, true, false),
            Err(FieldError::AddressTypeMismatch)
        );
        assert_eq!(
            validate_recipient(SUBSTRATE_SENDER, EVM_RECIPIENT, true, false),
            Err(FieldError::AddressTypeMismatch)
        );
    }

    #[test]
    fn same_chain_accepts_matching_types() {
        assert_eq!(
            validate_recipient(SUBSTRATE_SENDER, SUBSTRATE_RECIPIENT, true, false),
            Ok(())
        );
        assert_eq!(validate_recipient(EVM_SENDER, EVM_RECIPIENT, true, true), Ok(()));
    }

    #[test]
    fn cross_chain_requires_destination_type() {
        assert_eq!(
            validate_recipient(SUBSTRATE_SENDER, SUBSTRATE_RECIPIENT, false, true),
            Err(FieldError::DestinationTypeMismatch {
                expected: AddressKind::Evm
            })
        );
        assert_eq!(
            validate_recipient(SUBSTRATE_SENDER, EVM_RECIPIENT, false, true),
            Ok(())
        );
        // Sending to one's own address on another chain is allowed.
        assert_eq!(
            validate_recipient(SUBSTRATE_SENDER, SUBSTRATE_SENDER, false, false),
            Ok(())
        );
    }

    #[test]
    fn amount_rules() {
        assert_eq!(validate_amount(""), Err(FieldError::AmountRequired));
        assert_eq!(validate_amount("abc"), Err(FieldError::AmountNotNumeric));
        assert_eq!(validate_amount("0"), Err(FieldError::AmountZero));
        assert_eq!(validate_amount("1500000000000"), Ok(()));
    }

    #[test]
    fn draft_validates_recipient_then_amount() {
        let draft = TransferDraft {
            from: SUBSTRATE_SENDER.into(),
            token: "polkadot-NATIVE-DOT".into(),
            chain: "polkadot".into(),
            dest_chain: "polkadot".into(),
            to: SUBSTRATE_RECIPIENT.to_owned(),
            value: "0".to_owned(),
        };
        assert_eq!(draft.validate(false), Err(FieldError::AmountZero));
    }
}

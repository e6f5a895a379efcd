//! Operation content construction via the builder pattern.
//!
//! [`OperationBuilder`] holds the fields every manager operation shares
//! (source, fee, counter, limits) and finishes into one of the four
//! manager kinds. Activations share none of that and are built with the
//! free function [`activation`].
//!
//! The builder is pure: no I/O, no clock, no randomness. Given the same
//! account counter and parameters it always produces the same content.

use thiserror::Error;

use super::types::{
    ActivateAccount, Delegation, OperationContent, Origination, Parameters, Reveal, Transaction,
};
use crate::config::{DEFAULT_GAS_LIMIT, DEFAULT_STORAGE_LIMIT};

/// Errors from starting a builder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuilderError {
    /// The account counter is already at the top of the range.
    #[error("account counter {account_counter} has no successor")]
    CounterOverflow { account_counter: u64 },
}

/// Fluent builder for manager operations.
///
/// # Usage
///
/// ```
/// use tezos_client::operation::OperationBuilder;
///
/// // The node reported counter 41 for the source account.
/// let op = OperationBuilder::new("tz1Source", 41)
///     .unwrap()
///     .fee(100)
///     .transaction("tz1Receiver", 1000);
///
/// assert_eq!(op.counter(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    source: String,
    counter: u64,
    fee: u64,
    gas_limit: u64,
    storage_limit: u64,
}

impl OperationBuilder {
    /// Starts a builder for `source`, given the account counter the node
    /// reported. The operation's counter is always `account_counter + 1`.
    ///
    /// # Errors
    ///
    /// [`BuilderError::CounterOverflow`] if `account_counter` is `u64::MAX`.
    pub fn new(source: &str, account_counter: u64) -> Result<Self, BuilderError> {
        let counter = account_counter
            .checked_add(1)
            .ok_or(BuilderError::CounterOverflow { account_counter })?;
        Ok(Self {
            source: source.to_string(),
            counter,
            fee: 0,
            gas_limit: DEFAULT_GAS_LIMIT,
            storage_limit: DEFAULT_STORAGE_LIMIT,
        })
    }

    /// Sets the fee in mutez.
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// Overrides the default gas limit.
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Overrides the default storage limit.
    pub fn storage_limit(mut self, storage_limit: u64) -> Self {
        self.storage_limit = storage_limit;
        self
    }

    /// A transfer of `amount` mutez with unit parameters.
    pub fn transaction(self, destination: &str, amount: u64) -> OperationContent {
        OperationContent::Transaction(Transaction {
            source: self.source,
            destination: destination.to_string(),
            amount,
            fee: self.fee,
            counter: self.counter,
            gas_limit: self.gas_limit,
            storage_limit: self.storage_limit,
            parameters: Parameters::default(),
        })
    }

    /// A delegation of the source account to `delegate`.
    pub fn delegation(self, delegate: &str) -> OperationContent {
        OperationContent::Delegation(Delegation {
            source: self.source,
            delegate: delegate.to_string(),
            fee: self.fee,
            counter: self.counter,
            gas_limit: self.gas_limit,
            storage_limit: self.storage_limit,
        })
    }

    /// An origination funded with `balance`, managed by the source.
    pub fn origination(
        self,
        balance: u64,
        delegate: Option<&str>,
        spendable: bool,
        delegatable: bool,
    ) -> OperationContent {
        OperationContent::Origination(Origination {
            manager_pubkey: self.source.clone(),
            source: self.source,
            balance,
            spendable,
            delegatable,
            delegate: delegate.map(str::to_string),
            fee: self.fee,
            counter: self.counter,
            gas_limit: self.gas_limit,
            storage_limit: self.storage_limit,
        })
    }

    /// A reveal of `public_key` for the source account.
    pub fn reveal(self, public_key: &str) -> OperationContent {
        OperationContent::Reveal(Reveal {
            source: self.source,
            public_key: public_key.to_string(),
            fee: self.fee,
            counter: self.counter,
            gas_limit: self.gas_limit,
            storage_limit: self.storage_limit,
        })
    }
}

/// An account activation. No counter: the account has no prior state.
pub fn activation(pkh: &str, secret: &str) -> OperationContent {
    OperationContent::ActivateAccount(ActivateAccount {
        pkh: pkh.to_string(),
        secret: secret.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transaction_matches_expected_wire_content() {
        let op = OperationBuilder::new("tz1Source", 41)
            .unwrap()
            .fee(100)
            .transaction("tz1Receiver", 1000);

        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "kind": "transaction",
                "source": "tz1Source",
                "destination": "tz1Receiver",
                "amount": "1000",
                "fee": "100",
                "counter": "42",
                "gas_limit": "120",
                "storage_limit": "0",
                "parameters": {"prim": "Unit", "args": []}
            })
        );
    }

    #[test]
    fn counter_is_account_counter_plus_one() {
        for account_counter in [0u64, 1, 41, 1_000_000] {
            let op = OperationBuilder::new("tz1", account_counter)
                .unwrap()
                .delegation("tz1Baker");
            assert_eq!(op.counter(), Some(account_counter + 1));
        }
    }

    #[test]
    fn counter_at_top_of_range_is_rejected() {
        assert_eq!(
            OperationBuilder::new("tz1", u64::MAX).unwrap_err(),
            BuilderError::CounterOverflow {
                account_counter: u64::MAX
            }
        );
        let last = OperationBuilder::new("tz1", u64::MAX - 1).unwrap().reveal("edpk");
        assert_eq!(last.counter(), Some(u64::MAX));
    }

    #[test]
    fn limits_can_be_overridden() {
        let op = OperationBuilder::new("tz1", 0)
            .unwrap()
            .gas_limit(10_000)
            .storage_limit(257)
            .origination(500, None, true, true);
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["gas_limit"], "10000");
        assert_eq!(value["storage_limit"], "257");
    }

    #[test]
    fn delegation_fields() {
        let op = OperationBuilder::new("tz1Source", 9)
            .unwrap()
            .fee(1300)
            .delegation("tz1Baker");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "kind": "delegation",
                "source": "tz1Source",
                "delegate": "tz1Baker",
                "fee": "1300",
                "counter": "10",
                "gas_limit": "120",
                "storage_limit": "0"
            })
        );
    }

    #[test]
    fn origination_uses_source_as_manager() {
        let op = OperationBuilder::new("tz1Source", 3)
            .unwrap()
            .fee(1400)
            .origination(2_000_000, Some("tz1Baker"), true, false);
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["kind"], "origination");
        assert_eq!(value["managerPubkey"], "tz1Source");
        assert_eq!(value["balance"], "2000000");
        assert_eq!(value["delegate"], "tz1Baker");
        assert_eq!(value["spendable"], true);
        assert_eq!(value["delegatable"], false);
        assert_eq!(value["counter"], "4");
    }

    #[test]
    fn reveal_fields() {
        let op = OperationBuilder::new("tz1Source", 0)
            .unwrap()
            .fee(1269)
            .reveal("edpkPublic");
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["kind"], "reveal");
        assert_eq!(value["public_key"], "edpkPublic");
        assert_eq!(value["counter"], "1");
    }

    #[test]
    fn activation_has_only_pkh_and_secret() {
        let op = activation("tz1Fundraiser", "deadbeef");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"kind": "activate_account", "pkh": "tz1Fundraiser", "secret": "deadbeef"})
        );
    }

    #[test]
    fn builder_is_pure() {
        let build = || {
            OperationBuilder::new("tz1", 5)
                .unwrap()
                .fee(7)
                .transaction("tz1Dst", 9)
        };
        assert_eq!(build(), build());
    }
}

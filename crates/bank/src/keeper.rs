//! Balance keeper.

use crate::error::{BankError, Result};
use minikeeper_collections::{Map, Prefix, PrefixByte, Schema, SchemaBuilder, StringKey, Uint64Value};
use minikeeper_core::{validate_denom, AddressCodec, Coin};
use minikeeper_storage::{Context, StoreKey};
use std::sync::Arc;
use tracing::debug;

/// Name of the bank module and of its store.
pub const MODULE_NAME: &str = "bank";

/// Prefix of the balances map.
pub const BALANCES_KEY: PrefixByte = Prefix::from_u8(0);

/// Owns every account balance of a single denomination.
///
/// Balances are stored as `address -> u64` under the codec's canonical
/// spelling of the address; an address with no entry has a balance of zero.
/// Individual methods write one or two keys in sequence and are not atomic
/// on their own: callers that need all-or-nothing behaviour run them inside
/// [`Context::branch`], as the msg server does.
#[derive(Clone)]
pub struct Keeper {
    address_codec: Arc<dyn AddressCodec>,
    authority: String,
    denom: String,
    schema: Schema,
    pub balances: Map<StringKey, Uint64Value>,
}

impl Keeper {
    /// Create a keeper, validating the authority address and the denom.
    pub fn new(address_codec: Arc<dyn AddressCodec>, authority: &str, denom: &str) -> Result<Self> {
        let authority = address_codec
            .canonical_string(authority)
            .map_err(|source| BankError::InvalidIdentifier {
                address: authority.to_string(),
                source,
            })?;
        validate_denom(denom).map_err(|e| BankError::InvalidConfig(e.to_string()))?;

        let mut sb = SchemaBuilder::new(StoreKey::new(MODULE_NAME));
        let balances = sb.map(BALANCES_KEY, "balances", StringKey, Uint64Value);
        let schema = sb.build()?;

        Ok(Self {
            address_codec,
            authority,
            denom: denom.to_string(),
            schema,
            balances,
        })
    }

    /// The address allowed to mint through the msg server, in canonical form.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn denom(&self) -> &str {
        &self.denom
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn address_codec(&self) -> &dyn AddressCodec {
        self.address_codec.as_ref()
    }

    /// Canonical form of `address`, or `InvalidIdentifier` if the codec
    /// rejects it.
    pub fn validate_address(&self, address: &str) -> Result<String> {
        self.address_codec
            .canonical_string(address)
            .map_err(|source| BankError::InvalidIdentifier {
                address: address.to_string(),
                source,
            })
    }

    /// Balance of `address`; zero if it never held coins.
    pub fn balance(&self, ctx: &Context<'_>, address: &str) -> Result<u64> {
        let key = self.validate_address(address)?;
        Ok(self.balances.get(ctx, &key)?.unwrap_or(0))
    }

    /// Credit `amount` to `address`, creating the entry if needed.
    ///
    /// Returns the new balance. Fails with `BalanceOverflow` rather than
    /// wrapping or saturating.
    pub fn mint_coins(&self, ctx: &Context<'_>, address: &str, amount: u64) -> Result<u64> {
        let key = self.validate_address(address)?;
        let updated = match self.balances.get(ctx, &key)? {
            None => amount,
            Some(current) => current
                .checked_add(amount)
                .ok_or_else(|| BankError::BalanceOverflow {
                    address: key.clone(),
                })?,
        };
        self.balances.set(ctx, &key, &updated)?;
        debug!(address = %key, amount, balance = updated, "minted coins");
        Ok(updated)
    }

    /// Move `amount` from `sender` to `receiver`.
    ///
    /// Both balances are checked before anything is written, so a rejected
    /// transfer leaves both untouched.
    pub fn transfer_coins(
        &self,
        ctx: &Context<'_>,
        sender: &str,
        receiver: &str,
        amount: u64,
    ) -> Result<()> {
        let sender = self.validate_address(sender)?;
        let receiver = self.validate_address(receiver)?;

        let sender_balance = self.balances.get(ctx, &sender)?.unwrap_or(0);
        if sender_balance < amount {
            return Err(BankError::InsufficientBalance {
                address: sender,
                required: amount,
                available: sender_balance,
            });
        }
        if sender == receiver {
            return Ok(());
        }

        let receiver_balance = self.balances.get(ctx, &receiver)?.unwrap_or(0);
        let credited =
            receiver_balance
                .checked_add(amount)
                .ok_or_else(|| BankError::BalanceOverflow {
                    address: receiver.clone(),
                })?;

        self.balances.set(ctx, &sender, &(sender_balance - amount))?;
        self.balances.set(ctx, &receiver, &credited)?;
        debug!(%sender, %receiver, amount, "transferred coins");
        Ok(())
    }

    /// Destroy `amount` held by `address`. Returns the new balance.
    pub fn burn(&self, ctx: &Context<'_>, address: &str, amount: u64) -> Result<u64> {
        let key = self.validate_address(address)?;
        let balance = self.balances.get(ctx, &key)?.unwrap_or(0);
        if balance < amount {
            return Err(BankError::InsufficientBalance {
                address: key,
                required: amount,
                available: balance,
            });
        }
        let remaining = balance - amount;
        self.balances.set(ctx, &key, &remaining)?;
        debug!(address = %key, amount, balance = remaining, "burned coins");
        Ok(remaining)
    }

    /// Transfer a [`Coin`], checking it is in this bank's denom.
    pub fn send_coins(&self, ctx: &Context<'_>, from: &str, to: &str, coin: &Coin) -> Result<()> {
        if coin.denom != self.denom {
            return Err(BankError::InvalidDenom {
                expected: self.denom.clone(),
                got: coin.denom.clone(),
            });
        }
        self.transfer_coins(ctx, from, to, coin.amount)
    }

    /// Every stored balance, in address order.
    pub fn export(&self, ctx: &Context<'_>) -> Result<Vec<(String, u64)>> {
        let mut out = Vec::new();
        self.balances
            .walk(ctx, None, |address, amount| -> Result<bool> {
                debug!(%address, amount, "balance");
                out.push((address, amount));
                Ok(false)
            })?;
        Ok(out)
    }

    /// Sum of all balances.
    pub fn total_supply(&self, ctx: &Context<'_>) -> Result<u128> {
        let mut total: u128 = 0;
        self.balances.walk(ctx, None, |_, amount| -> Result<bool> {
            total += u128::from(amount);
            Ok(false)
        })?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minikeeper_core::{Address, HexAddressCodec};
    use minikeeper_storage::MemStore;

    fn addr(byte: u8) -> String {
        Address([byte; 20]).to_hex()
    }

    fn setup() -> Keeper {
        Keeper::new(Arc::new(HexAddressCodec), &addr(0xAA), "stake").unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(matches!(
            Keeper::new(Arc::new(HexAddressCodec), "nobody", "stake"),
            Err(BankError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            Keeper::new(Arc::new(HexAddressCodec), &addr(1), "X"),
            Err(BankError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_mint_creates_then_adds() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();
        let alice = addr(1);

        assert_eq!(keeper.balance(&ctx, &alice).unwrap(), 0);
        assert_eq!(keeper.mint_coins(&ctx, &alice, 100).unwrap(), 100);
        assert_eq!(keeper.mint_coins(&ctx, &alice, 50).unwrap(), 150);
        assert_eq!(keeper.balance(&ctx, &alice).unwrap(), 150);
    }

    #[test]
    fn test_mint_overflow_is_an_error() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();
        let alice = addr(1);

        keeper.mint_coins(&ctx, &alice, u64::MAX).unwrap();
        assert!(matches!(
            keeper.mint_coins(&ctx, &alice, 1),
            Err(BankError::BalanceOverflow { .. })
        ));
        assert_eq!(keeper.balance(&ctx, &alice).unwrap(), u64::MAX);
    }

    #[test]
    fn test_transfer() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();
        let (alice, bob) = (addr(1), addr(2));

        keeper.mint_coins(&ctx, &alice, 1000).unwrap();
        keeper.transfer_coins(&ctx, &alice, &bob, 300).unwrap();

        assert_eq!(keeper.balance(&ctx, &alice).unwrap(), 700);
        assert_eq!(keeper.balance(&ctx, &bob).unwrap(), 300);
    }

    #[test]
    fn test_transfer_insufficient_leaves_state_unchanged() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();
        let (alice, bob) = (addr(1), addr(2));

        keeper.mint_coins(&ctx, &alice, 50).unwrap();
        keeper.mint_coins(&ctx, &bob, 5).unwrap();

        let result = keeper.transfer_coins(&ctx, &alice, &bob, 100);
        assert!(matches!(
            result,
            Err(BankError::InsufficientBalance {
                required: 100,
                available: 50,
                ..
            })
        ));
        assert_eq!(keeper.balance(&ctx, &alice).unwrap(), 50);
        assert_eq!(keeper.balance(&ctx, &bob).unwrap(), 5);
    }

    #[test]
    fn test_transfer_from_empty_account() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();

        assert!(matches!(
            keeper.transfer_coins(&ctx, &addr(1), &addr(2), 1),
            Err(BankError::InsufficientBalance { available: 0, .. })
        ));
    }

    #[test]
    fn test_transfer_to_self_is_a_no_op() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();
        let alice = addr(1);

        keeper.mint_coins(&ctx, &alice, 10).unwrap();
        keeper.transfer_coins(&ctx, &alice, &alice, 10).unwrap();
        assert_eq!(keeper.balance(&ctx, &alice).unwrap(), 10);
    }

    #[test]
    fn test_address_spellings_share_one_balance() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();
        let alice = addr(0xAB);
        let upper = alice.to_uppercase();
        let bare = alice[2..].to_string();

        keeper.mint_coins(&ctx, &alice, 100).unwrap();
        assert_eq!(keeper.balance(&ctx, &upper).unwrap(), 100);
        assert_eq!(keeper.balance(&ctx, &bare).unwrap(), 100);

        keeper.transfer_coins(&ctx, &bare, &addr(2), 30).unwrap();
        assert_eq!(keeper.mint_coins(&ctx, &upper, 5).unwrap(), 75);
        assert_eq!(keeper.burn(&ctx, &bare, 75).unwrap(), 0);

        // Transfer between two spellings of one account is a self-transfer.
        keeper.mint_coins(&ctx, &alice, 10).unwrap();
        keeper.transfer_coins(&ctx, &upper, &bare, 10).unwrap();
        assert_eq!(keeper.balance(&ctx, &alice).unwrap(), 10);

        let exported = keeper.export(&ctx).unwrap();
        assert_eq!(exported, vec![(addr(2), 30), (alice, 10)]);
    }

    #[test]
    fn test_new_stores_canonical_authority() {
        let bare = addr(0xAA)[2..].to_uppercase();
        let keeper = Keeper::new(Arc::new(HexAddressCodec), &bare, "stake").unwrap();
        assert_eq!(keeper.authority(), addr(0xAA));
    }

    #[test]
    fn test_burn() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();
        let alice = addr(1);

        keeper.mint_coins(&ctx, &alice, 10).unwrap();
        assert_eq!(keeper.burn(&ctx, &alice, 4).unwrap(), 6);
        assert!(matches!(
            keeper.burn(&ctx, &alice, 7),
            Err(BankError::InsufficientBalance { .. })
        ));
        assert_eq!(keeper.balance(&ctx, &alice).unwrap(), 6);
    }

    #[test]
    fn test_invalid_identifier() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();

        assert!(matches!(
            keeper.mint_coins(&ctx, "alice", 1),
            Err(BankError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            keeper.balance(&ctx, "alice"),
            Err(BankError::InvalidIdentifier { .. })
        ));
        assert!(keeper.export(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_send_coins_checks_denom() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();
        let (alice, bob) = (addr(1), addr(2));
        keeper.mint_coins(&ctx, &alice, 10).unwrap();

        assert!(matches!(
            keeper.send_coins(&ctx, &alice, &bob, &Coin::new("atom", 1)),
            Err(BankError::InvalidDenom { .. })
        ));
        keeper
            .send_coins(&ctx, &alice, &bob, &Coin::new("stake", 4))
            .unwrap();
        assert_eq!(keeper.balance(&ctx, &bob).unwrap(), 4);
    }

    #[test]
    fn test_export_and_supply() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let keeper = setup();

        keeper.mint_coins(&ctx, &addr(2), 20).unwrap();
        keeper.mint_coins(&ctx, &addr(1), 10).unwrap();
        keeper.mint_coins(&ctx, &addr(3), u64::MAX).unwrap();

        let exported = keeper.export(&ctx).unwrap();
        assert_eq!(exported.len(), 3);
        assert_eq!(exported[0], (addr(1), 10));
        assert_eq!(exported[1], (addr(2), 20));
        assert_eq!(
            keeper.total_supply(&ctx).unwrap(),
            30 + u128::from(u64::MAX)
        );
    }
}

//! Escrow keeper.

use crate::error::{EscrowError, Result};
use crate::expected_keepers::BankKeeper;
use crate::types::Escrow;
use minikeeper_collections::{BincodeValue, Map, Prefix, PrefixByte, Schema, SchemaBuilder, StringKey};
use minikeeper_core::{Address, AddressCodec, Coin};
use minikeeper_storage::{Context, StoreKey};
use std::sync::Arc;
use tracing::debug;

pub const MODULE_NAME: &str = "escrow";

pub const ESCROWS_KEY: PrefixByte = Prefix::from_u8(0);

/// Holds open escrows, keyed by the canonical form of the creator's address.
///
/// A creator has at most one open escrow. Its locked coins sit in the
/// module account ([`Keeper::module_account`]) until a claim pays the
/// wanted coins to the creator, at which point the record is deleted.
///
/// `claim_escrow` performs two transfers and a delete. The keeper does not
/// undo the first transfer if the second fails; run it inside
/// [`Context::branch`] (the msg server does) to get all-or-nothing claims.
pub struct Keeper {
    bank: Arc<dyn BankKeeper>,
    address_codec: Arc<dyn AddressCodec>,
    module_account: String,
    schema: Schema,
    pub escrows: Map<StringKey, BincodeValue<Escrow>>,
}

impl Keeper {
    pub fn new(bank: Arc<dyn BankKeeper>, address_codec: Arc<dyn AddressCodec>) -> Result<Self> {
        let mut sb = SchemaBuilder::new(StoreKey::new(MODULE_NAME));
        let escrows = sb.map(ESCROWS_KEY, "escrows", StringKey, BincodeValue::new());
        let schema = sb.build()?;

        Ok(Self {
            bank,
            address_codec,
            module_account: Address::module(MODULE_NAME).to_hex(),
            schema,
            escrows,
        })
    }

    /// Address holding every locked coin.
    pub fn module_account(&self) -> &str {
        &self.module_account
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn validate_address(&self, address: &str) -> Result<String> {
        self.address_codec
            .canonical_string(address)
            .map_err(|source| EscrowError::InvalidIdentifier {
                address: address.to_string(),
                source,
            })
    }

    fn validate_coin(&self, coin: &Coin) -> Result<()> {
        coin.validate()?;
        if coin.is_zero() {
            return Err(EscrowError::ZeroAmount);
        }
        if !self.bank.supports_denom(&coin.denom) {
            return Err(EscrowError::UnsupportedDenom(coin.denom.clone()));
        }
        Ok(())
    }

    /// Lock `locked` from `creator` until someone pays `wanted` for it.
    pub fn create_escrow(
        &self,
        ctx: &Context<'_>,
        creator: &str,
        locked: Coin,
        wanted: Coin,
    ) -> Result<()> {
        let creator = self.validate_address(creator)?;
        self.validate_coin(&locked)?;
        self.validate_coin(&wanted)?;

        if self.escrows.has(ctx, &creator)? {
            return Err(EscrowError::DuplicateEscrow(creator));
        }

        // Coins move before the record is written: an underfunded creator
        // leaves no record.
        self.bank
            .send_coins(ctx, &creator, &self.module_account, &locked)?;
        self.escrows.set(ctx, &creator, &Escrow { locked, wanted })?;
        debug!(%creator, "escrow created");
        Ok(())
    }

    /// The open escrow of `locker`.
    pub fn get_escrow(&self, ctx: &Context<'_>, locker: &str) -> Result<Escrow> {
        let locker = self.validate_address(locker)?;
        match self.escrows.get(ctx, &locker)? {
            Some(escrow) => Ok(escrow),
            None => Err(EscrowError::NotFound(locker)),
        }
    }

    /// Pay the wanted coins of `locker`'s escrow and receive its locked coins.
    ///
    /// Returns the settled escrow. A claim by the locker itself cancels the
    /// escrow: the wanted payment is a self-transfer.
    pub fn claim_escrow(&self, ctx: &Context<'_>, claimer: &str, locker: &str) -> Result<Escrow> {
        let claimer = self.validate_address(claimer)?;
        let locker = self.validate_address(locker)?;
        let escrow = self.get_escrow(ctx, &locker)?;

        self.bank.send_coins(ctx, &claimer, &locker, &escrow.wanted)?;
        self.bank
            .send_coins(ctx, &self.module_account, &claimer, &escrow.locked)?;
        self.escrows.remove(ctx, &locker)?;
        debug!(%claimer, %locker, "escrow claimed");
        Ok(escrow)
    }

    /// Every open escrow, by creator address.
    pub fn escrows(&self, ctx: &Context<'_>) -> Result<Vec<(String, Escrow)>> {
        Ok(self.escrows.export(ctx)?)
    }

    /// Sum of locked amounts over all open escrows.
    pub fn total_locked(&self, ctx: &Context<'_>) -> Result<u128> {
        let mut total: u128 = 0;
        self.escrows.walk(ctx, None, |_, escrow| -> Result<bool> {
            total += u128::from(escrow.locked.amount);
            Ok(false)
        })?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minikeeper_bank::{BankError, Keeper as BankModuleKeeper};
    use minikeeper_core::HexAddressCodec;
    use minikeeper_storage::MemStore;

    fn addr(byte: u8) -> String {
        Address([byte; 20]).to_hex()
    }

    fn setup() -> (Arc<BankModuleKeeper>, Keeper) {
        let codec: Arc<dyn AddressCodec> = Arc::new(HexAddressCodec);
        let bank = Arc::new(BankModuleKeeper::new(codec.clone(), &addr(0xAA), "stake").unwrap());
        let escrow = Keeper::new(bank.clone(), codec).unwrap();
        (bank, escrow)
    }

    fn stake(amount: u64) -> Coin {
        Coin::new("stake", amount)
    }

    #[test]
    fn test_create_moves_coins_to_module() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (bank, escrow) = setup();
        let alice = addr(1);
        bank.mint_coins(&ctx, &alice, 100).unwrap();

        escrow
            .create_escrow(&ctx, &alice, stake(60), stake(10))
            .unwrap();

        assert_eq!(bank.balance(&ctx, &alice).unwrap(), 40);
        assert_eq!(bank.balance(&ctx, escrow.module_account()).unwrap(), 60);
        assert_eq!(escrow.get_escrow(&ctx, &alice).unwrap().wanted, stake(10));
        assert_eq!(escrow.total_locked(&ctx).unwrap(), 60);
    }

    #[test]
    fn test_duplicate_escrow() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (bank, escrow) = setup();
        let alice = addr(1);
        bank.mint_coins(&ctx, &alice, 100).unwrap();

        escrow.create_escrow(&ctx, &alice, stake(10), stake(1)).unwrap();
        assert!(matches!(
            escrow.create_escrow(&ctx, &alice, stake(10), stake(1)),
            Err(EscrowError::DuplicateEscrow(_))
        ));
        assert_eq!(bank.balance(&ctx, &alice).unwrap(), 90);
    }

    #[test]
    fn test_duplicate_escrow_under_another_spelling() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (bank, escrow) = setup();
        let alice = addr(0xAB);
        bank.mint_coins(&ctx, &alice, 100).unwrap();

        escrow.create_escrow(&ctx, &alice, stake(10), stake(1)).unwrap();
        for spelling in [alice.to_uppercase(), alice[2..].to_string()] {
            assert!(matches!(
                escrow.create_escrow(&ctx, &spelling, stake(10), stake(1)),
                Err(EscrowError::DuplicateEscrow(_))
            ));
        }
        assert_eq!(escrow.escrows(&ctx).unwrap().len(), 1);
        assert_eq!(bank.balance(&ctx, &alice).unwrap(), 90);
        assert!(escrow.get_escrow(&ctx, &alice[2..]).is_ok());
    }

    #[test]
    fn test_create_without_funds_leaves_no_record() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (_bank, escrow) = setup();
        let alice = addr(1);

        assert!(matches!(
            escrow.create_escrow(&ctx, &alice, stake(10), stake(1)),
            Err(EscrowError::Bank(BankError::InsufficientBalance { .. }))
        ));
        assert!(escrow.get_escrow(&ctx, &alice).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_validates_coins() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (_bank, escrow) = setup();
        let alice = addr(1);

        assert!(matches!(
            escrow.create_escrow(&ctx, &alice, stake(0), stake(1)),
            Err(EscrowError::ZeroAmount)
        ));
        assert!(matches!(
            escrow.create_escrow(&ctx, &alice, stake(1), Coin::new("atom", 1)),
            Err(EscrowError::UnsupportedDenom(_))
        ));
        assert!(matches!(
            escrow.create_escrow(&ctx, &alice, stake(1), Coin::new("A", 1)),
            Err(EscrowError::InvalidCoin(_))
        ));
        assert!(matches!(
            escrow.create_escrow(&ctx, "alice", stake(1), stake(1)),
            Err(EscrowError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_claim_once() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (bank, escrow) = setup();
        let (alice, bob) = (addr(1), addr(2));
        bank.mint_coins(&ctx, &alice, 100).unwrap();
        bank.mint_coins(&ctx, &bob, 30).unwrap();

        escrow
            .create_escrow(&ctx, &alice, stake(100), stake(25))
            .unwrap();
        let settled = escrow.claim_escrow(&ctx, &bob, &alice).unwrap();
        assert_eq!(settled.locked, stake(100));

        assert_eq!(bank.balance(&ctx, &alice).unwrap(), 25);
        assert_eq!(bank.balance(&ctx, &bob).unwrap(), 105);
        assert_eq!(bank.balance(&ctx, escrow.module_account()).unwrap(), 0);

        assert!(escrow
            .claim_escrow(&ctx, &bob, &alice)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_claim_with_other_spellings() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (bank, escrow) = setup();
        let (alice, bob) = (addr(0xAB), addr(0xBC));
        bank.mint_coins(&ctx, &alice, 20).unwrap();
        bank.mint_coins(&ctx, &bob, 5).unwrap();

        escrow.create_escrow(&ctx, &alice, stake(20), stake(5)).unwrap();
        escrow
            .claim_escrow(&ctx, &bob[2..], &alice.to_uppercase())
            .unwrap();

        assert_eq!(bank.balance(&ctx, &alice).unwrap(), 5);
        assert_eq!(bank.balance(&ctx, &bob).unwrap(), 20);
        assert!(escrow.escrows(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_claim_missing_escrow() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (_bank, escrow) = setup();

        assert!(matches!(
            escrow.claim_escrow(&ctx, &addr(2), &addr(1)),
            Err(EscrowError::NotFound(_))
        ));
    }

    #[test]
    fn test_self_claim_cancels() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let (bank, escrow) = setup();
        let alice = addr(1);
        bank.mint_coins(&ctx, &alice, 60).unwrap();

        escrow.create_escrow(&ctx, &alice, stake(50), stake(5)).unwrap();
        escrow.claim_escrow(&ctx, &alice, &alice).unwrap();
        assert_eq!(bank.balance(&ctx, &alice).unwrap(), 60);
        assert!(escrow.escrows(&ctx).unwrap().is_empty());
    }
}

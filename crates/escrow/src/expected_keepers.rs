//! Collaborators the escrow module needs from other modules.

use minikeeper_bank::Keeper as BankModuleKeeper;
use minikeeper_core::Coin;
use minikeeper_storage::Context;

/// Moves coins between accounts.
pub trait BankKeeper: Send + Sync {
    fn send_coins(
        &self,
        ctx: &Context<'_>,
        from: &str,
        to: &str,
        coin: &Coin,
    ) -> minikeeper_bank::Result<()>;

    fn balance(&self, ctx: &Context<'_>, address: &str) -> minikeeper_bank::Result<u64>;

    /// Whether coins of `denom` can be held and moved at all.
    fn supports_denom(&self, denom: &str) -> bool;
}

impl BankKeeper for BankModuleKeeper {
    fn send_coins(
        &self,
        ctx: &Context<'_>,
        from: &str,
        to: &str,
        coin: &Coin,
    ) -> minikeeper_bank::Result<()> {
        BankModuleKeeper::send_coins(self, ctx, from, to, coin)
    }

    fn balance(&self, ctx: &Context<'_>, address: &str) -> minikeeper_bank::Result<u64> {
        BankModuleKeeper::balance(self, ctx, address)
    }

    fn supports_denom(&self, denom: &str) -> bool {
        self.denom() == denom
    }
}

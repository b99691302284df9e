//! Genesis import and export.

use crate::error::Result;
use crate::keeper::Keeper;
use crate::types::{CounterEntry, GenesisState};
use minikeeper_storage::Context;
use tracing::info;

impl Keeper {
    /// Load `genesis` into an empty store.
    pub fn init_genesis(&self, ctx: &Context<'_>, genesis: &GenesisState) -> Result<()> {
        genesis.validate()?;
        self.set_params(ctx, &genesis.params)?;
        for entry in &genesis.counters {
            let address = self.validate_address(&entry.address)?;
            self.counter.set(ctx, &address, &entry.count)?;
        }
        info!(counters = genesis.counters.len(), "example genesis loaded");
        Ok(())
    }

    /// Dump params and counters in the shape [`init_genesis`] accepts.
    ///
    /// [`init_genesis`]: Keeper::init_genesis
    pub fn export_genesis(&self, ctx: &Context<'_>) -> Result<GenesisState> {
        let counters = self
            .counters(ctx)?
            .into_iter()
            .map(|(address, count)| CounterEntry { address, count })
            .collect();
        Ok(GenesisState {
            params: self.get_params(ctx)?,
            counters,
        })
    }
}

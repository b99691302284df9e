//! Single-value collections.

use crate::codec::ValueCodec;
use crate::error::Result;
use crate::schema::Binding;
use minikeeper_storage::{Context, KvStore};

/// A collection holding at most one value, stored at its prefix.
#[derive(Debug, Clone)]
pub struct Item<VC> {
    binding: Binding,
    value_codec: VC,
}

impl<VC: ValueCodec> Item<VC> {
    pub(crate) fn new(binding: Binding, value_codec: VC) -> Self {
        Self {
            binding,
            value_codec,
        }
    }

    pub fn name(&self) -> &str {
        self.binding.name()
    }

    /// Get the value, or `None` if it was never set.
    pub fn get(&self, ctx: &Context<'_>) -> Result<Option<VC::Value>> {
        let store = self.binding.store(ctx)?;
        match store.get(self.binding.prefix().as_bytes())? {
            Some(bytes) => {
                let value = self
                    .value_codec
                    .decode(&bytes)
                    .map_err(|e| self.binding.decode_error(e))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the value, failing with `NotFound` if it was never set.
    pub fn get_or_err(&self, ctx: &Context<'_>) -> Result<VC::Value> {
        self.get(ctx)?
            .ok_or_else(|| self.binding.not_found("<item>".to_string()))
    }

    /// Overwrite the value.
    pub fn set(&self, ctx: &Context<'_>, value: &VC::Value) -> Result<()> {
        let bytes = self
            .value_codec
            .encode(value)
            .map_err(|e| self.binding.encode_error(e))?;
        let store = self.binding.store(ctx)?;
        store.set(self.binding.prefix().as_bytes(), &bytes)?;
        Ok(())
    }

    pub fn has(&self, ctx: &Context<'_>) -> Result<bool> {
        let store = self.binding.store(ctx)?;
        Ok(store.has(self.binding.prefix().as_bytes())?)
    }

    /// Clear the value. Clearing an unset item is a no-op.
    pub fn remove(&self, ctx: &Context<'_>) -> Result<()> {
        let store = self.binding.store(ctx)?;
        store.delete(self.binding.prefix().as_bytes())?;
        Ok(())
    }
}

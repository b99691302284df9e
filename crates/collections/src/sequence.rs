//! Monotonic counters for minting identifiers.

use crate::codec::Uint64Value;
use crate::error::{CollectionError, Result};
use crate::item::Item;
use minikeeper_storage::Context;

/// A `u64` counter. Unset counters start at 0.
#[derive(Debug, Clone)]
pub struct Sequence {
    item: Item<Uint64Value>,
}

impl Sequence {
    pub(crate) fn new(item: Item<Uint64Value>) -> Self {
        Self { item }
    }

    pub fn name(&self) -> &str {
        self.item.name()
    }

    /// Current value without advancing.
    pub fn peek(&self, ctx: &Context<'_>) -> Result<u64> {
        Ok(self.item.get(ctx)?.unwrap_or(0))
    }

    /// Return the current value and store its successor.
    ///
    /// The read and write happen back to back in the caller's context, so
    /// callers in one context never see the same value twice.
    pub fn next(&self, ctx: &Context<'_>) -> Result<u64> {
        let current = self.peek(ctx)?;
        let following = current
            .checked_add(1)
            .ok_or_else(|| CollectionError::Overflow(self.name().to_string()))?;
        self.item.set(ctx, &following)?;
        Ok(current)
    }

    pub fn set(&self, ctx: &Context<'_>, value: u64) -> Result<()> {
        self.item.set(ctx, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;
    use minikeeper_storage::{MemStore, StoreKey};

    fn sequence() -> Sequence {
        let mut sb = SchemaBuilder::new(StoreKey::new("test"));
        let seq = sb.sequence(0u8, "ids");
        sb.build().unwrap();
        seq
    }

    #[test]
    fn test_next_counts_from_zero() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let seq = sequence();

        let ids: Vec<u64> = (0..5).map(|_| seq.next(&ctx).unwrap()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(seq.peek(&ctx).unwrap(), 5);
    }

    #[test]
    fn test_set_and_overflow() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let seq = sequence();

        seq.set(&ctx, u64::MAX - 1).unwrap();
        assert_eq!(seq.next(&ctx).unwrap(), u64::MAX - 1);
        assert!(matches!(seq.next(&ctx), Err(CollectionError::Overflow(_))));
        assert_eq!(seq.peek(&ctx).unwrap(), u64::MAX);
    }
}

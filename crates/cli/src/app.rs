//! Host state: configuration, the sled store and every module keeper.

use anyhow::{bail, Context as _, Result};
use minikeeper_collections::{Item, SchemaBuilder, Uint64Value};
use minikeeper_core::{AddressCodec, HexAddressCodec};
use minikeeper_example::GenesisState;
use minikeeper_storage::{commit_hash, Context, Storage, StoreKey};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const CONFIG_FILE: &str = "config.json";
pub const DB_DIR: &str = "db";

/// Contents of `<data_dir>/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address allowed to mint coins and update params.
    pub authority: String,
    pub denom: String,
    /// Example module state loaded at init.
    pub example: GenesisState,
}

impl Config {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path(data_dir);
        let raw = fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read {}. Did you run 'minikeeper init'?",
                path.display()
            )
        })?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn save(&self, data_dir: &Path) -> Result<PathBuf> {
        let path = Self::path(data_dir);
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Block height bookkeeping, kept in its own `chain` store.
struct Chain {
    height: Item<Uint64Value>,
}

impl Chain {
    fn new() -> Result<Self> {
        let mut sb = SchemaBuilder::new(StoreKey::new("chain"));
        let height = sb.item(0u8, "height", Uint64Value);
        sb.build()?;
        Ok(Self { height })
    }
}

/// An opened data directory with all module keepers wired up.
pub struct App {
    pub config: Config,
    pub storage: Storage,
    pub bank: Arc<minikeeper_bank::Keeper>,
    pub example: minikeeper_example::Keeper,
    pub escrow: minikeeper_escrow::Keeper,
    chain: Chain,
}

impl App {
    /// Build keepers from `config` over the store in `data_dir`.
    pub fn open_with(data_dir: &Path, config: Config) -> Result<Self> {
        let codec: Arc<dyn AddressCodec> = Arc::new(HexAddressCodec);
        let bank = Arc::new(
            minikeeper_bank::Keeper::new(codec.clone(), &config.authority, &config.denom)
                .context("Invalid bank configuration")?,
        );
        let example = minikeeper_example::Keeper::new(codec.clone(), &config.authority)
            .context("Invalid example configuration")?;
        let escrow = minikeeper_escrow::Keeper::new(bank.clone(), codec)?;

        let storage = Storage::open(data_dir.join(DB_DIR))
            .with_context(|| format!("Failed to open storage in {}", data_dir.display()))?;

        Ok(Self {
            config,
            storage,
            bank,
            example,
            escrow,
            chain: Chain::new()?,
        })
    }

    /// Open an initialised data directory.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        Self::open_with(data_dir, config)
    }

    /// Height of the last committed block; 0 right after init.
    pub fn height(&self) -> Result<u64> {
        let ctx = Context::new(&self.storage);
        Ok(self.chain.height.get(&ctx)?.unwrap_or(0))
    }

    /// Read-only context at the current height.
    pub fn query_context(&self) -> Result<Context<'_>> {
        Ok(Context::new(&self.storage).with_block_height(self.height()?))
    }

    /// Run `f` as the next block.
    ///
    /// The height bump and every write `f` makes are committed together and
    /// flushed to disk. If `f` fails nothing is written and the height stays.
    pub fn execute<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Context<'_>) -> Result<T>,
    {
        let height = self.height()? + 1;
        let ctx = Context::new(&self.storage).with_block_height(height);
        let value = ctx.branch(|ctx| -> Result<T> {
            self.chain.height.set(ctx, &height)?;
            f(ctx)
        })?;
        self.storage.flush()?;
        debug!(height, "block committed");
        Ok(value)
    }

    /// Load genesis state into a fresh store at height 0.
    pub fn init_genesis(&self) -> Result<()> {
        if self.chain.height.get(&Context::new(&self.storage))?.is_some() {
            bail!("Store is already initialised");
        }
        let ctx = Context::new(&self.storage);
        ctx.branch(|ctx| -> Result<()> {
            self.chain.height.set(ctx, &0)?;
            self.example.init_genesis(ctx, &self.config.example)?;
            Ok(())
        })?;
        self.storage.flush()?;
        Ok(())
    }

    /// Hex digest over every stored key and value.
    pub fn state_hash(&self) -> Result<String> {
        Ok(commit_hash(&self.storage)?.to_string())
    }
}

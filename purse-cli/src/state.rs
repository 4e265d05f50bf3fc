use anyhow::{Context, Result};
use chrono::Datelike;
use purse_core::today_in;
use purse_finance::BudgetStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;

/// `$PURSE_HOME`, or `~/.purse` when unset.
pub fn purse_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PURSE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".purse"))
}

pub fn ensure_purse_home() -> Result<PathBuf> {
    let dir = purse_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn store_path() -> Result<PathBuf> {
    Ok(ensure_purse_home()?.join("budget.json"))
}

pub fn load_store(cfg: &Config) -> Result<BudgetStore> {
    load_store_from(&store_path()?, cfg)
}

pub fn save_store(store: &BudgetStore) -> Result<()> {
    save_store_to(&store_path()?, store)
}

/// A missing file yields an empty store in the configured currency and the current year.
/// A present file must hold a store that passes the same checks as live edits.
pub fn load_store_from(path: &Path, cfg: &Config) -> Result<BudgetStore> {
    if !path.exists() {
        let year = today_in(&cfg.display.timezone)?.year();
        debug!(path = %path.display(), year, "no saved budget, starting fresh");
        return Ok(BudgetStore::new(cfg.display.currency, year)?);
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_store_to(path: &Path, store: &BudgetStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "budget saved");
    Ok(())
}

//! # watchlist — Static + Dynamic Watchlist
//!
//! รายชื่อ symbol ที่ Sniper Loop จะ scan:
//! - **Static** — large caps ชุดตายตัว (compile-time)
//! - **Dynamic** — symbols ที่ brain อื่น (เช่น Gossip Brain) เพิ่มเข้ามา
//!   persist ลง dynamic_watchlist.json
//!
//! `load()` คืน union ของสองชุด (dedup + canonicalize แล้ว)

use tracing::info;

use crate::error::StoreError;
use crate::models::canonical_symbol;
use crate::store::JsonStore;

/// Large caps ชุดตั้งต้น (NSE)
pub const STATIC_WATCHLIST: &[&str] = &[
    "RELIANCE.NS",
    "TCS.NS",
    "HDFCBANK.NS",
    "INFY.NS",
    "ICICIBANK.NS",
    "SBIN.NS",
    "TATAMOTORS.NS",
    "ITC.NS",
    "ADANIENT.NS",
    "COALINDIA.NS",
    "ZOMATO.NS",
    "PAYTM.NS",
];

pub struct Watchlist {
    store: JsonStore<Vec<String>>,
    exchange_suffix: String,
}

impl Watchlist {
    pub fn new(path: impl Into<std::path::PathBuf>, exchange_suffix: impl Into<String>) -> Self {
        Self {
            store: JsonStore::new(path),
            exchange_suffix: exchange_suffix.into(),
        }
    }

    /// Static ∪ Dynamic — ลำดับคงที่ (static ก่อน ตามด้วย dynamic ที่ sort แล้ว)
    pub fn load(&self) -> Vec<String> {
        let mut combined: Vec<String> = STATIC_WATCHLIST.iter().map(|s| s.to_string()).collect();

        let mut dynamic = self.store.load();
        dynamic.sort();
        for symbol in dynamic {
            if !combined.contains(&symbol) {
                combined.push(symbol);
            }
        }

        combined
    }

    /// เพิ่ม symbol จาก brain อื่น — คืน `false` ถ้ามีอยู่แล้ว
    pub fn add(&self, raw_symbol: &str) -> Result<bool, StoreError> {
        let symbol = canonical_symbol(raw_symbol, &self.exchange_suffix);

        if STATIC_WATCHLIST.contains(&symbol.as_str()) {
            return Ok(false);
        }

        let mut dynamic = self.store.load();
        if dynamic.contains(&symbol) {
            return Ok(false);
        }

        dynamic.push(symbol.clone());
        self.store.save(&dynamic)?;

        info!(%symbol, "➕ added to dynamic watchlist");
        Ok(true)
    }

    /// ถอด symbol ออกจาก dynamic list — คืน `false` ถ้าไม่เคยอยู่
    pub fn remove(&self, raw_symbol: &str) -> Result<bool, StoreError> {
        let symbol = canonical_symbol(raw_symbol, &self.exchange_suffix);

        let mut dynamic = self.store.load();
        let before = dynamic.len();
        dynamic.retain(|s| s != &symbol);

        if dynamic.len() == before {
            return Ok(false);
        }

        self.store.save(&dynamic)?;
        info!(%symbol, "➖ removed from dynamic watchlist");
        Ok(true)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn watchlist(name: &str) -> Watchlist {
        let path = std::env::temp_dir().join(format!(
            "ghostledger-watchlist-{}-{name}.json",
            uuid::Uuid::new_v4()
        ));
        Watchlist::new(path, ".NS")
    }

    fn cleanup(w: &Watchlist) {
        let _ = std::fs::remove_file(w.store.path());
    }

    #[test]
    fn test_load_defaults_to_static_list() {
        let w = watchlist("static");
        let symbols = w.load();
        assert_eq!(symbols.len(), STATIC_WATCHLIST.len());
        assert!(symbols.contains(&"RELIANCE.NS".to_string()));
        cleanup(&w);
    }

    #[test]
    fn test_add_canonicalizes_and_dedupes() {
        let w = watchlist("add");

        assert!(w.add("vedl").unwrap());
        assert!(!w.add("VEDL.NS").unwrap()); // ซ้ำกับที่เพิ่งเพิ่ม
        assert!(!w.add("reliance").unwrap()); // ซ้ำกับ static

        let symbols = w.load();
        assert_eq!(symbols.len(), STATIC_WATCHLIST.len() + 1);
        assert!(symbols.contains(&"VEDL.NS".to_string()));
        cleanup(&w);
    }

    #[test]
    fn test_remove_only_touches_dynamic() {
        let w = watchlist("remove");

        w.add("VEDL").unwrap();
        assert!(w.remove("vedl").unwrap());
        assert!(!w.remove("VEDL").unwrap()); // ออกไปแล้ว
        assert!(!w.remove("TCS").unwrap()); // static ถอดไม่ได้

        assert_eq!(w.load().len(), STATIC_WATCHLIST.len());
        cleanup(&w);
    }
}

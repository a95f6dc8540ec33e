//! # engine::sniper
//!
//! **Sniper Engine** — ตัดสินใจจาก technical trigger + Market Memory
//!
//! ## ลำดับการตรวจสอบ (ต่อ symbol)
//! ```text
//! 1. คำนวณ dynamic buy threshold จาก Confluence Score:
//!      score >= 70 → 40  (ข่าวดี → ยอมซื้อ dip ตื้นขึ้น)
//!      score <= 30 → 20  (ข่าวร้าย → ต้องรอ dip ลึกกว่าเดิม)
//!      otherwise   → 30
//! 2. RSI < threshold → BUY … ยกเว้น score < 20 ⇒ VETO ทิ้งทั้ง trade
//!    (กันการซื้อสวน sentiment แรงๆ แม้ technical จะ dip จริง)
//! 3. RSI > 70 → SELL เสมอ — sentiment ไม่เคย gate ทางออก
//! ```
//!
//! ข้อ 3 เป็น asymmetry ที่ตั้งใจ: ระบบเอียงไปทาง capital preservation —
//! เข้ายากขึ้นได้ แต่ออกได้เสมอ

use crate::config::{env_f64, env_i32};

// ─── Config ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SniperConfig {
    /// RSI buy threshold ปกติ
    pub base_buy_rsi: f64,
    /// Threshold เมื่อ score สูง (เข้าง่ายขึ้น)
    pub aggressive_buy_rsi: f64,
    /// Threshold เมื่อ score ต่ำ (เข้ายากขึ้น)
    pub defensive_buy_rsi: f64,
    /// RSI sell threshold (คงที่ ไม่ขึ้นกับ sentiment)
    pub sell_rsi: f64,
    /// Score ตั้งแต่เท่านี้ขึ้นไป ⇒ ใช้ aggressive threshold
    pub score_aggressive: i32,
    /// Score ตั้งแต่เท่านี้ลงมา ⇒ ใช้ defensive threshold
    pub score_defensive: i32,
    /// Score ต่ำกว่านี้ ⇒ veto ห้ามซื้อเด็ดขาด
    pub score_veto: i32,
}

impl Default for SniperConfig {
    fn default() -> Self {
        Self {
            base_buy_rsi: 30.0,
            aggressive_buy_rsi: 40.0,
            defensive_buy_rsi: 20.0,
            sell_rsi: 70.0,
            score_aggressive: 70,
            score_defensive: 30,
            score_veto: 20,
        }
    }
}

impl SniperConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            base_buy_rsi: env_f64("SNIPER_BUY_RSI", d.base_buy_rsi),
            aggressive_buy_rsi: env_f64("SNIPER_BUY_RSI_AGGRESSIVE", d.aggressive_buy_rsi),
            defensive_buy_rsi: env_f64("SNIPER_BUY_RSI_DEFENSIVE", d.defensive_buy_rsi),
            sell_rsi: env_f64("SNIPER_SELL_RSI", d.sell_rsi),
            score_aggressive: env_i32("SNIPER_SCORE_AGGRESSIVE", d.score_aggressive),
            score_defensive: env_i32("SNIPER_SCORE_DEFENSIVE", d.score_defensive),
            score_veto: env_i32("SNIPER_SCORE_VETO", d.score_veto),
        }
    }
}

// ─── Verdict ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// RSI หลุด threshold + sentiment ไม่แย่ → เข้าซื้อ
    Buy { rsi: f64, threshold: f64, score: i32 },
    /// RSI overbought → ออกเสมอ
    Sell { rsi: f64, score: i32 },
    /// Technical dip จริง แต่ sentiment แย่เกิน → ข้าม trade ทั้งหมด
    Vetoed { rsi: f64, score: i32 },
    /// ไม่มีอะไรต้องทำ
    Hold,
}

// ─── Evaluation ───────────────────────────────────────────────────────────────

/// Dynamic buy threshold ตาม Confluence Score
pub fn buy_threshold(score: i32, config: &SniperConfig) -> f64 {
    if score >= config.score_aggressive {
        config.aggressive_buy_rsi
    } else if score <= config.score_defensive {
        config.defensive_buy_rsi
    } else {
        config.base_buy_rsi
    }
}

/// ตัดสิน 1 symbol — pure function, deterministic, ไม่แตะ I/O
pub fn evaluate(rsi: f64, score: i32, config: &SniperConfig) -> Verdict {
    let threshold = buy_threshold(score, config);

    if rsi < threshold {
        // FINAL FILTER: sentiment แย่สุดขีด → ไม่ซื้อแม้ technical จะเข้า
        if score < config.score_veto {
            return Verdict::Vetoed { rsi, score };
        }
        return Verdict::Buy { rsi, threshold, score };
    }

    if rsi > config.sell_rsi {
        return Verdict::Sell { rsi, score };
    }

    Verdict::Hold
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SniperConfig {
        SniperConfig::default()
    }

    #[test]
    fn test_threshold_widens_on_good_news() {
        assert_eq!(buy_threshold(70, &config()), 40.0);
        assert_eq!(buy_threshold(100, &config()), 40.0);
    }

    #[test]
    fn test_threshold_tightens_on_bad_news() {
        assert_eq!(buy_threshold(30, &config()), 20.0);
        assert_eq!(buy_threshold(0, &config()), 20.0);
    }

    #[test]
    fn test_threshold_default_in_neutral_band() {
        assert_eq!(buy_threshold(50, &config()), 30.0);
        assert_eq!(buy_threshold(69, &config()), 30.0);
        assert_eq!(buy_threshold(31, &config()), 30.0);
    }

    #[test]
    fn test_buy_on_dip_with_neutral_sentiment() {
        let verdict = evaluate(25.0, 50, &config());
        assert_eq!(verdict, Verdict::Buy { rsi: 25.0, threshold: 30.0, score: 50 });
    }

    #[test]
    fn test_aggressive_buy_on_shallow_dip() {
        // score 80 → threshold 40 → RSI 35 ก็เข้าได้
        let verdict = evaluate(35.0, 80, &config());
        assert_eq!(verdict, Verdict::Buy { rsi: 35.0, threshold: 40.0, score: 80 });
    }

    #[test]
    fn test_veto_on_strongly_negative_sentiment() {
        // score 15 → threshold 20 → RSI 18 ผ่าน threshold แต่โดน veto
        let verdict = evaluate(18.0, 15, &config());
        assert_eq!(verdict, Verdict::Vetoed { rsi: 18.0, score: 15 });
    }

    #[test]
    fn test_moderate_dip_with_bad_news_is_hold() {
        // score 25 → threshold 20 → RSI 28 ไม่ถึง dip ที่ลึกพอ
        assert_eq!(evaluate(28.0, 25, &config()), Verdict::Hold);
    }

    #[test]
    fn test_sell_ignores_sentiment() {
        // sentiment แย่สุด (score 0) ก็ยังขายได้เสมอ
        let verdict = evaluate(75.0, 0, &config());
        assert_eq!(verdict, Verdict::Sell { rsi: 75.0, score: 0 });
    }

    #[test]
    fn test_hold_in_middle_band() {
        assert_eq!(evaluate(55.0, 50, &config()), Verdict::Hold);
        assert_eq!(evaluate(70.0, 50, &config()), Verdict::Hold); // ต้อง > 70 จริงๆ
    }
}

//! # brain::prompt — สร้าง Prompt สำหรับ AI
//!
//! ทุก prompt บังคับให้ AI ตอบเป็น strict JSON ที่ parse ได้ทันที

/// Prompt สรุป macro regime จาก indicator text block
///
/// AI ต้องตอบ `{"trend": "BULLISH"|"BEARISH"|"NEUTRAL", "report": "..."}`
pub fn build_macro_prompt(indicator_summary: &str) -> String {
    format!(
        r#"Analyze these macro indicators for the Indian market:

{indicator_summary}

STEP 1: Determine the overall market trend (BULLISH, BEARISH, or NEUTRAL).
STEP 2: Write a short strategy report.

**CRITICAL**: Respond with ONLY a valid JSON object. No explanations, no markdown, no code fences.

## Required JSON Format
{{
  "trend": "BULLISH",
  "report": "🌍 **MACRO REGIME:** ... (the full report here)"
}}

Respond with JSON only:"#
    )
}

/// Prompt ตัดสิน sentiment ของ 1 headline ต่อ 1 symbol
///
/// AI ต้องตอบ `{"sentiment": "POSITIVE"|"NEGATIVE"|"NEUTRAL"}`
pub fn build_headline_prompt(symbol: &str, headline: &str) -> String {
    format!(
        r#"You are analyzing news impact on the stock {symbol}.

Headline: "{headline}"

Classify the likely price impact as POSITIVE, NEGATIVE, or NEUTRAL.

**CRITICAL**: Respond with ONLY a valid JSON object. No explanations, no markdown, no code fences.

## Required JSON Format
{{
  "sentiment": "POSITIVE"
}}

Respond with JSON only:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_prompt_embeds_indicators() {
        let prompt = build_macro_prompt("- Nifty P/E: 22.1\n- USDINR: 83.2");
        assert!(prompt.contains("Nifty P/E"));
        assert!(prompt.contains("\"trend\""));
    }

    #[test]
    fn test_headline_prompt_embeds_symbol() {
        let prompt = build_headline_prompt("TCS.NS", "TCS wins record deal");
        assert!(prompt.contains("TCS.NS"));
        assert!(prompt.contains("record deal"));
    }
}

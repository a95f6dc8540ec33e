//! # notify — Telegram Notification Sink
//!
//! ส่งข้อความแจ้งเตือนเข้า chat — best-effort เท่านั้น:
//! ไม่ได้ config ⇒ ปิดเงียบๆ, ส่งพลาด ⇒ `warn!` แล้วไปต่อ
//! การแจ้งเตือนหลุดไม่มีวันทำให้ trade หรือ scan ล้มเหลว

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;

#[derive(Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// ยิงข้อความเข้า Telegram (Markdown)
pub async fn send_telegram(client: &reqwest::Client, config: &Config, text: &str) {
    let telegram = match &config.telegram {
        Some(t) => t,
        None => {
            debug!("telegram not configured — notification dropped");
            return;
        }
    };

    let url = format!(
        "https://api.telegram.org/bot{}/sendMessage",
        telegram.bot_token
    );
    let payload = SendMessagePayload {
        chat_id: &telegram.chat_id,
        text,
        parse_mode: "Markdown",
        disable_web_page_preview: true,
    };

    let result = client
        .post(&url)
        .json(&payload)
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => {
            debug!("telegram notification delivered");
        }
        Ok(resp) => {
            warn!(status = %resp.status(), "telegram rejected notification");
        }
        Err(e) => {
            warn!(error = %e, "telegram unreachable — notification lost");
        }
    }
}

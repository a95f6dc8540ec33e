//! # store — JSON File Persistence
//!
//! ไฟล์ JSON แบนๆ หนึ่งไฟล์ต่อหนึ่ง record — อ่านทั้งก้อน เขียนทั้งก้อน
//!
//! ## Failure semantics
//! - `load*`: ไฟล์หาย / อ่านไม่ได้ / JSON พัง ⇒ ได้ค่า default กลับไป
//!   ("ยังไม่มีข้อมูล" ไม่ใช่ fatal error) — เขียนทับทั้งก้อนในรอบถัดไป
//! - `save`: เขียนลง temp file แล้ว rename ทับ — all-or-nothing,
//!   ไม่มีทางเห็น partial write
//!
//! ไม่มี cross-process lock: intended usage คือ schedule ทีละ run,
//! ถ้า run ซ้อนกันจริง consistency คือ last-writer-wins เท่านั้น

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;

pub struct JsonStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// โหลด record — ถ้าไฟล์หาย/พัง ⇒ สร้างจาก `fallback`
    pub fn load_or(&self, fallback: impl FnOnce() -> T) -> T {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(record) => record,
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "⚠️ corrupt record — treating as empty state"
                    );
                    fallback()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted record yet");
                fallback()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "⚠️ record unreadable");
                fallback()
            }
        }
    }

    /// เขียน record ทั้งก้อน (atomic: temp file + rename)
    pub fn save(&self, record: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record)?;

        // rename บน filesystem เดียวกันเป็น atomic — ไฟล์เดิมอยู่ครบ
        // จนวินาทีที่ไฟล์ใหม่เขียนเสร็จสมบูรณ์
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path().display(), "record persisted");
        Ok(())
    }
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn load(&self) -> T {
        self.load_or(T::default)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

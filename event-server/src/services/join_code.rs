//! 加入码生成
//!
//! 4 位大写字母数字短码，生成后查库确认唯一；连续冲突时
//! 扩展到 6 位再试，避免码空间逼近饱和时死循环。

use rand::Rng;

use crate::db::repository::EventRepository;
use crate::utils::{AppError, AppResult};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 短码长度
pub const CODE_LEN: usize = 4;
/// 冲突重试次数，超过后改用长码
const MAX_SHORT_ATTEMPTS: usize = 8;
/// 退化长码长度
const WIDE_CODE_LEN: usize = 6;

/// 生成指定长度的随机码
pub fn random_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// 生成一个未被占用的加入码
///
/// generate-check-retry：先试 4 位码，连续 8 次冲突后改用 6 位码。
pub async fn generate_join_code(events: &EventRepository) -> AppResult<String> {
    for _ in 0..MAX_SHORT_ATTEMPTS {
        let code = random_code(CODE_LEN);
        if !events.code_exists(&code).await? {
            return Ok(code);
        }
    }

    // Short code space is crowded, widen
    for _ in 0..MAX_SHORT_ATTEMPTS {
        let code = random_code(WIDE_CODE_LEN);
        if !events.code_exists(&code).await? {
            return Ok(code);
        }
    }

    Err(AppError::internal("Unable to allocate a unique join code"))
}

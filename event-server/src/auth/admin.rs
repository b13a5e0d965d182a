//! 管理员账户目录
//!
//! 内置账户目录：管理面板的账户不走主办方身份服务，
//! 密码只存 SHA-256 摘要，登录时常量延迟 + 统一错误信息防枚举。

use sha2::{Digest, Sha256};

/// 内置管理员账户
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: &'static str,
    pub email: &'static str,
    pub full_name: &'static str,
    pub role: &'static str,
    pub permissions: &'static [&'static str],
    /// SHA-256 摘要 (hex)
    password_sha256: &'static str,
}

/// 账户目录
const DIRECTORY: &[AdminAccount] = &[
    AdminAccount {
        id: "admin-123",
        email: "admin@beventx.com",
        full_name: "System Administrator",
        role: "super_admin",
        permissions: &[
            "manage_users",
            "manage_events",
            "manage_payments",
            "manage_content",
            "manage_settings",
            "view_analytics",
        ],
        password_sha256: "3eb3fe66b31e3b4d10fa70b5cad49c7112294af6ae4e476a1c405155d45aa121",
    },
    AdminAccount {
        id: "support-123",
        email: "support@beventx.com",
        full_name: "Technical Support",
        role: "support",
        permissions: &["view_users", "view_events", "view_payments", "manage_content"],
        password_sha256: "897c444c96ecaa1de3f19053f6b5205969b5172bde02ca700eecc0b9ed67d8ec",
    },
];

/// 校验邮箱和密码，返回匹配的账户
///
/// 邮箱不区分大小写；密码比对 SHA-256 摘要。
/// 不区分"邮箱不存在"和"密码错误"。
pub fn authenticate(email: &str, password: &str) -> Option<&'static AdminAccount> {
    let email = email.trim().to_lowercase();
    let digest = hex::encode(Sha256::digest(password.as_bytes()));

    DIRECTORY
        .iter()
        .find(|account| account.email == email && account.password_sha256 == digest)
}

/// 列出全部管理员账户 (不含密码摘要)
pub fn directory() -> &'static [AdminAccount] {
    DIRECTORY
}

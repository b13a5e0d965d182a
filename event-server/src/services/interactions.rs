//! 瞬态互动状态
//!
//! 点赞、收藏、评论只存进程内存，不落库：服务重启即清零。
//! 使用 DashMap 做无锁并发访问，key 为 "post:id" 字符串。

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// 一条评论
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub guest_name: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
}

/// 一个帖子的互动状态
#[derive(Debug, Default)]
struct PostInteractions {
    likes: HashSet<String>,
    saves: HashSet<String>,
    comments: Vec<Comment>,
}

/// 对外快照 (按请求宾客视角计算 liked/saved)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSnapshot {
    pub like_count: usize,
    pub liked: bool,
    pub saved: bool,
    pub comments: Vec<Comment>,
}

/// 瞬态互动存储
#[derive(Debug, Default)]
pub struct InteractionStore {
    posts: DashMap<String, PostInteractions>,
}

impl InteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 点赞 (幂等)，返回是否新增
    pub fn like(&self, post_id: &str, guest_id: &str) -> bool {
        self.posts
            .entry(post_id.to_string())
            .or_default()
            .likes
            .insert(guest_id.to_string())
    }

    /// 取消点赞，返回是否确有点赞被移除
    pub fn unlike(&self, post_id: &str, guest_id: &str) -> bool {
        match self.posts.get_mut(post_id) {
            Some(mut entry) => entry.likes.remove(guest_id),
            None => false,
        }
    }

    /// 收藏 (幂等)，返回是否新增
    pub fn save(&self, post_id: &str, guest_id: &str) -> bool {
        self.posts
            .entry(post_id.to_string())
            .or_default()
            .saves
            .insert(guest_id.to_string())
    }

    /// 取消收藏，返回是否确有收藏被移除
    pub fn unsave(&self, post_id: &str, guest_id: &str) -> bool {
        match self.posts.get_mut(post_id) {
            Some(mut entry) => entry.saves.remove(guest_id),
            None => false,
        }
    }

    /// 追加一条评论
    pub fn add_comment(&self, post_id: &str, guest_name: String, text: String) -> Comment {
        let comment = Comment {
            guest_name,
            text,
            created_date: Utc::now(),
        };
        self.posts
            .entry(post_id.to_string())
            .or_default()
            .comments
            .push(comment.clone());
        comment
    }

    /// 以某个宾客的视角取快照
    pub fn snapshot(&self, post_id: &str, guest_id: &str) -> InteractionSnapshot {
        match self.posts.get(post_id) {
            Some(entry) => InteractionSnapshot {
                like_count: entry.likes.len(),
                liked: entry.likes.contains(guest_id),
                saved: entry.saves.contains(guest_id),
                comments: entry.comments.clone(),
            },
            None => InteractionSnapshot {
                like_count: 0,
                liked: false,
                saved: false,
                comments: Vec::new(),
            },
        }
    }

    /// 删除帖子时同步清理
    pub fn remove_post(&self, post_id: &str) {
        self.posts.remove(post_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likes_count_per_guest_and_unlike_removes() {
        let store = InteractionStore::new();
        assert!(store.like("post:1", "g1"));
        assert!(store.like("post:1", "g2"));
        // Liking twice is idempotent
        assert!(!store.like("post:1", "g1"));
        assert_eq!(store.snapshot("post:1", "g1").like_count, 2);

        assert!(store.unlike("post:1", "g1"));
        assert!(!store.unlike("post:1", "g1"));
        let snap = store.snapshot("post:1", "g1");
        assert_eq!(snap.like_count, 1);
        assert!(!snap.liked);
    }

    #[test]
    fn saves_are_private_to_guest() {
        let store = InteractionStore::new();
        store.save("post:1", "g1");
        assert!(store.snapshot("post:1", "g1").saved);
        assert!(!store.snapshot("post:1", "g2").saved);
        assert!(store.unsave("post:1", "g1"));
        assert!(!store.snapshot("post:1", "g1").saved);
    }

    #[test]
    fn comments_append_in_order() {
        let store = InteractionStore::new();
        store.add_comment("post:1", "Dana".into(), "first".into());
        store.add_comment("post:1", "Yoni".into(), "second".into());
        let snap = store.snapshot("post:1", "g1");
        assert_eq!(snap.comments.len(), 2);
        assert_eq!(snap.comments[0].text, "first");
        assert_eq!(snap.comments[1].text, "second");
    }

    #[test]
    fn unknown_post_yields_empty_snapshot() {
        let store = InteractionStore::new();
        let snap = store.snapshot("post:missing", "g1");
        assert_eq!(snap.like_count, 0);
        assert!(snap.comments.is_empty());
    }
}

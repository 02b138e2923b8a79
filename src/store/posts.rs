use async_trait::async_trait;

use super::{PostSource, StoreError};
use crate::models::Post;

/// Posts compiled into the binary.
#[derive(Clone, Debug)]
pub struct StaticPosts {
    posts: Vec<Post>,
}

impl StaticPosts {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }
}

impl Default for StaticPosts {
    fn default() -> Self {
        Self::new(vec![
            Post {
                slug: "my-first-post".to_string(),
                title: "My First Post".to_string(),
            },
            Post {
                slug: "90s-mixtape".to_string(),
                title: "A Mixtape I Made Just For You".to_string(),
            },
        ])
    }
}

#[async_trait]
impl PostSource for StaticPosts {
    async fn get_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.clone())
    }
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn posts_index_links_every_post() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.client.get(app.url("/posts")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.text().await?;
    assert!(body.contains("<h1>Posts</h1>"));
    assert!(body.contains("<a href=\"/posts/my-first-post\">My First Post</a>"));
    assert!(body.contains("<a href=\"/posts/90s-mixtape\">A Mixtape I Made Just For You</a>"));
    Ok(())
}

#[tokio::test]
async fn stylesheet_is_served() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.client.get(app.url("/static/jokes.css")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains(".error-container"));
    Ok(())
}

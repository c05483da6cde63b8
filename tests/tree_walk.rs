use std::sync::Arc;

use mangadl::prelude::*;
use url::Url;

const MANGA: &str = r#"<!DOCTYPE html>
<html><head><title>Naruto Manga - Read Naruto Manga Online</title></head>
<body>
<div id="mangaproperties"><h2 class="aname">Naruto</h2></div>
<div id="chapterlist">
  <table id="listing">
    <tr><th>Chapter Name</th><th>Date Added</th></tr>
    <tr><td><a href="/naruto/1">Naruto 1</a> : Uzumaki Naruto</td><td>07/04/2009</td></tr>
    <tr><td><a href="/naruto/2">Naruto 2</a> : Konohamaru</td><td>07/04/2009</td></tr>
  </table>
</div>
</body></html>"#;

const CHAPTER_1: &str = r#"<!DOCTYPE html>
<html><body>
<div id="mangainfo"><h1>Naruto 1</h1></div>
<select id="pageMenu" name="pageMenu">
  <option value="/naruto/1" selected="selected">1</option>
  <option value="/naruto/1/2">2</option>
</select>
<img id="img" width="800" height="1200" alt="Naruto 1 - Page 1"
     src="http://i10.mangareader.net/naruto/1/naruto-1564773.jpg">
</body></html>"#;

const CHAPTER_1_PAGE_2: &str = r#"<!DOCTYPE html>
<html><body>
<div id="mangainfo"><h1>Naruto 1</h1></div>
<img id="img" src="http://i10.mangareader.net/naruto/1/naruto-1564775.jpg">
</body></html>"#;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn registry(fetcher: StaticFetcher) -> (ServiceRegistry, Arc<StaticFetcher>) {
    let fetcher = Arc::new(fetcher);
    let md = Arc::new(Downloader::new(fetcher.clone()));
    (ServiceRegistry::with_defaults(md).unwrap(), fetcher)
}

fn site() -> StaticFetcher {
    StaticFetcher::new()
        .with(url("http://www.mangareader.net/naruto"), MANGA)
        .with(url("http://www.mangareader.net/naruto/1"), CHAPTER_1)
        .with(url("http://www.mangareader.net/naruto/1/2"), CHAPTER_1_PAGE_2)
}

#[tokio::test]
async fn walks_manga_down_to_images() {
    let (registry, fetcher) = registry(site());

    let manga = match registry.identify_str("http://www.mangareader.net/naruto").await.unwrap() {
        Entity::Manga(m) => m,
        other => panic!("expected a manga, got {:?}", other.kind()),
    };
    assert_eq!(manga.name().await.unwrap(), "Naruto");

    let chapters = manga.chapters().await.unwrap();
    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[1].url().as_str(), "http://www.mangareader.net/naruto/2");

    let first = &chapters[0];
    assert_eq!(first.name().await.unwrap(), "0001");
    let images = first.image_urls().await.unwrap();
    assert_eq!(
        images.iter().map(Url::as_str).collect::<Vec<_>>(),
        vec![
            "http://i10.mangareader.net/naruto/1/naruto-1564773.jpg",
            "http://i10.mangareader.net/naruto/1/naruto-1564775.jpg",
        ]
    );

    // identify, name, chapters, chapter name, pages, two images
    assert_eq!(fetcher.requests().len(), 7);
}

#[tokio::test]
async fn chapter_url_identifies_as_chapter() {
    let (registry, _) = registry(site());
    let entity = registry.identify_str("http://mangareader.net/naruto/1").await;
    // the bare host is supported but has no canned document
    assert!(matches!(entity, Err(Error::Fetch(FetchError::Missing { .. }))));

    let entity = registry.identify_str("http://www.mangareader.net/naruto/1").await.unwrap();
    assert_eq!(entity.kind(), EntityKind::Chapter);
    assert_eq!(entity.name().await.unwrap(), "0001");
}

#[tokio::test]
async fn transport_errors_pass_through() {
    let (registry, _) = registry(site());
    let entity = registry.identify_str("http://www.mangareader.net/naruto").await.unwrap();
    let Entity::Manga(manga) = entity else { panic!("expected a manga") };
    let missing = Chapter::new(url("http://www.mangareader.net/naruto/2"), manga.service().clone());
    match missing.pages().await {
        Err(Error::Fetch(FetchError::Missing { url })) => assert_eq!(url.path(), "/naruto/2"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn image_walk_stops_at_first_failure() {
    let fetcher = StaticFetcher::new().with(url("http://www.mangareader.net/naruto/1"), CHAPTER_1);
    let (registry, fetcher) = registry(fetcher);
    let entity = registry.identify_str("http://www.mangareader.net/naruto/1").await.unwrap();
    let Entity::Chapter(chapter) = entity else {
        panic!("expected a chapter");
    };
    assert!(matches!(chapter.image_urls().await, Err(Error::Fetch(_))));
    // identify, pages, page 1 image, page 2 fails
    assert_eq!(fetcher.requests().len(), 4);
}

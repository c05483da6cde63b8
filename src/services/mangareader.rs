//! The MangaReader page template, shared by MangaReader and its sister site MangaPanda.

use crate::services::template::SiteRules;

const CHAPTER_PATTERN: &str = r"^.* (\d*)$";
const CHAPTER_DIGITS: usize = 4;

pub const MANGAREADER: SiteRules = SiteRules {
    name: "mangareader",
    hosts: &["www.mangareader.net", "mangareader.net"],
    base: "http://www.mangareader.net",
    manga_marker: "#chapterlist",
    chapter_marker: "#pageMenu",
    manga_name: "h2.aname",
    manga_chapters: "#chapterlist a",
    chapter_name: "#mangainfo h1",
    chapter_pages: "#pageMenu option",
    page_image: "#img",
    chapter_pattern: CHAPTER_PATTERN,
    chapter_digits: CHAPTER_DIGITS,
};

pub const MANGAPANDA: SiteRules = SiteRules {
    name: "mangapanda",
    hosts: &["www.mangapanda.com", "mangapanda.com"],
    base: "http://www.mangapanda.com",
    ..MANGAREADER
};

/// Built-in sites in default registration order.
pub const BUILTIN: &[SiteRules] = &[MANGAREADER, MANGAPANDA];

pub fn builtin(name: &str) -> Option<&'static SiteRules> {
    BUILTIN.iter().find(|rules| rules.name.eq_ignore_ascii_case(name))
}

use crate::error::PlayerError;
use lectern_domain::Lesson;
use lectern_domain::config::PlayerConfig;

/// Builds player URLs under a fixed embed endpoint.
#[derive(Debug, Clone)]
pub struct EmbedUrls {
    base: String,
}

impl EmbedUrls {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    #[must_use]
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(config.embed_base.as_str())
    }

    /// Embed page for `media_id`.
    fn page(&self, media_id: &str) -> String {
        format!("{}/{}/v4/embed.html", self.base, media_id)
    }

    /// Player URL for a lesson page.
    ///
    /// The page's own query string is forwarded and the full page URL is appended,
    /// percent-encoded, as `vl`.
    #[must_use]
    pub fn embed_url(&self, media_id: &str, page_href: &str) -> String {
        let page = self.page(media_id);
        let vl = urlencoding::encode(page_href);
        match page_query(page_href) {
            Some(query) => format!("{page}?{query}&vl={vl}"),
            None => format!("{page}?vl={vl}"),
        }
    }

    /// Player URL for `lesson`.
    ///
    /// # Errors
    /// Returns [`PlayerError::NoMedia`] if the lesson has no video.
    pub fn lesson_url(&self, lesson: &Lesson, page_href: &str) -> Result<String, PlayerError> {
        let media_id = lesson.media_id.as_deref().ok_or_else(|| PlayerError::NoMedia {
            message: lesson.id.clone().into(),
            context: None,
        })?;
        Ok(self.embed_url(media_id, page_href))
    }

    /// Muted, control-less autoplay URL starting at `start_secs`.
    #[must_use]
    pub fn preview_url(&self, media_id: &str, start_secs: u32) -> String {
        format!(
            "{}?autoplay=true&muted=true&controls=false&start={start_secs}&t={start_secs}",
            self.page(media_id)
        )
    }
}

/// The query of `href` without `?` or fragment, if non-empty.
fn page_query(href: &str) -> Option<&str> {
    let (_, rest) = href.split_once('?')?;
    let query = rest.split_once('#').map_or(rest, |(query, _)| query);
    (!query.is_empty()).then_some(query)
}

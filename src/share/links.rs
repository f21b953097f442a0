//! Social network deep links.

use serde::Serialize;

/// Pre-filled share URLs for the supported networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    pub twitter: String,
    pub facebook: String,
    pub whatsapp: String,
}

impl SocialLinks {
    /// `(network, url)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Twitter", self.twitter.as_str()),
            ("Facebook", self.facebook.as_str()),
            ("WhatsApp", self.whatsapp.as_str()),
        ]
        .into_iter()
    }
}

/// Build the share links for a caption and the application URL.
///
/// Facebook only takes the URL; WhatsApp gets caption and URL in one text.
pub fn social_links(caption: &str, app_url: &str) -> SocialLinks {
    SocialLinks {
        twitter: format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            urlencoding::encode(caption),
            urlencoding::encode(app_url)
        ),
        facebook: format!(
            "https://www.facebook.com/sharer/sharer.php?u={}",
            urlencoding::encode(app_url)
        ),
        whatsapp: format!(
            "https://wa.me/?text={}",
            urlencoding::encode(&format!("{} {}", caption, app_url))
        ),
    }
}

use std::borrow::Cow;

use crate::html::escape_html;

pub const IMAGE_PLACEHOLDER: &str = r#"<div class="no-image">Image non disponible</div>"#;

const VERBATIM_PREFIXES: [&str; 3] = ["http://", "https://", "assets/"];

/// What a record's `image` field resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// A URL ready for an `src` attribute.
    Url(Cow<'a, str>),
    /// Emoji or short text shown in place of a picture.
    Inline(&'a str),
    /// Absent, empty or unusable; rendered as the placeholder.
    Placeholder,
}

pub fn classify_image<'a>(image: Option<&'a str>, base_url: &str) -> ImageRef<'a> {
    let Some(raw) = image.map(str::trim).filter(|s| !s.is_empty()) else {
        return ImageRef::Placeholder;
    };

    if VERBATIM_PREFIXES.iter().any(|p| raw.starts_with(p)) {
        return if is_clean_path(raw) {
            ImageRef::Url(Cow::Borrowed(raw))
        } else {
            ImageRef::Placeholder
        };
    }

    if raw.contains('/') || raw.contains('.') {
        if !is_clean_path(raw) {
            return ImageRef::Placeholder;
        }
        let base = base_url.trim_end_matches('/');
        let path = raw.trim_start_matches('/');
        return if base.is_empty() {
            ImageRef::Url(Cow::Borrowed(path))
        } else {
            ImageRef::Url(Cow::Owned(format!("{base}/{path}")))
        };
    }

    ImageRef::Inline(raw)
}

fn is_clean_path(path: &str) -> bool {
    !path
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>'))
}

/// Markup for the inside of a card's image box.
pub fn image_fragment(image: Option<&str>, alt: &str, base_url: &str) -> String {
    match classify_image(image, base_url) {
        ImageRef::Url(src) => format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            escape_html(&src),
            escape_html(alt)
        ),
        ImageRef::Inline(text) => format!(
            r#"<span class="image-inline">{}</span>"#,
            escape_html(text)
        ),
        ImageRef::Placeholder => IMAGE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{IMAGE_PLACEHOLDER, ImageRef, classify_image, image_fragment};

    #[test]
    fn prefixed_references_are_used_verbatim() {
        assert_eq!(
            classify_image(Some("https://cdn.example/a.png"), "assets/img/"),
            ImageRef::Url(Cow::Borrowed("https://cdn.example/a.png"))
        );
        assert_eq!(
            classify_image(Some("assets/logo.png"), "assets/img/"),
            ImageRef::Url(Cow::Borrowed("assets/logo.png"))
        );
    }

    #[test]
    fn paths_are_joined_to_the_base_url() {
        assert_eq!(
            classify_image(Some("vehicles/softail.png"), "assets/img/"),
            ImageRef::Url(Cow::Owned("assets/img/vehicles/softail.png".to_string()))
        );
        assert_eq!(
            classify_image(Some("gilet.png"), "https://cdn.example/img"),
            ImageRef::Url(Cow::Owned("https://cdn.example/img/gilet.png".to_string()))
        );
        assert_eq!(
            classify_image(Some("gilet.png"), ""),
            ImageRef::Url(Cow::Borrowed("gilet.png"))
        );
    }

    #[test]
    fn emoji_is_inline_content() {
        assert_eq!(classify_image(Some("🏍️"), "assets/img/"), ImageRef::Inline("🏍️"));
    }

    #[test]
    fn unusable_references_become_the_placeholder() {
        for image in [None, Some(""), Some("   "), Some("a b.png"), Some("x.png\" onerror=\"")] {
            assert_eq!(
                classify_image(image, "assets/img/"),
                ImageRef::Placeholder,
                "{image:?}"
            );
        }
        assert_eq!(image_fragment(None, "Tornado", "assets/img/"), IMAGE_PLACEHOLDER);
    }

    #[test]
    fn alt_text_is_escaped() {
        let html = image_fragment(Some("x.png"), "<b>", "");
        assert_eq!(html, r#"<img src="x.png" alt="&lt;b&gt;" loading="lazy">"#);
    }
}

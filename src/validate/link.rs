//! URL validation for `href` and `src`.

use url::{ParseError, Url};

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Raster formats only: `image/svg+xml` can carry script.
const DATA_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Accept root-relative paths, `#fragment` anchors, and absolute
/// `http`, `https` or `mailto` URLs.
///
/// Leading and trailing control characters and spaces are trimmed before the
/// scheme is read, and the scheme is parsed the way browsers parse it, so
/// `jav\tascript:` and ` JAVASCRIPT:` are both rejected. The trimmed value is
/// what gets emitted.
pub fn validate_url(value: &str) -> Option<&str> {
    check(value, false)
}

/// Like [`validate_url`], additionally accepting raster `data:image/*` URLs
/// when `allow_data_images` is set.
pub fn validate_image_url(value: &str, allow_data_images: bool) -> Option<&str> {
    check(value, allow_data_images)
}

fn check(value: &str, allow_data_images: bool) -> Option<&str> {
    let trimmed = value.trim_matches(|c: char| c <= ' ');
    if trimmed.is_empty() {
        return None;
    }

    match Url::parse(trimmed) {
        Ok(url) => {
            let scheme = url.scheme();
            let ok = ALLOWED_SCHEMES.iter().any(|s| *s == scheme)
                || (allow_data_images && scheme == "data" && is_raster_image(url.path()));
            ok.then_some(trimmed)
        }
        Err(ParseError::RelativeUrlWithoutBase) => is_local_reference(trimmed).then_some(trimmed),
        Err(_) => None,
    }
}

/// `/path` or `#fragment`, ignoring the tab and newline characters browsers
/// strip from URLs. `//host` and `/\host` resolve off-site and are refused.
fn is_local_reference(value: &str) -> bool {
    let mut chars = value.chars().filter(|c| !matches!(c, '\t' | '\n' | '\r'));
    match (chars.next(), chars.next()) {
        (Some('#'), _) => true,
        (Some('/'), Some('/' | '\\')) => false,
        (Some('/'), _) => true,
        _ => false,
    }
}

fn is_raster_image(data: &str) -> bool {
    let Some((header, _payload)) = data.split_once(',') else {
        return false;
    };
    let mime = header.split(';').next().unwrap_or_default();
    DATA_IMAGE_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(mime.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_root_relative_paths() {
        assert_eq!(
            validate_url("/media/uploads/photo.png"),
            Some("/media/uploads/photo.png")
        );
        assert_eq!(validate_url("/p/home?tab=1#top"), Some("/p/home?tab=1#top"));
        assert_eq!(validate_url("#section-2"), Some("#section-2"));
    }

    #[test]
    fn keeps_allowed_absolute_urls_exactly() {
        for url in [
            "https://example.com/a?b=c&d=e",
            "http://example.com",
            "mailto:someone@example.com",
            "HTTPS://Example.com/Path",
        ] {
            assert_eq!(validate_url(url), Some(url));
        }
    }

    #[test]
    fn rejects_script_schemes() {
        for url in [
            "javascript:alert(1)",
            "JavaScript:alert(1)",
            "jav\tascript:alert(1)",
            "java\nscript:alert(1)",
            "\u{1}javascript:alert(1)",
            " javascript:alert(1)",
            "vbscript:msgbox(1)",
            "data:text/html,<script>alert(1)</script>",
        ] {
            assert_eq!(validate_url(url), None, "{url:?}");
        }
    }

    #[test]
    fn rejects_unknown_schemes_and_relative_forms() {
        for url in [
            "ftp://example.com/file",
            "file:///etc/passwd",
            "//evil.example/x",
            "/\\evil.example/x",
            "/\t/evil.example/x",
            "p/home",
            "",
            "   ",
            "https:",
        ] {
            assert_eq!(validate_url(url), None, "{url:?}");
        }
    }

    #[test]
    fn trims_surrounding_controls_on_accept() {
        assert_eq!(validate_url("\u{0} /p/home \n"), Some("/p/home"));
    }

    #[test]
    fn data_images_need_the_knob_and_a_raster_type() {
        let png = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(validate_image_url(png, false), None);
        assert_eq!(validate_image_url(png, true), Some(png));
        assert_eq!(
            validate_image_url("data:IMAGE/JPEG;base64,/9j/", true),
            Some("data:IMAGE/JPEG;base64,/9j/")
        );
        assert_eq!(
            validate_image_url("data:image/svg+xml,<svg onload=alert(1)>", true),
            None
        );
        assert_eq!(validate_image_url("data:image/png", true), None);
    }
}

//! Image CDN URLs.
//!
//! Images are never fetched or resized here. An image field holds an asset
//! reference such as `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`, which
//! maps onto the CMS image CDN:
//!
//! ```text
//! https://cdn.sanity.io/images/{project}/{dataset}/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg
//! ```
//!
//! Transformation parameters (`w`, `h`, `fm`, `q`, `fit`, focal point) are
//! appended as a query string and applied by the CDN.

use crate::documents::ImageRef;
use url::Url;

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Parsed `image-{id}-{w}x{h}-{ext}` asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub extension: String,
}

impl AssetRef {
    pub fn parse(reference: &str) -> Option<Self> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, extension) = rest.rsplit_once('-')?;
        let (id, dims) = rest.rsplit_once('-')?;
        let (w, h) = dims.split_once('x')?;
        if id.is_empty() || extension.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            width: w.parse().ok()?,
            height: h.parse().ok()?,
            extension: extension.to_string(),
        })
    }

    pub fn file_name(&self) -> String {
        format!("{}-{}x{}.{}", self.id, self.width, self.height, self.extension)
    }
}

/// Output format requested from the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Webp,
    Jpg,
    Png,
}

impl Format {
    fn as_str(self) -> &'static str {
        match self {
            Format::Webp => "webp",
            Format::Jpg => "jpg",
            Format::Png => "png",
        }
    }
}

/// Transformation parameters for one image URL.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<Format>,
    pub quality: Option<u8>,
}

impl Transform {
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.min(100));
        self
    }
}

/// Builds CDN URLs for one project/dataset, with a placeholder fallback.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
    placeholder: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: &str, dataset: &str, placeholder: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Base URL of the original asset, or `None` when the field holds no
    /// usable asset.
    pub fn source_url(&self, image: &ImageRef) -> Option<String> {
        let asset = image.asset.as_ref()?;
        if let Some(url) = asset.url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.to_string());
        }
        let reference = asset.reference.as_deref().or(asset.id.as_deref())?;
        let parsed = AssetRef::parse(reference)?;
        if self.project_id.is_empty() {
            return None;
        }
        Some(format!(
            "{CDN_BASE}/{}/{}/{}",
            self.project_id,
            self.dataset,
            parsed.file_name()
        ))
    }

    /// Transformed CDN URL, or the placeholder when the image is missing or
    /// its asset can't be resolved.
    pub fn url(&self, image: Option<&ImageRef>, transform: Transform) -> String {
        image
            .and_then(|img| self.transformed(img, transform))
            .unwrap_or_else(|| self.placeholder.clone())
    }

    fn transformed(&self, image: &ImageRef, transform: Transform) -> Option<String> {
        let base = self.source_url(image)?;
        let mut url = Url::parse(&base).ok()?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(w) = transform.width {
                query.append_pair("w", &w.to_string());
            }
            if let Some(h) = transform.height {
                query.append_pair("h", &h.to_string());
            }
            if let Some(format) = transform.format {
                query.append_pair("fm", format.as_str());
            }
            if let Some(q) = transform.quality {
                query.append_pair("q", &q.to_string());
            }
            if transform.width.is_some() && transform.height.is_some() {
                query.append_pair("fit", "crop");
                if let Some(hotspot) = image.hotspot {
                    query.append_pair("crop", "focalpoint");
                    query.append_pair("fp-x", &format!("{:.3}", hotspot.x));
                    query.append_pair("fp-y", &format!("{:.3}", hotspot.y));
                }
            } else {
                query.append_pair("fit", "max");
            }
        }
        Some(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{Hotspot, ImageAsset};

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("abc123", "production", "/static/placeholder.svg")
    }

    fn image(reference: &str) -> ImageRef {
        ImageRef {
            asset: Some(ImageAsset {
                reference: Some(reference.into()),
                ..ImageAsset::default()
            }),
            ..ImageRef::default()
        }
    }

    #[test]
    fn parses_asset_reference() {
        let asset = AssetRef::parse("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg").unwrap();
        assert_eq!(asset.id, "Tb9Ew8CXIwaY6R1kjMvI0uRR");
        assert_eq!((asset.width, asset.height), (2000, 3000));
        assert_eq!(asset.extension, "jpg");
    }

    #[test]
    fn rejects_malformed_reference() {
        assert_eq!(AssetRef::parse("file-abc-pdf"), None);
        assert_eq!(AssetRef::parse("image-abc-wide-jpg"), None);
    }

    #[test]
    fn builds_cdn_url_with_transform() {
        let url = builder().url(
            Some(&image("image-abc-800x600-png")),
            Transform::width(400).format(Format::Webp).quality(80),
        );
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/abc123/production/abc-800x600.png?w=400&fm=webp&q=80&fit=max"
        );
    }

    #[test]
    fn crops_to_hotspot_when_both_dimensions_given() {
        let mut img = image("image-abc-800x600-jpg");
        img.hotspot = Some(Hotspot { x: 0.25, y: 0.5 });
        let url = builder().url(Some(&img), Transform::size(1200, 630));
        assert!(url.ends_with("?w=1200&h=630&fit=crop&crop=focalpoint&fp-x=0.250&fp-y=0.500"));
    }

    #[test]
    fn expanded_asset_url_is_used_as_base() {
        let img = ImageRef {
            asset: Some(ImageAsset {
                url: Some("https://cdn.sanity.io/images/p/d/x-10x10.jpg".into()),
                ..ImageAsset::default()
            }),
            ..ImageRef::default()
        };
        assert_eq!(
            builder().url(Some(&img), Transform::width(10)),
            "https://cdn.sanity.io/images/p/d/x-10x10.jpg?w=10&fit=max"
        );
    }

    #[test]
    fn missing_image_falls_back_to_placeholder() {
        assert_eq!(builder().url(None, Transform::default()), "/static/placeholder.svg");
        assert_eq!(
            builder().url(Some(&ImageRef::default()), Transform::default()),
            "/static/placeholder.svg"
        );
    }

    #[test]
    fn no_project_means_no_cdn_url() {
        let builder = ImageUrlBuilder::new("", "production", "/p.svg");
        assert_eq!(builder.url(Some(&image("image-abc-1x1-jpg")), Transform::width(5)), "/p.svg");
    }
}

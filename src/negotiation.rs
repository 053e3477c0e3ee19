//! HTTP content negotiation.
//!
//! Parses `Accept` headers per RFC 7231 semantics (media ranges,
//! wildcards, `q` parameters) and selects the responsifier registered for
//! the best-matching content family. A blank or absent header is treated
//! as `*/*` and prefers the first registered family.

use std::cmp::Ordering;
use std::fmt;

use crate::respond::RespondError;
use crate::responsifier::{Responsifier, ResponsifierRegistry};

const WILDCARD: &str = "*";

/// A negotiation-level grouping of related media types, mapped to one
/// responsifier in the [`ResponsifierRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFamily {
    Html,
    Json,
}

impl ContentFamily {
    /// The logical family key, as used in registry configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContentFamily::Html => "html",
            ContentFamily::Json => "json",
        }
    }

    /// The `Content-Type` attached to responses rendered for this family.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            ContentFamily::Html => "text/html",
            ContentFamily::Json => "application/json",
        }
    }

    /// The concrete media types belonging to this family.
    #[must_use]
    pub const fn media_types(&self) -> &'static [&'static str] {
        match self {
            ContentFamily::Html => &["text/html", "application/xhtml+xml"],
            ContentFamily::Json => &["application/json", "text/javascript", "text/plain"],
        }
    }

    /// Map a concrete media type to its family, case-insensitively.
    /// Types outside the known sets yield no mapping.
    #[must_use]
    pub fn for_media_type(media_type: &str) -> Option<Self> {
        [ContentFamily::Html, ContentFamily::Json]
            .into_iter()
            .find(|family| {
                family
                    .media_types()
                    .iter()
                    .any(|member| member.eq_ignore_ascii_case(media_type))
            })
    }
}

impl fmt::Display for ContentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One media range parsed from an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    /// The type part, lowercased; may be `*`.
    pub main_type: String,
    /// The subtype part, lowercased; may be `*`.
    pub sub_type: String,
    /// The quality weight in `[0, 1]`, 1 when unspecified.
    pub quality: f32,
    /// Zero-based position within the header.
    pub position: usize,
}

impl MediaRange {
    /// Exact ranges rank above subtype wildcards, which rank above the
    /// full wildcard.
    fn specificity(&self) -> u8 {
        match (self.main_type.as_str(), self.sub_type.as_str()) {
            (WILDCARD, _) => 0,
            (_, WILDCARD) => 1,
            _ => 2,
        }
    }

    /// Does this range match the supplied concrete `type/subtype`?
    #[must_use]
    pub fn matches(&self, media_type: &str) -> bool {
        let Some((main, sub)) = media_type.split_once('/') else {
            return false;
        };
        (self.main_type == WILDCARD || self.main_type.eq_ignore_ascii_case(main))
            && (self.sub_type == WILDCARD || self.sub_type.eq_ignore_ascii_case(sub))
    }

    /// A range with `q=0` is explicitly not acceptable.
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        self.quality > 0.0
    }
}

/// Parse an `Accept` header into media ranges, best first.
///
/// Ranking follows exact over subtype wildcard over full wildcard, then
/// higher quality, then header order. Entries that do not parse as
/// `type/subtype` are skipped. A blank or absent header yields `*/*`.
#[must_use]
pub fn parse_accept(header: Option<&str>) -> Vec<MediaRange> {
    let header = header
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("*/*");

    let mut ranges = Vec::new();
    for (position, entry) in header.split(',').enumerate() {
        let mut parts = entry.split(';');
        let Some(type_part) = parts.next() else {
            continue;
        };
        let Some((main_type, sub_type)) = type_part.trim().split_once('/') else {
            continue;
        };
        let main_type = main_type.trim().to_ascii_lowercase();
        let sub_type = sub_type.trim().to_ascii_lowercase();
        if main_type.is_empty() || sub_type.is_empty() {
            continue;
        }

        let mut quality = 1.0f32;
        for parameter in parts {
            let Some((key, value)) = parameter.split_once('=') else {
                continue;
            };
            if key.trim().eq_ignore_ascii_case("q") {
                quality = value
                    .trim()
                    .parse::<f32>()
                    .map(|q| q.clamp(0.0, 1.0))
                    .unwrap_or(1.0);
                // Parameters after q are accept-extensions.
                break;
            }
        }

        ranges.push(MediaRange {
            main_type,
            sub_type,
            quality,
            position,
        });
    }

    ranges.sort_by(|a, b| {
        b.specificity()
            .cmp(&a.specificity())
            .then_with(|| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal))
            .then_with(|| a.position.cmp(&b.position))
    });
    ranges
}

fn family_for_range(range: &MediaRange, registry: &ResponsifierRegistry) -> Option<ContentFamily> {
    match (range.main_type.as_str(), range.sub_type.as_str()) {
        // The full wildcard prefers the first registered family.
        (WILDCARD, _) => Some(registry.first_family()),
        (_, WILDCARD) => registry.families().find(|family| {
            family
                .media_types()
                .iter()
                .any(|member| range.matches(member))
        }),
        (main_type, sub_type) => ContentFamily::for_media_type(&format!("{main_type}/{sub_type}")),
    }
}

/// Negotiate the `accept` header against the registry and select the
/// responsifier for the best-matching content family.
///
/// # Errors
///
/// [`RespondError::UnsupportedMediaType`] when no acceptable range maps
/// to a content family, or the matched family has no registered
/// responsifier. The caller is expected to surface this as an HTTP 415
/// with no body.
pub fn negotiate<'r>(
    accept: Option<&str>,
    registry: &'r ResponsifierRegistry,
) -> Result<(ContentFamily, &'r dyn Responsifier), RespondError> {
    for range in parse_accept(accept)
        .iter()
        .filter(|range| range.is_acceptable())
    {
        if let Some(family) = family_for_range(range, registry) {
            return registry
                .get(family)
                .map(|responsifier| (family, responsifier))
                .ok_or_else(|| RespondError::unsupported_media_type(accept));
        }
    }
    Err(RespondError::unsupported_media_type(accept))
}

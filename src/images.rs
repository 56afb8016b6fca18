//! TMDB image URLs
//!
//! Image paths in TMDB responses are fragments like `/abc.jpg`; a full URL is
//! the image base, a size segment, and the fragment.

use std::fmt;

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// A size segment accepted by the image CDN
pub trait ImageSize {
    fn segment(&self) -> &'static str;
}

/// Build a full image URL.
///
/// The path is appended verbatim after a `/`, so TMDB's leading slash
/// produces `.../w342//abc.jpg`, which the CDN accepts.
pub fn build_image_url(path: &str, size: impl ImageSize) -> String {
    format!("{}{}/{}", IMAGE_BASE_URL, size.segment(), path)
}

/// Optional-path convenience for model fields
pub fn image_url(path: Option<&str>, size: impl ImageSize) -> Option<String> {
    path.map(|p| build_image_url(p, size))
}

macro_rules! image_sizes {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $segment:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl ImageSize for $name {
            fn segment(&self) -> &'static str {
                match self {
                    $($name::$variant => $segment),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.segment())
            }
        }
    };
}

image_sizes!(
    /// Poster sizes
    Poster {
        W92 => "w92",
        W154 => "w154",
        W185 => "w185",
        W342 => "w342",
        W500 => "w500",
        W780 => "w780",
        Original => "original",
    }
);

image_sizes!(
    /// Backdrop sizes
    Backdrop {
        W300 => "w300",
        W780 => "w780",
        W1280 => "w1280",
        Original => "original",
    }
);

image_sizes!(
    /// Profile picture sizes
    Profile {
        W45 => "w45",
        W185 => "w185",
        H632 => "h632",
        Original => "original",
    }
);

image_sizes!(
    /// Episode still sizes
    Still {
        W92 => "w92",
        W185 => "w185",
        W300 => "w300",
        Original => "original",
    }
);

image_sizes!(
    /// Network/company logo sizes
    Logo {
        W45 => "w45",
        W92 => "w92",
        W154 => "w154",
        W185 => "w185",
        W300 => "w300",
        W500 => "w500",
        Original => "original",
    }
);

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use fltk::image::SvgImage;
use fltk::prelude::ImageExt;

use super::theme::ThemePreference;

/// A named vector icon. The SVG data is embedded at compile time and uses
/// [`BASE_TINT`] as its single stroke/fill color so it can be re-tinted
/// per theme with a plain string substitution.
#[derive(Debug, Clone, Copy)]
pub struct IconDescriptor {
    pub name: &'static str,
    pub svg: &'static str,
}

pub const ICON_SUN: &str = "sun";
pub const ICON_MOON: &str = "moon";
pub const ICON_CAMERA: &str = "camera";
pub const ICON_IMAGE: &str = "image";
pub const ICON_SCAN: &str = "scan";
pub const ICON_TRASH: &str = "trash";
pub const ICON_DOWNLOAD: &str = "download";
pub const ICON_SAD: &str = "sad";

const BASE_TINT: &str = "#4a4a4a";
const DARK_TINT: &str = "#d8d8d8";

static REGISTRY: LazyLock<RwLock<HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Register a set of icons. Later registrations under the same name win,
/// matching the grow-by-appending contract: adding icons across revisions
/// is just more entries in the same call.
pub fn register_icons(icons: &[IconDescriptor]) {
    let mut registry = REGISTRY.write().expect("icon registry poisoned");
    for icon in icons {
        registry.insert(icon.name, icon.svg);
    }
}

/// Register the built-in icon set. Must run during bootstrap, before any
/// widget referencing these names is built; a name that was never
/// registered resolves to `None` and the widget falls back to its text
/// label (a missing glyph, not a fault).
pub fn register_builtin_icons() {
    register_icons(&[
        IconDescriptor { name: ICON_SUN, svg: include_str!("../../assets/icons/sun.svg") },
        IconDescriptor { name: ICON_MOON, svg: include_str!("../../assets/icons/moon.svg") },
        IconDescriptor { name: ICON_CAMERA, svg: include_str!("../../assets/icons/camera.svg") },
        IconDescriptor { name: ICON_IMAGE, svg: include_str!("../../assets/icons/image.svg") },
        IconDescriptor { name: ICON_SCAN, svg: include_str!("../../assets/icons/scan.svg") },
        IconDescriptor { name: ICON_TRASH, svg: include_str!("../../assets/icons/trash.svg") },
        IconDescriptor { name: ICON_DOWNLOAD, svg: include_str!("../../assets/icons/download.svg") },
        IconDescriptor { name: ICON_SAD, svg: include_str!("../../assets/icons/sad.svg") },
    ]);
}

/// Raw SVG data for a registered icon.
pub fn lookup(name: &str) -> Option<&'static str> {
    REGISTRY.read().expect("icon registry poisoned").get(name).copied()
}

/// SVG data re-tinted for the given theme.
pub fn themed_svg(name: &str, pref: ThemePreference) -> Option<String> {
    let svg = lookup(name)?;
    Some(match pref {
        ThemePreference::Light => svg.to_string(),
        ThemePreference::Dark => svg.replace(BASE_TINT, DARK_TINT),
    })
}

/// A ready-to-use widget image for a registered icon, scaled to `size`.
pub fn themed_image(name: &str, pref: ThemePreference, size: i32) -> Option<SvgImage> {
    let svg = themed_svg(name, pref)?;
    let mut image = SvgImage::from_data(&svg).ok()?;
    image.scale(size, size, true, true);
    Some(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_icons_resolve_after_registration() {
        register_builtin_icons();
        for name in [
            ICON_SUN, ICON_MOON, ICON_CAMERA, ICON_IMAGE, ICON_SCAN, ICON_TRASH,
            ICON_DOWNLOAD, ICON_SAD,
        ] {
            let svg = lookup(name);
            assert!(svg.is_some(), "icon {:?} missing", name);
            assert!(svg.unwrap().contains("<svg"));
        }
    }

    #[test]
    fn test_unregistered_name_resolves_to_none() {
        register_builtin_icons();
        assert!(lookup("definitely-not-an-icon").is_none());
        assert!(themed_svg("definitely-not-an-icon", ThemePreference::Light).is_none());
    }

    #[test]
    fn test_dark_tint_substitution() {
        register_builtin_icons();
        let light = themed_svg(ICON_SUN, ThemePreference::Light).unwrap();
        let dark = themed_svg(ICON_SUN, ThemePreference::Dark).unwrap();

        assert!(light.contains(BASE_TINT));
        assert!(!dark.contains(BASE_TINT));
        assert!(dark.contains(DARK_TINT));
    }

    #[test]
    fn test_reregistration_replaces() {
        register_icons(&[IconDescriptor { name: "probe", svg: "<svg>a</svg>" }]);
        register_icons(&[IconDescriptor { name: "probe", svg: "<svg>b</svg>" }]);
        assert_eq!(lookup("probe"), Some("<svg>b</svg>"));
    }
}

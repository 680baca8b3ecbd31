//! Scroll geometry: target offsets and closest-section selection.

use crate::core::page::Page;
use crate::core::sections::SectionMap;
use crate::core::types::Rect;

/// Round half toward positive infinity, matching `Math.round`.
pub fn round_px(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Document offset that puts `rect` just below the fixed navbar.
pub fn target_offset(scroll_y: f64, rect: Rect, navbar_height: f64) -> f64 {
    round_px(scroll_y + rect.top - navbar_height)
}

/// Document-relative center of the viewport area below the navbar.
pub fn tracking_center(scroll_y: f64, viewport_height: f64, navbar_height: f64) -> f64 {
    scroll_y + navbar_height + (viewport_height - navbar_height) / 2.0
}

/// Key of the present section whose center is closest to the tracking center.
///
/// Sections are visited in map order and only a strictly smaller distance
/// replaces the running best, so the earlier section wins ties. Returns
/// `fallback` when no mapped section is on the page.
pub fn closest_section<'a, P: Page + ?Sized>(
    page: &P,
    sections: &'a SectionMap,
    navbar_height: f64,
    fallback: &'a str,
) -> &'a str {
    let scroll_y = page.scroll_y();
    let center = tracking_center(scroll_y, page.viewport_height(), navbar_height);

    let mut best_key = fallback;
    let mut best_dist = f64::INFINITY;
    for entry in sections.iter() {
        let Some(rect) = page.section_rect(&entry.id) else {
            continue;
        };
        let dist = (scroll_y + rect.center() - center).abs();
        if dist < best_dist {
            best_dist = dist;
            best_key = entry.key.as_str();
        }
    }
    best_key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sections::SectionEntry;

    struct Fixed {
        scroll_y: f64,
        viewport_height: f64,
        /// Document-relative (id, top, height).
        boxes: Vec<(&'static str, f64, f64)>,
    }

    impl Page for Fixed {
        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }
        fn viewport_height(&self) -> f64 {
            self.viewport_height
        }
        fn section_rect(&self, anchor: &str) -> Option<Rect> {
            self.boxes
                .iter()
                .find(|(id, _, _)| *id == anchor)
                .map(|(_, top, height)| Rect::new(top - self.scroll_y, *height))
        }
        fn prefers_reduced_motion(&self) -> bool {
            false
        }
        fn now_ms(&self) -> f64 {
            0.0
        }
    }

    fn map() -> SectionMap {
        SectionMap::new(vec![
            SectionEntry::new("home", "home"),
            SectionEntry::new("research", "projects"),
            SectionEntry::new("contact", "contact"),
        ])
    }

    #[test]
    fn target_offset_subtracts_navbar_and_rounds() {
        assert_eq!(target_offset(100.0, Rect::new(250.4, 10.0), 80.0), 270.0);
        assert_eq!(target_offset(0.0, Rect::new(0.5, 10.0), 0.0), 1.0);
        assert_eq!(target_offset(0.0, Rect::new(0.0, 10.0), 80.5), -80.0);
    }

    #[test]
    fn closest_section_follows_viewport_center() {
        let page = Fixed {
            scroll_y: 700.0,
            viewport_height: 880.0,
            boxes: vec![
                ("home", 0.0, 800.0),
                ("research", 800.0, 800.0),
                ("contact", 1600.0, 800.0),
            ],
        };
        // center = 700 + 80 + 400 = 1180; research center = 1200.
        assert_eq!(closest_section(&page, &map(), 80.0, "home"), "projects");
    }

    #[test]
    fn ties_go_to_the_earlier_section() {
        let page = Fixed {
            scroll_y: 0.0,
            viewport_height: 480.0,
            // center = 0 + 80 + 200 = 280; both centers are 80 away.
            boxes: vec![("home", 100.0, 200.0), ("research", 260.0, 200.0)],
        };
        assert_eq!(closest_section(&page, &map(), 80.0, "home"), "home");

        let swapped = SectionMap::new(vec![
            SectionEntry::new("research", "projects"),
            SectionEntry::new("home", "home"),
        ]);
        assert_eq!(closest_section(&page, &swapped, 80.0, "home"), "projects");
    }

    #[test]
    fn missing_sections_fall_back() {
        let page = Fixed {
            scroll_y: 0.0,
            viewport_height: 800.0,
            boxes: Vec::new(),
        };
        assert_eq!(closest_section(&page, &map(), 80.0, "home"), "home");
    }
}

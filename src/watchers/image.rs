//! Image replacement watcher.
//!
//! The editor either previews a candidate image (setting the element's
//! `previewing` flag and swapping `src`) and then commits or cancels it, or
//! swaps `src` directly. Success is only reported for a committed source that
//! differs from the baseline.

use super::{SuccessDetail, WatchEvent, Watcher};
use crate::dom::{ids, Document};
use crate::steps::StepKind;

pub struct ImageWatcher {
    baseline: String,
    was_previewing: bool,
    saw_new_image_in_preview: bool,
    last_src: String,
}

impl ImageWatcher {
    pub fn new(baseline: String) -> Self {
        Self {
            last_src: baseline.clone(),
            baseline,
            was_previewing: false,
            saw_new_image_in_preview: false,
        }
    }
}

/// Remote sources get a different success message than local files
pub fn is_remote(src: &str) -> bool {
    src.starts_with("https://") || src.starts_with("http://")
}

impl Watcher for ImageWatcher {
    fn kind(&self) -> StepKind {
        StepKind::ReplaceImage
    }

    fn poll(&mut self, doc: &dyn Document) -> Vec<WatchEvent> {
        let Some(src) = doc.attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC) else {
            return Vec::new();
        };
        let previewing = doc.flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING);
        let mut events = Vec::new();

        if previewing && src != self.baseline {
            self.saw_new_image_in_preview = true;
        }

        // Preview ended after showing a different image: committed or cancelled
        if self.was_previewing && !previewing && self.saw_new_image_in_preview {
            if src != self.baseline {
                events.push(satisfied(&src));
            }
            self.saw_new_image_in_preview = false;
        }

        // Direct swap without any preview
        if !previewing && !self.was_previewing && src != self.last_src && src != self.baseline {
            events.push(satisfied(&src));
        }

        self.was_previewing = previewing;
        self.last_src = src;
        events
    }
}

fn satisfied(src: &str) -> WatchEvent {
    WatchEvent::Satisfied(SuccessDetail::Image {
        remote: is_remote(src),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDocument};

    fn doc(src: &str) -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.insert(
            ids::REPLACEABLE_IMAGE,
            Element::new().with_attribute(ids::ATTR_SRC, src),
        );
        doc
    }

    fn set_src(doc: &mut MemoryDocument, src: &str, previewing: bool) {
        doc.set_attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC, src);
        doc.set_flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING, previewing);
    }

    #[test]
    fn test_unchanged_image_never_fires() {
        let doc = doc("phoenix.png");
        let mut watcher = ImageWatcher::new("phoenix.png".into());
        for _ in 0..5 {
            assert!(watcher.poll(&doc).is_empty());
        }
    }

    #[test]
    fn test_direct_change_fires() {
        let mut doc = doc("phoenix.png");
        let mut watcher = ImageWatcher::new("phoenix.png".into());
        watcher.poll(&doc);
        set_src(&mut doc, "cat.png", false);
        assert_eq!(
            watcher.poll(&doc),
            vec![WatchEvent::Satisfied(SuccessDetail::Image { remote: false })]
        );
        // Steady state afterwards
        assert!(watcher.poll(&doc).is_empty());
    }

    #[test]
    fn test_preview_then_commit_fires_after_commit() {
        let mut doc = doc("phoenix.png");
        let mut watcher = ImageWatcher::new("phoenix.png".into());
        set_src(&mut doc, "https://img.example/cat.jpg", true);
        assert!(watcher.poll(&doc).is_empty());
        assert!(watcher.poll(&doc).is_empty());
        set_src(&mut doc, "https://img.example/cat.jpg", false);
        assert_eq!(
            watcher.poll(&doc),
            vec![WatchEvent::Satisfied(SuccessDetail::Image { remote: true })]
        );
    }

    #[test]
    fn test_preview_cancelled_does_not_fire() {
        let mut doc = doc("phoenix.png");
        let mut watcher = ImageWatcher::new("phoenix.png".into());
        set_src(&mut doc, "cat.png", true);
        watcher.poll(&doc);
        set_src(&mut doc, "phoenix.png", false);
        assert!(watcher.poll(&doc).is_empty());
        assert!(watcher.poll(&doc).is_empty());
    }

    #[test]
    fn test_missing_image_is_skipped() {
        let doc = MemoryDocument::new();
        let mut watcher = ImageWatcher::new("phoenix.png".into());
        assert!(watcher.poll(&doc).is_empty());
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://x/y.png"));
        assert!(is_remote("https://x/y.png"));
        assert!(!is_remote("assets/y.png"));
        assert!(!is_remote("data:image/png;base64,AAAA"));
    }
}

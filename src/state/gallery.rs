/// In-memory gallery of generated visions
///
/// An append-only, insertion-ordered collection, newest first. There is
/// no update or delete operation and no persistence: the gallery lives
/// for the session and survives workflow resets.

use uuid::Uuid;

use super::data::Vision;

#[derive(Debug, Default)]
pub struct GalleryStore {
    visions: Vec<Vision>,
}

impl GalleryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a vision so the newest entry is always first
    pub fn add(&mut self, vision: Vision) {
        self.visions.insert(0, vision);
    }

    /// Read-only view of all visions, newest first
    pub fn all(&self) -> &[Vision] {
        &self.visions
    }

    /// True iff no visions have been generated this session
    pub fn is_empty(&self) -> bool {
        self.visions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visions.len()
    }

    /// Look up a vision by id (used by the download and share actions)
    pub fn get(&self, id: Uuid) -> Option<&Vision> {
        self.visions.iter().find(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vision(goal: &str) -> Vision {
        Vision::new(format!("https://img.example/{goal}.webp"), goal.to_string())
    }

    #[test]
    fn test_starts_empty() {
        let gallery = GalleryStore::new();
        assert!(gallery.is_empty());
        assert_eq!(gallery.len(), 0);
        assert!(gallery.all().is_empty());
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut gallery = GalleryStore::new();
        let v1 = vision("first");
        let v2 = vision("second");
        let id1 = v1.id;
        let id2 = v2.id;

        gallery.add(v1);
        gallery.add(v2);

        let all = gallery.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, id2);
        assert_eq!(all[1].id, id1);
    }

    #[test]
    fn test_get_by_id() {
        let mut gallery = GalleryStore::new();
        let v = vision("findable");
        let id = v.id;
        gallery.add(v);

        assert_eq!(gallery.get(id).map(|v| v.goal.as_str()), Some("findable"));
        assert!(gallery.get(Uuid::new_v4()).is_none());
    }
}

//! Edit buffer over a mod profile snapshot.

use crate::catalog::{MetadataKvp, ModProfile, ModStatus, ModVisibility};

/// An editable value with a dirty flag.
///
/// `set` marks the field dirty unconditionally, even when the new value
/// equals the old one; "touched" is what the plan builder submits, not
/// "different".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditField<T> {
    value: T,
    dirty: bool,
}

impl<T> EditField<T> {
    fn clean(value: T) -> Self {
        Self {
            value,
            dirty: false,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// One gallery image in the edit buffer.
///
/// Entries seeded from the profile carry no bytes; entries the user adds
/// must, since their content has never been uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Filename the image keeps on the profile.
    pub file_name: String,
    /// Local image content for a new addition.
    pub bytes: Option<Vec<u8>>,
}

/// Buffered changes to one mod profile.
///
/// Snapshot the current profile with [`ModEdit::from_profile`], mutate
/// through the setters, then hand the buffer to [`submit`]. Untouched
/// fields stay clean and are never submitted.
///
/// [`submit`]: super::submit
#[derive(Debug, Clone)]
pub struct ModEdit {
    pub(crate) name: EditField<String>,
    pub(crate) name_id: EditField<String>,
    pub(crate) summary: EditField<String>,
    pub(crate) description: EditField<String>,
    pub(crate) homepage_url: EditField<String>,
    pub(crate) metadata_blob: EditField<String>,
    pub(crate) visibility: EditField<ModVisibility>,
    pub(crate) status: EditField<ModStatus>,
    /// Replacement logo content; dirty means "upload this".
    pub(crate) logo: EditField<Option<Vec<u8>>>,
    pub(crate) youtube_urls: EditField<Vec<String>>,
    pub(crate) sketchfab_urls: EditField<Vec<String>>,
    pub(crate) gallery: EditField<Vec<GalleryEntry>>,
    pub(crate) tags: EditField<Vec<String>>,
    pub(crate) metadata_kvps: EditField<Vec<MetadataKvp>>,
}

impl ModEdit {
    /// Snapshot a profile into an all-clean buffer.
    pub fn from_profile(profile: &ModProfile) -> Self {
        let gallery = profile
            .media
            .gallery_images
            .iter()
            .map(|image| GalleryEntry {
                file_name: image.file_name.clone(),
                bytes: None,
            })
            .collect();

        Self {
            name: EditField::clean(profile.name.clone()),
            name_id: EditField::clean(profile.name_id.clone()),
            summary: EditField::clean(profile.summary.clone()),
            description: EditField::clean(profile.description.clone()),
            homepage_url: EditField::clean(profile.homepage_url.clone()),
            metadata_blob: EditField::clean(profile.metadata_blob.clone()),
            visibility: EditField::clean(profile.visibility),
            status: EditField::clean(profile.status),
            logo: EditField::clean(None),
            youtube_urls: EditField::clean(profile.media.youtube_urls.clone()),
            sketchfab_urls: EditField::clean(profile.media.sketchfab_urls.clone()),
            gallery: EditField::clean(gallery),
            tags: EditField::clean(profile.tags.clone()),
            metadata_kvps: EditField::clean(profile.metadata_kvps.clone()),
        }
    }

    /// Whether any field has been touched.
    pub fn has_changes(&self) -> bool {
        self.name.is_dirty()
            || self.name_id.is_dirty()
            || self.summary.is_dirty()
            || self.description.is_dirty()
            || self.homepage_url.is_dirty()
            || self.metadata_blob.is_dirty()
            || self.visibility.is_dirty()
            || self.status.is_dirty()
            || self.logo.is_dirty()
            || self.youtube_urls.is_dirty()
            || self.sketchfab_urls.is_dirty()
            || self.gallery.is_dirty()
            || self.tags.is_dirty()
            || self.metadata_kvps.is_dirty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name.set(name.into());
    }

    pub fn set_name_id(&mut self, name_id: impl Into<String>) {
        self.name_id.set(name_id.into());
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary.set(summary.into());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description.set(description.into());
    }

    pub fn set_homepage_url(&mut self, url: impl Into<String>) {
        self.homepage_url.set(url.into());
    }

    pub fn set_metadata_blob(&mut self, blob: impl Into<String>) {
        self.metadata_blob.set(blob.into());
    }

    pub fn set_visibility(&mut self, visibility: ModVisibility) {
        self.visibility.set(visibility);
    }

    pub fn set_status(&mut self, status: ModStatus) {
        self.status.set(status);
    }

    /// Stage a replacement logo.
    pub fn set_logo(&mut self, image: Vec<u8>) {
        self.logo.set(Some(image));
    }

    /// Replace the full YouTube URL list.
    pub fn set_youtube_urls(&mut self, urls: Vec<String>) {
        self.youtube_urls.set(urls);
    }

    /// Replace the full Sketchfab URL list.
    pub fn set_sketchfab_urls(&mut self, urls: Vec<String>) {
        self.sketchfab_urls.set(urls);
    }

    /// Replace the full gallery list.
    pub fn set_gallery(&mut self, entries: Vec<GalleryEntry>) {
        self.gallery.set(entries);
    }

    /// Stage a new gallery image.
    pub fn add_gallery_image(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) {
        let mut gallery = self.gallery.get().clone();
        gallery.push(GalleryEntry {
            file_name: file_name.into(),
            bytes: Some(bytes),
        });
        self.gallery.set(gallery);
    }

    /// Drop a gallery image by filename.
    pub fn remove_gallery_image(&mut self, file_name: &str) {
        let mut gallery = self.gallery.get().clone();
        gallery.retain(|entry| entry.file_name != file_name);
        self.gallery.set(gallery);
    }

    /// Replace the full tag list.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags.set(tags);
    }

    /// Replace the full metadata KVP list.
    pub fn set_metadata_kvps(&mut self, kvps: Vec<MetadataKvp>) {
        self.metadata_kvps.set(kvps);
    }
}

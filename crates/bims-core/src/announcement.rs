//! Barangay announcements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{
  error::{Result, Validator},
  resident::nullable,
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
  #[default]
  Public,
  Internal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
  pub announcement_id: Uuid,
  pub title:           String,
  pub content:         String,
  pub image:           Option<String>,
  pub posted_by:       Option<Uuid>,
  pub published:       bool,
  pub visible_to:      Visibility,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl Announcement {
  /// Whether anonymous callers may read it.
  pub fn is_public(&self) -> bool { self.published && self.visible_to == Visibility::Public }
}

fn default_published() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct NewAnnouncement {
  pub title:      String,
  pub content:    String,
  pub image:      Option<String>,
  #[serde(default = "default_published")]
  pub published:  bool,
  #[serde(default)]
  pub visible_to: Visibility,
}

impl NewAnnouncement {
  pub fn validate(&self) -> Result<()> {
    Validator::new()
      .require(&self.title, "title")
      .require(&self.content, "content")
      .finish()
  }

  pub fn into_announcement(self, posted_by: Option<Uuid>, now: DateTime<Utc>) -> Announcement {
    Announcement {
      announcement_id: Uuid::new_v4(),
      title: self.title.trim().to_owned(),
      content: self.content,
      image: self.image,
      posted_by,
      published: self.published,
      visible_to: self.visible_to,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementPatch {
  pub title:      Option<String>,
  pub content:    Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub image:      Option<Option<String>>,
  pub published:  Option<bool>,
  pub visible_to: Option<Visibility>,
}

impl AnnouncementPatch {
  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    if let Some(title) = &self.title {
      v.require(title, "title");
    }
    if let Some(content) = &self.content {
      v.require(content, "content");
    }
    v.finish()
  }

  pub fn apply(self, a: &mut Announcement, now: DateTime<Utc>) {
    if let Some(v) = self.title {
      a.title = v.trim().to_owned();
    }
    if let Some(v) = self.content {
      a.content = v;
    }
    if let Some(v) = self.image {
      a.image = v;
    }
    if let Some(v) = self.published {
      a.published = v;
    }
    if let Some(v) = self.visible_to {
      a.visible_to = v;
    }
    a.updated_at = now;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_published_public() {
    let a: NewAnnouncement =
      serde_json::from_str(r#"{"title":"Clean-up drive","content":"Saturday 7am"}"#).unwrap();
    assert!(a.published);
    assert_eq!(a.visible_to, Visibility::Public);
  }

  #[test]
  fn patch_can_clear_image() {
    let mut a = NewAnnouncement {
      title:      "t".into(),
      content:    "c".into(),
      image:      Some("/img.png".into()),
      published:  true,
      visible_to: Visibility::Public,
    }
    .into_announcement(None, Utc::now());
    let patch: AnnouncementPatch = serde_json::from_str(r#"{"image":null}"#).unwrap();
    patch.apply(&mut a, Utc::now());
    assert_eq!(a.image, None);
  }
}

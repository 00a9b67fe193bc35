use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
  Error, Result,
  announcement::{Announcement, AnnouncementPatch, NewAnnouncement},
  audit::{Action, Actor, Entity},
  service::{audit, backend},
  store::{AnnouncementQuery, Page, RecordStore},
};

pub async fn get<S: RecordStore>(store: &S, id: Uuid) -> Result<Announcement> {
  store
    .get_announcement(id)
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::not_found("Announcement"))
}

/// Like [`get`], but hides drafts and internal posts.
pub async fn get_public<S: RecordStore>(store: &S, id: Uuid) -> Result<Announcement> {
  let announcement = get(store, id).await?;
  if !announcement.is_public() {
    return Err(Error::not_found("Announcement"));
  }
  Ok(announcement)
}

pub async fn list<S: RecordStore>(
  store: &S,
  query: AnnouncementQuery,
) -> Result<Page<Announcement>> {
  store.list_announcements(query).await.map_err(backend)
}

pub async fn create<S: RecordStore>(
  store: &S,
  input: NewAnnouncement,
  actor: Actor,
) -> Result<Announcement> {
  input.validate()?;
  let announcement = store
    .insert_announcement(input.into_announcement(actor.user_id, Utc::now()))
    .await
    .map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::CreateAnnouncement,
    Entity::Announcement,
    Some(announcement.announcement_id),
    json!({ "title": announcement.title }),
  )
  .await;
  Ok(announcement)
}

pub async fn update<S: RecordStore>(
  store: &S,
  id: Uuid,
  patch: AnnouncementPatch,
  actor: Actor,
) -> Result<Announcement> {
  patch.validate()?;
  let mut announcement = get(store, id).await?;
  patch.apply(&mut announcement, Utc::now());
  let announcement = store.update_announcement(announcement).await.map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::UpdateAnnouncement,
    Entity::Announcement,
    Some(id),
    json!({ "title": announcement.title, "published": announcement.published }),
  )
  .await;
  Ok(announcement)
}

pub async fn delete<S: RecordStore>(store: &S, id: Uuid, actor: Actor) -> Result<()> {
  let announcement = get(store, id).await?;
  if !store.delete_announcement(id).await.map_err(backend)? {
    return Err(Error::not_found("Announcement"));
  }

  audit::record(
    store,
    actor,
    Action::DeleteAnnouncement,
    Entity::Announcement,
    Some(id),
    json!({ "title": announcement.title }),
  )
  .await;
  Ok(())
}

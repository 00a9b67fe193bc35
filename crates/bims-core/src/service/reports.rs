use chrono::Utc;

use crate::{
  Result,
  report::{BlotterReport, DemographicsReport, DocumentReport, PopulationReport, VoterReport},
  service::backend,
  store::RecordStore,
};

pub async fn population<S: RecordStore>(store: &S) -> Result<PopulationReport> {
  store.population_report(Utc::now().date_naive()).await.map_err(backend)
}

pub async fn demographics<S: RecordStore>(store: &S) -> Result<DemographicsReport> {
  store.demographics_report().await.map_err(backend)
}

pub async fn voters<S: RecordStore>(store: &S) -> Result<VoterReport> {
  store.voter_report().await.map_err(backend)
}

pub async fn documents<S: RecordStore>(store: &S) -> Result<DocumentReport> {
  store.document_report().await.map_err(backend)
}

pub async fn blotters<S: RecordStore>(store: &S) -> Result<BlotterReport> {
  store.blotter_report().await.map_err(backend)
}

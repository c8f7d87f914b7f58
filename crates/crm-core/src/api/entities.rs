//! Clients, leads, projects, contacts and interactions

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiClient, ApiEvents, ApiError, ApiRequest, Transport};
use crate::domain::{
    Client, ClientPage, Contact, EntityKind, Interaction, InteractionPage, Lead, LeadPage,
    Project, ProjectPage, TrashItem,
};
use crate::sorting::LegacySortOrder;
use crate::validation::{ClientInput, ContactInput, InteractionInput, LeadInput, ProjectInput};

// ========================
// Argument Structs
// ========================

/// `page`/`per_page`/`sort` of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
    pub sort: LegacySortOrder,
}

impl PageQuery {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query("page", self.page)
            .query("per_page", self.per_page)
            .query("sort", self.sort.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct AssignArgs {
    pub assigned_to: u32,
}

#[derive(Serialize)]
struct LeadIdsArgs<'a> {
    lead_ids: &'a [u32],
}

#[derive(Serialize)]
struct ClientIdsArgs<'a> {
    client_ids: &'a [u32],
}

fn collection_path(kind: EntityKind) -> String {
    format!("/{}/", kind.collection())
}

fn item_path(kind: EntityKind, id: u32) -> String {
    format!("/{}/{}", kind.collection(), id)
}

// ========================
// Lists
// ========================

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    /// Page of the caller's own records (`{clients|leads|projects, total}`)
    pub async fn list_page<R: DeserializeOwned>(&self, kind: EntityKind, query: &PageQuery) -> Result<R, ApiError> {
        let request = query.apply(ApiRequest::get(collection_path(kind)));
        self.fetch_json(&request).await
    }

    /// Admin view over every user's records, optionally limited to one owner
    pub async fn list_all_page<R: DeserializeOwned>(
        &self,
        kind: EntityKind,
        query: &PageQuery,
        user_email: Option<&str>,
    ) -> Result<R, ApiError> {
        let request = query
            .apply(ApiRequest::get(format!("/{}/all", kind.collection())))
            .query_opt("user_email", user_email.filter(|e| !e.is_empty()));
        self.fetch_json(&request).await
    }

    pub async fn list_clients(&self, query: &PageQuery) -> Result<ClientPage, ApiError> {
        self.list_page(EntityKind::Client, query).await
    }

    pub async fn list_leads(&self, query: &PageQuery) -> Result<LeadPage, ApiError> {
        self.list_page(EntityKind::Lead, query).await
    }

    pub async fn list_projects(&self, query: &PageQuery) -> Result<ProjectPage, ApiError> {
        self.list_page(EntityKind::Project, query).await
    }
}

// ========================
// Single records
// ========================

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub async fn get_client(&self, id: u32) -> Result<Client, ApiError> {
        self.fetch_json(&ApiRequest::get(item_path(EntityKind::Client, id))).await
    }

    pub async fn get_lead(&self, id: u32) -> Result<Lead, ApiError> {
        self.fetch_json(&ApiRequest::get(item_path(EntityKind::Lead, id))).await
    }

    pub async fn get_project(&self, id: u32) -> Result<Project, ApiError> {
        self.fetch_json(&ApiRequest::get(item_path(EntityKind::Project, id))).await
    }

    pub async fn create_client(&self, input: &ClientInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::post(collection_path(EntityKind::Client)).json(input)?).await
    }

    pub async fn update_client(&self, id: u32, input: &ClientInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::put(item_path(EntityKind::Client, id)).json(input)?).await
    }

    pub async fn create_lead(&self, input: &LeadInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::post(collection_path(EntityKind::Lead)).json(input)?).await
    }

    pub async fn update_lead(&self, id: u32, input: &LeadInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::put(item_path(EntityKind::Lead, id)).json(input)?).await
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::post(collection_path(EntityKind::Project)).json(input)?).await
    }

    pub async fn update_project(&self, id: u32, input: &ProjectInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::put(item_path(EntityKind::Project, id)).json(input)?).await
    }

    /// Soft delete; the record moves to the trash
    pub async fn delete_entity(&self, kind: EntityKind, id: u32) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(item_path(kind, id))).await
    }

    pub async fn assign_entity(&self, kind: EntityKind, id: u32, user_id: u32) -> Result<(), ApiError> {
        let request = ApiRequest::put(format!("{}/assign", item_path(kind, id)))
            .json(&AssignArgs { assigned_to: user_id })?;
        self.execute(&request).await
    }

    pub async fn bulk_delete_leads(&self, ids: &[u32]) -> Result<(), ApiError> {
        let request = ApiRequest::post("/leads/bulk-delete").json(&LeadIdsArgs { lead_ids: ids })?;
        self.execute(&request).await
    }
}

// ========================
// Trash
// ========================

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub async fn list_trash(&self, kind: EntityKind) -> Result<Vec<TrashItem>, ApiError> {
        self.fetch_json(&ApiRequest::get(format!("/{}/trash", kind.collection()))).await
    }

    pub async fn restore_entity(&self, kind: EntityKind, id: u32) -> Result<(), ApiError> {
        self.execute(&ApiRequest::put(format!("{}/restore", item_path(kind, id)))).await
    }

    /// Permanent delete of a trashed record
    pub async fn purge_entity(&self, kind: EntityKind, id: u32) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(format!("{}/purge", item_path(kind, id)))).await
    }

    pub async fn bulk_purge_clients(&self, ids: &[u32]) -> Result<(), ApiError> {
        let request = ApiRequest::post("/clients/bulk-purge").json(&ClientIdsArgs { client_ids: ids })?;
        self.execute(&request).await
    }
}

// ========================
// Contacts
// ========================

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub async fn list_contacts(&self, kind: EntityKind, id: u32) -> Result<Vec<Contact>, ApiError> {
        let request = ApiRequest::get("/contacts/").query(kind.id_field(), id);
        self.fetch_json(&request).await
    }

    pub async fn create_contact(&self, input: &ContactInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::post("/contacts/").json(input)?).await
    }

    pub async fn update_contact(&self, id: u32, input: &ContactInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::put(format!("/contacts/{}", id)).json(input)?).await
    }

    pub async fn delete_contact(&self, id: u32) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(format!("/contacts/{}", id))).await
    }
}

// ========================
// Interactions
// ========================

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub async fn list_interactions(&self, kind: EntityKind, id: u32) -> Result<Vec<Interaction>, ApiError> {
        let request = ApiRequest::get("/interactions/").query(kind.id_field(), id);
        let page: InteractionPage = self.fetch_json(&request).await?;
        Ok(page.interactions)
    }

    pub async fn create_interaction(&self, input: &InteractionInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::post("/interactions/").json(input)?).await
    }

    pub async fn update_interaction(&self, id: u32, input: &InteractionInput) -> Result<(), ApiError> {
        self.execute(&ApiRequest::put(format!("/interactions/{}", id)).json(input)?).await
    }

    pub async fn delete_interaction(&self, id: u32) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(format!("/interactions/{}", id))).await
    }
}

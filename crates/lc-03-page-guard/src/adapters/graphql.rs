//! GraphQL adapter for [`PortalBackend`].
//!
//! Every query is a `POST {query, operationName, variables}` to one endpoint
//! with the caller's `Cookie` header forwarded, so the service sees the same
//! session the browser sent.

use crate::adapters::queries;
use crate::error::BackendError;
use crate::ports::outbound::{Operation, PortalBackend, Session};
use async_trait::async_trait;
use life_telemetry::{HistogramTimer, UPSTREAM_ERRORS};
use reqwest::header::COOKIE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{
    Club, Event, EventBillsStatus, EventReport, Holiday, Member, Role, StorageFile, UpstreamError,
    UserProfile, Viewer,
};
use std::time::Duration;
use tracing::{debug, warn};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://gateway/graphql";

/// Title given to errors reported in a GraphQL `errors` array.
const GRAPHQL_ERROR_TITLE: &str = "GraphQL Error";

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Connection settings for the GraphQL service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQlConfig {
    pub endpoint: String,
    /// Whole-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(2),
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'a str,
    operation_name: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewerData {
    user_meta: Option<UserMeta>,
}

#[derive(Debug, Deserialize)]
struct UserMeta {
    uid: String,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    img: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileFields {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfileData {
    user_meta: Option<UserMeta>,
    user_profile: Option<ProfileFields>,
}

#[derive(Debug, Deserialize)]
struct EventData {
    event: Option<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventReportData {
    event_report: Option<EventReport>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventBillsData {
    event_bills: Option<EventBillsStatus>,
}

#[derive(Debug, Deserialize)]
struct EventRef {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClashingEventsData {
    clashing_events: Option<Vec<EventRef>>,
}

#[derive(Debug, Deserialize)]
struct EventIdData {
    eventid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClubData {
    club: Option<Club>,
}

#[derive(Debug, Deserialize)]
struct MemberData {
    member: Option<Member>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembershipsData {
    member_roles: Option<Vec<Member>>,
}

#[derive(Debug, Deserialize)]
struct MembersData {
    members: Option<Vec<Member>>,
}

#[derive(Debug, Deserialize)]
struct HolidayData {
    holiday: Option<Holiday>,
}

#[derive(Debug, Deserialize)]
struct StorageFileData {
    storagefile: Option<StorageFile>,
}

/// Decode one GraphQL HTTP answer.
///
/// An `errors` array wins over `data`. A body that is not a GraphQL response
/// is reported as the HTTP status when that status is not a success.
fn parse_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, BackendError> {
    let parsed: GraphQlResponse<T> = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(_) if !(200..300).contains(&status) => return Err(BackendError::Status(status)),
        Err(e) => return Err(BackendError::Decode(e.to_string())),
    };

    if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors.into_iter().map(|e| e.message).collect();
        return Err(UpstreamError::new(GRAPHQL_ERROR_TITLE, messages).into());
    }

    parsed
        .data
        .ok_or_else(|| BackendError::Decode("response carries neither data nor errors".into()))
}

// =============================================================================
// CLIENT
// =============================================================================

/// [`PortalBackend`] over HTTP.
pub struct GraphQlBackend {
    client: Client,
    config: GraphQlConfig,
}

impl GraphQlBackend {
    pub fn new(config: GraphQlConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn query<T: DeserializeOwned>(
        &self,
        session: &Session,
        operation: Operation,
        document: &str,
        variables: Value,
    ) -> Result<T, BackendError> {
        let _timer = HistogramTimer::upstream(operation.as_str());

        let result = self.execute(session, operation, document, variables).await;

        if let Err(e) = &result {
            UPSTREAM_ERRORS
                .with_label_values(&[operation.as_str(), e.kind()])
                .inc();
            match e {
                BackendError::Upstream(upstream) => {
                    debug!(operation = %operation, error = %upstream, "GraphQL error answer")
                }
                other => warn!(operation = %operation, error = %other, "GraphQL request failed"),
            }
        }

        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        session: &Session,
        operation: Operation,
        document: &str,
        variables: Value,
    ) -> Result<T, BackendError> {
        let body = GraphQlRequest {
            query: document,
            operation_name: operation.as_str(),
            variables,
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(cookie) = session.cookie() {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        parse_response(status, &bytes)
    }
}

impl std::fmt::Debug for GraphQlBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlBackend")
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}

fn merge_profile(meta: Option<UserMeta>, fields: Option<ProfileFields>) -> Option<UserProfile> {
    let meta = meta?;
    let fields = fields.unwrap_or_default();
    Some(UserProfile {
        uid: meta.uid,
        role: meta.role,
        first_name: fields.first_name,
        last_name: fields.last_name,
        email: fields.email,
        img: meta.img,
    })
}

#[async_trait]
impl PortalBackend for GraphQlBackend {
    async fn current_viewer(&self, session: &Session) -> Result<Viewer, BackendError> {
        if session.cookie().is_none() {
            return Ok(Viewer::anonymous());
        }
        let data: ViewerData = self
            .query(
                session,
                Operation::Viewer,
                queries::GET_VIEWER,
                json!({ "userInput": null }),
            )
            .await?;
        Ok(data
            .user_meta
            .map(|meta| Viewer {
                uid: Some(meta.uid),
                role: meta.role,
            })
            .unwrap_or_default())
    }

    async fn event(&self, session: &Session, id: &str) -> Result<Option<Event>, BackendError> {
        let data: EventData = self
            .query(
                session,
                Operation::Event,
                queries::GET_EVENT,
                json!({ "eventid": id }),
            )
            .await?;
        Ok(data.event)
    }

    async fn event_report(
        &self,
        session: &Session,
        event_id: &str,
    ) -> Result<Option<EventReport>, BackendError> {
        let data: EventReportData = self
            .query(
                session,
                Operation::EventReport,
                queries::GET_EVENT_REPORT,
                json!({ "eventid": event_id }),
            )
            .await?;
        Ok(data.event_report)
    }

    async fn event_bills(
        &self,
        session: &Session,
        event_id: &str,
    ) -> Result<Option<EventBillsStatus>, BackendError> {
        let data: EventBillsData = self
            .query(
                session,
                Operation::EventBills,
                queries::GET_EVENT_BILLS_STATUS,
                json!({ "eventid": event_id }),
            )
            .await?;
        Ok(data.event_bills)
    }

    async fn clashing_events(
        &self,
        session: &Session,
        event_id: &str,
        filter_by_location: bool,
    ) -> Result<Vec<String>, BackendError> {
        let data: ClashingEventsData = self
            .query(
                session,
                Operation::ClashingEvents,
                queries::GET_CLASHING_EVENTS,
                json!({ "eventId": event_id, "filterByLocation": filter_by_location }),
            )
            .await?;
        Ok(data
            .clashing_events
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.id)
            .collect())
    }

    async fn event_id_by_code(
        &self,
        session: &Session,
        code: &str,
    ) -> Result<Option<String>, BackendError> {
        let data: EventIdData = self
            .query(
                session,
                Operation::EventIdByCode,
                queries::GET_EVENT_ID_FROM_CODE,
                json!({ "code": code }),
            )
            .await?;
        Ok(data.eventid.filter(|id| !id.is_empty()))
    }

    async fn club(&self, session: &Session, cid: &str) -> Result<Option<Club>, BackendError> {
        let data: ClubData = self
            .query(
                session,
                Operation::Club,
                queries::GET_CLUB,
                json!({ "clubInput": { "cid": cid } }),
            )
            .await?;
        Ok(data.club)
    }

    async fn member(
        &self,
        session: &Session,
        cid: &str,
        uid: &str,
    ) -> Result<Option<Member>, BackendError> {
        let data: MemberData = self
            .query(
                session,
                Operation::Member,
                queries::GET_MEMBER,
                json!({ "memberInput": { "cid": cid, "uid": uid, "rid": null } }),
            )
            .await?;
        Ok(data.member)
    }

    async fn user_profile(
        &self,
        session: &Session,
        uid: &str,
    ) -> Result<Option<UserProfile>, BackendError> {
        let data: UserProfileData = self
            .query(
                session,
                Operation::UserProfile,
                queries::GET_USER_PROFILE,
                json!({ "userInput": { "uid": uid } }),
            )
            .await?;
        Ok(merge_profile(data.user_meta, data.user_profile))
    }

    async fn memberships(&self, session: &Session, uid: &str) -> Result<Vec<Member>, BackendError> {
        let data: MembershipsData = self
            .query(
                session,
                Operation::Memberships,
                queries::GET_MEMBERSHIPS,
                json!({ "uid": uid }),
            )
            .await?;
        Ok(data.member_roles.unwrap_or_default())
    }

    async fn club_members(
        &self,
        session: &Session,
        cid: &str,
    ) -> Result<Vec<Member>, BackendError> {
        let data: MembersData = self
            .query(
                session,
                Operation::ClubMembers,
                queries::GET_MEMBERS,
                json!({ "clubInput": { "cid": cid } }),
            )
            .await?;
        Ok(data.members.unwrap_or_default())
    }

    async fn holiday(&self, session: &Session, id: &str) -> Result<Option<Holiday>, BackendError> {
        let data: HolidayData = self
            .query(
                session,
                Operation::Holiday,
                queries::GET_HOLIDAY,
                json!({ "id": id }),
            )
            .await?;
        Ok(data.holiday)
    }

    async fn storage_file(
        &self,
        session: &Session,
        id: &str,
    ) -> Result<Option<StorageFile>, BackendError> {
        let data: StorageFileData = self
            .query(
                session,
                Operation::StorageFile,
                queries::GET_FILE,
                json!({ "fileId": id }),
            )
            .await?;
        Ok(data.storagefile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::EventState;

    #[test]
    fn test_parse_data() {
        let body = br#"{"data": {"event": {"_id": "ev1", "clubid": "drama.club", "status": {"state": "approved"}}}}"#;
        let data: EventData = parse_response(200, body).unwrap();
        let event = data.event.unwrap();
        assert_eq!(event.id, "ev1");
        assert_eq!(event.state(), EventState::Approved);
    }

    #[test]
    fn test_parse_null_record() {
        let data: EventData = parse_response(200, br#"{"data": {"event": null}}"#).unwrap();
        assert!(data.event.is_none());
    }

    #[test]
    fn test_errors_win_over_data() {
        let body = br#"{"data": {"event": null}, "errors": [{"message": "Event not found"}, {"message": "second"}]}"#;
        let err = parse_response::<EventData>(200, body).unwrap_err();
        let upstream = err.upstream().unwrap();
        assert!(upstream.is_event_not_found());
        assert_eq!(upstream.messages.len(), 2);
        assert_eq!(upstream.title, "GraphQL Error");
    }

    #[test]
    fn test_empty_errors_array_ignored() {
        let body = br#"{"data": {"eventid": "ev1"}, "errors": []}"#;
        let data: EventIdData = parse_response(200, body).unwrap();
        assert_eq!(data.eventid.as_deref(), Some("ev1"));
    }

    #[test]
    fn test_non_graphql_bodies() {
        assert!(matches!(
            parse_response::<EventData>(502, b"<html>Bad Gateway</html>"),
            Err(BackendError::Status(502))
        ));
        assert!(matches!(
            parse_response::<EventData>(200, b"not json"),
            Err(BackendError::Decode(_))
        ));
        assert!(matches!(
            parse_response::<EventData>(200, b"{}"),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn test_graphql_error_on_bad_status_is_still_upstream() {
        let body = br#"{"errors": [{"message": "Unauthorized"}]}"#;
        let err = parse_response::<EventData>(400, body).unwrap_err();
        assert_eq!(err.kind(), "graphql");
    }

    #[test]
    fn test_merge_profile() {
        let data: UserProfileData = serde_json::from_str(
            r#"{
                "userMeta": {"uid": "a.b", "role": "public", "img": null},
                "userProfile": {"firstName": "A", "lastName": "B", "email": "a.b@students.iiit.ac.in"}
            }"#,
        )
        .unwrap();
        let profile = merge_profile(data.user_meta, data.user_profile).unwrap();
        assert_eq!(profile.uid, "a.b");
        assert_eq!(profile.role, Some(Role::Public));
        assert_eq!(profile.first_name.as_deref(), Some("A"));

        assert!(merge_profile(None, Some(ProfileFields::default())).is_none());
    }

    #[test]
    fn test_request_shape() {
        let body = GraphQlRequest {
            query: queries::GET_EVENT,
            operation_name: Operation::Event.as_str(),
            variables: json!({"eventid": "ev1"}),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["operationName"], "Event");
        assert_eq!(value["variables"]["eventid"], "ev1");
    }

    #[test]
    fn test_config_from_toml_like_json() {
        let config: GraphQlConfig =
            serde_json::from_str(r#"{"endpoint": "http://api:8000/graphql", "timeout": "3s"}"#)
                .unwrap();
        assert_eq!(config.endpoint, "http://api:8000/graphql");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_client_builds() {
        let backend = GraphQlBackend::new(GraphQlConfig::default()).unwrap();
        assert_eq!(backend.endpoint(), DEFAULT_ENDPOINT);
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{AddOn, CleaningService, PestService};

pub const NETWORK_ERROR_MESSAGE: &str = "網絡連接失敗，請檢查您的網絡連接";
pub const SUBMISSION_FALLBACK_MESSAGE: &str = "提交失敗，請稍後重試";
pub const SUCCESS_FALLBACK_MESSAGE: &str = "預約已成功提交";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Pest,
    Cleaning,
}

impl ServiceKind {
    pub const ALL: [Self; 2] = [Self::Pest, Self::Cleaning];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pest => "pest",
            Self::Cleaning => "cleaning",
        }
    }

    /// Value written to the `service` query parameter.
    pub const fn query_value(self) -> &'static str {
        match self {
            Self::Pest => "pest",
            Self::Cleaning => "clean",
        }
    }

    /// Strict parse used for config and CLI input.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pest" => Some(Self::Pest),
            "clean" | "cleaning" => Some(Self::Cleaning),
            _ => None,
        }
    }

    /// Lenient parse used for deep links: anything unknown lands on pest.
    pub fn from_query(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::Pest)
    }

    pub const fn tab_label(self) -> &'static str {
        match self {
            Self::Pest => "滅蟲服務",
            Self::Cleaning => "清潔服務",
        }
    }

    pub const fn brand(self) -> &'static str {
        match self {
            Self::Pest => "滅蟲職人 PEST KILLER",
            Self::Cleaning => "匠人潔淨社 CLEANING LAB",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Self::Pest => "滅蟲職人線上快速預約",
            Self::Cleaning => "匠人潔淨社線上快速預約",
        }
    }

    pub const fn tagline(self) -> &'static str {
        match self {
            Self::Pest => "專業職人精神，為您打造無蟲煩惱的純淨空間",
            Self::Cleaning => "匠心獨運，細緻入微，還原家居最初的潔淨本質",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Name,
    Phone,
    AltContact,
    AltPhone,
    Region,
    SubDistrict,
    Address,
    PestService,
    MainService,
    AddServices,
    RoomCount,
    MattressCount,
    CarpetCount,
    CurtainCount,
    SqFt,
    Remarks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    Phone,
    Choice,
    Picker,
    Toggles,
}

impl FieldKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "稱呼 (必填)",
            Self::Phone => "聯絡電話 (必填)",
            Self::AltContact => "第二聯絡人 (如有)",
            Self::AltPhone => "第二聯絡人電話 (如有)",
            Self::Region => "大區",
            Self::SubDistrict => "細分地區 (可搜尋)",
            Self::Address => "詳細地址",
            Self::PestService => "所需滅蟲服務",
            Self::MainService => "主要服務內容",
            Self::AddServices => "推薦追加服務",
            Self::RoomCount => "房間數目 (床蝨專用)",
            Self::MattressCount => "床褥數目",
            Self::CarpetCount => "地毯數目",
            Self::CurtainCount => "窗簾/布藝數目",
            Self::SqFt => "單位尺數 (平方尺)",
            Self::Remarks => "備註 (選填)",
        }
    }

    pub const fn input(self) -> FieldInput {
        match self {
            Self::Name | Self::AltContact | Self::Address | Self::Remarks => FieldInput::Text,
            Self::Phone | Self::AltPhone => FieldInput::Phone,
            Self::SubDistrict => FieldInput::Picker,
            Self::AddServices => FieldInput::Toggles,
            Self::Region
            | Self::PestService
            | Self::MainService
            | Self::RoomCount
            | Self::MattressCount
            | Self::CarpetCount
            | Self::CurtainCount
            | Self::SqFt => FieldInput::Choice,
        }
    }

    pub const fn is_editable_text(self) -> bool {
        matches!(self.input(), FieldInput::Text | FieldInput::Phone)
    }
}

/// Contact and location fields shared by both booking drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    pub alt_contact: String,
    pub alt_phone: String,
    pub region: String,
    pub sub_district: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PestControlBooking {
    #[serde(flatten)]
    pub contact: ContactDetails,
    pub service: PestService,
    pub room_count: String,
    pub mattress_count: String,
    pub sq_ft: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningBooking {
    #[serde(flatten)]
    pub contact: ContactDetails,
    pub main_service: CleaningService,
    pub add_services: Vec<AddOn>,
    pub carpet_count: String,
    pub mattress_count: String,
    pub curtain_count: String,
    pub sq_ft: String,
    pub remarks: String,
}

/// A draft that passed the submission gate, tagged by the form it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BookingDraft {
    Pest(PestControlBooking),
    Cleaning(CleaningBooking),
}

impl BookingDraft {
    pub const fn service_kind(&self) -> ServiceKind {
        match self {
            Self::Pest(_) => ServiceKind::Pest,
            Self::Cleaning(_) => ServiceKind::Cleaning,
        }
    }

    pub const fn contact(&self) -> &ContactDetails {
        match self {
            Self::Pest(booking) => &booking.contact,
            Self::Cleaning(booking) => &booking.contact,
        }
    }

    pub fn service_label(&self) -> &'static str {
        match self {
            Self::Pest(booking) => booking.service.label(),
            Self::Cleaning(booking) => booking.main_service.label(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationConstraints {
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub skill_no_match: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_first_job: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_last_job: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_job_delayed: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_no_jobs_today: Option<bool>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecommendation {
    #[serde(default, deserialize_with = "lenient_int")]
    pub rank: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub staff: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_time: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub quality_score: f64,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub reasons: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub constraints: Option<RecommendationConstraints>,
}

impl ScheduleRecommendation {
    pub fn skill_mismatch(&self) -> bool {
        self.constraints
            .as_ref()
            .and_then(|constraints| constraints.skill_no_match)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMeta {
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_options_evaluated: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub requires_human_confirmation: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub disclaimer: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Submitted fields echoed back by the automation backend under display keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEcho {
    #[serde(
        rename = "服務類型",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_type: Option<String>,
    #[serde(
        rename = "品牌",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand: Option<String>,
    #[serde(
        rename = "服務",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub service: Option<String>,
    #[serde(
        rename = "地區",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<String>,
    #[serde(
        rename = "客戶名稱",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_name: Option<String>,
    #[serde(
        rename = "聯絡電話",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        rename = "詳細地址",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(
        rename = "單位尺數",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sq_ft: Option<String>,
    #[serde(
        rename = "備註",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub remarks: Option<String>,
    #[serde(
        rename = "提交日期",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_date: Option<String>,
    #[serde(
        rename = "提交時間",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_time: Option<String>,
}

/// Response envelope from the automation backend. Keys this type does not
/// model are kept in `extra`; the reply exactly as received is kept in `raw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingResultData {
    #[serde(default, deserialize_with = "lenient_list")]
    pub recommendations: Vec<ScheduleRecommendation>,
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub meta: Option<ResultMeta>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(flatten)]
    pub echo: SubmissionEcho,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl BookingResultData {
    /// Decodes any JSON reply. Parts that do not fit fall back to their
    /// defaults, and a body that is not an object yields an empty envelope.
    pub fn from_value(value: Value) -> Self {
        let mut data = if value.is_object() {
            serde_json::from_value(value.clone()).unwrap_or_default()
        } else {
            Self::default()
        };
        data.raw = Some(value);
        data
    }

    /// The reply as received, or the decoded envelope when none was kept.
    pub fn raw_value(&self) -> Value {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => serde_json::to_value(self).unwrap_or(Value::Null),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionErrorKind {
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    #[serde(rename = "SUBMISSION_ERROR")]
    Submission,
}

impl SubmissionErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Submission => "SUBMISSION_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BookingResultData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SubmissionErrorKind>,
}

impl BookingResponse {
    pub fn succeeded(message: impl Into<String>, data: BookingResultData) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(kind: SubmissionErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(kind),
        }
    }
}

pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.round() as i64)),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|float| float.is_finite())
            .map(|float| float.round() as i64),
        _ => None,
    }
}

fn value_as_float(value: &Value) -> Option<f64> {
    let float = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    float.filter(|float| float.is_finite())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_text(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items.iter().filter_map(value_as_text).collect())
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_int(deserializer)?.unwrap_or_default())
}

fn lenient_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_int(&value))
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_float(&value).unwrap_or_default())
}

// Follows JavaScript truthiness so backend flags like `1` or `"yes"` still count.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        Value::Number(number) => Some(number.as_f64().is_some_and(|float| float != 0.0)),
        Value::String(text) => Some(!text.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

// Items that are not objects are dropped; a non-array is an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{
        BookingResponse, BookingResultData, ScheduleRecommendation, ServiceKind,
        SubmissionErrorKind,
    };
    use serde_json::json;

    #[test]
    fn service_kind_query_round_trip_uses_clean() {
        assert_eq!(ServiceKind::Cleaning.query_value(), "clean");
        assert_eq!(ServiceKind::from_query("clean"), ServiceKind::Cleaning);
        assert_eq!(ServiceKind::from_query("cleaning"), ServiceKind::Cleaning);
        assert_eq!(ServiceKind::from_query("pest"), ServiceKind::Pest);
        assert_eq!(ServiceKind::from_query("garden"), ServiceKind::Pest);
        assert_eq!(ServiceKind::parse("garden"), None);
    }

    #[test]
    fn result_data_keeps_echo_and_unknown_keys() {
        let data: BookingResultData = serde_json::from_value(json!({
            "recommendations": [],
            "message": "ok",
            "客戶名稱": "陳先生",
            "單位尺數": 650,
            "workflowId": "wf-17"
        }))
        .expect("envelope should decode");

        assert!(data.recommendations.is_empty());
        assert_eq!(data.echo.customer_name.as_deref(), Some("陳先生"));
        assert_eq!(data.echo.sq_ft.as_deref(), Some("650"));
        assert_eq!(data.extra.get("message"), Some(&json!("ok")));
        assert_eq!(data.extra.get("workflowId"), Some(&json!("wf-17")));
        assert!(!data.extra.contains_key("客戶名稱"));
    }

    #[test]
    fn null_recommendations_decode_as_empty() {
        let data = BookingResultData::from_value(json!({ "recommendations": null }));
        assert!(data.recommendations.is_empty());
    }

    #[test]
    fn mistyped_parts_fall_back_instead_of_failing() {
        let data = BookingResultData::from_value(json!({
            "meta": "n/a",
            "recommendations": [
                { "rank": 1, "staff": "K", "constraints": "none" },
                "garbage",
                { "rank": 2, "staff": "L", "qualityScore": 90 }
            ],
            "客戶名稱": ["not", "text"]
        }));

        assert_eq!(data.meta, None);
        assert_eq!(data.recommendations.len(), 2);
        assert_eq!(data.recommendations[0].staff, "K");
        assert_eq!(data.recommendations[0].constraints, None);
        assert!(!data.recommendations[0].skill_mismatch());
        assert_eq!(data.recommendations[1].quality_score, 90.0);
        assert_eq!(data.echo.customer_name, None);
    }

    #[test]
    fn non_object_reply_becomes_empty_envelope_with_raw_kept() {
        let body = json!([{ "staff": "Ken" }]);
        let data = BookingResultData::from_value(body.clone());
        assert!(data.recommendations.is_empty());
        assert_eq!(data.meta, None);
        assert_eq!(data.raw_value(), body);
    }

    #[test]
    fn raw_value_is_the_reply_as_received() {
        let body = json!({
            "recommendations": [
                { "rank": 1.5, "qualityScore": "99.6", "date": null, "staff": "Amy" }
            ]
        });
        let data = BookingResultData::from_value(body.clone());
        assert_eq!(data.recommendations[0].rank, 2);
        assert_eq!(data.raw_value(), body);
        assert_eq!(data.recommendations[0].quality_score, 99.6);
    }

    #[test]
    fn recommendation_decoding_tolerates_loose_backend_values() {
        let rec: ScheduleRecommendation = serde_json::from_value(json!({
            "rank": 2.0,
            "staff": "Ken",
            "date": null,
            "startTime": "09:00",
            "endTime": "11:00",
            "qualityScore": "101.6",
            "reasons": ["鄰近上一單", 3, null],
            "constraints": { "skillNoMatch": 1, "travelMinutes": 25 }
        }))
        .expect("loose recommendation should decode");

        assert_eq!(rec.rank, 2);
        assert_eq!(rec.date, None);
        assert_eq!(rec.quality_score, 101.6);
        assert_eq!(rec.reasons, vec!["鄰近上一單".to_owned(), "3".to_owned()]);
        assert!(rec.skill_mismatch());
        let constraints = rec.constraints.expect("constraints kept");
        assert_eq!(constraints.other.get("travelMinutes"), Some(&json!(25)));
    }

    #[test]
    fn recommendation_without_constraints_is_not_a_mismatch() {
        let rec: ScheduleRecommendation =
            serde_json::from_value(json!({ "staff": "Amy" })).expect("decode");
        assert!(!rec.skill_mismatch());
        assert_eq!(rec.rank, 0);
    }

    #[test]
    fn failed_response_serializes_error_code() {
        let response = BookingResponse::failed(SubmissionErrorKind::Network, "down");
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            value,
            json!({ "success": false, "message": "down", "error": "NETWORK_ERROR" })
        );
    }
}

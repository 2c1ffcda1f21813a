// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::format_description;

use crate::model::{BookingResultData, ScheduleRecommendation, ServiceKind};

pub const RESULTS_TITLE: &str = "預約提交成功";
pub const SUMMARY_TITLE: &str = "預約摘要";
pub const BACK_LABEL: &str = "返回預約表單";
pub const SELECT_LABEL: &str = "選擇此時段";
pub const RANKED_TITLE: &str = "推薦時段";
pub const RAW_TOGGLE_LABEL: &str = "查看完整回應數據 (開發用)";

pub const NO_STAFF_TITLE: &str = "沒有合適的職員";
pub const NO_STAFF_BODY: &str = "目前沒有具備相關技能的職員可以處理此服務";
pub const NO_STAFF_FOLLOW_UP: &str =
    "系統已記錄您的預約，我們的客服團隊將會盡快與您聯繫，為您安排合適的服務時間。";

pub const PLACEHOLDER_TITLE: &str = "預約已提交";
pub const PLACEHOLDER_BODY: &str =
    "我們的團隊將根據您的需求安排最合適的服務時間，並盡快與您聯繫確認。";
pub const PLACEHOLDER_ETA: &str = "預計在 24 小時內回覆";

pub const HUMAN_CONFIRMATION_NOTICE: &str = "推薦時段需經客服人工確認";
pub const UNKNOWN_DATE: &str = "日期待定";

const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];
const NO_STAFF_PREVIEW: usize = 3;

/// Recommendations split by whether staff have the required skill. Both
/// halves keep the order the backend sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition<'a> {
    pub valid: Vec<&'a ScheduleRecommendation>,
    pub skipped: Vec<&'a ScheduleRecommendation>,
}

pub fn partition(recommendations: &[ScheduleRecommendation]) -> Partition<'_> {
    let (skipped, valid) = recommendations
        .iter()
        .partition(|recommendation| recommendation.skill_mismatch());
    Partition { valid, skipped }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandColor {
    Green,
    Blue,
    Amber,
    Gray,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBand {
    Excellent,
    Good,
    Workable,
    Fair,
    Unsuitable,
}

impl QualityBand {
    /// Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 120.0 {
            Self::Excellent
        } else if score >= 100.0 {
            Self::Good
        } else if score >= 80.0 {
            Self::Workable
        } else if score >= 0.0 {
            Self::Fair
        } else {
            Self::Unsuitable
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "極佳",
            Self::Good => "良好",
            Self::Workable => "可行",
            Self::Fair => "一般",
            Self::Unsuitable => "不適合",
        }
    }

    pub const fn color(self) -> BandColor {
        match self {
            Self::Excellent => BandColor::Green,
            Self::Good => BandColor::Blue,
            Self::Workable => BandColor::Amber,
            Self::Fair => BandColor::Gray,
            Self::Unsuitable => BandColor::Red,
        }
    }
}

/// Formats an ISO date as `<M>月<D>日 (<週>)`. Missing or unparsable input
/// falls back to a placeholder that keeps the raw text visible.
pub fn format_recommendation_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return UNKNOWN_DATE.to_owned();
    };
    match parse_date(raw) {
        Some(date) => {
            let weekday = WEEKDAYS[usize::from(date.weekday().number_days_from_sunday())];
            format!("{}月{}日 ({weekday})", u8::from(date.month()), date.day())
        }
        None => format!("{UNKNOWN_DATE} ({raw})"),
    }
}

fn parse_date(raw: &str) -> Option<Date> {
    let head = raw.get(..10)?;
    let rest = &raw[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    Date::parse(head, format_description!("[year]-[month]-[day]")).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationCard {
    pub badge: String,
    pub staff: String,
    pub band: QualityBand,
    pub score_label: String,
    pub date: String,
    pub time_window: String,
    pub reasons: Vec<String>,
}

impl RecommendationCard {
    fn build(position: usize, recommendation: &ScheduleRecommendation) -> Self {
        let rank = if recommendation.rank > 0 {
            recommendation.rank
        } else {
            position as i64 + 1
        };
        let band = QualityBand::from_score(recommendation.quality_score);
        Self {
            badge: format!("#{rank}"),
            staff: recommendation.staff.clone(),
            band,
            score_label: format!("{} ({}分)", band.label(), recommendation.quality_score),
            date: format_recommendation_date(recommendation.date.as_deref()),
            time_window: format!(
                "{} - {}",
                recommendation.start_time, recommendation.end_time
            ),
            reasons: recommendation.reasons.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsBody {
    Ranked {
        subtitle: String,
        cards: Vec<RecommendationCard>,
    },
    NoQualifiedStaff {
        filtered_count: usize,
        staff: Vec<String>,
        remaining: usize,
    },
    Placeholder,
}

impl ResultsBody {
    pub fn filtered_heading(filtered_count: usize) -> String {
        format!("已過濾 {filtered_count} 個不符合技能的時段：")
    }

    pub fn mismatch_line(staff: &str) -> String {
        format!("{staff} - 技能不匹配")
    }

    pub fn remaining_line(remaining: usize) -> String {
        format!("...還有 {remaining} 個")
    }
}

/// Everything the results screen draws, derived once per response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub service: ServiceKind,
    pub headline: String,
    pub summary: Vec<SummaryItem>,
    pub body: ResultsBody,
    pub notices: Vec<String>,
    pub disclaimer: Option<String>,
    pub raw_json: String,
    valid_indices: Vec<usize>,
}

impl ResultsView {
    pub fn build(service: ServiceKind, data: &BookingResultData) -> Self {
        let all = &data.recommendations;
        let Partition { valid, skipped } = partition(all);

        let headline = if !valid.is_empty() {
            format!("系統已為您找到 {} 個推薦時段", valid.len())
        } else if !skipped.is_empty() {
            "目前沒有符合技能的職員可供預約，我們將盡快與您聯繫".to_owned()
        } else {
            "預約已成功提交，我們將盡快與您聯繫".to_owned()
        };

        let body = if !valid.is_empty() {
            let mut subtitle = String::new();
            if let Some(meta) = &data.meta {
                let total = meta
                    .total_options_evaluated
                    .filter(|total| *total != 0)
                    .unwrap_or(all.len() as i64);
                subtitle = format!("從 {total} 個可用時段中精選");
                if !skipped.is_empty() {
                    subtitle.push_str(&format!(" (已過濾 {} 個技能不符)", skipped.len()));
                }
            }
            ResultsBody::Ranked {
                subtitle,
                cards: valid
                    .iter()
                    .enumerate()
                    .map(|(position, recommendation)| {
                        RecommendationCard::build(position, recommendation)
                    })
                    .collect(),
            }
        } else if !skipped.is_empty() {
            ResultsBody::NoQualifiedStaff {
                filtered_count: skipped.len(),
                staff: skipped
                    .iter()
                    .take(NO_STAFF_PREVIEW)
                    .map(|recommendation| recommendation.staff.clone())
                    .collect(),
                remaining: skipped.len().saturating_sub(NO_STAFF_PREVIEW),
            }
        } else {
            ResultsBody::Placeholder
        };

        let mut notices = Vec::new();
        let meta = data.meta.as_ref();
        if meta.and_then(|meta| meta.requires_human_confirmation) == Some(true) {
            notices.push(HUMAN_CONFIRMATION_NOTICE.to_owned());
        }

        let valid_indices = all
            .iter()
            .enumerate()
            .filter(|(_, recommendation)| !recommendation.skill_mismatch())
            .map(|(index, _)| index)
            .collect();

        Self {
            service,
            headline,
            summary: summary_items(data),
            body,
            notices,
            disclaimer: meta
                .and_then(|meta| meta.disclaimer.clone())
                .filter(|text| !text.trim().is_empty()),
            raw_json: serde_json::to_string_pretty(&data.raw_value()).unwrap_or_default(),
            valid_indices,
        }
    }

    pub fn brand(&self) -> &'static str {
        self.service.brand()
    }

    pub fn card_count(&self) -> usize {
        match &self.body {
            ResultsBody::Ranked { cards, .. } => cards.len(),
            _ => 0,
        }
    }

    /// Confirmation text for the card at `position`, plus the backend
    /// recommendation it refers to.
    pub fn select<'a>(
        &self,
        data: &'a BookingResultData,
        position: usize,
    ) -> Option<(String, &'a ScheduleRecommendation)> {
        let ResultsBody::Ranked { cards, .. } = &self.body else {
            return None;
        };
        let card = cards.get(position)?;
        let recommendation = data.recommendations.get(*self.valid_indices.get(position)?)?;
        let message = format!(
            "已選擇時段：\n{}\n{} {}-{}",
            card.staff,
            recommendation.date.as_deref().unwrap_or(UNKNOWN_DATE),
            recommendation.start_time,
            recommendation.end_time
        );
        Some((message, recommendation))
    }
}

fn summary_items(data: &BookingResultData) -> Vec<SummaryItem> {
    let echo = &data.echo;
    let mut items = Vec::new();
    let mut push = |label: &'static str, value: Option<String>| {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            items.push(SummaryItem { label, value });
        }
    };
    push("品牌", echo.brand.clone());
    push("服務類型", echo.service.clone());
    push("客戶名稱", echo.customer_name.clone());
    push("聯絡電話", echo.phone.clone());
    push("服務地區", echo.region.clone());
    push("詳細地址", echo.address.clone());
    push(
        "單位面積",
        echo.sq_ft.as_ref().map(|sq_ft| format!("{sq_ft} 平方尺")),
    );
    if let (Some(date), Some(time)) = (&echo.submitted_date, &echo.submitted_time)
        && !date.is_empty()
        && !time.is_empty()
    {
        push("提交時間", Some(format!("{date} {time}")));
    }
    push("備註", echo.remarks.clone());
    items
}

#[cfg(test)]
mod tests {
    use super::{
        BandColor, QualityBand, ResultsBody, ResultsView, format_recommendation_date, partition,
    };
    use crate::model::{BookingResultData, ServiceKind};
    use serde_json::json;

    fn data(value: serde_json::Value) -> BookingResultData {
        BookingResultData::from_value(value)
    }

    #[test]
    fn quality_bands_have_inclusive_lower_bounds() {
        assert_eq!(QualityBand::from_score(125.0).label(), "極佳");
        assert_eq!(QualityBand::from_score(125.0).color(), BandColor::Green);
        assert_eq!(QualityBand::from_score(120.0), QualityBand::Excellent);
        assert_eq!(QualityBand::from_score(100.0).color(), BandColor::Blue);
        assert_eq!(QualityBand::from_score(90.0).color(), BandColor::Amber);
        assert_eq!(QualityBand::from_score(0.0), QualityBand::Fair);
        assert_eq!(QualityBand::from_score(-5.0).label(), "不適合");
        assert_eq!(QualityBand::from_score(-5.0).color(), BandColor::Red);
    }

    #[test]
    fn fractional_scores_band_on_the_value_sent() {
        assert_eq!(QualityBand::from_score(99.6), QualityBand::Workable);
        assert_eq!(QualityBand::from_score(99.6).color(), BandColor::Amber);
        assert_eq!(QualityBand::from_score(119.9), QualityBand::Good);
        assert_eq!(QualityBand::from_score(-0.4), QualityBand::Unsuitable);

        let data = data(json!({
            "recommendations": [
                { "staff": "Amy", "qualityScore": 99.6 },
                { "staff": "Bob", "qualityScore": "119.9" }
            ]
        }));
        let view = ResultsView::build(ServiceKind::Pest, &data);
        let ResultsBody::Ranked { cards, .. } = &view.body else {
            panic!("expected ranked body");
        };
        assert_eq!(cards[0].score_label, "可行 (99.6分)");
        assert_eq!(cards[1].score_label, "良好 (119.9分)");
    }

    #[test]
    fn dates_render_with_weekday() {
        assert_eq!(format_recommendation_date(Some("2026-03-05")), "3月5日 (四)");
        assert_eq!(
            format_recommendation_date(Some("2026-03-08T10:00:00Z")),
            "3月8日 (日)"
        );
        assert_eq!(format_recommendation_date(None), "日期待定");
        assert_eq!(format_recommendation_date(Some("  ")), "日期待定");
        assert_eq!(
            format_recommendation_date(Some("2026-02-30")),
            "日期待定 (2026-02-30)"
        );
        assert_eq!(format_recommendation_date(Some("明天")), "日期待定 (明天)");
        assert_eq!(
            format_recommendation_date(Some("2026-03-05xyz")),
            "日期待定 (2026-03-05xyz)"
        );
    }

    #[test]
    fn partition_keeps_order_and_splits_on_flag() {
        let data = data(json!({
            "recommendations": [
                { "staff": "A", "constraints": { "skillNoMatch": true } },
                { "staff": "B" },
                { "staff": "C", "constraints": { "skillNoMatch": false } },
                { "staff": "D", "constraints": { "skillNoMatch": true } }
            ]
        }));
        let split = partition(&data.recommendations);
        let valid: Vec<_> = split.valid.iter().map(|r| r.staff.as_str()).collect();
        let skipped: Vec<_> = split.skipped.iter().map(|r| r.staff.as_str()).collect();
        assert_eq!(valid, vec!["B", "C"]);
        assert_eq!(skipped, vec!["A", "D"]);
    }

    #[test]
    fn ranked_view_builds_cards_and_subtitle() {
        let data = data(json!({
            "recommendations": [
                {
                    "rank": 0, "staff": "Amy", "date": "2026-03-06",
                    "startTime": "10:00", "endTime": "12:00",
                    "qualityScore": 130, "reasons": ["同區"]
                },
                { "rank": 4, "staff": "Bob", "qualityScore": 85 },
                { "staff": "Cat", "constraints": { "skillNoMatch": true } }
            ],
            "meta": { "totalOptionsEvaluated": 12, "requiresHumanConfirmation": true,
                      "disclaimer": "僅供參考" },
            "品牌": "滅蟲職人",
            "單位尺數": "650",
            "提交日期": "2026-03-05",
            "提交時間": "09:00"
        }));
        let view = ResultsView::build(ServiceKind::Pest, &data);
        assert_eq!(view.headline, "系統已為您找到 2 個推薦時段");
        let ResultsBody::Ranked { subtitle, cards } = &view.body else {
            panic!("expected ranked body");
        };
        assert_eq!(subtitle, "從 12 個可用時段中精選 (已過濾 1 個技能不符)");
        assert_eq!(cards[0].badge, "#1");
        assert_eq!(cards[0].score_label, "極佳 (130分)");
        assert_eq!(cards[0].date, "3月6日 (五)");
        assert_eq!(cards[0].time_window, "10:00 - 12:00");
        assert_eq!(cards[1].badge, "#4");
        assert_eq!(cards[1].date, "日期待定");
        assert_eq!(view.notices, vec!["推薦時段需經客服人工確認".to_owned()]);
        assert_eq!(view.disclaimer.as_deref(), Some("僅供參考"));

        let labels: Vec<_> = view.summary.iter().map(|item| item.label).collect();
        assert_eq!(labels, vec!["品牌", "單位面積", "提交時間"]);
        assert_eq!(view.summary[1].value, "650 平方尺");

        let (message, picked) = view.select(&data, 0).expect("first card selectable");
        assert_eq!(picked.staff, "Amy");
        assert_eq!(message, "已選擇時段：\nAmy\n2026-03-06 10:00-12:00");

        let (message, picked) = view.select(&data, 1).expect("second card selectable");
        assert_eq!(picked.staff, "Bob");
        assert_eq!(message, "已選擇時段：\nBob\n日期待定 -");
    }

    #[test]
    fn raw_panel_shows_reply_as_received() {
        let data = data(json!({
            "recommendations": [
                { "rank": 1.5, "staff": "Amy", "qualityScore": "99.6", "date": null }
            ],
            "meta": "n/a"
        }));
        let view = ResultsView::build(ServiceKind::Pest, &data);
        assert!(view.raw_json.contains("\"rank\": 1.5"));
        assert!(view.raw_json.contains("\"qualityScore\": \"99.6\""));
        assert!(view.raw_json.contains("\"date\": null"));
        assert!(view.raw_json.contains("\"meta\": \"n/a\""));
    }

    #[test]
    fn subtitle_absent_without_meta() {
        let data = data(json!({ "recommendations": [{ "staff": "Amy" }] }));
        let view = ResultsView::build(ServiceKind::Cleaning, &data);
        let ResultsBody::Ranked { subtitle, .. } = &view.body else {
            panic!("expected ranked body");
        };
        assert!(subtitle.is_empty());
        assert!(view.notices.is_empty());
        assert_eq!(view.disclaimer, None);
    }

    #[test]
    fn only_mismatches_lists_three_names_and_remainder() {
        let data = data(json!({
            "recommendations": [
                { "staff": "A", "constraints": { "skillNoMatch": true } },
                { "staff": "B", "constraints": { "skillNoMatch": true } },
                { "staff": "C", "constraints": { "skillNoMatch": true } },
                { "staff": "D", "constraints": { "skillNoMatch": true } },
                { "staff": "E", "constraints": { "skillNoMatch": true } }
            ],
            "meta": { "disclaimer": "請留意" }
        }));
        let view = ResultsView::build(ServiceKind::Cleaning, &data);
        assert_eq!(
            view.body,
            ResultsBody::NoQualifiedStaff {
                filtered_count: 5,
                staff: vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
                remaining: 2,
            }
        );
        assert_eq!(view.disclaimer.as_deref(), Some("請留意"));
        assert!(view.select(&data, 0).is_none());
        assert_eq!(ResultsBody::remaining_line(2), "...還有 2 個");
    }

    #[test]
    fn empty_envelope_renders_placeholder() {
        let view = ResultsView::build(ServiceKind::Pest, &BookingResultData::default());
        assert_eq!(view.body, ResultsBody::Placeholder);
        assert_eq!(view.headline, "預約已成功提交，我們將盡快與您聯繫");
        assert!(view.summary.is_empty());
        assert!(view.raw_json.contains("recommendations"));
    }
}

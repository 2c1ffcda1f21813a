// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use bookdesk_app::{
    BookingDraft, BookingForm, BookingResponse, BookingResultData, CleaningService,
    FieldKey, LOCATIONS, PestService, RecommendationConstraints, ResultMeta, SQ_FT_OPTIONS,
    SUCCESS_FALLBACK_MESSAGE, ScheduleRecommendation, ServiceKind, SubmissionEcho,
};
use serde_json::Map;
use time::macros::{date, format_description};
use time::{Date, Duration, PrimitiveDateTime, Time};

const SURNAMES: [&str; 16] = [
    "陳", "李", "張", "黃", "何", "林", "梁", "吳", "王", "劉", "鄭", "楊", "馮", "蔡", "曾", "謝",
];
const TITLES: [&str; 4] = ["先生", "小姐", "太", "女士"];

const STREETS: [&str; 12] = [
    "彌敦道",
    "英皇道",
    "青山公路",
    "大埔道",
    "沙田正街",
    "荔枝角道",
    "軒尼詩道",
    "屯門鄉事會路",
    "將軍澳道",
    "德輔道中",
    "大河道",
    "元朗大馬路",
];
const ESTATE_SUFFIXES: [&str; 6] = ["花園", "大廈", "中心", "苑", "閣", "廣場"];

const STAFF: [&str; 10] = [
    "陳師傅", "李師傅", "黃師傅", "何師傅", "梁師傅", "張師傅", "林師傅", "鄭師傅", "吳師傅",
    "馮師傅",
];

const REASONS: [&str; 10] = [
    "同區已有預約，車程短",
    "技能完全匹配",
    "當日首單，可準時到達",
    "客戶評分高",
    "與上一單相隔充足",
    "熟悉該屋苑",
    "當日工作量較少",
    "可配合上午時段",
    "持有相關認證",
    "曾處理同類個案",
];

const SLOTS: [(&str, &str); 6] = [
    ("09:00", "11:00"),
    ("10:30", "12:30"),
    ("13:00", "15:00"),
    ("14:30", "16:30"),
    ("16:00", "18:00"),
    ("18:30", "20:30"),
];

const REMARKS: [&str; 6] = [
    "",
    "請先致電",
    "家中有寵物",
    "大廈需要登記",
    "希望平日上午",
    "",
];

const DISCLAIMER: &str = "推薦結果僅供參考，最終時段以客服確認為準";

/// Anchor for every generated date so fixtures never depend on the clock.
pub const REFERENCE_DATE: Date = date!(2026-03-02);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for booking drafts and backend responses.
#[derive(Debug, Clone)]
pub struct BookingFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl BookingFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn customer_name(&mut self) -> String {
        format!("{}{}", self.pick(&SURNAMES), self.pick(&TITLES))
    }

    /// A complete local mobile number.
    pub fn phone(&mut self) -> String {
        let lead = self.pick(&["5", "6", "9"]);
        format!("{lead}{:07}", self.int_range(0, 9_999_999))
    }

    /// Something a person might paste into a phone field: separators,
    /// country codes, stray letters, sometimes too short or too long.
    pub fn phone_input(&mut self) -> String {
        let digits = self.int_range(0, 12) as usize;
        let mut out = String::new();
        if self.rng.int_n(4) == 0 {
            out.push_str("+852 ");
        }
        for index in 0..digits {
            out.push(char::from(b'0' + self.rng.int_n(10) as u8));
            match self.rng.int_n(8) {
                0 => out.push(' '),
                1 => out.push('-'),
                2 if index % 3 == 0 => out.push('x'),
                3 => out.push('９'),
                _ => {}
            }
        }
        out
    }

    pub fn address(&mut self) -> String {
        format!(
            "{}{}號{}{} {}樓 {}室",
            self.pick(&STREETS),
            self.int_range(1, 480),
            self.pick(&SURNAMES),
            self.pick(&ESTATE_SUFFIXES),
            self.int_range(1, 40),
            char::from(b'A' + self.rng.int_n(8) as u8),
        )
    }

    /// A form that passes the submission gate, with random catalog picks.
    pub fn booking_form(&mut self, kind: ServiceKind) -> BookingForm {
        let mut form = BookingForm::fresh(kind);
        form.set_text(FieldKey::Name, &self.customer_name());
        form.set_text(FieldKey::Phone, &self.phone());
        if self.rng.int_n(3) == 0 {
            form.set_text(FieldKey::AltContact, &self.customer_name());
            form.set_text(FieldKey::AltPhone, &self.phone());
        }

        let location = &LOCATIONS[self.rng.int_n(LOCATIONS.len())];
        form.select_region(location.region);
        form.select_sub_district(self.pick(location.sub_districts));
        form.set_text(FieldKey::Address, &self.address());
        form.set_text(FieldKey::Remarks, self.pick(&REMARKS));

        match &mut form {
            BookingForm::Pest(pest) => {
                pest.select_service(PestService::ALL[self.rng.int_n(PestService::ALL.len())]);
            }
            BookingForm::Cleaning(cleaning) => {
                let service = CleaningService::ALL[self.rng.int_n(CleaningService::ALL.len())];
                cleaning.select_main_service(service);
                for add_on in service.available_add_ons() {
                    if self.rng.bool() {
                        cleaning.toggle_add_on(add_on);
                    }
                }
            }
        }

        for field in form.visible_fields() {
            if matches!(
                field,
                FieldKey::RoomCount
                    | FieldKey::MattressCount
                    | FieldKey::CarpetCount
                    | FieldKey::CurtainCount
                    | FieldKey::SqFt
            ) {
                let steps = self.rng.int_n(6) as isize;
                form.cycle_choice(field, steps);
            }
        }
        form
    }

    pub fn draft(&mut self, kind: ServiceKind) -> BookingDraft {
        match self.booking_form(kind).gate() {
            Ok(draft) => draft,
            Err(error) => panic!("generated form failed the gate: {error}"),
        }
    }

    pub fn recommendation(&mut self, rank: i64) -> ScheduleRecommendation {
        let (start_time, end_time) = SLOTS[self.rng.int_n(SLOTS.len())];
        let day = REFERENCE_DATE + Duration::days(self.int_range(0, 13));
        let reason_count = self.rng.int_n(3) + 1;
        let reasons = (0..reason_count)
            .map(|_| self.pick(&REASONS).to_owned())
            .collect();
        let skill_no_match = self.rng.int_n(4) == 0;

        ScheduleRecommendation {
            rank,
            staff: self.pick(&STAFF).to_owned(),
            date: Some(format_date(day)),
            start_time: start_time.to_owned(),
            end_time: end_time.to_owned(),
            quality_score: self.int_range(-200, 1400) as f64 / 10.0,
            reasons,
            constraints: Some(RecommendationConstraints {
                skill_no_match: Some(skill_no_match),
                is_first_job: Some(self.rng.bool()),
                is_last_job: Some(self.rng.bool()),
                first_job_delayed: Some(false),
                has_no_jobs_today: Some(self.rng.int_n(5) == 0),
                other: Map::new(),
            }),
        }
    }

    /// Ranked list with quality scores descending, as the backend sends it.
    pub fn recommendations(&mut self, count: usize) -> Vec<ScheduleRecommendation> {
        let mut recommendations: Vec<_> = (0..count)
            .map(|index| self.recommendation(index as i64 + 1))
            .collect();
        recommendations.sort_by(|left, right| right.quality_score.total_cmp(&left.quality_score));
        for (index, recommendation) in recommendations.iter_mut().enumerate() {
            recommendation.rank = index as i64 + 1;
        }
        recommendations
    }

    /// A backend envelope echoing the submitted draft.
    pub fn result_data(&mut self, draft: &BookingDraft) -> BookingResultData {
        let count = self.rng.int_n(6);
        let recommendations = self.recommendations(count);
        let submitted = PrimitiveDateTime::new(
            REFERENCE_DATE,
            Time::from_hms(self.int_range(8, 20) as u8, self.int_range(0, 59) as u8, 0)
                .unwrap_or(Time::MIDNIGHT),
        );
        let contact = draft.contact();
        let service = draft.service_kind();

        BookingResultData {
            meta: Some(ResultMeta {
                total_options_evaluated: Some(count as i64 + self.int_range(0, 20)),
                requires_human_confirmation: Some(self.rng.int_n(3) == 0),
                disclaimer: Some(DISCLAIMER.to_owned()),
                other: Map::new(),
            }),
            status: Some("pending_confirmation".to_owned()),
            echo: SubmissionEcho {
                service_type: Some(service.tab_label().to_owned()),
                brand: Some(service.brand().to_owned()),
                service: Some(draft.service_label().to_owned()),
                region: Some(format!("{} {}", contact.region, contact.sub_district)),
                customer_name: Some(contact.name.clone()),
                phone: Some(contact.phone.clone()),
                address: Some(contact.address.clone()),
                sq_ft: sq_ft_estimate(draft).map(|estimate| estimate.to_string()),
                remarks: remarks(draft).filter(|text| !text.is_empty()),
                submitted_date: submitted
                    .format(format_description!("[year]-[month]-[day]"))
                    .ok(),
                submitted_time: submitted
                    .format(format_description!("[hour]:[minute]"))
                    .ok(),
            },
            recommendations,
            extra: Map::new(),
            raw: None,
        }
    }

    /// What an offline backend would answer for `draft`.
    pub fn demo_response(&mut self, draft: &BookingDraft) -> BookingResponse {
        let data = self.result_data(draft);
        BookingResponse::succeeded(SUCCESS_FALLBACK_MESSAGE, data)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

/// Builds a recommendation with only the fields most tests care about.
pub fn recommendation(rank: i64, staff: &str, date: &str, score: i64) -> ScheduleRecommendation {
    ScheduleRecommendation {
        rank,
        staff: staff.to_owned(),
        date: Some(date.to_owned()),
        start_time: "10:00".to_owned(),
        end_time: "12:00".to_owned(),
        quality_score: score as f64,
        reasons: vec!["技能完全匹配".to_owned()],
        constraints: None,
    }
}

pub fn skill_mismatch(rank: i64, staff: &str) -> ScheduleRecommendation {
    ScheduleRecommendation {
        constraints: Some(RecommendationConstraints {
            skill_no_match: Some(true),
            ..RecommendationConstraints::default()
        }),
        ..recommendation(rank, staff, "2026-03-03", 0)
    }
}

fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

fn sq_ft_estimate(draft: &BookingDraft) -> Option<u32> {
    let band = match draft {
        BookingDraft::Pest(booking) if booking.service.shows_sq_ft() => &booking.sq_ft,
        BookingDraft::Cleaning(booking) if booking.main_service.shows_sq_ft() => &booking.sq_ft,
        _ => return None,
    };
    let index = SQ_FT_OPTIONS.iter().position(|option| *option == band.as_str())?;
    Some([350, 500, 700, 900, 1250, 1800][index])
}

fn remarks(draft: &BookingDraft) -> Option<String> {
    match draft {
        BookingDraft::Pest(booking) => Some(booking.remarks.clone()),
        BookingDraft::Cleaning(booking) => Some(booking.remarks.clone()),
    }
}

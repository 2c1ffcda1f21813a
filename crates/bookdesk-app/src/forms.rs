// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{
    self, AddOn, CleaningService, LOCATIONS, NOT_APPLICABLE, PestService, QUANTITY_OPTIONS,
    SQ_FT_OPTIONS,
};
use crate::model::{
    BookingDraft, CleaningBooking, ContactDetails, FieldKey, PestControlBooking, ServiceKind,
};

pub const PHONE_DIGITS: usize = 8;

pub const PEST_PHONE_ERROR: &str = "請輸入 8 位數字電話號碼";
pub const CLEANING_PHONE_ERROR: &str = "請輸入 8 位數字電話";

pub type FieldErrors = BTreeMap<FieldKey, String>;

/// Keeps ASCII digits only, capped at eight.
pub fn normalize_phone(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect()
}

/// Partially typed numbers are flagged; empty and complete ones are not.
pub fn phone_incomplete(value: &str) -> bool {
    let len = value.chars().count();
    len > 0 && len < PHONE_DIGITS
}

fn phone_complete(value: &str) -> bool {
    value.len() == PHONE_DIGITS && value.chars().all(|ch| ch.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    MissingName,
    InvalidPhone,
    InvalidAltPhone,
    MissingAddress,
}

impl GateError {
    pub const fn field(self) -> FieldKey {
        match self {
            Self::MissingName => FieldKey::Name,
            Self::InvalidPhone => FieldKey::Phone,
            Self::InvalidAltPhone => FieldKey::AltPhone,
            Self::MissingAddress => FieldKey::Address,
        }
    }
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MissingName => "請填寫稱呼",
            Self::InvalidPhone => "請填寫有效的 8 位數字聯絡電話",
            Self::InvalidAltPhone => "請填寫有效的 8 位數字第二聯絡人電話",
            Self::MissingAddress => "請填寫詳細地址",
        };
        f.write_str(message)
    }
}

impl std::error::Error for GateError {}

fn blank_contact() -> ContactDetails {
    let (region, sub_district) = catalog::default_location();
    ContactDetails {
        name: String::new(),
        phone: String::new(),
        alt_contact: String::new(),
        alt_phone: String::new(),
        region: region.to_owned(),
        sub_district: sub_district.to_owned(),
        address: String::new(),
    }
}

fn cycle_option<'a>(options: &[&'a str], current: &str, delta: isize) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as isize;
    let index = options
        .iter()
        .position(|option| *option == current)
        .map_or(0, |index| (index as isize + delta).rem_euclid(len));
    options.get(index as usize).copied()
}

fn cycle_enum<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    all.iter()
        .position(|item| *item == current)
        .and_then(|index| all.get((index as isize + delta).rem_euclid(len) as usize))
        .copied()
        .unwrap_or(current)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PestForm {
    pub booking: PestControlBooking,
    pub errors: FieldErrors,
}

impl Default for PestForm {
    fn default() -> Self {
        Self {
            booking: PestControlBooking {
                contact: blank_contact(),
                service: PestService::ALL[0],
                room_count: NOT_APPLICABLE.to_owned(),
                mattress_count: NOT_APPLICABLE.to_owned(),
                sq_ft: SQ_FT_OPTIONS[0].to_owned(),
                remarks: String::new(),
            },
            errors: FieldErrors::new(),
        }
    }
}

impl PestForm {
    pub fn visible_fields(&self) -> Vec<FieldKey> {
        let service = self.booking.service;
        let mut fields = contact_fields();
        fields.push(FieldKey::PestService);
        fields.extend_from_slice(service.unit_fields());
        if service.shows_sq_ft() {
            fields.push(FieldKey::SqFt);
        }
        fields.push(FieldKey::Remarks);
        fields
    }

    pub fn select_service(&mut self, service: PestService) {
        self.booking.service = service;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningForm {
    pub booking: CleaningBooking,
    pub errors: FieldErrors,
}

impl Default for CleaningForm {
    fn default() -> Self {
        Self {
            booking: CleaningBooking {
                contact: blank_contact(),
                main_service: CleaningService::ALL[0],
                add_services: Vec::new(),
                carpet_count: NOT_APPLICABLE.to_owned(),
                mattress_count: NOT_APPLICABLE.to_owned(),
                curtain_count: NOT_APPLICABLE.to_owned(),
                sq_ft: SQ_FT_OPTIONS[0].to_owned(),
                remarks: String::new(),
            },
            errors: FieldErrors::new(),
        }
    }
}

impl CleaningForm {
    pub fn available_add_ons(&self) -> Vec<AddOn> {
        self.booking.main_service.available_add_ons()
    }

    pub fn visible_fields(&self) -> Vec<FieldKey> {
        let mut fields = contact_fields();
        fields.push(FieldKey::MainService);
        if !self.available_add_ons().is_empty() {
            fields.push(FieldKey::AddServices);
        }
        // Quantity rows follow catalog order, not selection order.
        for add_on in AddOn::ALL {
            if self.booking.add_services.contains(&add_on)
                && let Some(field) = add_on.quantity_field()
            {
                fields.push(field);
            }
        }
        if self.booking.main_service.shows_sq_ft() {
            fields.push(FieldKey::SqFt);
        }
        fields.push(FieldKey::Remarks);
        fields
    }

    /// Changing the main service always drops previously picked add-ons.
    pub fn select_main_service(&mut self, service: CleaningService) {
        if self.booking.main_service != service {
            self.booking.main_service = service;
            self.booking.add_services.clear();
        }
    }

    /// Returns whether the add-on ended up selected.
    pub fn toggle_add_on(&mut self, add_on: AddOn) -> bool {
        if !add_on.applies_to(self.booking.main_service) {
            return false;
        }
        let selected = &mut self.booking.add_services;
        if let Some(index) = selected.iter().position(|item| *item == add_on) {
            selected.remove(index);
            false
        } else {
            selected.push(add_on);
            true
        }
    }

    pub fn has_add_on(&self, add_on: AddOn) -> bool {
        self.booking.add_services.contains(&add_on)
    }
}

fn contact_fields() -> Vec<FieldKey> {
    vec![
        FieldKey::Name,
        FieldKey::Phone,
        FieldKey::AltContact,
        FieldKey::AltPhone,
        FieldKey::Region,
        FieldKey::SubDistrict,
        FieldKey::Address,
    ]
}

/// The form currently mounted under the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingForm {
    Pest(PestForm),
    Cleaning(CleaningForm),
}

impl BookingForm {
    pub fn fresh(kind: ServiceKind) -> Self {
        match kind {
            ServiceKind::Pest => Self::Pest(PestForm::default()),
            ServiceKind::Cleaning => Self::Cleaning(CleaningForm::default()),
        }
    }

    pub const fn kind(&self) -> ServiceKind {
        match self {
            Self::Pest(_) => ServiceKind::Pest,
            Self::Cleaning(_) => ServiceKind::Cleaning,
        }
    }

    pub const fn contact(&self) -> &ContactDetails {
        match self {
            Self::Pest(form) => &form.booking.contact,
            Self::Cleaning(form) => &form.booking.contact,
        }
    }

    fn contact_mut(&mut self) -> &mut ContactDetails {
        match self {
            Self::Pest(form) => &mut form.booking.contact,
            Self::Cleaning(form) => &mut form.booking.contact,
        }
    }

    pub const fn errors(&self) -> &FieldErrors {
        match self {
            Self::Pest(form) => &form.errors,
            Self::Cleaning(form) => &form.errors,
        }
    }

    fn errors_mut(&mut self) -> &mut FieldErrors {
        match self {
            Self::Pest(form) => &mut form.errors,
            Self::Cleaning(form) => &mut form.errors,
        }
    }

    pub fn visible_fields(&self) -> Vec<FieldKey> {
        match self {
            Self::Pest(form) => form.visible_fields(),
            Self::Cleaning(form) => form.visible_fields(),
        }
    }

    pub fn available_add_ons(&self) -> Vec<AddOn> {
        match self {
            Self::Pest(_) => Vec::new(),
            Self::Cleaning(form) => form.available_add_ons(),
        }
    }

    pub fn has_add_on(&self, add_on: AddOn) -> bool {
        match self {
            Self::Pest(_) => false,
            Self::Cleaning(form) => form.has_add_on(add_on),
        }
    }

    pub fn field_label(&self, field: FieldKey) -> &'static str {
        match (self, field) {
            (Self::Pest(_), FieldKey::MattressCount) => "床褥數目 (床蝨專用)",
            _ => field.label(),
        }
    }

    pub fn field_error(&self, field: FieldKey) -> Option<&str> {
        self.errors().get(&field).map(String::as_str)
    }

    const fn phone_error_message(&self) -> &'static str {
        match self {
            Self::Pest(_) => PEST_PHONE_ERROR,
            Self::Cleaning(_) => CLEANING_PHONE_ERROR,
        }
    }

    /// Raw stored value of a text-like field.
    pub fn text(&self, field: FieldKey) -> Option<&str> {
        let contact = self.contact();
        let value = match (self, field) {
            (_, FieldKey::Name) => &contact.name,
            (_, FieldKey::Phone) => &contact.phone,
            (_, FieldKey::AltContact) => &contact.alt_contact,
            (_, FieldKey::AltPhone) => &contact.alt_phone,
            (_, FieldKey::Address) => &contact.address,
            (Self::Pest(form), FieldKey::Remarks) => &form.booking.remarks,
            (Self::Cleaning(form), FieldKey::Remarks) => &form.booking.remarks,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Writes a text field. Phone fields are normalized before storing and
    /// their inline error is recomputed. Returns false for non-text fields.
    pub fn set_text(&mut self, field: FieldKey, value: &str) -> bool {
        match field {
            FieldKey::Phone | FieldKey::AltPhone => {
                let normalized = normalize_phone(value);
                let incomplete = phone_incomplete(&normalized);
                let message = self.phone_error_message();
                let contact = self.contact_mut();
                if field == FieldKey::Phone {
                    contact.phone = normalized;
                } else {
                    contact.alt_phone = normalized;
                }
                if incomplete {
                    self.errors_mut().insert(field, message.to_owned());
                } else {
                    self.errors_mut().remove(&field);
                }
                true
            }
            FieldKey::Name => {
                self.contact_mut().name = value.to_owned();
                true
            }
            FieldKey::AltContact => {
                self.contact_mut().alt_contact = value.to_owned();
                true
            }
            FieldKey::Address => {
                self.contact_mut().address = value.to_owned();
                true
            }
            FieldKey::Remarks => {
                match self {
                    Self::Pest(form) => form.booking.remarks = value.to_owned(),
                    Self::Cleaning(form) => form.booking.remarks = value.to_owned(),
                }
                true
            }
            _ => false,
        }
    }

    pub fn push_char(&mut self, field: FieldKey, ch: char) -> bool {
        let Some(current) = self.text(field) else {
            return false;
        };
        let mut next = current.to_owned();
        next.push(ch);
        self.set_text(field, &next)
    }

    pub fn pop_char(&mut self, field: FieldKey) -> bool {
        let Some(current) = self.text(field) else {
            return false;
        };
        let mut next = current.to_owned();
        next.pop();
        self.set_text(field, &next)
    }

    /// Picking a region always resets the sub-district to its first entry.
    pub fn select_region(&mut self, region: &str) -> bool {
        let Some(entry) = LOCATIONS.iter().find(|entry| entry.region == region) else {
            return false;
        };
        let contact = self.contact_mut();
        contact.region = entry.region.to_owned();
        contact.sub_district = entry.sub_districts[0].to_owned();
        true
    }

    pub fn select_sub_district(&mut self, sub_district: &str) -> bool {
        let known = catalog::sub_districts_for(&self.contact().region).contains(&sub_district);
        if known {
            self.contact_mut().sub_district = sub_district.to_owned();
        }
        known
    }

    pub fn toggle_add_on(&mut self, add_on: AddOn) -> bool {
        match self {
            Self::Pest(_) => false,
            Self::Cleaning(form) => form.toggle_add_on(add_on),
        }
    }

    fn choice_slot(&mut self, field: FieldKey) -> Option<&mut String> {
        match (self, field) {
            (Self::Pest(form), FieldKey::RoomCount) => Some(&mut form.booking.room_count),
            (Self::Pest(form), FieldKey::MattressCount) => Some(&mut form.booking.mattress_count),
            (Self::Pest(form), FieldKey::SqFt) => Some(&mut form.booking.sq_ft),
            (Self::Cleaning(form), FieldKey::CarpetCount) => Some(&mut form.booking.carpet_count),
            (Self::Cleaning(form), FieldKey::MattressCount) => {
                Some(&mut form.booking.mattress_count)
            }
            (Self::Cleaning(form), FieldKey::CurtainCount) => {
                Some(&mut form.booking.curtain_count)
            }
            (Self::Cleaning(form), FieldKey::SqFt) => Some(&mut form.booking.sq_ft),
            _ => None,
        }
    }

    /// Steps a choice field forward or backward through its options.
    pub fn cycle_choice(&mut self, field: FieldKey, delta: isize) -> bool {
        match field {
            FieldKey::Region => {
                let regions: Vec<&str> = catalog::regions().collect();
                match cycle_option(&regions, &self.contact().region, delta) {
                    Some(region) => self.select_region(region),
                    None => false,
                }
            }
            FieldKey::SubDistrict => {
                let options = catalog::sub_districts_for(&self.contact().region);
                match cycle_option(options, &self.contact().sub_district, delta) {
                    Some(sub_district) => self.select_sub_district(sub_district),
                    None => false,
                }
            }
            FieldKey::PestService => match self {
                Self::Pest(form) => {
                    let next = cycle_enum(&PestService::ALL, form.booking.service, delta);
                    form.select_service(next);
                    true
                }
                Self::Cleaning(_) => false,
            },
            FieldKey::MainService => match self {
                Self::Cleaning(form) => {
                    let next = cycle_enum(&CleaningService::ALL, form.booking.main_service, delta);
                    form.select_main_service(next);
                    true
                }
                Self::Pest(_) => false,
            },
            FieldKey::SqFt => self.cycle_slot(field, SQ_FT_OPTIONS, delta),
            _ => self.cycle_slot(field, QUANTITY_OPTIONS, delta),
        }
    }

    fn cycle_slot(&mut self, field: FieldKey, options: &[&str], delta: isize) -> bool {
        let Some(slot) = self.choice_slot(field) else {
            return false;
        };
        match cycle_option(options, slot, delta) {
            Some(next) => {
                *slot = next.to_owned();
                true
            }
            None => false,
        }
    }

    /// Display text for a field row.
    pub fn field_value(&self, field: FieldKey) -> String {
        if let Some(text) = self.text(field) {
            return text.to_owned();
        }
        let contact = self.contact();
        match (self, field) {
            (_, FieldKey::Region) => contact.region.clone(),
            (_, FieldKey::SubDistrict) => contact.sub_district.clone(),
            (Self::Pest(form), FieldKey::PestService) => form.booking.service.label().to_owned(),
            (Self::Cleaning(form), FieldKey::MainService) => {
                form.booking.main_service.label().to_owned()
            }
            (Self::Cleaning(form), FieldKey::AddServices) => {
                if form.booking.add_services.is_empty() {
                    "未選擇".to_owned()
                } else {
                    form.booking
                        .add_services
                        .iter()
                        .map(|add_on| add_on.name())
                        .collect::<Vec<_>>()
                        .join("、")
                }
            }
            (Self::Pest(form), FieldKey::SqFt) => form.booking.sq_ft.clone(),
            (Self::Cleaning(form), FieldKey::SqFt) => form.booking.sq_ft.clone(),
            (Self::Pest(form), FieldKey::RoomCount) => {
                catalog::quantity_label(&form.booking.room_count, catalog::quantity_unit(field))
            }
            (Self::Pest(form), FieldKey::MattressCount) => catalog::quantity_label(
                &form.booking.mattress_count,
                catalog::quantity_unit(field),
            ),
            (Self::Cleaning(form), FieldKey::MattressCount) => catalog::quantity_label(
                &form.booking.mattress_count,
                catalog::quantity_unit(field),
            ),
            (Self::Cleaning(form), FieldKey::CarpetCount) => catalog::quantity_label(
                &form.booking.carpet_count,
                catalog::quantity_unit(field),
            ),
            (Self::Cleaning(form), FieldKey::CurtainCount) => catalog::quantity_label(
                &form.booking.curtain_count,
                catalog::quantity_unit(field),
            ),
            _ => String::new(),
        }
    }

    /// Checks the draft in the fixed order name, phone, second phone,
    /// address. A draft that fails never reaches the submission client.
    pub fn gate(&self) -> Result<BookingDraft, GateError> {
        let contact = self.contact();
        if contact.name.trim().is_empty() {
            return Err(GateError::MissingName);
        }
        if !phone_complete(&contact.phone) {
            return Err(GateError::InvalidPhone);
        }
        if !contact.alt_phone.is_empty() && !phone_complete(&contact.alt_phone) {
            return Err(GateError::InvalidAltPhone);
        }
        if contact.address.trim().is_empty() {
            return Err(GateError::MissingAddress);
        }
        Ok(match self {
            Self::Pest(form) => BookingDraft::Pest(form.booking.clone()),
            Self::Cleaning(form) => BookingDraft::Cleaning(form.booking.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BookingForm, CLEANING_PHONE_ERROR, GateError, PEST_PHONE_ERROR, normalize_phone,
        phone_incomplete,
    };
    use crate::catalog::{AddOn, CleaningService, PestService};
    use crate::model::{BookingDraft, FieldKey, ServiceKind};

    fn filled(kind: ServiceKind) -> BookingForm {
        let mut form = BookingForm::fresh(kind);
        form.set_text(FieldKey::Name, "陳先生");
        form.set_text(FieldKey::Phone, "9123 4567");
        form.set_text(FieldKey::Address, "沙田第一城 5 座 12 樓 C 室");
        form
    }

    #[test]
    fn normalizer_strips_non_digits_and_truncates() {
        assert_eq!(normalize_phone("9123-4567"), "91234567");
        assert_eq!(normalize_phone("+852 9123 4567"), "85291234");
        assert_eq!(normalize_phone("abc"), "");
        assert_eq!(normalize_phone("１２３"), "");
        assert!(phone_incomplete("1234567"));
        assert!(!phone_incomplete(""));
        assert!(!phone_incomplete("12345678"));
    }

    #[test]
    fn phone_errors_follow_form_wording() {
        let mut pest = BookingForm::fresh(ServiceKind::Pest);
        pest.set_text(FieldKey::Phone, "123");
        assert_eq!(pest.field_error(FieldKey::Phone), Some(PEST_PHONE_ERROR));
        pest.set_text(FieldKey::Phone, "");
        assert_eq!(pest.field_error(FieldKey::Phone), None);

        let mut cleaning = BookingForm::fresh(ServiceKind::Cleaning);
        cleaning.set_text(FieldKey::AltPhone, "12a3");
        assert_eq!(cleaning.text(FieldKey::AltPhone), Some("123"));
        assert_eq!(
            cleaning.field_error(FieldKey::AltPhone),
            Some(CLEANING_PHONE_ERROR)
        );
        cleaning.set_text(FieldKey::AltPhone, "12345678");
        assert_eq!(cleaning.field_error(FieldKey::AltPhone), None);
    }

    #[test]
    fn typing_past_eight_digits_is_ignored() {
        let mut form = BookingForm::fresh(ServiceKind::Pest);
        for ch in "123456789".chars() {
            form.push_char(FieldKey::Phone, ch);
        }
        assert_eq!(form.text(FieldKey::Phone), Some("12345678"));
        form.pop_char(FieldKey::Phone);
        assert_eq!(form.field_error(FieldKey::Phone), Some(PEST_PHONE_ERROR));
    }

    #[test]
    fn gate_checks_fields_in_order() {
        let form = BookingForm::fresh(ServiceKind::Pest);
        assert_eq!(form.gate(), Err(GateError::MissingName));

        let mut form = filled(ServiceKind::Pest);
        form.set_text(FieldKey::Phone, "1234567");
        assert_eq!(form.gate(), Err(GateError::InvalidPhone));
        assert_eq!(
            GateError::InvalidPhone.to_string(),
            "請填寫有效的 8 位數字聯絡電話"
        );

        let mut form = filled(ServiceKind::Pest);
        form.set_text(FieldKey::AltPhone, "123");
        assert_eq!(form.gate(), Err(GateError::InvalidAltPhone));

        let mut form = filled(ServiceKind::Cleaning);
        form.set_text(FieldKey::Address, "   ");
        assert_eq!(form.gate(), Err(GateError::MissingAddress));
    }

    #[test]
    fn passing_gate_yields_tagged_draft() {
        let form = filled(ServiceKind::Cleaning);
        let draft = form.gate().expect("filled form should pass");
        assert_eq!(draft.service_kind(), ServiceKind::Cleaning);
        let BookingDraft::Cleaning(booking) = draft else {
            panic!("expected cleaning draft");
        };
        assert_eq!(booking.contact.phone, "91234567");
        assert_eq!(booking.main_service, CleaningService::Household);
        assert_eq!(booking.carpet_count, "N/A");
    }

    #[test]
    fn pest_visibility_tracks_service() {
        let mut form = BookingForm::fresh(ServiceKind::Pest);
        let fields = form.visible_fields();
        assert!(!fields.contains(&FieldKey::RoomCount));
        assert!(fields.contains(&FieldKey::SqFt));

        let BookingForm::Pest(pest) = &mut form else {
            panic!("expected pest form");
        };
        pest.select_service(PestService::Bedbug);
        let fields = form.visible_fields();
        assert!(fields.contains(&FieldKey::RoomCount));
        assert!(fields.contains(&FieldKey::MattressCount));
        assert_eq!(form.field_label(FieldKey::MattressCount), "床褥數目 (床蝨專用)");

        let BookingForm::Pest(pest) = &mut form else {
            panic!("expected pest form");
        };
        pest.select_service(PestService::HiveRemoval);
        let fields = form.visible_fields();
        assert!(!fields.contains(&FieldKey::SqFt));
        assert!(!fields.contains(&FieldKey::RoomCount));
    }

    #[test]
    fn cleaning_add_ons_reveal_counts_and_reset_on_service_change() {
        let mut form = BookingForm::fresh(ServiceKind::Cleaning);
        assert!(form.toggle_add_on(AddOn::Curtain));
        assert!(form.toggle_add_on(AddOn::Carpet));
        assert!(!form.toggle_add_on(AddOn::Oven), "oven not offered for 家居清潔");

        let fields = form.visible_fields();
        let carpet = fields.iter().position(|f| *f == FieldKey::CarpetCount);
        let curtain = fields.iter().position(|f| *f == FieldKey::CurtainCount);
        assert!(carpet < curtain);
        assert!(!fields.contains(&FieldKey::MattressCount));

        form.cycle_choice(FieldKey::MainService, 1);
        let BookingForm::Cleaning(cleaning) = &form else {
            panic!("expected cleaning form");
        };
        assert_eq!(cleaning.booking.main_service, CleaningService::Deep);
        assert!(cleaning.booking.add_services.is_empty());

        form.cycle_choice(FieldKey::MainService, -2);
        assert!(form.available_add_ons().is_empty());
        let fields = form.visible_fields();
        assert!(!fields.contains(&FieldKey::AddServices));
        assert!(!fields.contains(&FieldKey::SqFt));
    }

    #[test]
    fn region_change_resets_sub_district() {
        let mut form = BookingForm::fresh(ServiceKind::Pest);
        assert!(form.select_sub_district("灣仔"));
        assert!(!form.select_sub_district("沙田"));
        assert!(form.select_region("新界東"));
        assert_eq!(form.contact().sub_district, "沙田");
        form.cycle_choice(FieldKey::Region, -1);
        assert_eq!(form.contact().region, "九龍");
        assert_eq!(form.contact().sub_district, "尖沙咀");
    }

    #[test]
    fn quantity_cycle_wraps_and_labels_with_unit() {
        let mut form = BookingForm::fresh(ServiceKind::Cleaning);
        form.toggle_add_on(AddOn::Curtain);
        form.cycle_choice(FieldKey::CurtainCount, -1);
        assert_eq!(form.field_value(FieldKey::CurtainCount), "5塊或以上");
        form.cycle_choice(FieldKey::CurtainCount, 1);
        assert_eq!(form.field_value(FieldKey::CurtainCount), "N/A");
        form.cycle_choice(FieldKey::CurtainCount, 2);
        assert_eq!(form.field_value(FieldKey::CurtainCount), "2塊");
    }
}

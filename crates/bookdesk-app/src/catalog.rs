// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::model::FieldKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationCatalogEntry {
    pub region: &'static str,
    pub sub_districts: &'static [&'static str],
}

pub const LOCATIONS: &[LocationCatalogEntry] = &[
    LocationCatalogEntry {
        region: "香港島",
        sub_districts: &[
            "中西區", "灣仔", "銅鑼灣", "北角", "鰂魚涌", "柴灣", "香港仔", "薄扶林", "赤柱",
        ],
    },
    LocationCatalogEntry {
        region: "九龍",
        sub_districts: &[
            "尖沙咀", "油麻地", "旺角", "深水埗", "長沙灣", "九龍城", "紅磡", "黃大仙", "觀塘",
            "將軍澳",
        ],
    },
    LocationCatalogEntry {
        region: "新界東",
        sub_districts: &["沙田", "馬鞍山", "大埔", "粉嶺", "上水", "西貢"],
    },
    LocationCatalogEntry {
        region: "新界西",
        sub_districts: &["荃灣", "葵涌", "青衣", "屯門", "元朗", "天水圍"],
    },
    LocationCatalogEntry {
        region: "離島",
        sub_districts: &["東涌", "愉景灣", "長洲", "坪洲", "南丫島"],
    },
];

pub const NOT_APPLICABLE: &str = "N/A";
pub const QUANTITY_FIVE_OR_MORE: &str = "5個/張或以上";
pub const QUANTITY_OPTIONS: &[&str] = &[NOT_APPLICABLE, "1", "2", "3", "4", QUANTITY_FIVE_OR_MORE];

pub const SQ_FT_OPTIONS: &[&str] = &[
    "400呎以下",
    "400-600呎",
    "600-800呎",
    "800-1000呎",
    "1000-1500呎",
    "1500呎以上",
];

pub fn regions() -> impl Iterator<Item = &'static str> {
    LOCATIONS.iter().map(|entry| entry.region)
}

pub fn sub_districts_for(region: &str) -> &'static [&'static str] {
    LOCATIONS
        .iter()
        .find(|entry| entry.region == region)
        .map(|entry| entry.sub_districts)
        .unwrap_or_default()
}

/// First region and its first sub-district.
pub fn default_location() -> (&'static str, &'static str) {
    let entry = &LOCATIONS[0];
    (entry.region, entry.sub_districts[0])
}

/// Display label for a quantity option, e.g. `3張` or `5塊或以上`.
pub fn quantity_label(option: &str, unit: &str) -> String {
    if option == QUANTITY_FIVE_OR_MORE {
        format!("5{unit}或以上")
    } else if option == NOT_APPLICABLE {
        NOT_APPLICABLE.to_owned()
    } else {
        format!("{option}{unit}")
    }
}

pub fn quantity_unit(field: FieldKey) -> &'static str {
    match field {
        FieldKey::RoomCount => "間",
        FieldKey::CurtainCount => "塊",
        _ => "張",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PestService {
    #[serde(rename = "蟑螂")]
    Cockroach,
    #[serde(rename = "老鼠")]
    Rodent,
    #[serde(rename = "床蝨")]
    Bedbug,
    #[serde(rename = "白蟻")]
    Termite,
    #[serde(rename = "蚊蟲")]
    Mosquito,
    #[serde(rename = "蜂巢移除")]
    HiveRemoval,
    #[serde(rename = "蛀木蟲")]
    WoodBorer,
    #[serde(rename = "全屋消毒")]
    Disinfection,
}

impl PestService {
    pub const ALL: [Self; 8] = [
        Self::Cockroach,
        Self::Rodent,
        Self::Bedbug,
        Self::Termite,
        Self::Mosquito,
        Self::HiveRemoval,
        Self::WoodBorer,
        Self::Disinfection,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cockroach => "蟑螂",
            Self::Rodent => "老鼠",
            Self::Bedbug => "床蝨",
            Self::Termite => "白蟻",
            Self::Mosquito => "蚊蟲",
            Self::HiveRemoval => "蜂巢移除",
            Self::WoodBorer => "蛀木蟲",
            Self::Disinfection => "全屋消毒",
        }
    }

    /// Quantity fields this treatment needs on top of the common ones.
    pub const fn unit_fields(self) -> &'static [FieldKey] {
        match self {
            Self::Bedbug => &[FieldKey::RoomCount, FieldKey::MattressCount],
            _ => &[],
        }
    }

    /// Hive and wood-borer jobs are priced per site, not by floor area.
    pub const fn shows_sq_ft(self) -> bool {
        !matches!(self, Self::HiveRemoval | Self::WoodBorer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CleaningService {
    #[serde(rename = "家居清潔")]
    Household,
    #[serde(rename = "深層清潔")]
    Deep,
    #[serde(rename = "裝修後清潔")]
    PostRenovation,
    #[serde(rename = "入伙清潔")]
    MoveIn,
    #[serde(rename = "通渠")]
    Drain,
}

impl CleaningService {
    pub const ALL: [Self; 5] = [
        Self::Household,
        Self::Deep,
        Self::PostRenovation,
        Self::MoveIn,
        Self::Drain,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Household => "家居清潔",
            Self::Deep => "深層清潔",
            Self::PostRenovation => "裝修後清潔",
            Self::MoveIn => "入伙清潔",
            Self::Drain => "通渠",
        }
    }

    pub const fn shows_sq_ft(self) -> bool {
        !matches!(self, Self::Drain)
    }

    pub fn available_add_ons(self) -> Vec<AddOn> {
        AddOn::ALL
            .into_iter()
            .filter(|add_on| add_on.applies_to(self))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddOn {
    Carpet,
    Mattress,
    Curtain,
    Oven,
    Fridge,
}

impl AddOn {
    pub const ALL: [Self; 5] = [
        Self::Carpet,
        Self::Mattress,
        Self::Curtain,
        Self::Oven,
        Self::Fridge,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Carpet => "carpet",
            Self::Mattress => "mattress",
            Self::Curtain => "curtain",
            Self::Oven => "oven",
            Self::Fridge => "fridge",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Carpet => "地毯清洗",
            Self::Mattress => "床褥除蟎",
            Self::Curtain => "窗簾/布藝清洗",
            Self::Oven => "焗爐清潔",
            Self::Fridge => "雪櫃清潔",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Carpet => "深層吸塵及蒸氣清洗",
            Self::Mattress => "高溫蒸氣除蟎殺菌",
            Self::Curtain => "拆洗或上門蒸氣清潔",
            Self::Oven => "去除油污及焦垢",
            Self::Fridge => "內外清潔及除味",
        }
    }

    pub const fn applicable_to(self) -> &'static [CleaningService] {
        match self {
            Self::Carpet | Self::Mattress | Self::Curtain => &[
                CleaningService::Household,
                CleaningService::Deep,
                CleaningService::PostRenovation,
                CleaningService::MoveIn,
            ],
            Self::Oven | Self::Fridge => &[
                CleaningService::Deep,
                CleaningService::PostRenovation,
                CleaningService::MoveIn,
            ],
        }
    }

    pub fn applies_to(self, service: CleaningService) -> bool {
        self.applicable_to().contains(&service)
    }

    /// The quantity field revealed when this add-on is selected.
    pub const fn quantity_field(self) -> Option<FieldKey> {
        match self {
            Self::Carpet => Some(FieldKey::CarpetCount),
            Self::Mattress => Some(FieldKey::MattressCount),
            Self::Curtain => Some(FieldKey::CurtainCount),
            Self::Oven | Self::Fridge => None,
        }
    }
}
